//! In-memory surface used by tests and the CLI tools.

use super::{MapSurface, MarkerIcon, MarkerId, PathId, PathShape};
use crate::editor::EditForm;
use crate::models::{LatLon, MarkerColor};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerState {
    pub position: LatLon,
    pub icon: MarkerIcon,
    pub draggable: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathState {
    pub color: MarkerColor,
    pub shape: PathShape,
    pub coords: Vec<LatLon>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PopupState {
    pub at: LatLon,
    pub form: EditForm,
}

/// Records everything drawn so callers can inspect the rendered map.
#[derive(Debug, Default, Serialize)]
pub struct InMemorySurface {
    markers: BTreeMap<MarkerId, MarkerState>,
    paths: BTreeMap<PathId, PathState>,
    popup: Option<PopupState>,
    tile_layer: Option<(String, u8)>,
    next_handle: u64,
}

impl InMemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn marker(&self, marker: MarkerId) -> Option<&MarkerState> {
        self.markers.get(&marker)
    }

    /// Label currently shown on a numbered marker.
    pub fn label(&self, marker: MarkerId) -> Option<usize> {
        self.markers.get(&marker).and_then(|m| m.icon.label())
    }

    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    pub fn path(&self, path: PathId) -> Option<&PathState> {
        self.paths.get(&path)
    }

    pub fn popup(&self) -> Option<&PopupState> {
        self.popup.as_ref()
    }

    pub fn tile_layer(&self) -> Option<&str> {
        self.tile_layer.as_ref().map(|(url, _)| url.as_str())
    }

    fn next_handle(&mut self) -> u64 {
        self.next_handle += 1;
        self.next_handle
    }
}

impl MapSurface for InMemorySurface {
    fn add_marker(&mut self, position: LatLon, icon: MarkerIcon, draggable: bool) -> MarkerId {
        let id = MarkerId(self.next_handle());
        self.markers.insert(
            id,
            MarkerState {
                position,
                icon,
                draggable,
            },
        );
        id
    }

    fn move_marker(&mut self, marker: MarkerId, position: LatLon) {
        if let Some(state) = self.markers.get_mut(&marker) {
            state.position = position;
        }
    }

    fn set_marker_icon(&mut self, marker: MarkerId, icon: MarkerIcon) {
        if let Some(state) = self.markers.get_mut(&marker) {
            state.icon = icon;
        }
    }

    fn remove_marker(&mut self, marker: MarkerId) {
        self.markers.remove(&marker);
    }

    fn add_path(&mut self, color: MarkerColor) -> PathId {
        let id = PathId(self.next_handle());
        self.paths.insert(
            id,
            PathState {
                color,
                shape: PathShape::Polyline,
                coords: Vec::new(),
            },
        );
        id
    }

    fn set_path(&mut self, path: PathId, shape: PathShape, coords: &[LatLon]) {
        if let Some(state) = self.paths.get_mut(&path) {
            state.shape = shape;
            state.coords = coords.to_vec();
        }
    }

    fn remove_path(&mut self, path: PathId) {
        self.paths.remove(&path);
    }

    fn open_popup(&mut self, at: LatLon, form: &EditForm) {
        self.popup = Some(PopupState {
            at,
            form: form.clone(),
        });
    }

    fn close_popup(&mut self) {
        self.popup = None;
    }

    fn set_tile_layer(&mut self, url: &str, max_zoom: u8) {
        self.tile_layer = Some((url.to_string(), max_zoom));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handles_are_unique_across_markers_and_paths() {
        let mut surface = InMemorySurface::new();
        let path = surface.add_path(MarkerColor::Red);
        let marker = surface.add_marker([1.0, 2.0], MarkerIcon::Drone, false);
        assert_ne!(path.0, marker.0);
        assert_eq!(surface.marker_count(), 1);
        assert_eq!(surface.label(marker), None);
    }

    #[test]
    fn operations_on_removed_marker_are_ignored() {
        let mut surface = InMemorySurface::new();
        let marker = surface.add_marker([1.0, 2.0], MarkerIcon::numbered(0, MarkerColor::Blue), true);
        surface.remove_marker(marker);
        surface.move_marker(marker, [3.0, 4.0]);
        surface.set_marker_icon(marker, MarkerIcon::numbered(4, MarkerColor::Blue));
        assert!(surface.marker(marker).is_none());
    }
}
