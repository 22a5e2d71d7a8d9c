//! Map surface abstraction.
//!
//! The editor never talks to a map library directly. Whatever hosts the
//! map (a web view bridge, a native widget, [`InMemorySurface`]) implements
//! [`MapSurface`] and hands out opaque handles for markers and paths.

mod memory;

pub use memory::{InMemorySurface, MarkerState, PathState, PopupState};

use crate::editor::EditForm;
use crate::models::{LatLon, MarkerColor};
use serde::{Deserialize, Serialize};

/// Handle to a marker placed on the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MarkerId(pub u64);

impl std::fmt::Display for MarkerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "m{}", self.0)
    }
}

/// Handle to a line or polygon drawn on the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PathId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathShape {
    Polyline,
    Polygon,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MarkerIcon {
    /// Pin showing the point's 1-based position
    Numbered { number: usize, color: MarkerColor },
    /// Live vehicle position
    Drone,
}

impl MarkerIcon {
    pub fn numbered(index: usize, color: MarkerColor) -> Self {
        MarkerIcon::Numbered {
            number: index + 1,
            color,
        }
    }

    /// Displayed label, if the icon has one.
    pub fn label(&self) -> Option<usize> {
        match self {
            MarkerIcon::Numbered { number, .. } => Some(*number),
            MarkerIcon::Drone => None,
        }
    }
}

/// Interaction reported by the host for a marker.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MarkerEvent {
    /// Marker was clicked (opens the editor)
    Click,
    /// Marker was dropped at a new position
    DragEnd { lat: f64, lon: f64 },
}

/// Drawing operations a host map must provide.
pub trait MapSurface {
    fn add_marker(&mut self, position: LatLon, icon: MarkerIcon, draggable: bool) -> MarkerId;

    fn move_marker(&mut self, marker: MarkerId, position: LatLon);

    fn set_marker_icon(&mut self, marker: MarkerId, icon: MarkerIcon);

    fn remove_marker(&mut self, marker: MarkerId);

    fn add_path(&mut self, color: MarkerColor) -> PathId;

    /// Replace the coordinates of a path. An empty slice hides it.
    fn set_path(&mut self, path: PathId, shape: PathShape, coords: &[LatLon]);

    fn remove_path(&mut self, path: PathId);

    fn open_popup(&mut self, at: LatLon, form: &EditForm);

    fn close_popup(&mut self);

    /// Swap the base tile layer.
    fn set_tile_layer(&mut self, url: &str, max_zoom: u8);
}
