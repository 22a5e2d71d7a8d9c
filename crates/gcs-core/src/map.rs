//! Mission map controller.
//!
//! Owns the surface, the three point collections, the drone marker and the
//! edit popup. This is the API a hosting application drives.

use crate::collection::PointCollection;
use crate::config::MapConfig;
use crate::dispatch::{self, MapClick};
use crate::drone::DroneMarker;
use crate::editor::EditForm;
use crate::error::{MissionError, Result};
use crate::models::{Category, Point};
use crate::surface::{MapSurface, MarkerEvent, MarkerId};
use crate::tiles::{TileSources, TILE_MAX_ZOOM};

/// What a marker interaction did.
#[derive(Debug, Clone, PartialEq)]
pub enum MarkerOutcome {
    /// Editor opened for the point at this index
    EditorOpened { category: Category, index: usize },
    /// Point at this index moved
    Moved { category: Category, index: usize },
}

pub struct MissionMap<S: MapSurface> {
    surface: S,
    config: MapConfig,
    waypoints: PointCollection,
    geofence: PointCollection,
    rally: PointCollection,
    drone: DroneMarker,
    popup: Option<EditForm>,
    tile_sources: TileSources,
    active_tile_source: Option<String>,
}

impl<S: MapSurface> MissionMap<S> {
    /// Build the map on `surface` with the default tile sources.
    pub fn new(surface: S, config: MapConfig) -> Self {
        Self::with_tile_sources(surface, config, TileSources::default())
    }

    pub fn with_tile_sources(mut surface: S, config: MapConfig, tile_sources: TileSources) -> Self {
        let alt = config.default_waypoint_altitude_m;
        let waypoints =
            PointCollection::new(Category::Waypoint, Category::Waypoint.style(alt), &mut surface);
        let geofence =
            PointCollection::new(Category::Geofence, Category::Geofence.style(alt), &mut surface);
        let rally = PointCollection::new(Category::Rally, Category::Rally.style(alt), &mut surface);
        let drone = DroneMarker::new(&mut surface, config.center);

        let mut map = Self {
            surface,
            config,
            waypoints,
            geofence,
            rally,
            drone,
            popup: None,
            tile_sources,
            active_tile_source: None,
        };

        let initial = map.config.tile_source.clone();
        if let Err(err) = map.apply_tile_source(&initial) {
            tracing::warn!("Initial tile source not applied: {}", err);
        }
        tracing::info!(
            "Mission map initialized at ({}, {}) zoom {}",
            map.config.center[0],
            map.config.center[1],
            map.config.zoom
        );
        map
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    pub fn collection(&self, category: Category) -> &PointCollection {
        match category {
            Category::Waypoint => &self.waypoints,
            Category::Geofence => &self.geofence,
            Category::Rally => &self.rally,
        }
    }

    fn parts_mut(&mut self, category: Category) -> (&mut PointCollection, &mut S) {
        let collection = match category {
            Category::Waypoint => &mut self.waypoints,
            Category::Geofence => &mut self.geofence,
            Category::Rally => &mut self.rally,
        };
        (collection, &mut self.surface)
    }

    // ========== GENERIC COLLECTION ACCESS ==========

    pub fn add(&mut self, category: Category, point: Point) -> usize {
        let (collection, surface) = self.parts_mut(category);
        collection.add(surface, point)
    }

    pub fn update(&mut self, category: Category, index: usize, point: Point) -> Result<()> {
        let (collection, surface) = self.parts_mut(category);
        collection.update(surface, index, point)
    }

    pub fn delete(&mut self, category: Category, index: usize) -> Result<Point> {
        let (collection, surface) = self.parts_mut(category);
        collection.delete(surface, index)
    }

    pub fn clear(&mut self, category: Category) {
        let (collection, surface) = self.parts_mut(category);
        collection.clear(surface);
    }

    pub fn get(&self, category: Category) -> Vec<Point> {
        self.collection(category).get_all()
    }

    pub fn set(&mut self, category: Category, points: Vec<Point>) {
        let (collection, surface) = self.parts_mut(category);
        collection.set_all(surface, points);
    }

    // ========== HOST API ==========

    pub fn add_waypoint(&mut self, lat: f64, lon: f64, altitude_m: Option<f64>) -> usize {
        let point = Point {
            lat,
            lon,
            altitude_m,
        };
        self.add(Category::Waypoint, point)
    }

    pub fn add_geofence_point(&mut self, lat: f64, lon: f64) -> usize {
        self.add(Category::Geofence, Point::new(lat, lon))
    }

    pub fn add_rally_point(&mut self, lat: f64, lon: f64) -> usize {
        self.add(Category::Rally, Point::new(lat, lon))
    }

    pub fn clear_waypoints(&mut self) {
        self.clear(Category::Waypoint);
    }

    pub fn clear_geofence(&mut self) {
        self.clear(Category::Geofence);
    }

    pub fn clear_rally_points(&mut self) {
        self.clear(Category::Rally);
    }

    pub fn get_waypoints(&self) -> Vec<Point> {
        self.get(Category::Waypoint)
    }

    pub fn get_geofence(&self) -> Vec<Point> {
        self.get(Category::Geofence)
    }

    pub fn get_rally_points(&self) -> Vec<Point> {
        self.get(Category::Rally)
    }

    pub fn set_waypoints(&mut self, points: Vec<Point>) {
        self.set(Category::Waypoint, points);
    }

    pub fn set_geofence(&mut self, points: Vec<Point>) {
        self.set(Category::Geofence, points);
    }

    pub fn set_rally_points(&mut self, points: Vec<Point>) {
        self.set(Category::Rally, points);
    }

    pub fn set_drone_position(&mut self, lat: f64, lon: f64) {
        self.drone.set_position(&mut self.surface, lat, lon);
    }

    pub fn drone_marker(&self) -> MarkerId {
        self.drone.marker_id()
    }

    // ========== EVENTS ==========

    /// Add the clicked point to the collection chosen by its modifiers.
    pub fn handle_map_click(&mut self, click: &MapClick) -> (Category, usize) {
        let category = dispatch::route(click.modifiers);
        let index = self.add(category, click.point());
        (category, index)
    }

    pub fn handle_marker_event(
        &mut self,
        marker: MarkerId,
        event: MarkerEvent,
    ) -> Result<MarkerOutcome> {
        match event {
            MarkerEvent::Click => {
                let (category, index) = self.locate(marker)?;
                self.open_editor(marker)?;
                Ok(MarkerOutcome::EditorOpened { category, index })
            }
            MarkerEvent::DragEnd { lat, lon } => {
                let (category, _) = self.locate(marker)?;
                self.close_popup();
                let (collection, surface) = self.parts_mut(category);
                let index = collection.drag(surface, marker, lat, lon)?;
                Ok(MarkerOutcome::Moved { category, index })
            }
        }
    }

    /// Find which collection owns a marker and its current index.
    pub fn locate(&self, marker: MarkerId) -> Result<(Category, usize)> {
        Category::ALL
            .into_iter()
            .find_map(|category| {
                self.collection(category)
                    .index_of(marker)
                    .map(|index| (category, index))
            })
            .ok_or(MissionError::UnknownMarker(marker))
    }

    // ========== EDIT POPUP ==========

    pub fn popup(&self) -> Option<&EditForm> {
        self.popup.as_ref()
    }

    pub fn open_editor(&mut self, marker: MarkerId) -> Result<&EditForm> {
        let (category, index) = self.locate(marker)?;
        let point = *self
            .collection(category)
            .point(index)
            .ok_or(MissionError::UnknownMarker(marker))?;
        let form = EditForm::for_point(marker, category, &point);
        self.surface.open_popup(point.lat_lon(), &form);
        Ok(self.popup.insert(form))
    }

    /// Apply an edited form. The popup closes only when the save succeeds.
    pub fn save_editor(&mut self, form: &EditForm) -> Result<usize> {
        let (category, index) = self.locate_form(form)?;
        let point = form.parse()?;
        self.update(category, index, point)?;
        self.close_popup();
        Ok(index)
    }

    pub fn delete_from_editor(&mut self, form: &EditForm) -> Result<Point> {
        let (category, index) = self.locate_form(form)?;
        let point = self.delete(category, index)?;
        self.close_popup();
        Ok(point)
    }

    fn locate_form(&self, form: &EditForm) -> Result<(Category, usize)> {
        let (category, index) = self.locate(form.marker)?;
        if category != form.category {
            return Err(MissionError::CategoryMismatch {
                marker: form.marker,
                form: form.category,
                actual: category,
            });
        }
        Ok((category, index))
    }

    pub fn close_popup(&mut self) {
        if self.popup.take().is_some() {
            self.surface.close_popup();
        }
    }

    // ========== TILE SOURCES ==========

    pub fn tile_sources(&self) -> &TileSources {
        &self.tile_sources
    }

    pub fn tile_sources_mut(&mut self) -> &mut TileSources {
        &mut self.tile_sources
    }

    pub fn active_tile_source(&self) -> Option<&str> {
        self.active_tile_source.as_deref()
    }

    pub fn apply_tile_source(&mut self, name: &str) -> Result<()> {
        let url = self
            .tile_sources
            .get(name)
            .ok_or_else(|| MissionError::UnknownTileSource(name.to_string()))?;
        self.surface.set_tile_layer(url, TILE_MAX_ZOOM);
        tracing::info!("Tile source set to {}", name);
        self.active_tile_source = Some(name.to_string());
        Ok(())
    }

    /// Remove everything this map drew and hand the surface back.
    pub fn into_surface(mut self) -> S {
        self.close_popup();
        self.waypoints.teardown(&mut self.surface);
        self.geofence.teardown(&mut self.surface);
        self.rally.teardown(&mut self.surface);
        self.drone.remove(&mut self.surface);
        self.surface
    }
}
