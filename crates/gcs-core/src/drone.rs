//! Live drone position marker.

use crate::models::LatLon;
use crate::surface::{MapSurface, MarkerIcon, MarkerId};

/// Single non-interactive marker tracking the vehicle.
#[derive(Debug, Clone, Copy)]
pub struct DroneMarker {
    marker: MarkerId,
}

impl DroneMarker {
    /// Place the marker, normally at the map center.
    pub fn new<S: MapSurface + ?Sized>(surface: &mut S, position: LatLon) -> Self {
        let marker = surface.add_marker(position, MarkerIcon::Drone, false);
        Self { marker }
    }

    pub fn marker_id(&self) -> MarkerId {
        self.marker
    }

    pub fn set_position<S: MapSurface + ?Sized>(&self, surface: &mut S, lat: f64, lon: f64) {
        surface.move_marker(self.marker, [lat, lon]);
    }

    pub fn remove<S: MapSurface + ?Sized>(self, surface: &mut S) {
        surface.remove_marker(self.marker);
    }
}
