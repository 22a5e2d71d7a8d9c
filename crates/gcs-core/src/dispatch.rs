//! Map click routing.

use crate::models::{Category, Point};
use serde::{Deserialize, Serialize};

/// Modifier keys held during a click.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    #[serde(default)]
    pub ctrl: bool,
    #[serde(default)]
    pub shift: bool,
}

/// A click on empty map space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapClick {
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub modifiers: Modifiers,
}

impl MapClick {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self {
            lat,
            lon,
            modifiers: Modifiers::default(),
        }
    }

    pub fn with_ctrl(mut self) -> Self {
        self.modifiers.ctrl = true;
        self
    }

    pub fn with_shift(mut self) -> Self {
        self.modifiers.shift = true;
        self
    }

    pub fn point(&self) -> Point {
        Point::new(self.lat, self.lon)
    }
}

/// Pick the collection a click adds to. Ctrl wins over shift.
pub fn route(modifiers: Modifiers) -> Category {
    if modifiers.ctrl {
        Category::Geofence
    } else if modifiers.shift {
        Category::Rally
    } else {
        Category::Waypoint
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn routing_precedence() {
        assert_eq!(route(MapClick::new(1.0, 2.0).modifiers), Category::Waypoint);
        assert_eq!(route(MapClick::new(1.0, 2.0).with_shift().modifiers), Category::Rally);
        assert_eq!(route(MapClick::new(1.0, 2.0).with_ctrl().modifiers), Category::Geofence);
        assert_eq!(
            route(MapClick::new(1.0, 2.0).with_ctrl().with_shift().modifiers),
            Category::Geofence
        );
    }
}
