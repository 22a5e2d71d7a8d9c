//! Core data models for the mission map.

use serde::{Deserialize, Serialize};

/// A `[lat, lon]` pair as handed to the map surface.
pub type LatLon = [f64; 2];

/// A single editable point on the map.
///
/// Waypoints always carry an altitude once stored in a collection;
/// geofence vertices and rally points never do.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub lat: f64,
    pub lon: f64,
    #[serde(default, alias = "alt", skip_serializing_if = "Option::is_none")]
    pub altitude_m: Option<f64>,
}

impl Point {
    /// Create a point without altitude.
    pub fn new(lat: f64, lon: f64) -> Self {
        Self {
            lat,
            lon,
            altitude_m: None,
        }
    }

    /// Set the altitude in meters.
    pub fn with_altitude(mut self, altitude_m: f64) -> Self {
        self.altitude_m = Some(altitude_m);
        self
    }

    pub fn lat_lon(&self) -> LatLon {
        [self.lat, self.lon]
    }
}

impl From<LatLon> for Point {
    fn from([lat, lon]: LatLon) -> Self {
        Self::new(lat, lon)
    }
}

impl From<[f64; 3]> for Point {
    fn from([lat, lon, altitude_m]: [f64; 3]) -> Self {
        Self::new(lat, lon).with_altitude(altitude_m)
    }
}

/// The three point categories an operator can place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Mission waypoint with altitude
    Waypoint,
    /// Geofence boundary vertex
    Geofence,
    /// Fallback landing location
    Rally,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Waypoint, Category::Geofence, Category::Rally];

    /// Rendering and altitude rules for this category.
    pub fn style(self, default_waypoint_altitude_m: f64) -> CollectionStyle {
        match self {
            Category::Waypoint => CollectionStyle {
                color: MarkerColor::Blue,
                path_rule: PathRule::Polyline,
                default_altitude_m: Some(default_waypoint_altitude_m),
            },
            Category::Geofence => CollectionStyle {
                color: MarkerColor::Red,
                path_rule: PathRule::Polygon,
                default_altitude_m: None,
            },
            Category::Rally => CollectionStyle {
                color: MarkerColor::Green,
                path_rule: PathRule::Hidden,
                default_altitude_m: None,
            },
        }
    }

    /// Whether points of this category store an altitude.
    pub fn carries_altitude(self) -> bool {
        matches!(self, Category::Waypoint)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Waypoint => "waypoint",
            Category::Geofence => "geofence",
            Category::Rally => "rally",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerColor {
    Blue,
    Red,
    Green,
}

/// How a collection's path is derived from its points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathRule {
    /// Open line through every point in order
    Polyline,
    /// Closed ring once there are at least three vertices
    Polygon,
    /// Path object exists but is never drawn
    Hidden,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollectionStyle {
    pub color: MarkerColor,
    pub path_rule: PathRule,
    /// Altitude filled in when a point arrives without one.
    /// `None` means the category stores no altitude at all.
    pub default_altitude_m: Option<f64>,
}

impl CollectionStyle {
    /// Apply this style's altitude rule to an incoming point.
    pub fn normalize(&self, point: Point) -> Point {
        Point {
            altitude_m: self
                .default_altitude_m
                .map(|default| point.altitude_m.unwrap_or(default)),
            ..point
        }
    }
}
