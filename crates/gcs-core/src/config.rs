//! Map configuration from environment.

use crate::models::LatLon;
use std::env;

#[derive(Debug, Clone)]
pub struct MapConfig {
    /// Initial map center, also where the drone marker starts
    pub center: LatLon,
    pub zoom: u8,
    /// Altitude given to waypoints added without one (meters)
    pub default_waypoint_altitude_m: f64,
    /// JSON file holding named tile sources
    pub tile_sources_path: String,
    /// Tile source applied at startup
    pub tile_source: String,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            center: [41.79071700571516, 44.7580536055492],
            zoom: 13,
            default_waypoint_altitude_m: 15.0,
            tile_sources_path: "map_sources.json".to_string(),
            tile_source: "OpenStreetMap".to_string(),
        }
    }
}

impl MapConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            center: [
                parse_env("GCS_MAP_CENTER_LAT").unwrap_or(defaults.center[0]),
                parse_env("GCS_MAP_CENTER_LON").unwrap_or(defaults.center[1]),
            ],
            zoom: parse_env("GCS_MAP_ZOOM").unwrap_or(defaults.zoom),
            default_waypoint_altitude_m: parse_env("GCS_DEFAULT_WAYPOINT_ALT_M")
                .unwrap_or(defaults.default_waypoint_altitude_m),
            tile_sources_path: env::var("GCS_MAP_SOURCES")
                .unwrap_or(defaults.tile_sources_path),
            tile_source: env::var("GCS_TILE_SOURCE").unwrap_or(defaults.tile_source),
        }
    }
}

fn parse_env<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|s| s.parse().ok())
}
