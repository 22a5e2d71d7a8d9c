//! Operator event scripts replayed against a mission map.
//!
//! A script seeds the three collections and then applies events the way a
//! host would forward them. Marker events name the point by its current
//! collection index; the replayer looks up the marker shown there at that
//! moment, just as a user clicks whatever pin is under the cursor.

use anyhow::{Context, Result};
use gcs_core::{
    Category, InMemorySurface, LatLon, MapClick, MapSurface, MarkerEvent, MissionMap, Point,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub waypoints: Vec<Point>,
    #[serde(default)]
    pub geofence: Vec<Point>,
    #[serde(default)]
    pub rally: Vec<Point>,
    #[serde(default)]
    pub events: Vec<ScriptEvent>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScriptEvent {
    /// Click on empty map space
    Click(MapClick),
    /// Drag the marker at `index` to a new spot
    Drag {
        category: Category,
        index: usize,
        lat: f64,
        lon: f64,
    },
    /// Open the editor on `index`, fill the form and press Save
    Edit {
        category: Category,
        index: usize,
        lat: String,
        lon: String,
        #[serde(default)]
        altitude: Option<String>,
    },
    /// Open the editor on `index` and press Delete
    Delete { category: Category, index: usize },
    Clear { category: Category },
    Drone { lat: f64, lon: f64 },
    TileSource { name: String },
}

/// Final state of a replayed map.
#[derive(Debug, Clone, Serialize)]
pub struct MissionReport {
    pub waypoints: Vec<Point>,
    pub geofence: Vec<Point>,
    pub rally: Vec<Point>,
    pub drone: Option<LatLon>,
    pub tile_source: Option<String>,
    /// Events that were rejected, with the reason
    pub rejected: Vec<String>,
}

impl Script {
    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).context("invalid mission script")
    }
}

/// Seed the map from `script` and apply every event in order.
///
/// Rejected events are logged and collected; they never abort the replay.
pub fn replay<S: MapSurface>(map: &mut MissionMap<S>, script: &Script) -> Vec<String> {
    map.set_waypoints(script.waypoints.clone());
    map.set_geofence(script.geofence.clone());
    map.set_rally_points(script.rally.clone());

    let mut rejected = Vec::new();
    for (n, event) in script.events.iter().enumerate() {
        if let Err(err) = apply(map, event) {
            tracing::warn!("Event {} rejected: {}", n, err);
            rejected.push(format!("event {}: {}", n, err));
        }
    }
    rejected
}

fn apply<S: MapSurface>(map: &mut MissionMap<S>, event: &ScriptEvent) -> gcs_core::Result<()> {
    match event {
        ScriptEvent::Click(click) => {
            map.handle_map_click(click);
        }
        ScriptEvent::Drag {
            category,
            index,
            lat,
            lon,
        } => {
            let marker = marker_at(map, *category, *index)?;
            map.handle_marker_event(marker, MarkerEvent::DragEnd { lat: *lat, lon: *lon })?;
        }
        ScriptEvent::Edit {
            category,
            index,
            lat,
            lon,
            altitude,
        } => {
            let marker = marker_at(map, *category, *index)?;
            let mut form = map.open_editor(marker)?.clone();
            form.lat = lat.clone();
            form.lon = lon.clone();
            if form.altitude.is_some() && altitude.is_some() {
                form.altitude = altitude.clone();
            }
            let result = map.save_editor(&form);
            map.close_popup();
            result?;
        }
        ScriptEvent::Delete { category, index } => {
            let marker = marker_at(map, *category, *index)?;
            let form = map.open_editor(marker)?.clone();
            map.delete_from_editor(&form)?;
        }
        ScriptEvent::Clear { category } => map.clear(*category),
        ScriptEvent::Drone { lat, lon } => map.set_drone_position(*lat, *lon),
        ScriptEvent::TileSource { name } => map.apply_tile_source(name)?,
    }
    Ok(())
}

fn marker_at<S: MapSurface>(
    map: &MissionMap<S>,
    category: Category,
    index: usize,
) -> gcs_core::Result<gcs_core::MarkerId> {
    let collection = map.collection(category);
    collection
        .markers()
        .get(index)
        .copied()
        .ok_or(gcs_core::MissionError::IndexOutOfRange {
            index,
            len: collection.len(),
        })
}

pub fn report(map: &MissionMap<InMemorySurface>, rejected: Vec<String>) -> MissionReport {
    MissionReport {
        waypoints: map.get_waypoints(),
        geofence: map.get_geofence(),
        rally: map.get_rally_points(),
        drone: map
            .surface()
            .marker(map.drone_marker())
            .map(|state| state.position),
        tile_source: map.active_tile_source().map(str::to_string),
        rejected,
    }
}
