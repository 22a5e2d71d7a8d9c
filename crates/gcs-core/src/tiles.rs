//! Named base-map tile sources.

use crate::error::{MissionError, Result};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

pub const TILE_MAX_ZOOM: u8 = 19;

const DEFAULT_SOURCES: [(&str, &str); 3] = [
    (
        "OpenStreetMap",
        "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png",
    ),
    (
        "CartoDB Positron",
        "https://cartodb-basemaps-{s}.global.ssl.fastly.net/light_all/{z}/{x}/{y}.png",
    ),
    (
        "ESRI Satellite",
        "https://server.arcgisonline.com/ArcGIS/rest/services/World_Imagery/MapServer/tile/{z}/{y}/{x}",
    ),
];

/// Ordered name → URL registry of tile layers.
#[derive(Debug, Clone, PartialEq)]
pub struct TileSources {
    entries: Vec<(String, String)>,
}

impl Default for TileSources {
    fn default() -> Self {
        Self {
            entries: DEFAULT_SOURCES
                .iter()
                .map(|(name, url)| (name.to_string(), url.to_string()))
                .collect(),
        }
    }
}

impl TileSources {
    /// Load sources from a JSON object file.
    ///
    /// A missing file is created with the defaults. A file that is not a
    /// JSON object of strings yields the defaults and is left untouched.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            let sources = Self::default();
            sources.save(path)?;
            tracing::info!("Created default tile sources at {}", path.display());
            return Ok(sources);
        }

        let raw = fs::read_to_string(path)?;
        match Self::from_json(&raw) {
            Some(sources) => Ok(sources),
            None => {
                tracing::warn!(
                    "Ignoring malformed tile sources file {}, using defaults",
                    path.display()
                );
                Ok(Self::default())
            }
        }
    }

    fn from_json(raw: &str) -> Option<Self> {
        let Value::Object(map) = serde_json::from_str::<Value>(raw).ok()? else {
            return None;
        };
        let mut entries = Vec::with_capacity(map.len());
        for (name, url) in map {
            entries.push((name, url.as_str()?.to_string()));
        }
        Some(Self { entries })
    }

    /// Write the sources as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let map: Map<String, Value> = self
            .entries
            .iter()
            .map(|(name, url)| (name.clone(), Value::String(url.clone())))
            .collect();
        let json = serde_json::to_string_pretty(&Value::Object(map))?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Register a custom source. Name and URL are trimmed.
    pub fn add(&mut self, name: &str, url: &str) -> Result<()> {
        let name = name.trim();
        let url = url.trim();
        if name.is_empty() || url.is_empty() {
            return Err(MissionError::InvalidTileSource(
                "both a name and a URL are required".to_string(),
            ));
        }
        if self.get(name).is_some() {
            return Err(MissionError::InvalidTileSource(format!(
                "name '{}' already exists",
                name
            )));
        }
        self.entries.push((name.to_string(), url.to_string()));
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, url)| url.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, u)| (n.as_str(), u.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(tag: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("gcs-tiles-{}-{}.json", tag, std::process::id()))
    }

    #[test]
    fn add_rejects_blank_and_duplicate() {
        let mut sources = TileSources::default();
        assert!(sources.add("  ", "https://example.com").is_err());
        assert!(sources.add("Topo", "").is_err());
        assert!(sources.add("OpenStreetMap", "https://other").is_err());

        sources.add(" Topo ", " https://topo/{z}/{x}/{y}.png ").unwrap();
        assert_eq!(sources.get("Topo"), Some("https://topo/{z}/{x}/{y}.png"));
        assert_eq!(sources.len(), 4);
    }

    #[test]
    fn load_creates_defaults_then_round_trips_custom() {
        let path = temp_path("create");
        let _ = fs::remove_file(&path);

        let mut sources = TileSources::load(&path).unwrap();
        assert!(path.exists());
        assert_eq!(sources, TileSources::default());

        sources.add("Topo", "https://topo/{z}/{x}/{y}.png").unwrap();
        sources.save(&path).unwrap();
        let reloaded = TileSources::load(&path).unwrap();
        assert_eq!(reloaded.get("Topo"), Some("https://topo/{z}/{x}/{y}.png"));
        let names: Vec<&str> = reloaded.iter().map(|(name, _)| name).collect();
        assert_eq!(
            names,
            vec!["OpenStreetMap", "CartoDB Positron", "ESRI Satellite", "Topo"]
        );

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let path = temp_path("malformed");
        fs::write(&path, "[1, 2, 3]").unwrap();
        assert_eq!(TileSources::load(&path).unwrap(), TileSources::default());
        let _ = fs::remove_file(&path);
    }
}
