pub mod collection;
pub mod config;
pub mod dispatch;
pub mod drone;
pub mod editor;
pub mod error;
pub mod map;
pub mod models;
pub mod surface;
pub mod tiles;

pub use collection::{path_geometry, PointCollection, POLYGON_MIN_VERTICES};
pub use config::MapConfig;
pub use dispatch::{route, MapClick, Modifiers};
pub use drone::DroneMarker;
pub use editor::EditForm;
pub use error::{MissionError, Result};
pub use map::{MarkerOutcome, MissionMap};
pub use models::{Category, CollectionStyle, LatLon, MarkerColor, PathRule, Point};
pub use surface::{
    InMemorySurface, MapSurface, MarkerEvent, MarkerIcon, MarkerId, PathId, PathShape,
};
pub use tiles::TileSources;
