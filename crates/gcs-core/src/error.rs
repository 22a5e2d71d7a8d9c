//! Error type shared by every map operation.

use crate::models::Category;
use crate::surface::MarkerId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MissionError {
    #[error("index {index} out of range for collection of {len} points")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("marker {0} does not belong to any collection")]
    UnknownMarker(MarkerId),

    #[error("form for {marker} is {form} but the marker is a {actual}")]
    CategoryMismatch {
        marker: MarkerId,
        form: Category,
        actual: Category,
    },

    #[error("invalid {field} value: {value:?}")]
    InvalidCoordinate { field: &'static str, value: String },

    #[error("invalid tile source: {0}")]
    InvalidTileSource(String),

    #[error("unknown tile source: {0}")]
    UnknownTileSource(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, MissionError>;
