//! Error types for segment model construction

use thiserror::Error;

/// Recoverable errors raised while validating inputs for a segment model.
///
/// Broken invariants inside a built model (a missing support joint, a POI
/// that cannot be placed) are assertions and panic instead.
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Invalid support locations: left {left}, right {right}")]
    InvalidSupports { left: f64, right: f64 },

    #[error("Support at {location} lies outside the segment [{start}, {end}]")]
    SupportOutsideSegment { location: f64, start: f64, end: f64 },

    #[error("Invalid segment geometry: {0}")]
    InvalidGeometry(String),

    #[error("Invalid section properties: {0}")]
    InvalidSection(String),

    #[error("Invalid load: {0}")]
    InvalidLoad(String),

    #[error("Point of interest '{0}' is not placed on the model")]
    PoiNotPlaced(u64),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Result type for segment model operations
pub type ModelResult<T> = Result<T, ModelError>;
