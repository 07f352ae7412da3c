//! Error types for the advisory engine
//!
//! Decode and validation failures are reported to callers as structured
//! errors. Computation failures on the market and loan paths are converted
//! into fallback records by the engine instead of being propagated.

use thiserror::Error;

/// Malformed or unsupported image input
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Image payload is empty")]
    Empty,

    #[error("Invalid image encoding: {0}")]
    Encoding(String),

    #[error("Malformed or unsupported image: {0}")]
    Malformed(String),

    #[error("Image has {channels} channel(s) without color; three color channels are required")]
    MissingColorChannels { channels: u8 },
}

/// A farmer profile field that is missing, non-numeric or out of range
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid {field}: {message}")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Unexpected arithmetic or model failure inside an advisory function
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ComputationError {
    #[error("Non-finite value produced for {0}")]
    NonFinite(&'static str),

    #[error("Arithmetic overflow computing {0}")]
    Overflow(&'static str),

    #[error("Classifier returned label outside the disease catalog: {0}")]
    UnknownLabel(String),
}

/// Invalid reference tables (disease catalog or crop prices)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReferenceError {
    #[error("Failed to parse reference data: {0}")]
    Parse(String),

    #[error("Disease catalog is empty")]
    EmptyCatalog,

    #[error("Invalid disease entry {code:?}: {reason}")]
    InvalidDisease { code: String, reason: String },

    #[error("Invalid crop price for {crop:?}: {reason}")]
    InvalidCrop { crop: String, reason: String },
}

/// Any failure an advisory function can report to its caller
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AdvisoryError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Computation(#[from] ComputationError),
}
