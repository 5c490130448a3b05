use thiserror::Error;

use crate::object::ObjectId;

/// Errors raised by a graphics engine implementation
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Failed to serialize scene: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("Failed to parse scene: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("Unknown object {0}")]
    UnknownObject(ObjectId),

    #[error("Failed to encode export: {0}")]
    Encode(#[from] image::ImageError),
}

/// Result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors surfaced by the editor session to the UI layer.
///
/// None of these are fatal: every failing operation leaves the history log,
/// the derived state and the suppression flag as they were before the call.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error("Failed to restore history entry {index}: {source}")]
    RestoreFailed {
        index: usize,
        #[source]
        source: EngineError,
    },

    #[error("Failed to capture snapshot: {0}")]
    Serialize(#[source] EngineError),

    #[error("Failed to load image '{name}': {reason}")]
    ResourceLoad { name: String, reason: String },

    #[error("Failed to export the document: {0}")]
    Export(#[source] EngineError),

    #[error("{0}")]
    InvalidTarget(&'static str),

    #[error("Another history operation is still settling")]
    Busy,

    #[error("Invalid editor configuration: {0}")]
    Config(#[from] serde_json::Error),
}

/// Result type for editor operations
pub type EditorResult<T> = Result<T, EditorError>;
