//! Error types for reelkit.

use thiserror::Error;

/// Main error type for reelkit operations.
#[derive(Error, Debug)]
pub enum ReelError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Invalid curve: {0}")]
    InvalidCurve(String),

    #[error("Schedule error: {0}")]
    Schedule(String),

    #[error("Timeline error: {0}")]
    Timeline(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Render error in segment '{segment}' at frame {frame}: {message}")]
    Render {
        segment: String,
        frame: i64,
        message: String,
    },

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("External process error: {0}")]
    Process(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for reelkit operations.
pub type Result<T> = std::result::Result<T, ReelError>;
