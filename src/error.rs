//! voxparse Error Types
//!
//! Centralized error handling for matching, language resolution and config.

use thiserror::Error;

/// Central error type for voxparse
#[derive(Error, Debug)]
pub enum VoxError {
    #[error("No choices provided: a non-empty list or mapping of choices is required")]
    EmptyChoices,

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Language \"{0}\" is not supported by the parser")]
    UnsupportedLanguage(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Result type alias for voxparse operations
pub type VoxResult<T> = Result<T, VoxError>;
