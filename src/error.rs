//! Error types for Spole.

use thiserror::Error;

/// Library-level error type for Spole operations.
#[derive(Error, Debug)]
pub enum SpoleError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Metadata fetch failed: {0}")]
    Metadata(String),

    #[error("Transcript fetch failed: {0}")]
    Transcript(String),

    #[error("Generation failed: {0}")]
    Generation(#[from] crate::generation::GenerationError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Video not found: {0}")]
    VideoNotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for Spole operations.
pub type Result<T> = std::result::Result<T, SpoleError>;
