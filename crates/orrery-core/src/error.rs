use thiserror::Error;

/// Errors surfaced by configuration, command and feed parsing.
///
/// Clock, scrubber and selection operations never fail; out-of-range input
/// is clamped instead.
#[derive(Error, Debug)]
pub enum OrreryError {
    #[error("invalid speed table: {0}")]
    InvalidSpeedTable(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("close-approach feed unavailable: {0}")]
    FeedUnavailable(String),

    #[error("unknown display layer: {0}")]
    UnknownLayer(String),
}

pub type Result<T> = std::result::Result<T, OrreryError>;
