//! Error types for Page Enhancer

use thiserror::Error;

/// Main error type for Page Enhancer operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EnhancerError {
    /// The media engine refused to start playback (autoplay policy, codec, ...)
    #[error("Playback rejected: {0}")]
    PlayRejected(String),

    /// A fullscreen request was refused by the platform
    #[error("Fullscreen request failed: {0}")]
    Fullscreen(String),

    /// Configuration failed validation
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Configuration JSON could not be parsed
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A required host object (window, document, body) is missing
    #[error("Missing host object: {0}")]
    MissingHost(&'static str),

    /// A call into the host platform failed
    #[error("Host error: {0}")]
    Host(String),

    /// Logging was already initialized or the filter is unusable
    #[error("Logging error: {0}")]
    Logging(String),
}

impl From<serde_json::Error> for EnhancerError {
    fn from(err: serde_json::Error) -> Self {
        EnhancerError::Serialization(err.to_string())
    }
}

/// Result type alias using EnhancerError
pub type EnhancerResult<T> = Result<T, EnhancerError>;
