//! Error types for configuration and wiring

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MapError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Unknown marker mode: {0}")]
    UnknownMarkerMode(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Composition error: {0}")]
    Composition(String),
}

/// Error type alias for convenience
pub type Error = MapError;
