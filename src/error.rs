//! Error types
//!
//! Only two things can fail: loading assets and loading configuration.
//! Everything inside the simulation is a clamp, not an error.

use thiserror::Error;

/// Asset preload failure. Any single failure aborts the whole preload.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to load image `{key}` from {url}")]
    ImageLoad { key: String, url: String },
    #[error("failed to load audio `{key}` from {url}")]
    AudioLoad { key: String, url: String },
    #[error("asset `{key}` is not in the loaded bundle")]
    Missing { key: String },
}

/// Configuration load/validation failure
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config field `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}
