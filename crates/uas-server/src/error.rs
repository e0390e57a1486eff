//! Error types for the user agent server

use std::path::PathBuf;

use thiserror::Error;

/// Result type for server operations
pub type Result<T> = std::result::Result<T, ServerError>;

/// Errors loading, saving or interpreting the configuration document
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("error reading config file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("error parsing config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("error encoding config to JSON: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("invalid listen address: {0}")]
    InvalidAddress(String),

    #[error("invalid log level: {0}")]
    InvalidLogLevel(String),
}

/// Errors that stop the server
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("transport error: {0}")]
    Transport(#[from] minisip_sip_transport::Error),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("logging setup failed: {0}")]
    Logging(String),
}
