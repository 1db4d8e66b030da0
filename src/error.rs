//! Error types for xraylink

use thiserror::Error;

/// Main error type for xraylink
#[derive(Error, Debug)]
pub enum Error {
    #[error("Config file not found: {0}")]
    ConfigNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ConfigParse(String),

    #[error("Client with email '{0}' not found in any inbounds")]
    ClientNotFound(String),

    #[error("Unsupported protocol: {0}")]
    UnsupportedProtocol(String),

    #[error("Encoding error: {0}")]
    Encoding(String),

    #[error("QR render error: {0}")]
    Render(String),
}

/// Result type alias for xraylink
pub type Result<T> = std::result::Result<T, Error>;
