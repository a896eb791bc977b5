//! Error types for zramgen-core.

use thiserror::Error;

/// Errors that can occur while loading configuration or evaluating policy.
#[derive(Debug, Error)]
pub enum Error {
    /// A setting is malformed or out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A runtime measurement is malformed.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// I/O error (configuration file, /proc).
    #[error("I/O error: {0}")]
    IoError(String),
}

/// Result type for policy and configuration operations.
pub type Result<T> = std::result::Result<T, Error>;
