//! CLI error types.

use quantlix_client::QuantlixError;
use thiserror::Error;

/// Main CLI error type.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Api(#[from] QuantlixError),

    #[error("API key required. Set QUANTLIX_API_KEY or use --api-key")]
    MissingApiKey,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for CLI errors.
pub type CliResult<T> = Result<T, CliError>;
