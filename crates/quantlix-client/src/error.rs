//! Quantlix client errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuantlixError {
    /// The server answered with a status outside 200-299.
    #[error("{detail}")]
    Request { status: u16, detail: String },

    /// The request never produced a response (DNS, refused connection, timeout).
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A 2xx response whose body is not the JSON shape the operation expects.
    #[error("Malformed response from {path}: {source}")]
    MalformedResponse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("API key is not a valid header value")]
    InvalidApiKey,

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl QuantlixError {
    /// HTTP status of a request error, `None` for every other kind.
    pub fn status(&self) -> Option<u16> {
        match self {
            QuantlixError::Request { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Server-supplied (or synthesized) detail of a request error.
    pub fn detail(&self) -> Option<&str> {
        match self {
            QuantlixError::Request { detail, .. } => Some(detail),
            _ => None,
        }
    }
}
