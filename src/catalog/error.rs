//! Catalog API error types
//!
//! Every failure at the HTTP boundary is folded into one of these kinds so the
//! loaders can decide how to surface it.

use thiserror::Error;

/// Errors that can occur while talking to the catalog API
#[derive(Error, Debug)]
pub enum ApiError {
    /// Connection, transport or timeout failure
    #[error("Network error: {0}")]
    Network(String),

    /// Server answered with a non-2xx status
    #[error("API error {status}: {message}")]
    Status { status: u16, message: String },

    /// Body was not valid JSON
    #[error("Decode error: {0}")]
    Decode(String),

    /// Body was JSON but not the structure the endpoint promises
    #[error("Unexpected response shape: {0}")]
    UnexpectedShape(String),
}

impl ApiError {
    /// Classify a transport error from reqwest
    pub fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Network(format!("request timed out: {}", err))
        } else if err.is_connect() {
            ApiError::Network(format!("connection failed: {}", err))
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

/// Result type alias for catalog operations
pub type ApiResult<T> = Result<T, ApiError>;
