//! Error types and transport error mapping

use thiserror::Error;

/// Result type for this crate
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for request construction and dispatch
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid URL
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Invalid header name
    #[error("invalid header name: {0}")]
    InvalidHeaderName(#[from] http::header::InvalidHeaderName),

    /// Invalid header value
    #[error("invalid header value: {0}")]
    InvalidHeaderValue(#[from] http::header::InvalidHeaderValue),

    /// Network error reported by the transport
    #[error("network error: {message}")]
    Network {
        /// Error message
        message: String,
    },

    /// Request timed out
    #[error("request timed out")]
    Timeout,

    /// The authorization hook failed to sign the request
    #[error("authorization failed: {0}")]
    Authorization(String),

    /// UTF-8 conversion error
    #[error("UTF-8 conversion error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Internal error
    #[error("internal error: {0}")]
    Internal(String),
}

#[cfg(feature = "backend-reqwest")]
impl From<reqwest::Error> for Error {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Error::Timeout
        } else {
            Error::Network {
                message: error.to_string(),
            }
        }
    }
}
