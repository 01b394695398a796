//! Error types for the market-data client.

use serde_json::Value;
use thiserror::Error;

#[cfg(test)]
mod tests;

/// Client error types.
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP request failed (connect, timeout or body decode).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Query string encoding failed.
    #[error("Query encoding error: {0}")]
    Encode(#[from] serde_urlencoded::ser::Error),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Asset id that cannot be addressed as a single path segment.
    #[error("Invalid asset id: {0:?}")]
    InvalidAssetId(String),

    /// Upstream returned a non-success status.
    #[error("API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body; a JSON string when the body was not JSON.
        body: Value,
    },
}

impl Error {
    /// Upstream HTTP status, when the failure carried one. Invalid asset
    /// ids report 404 since no asset can carry them.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::InvalidAssetId(_) => Some(404),
            Self::Http(err) => err.status().map(|s| s.as_u16()),
            Self::Json(_) | Self::Encode(_) | Self::InvalidUrl(_) => None,
        }
    }

    /// Diagnostic payload: the upstream body for API errors, the error
    /// message otherwise.
    #[must_use]
    pub fn details(&self) -> Value {
        match self {
            Self::Api { body, .. } => body.clone(),
            other => Value::String(other.to_string()),
        }
    }
}
