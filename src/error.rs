//! Error types for the REST API.

use axum::Json;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::Value;


/// Message returned with every rate limit rejection.
pub const RATE_LIMIT_MESSAGE: &str = "Too many requests, please try again later.";

/// API error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable message.
    pub error: String,
    /// Upstream payload or error message, for diagnostics.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

/// API error types.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Fetching from the market-data provider failed.
    #[error("{message}")]
    Upstream {
        /// Status to answer with: the upstream status, or 500.
        status: StatusCode,
        /// Fixed message for the failing operation.
        message: &'static str,
        /// Upstream payload or error message.
        details: Value,
    },

    /// Rate limit exceeded.
    #[error("Too many requests, please try again later.")]
    RateLimitExceeded {
        /// Seconds until the client may retry.
        retry_after: u64,
    },
}

impl ApiError {
    /// Wraps an upstream client failure, mirroring its status when it has one.
    pub fn upstream(message: &'static str, err: &market_data_client::Error) -> Self {
        let status = err
            .status()
            .and_then(|s| StatusCode::from_u16(s).ok())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        ApiError::Upstream {
            status,
            message,
            details: err.details(),
        }
    }

    /// Failure that happened after the upstream answered (e.g. a malformed
    /// payload). Always answers 500.
    pub fn internal(message: &'static str, details: impl ToString) -> Self {
        ApiError::Upstream {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message,
            details: Value::String(details.to_string()),
        }
    }

    /// HTTP status of the response this error produces.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Upstream { status, .. } => *status,
            ApiError::RateLimitExceeded { .. } => StatusCode::TOO_MANY_REQUESTS,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            ApiError::RateLimitExceeded { retry_after } => {
                let body = Json(ErrorResponse {
                    error: RATE_LIMIT_MESSAGE.to_string(),
                    details: None,
                });

                (
                    status,
                    [(header::RETRY_AFTER, retry_after.to_string())],
                    body,
                )
                    .into_response()
            }
            ApiError::Upstream {
                message, details, ..
            } => {
                let body = Json(ErrorResponse {
                    error: message.to_string(),
                    details: Some(details),
                });

                (status, body).into_response()
            }
        }
    }
}
