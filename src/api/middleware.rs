//! API middleware for rate limiting.

use crate::error::ApiError;
use crate::rate_limit::Admission;
use crate::state::AppState;
use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{HeaderValue, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::warn;

/// Rate limiting middleware.
///
/// Identifies the client by address and checks its sliding window.
/// Accepted responses carry `X-RateLimit-Limit` and `X-RateLimit-Remaining`.
/// Returns 429 Too Many Requests without running the handler when the
/// window is full; rejected requests are not counted.
pub async fn rate_limit_middleware(
    State(state): State<Arc<AppState>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let client_ip = extract_client_ip(&request, state.config.rate_limit.trust_forwarded_headers);

    match state.rate_limiter.admit(&client_ip) {
        Admission::Allowed { remaining } => {
            let mut response = next.run(request).await;

            let headers = response.headers_mut();
            headers.insert(
                "x-ratelimit-limit",
                HeaderValue::from(state.rate_limiter.max_requests()),
            );
            headers.insert("x-ratelimit-remaining", HeaderValue::from(remaining));

            response
        }
        Admission::Denied { retry_after } => {
            warn!("Rate limit exceeded for {} on {}", client_ip, request.uri().path());
            // Round up so clients never retry early.
            let retry_after = retry_after.as_secs() + u64::from(retry_after.subsec_nanos() > 0);
            ApiError::RateLimitExceeded { retry_after }.into_response()
        }
    }
}

/// Extract client IP from request.
///
/// Forwarding headers are only honored when `trust_forwarded` is set;
/// otherwise the peer address is used.
fn extract_client_ip(request: &Request<Body>, trust_forwarded: bool) -> String {
    if trust_forwarded {
        // Try X-Forwarded-For header first
        if let Some(forwarded) = request.headers().get("X-Forwarded-For")
            && let Ok(value) = forwarded.to_str()
            && let Some(ip) = value.split(',').next()
        {
            return ip.trim().to_string();
        }

        // Try X-Real-IP header
        if let Some(real_ip) = request.headers().get("X-Real-IP")
            && let Ok(value) = real_ip.to_str()
        {
            return value.to_string();
        }
    }

    if let Some(ConnectInfo(addr)) = request.extensions().get::<ConnectInfo<SocketAddr>>() {
        return addr.ip().to_string();
    }

    // Default to unknown
    "unknown".to_string()
}
