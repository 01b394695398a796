//! Route configuration.

use crate::api::{handlers, middleware, websocket};
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use std::sync::Arc;

/// Creates the API router.
///
/// Only the `/api` routes are rate limited; `/health` and `/ws` are exempt.
pub fn create_router(state: Arc<AppState>) -> Router {
    let api = Router::new()
        .route("/api/cryptocurrencies", get(handlers::list_cryptocurrencies))
        .route("/api/cryptocurrency/{id}", get(handlers::get_cryptocurrency))
        .route(
            "/api/cryptocurrency/{id}/history",
            get(handlers::get_cryptocurrency_history),
        )
        .route_layer(axum::middleware::from_fn_with_state(
            Arc::clone(&state),
            middleware::rate_limit_middleware,
        ));

    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // WebSocket
        .route("/ws", get(websocket::ws_handler))
        .merge(api)
        .with_state(state)
}
