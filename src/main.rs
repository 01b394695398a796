//! Coin Dashboard Backend Server
//!
//! Caching, rate-limited proxy in front of the public market-data API.

use coin_dashboard_backend::api::create_router;
use coin_dashboard_backend::config::Config;
use coin_dashboard_backend::models::{Candlestick, HealthResponse, HistoryQuery};
use coin_dashboard_backend::state::AppState;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// OpenAPI documentation.
#[derive(OpenApi)]
#[openapi(
    paths(
        coin_dashboard_backend::api::handlers::health_check,
        coin_dashboard_backend::api::handlers::list_cryptocurrencies,
        coin_dashboard_backend::api::handlers::get_cryptocurrency,
        coin_dashboard_backend::api::handlers::get_cryptocurrency_history,
        coin_dashboard_backend::api::websocket::ws_handler,
    ),
    components(
        schemas(
            HealthResponse,
            Candlestick,
            HistoryQuery,
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Market Data", description = "Cached market data proxied from the provider"),
        (name = "WebSocket", description = "Realtime room subscriptions"),
    ),
    info(
        title = "Coin Dashboard API",
        version = "0.1.0",
        description = "Caching, rate-limited market-data proxy",
        license(name = "MIT")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let sweep_interval = config.cache.sweep_interval();

    info!("Proxying market data from {}", config.upstream.base_url);
    info!(
        "Cache TTL {}s, rate limit {} requests per {}s",
        config.cache.ttl_secs, config.rate_limit.max_requests, config.rate_limit.window_secs
    );

    // Create application state
    let state = Arc::new(AppState::new(config)?);

    if let Some(every) = sweep_interval {
        state.spawn_sweeper(every);
    }

    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build the router
    let app = create_router(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    // Start the server
    let listener = TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);
    info!("Swagger UI available at http://{}/swagger-ui/", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
