//! End-to-end test helpers for the Coin Dashboard backend.
//!
//! Each test spins up a fake market-data provider and a proxy instance on
//! ephemeral local ports, so suites run in parallel without shared state.

use axum::Router;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use coin_dashboard_backend::api::create_router;
use coin_dashboard_backend::config::Config;
use coin_dashboard_backend::state::AppState;
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

const DAY_MS: i64 = 86_400_000;
// 2024-01-01 00:00:00 UTC
const T0: i64 = 1_704_067_200_000;

/// A fake provider and the proxy in front of it.
pub struct TestServer {
    /// Base URL of the proxy (e.g., "http://127.0.0.1:54321").
    pub base_url: String,
    /// Proxy state, for inspecting cache and rooms.
    pub state: Arc<AppState>,
    /// Number of requests the fake provider has served.
    pub upstream_hits: Arc<AtomicUsize>,
}

impl TestServer {
    /// Starts a proxy in front of a well-behaved fake provider.
    pub async fn start() -> Self {
        Self::start_with(None).await
    }

    /// Starts a proxy in front of a provider that answers every request
    /// with `status` and a JSON error body.
    pub async fn start_failing(status: StatusCode) -> Self {
        Self::start_with(Some(status)).await
    }

    async fn start_with(fail_with: Option<StatusCode>) -> Self {
        let upstream_hits = Arc::new(AtomicUsize::new(0));
        let upstream_url = serve(fake_upstream(Arc::clone(&upstream_hits), fail_with)).await;

        let mut config = Config::default();
        config.upstream.base_url = upstream_url;
        let state = Arc::new(AppState::new(config).expect("Failed to build state"));

        let base_url = serve(create_router(Arc::clone(&state))).await;

        Self {
            base_url,
            state,
            upstream_hits,
        }
    }

    /// Full URL for `path` on the proxy.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// WebSocket URL of the realtime channel.
    #[must_use]
    pub fn ws_url(&self) -> String {
        format!("{}/ws", self.base_url.replacen("http://", "ws://", 1))
    }

    /// Requests served by the fake provider so far.
    #[must_use]
    pub fn hits(&self) -> usize {
        self.upstream_hits.load(Ordering::SeqCst)
    }
}

/// Creates an HTTP client for talking to the proxy.
///
/// # Errors
/// Returns error if client creation fails.
pub fn create_test_client() -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(10))
        .build()
}

/// Polls `check` until it holds or `timeout` elapses.
pub async fn eventually(timeout: Duration, mut check: impl FnMut() -> bool) -> bool {
    let deadline = tokio::time::Instant::now() + timeout;
    while tokio::time::Instant::now() < deadline {
        if check() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    check()
}

async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind");
    let addr = listener.local_addr().expect("No local address");
    tokio::spawn(async move {
        let _ = axum::serve(
            listener,
            router.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await;
    });
    format!("http://{}", addr)
}

#[derive(Clone)]
struct Upstream {
    hits: Arc<AtomicUsize>,
    fail_with: Option<StatusCode>,
}

impl Upstream {
    fn record(&self) -> Option<Response> {
        self.hits.fetch_add(1, Ordering::SeqCst);
        self.fail_with.map(|status| {
            (
                status,
                axum::Json(json!({ "status": { "error_message": "upstream unavailable" } })),
            )
                .into_response()
        })
    }
}

fn fake_upstream(hits: Arc<AtomicUsize>, fail_with: Option<StatusCode>) -> Router {
    Router::new()
        .route("/coins/markets", get(markets))
        .route("/coins/{id}", get(detail))
        .route("/coins/{id}/market_chart", get(market_chart))
        .with_state(Upstream { hits, fail_with })
}

async fn markets(State(upstream): State<Upstream>) -> Response {
    if let Some(failure) = upstream.record() {
        return failure;
    }
    axum::Json(json!([
        { "id": "bitcoin", "symbol": "btc", "market_cap_rank": 1 },
        { "id": "ethereum", "symbol": "eth", "market_cap_rank": 2 }
    ]))
    .into_response()
}

async fn detail(State(upstream): State<Upstream>, Path(id): Path<String>) -> Response {
    if let Some(failure) = upstream.record() {
        return failure;
    }
    axum::Json(json!({ "id": id, "market_data": { "current_price": { "usd": 42000.0 } } }))
        .into_response()
}

async fn market_chart(State(upstream): State<Upstream>) -> Response {
    if let Some(failure) = upstream.record() {
        return failure;
    }
    axum::Json(json!({
        "prices": [[T0, 10.0], [T0 + DAY_MS, 12.0], [T0 + 2 * DAY_MS, 9.0]],
        "market_caps": [],
        "total_volumes": [[T0, 100.0], [T0 + DAY_MS, 150.0], [T0 + 2 * DAY_MS, 80.0]]
    }))
    .into_response()
}
