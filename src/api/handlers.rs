//! API request handlers.
//!
//! Every market-data endpoint is cache-first: a hit is answered from the
//! cache, a miss makes one upstream call and caches the (possibly
//! transformed) result. Concurrent misses on the same key may both go
//! upstream; the last write wins.

use crate::error::ApiError;
use crate::models::{Candlestick, HealthResponse, HistoryQuery};
use crate::ohlc::build_candlesticks;
use crate::state::AppState;
use axum::Json;
use axum::extract::{Path, Query, State};
use market_data_client::{CoinDetailQuery, MarketChartQuery, MarketsQuery};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

/// Cache key of the asset list.
pub const MARKETS_CACHE_KEY: &str = "cryptocurrencies";

const MARKETS_ERROR: &str = "Failed to fetch cryptocurrency data";
const DETAIL_ERROR: &str = "Failed to fetch cryptocurrency details";
const HISTORY_ERROR: &str = "Failed to fetch historical data";

/// Cache key of a single asset's detail.
#[must_use]
pub fn detail_cache_key(id: &str) -> String {
    format!("crypto_{}", id)
}

/// Cache key of an asset's candlestick history.
#[must_use]
pub fn history_cache_key(id: &str, days: &str) -> String {
    format!("history_{}_{}", id, days)
}

fn cached(state: &AppState, key: &str) -> Option<Value> {
    let hit = state.cache.get(key);
    debug!(key, hit = hit.is_some(), "cache lookup");
    hit
}

// ============================================================================
// Health Check
// ============================================================================

/// Health check endpoint.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    ),
    tag = "Health"
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ============================================================================
// Market Data
// ============================================================================

/// List the top assets by market capitalization.
///
/// The upstream page (100 assets, no sparklines) is relayed verbatim.
#[utoipa::path(
    get,
    path = "/api/cryptocurrencies",
    responses(
        (status = 200, description = "Market summaries as returned by the provider"),
        (status = 429, description = "Rate limit exceeded"),
        (status = 500, description = "Upstream failure; status mirrors the provider when known")
    ),
    tag = "Market Data"
)]
pub async fn list_cryptocurrencies(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, ApiError> {
    if let Some(value) = cached(&state, MARKETS_CACHE_KEY) {
        return Ok(Json(value));
    }

    let query = MarketsQuery::top_by_market_cap(&state.config.upstream.vs_currency);
    let markets = state.client.list_markets(&query).await.map_err(|e| {
        warn!("Failed to fetch market list: {}", e);
        ApiError::upstream(MARKETS_ERROR, &e)
    })?;

    state.cache.set(MARKETS_CACHE_KEY, markets.clone());
    Ok(Json(markets))
}

/// Get full market data for a single asset.
#[utoipa::path(
    get,
    path = "/api/cryptocurrency/{id}",
    params(
        ("id" = String, Path, description = "Provider asset id (e.g., bitcoin)")
    ),
    responses(
        (status = 200, description = "Asset detail as returned by the provider"),
        (status = 404, description = "Unknown asset id (passed through from the provider)"),
        (status = 429, description = "Rate limit exceeded")
    ),
    tag = "Market Data"
)]
pub async fn get_cryptocurrency(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let key = detail_cache_key(&id);
    if let Some(value) = cached(&state, &key) {
        return Ok(Json(value));
    }

    let detail = state
        .client
        .coin_detail(&id, &CoinDetailQuery::default())
        .await
        .map_err(|e| {
            warn!("Failed to fetch detail for {}: {}", id, e);
            ApiError::upstream(DETAIL_ERROR, &e)
        })?;

    state.cache.set(key, detail.clone());
    Ok(Json(detail))
}

/// Get daily candlesticks for a single asset.
///
/// Each candle opens at the previous day's price and closes at the current
/// day's, so `days` of history yields one candle fewer than price points.
#[utoipa::path(
    get,
    path = "/api/cryptocurrency/{id}/history",
    params(
        ("id" = String, Path, description = "Provider asset id (e.g., bitcoin)"),
        HistoryQuery
    ),
    responses(
        (status = 200, description = "Daily candlesticks, oldest first", body = Vec<Candlestick>),
        (status = 429, description = "Rate limit exceeded"),
        (status = 500, description = "Upstream failure or malformed history")
    ),
    tag = "Market Data"
)]
pub async fn get_cryptocurrency_history(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<Value>, ApiError> {
    let key = history_cache_key(&id, &query.days);
    if let Some(value) = cached(&state, &key) {
        return Ok(Json(value));
    }

    let chart_query = MarketChartQuery::daily(&state.config.upstream.vs_currency, &query.days);
    let chart = state
        .client
        .market_chart(&id, &chart_query)
        .await
        .map_err(|e| {
            warn!("Failed to fetch history for {}: {}", id, e);
            ApiError::upstream(HISTORY_ERROR, &e)
        })?;

    let candles = build_candlesticks(&chart).map_err(|e| {
        warn!("Malformed history for {}: {}", id, e);
        ApiError::internal(HISTORY_ERROR, e)
    })?;
    let value = serde_json::to_value(candles).map_err(|e| ApiError::internal(HISTORY_ERROR, e))?;

    state.cache.set(key, value.clone());
    Ok(Json(value))
}
