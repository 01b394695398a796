//! Request and response models for the REST API.

use chrono::NaiveDate;
use market_data_client::DEFAULT_HISTORY_DAYS;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

// ============================================================================
// Health
// ============================================================================

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Service version.
    pub version: String,
}

// ============================================================================
// History
// ============================================================================

/// One synthetic daily candle.
///
/// `open` is the previous day's price and `close` the current day's, so
/// `high`/`low` only span those two points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Candlestick {
    /// UTC date of the closing price (`YYYY-MM-DD`).
    #[schema(value_type = String, format = Date, example = "2024-01-02")]
    pub time: NaiveDate,
    /// Opening price.
    pub open: f64,
    /// Highest of open and close.
    pub high: f64,
    /// Lowest of open and close.
    pub low: f64,
    /// Closing price.
    pub close: f64,
    /// Traded volume for the day.
    pub volume: f64,
}

/// Query parameters for the history endpoint.
#[derive(Debug, Clone, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct HistoryQuery {
    /// Trailing window in days (default "30"); forwarded verbatim upstream.
    #[serde(default = "default_days")]
    pub days: String,
}

impl Default for HistoryQuery {
    fn default() -> Self {
        Self {
            days: default_days(),
        }
    }
}

fn default_days() -> String {
    DEFAULT_HISTORY_DAYS.to_string()
}
