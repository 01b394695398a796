//! Query and response types for the market-data API.

use serde::{Deserialize, Serialize};


/// Number of assets fetched by [`MarketsQuery::top_by_market_cap`].
pub const MARKETS_PAGE_SIZE: u32 = 100;

/// Default history window in days.
pub const DEFAULT_HISTORY_DAYS: &str = "30";

// ============================================================================
// Markets
// ============================================================================

/// Query parameters for `GET /coins/markets`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketsQuery {
    /// Quote currency (e.g., "usd").
    pub vs_currency: String,
    /// Sort order (e.g., "market_cap_desc").
    pub order: String,
    /// Page size.
    pub per_page: u32,
    /// Page number, starting at 1.
    pub page: u32,
    /// Whether to include 7-day sparkline data.
    pub sparkline: bool,
}

impl MarketsQuery {
    /// First page of assets ordered by market capitalization, no sparklines.
    #[must_use]
    pub fn top_by_market_cap(vs_currency: &str) -> Self {
        Self {
            vs_currency: vs_currency.to_string(),
            order: "market_cap_desc".to_string(),
            per_page: MARKETS_PAGE_SIZE,
            page: 1,
            sparkline: false,
        }
    }
}

// ============================================================================
// Coin detail
// ============================================================================

/// Query parameters for `GET /coins/{id}`.
///
/// The defaults keep market data and drop every optional section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinDetailQuery {
    /// Include localized names and descriptions.
    pub localization: bool,
    /// Include exchange tickers.
    pub tickers: bool,
    /// Include market data.
    pub market_data: bool,
    /// Include community statistics.
    pub community_data: bool,
    /// Include developer statistics.
    pub developer_data: bool,
}

impl Default for CoinDetailQuery {
    fn default() -> Self {
        Self {
            localization: false,
            tickers: false,
            market_data: true,
            community_data: false,
            developer_data: false,
        }
    }
}

// ============================================================================
// Market chart
// ============================================================================

/// Query parameters for `GET /coins/{id}/market_chart`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketChartQuery {
    /// Quote currency (e.g., "usd").
    pub vs_currency: String,
    /// Trailing window in days. Passed through verbatim ("30", "max", ...).
    pub days: String,
    /// Data granularity.
    pub interval: String,
}

impl MarketChartQuery {
    /// Daily points over the trailing `days`.
    #[must_use]
    pub fn daily(vs_currency: &str, days: &str) -> Self {
        Self {
            vs_currency: vs_currency.to_string(),
            days: days.to_string(),
            interval: "daily".to_string(),
        }
    }
}

/// A `[timestamp_ms, value]` pair as returned by the market chart endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint(pub f64, pub f64);

impl ChartPoint {
    /// Timestamp in milliseconds since the Unix epoch.
    #[must_use]
    pub fn timestamp_ms(&self) -> i64 {
        self.0 as i64
    }

    /// Price, market cap or volume, depending on the series.
    #[must_use]
    pub fn value(&self) -> f64 {
        self.1
    }
}

/// Response of the market chart endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketChart {
    /// Price series.
    #[serde(default)]
    pub prices: Vec<ChartPoint>,
    /// Market capitalization series.
    #[serde(default)]
    pub market_caps: Vec<ChartPoint>,
    /// Traded volume series.
    #[serde(default)]
    pub total_volumes: Vec<ChartPoint>,
}
