//! HTTP client library for the public cryptocurrency market-data API.
//!
//! This crate provides a typed client for the three read endpoints the
//! dashboard backend proxies: the market-cap ordered asset list, per-asset
//! detail, and per-asset daily price history. The default base URL points at
//! CoinGecko's v3 API; any server speaking the same routes works.
//!
//! Every call is a single attempt. Non-2xx responses surface as
//! [`Error::Api`] carrying the upstream status and body so callers can mirror
//! them to their own clients.
//!
//! # Example
//!
//! ```no_run
//! use market_data_client::{ClientConfig, MarketDataClient, MarketsQuery};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), market_data_client::Error> {
//!     let client = MarketDataClient::new(ClientConfig {
//!         base_url: "https://api.coingecko.com/api/v3".into(),
//!         timeout: Duration::from_secs(30),
//!     })?;
//!
//!     let markets = client.list_markets(&MarketsQuery::top_by_market_cap("usd")).await?;
//!     println!("{markets}");
//!
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod types;

pub use client::{ClientConfig, DEFAULT_BASE_URL, MarketDataClient};
pub use error::Error;
pub use types::*;
