//! # Coin Dashboard Backend - Caching Market-Data Proxy
//!
//! A small REST backend for a cryptocurrency dashboard. It proxies a public
//! market-data provider (CoinGecko v3 by default), caches every answer for
//! five minutes, limits each client to a fixed number of requests per
//! sliding minute, and turns daily price history into candlesticks.
//! Built with [Axum](https://crates.io/crates/axum); OpenAPI documentation
//! is served via [utoipa](https://crates.io/crates/utoipa).
//!
//! ## Request Flow
//!
//! ```text
//! request → rate limiter ─(denied)→ 429
//!               │
//!               ▼
//!          cache lookup ─(hit)→ 200
//!               │ miss
//!               ▼
//!        upstream client ─(error)→ mirrored status + {error, details}
//!               │
//!               ▼
//!     transform (history only) → cache store → 200
//! ```
//!
//! ## Module Structure
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`api`] | Route handlers, rate limit middleware, realtime channel |
//! | [`cache`] | Lazily expiring TTL cache |
//! | [`clock`] | Injectable time source |
//! | [`config`] | TOML configuration with environment overrides |
//! | [`error`] | API error types with `IntoResponse` implementation |
//! | [`models`] | Request/response DTOs with OpenAPI schemas |
//! | [`ohlc`] | Candlesticks from daily closes |
//! | [`rate_limit`] | Per-client sliding-window limiter |
//! | [`rooms`] | Realtime room membership |
//! | [`state`] | Application state management |
//!
//! ## API Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/health` | Health check |
//! | GET | `/api/cryptocurrencies` | Top 100 assets by market cap |
//! | GET | `/api/cryptocurrency/{id}` | Full market data for one asset |
//! | GET | `/api/cryptocurrency/{id}/history?days=30` | Daily candlesticks |
//! | GET | `/ws` | Realtime channel (room subscription) |
//!
//! ## Example Usage
//!
//! ```bash
//! # Development mode (listens on 0.0.0.0:5000)
//! cargo run
//!
//! # With custom port and a config file
//! PORT=3000 CONFIG_PATH=config.toml cargo run
//!
//! curl http://localhost:5000/api/cryptocurrencies
//! curl http://localhost:5000/api/cryptocurrency/bitcoin
//! curl "http://localhost:5000/api/cryptocurrency/bitcoin/history?days=90"
//! ```

pub mod api;
pub mod cache;
pub mod clock;
pub mod config;
pub mod error;
pub mod models;
pub mod ohlc;
pub mod rate_limit;
pub mod rooms;
pub mod state;
