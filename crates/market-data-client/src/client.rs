//! HTTP client for the market-data API.

use crate::error::Error;
use crate::types::*;
use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use url::Url;

#[cfg(test)]
mod tests;

/// Public CoinGecko v3 endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.coingecko.com/api/v3";

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the API (e.g., "https://api.coingecko.com/api/v3").
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// HTTP client for the market-data API.
#[derive(Debug, Clone)]
pub struct MarketDataClient {
    client: Client,
    base_url: String,
    base: Url,
}

impl MarketDataClient {
    /// Creates a new client with the given configuration.
    ///
    /// # Errors
    /// Returns error if the base URL is invalid or the HTTP client cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self, Error> {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        let base = Url::parse(&base_url)?;
        if base.cannot_be_a_base() {
            return Err(Error::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase));
        }

        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            client,
            base_url,
            base,
        })
    }

    /// Creates a new client with the default timeout.
    ///
    /// # Errors
    /// Returns error if the base URL is invalid or the HTTP client cannot be built.
    pub fn with_base_url(base_url: &str) -> Result<Self, Error> {
        Self::new(ClientConfig {
            base_url: base_url.to_string(),
            ..Default::default()
        })
    }

    /// Returns the normalized base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Lists assets with market data.
    ///
    /// The response is returned as raw JSON so it can be relayed verbatim.
    ///
    /// # Errors
    /// Returns error if the request fails or upstream answers non-2xx.
    pub async fn list_markets(&self, query: &MarketsQuery) -> Result<Value, Error> {
        let url = self.endpoint(&["coins", "markets"], query)?;
        self.get_json(url).await
    }

    /// Gets full market data for a single asset.
    ///
    /// # Errors
    /// Returns error if the request fails or upstream answers non-2xx
    /// (including 404 for unknown ids), or if `id` is `.` or `..`.
    pub async fn coin_detail(&self, id: &str, query: &CoinDetailQuery) -> Result<Value, Error> {
        let url = self.endpoint(&["coins", asset_segment(id)?], query)?;
        self.get_json(url).await
    }

    /// Gets the price, market cap and volume series for a single asset.
    ///
    /// # Errors
    /// Returns error if the request fails, upstream answers non-2xx, or the
    /// body is not a market chart.
    pub async fn market_chart(
        &self,
        id: &str,
        query: &MarketChartQuery,
    ) -> Result<MarketChart, Error> {
        let url = self.endpoint(&["coins", asset_segment(id)?, "market_chart"], query)?;
        self.get_json(url).await
    }

    /// Appends `segments` to the base path, each escaped as a single
    /// segment, and replaces the query string with `query`.
    fn endpoint<Q: Serialize>(&self, segments: &[&str], query: &Q) -> Result<Url, Error> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| Error::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .extend(segments);

        let params = serde_urlencoded::to_string(query)?;
        url.set_query((!params.is_empty()).then_some(params.as_str()));
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        let resp = self.client.get(url).send().await?;
        self.handle_response(resp).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, Error> {
        let status = resp.status();

        if status.is_success() {
            Ok(resp.json().await?)
        } else {
            let text = resp.text().await.unwrap_or_default();
            let body = serde_json::from_str(&text).unwrap_or(Value::String(text));
            Err(Error::Api {
                status: status.as_u16(),
                body,
            })
        }
    }
}

/// Dot segments would be dropped or resolved by URL normalization and
/// address a different resource, so they never name an asset.
fn asset_segment(id: &str) -> Result<&str, Error> {
    match id {
        "." | ".." => Err(Error::InvalidAssetId(id.to_string())),
        _ => Ok(id),
    }
}
