//! Unit tests for client module.

use super::*;
use axum::Router;
use axum::extract::{Path, RawQuery};
use axum::http::{StatusCode, Uri};
use axum::routing::get;
use serde_json::json;

/// Serves `router` on an ephemeral local port and returns its base URL.
async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

// ============================================================================
// ClientConfig Tests
// ============================================================================

#[test]
fn test_client_config_default() {
    let config = ClientConfig::default();

    assert_eq!(config.base_url, DEFAULT_BASE_URL);
    assert_eq!(config.timeout, Duration::from_secs(30));
}

#[test]
fn test_client_config_custom() {
    let config = ClientConfig {
        base_url: "http://127.0.0.1:9000".to_string(),
        timeout: Duration::from_secs(5),
    };

    let cloned = config.clone();
    assert_eq!(cloned.base_url, "http://127.0.0.1:9000");
    assert_eq!(cloned.timeout, Duration::from_secs(5));
}

// ============================================================================
// MarketDataClient Creation Tests
// ============================================================================

#[test]
fn test_client_new() {
    let client = MarketDataClient::new(ClientConfig::default());

    assert!(client.is_ok());
}

#[test]
fn test_client_base_url_trimmed() {
    let client = MarketDataClient::with_base_url("http://localhost:8080/api/v3/").unwrap();

    assert_eq!(client.base_url(), "http://localhost:8080/api/v3");
}

#[test]
fn test_client_invalid_base_url() {
    let result = MarketDataClient::with_base_url("not a url");

    assert!(matches!(result, Err(Error::InvalidUrl(_))));
}

// ============================================================================
// Request Tests
// ============================================================================

#[tokio::test]
async fn test_list_markets_sends_query() {
    let router = Router::new().route(
        "/coins/markets",
        get(|RawQuery(query): RawQuery| async move {
            axum::Json(json!([{ "id": "bitcoin", "query": query }]))
        }),
    );
    let client = MarketDataClient::with_base_url(&serve(router).await).unwrap();

    let markets = client
        .list_markets(&MarketsQuery::top_by_market_cap("usd"))
        .await
        .unwrap();

    assert_eq!(markets[0]["id"], "bitcoin");
    assert_eq!(
        markets[0]["query"],
        "vs_currency=usd&order=market_cap_desc&per_page=100&page=1&sparkline=false"
    );
}

#[tokio::test]
async fn test_coin_detail_uses_id_in_path() {
    let router = Router::new().route(
        "/coins/{id}",
        get(|Path(id): Path<String>| async move { axum::Json(json!({ "id": id })) }),
    );
    let client = MarketDataClient::with_base_url(&serve(router).await).unwrap();

    let detail = client
        .coin_detail("ethereum", &CoinDetailQuery::default())
        .await
        .unwrap();

    assert_eq!(detail["id"], "ethereum");
}

/// Echoes the raw request path and query the server received.
async fn serve_echo() -> String {
    let router = Router::new().fallback(|uri: Uri| async move {
        axum::Json(json!({ "path": uri.path(), "query": uri.query() }))
    });
    serve(router).await
}

#[tokio::test]
async fn test_coin_detail_escapes_id_as_single_segment() {
    let client = MarketDataClient::with_base_url(&serve_echo().await).unwrap();

    let echoed = client
        .coin_detail("x/../markets", &CoinDetailQuery::default())
        .await
        .unwrap();

    assert_eq!(echoed["path"], "/coins/x%2F..%2Fmarkets");
}

#[tokio::test]
async fn test_coin_detail_id_cannot_replace_query() {
    let client = MarketDataClient::with_base_url(&serve_echo().await).unwrap();

    let echoed = client
        .coin_detail("bitcoin?x=1#", &CoinDetailQuery::default())
        .await
        .unwrap();

    assert_eq!(echoed["path"], "/coins/bitcoin%3Fx=1%23");
    assert_eq!(
        echoed["query"],
        "localization=false&tickers=false&market_data=true&community_data=false&developer_data=false"
    );
}

#[tokio::test]
async fn test_id_escaped_under_base_path() {
    let base = format!("{}/api/v3/", serve_echo().await);
    let client = MarketDataClient::with_base_url(&base).unwrap();

    let echoed = client
        .coin_detail("a/b", &CoinDetailQuery::default())
        .await
        .unwrap();

    assert_eq!(echoed["path"], "/api/v3/coins/a%2Fb");
}

#[tokio::test]
async fn test_dot_ids_rejected_without_request() {
    let client = MarketDataClient::with_base_url(&serve_echo().await).unwrap();

    for id in [".", ".."] {
        let err = client
            .coin_detail(id, &CoinDetailQuery::default())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidAssetId(_)));
        assert_eq!(err.status(), Some(404));

        let err = client
            .market_chart(id, &MarketChartQuery::daily("usd", "30"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidAssetId(_)));
    }
}

#[tokio::test]
async fn test_market_chart_decodes_series() {
    let router = Router::new().route(
        "/coins/{id}/market_chart",
        get(|| async {
            axum::Json(json!({
                "prices": [[1704067200000_i64, 10.0], [1704153600000_i64, 12.0]],
                "market_caps": [],
                "total_volumes": [[1704067200000_i64, 100.0], [1704153600000_i64, 150.0]]
            }))
        }),
    );
    let client = MarketDataClient::with_base_url(&serve(router).await).unwrap();

    let chart = client
        .market_chart("bitcoin", &MarketChartQuery::daily("usd", "30"))
        .await
        .unwrap();

    assert_eq!(chart.prices.len(), 2);
    assert_eq!(chart.total_volumes[1].value(), 150.0);
}

#[tokio::test]
async fn test_non_success_status_maps_to_api_error_with_json_body() {
    let router = Router::new().route(
        "/coins/{id}",
        get(|| async {
            (
                StatusCode::NOT_FOUND,
                axum::Json(json!({ "error": "coin not found" })),
            )
        }),
    );
    let client = MarketDataClient::with_base_url(&serve(router).await).unwrap();

    let err = client
        .coin_detail("nope", &CoinDetailQuery::default())
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(404));
    assert_eq!(err.details(), json!({ "error": "coin not found" }));
}

#[tokio::test]
async fn test_non_json_error_body_kept_as_string() {
    let router = Router::new().route(
        "/coins/markets",
        get(|| async { (StatusCode::BAD_GATEWAY, "upstream down") }),
    );
    let client = MarketDataClient::with_base_url(&serve(router).await).unwrap();

    let err = client
        .list_markets(&MarketsQuery::top_by_market_cap("usd"))
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(502));
    assert_eq!(err.details(), json!("upstream down"));
}

#[tokio::test]
async fn test_connection_refused_has_no_status() {
    // Bind then drop to get a port with nothing listening.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = MarketDataClient::with_base_url(&format!("http://{}", addr)).unwrap();
    let err = client
        .list_markets(&MarketsQuery::top_by_market_cap("usd"))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Http(_)));
    assert_eq!(err.status(), None);
}
