//! Health check endpoint tests.

use dashboard_tests::{TestServer, create_test_client};
use serde_json::Value;

#[tokio::test]
async fn test_health_check() {
    let server = TestServer::start().await;
    let client = create_test_client().expect("Failed to create client");

    let resp = client
        .get(server.url("/health"))
        .send()
        .await
        .expect("Health check failed");

    assert_eq!(resp.status(), 200);
    let health: Value = resp.json().await.expect("Invalid JSON");
    assert_eq!(health["status"], "healthy");
    assert!(!health["version"].as_str().unwrap_or_default().is_empty());
    assert_eq!(server.hits(), 0);
}
