//! Realtime channel connection and room tests.

use dashboard_tests::{TestServer, eventually};
use futures_util::SinkExt;
use std::time::Duration;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;

#[tokio::test]
async fn test_websocket_connection() {
    let server = TestServer::start().await;

    let (ws, _) = connect_async(server.ws_url())
        .await
        .expect("Failed to connect to WebSocket");

    drop(ws);
    assert_eq!(server.state.rooms.room_count(), 0);
}

#[tokio::test]
async fn test_websocket_subscribe_joins_room() {
    let server = TestServer::start().await;

    let (mut ws, _) = connect_async(server.ws_url())
        .await
        .expect("Failed to connect to WebSocket");

    ws.send(Message::Text(
        r#"{"event":"subscribe","data":"bitcoin"}"#.into(),
    ))
    .await
    .expect("Failed to send subscribe event");

    let rooms = &server.state.rooms;
    assert!(eventually(Duration::from_secs(5), || rooms.members("bitcoin") == 1).await);
}

#[tokio::test]
async fn test_websocket_disconnect_leaves_rooms() {
    let server = TestServer::start().await;

    let (mut ws, _) = connect_async(server.ws_url())
        .await
        .expect("Failed to connect to WebSocket");

    for asset in ["bitcoin", "ethereum"] {
        let event = format!(r#"{{"event":"subscribe","data":"{}"}}"#, asset);
        ws.send(Message::Text(event.into()))
            .await
            .expect("Failed to send subscribe event");
    }

    let rooms = &server.state.rooms;
    assert!(eventually(Duration::from_secs(5), || rooms.room_count() == 2).await);

    ws.close(None).await.expect("Failed to close");

    assert!(eventually(Duration::from_secs(5), || rooms.room_count() == 0).await);
}

#[tokio::test]
async fn test_websocket_not_rate_limited() {
    let server = TestServer::start().await;
    let client = dashboard_tests::create_test_client().expect("Failed to create client");

    for _ in 0..31 {
        client
            .get(server.url("/api/cryptocurrencies"))
            .send()
            .await
            .expect("Request failed");
    }

    assert!(connect_async(server.ws_url()).await.is_ok());
}
