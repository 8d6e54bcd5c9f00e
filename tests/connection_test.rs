mod common;

use common::*;
use order_tracker::config::ServiceConfig;
use std::time::Duration;

const DELAY: Duration = Duration::from_millis(200);

/// A line that is not valid JSON ends the connection without a reply.
#[tokio::test]
async fn test_malformed_line_closes_connection() {
    let (service, addr) = start_with_delay(DELAY).await;
    let mut client = TestClient::connect(addr).await;

    client.send_raw("this is not json\n").await;
    assert_eq!(client.recv().await, None);

    service.shutdown().await.unwrap();
}

/// Replies already produced are flushed before a malformed line closes the socket.
#[tokio::test]
async fn test_earlier_replies_survive_malformed_line() {
    let (service, addr) = start_with_delay(Duration::from_secs(60)).await;
    let mut client = TestClient::connect(addr).await;

    let burst = format!(
        "{}\n{}\n{{\"command\": \n",
        add_order("Pizza Hut", "margherita"),
        check_status(1)
    );
    client.send_raw(&burst).await;

    assert_eq!(client.recv().await.as_deref(), Some("Order added. Order ID: 1"));
    assert_eq!(client.recv().await.as_deref(), Some("Status of order 1: received"));
    assert_eq!(client.recv().await, None);

    service.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_blank_line_is_malformed() {
    let (service, addr) = start_with_delay(DELAY).await;
    let mut client = TestClient::connect(addr).await;

    client.send_raw("\n").await;
    assert_eq!(client.recv().await, None);

    service.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_non_integer_order_id_is_malformed() {
    let (service, addr) = start_with_delay(DELAY).await;
    let mut client = TestClient::connect(addr).await;

    client
        .send(serde_json::json!({ "command": "CHECK_STATUS", "orderId": "one" }))
        .await;
    assert_eq!(client.recv().await, None);

    service.shutdown().await.unwrap();
}

/// Unknown or missing commands get a reply and the connection stays usable.
#[tokio::test]
async fn test_invalid_command_keeps_connection_open() {
    let (service, addr) = start_with_delay(DELAY).await;
    let mut client = TestClient::connect(addr).await;

    let reply = client.request(serde_json::json!({ "command": "REFUND" })).await;
    assert_eq!(reply, "Invalid command.");
    let reply = client.request(serde_json::json!({})).await;
    assert_eq!(reply, "Invalid command.");
    let reply = client.request(serde_json::json!({ "command": "add_order" })).await;
    assert_eq!(reply, "Invalid command.");

    let reply = client.request(add_order("Pizza Hut", "calzone")).await;
    assert_eq!(reply, "Order added. Order ID: 1");

    service.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_crlf_and_pascal_case_fields() {
    let (service, addr) = start_with_delay(Duration::from_secs(60)).await;
    let mut client = TestClient::connect(addr).await;

    client
        .send_raw("{\"Command\":\"ADD_ORDER\",\"RestaurantName\":\"Deli\",\"OrderDetails\":\"rye\"}\r\n")
        .await;
    assert_eq!(client.recv().await.as_deref(), Some("Order added. Order ID: 1"));

    client.send_raw("{\"Command\":\"CHECK_STATUS\",\"OrderId\":1}\r\n").await;
    assert_eq!(client.recv().await.as_deref(), Some("Status of order 1: received"));

    service.shutdown().await.unwrap();
}

/// An order outlives the connection that placed it.
#[tokio::test]
async fn test_order_fulfilled_after_client_disconnects() {
    let (service, addr) = start_with_delay(DELAY).await;

    let mut placer = TestClient::connect(addr).await;
    let id = added_id(&placer.request(add_order("Burger Joint", "double")).await);
    drop(placer);

    tokio::time::sleep(DELAY * 2).await;

    let mut other = TestClient::connect(addr).await;
    let reply = other.request(check_status(id as i64)).await;
    assert_eq!(reply, format!("Status of order {}: ready", id));
    assert!(other.recv_within(DELAY).await.is_err(), "no notification for a foreign order");

    // The dead connection left no binding behind
    assert!(service.directory.lookup(&order_tracker::model::OrderId(id)).is_none());

    service.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_shutdown_closes_open_connections() {
    let (service, addr) = start_with_delay(Duration::from_secs(60)).await;
    let mut client = TestClient::connect(addr).await;
    client.request(add_order("Pizza Hut", "pepperoni")).await;

    tokio::time::timeout(Duration::from_secs(5), service.shutdown())
        .await
        .expect("shutdown should not wait for pending orders")
        .unwrap();

    assert_eq!(client.recv().await, None);
}

/// With a connection cap, extra clients wait in the backlog until a slot frees up.
#[tokio::test]
async fn test_connection_cap_queues_extra_clients() {
    let config = ServiceConfig {
        max_connections: Some(1),
        ..ServiceConfig::default().with_fulfillment_delay(Duration::from_secs(60))
    };
    let (service, addr) = start_service(config).await;

    let mut first = TestClient::connect(addr).await;
    assert_eq!(
        first.request(add_order("Pizza Hut", "slice")).await,
        "Order added. Order ID: 1"
    );

    let mut second = TestClient::connect(addr).await;
    second.send(check_status(1)).await;
    assert!(
        second.recv_within(Duration::from_millis(300)).await.is_err(),
        "second client should not be served while the first holds the slot"
    );

    drop(first);
    assert_eq!(
        second.recv().await.as_deref(),
        Some("Status of order 1: received")
    );

    service.shutdown().await.unwrap();
}

/// A client that floods requests and never reads stalls only itself, and
/// cannot hold up shutdown.
#[tokio::test]
async fn test_non_reading_client_does_not_block_shutdown() {
    use tokio::io::AsyncWriteExt;

    let (service, addr) = start_with_delay(Duration::from_secs(60)).await;
    let mut client = TestClient::connect(addr).await;
    client.request(add_order("Pizza Hut", "family size")).await;

    let stream = tokio::net::TcpStream::connect(addr).await.unwrap();
    let (_unread, mut write_half) = stream.into_split();
    let chunk = format!("{}\n", check_status(1)).repeat(1000);
    let flood = tokio::spawn(async move {
        // Ends once the server closes the socket
        while write_half.write_all(chunk.as_bytes()).await.is_ok() {}
    });

    // Give the flood time to fill every buffer between the two ends
    tokio::time::sleep(Duration::from_millis(500)).await;

    // Other clients are still served meanwhile
    assert_eq!(
        client.request(check_status(1)).await,
        "Status of order 1: received"
    );

    tokio::time::timeout(Duration::from_secs(5), service.shutdown())
        .await
        .expect("shutdown hung behind a client that never reads")
        .unwrap();
    flood.abort();
}

/// Replies held back while the client was not reading all arrive, in order.
#[tokio::test]
async fn test_replies_resume_when_client_reads_again() {
    let (service, addr) = start_with_delay(Duration::from_secs(60)).await;
    let mut client = TestClient::connect(addr).await;

    let burst: String = (0..500)
        .map(|n| format!("{}\n", add_order("Bakery", &format!("roll {}", n))))
        .collect();
    client.send_raw(&burst).await;

    for id in 1..=500 {
        assert_eq!(
            client.recv().await,
            Some(format!("Order added. Order ID: {}", id))
        );
    }

    service.shutdown().await.unwrap();
}
