//! Shared helpers for the end-to-end tests: a running service on loopback and
//! a line-oriented test client.

#![allow(dead_code)]

use order_tracker::config::ServiceConfig;
use order_tracker::lifecycle::OrderService;
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::{TcpListener, TcpStream};

/// Upper bound for any single expected line.
pub const RECV_TIMEOUT: Duration = Duration::from_secs(5);

pub async fn start_service(config: ServiceConfig) -> (OrderService, SocketAddr) {
    let mut service = OrderService::new(&config);
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind loopback listener");
    let addr = service.listen(listener).expect("Failed to start listening");
    (service, addr)
}

pub async fn start_with_delay(delay: Duration) -> (OrderService, SocketAddr) {
    start_service(ServiceConfig::default().with_fulfillment_delay(delay)).await
}

pub fn add_order(restaurant: &str, details: &str) -> Value {
    json!({ "command": "ADD_ORDER", "restaurantName": restaurant, "orderDetails": details })
}

pub fn check_status(id: i64) -> Value {
    json!({ "command": "CHECK_STATUS", "orderId": id })
}

pub fn cancel_order(id: i64) -> Value {
    json!({ "command": "CANCEL_ORDER", "orderId": id })
}

/// Parses the id out of `Order added. Order ID: {id}`.
pub fn added_id(reply: &str) -> u64 {
    reply
        .strip_prefix("Order added. Order ID: ")
        .unwrap_or_else(|| panic!("not an order-added reply: {:?}", reply))
        .parse()
        .expect("order id should be numeric")
}

pub struct TestClient {
    lines: Lines<BufReader<OwnedReadHalf>>,
    writer: OwnedWriteHalf,
}

impl TestClient {
    pub async fn connect(addr: SocketAddr) -> Self {
        let stream = TcpStream::connect(addr).await.expect("Failed to connect");
        let (read_half, writer) = stream.into_split();
        Self {
            lines: BufReader::new(read_half).lines(),
            writer,
        }
    }

    pub async fn send_raw(&mut self, raw: &str) {
        self.writer
            .write_all(raw.as_bytes())
            .await
            .expect("Failed to write");
    }

    pub async fn send(&mut self, request: Value) {
        self.send_raw(&format!("{}\n", request)).await;
    }

    /// Next line from the server; `None` once the server closed the connection.
    pub async fn recv(&mut self) -> Option<String> {
        tokio::time::timeout(RECV_TIMEOUT, self.lines.next_line())
            .await
            .expect("Timed out waiting for a line")
            .unwrap_or(None)
    }

    /// Like [`recv`](Self::recv) but `Err` when nothing arrives within `wait`.
    pub async fn recv_within(&mut self, wait: Duration) -> Result<Option<String>, ()> {
        match tokio::time::timeout(wait, self.lines.next_line()).await {
            Ok(line) => Ok(line.unwrap_or(None)),
            Err(_) => Err(()),
        }
    }

    pub async fn request(&mut self, request: Value) -> String {
        self.send(request).await;
        self.recv().await.expect("Connection closed before a reply")
    }
}
