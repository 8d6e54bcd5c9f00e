//! # Registry Test Doubles
//!
//! In tests that exercise code *around* the registry (the fulfillment path,
//! the dispatcher) it is often easier to answer registry requests by hand than
//! to arrange real registry state. [`create_mock_registry`] returns a real
//! [`RegistryClient`] whose requests land on a receiver the test controls.
//!
//! ```rust
//! use order_tracker::model::OrderId;
//! use order_tracker::registry::mock::{create_mock_registry, expect_mark_ready};
//! use order_tracker::registry::MarkedReady;
//!
//! #[tokio::main]
//! async fn main() {
//!     let (client, mut requests) = create_mock_registry(4);
//!
//!     let call = tokio::spawn(async move { client.mark_ready(OrderId(5)).await });
//!
//!     // Pretend order 5 was cancelled in the meantime
//!     let (id, respond_to) = expect_mark_ready(&mut requests).await.unwrap();
//!     assert_eq!(id, OrderId(5));
//!     respond_to.send(MarkedReady::NotFound).unwrap();
//!
//!     let answer = call.await.unwrap().unwrap();
//!     assert!(!answer.is_found());
//! }
//! ```

use super::client::RegistryClient;
use super::message::{MarkedReady, RegistryRequest, Response};
use crate::connection::ConnectionHandle;
use crate::model::{Order, OrderCreate, OrderId};
use tokio::sync::mpsc;

/// Creates a registry client and the receiver its requests arrive on.
pub fn create_mock_registry(
    buffer_size: usize,
) -> (RegistryClient, mpsc::Receiver<RegistryRequest>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (RegistryClient::new(sender), receiver)
}

/// Helper to verify that the next message is a Create request
pub async fn expect_create(
    receiver: &mut mpsc::Receiver<RegistryRequest>,
) -> Option<(OrderCreate, Option<ConnectionHandle>, Response<OrderId>)> {
    match receiver.recv().await {
        Some(RegistryRequest::Create {
            params,
            bind_to,
            respond_to,
        }) => Some((params, bind_to, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Get request
pub async fn expect_get(
    receiver: &mut mpsc::Receiver<RegistryRequest>,
) -> Option<(OrderId, Response<Option<Order>>)> {
    match receiver.recv().await {
        Some(RegistryRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Remove request
pub async fn expect_remove(
    receiver: &mut mpsc::Receiver<RegistryRequest>,
) -> Option<(OrderId, Response<Option<Order>>)> {
    match receiver.recv().await {
        Some(RegistryRequest::Remove { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a MarkReady request
pub async fn expect_mark_ready(
    receiver: &mut mpsc::Receiver<RegistryRequest>,
) -> Option<(OrderId, Response<MarkedReady>)> {
    match receiver.recv().await {
        Some(RegistryRequest::MarkReady { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}
