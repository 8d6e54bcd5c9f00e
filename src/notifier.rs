//! # Notifier
//!
//! Pushes an unsolicited line to the connection that was bound to an order.
//! The binding itself is taken out of the directory by the registry, in the
//! same step that marks the order ready; [`notify`] only delivers.
//!
//! Delivery is best effort: nothing here can fail the caller, and nothing is
//! retried.

use crate::connection::{ConnectionHandle, PushError};
use crate::model::OrderId;
use tracing::{debug, info, warn};

/// What happened to a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// Queued on the connection's writer.
    Delivered,
    /// No connection was bound (cancelled, already notified, or never bound).
    Unbound,
    /// The bound connection had already gone away.
    ConnectionClosed,
    /// The client was not reading and its outbound queue was full.
    Dropped,
}

/// Sends `message` for order `id` to its former binding, if there was one.
pub fn notify(id: OrderId, binding: Option<ConnectionHandle>, message: &str) -> Delivery {
    let Some(connection) = binding else {
        debug!(%id, "No connection bound; notification dropped");
        return Delivery::Unbound;
    };

    match connection.send(message) {
        Ok(()) => {
            info!(%id, peer = %connection.peer(), "Notification sent");
            Delivery::Delivered
        }
        Err(e @ PushError::Closed { .. }) => {
            warn!(%id, error = %e, "Notification failed");
            Delivery::ConnectionClosed
        }
        Err(e @ PushError::Full { .. }) => {
            warn!(%id, error = %e, "Notification dropped");
            Delivery::Dropped
        }
    }
}
