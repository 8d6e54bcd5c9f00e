//! # Registry Messages
//!
//! The request enum sent from [`RegistryClient`](super::RegistryClient) to the
//! [`OrderRegistry`](super::OrderRegistry) actor. Each variant carries a
//! one-shot sender the actor answers on.

use crate::connection::ConnectionHandle;
use crate::model::{Order, OrderCreate, OrderId};
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by the registry.
pub type Response<T> = oneshot::Sender<T>;

/// Internal message type sent to the registry actor.
///
/// Every variant is applied in full before the actor reads the next one, which
/// is what makes the registry operations atomic for concurrent callers.
#[derive(Debug)]
pub enum RegistryRequest {
    /// Allocate the next id and store a `received` order. When `bind_to` is
    /// set the connection is bound in the same step.
    Create {
        params: OrderCreate,
        bind_to: Option<ConnectionHandle>,
        respond_to: Response<OrderId>,
    },
    Get {
        id: OrderId,
        respond_to: Response<Option<Order>>,
    },
    /// Remove the order and its connection binding together.
    Remove {
        id: OrderId,
        respond_to: Response<Option<Order>>,
    },
    /// Mark the order ready and take its connection binding in the same step.
    MarkReady {
        id: OrderId,
        respond_to: Response<MarkedReady>,
    },
}

/// Answer to [`RegistryRequest::MarkReady`].
#[derive(Debug, Clone)]
pub enum MarkedReady {
    /// The order is now `ready`. Carries the connection that was bound to it,
    /// already removed from the directory.
    Ready(Option<ConnectionHandle>),
    /// The order does not exist (it was cancelled).
    NotFound,
}

impl MarkedReady {
    pub fn is_found(&self) -> bool {
        matches!(self, MarkedReady::Ready(_))
    }
}
