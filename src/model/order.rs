/// Represents a restaurant order tracked by the service.
///
/// # Ownership
/// Orders live only inside the [`OrderRegistry`](crate::registry::OrderRegistry).
/// Everything outside the registry works with clones handed out by
/// [`RegistryClient`](crate::registry::RegistryClient).
///
/// The connection that placed the order is deliberately *not* stored here; see
/// [`ConnectionDirectory`](crate::directory::ConnectionDirectory).
use std::fmt::Display;

/// Type-safe identifier for Orders.
///
/// Assigned by the registry, starting at 1 and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OrderId(pub u64);

impl From<u64> for OrderId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Raised when a client-supplied number can never name an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("{0} is not a valid order id")]
pub struct InvalidOrderId(pub i64);

impl TryFrom<i64> for OrderId {
    type Error = InvalidOrderId;

    fn try_from(raw: i64) -> Result<Self, Self::Error> {
        match u64::try_from(raw) {
            Ok(id) if id > 0 => Ok(Self(id)),
            _ => Err(InvalidOrderId(raw)),
        }
    }
}

/// Lifecycle of an order. The only transition is `Received -> Ready`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderStatus {
    #[default]
    Received,
    Ready,
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderStatus::Received => f.write_str("received"),
            OrderStatus::Ready => f.write_str("ready"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: OrderId,
    pub restaurant_name: String,
    pub details: String,
    pub status: OrderStatus,
}

/// Payload for creating a new order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderCreate {
    pub restaurant_name: String,
    pub details: String,
}

impl Order {
    /// Builds a freshly accepted order from its creation payload.
    ///
    /// # Notes
    /// The status always starts as [`OrderStatus::Received`].
    pub fn from_create_params(id: OrderId, params: OrderCreate) -> Self {
        Self {
            id,
            restaurant_name: params.restaurant_name,
            details: params.details,
            status: OrderStatus::Received,
        }
    }

    /// Moves the order to [`OrderStatus::Ready`].
    ///
    /// Returns `false` when the order was already ready.
    pub fn mark_ready(&mut self) -> bool {
        if self.status == OrderStatus::Ready {
            return false;
        }
        self.status = OrderStatus::Ready;
        true
    }

    pub fn is_ready(&self) -> bool {
        self.status == OrderStatus::Ready
    }
}
