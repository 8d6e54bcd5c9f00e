//! # Wire Protocol
//!
//! One JSON object per inbound line, one plain-text line per outbound reply or
//! notification.
//!
//! ```text
//! -> {"command":"ADD_ORDER","restaurantName":"Pizza Hut","orderDetails":"1 pepperoni"}
//! <- Order added. Order ID: 1
//! -> {"command":"CHECK_STATUS","orderId":1}
//! <- Status of order 1: received
//! <- Your order 1 is ready!            (unsolicited, once fulfillment completes)
//! ```
//!
//! Decoding is lenient about *missing* fields and strict about *malformed*
//! ones: a line that is not a JSON object, or whose `orderId` is not an
//! integer, is a [`ProtocolError`] and ends the connection.

use crate::model::{OrderCreate, OrderId, OrderStatus};
use serde::Deserialize;
use std::fmt::Display;

pub const ADD_ORDER: &str = "ADD_ORDER";
pub const CHECK_STATUS: &str = "CHECK_STATUS";
pub const CANCEL_ORDER: &str = "CANCEL_ORDER";

#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    #[error("Malformed request: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// A request exactly as it arrived on the wire.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Request {
    #[serde(alias = "Command")]
    pub command: Option<String>,
    #[serde(alias = "RestaurantName")]
    pub restaurant_name: Option<String>,
    #[serde(alias = "OrderDetails")]
    pub order_details: Option<String>,
    #[serde(alias = "OrderId")]
    pub order_id: i64,
}

/// A decoded request, with only the fields its command uses.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    AddOrder(OrderCreate),
    CheckStatus { order_id: i64 },
    CancelOrder { order_id: i64 },
    Invalid { command: Option<String> },
}

impl Request {
    pub fn into_command(self) -> Command {
        match self.command.as_deref() {
            Some(ADD_ORDER) => Command::AddOrder(OrderCreate {
                restaurant_name: self.restaurant_name.unwrap_or_default(),
                details: self.order_details.unwrap_or_default(),
            }),
            Some(CHECK_STATUS) => Command::CheckStatus {
                order_id: self.order_id,
            },
            Some(CANCEL_ORDER) => Command::CancelOrder {
                order_id: self.order_id,
            },
            _ => Command::Invalid {
                command: self.command,
            },
        }
    }
}

/// Decodes one inbound line.
pub fn decode(line: &str) -> Result<Command, ProtocolError> {
    let request: Request = serde_json::from_str(line)?;
    Ok(request.into_command())
}

/// The synchronous answer to one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reply {
    OrderAdded(OrderId),
    Status(OrderId, OrderStatus),
    NotFound,
    Cancelled(OrderId),
    CouldNotCancel,
    InvalidCommand,
}

impl Display for Reply {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Reply::OrderAdded(id) => write!(f, "Order added. Order ID: {}", id),
            Reply::Status(id, status) => write!(f, "Status of order {}: {}", id, status),
            Reply::NotFound => f.write_str("Order not found."),
            Reply::Cancelled(id) => write!(f, "Order {} cancelled.", id),
            Reply::CouldNotCancel => f.write_str("Could not cancel order."),
            Reply::InvalidCommand => f.write_str("Invalid command."),
        }
    }
}

/// Unsolicited messages pushed to a client outside the request/response cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notification {
    OrderReady(OrderId),
}

impl Display for Notification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Notification::OrderReady(id) => write!(f, "Your order {} is ready!", id),
        }
    }
}
