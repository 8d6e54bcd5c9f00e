//! # Order Tracker
//!
//! > **A small TCP service that tracks restaurant orders and tells you when they are ready.**
//!
//! Clients keep one socket open, place orders, poll their status or cancel
//! them, and get an unsolicited `Your order {id} is ready!` line on the same
//! socket once fulfillment completes.
//!
//! ## 🏗️ Design
//!
//! ### One owner for order state
//! Every order lives inside the [`OrderRegistry`](registry::OrderRegistry)
//! actor. It processes requests one at a time from a channel, so creating,
//! reading, removing and marking an order ready are atomic without a lock.
//!
//! ### Bindings, not ownership
//! The connection that placed an order is remembered in the
//! [`ConnectionDirectory`](directory::ConnectionDirectory) as a weak
//! [`ConnectionHandle`](connection::ConnectionHandle). The order itself knows
//! nothing about sockets, and a closed connection is never kept alive by a
//! pending order.
//!
//! ### Fire-and-forget fulfillment
//! Each accepted order gets a Tokio task from the
//! [`FulfillmentScheduler`](fulfillment::FulfillmentScheduler). Cancelling an
//! order does not stop the task; when the delay elapses the task finds the
//! order gone and does nothing.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. State ([`model`], [`registry`], [`directory`])
//! - **Role**: Orders, the actor that owns them, and the order-to-connection bindings.
//! - **Key items**: [`Order`](model::Order), [`RegistryClient`](registry::RegistryClient).
//!
//! ### 2. Background path ([`fulfillment`], [`notifier`], [`connection`])
//! - **Role**: Wait, mark ready, push the notification.
//!
//! ### 3. Request path ([`protocol`], [`server`])
//! - **Role**: Decode a line, dispatch it, write the reply.
//! - **Key items**: [`Command`](protocol::Command), [`Reply`](protocol::Reply),
//!   [`Dispatcher`](server::Dispatcher).
//!
//! ### 4. Wiring ([`lifecycle`], [`config`])
//! - **Role**: Build one isolated service instance, run it, shut it down.
//! - **Key items**: [`OrderService`](lifecycle::OrderService), [`ServiceConfig`](config::ServiceConfig).
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! RUST_LOG=info cargo run -- --fulfillment-delay-ms 3000
//!
//! # in another terminal
//! nc localhost 5500
//! {"command":"ADD_ORDER","restaurantName":"Pizza Hut","orderDetails":"1 pepperoni"}
//! ```
//!
//! ### Running Tests
//!
//! ```bash
//! cargo test
//! ```

pub mod config;
pub mod connection;
pub mod directory;
pub mod fulfillment;
pub mod lifecycle;
pub mod model;
pub mod notifier;
pub mod protocol;
pub mod registry;
pub mod server;
