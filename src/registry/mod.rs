//! # Order Registry
//!
//! The single source of truth for which orders exist and what state they are
//! in. Built as an actor:
//!
//! - [`OrderRegistry`]: the server half; owns the store and the id counter.
//! - [`RegistryClient`]: the cloneable client half used by the connection
//!   handlers and the fulfillment tasks.
//! - [`RegistryRequest`]: the messages between them.
//!
//! See [`mock`] for driving a [`RegistryClient`] by hand in tests.

pub mod actor;
pub mod client;
pub mod error;
pub mod message;
pub mod mock;

pub use actor::OrderRegistry;
pub use client::RegistryClient;
pub use error::RegistryError;
pub use message::{MarkedReady, RegistryRequest, Response};

/// Default capacity of the registry's request channel.
pub const DEFAULT_BUFFER: usize = 32;

/// Creates a new registry actor and its client.
pub fn new(buffer_size: usize) -> (OrderRegistry, RegistryClient) {
    OrderRegistry::new(buffer_size)
}
