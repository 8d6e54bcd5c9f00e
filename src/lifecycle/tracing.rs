//! # Observability & Tracing
//!
//! Structured logging for the whole service, built on the `tracing` crate.
//!
//! ## Configuration
//!
//! The subscriber uses a compact format without the crate/module prefix
//! (`with_target(false)`); span names carry the context instead.
//!
//! ```bash
//! # Connection and order lifecycle
//! RUST_LOG=info cargo run
//!
//! # Every registry lookup, bind/unbind and decoded command
//! RUST_LOG=debug cargo run
//!
//! # Only the registry
//! RUST_LOG=order_tracker::registry=debug cargo run
//! ```
//!
//! ## Spans
//!
//! - `connection{peer}`: wraps a connection's reader loop and writer task.
//! - `fulfillment{order_id}`: wraps one order's background fulfillment.
//!
//! An order that is placed, fulfilled and delivered looks like this with
//! `RUST_LOG=info`:
//!
//! ```text
//! INFO connection: Connection opened peer=127.0.0.1:51234
//! INFO Created id=1 size=1
//! INFO connection:dispatch: Order accepted id=1 peer=127.0.0.1:51234
//! INFO Ready id=1
//! INFO fulfillment: Notification sent id=1 peer=127.0.0.1:51234 order_id=1
//! ```
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
