//! # Service Lifecycle
//!
//! Starting, wiring and stopping one order-tracking service.
//!
//! - [`OrderService`]: spawns the registry actor, builds the scheduler, runs
//!   accept loops and shuts everything down.
//! - [`shutdown`]: the signal every long-running task listens to.
//! - [`setup_tracing`]: logging for the binary.
//!
//! ## Dependency Injection
//!
//! Nothing in the service is global. `OrderService::new` creates the
//! [`ConnectionDirectory`](crate::directory::ConnectionDirectory) and hands it
//! to the registry actor through `run(directory)`, then passes clients down to
//! the scheduler and the dispatcher. Tests build as many isolated services as
//! they like.
//!
//! ## Graceful Shutdown
//!
//! 1. **Fire the signal**: accept loops stop, connection handlers close their
//!    sockets, pending fulfillments give up.
//! 2. **Drop clients**: once the last [`RegistryClient`](crate::registry::RegistryClient)
//!    is gone the registry's `recv()` returns `None`.
//! 3. **Await tasks**: wait for the registry and accept loops to finish.

pub mod order_service;
pub mod shutdown;
pub mod tracing;

pub use order_service::*;
pub use shutdown::{Shutdown, ShutdownTrigger};
pub use self::tracing::setup_tracing;
