//! # Registry Errors
//!
//! The registry itself never fails an operation: a missing order is an
//! ordinary `None`/`false` answer. These errors only describe the channel to
//! the actor breaking down, which happens during shutdown.

/// Errors that can occur while talking to the [`OrderRegistry`](super::OrderRegistry).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("Registry closed")]
    ActorClosed,
    #[error("Registry dropped response channel")]
    ActorDropped,
}
