//! Pure data structures owned by the [`OrderRegistry`](crate::registry::OrderRegistry).

pub mod order;

pub use order::*;
