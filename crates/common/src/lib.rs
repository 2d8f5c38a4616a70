//! Shared value types for the checkout service.

pub mod types;

pub use types::{CustomerId, Money};
