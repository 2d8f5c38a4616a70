//! Key-value storage for in-progress checkout drafts.
//!
//! A draft is stored as an opaque serialized payload keyed by customer.
//! The [`CheckoutRepository`] trait is the capability the checkout
//! service consumes; this crate ships an in-memory implementation for
//! tests and local runs, and a PostgreSQL implementation for deployed
//! environments.

pub mod error;
pub mod memory;
pub mod postgres;
pub mod repository;

pub use common::CustomerId;
pub use error::{Result, StoreError};
pub use memory::InMemoryCheckoutRepository;
pub use postgres::PostgresCheckoutRepository;
pub use repository::CheckoutRepository;
