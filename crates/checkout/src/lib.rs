//! Checkout domain for the e-commerce demo.
//!
//! This crate provides the checkout draft lifecycle:
//! - models for carts, shipping rates, and finalized checkouts
//! - the `ShippingProvider` and `OrdersService` capability traits with
//!   mock/in-memory implementations
//! - the `CheckoutService` orchestrator exposing get/update/submit
//!
//! A draft exists per customer from the first `update` until `submit`
//! deletes it; every `update` replaces the draft wholesale.

pub mod error;
pub mod model;
pub mod orders;
pub mod service;
pub mod shipping;
pub mod token;

pub use common::{CustomerId, Money};
pub use error::{CheckoutError, Result};
pub use model::{
    Checkout, CheckoutRequest, CheckoutSubmitted, Item, RequestedItem, ShippingAddress,
    ShippingRate, ShippingRates,
};
pub use orders::{InMemoryOrdersService, Order, OrderId, OrdersService};
pub use service::CheckoutService;
pub use shipping::{MockShippingProvider, ShippingProvider};
