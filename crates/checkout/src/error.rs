//! Checkout error types.

use common::CustomerId;
use draft_store::StoreError;
use thiserror::Error;

/// Errors that can occur during checkout operations.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// No draft exists for the customer.
    #[error("Checkout not found for customer {0}")]
    NotFound(CustomerId),

    /// Shipping provider error.
    #[error("Shipping provider error: {0}")]
    ShippingProvider(String),

    /// Orders service error.
    #[error("Orders service error: {0}")]
    OrdersService(String),

    /// Draft store error.
    #[error("Draft store error: {0}")]
    Store(#[from] StoreError),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience type alias for checkout results.
pub type Result<T> = std::result::Result<T, CheckoutError>;
