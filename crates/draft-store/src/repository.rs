use async_trait::async_trait;

use crate::Result;
use common::CustomerId;

/// Core trait for checkout draft repositories.
///
/// A repository maps a customer to at most one serialized draft. The
/// payload format is opaque to the store; callers are responsible for
/// lossless round-tripping. All implementations must be thread-safe
/// (Send + Sync).
#[async_trait]
pub trait CheckoutRepository: Send + Sync {
    /// Retrieves the serialized draft for a customer, if one exists.
    async fn get(&self, customer_id: &CustomerId) -> Result<Option<String>>;

    /// Stores the serialized draft for a customer, replacing any
    /// previously stored draft.
    async fn set(&self, customer_id: &CustomerId, payload: String) -> Result<()>;

    /// Removes the draft for a customer. Removing an absent draft is
    /// not an error.
    async fn remove(&self, customer_id: &CustomerId) -> Result<()>;
}
