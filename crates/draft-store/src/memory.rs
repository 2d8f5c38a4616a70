use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{CheckoutRepository, Result};
use common::CustomerId;

/// In-memory checkout draft repository.
///
/// Stores drafts in a shared map and provides the same interface as
/// the PostgreSQL implementation. Used for tests and local runs.
#[derive(Clone, Default)]
pub struct InMemoryCheckoutRepository {
    drafts: Arc<RwLock<HashMap<CustomerId, String>>>,
}

impl InMemoryCheckoutRepository {
    /// Creates a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of drafts stored.
    pub async fn draft_count(&self) -> usize {
        self.drafts.read().await.len()
    }

    /// Clears all drafts.
    pub async fn clear(&self) {
        self.drafts.write().await.clear();
    }
}

#[async_trait]
impl CheckoutRepository for InMemoryCheckoutRepository {
    async fn get(&self, customer_id: &CustomerId) -> Result<Option<String>> {
        Ok(self.drafts.read().await.get(customer_id).cloned())
    }

    async fn set(&self, customer_id: &CustomerId, payload: String) -> Result<()> {
        self.drafts
            .write()
            .await
            .insert(customer_id.clone(), payload);
        Ok(())
    }

    async fn remove(&self, customer_id: &CustomerId) -> Result<()> {
        self.drafts.write().await.remove(customer_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn get_returns_none_for_unknown_customer() {
        let repo = InMemoryCheckoutRepository::new();
        let result = repo.get(&CustomerId::new("nobody")).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn set_then_get_round_trips() {
        let repo = InMemoryCheckoutRepository::new();
        let customer = CustomerId::new("cust-001");

        repo.set(&customer, r#"{"subtotal":2000}"#.to_string())
            .await
            .unwrap();

        let stored = repo.get(&customer).await.unwrap();
        assert_eq!(stored.as_deref(), Some(r#"{"subtotal":2000}"#));
        assert_eq!(repo.draft_count().await, 1);
    }

    #[tokio::test]
    async fn set_replaces_existing_draft() {
        let repo = InMemoryCheckoutRepository::new();
        let customer = CustomerId::new("cust-001");

        repo.set(&customer, "first".to_string()).await.unwrap();
        repo.set(&customer, "second".to_string()).await.unwrap();

        let stored = repo.get(&customer).await.unwrap();
        assert_eq!(stored.as_deref(), Some("second"));
        assert_eq!(repo.draft_count().await, 1);
    }

    #[tokio::test]
    async fn remove_deletes_draft() {
        let repo = InMemoryCheckoutRepository::new();
        let customer = CustomerId::new("cust-001");

        repo.set(&customer, "payload".to_string()).await.unwrap();
        repo.remove(&customer).await.unwrap();

        assert!(repo.get(&customer).await.unwrap().is_none());
        assert_eq!(repo.draft_count().await, 0);
    }

    #[tokio::test]
    async fn remove_absent_draft_is_ok() {
        let repo = InMemoryCheckoutRepository::new();
        repo.remove(&CustomerId::new("nobody")).await.unwrap();
    }

    #[tokio::test]
    async fn drafts_are_isolated_per_customer() {
        let repo = InMemoryCheckoutRepository::new();

        repo.set(&CustomerId::new("a"), "draft-a".to_string())
            .await
            .unwrap();
        repo.set(&CustomerId::new("b"), "draft-b".to_string())
            .await
            .unwrap();
        repo.remove(&CustomerId::new("a")).await.unwrap();

        assert!(repo.get(&CustomerId::new("a")).await.unwrap().is_none());
        assert_eq!(
            repo.get(&CustomerId::new("b")).await.unwrap().as_deref(),
            Some("draft-b")
        );
    }
}
