//! Orders service trait and in-memory implementation.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CheckoutError;
use crate::model::Checkout;

/// Unique identifier for a created order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(Uuid);

impl OrderId {
    /// Creates a new random order ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates an order ID from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for OrderId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A created order, as returned by the orders service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
}

/// Trait for order creation.
///
/// Treated as an opaque, possibly-fallible remote call; the checkout
/// service does not retry on failure.
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Creates an order from a finalized checkout.
    async fn create(&self, checkout: &Checkout) -> Result<Order, CheckoutError>;
}

#[derive(Debug, Default)]
struct InMemoryOrdersState {
    orders: HashMap<OrderId, Checkout>,
    fail_on_create: bool,
}

/// In-memory orders service for testing and local runs.
#[derive(Debug, Clone, Default)]
pub struct InMemoryOrdersService {
    state: Arc<RwLock<InMemoryOrdersState>>,
}

impl InMemoryOrdersService {
    /// Creates a new in-memory orders service.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the service to fail on the next create call.
    pub fn set_fail_on_create(&self, fail: bool) {
        self.state.write().unwrap().fail_on_create = fail;
    }

    /// Returns the number of created orders.
    pub fn order_count(&self) -> usize {
        self.state.read().unwrap().orders.len()
    }

    /// Returns true if an order exists with the given ID.
    pub fn has_order(&self, order_id: OrderId) -> bool {
        self.state.read().unwrap().orders.contains_key(&order_id)
    }
}

#[async_trait]
impl OrdersService for InMemoryOrdersService {
    async fn create(&self, checkout: &Checkout) -> Result<Order, CheckoutError> {
        let mut state = self.state.write().unwrap();

        if state.fail_on_create {
            return Err(CheckoutError::OrdersService(
                "Order creation failed".to_string(),
            ));
        }

        let id = OrderId::new();
        state.orders.insert(id, checkout.clone());

        Ok(Order { id })
    }
}
