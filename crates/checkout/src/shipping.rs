//! Shipping provider trait and mock implementation.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::error::CheckoutError;
use crate::model::{CheckoutRequest, ShippingRate, ShippingRates};
use crate::token;
use common::Money;

/// Trait for shipping-rate lookup.
///
/// `Ok(None)` means the provider had no rates to offer for this
/// request; `Err` is a provider failure that propagates to the caller.
#[async_trait]
pub trait ShippingProvider: Send + Sync {
    /// Quotes shipping options for a checkout request.
    async fn get_shipping_rates(
        &self,
        request: &CheckoutRequest,
    ) -> Result<Option<ShippingRates>, CheckoutError>;
}

#[derive(Debug, Default)]
struct MockShippingState {
    unavailable: bool,
    fail: bool,
    quote_count: u32,
}

/// Mock shipping provider returning two fixed-price options.
///
/// The configured prefix distinguishes provider instances in
/// multi-backend demos ("Mock1 Priority Mail" vs "Mock2 Priority
/// Mail"). Each quote carries a fresh random 32-char shipment ID.
#[derive(Debug, Clone)]
pub struct MockShippingProvider {
    prefix: String,
    state: Arc<RwLock<MockShippingState>>,
}

impl MockShippingProvider {
    /// Creates a mock provider with the given instance prefix.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            state: Arc::new(RwLock::new(MockShippingState::default())),
        }
    }

    /// Configures the provider to return no rates (Ok(None)).
    pub fn set_unavailable(&self, unavailable: bool) {
        self.state.write().unwrap().unavailable = unavailable;
    }

    /// Configures the provider to fail on the next quote.
    pub fn set_fail(&self, fail: bool) {
        self.state.write().unwrap().fail = fail;
    }

    /// Returns the number of quotes served.
    pub fn quote_count(&self) -> u32 {
        self.state.read().unwrap().quote_count
    }
}

impl Default for MockShippingProvider {
    fn default() -> Self {
        Self::new("")
    }
}

#[async_trait]
impl ShippingProvider for MockShippingProvider {
    async fn get_shipping_rates(
        &self,
        _request: &CheckoutRequest,
    ) -> Result<Option<ShippingRates>, CheckoutError> {
        let mut state = self.state.write().unwrap();

        if state.fail {
            return Err(CheckoutError::ShippingProvider(
                "Shipping provider unavailable".to_string(),
            ));
        }

        state.quote_count += 1;

        if state.unavailable {
            return Ok(None);
        }

        Ok(Some(ShippingRates {
            shipment_id: token::alphanumeric_token(token::SHIPMENT_ID_LEN),
            rates: vec![
                ShippingRate {
                    token: "priority-mail".to_string(),
                    name: format!("{}Priority Mail", self.prefix),
                    amount: Money::from_cents(1000),
                    estimated_days: 10,
                },
                ShippingRate {
                    token: "priority-mail-express".to_string(),
                    name: format!("{}Priority Mail Express", self.prefix),
                    amount: Money::from_cents(2500),
                    estimated_days: 5,
                },
            ],
        }))
    }
}
