//! Models for the checkout draft lifecycle.

use chrono::{DateTime, Utc};
use common::Money;
use serde::{Deserialize, Serialize};

use crate::orders::OrderId;

/// A priced line item in a checkout.
///
/// `total_cost` is computed from price and quantity, never set
/// independently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Human-readable product name.
    pub name: String,

    /// Price per unit in cents.
    pub price: Money,

    /// Quantity ordered.
    pub quantity: u32,

    /// Line total (price * quantity).
    pub total_cost: Money,
}

impl Item {
    /// Creates an item with its line total computed.
    pub fn priced(name: impl Into<String>, price: Money, quantity: u32) -> Self {
        Self {
            name: name.into(),
            price,
            quantity,
            total_cost: price.multiply(quantity),
        }
    }
}

/// Free-form contact and delivery address for a checkout.
///
/// Presence of an address drives tax and shipping-rate eligibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingAddress {
    pub first_name: String,
    pub last_name: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
    pub email: String,
}

/// One shipping option offered by a provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingRate {
    /// Unique selector for this rate within a quote.
    pub token: String,

    /// Human-readable option name.
    pub name: String,

    /// Cost of this option in cents.
    pub amount: Money,

    /// Estimated delivery time in days.
    pub estimated_days: u32,
}

/// A shipping-rate quote: an opaque shipment identifier plus the
/// offered rates, in provider order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingRates {
    pub shipment_id: String,
    pub rates: Vec<ShippingRate>,
}

/// An item as submitted by the caller, before pricing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestedItem {
    pub name: String,
    pub price: Money,
    pub quantity: u32,
}

/// The caller's view of a checkout: cart contents, optional address,
/// and an optionally selected delivery option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutRequest {
    pub items: Vec<RequestedItem>,
    pub shipping_address: Option<ShippingAddress>,
    pub delivery_option_token: Option<String>,
}

/// The per-customer checkout draft.
///
/// Replaced wholesale by every update; `tax` and `shipping` are `None`
/// until determined (no address yet, or no rate matched) and count as
/// zero in the total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkout {
    pub items: Vec<Item>,
    pub shipping_address: Option<ShippingAddress>,
    pub shipping_rates: Option<ShippingRates>,
    pub delivery_option_token: Option<String>,
    pub shipping: Option<Money>,
    pub tax: Option<Money>,
    pub subtotal: Money,
    pub total: Money,
    /// Regenerated on every update (16 chars).
    pub payment_id: String,
    /// Regenerated on every update (32 chars).
    pub payment_token: String,
    pub updated_at: DateTime<Utc>,
}

impl Checkout {
    /// Tax as charged: zero while not yet determined.
    pub fn effective_tax(&self) -> Money {
        self.tax.unwrap_or_default()
    }

    /// Shipping as charged: zero while no rate is selected.
    pub fn effective_shipping(&self) -> Money {
        self.shipping.unwrap_or_default()
    }
}

/// Immutable result of finalizing a checkout into an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutSubmitted {
    pub order_id: OrderId,
    pub email: String,
    pub items: Vec<Item>,
    pub shipping: Option<Money>,
    pub subtotal: Money,
    pub tax: Option<Money>,
    pub total: Money,
}
