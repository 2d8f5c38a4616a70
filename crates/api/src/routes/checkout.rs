//! Checkout draft endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use checkout::{
    Checkout, CheckoutRequest, CheckoutService, CheckoutSubmitted, InMemoryOrdersService, Item,
    MockShippingProvider, Money, RequestedItem, ShippingAddress,
};
use chrono::{DateTime, Utc};
use common::CustomerId;
use draft_store::CheckoutRepository;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Shared application state accessible from all handlers.
pub struct AppState<R: CheckoutRepository> {
    pub checkout_service: CheckoutService<R, InMemoryOrdersService, MockShippingProvider>,
    pub orders: InMemoryOrdersService,
}

// -- Request types --

#[derive(Deserialize)]
pub struct UpdateCheckoutRequest {
    #[serde(default)]
    pub items: Vec<ItemRequest>,
    pub shipping_address: Option<AddressDto>,
    pub delivery_option_token: Option<String>,
}

#[derive(Deserialize)]
pub struct ItemRequest {
    pub name: String,
    pub price_cents: i64,
    pub quantity: u32,
}

#[derive(Serialize, Deserialize)]
pub struct AddressDto {
    pub first_name: String,
    pub last_name: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
    pub email: String,
}

// -- Response types --

#[derive(Serialize)]
pub struct CheckoutResponse {
    pub items: Vec<ItemResponse>,
    pub shipping_address: Option<AddressDto>,
    pub shipping_rates: Option<ShippingRatesResponse>,
    pub delivery_option_token: Option<String>,
    pub shipping_cents: Option<i64>,
    pub tax_cents: Option<i64>,
    pub subtotal_cents: i64,
    pub total_cents: i64,
    pub payment_id: String,
    pub payment_token: String,
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize)]
pub struct ItemResponse {
    pub name: String,
    pub price_cents: i64,
    pub quantity: u32,
    pub total_cost_cents: i64,
}

#[derive(Serialize)]
pub struct ShippingRatesResponse {
    pub shipment_id: String,
    pub rates: Vec<ShippingRateResponse>,
}

#[derive(Serialize)]
pub struct ShippingRateResponse {
    pub token: String,
    pub name: String,
    pub amount_cents: i64,
    pub estimated_days: u32,
}

#[derive(Serialize)]
pub struct CheckoutSubmittedResponse {
    pub order_id: String,
    pub email: String,
    pub items: Vec<ItemResponse>,
    pub shipping_cents: Option<i64>,
    pub subtotal_cents: i64,
    pub tax_cents: Option<i64>,
    pub total_cents: i64,
}

// -- Conversions --

impl From<AddressDto> for ShippingAddress {
    fn from(dto: AddressDto) -> Self {
        ShippingAddress {
            first_name: dto.first_name,
            last_name: dto.last_name,
            street: dto.street,
            city: dto.city,
            state: dto.state,
            postal_code: dto.postal_code,
            country: dto.country,
            email: dto.email,
        }
    }
}

impl From<&ShippingAddress> for AddressDto {
    fn from(address: &ShippingAddress) -> Self {
        AddressDto {
            first_name: address.first_name.clone(),
            last_name: address.last_name.clone(),
            street: address.street.clone(),
            city: address.city.clone(),
            state: address.state.clone(),
            postal_code: address.postal_code.clone(),
            country: address.country.clone(),
            email: address.email.clone(),
        }
    }
}

impl From<UpdateCheckoutRequest> for CheckoutRequest {
    fn from(req: UpdateCheckoutRequest) -> Self {
        CheckoutRequest {
            items: req
                .items
                .into_iter()
                .map(|item| RequestedItem {
                    name: item.name,
                    price: Money::from_cents(item.price_cents),
                    quantity: item.quantity,
                })
                .collect(),
            shipping_address: req.shipping_address.map(Into::into),
            delivery_option_token: req.delivery_option_token,
        }
    }
}

fn item_responses(items: &[Item]) -> Vec<ItemResponse> {
    items
        .iter()
        .map(|item| ItemResponse {
            name: item.name.clone(),
            price_cents: item.price.cents(),
            quantity: item.quantity,
            total_cost_cents: item.total_cost.cents(),
        })
        .collect()
}

impl From<Checkout> for CheckoutResponse {
    fn from(checkout: Checkout) -> Self {
        CheckoutResponse {
            items: item_responses(&checkout.items),
            shipping_address: checkout.shipping_address.as_ref().map(Into::into),
            shipping_rates: checkout.shipping_rates.map(|quote| ShippingRatesResponse {
                shipment_id: quote.shipment_id,
                rates: quote
                    .rates
                    .into_iter()
                    .map(|rate| ShippingRateResponse {
                        token: rate.token,
                        name: rate.name,
                        amount_cents: rate.amount.cents(),
                        estimated_days: rate.estimated_days,
                    })
                    .collect(),
            }),
            delivery_option_token: checkout.delivery_option_token,
            shipping_cents: checkout.shipping.map(|m| m.cents()),
            tax_cents: checkout.tax.map(|m| m.cents()),
            subtotal_cents: checkout.subtotal.cents(),
            total_cents: checkout.total.cents(),
            payment_id: checkout.payment_id,
            payment_token: checkout.payment_token,
            updated_at: checkout.updated_at,
        }
    }
}

impl From<CheckoutSubmitted> for CheckoutSubmittedResponse {
    fn from(submitted: CheckoutSubmitted) -> Self {
        CheckoutSubmittedResponse {
            order_id: submitted.order_id.to_string(),
            email: submitted.email,
            items: item_responses(&submitted.items),
            shipping_cents: submitted.shipping.map(|m| m.cents()),
            subtotal_cents: submitted.subtotal.cents(),
            tax_cents: submitted.tax.map(|m| m.cents()),
            total_cents: submitted.total.cents(),
        }
    }
}

// -- Handlers --

/// GET /checkout/:customer_id — load the stored draft.
#[tracing::instrument(skip(state))]
pub async fn get<R: CheckoutRepository + 'static>(
    State(state): State<Arc<AppState<R>>>,
    Path(customer_id): Path<String>,
) -> Result<Json<CheckoutResponse>, ApiError> {
    let customer_id = CustomerId::new(customer_id);

    let draft = state
        .checkout_service
        .get(&customer_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("No checkout for customer {customer_id}")))?;

    Ok(Json(draft.into()))
}

/// POST /checkout/:customer_id — recompute and replace the draft.
#[tracing::instrument(skip(state, req))]
pub async fn update<R: CheckoutRepository + 'static>(
    State(state): State<Arc<AppState<R>>>,
    Path(customer_id): Path<String>,
    Json(req): Json<UpdateCheckoutRequest>,
) -> Result<Json<CheckoutResponse>, ApiError> {
    let customer_id = CustomerId::new(customer_id);

    let checkout = state
        .checkout_service
        .update(&customer_id, req.into())
        .await?;

    Ok(Json(checkout.into()))
}

/// POST /checkout/:customer_id/submit — finalize the draft into an order.
#[tracing::instrument(skip(state))]
pub async fn submit<R: CheckoutRepository + 'static>(
    State(state): State<Arc<AppState<R>>>,
    Path(customer_id): Path<String>,
) -> Result<Json<CheckoutSubmittedResponse>, ApiError> {
    let customer_id = CustomerId::new(customer_id);

    let submitted = state.checkout_service.submit(&customer_id).await?;

    Ok(Json(submitted.into()))
}
