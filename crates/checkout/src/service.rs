//! Checkout service orchestrating pricing, shipping quotes, and the
//! draft lifecycle.

use common::{CustomerId, Money};
use draft_store::CheckoutRepository;

use crate::error::{CheckoutError, Result};
use crate::model::{Checkout, CheckoutRequest, CheckoutSubmitted, Item};
use crate::orders::OrdersService;
use crate::shipping::ShippingProvider;
use crate::token;

/// Flat tax in cents, charged as soon as a shipping address is known.
const FLAT_TAX_CENTS: i64 = 500;

/// Orchestrates checkout operations over injected collaborators.
///
/// `get` reads the stored draft, `update` recomputes and replaces it
/// wholesale, and `submit` converts it into an order and deletes it.
pub struct CheckoutService<R, O, P>
where
    R: CheckoutRepository,
    O: OrdersService,
    P: ShippingProvider,
{
    repository: R,
    orders: O,
    shipping: P,
}

impl<R, O, P> CheckoutService<R, O, P>
where
    R: CheckoutRepository,
    O: OrdersService,
    P: ShippingProvider,
{
    /// Creates a new checkout service with the given collaborators.
    pub fn new(repository: R, orders: O, shipping: P) -> Self {
        Self {
            repository,
            orders,
            shipping,
        }
    }

    /// Fetches the stored draft for a customer.
    ///
    /// An absent draft is `Ok(None)`, not an error.
    #[tracing::instrument(skip(self))]
    pub async fn get(&self, customer_id: &CustomerId) -> Result<Option<Checkout>> {
        let Some(payload) = self.repository.get(customer_id).await? else {
            return Ok(None);
        };

        Ok(Some(serde_json::from_str(&payload)?))
    }

    /// Recomputes a full checkout from the request and persists it,
    /// replacing any prior draft.
    ///
    /// Totals are always computed fresh, never adjusted incrementally.
    /// The repository write is the terminal step, so a failed write
    /// leaves whatever draft was stored before untouched.
    #[tracing::instrument(skip(self, request))]
    pub async fn update(
        &self,
        customer_id: &CustomerId,
        request: CheckoutRequest,
    ) -> Result<Checkout> {
        metrics::counter!("checkout_updates_total").increment(1);
        let started = std::time::Instant::now();

        let mut subtotal = Money::zero();
        let items: Vec<Item> = request
            .items
            .iter()
            .map(|requested| {
                let item = Item::priced(requested.name.clone(), requested.price, requested.quantity);
                subtotal += item.total_cost;
                item
            })
            .collect();

        let tax = request
            .shipping_address
            .as_ref()
            .map(|_| Money::from_cents(FLAT_TAX_CENTS));

        let mut shipping = None;
        let mut shipping_rates = None;

        if request.shipping_address.is_some() {
            shipping_rates = self.shipping.get_shipping_rates(&request).await?;

            if let (Some(rates), Some(selected)) = (&shipping_rates, &request.delivery_option_token)
            {
                // Full scan; a duplicate token resolves to the last
                // occurrence, and providers do not guarantee
                // duplicate-free responses.
                for rate in &rates.rates {
                    if rate.token == *selected {
                        shipping = Some(rate.amount);
                    }
                }
            }
        }

        let total = subtotal + tax.unwrap_or_default() + shipping.unwrap_or_default();

        let checkout = Checkout {
            items,
            shipping_address: request.shipping_address,
            shipping_rates,
            delivery_option_token: request.delivery_option_token,
            shipping,
            tax,
            subtotal,
            total,
            payment_id: token::alphanumeric_token(token::PAYMENT_ID_LEN),
            payment_token: token::alphanumeric_token(token::PAYMENT_TOKEN_LEN),
            updated_at: chrono::Utc::now(),
        };

        let payload = serde_json::to_string(&checkout)?;
        self.repository.set(customer_id, payload).await?;

        metrics::histogram!("checkout_update_duration_seconds")
            .record(started.elapsed().as_secs_f64());

        Ok(checkout)
    }

    /// Finalizes the draft into an order and deletes it.
    ///
    /// Draft removal happens strictly after order creation succeeds,
    /// so a failed creation leaves the draft available for a retried
    /// submit.
    #[tracing::instrument(skip(self))]
    pub async fn submit(&self, customer_id: &CustomerId) -> Result<CheckoutSubmitted> {
        metrics::counter!("checkout_submits_total").increment(1);

        let checkout = self
            .get(customer_id)
            .await?
            .ok_or_else(|| CheckoutError::NotFound(customer_id.clone()))?;

        let order = self.orders.create(&checkout).await?;

        self.repository.remove(customer_id).await?;

        tracing::info!(%customer_id, order_id = %order.id, total = %checkout.total, "checkout submitted");

        Ok(CheckoutSubmitted {
            order_id: order.id,
            email: checkout
                .shipping_address
                .as_ref()
                .map(|address| address.email.clone())
                .unwrap_or_default(),
            items: checkout.items,
            shipping: checkout.shipping,
            subtotal: checkout.subtotal,
            tax: checkout.tax,
            total: checkout.total,
        })
    }
}
