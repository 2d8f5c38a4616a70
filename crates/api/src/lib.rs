//! HTTP API server with observability for the checkout service.
//!
//! Provides REST endpoints for the checkout draft lifecycle, with
//! structured logging (tracing) and Prometheus metrics.

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use draft_store::CheckoutRepository;
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use routes::checkout::AppState;

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<R: CheckoutRepository + 'static>(
    state: Arc<AppState<R>>,
    metrics_handle: PrometheusHandle,
) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check))
        .route("/checkout/{customer_id}", get(routes::checkout::get::<R>))
        .route(
            "/checkout/{customer_id}",
            post(routes::checkout::update::<R>),
        )
        .route(
            "/checkout/{customer_id}/submit",
            post(routes::checkout::submit::<R>),
        )
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Creates the default application state over the given repository,
/// wired with the mock shipping provider and in-memory orders service.
pub fn create_default_state<R: CheckoutRepository + 'static>(
    repository: R,
    shipping_prefix: &str,
) -> Arc<AppState<R>> {
    use checkout::{CheckoutService, InMemoryOrdersService, MockShippingProvider};

    let orders = InMemoryOrdersService::new();
    let shipping = MockShippingProvider::new(shipping_prefix);
    let checkout_service = CheckoutService::new(repository, orders.clone(), shipping);

    Arc::new(AppState {
        checkout_service,
        orders,
    })
}
