//! Integration tests for the checkout API server.

use std::sync::{Arc, OnceLock};

use axum::body::Body;
use axum::http::{Request, StatusCode};
use draft_store::InMemoryCheckoutRepository;
use metrics_exporter_prometheus::PrometheusHandle;
use tower::ServiceExt;

static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

fn get_metrics_handle() -> PrometheusHandle {
    METRICS_HANDLE
        .get_or_init(|| {
            let builder = metrics_exporter_prometheus::PrometheusBuilder::new();
            builder
                .install_recorder()
                .expect("failed to install Prometheus recorder")
        })
        .clone()
}

fn setup() -> axum::Router {
    let (app, _) = setup_with_state();
    app
}

fn setup_with_state() -> (
    axum::Router,
    Arc<api::routes::checkout::AppState<InMemoryCheckoutRepository>>,
) {
    let repository = InMemoryCheckoutRepository::new();
    let state = api::create_default_state(repository, "");
    let app = api::create_app(state.clone(), get_metrics_handle());
    (app, state)
}

async fn post_json(
    app: &axum::Router,
    uri: &str,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_string(&body).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, json)
}

async fn get_json(app: &axum::Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, json)
}

fn address_json() -> serde_json::Value {
    serde_json::json!({
        "first_name": "Ada",
        "last_name": "Lovelace",
        "street": "12 Analytical Way",
        "city": "London",
        "state": "LDN",
        "postal_code": "N1 9GU",
        "country": "GB",
        "email": "ada@example.com"
    })
}

#[tokio::test]
async fn test_health_check() {
    let app = setup();

    let (status, json) = get_json(&app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn test_metrics_endpoint() {
    let app = setup();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/metrics")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_get_missing_checkout_is_404() {
    let app = setup();

    let (status, json) = get_json(&app, "/checkout/nobody").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(json["error"].as_str().is_some());
}

#[tokio::test]
async fn test_update_with_address_and_rate() {
    let app = setup();

    let (status, json) = post_json(
        &app,
        "/checkout/cust-001",
        serde_json::json!({
            "items": [{ "name": "Widget", "price_cents": 1000, "quantity": 2 }],
            "shipping_address": address_json(),
            "delivery_option_token": "priority-mail"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["subtotal_cents"], 2000);
    assert_eq!(json["tax_cents"], 500);
    assert_eq!(json["shipping_cents"], 1000);
    assert_eq!(json["total_cents"], 3500);
    assert_eq!(json["items"][0]["total_cost_cents"], 2000);
    assert_eq!(json["shipping_rates"]["rates"][0]["token"], "priority-mail");
    assert_eq!(json["payment_id"].as_str().unwrap().len(), 16);
    assert_eq!(json["payment_token"].as_str().unwrap().len(), 32);
}

#[tokio::test]
async fn test_update_without_address() {
    let app = setup();

    let (status, json) = post_json(
        &app,
        "/checkout/cust-002",
        serde_json::json!({
            "items": [{ "name": "Widget", "price_cents": 500, "quantity": 1 }]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["subtotal_cents"], 500);
    assert!(json["tax_cents"].is_null());
    assert!(json["shipping_cents"].is_null());
    assert!(json["shipping_rates"].is_null());
    assert_eq!(json["total_cents"], 500);
}

#[tokio::test]
async fn test_update_with_unmatched_token() {
    let app = setup();

    let (status, json) = post_json(
        &app,
        "/checkout/cust-003",
        serde_json::json!({
            "items": [{ "name": "Widget", "price_cents": 1000, "quantity": 1 }],
            "shipping_address": address_json(),
            "delivery_option_token": "carrier-pigeon"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(json["shipping_cents"].is_null());
    assert_eq!(json["total_cents"], 1500);
}

#[tokio::test]
async fn test_get_returns_updated_checkout() {
    let app = setup();

    let (_, updated) = post_json(
        &app,
        "/checkout/cust-004",
        serde_json::json!({
            "items": [{ "name": "Widget", "price_cents": 1000, "quantity": 2 }],
            "shipping_address": address_json(),
            "delivery_option_token": "priority-mail-express"
        }),
    )
    .await;

    let (status, fetched) = get_json(&app, "/checkout/cust-004").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, updated);
    assert_eq!(fetched["shipping_cents"], 2500);
    assert_eq!(fetched["total_cents"], 5000);
}

#[tokio::test]
async fn test_update_replaces_existing_draft() {
    let app = setup();

    post_json(
        &app,
        "/checkout/cust-005",
        serde_json::json!({
            "items": [{ "name": "Widget", "price_cents": 1000, "quantity": 2 }],
            "shipping_address": address_json(),
            "delivery_option_token": "priority-mail"
        }),
    )
    .await;

    let (status, json) = post_json(
        &app,
        "/checkout/cust-005",
        serde_json::json!({
            "items": [{ "name": "Gadget", "price_cents": 250, "quantity": 1 }]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["subtotal_cents"], 250);
    assert_eq!(json["total_cents"], 250);
    assert!(json["shipping_address"].is_null());
}

#[tokio::test]
async fn test_submit_missing_checkout_is_404() {
    let app = setup();

    let (status, json) = post_json(&app, "/checkout/nobody/submit", serde_json::json!({})).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(json["error"].as_str().is_some());
}

#[tokio::test]
async fn test_submit_creates_order_and_deletes_draft() {
    let (app, state) = setup_with_state();

    post_json(
        &app,
        "/checkout/cust-006",
        serde_json::json!({
            "items": [{ "name": "Widget", "price_cents": 1000, "quantity": 2 }],
            "shipping_address": address_json(),
            "delivery_option_token": "priority-mail"
        }),
    )
    .await;

    let (status, json) = post_json(&app, "/checkout/cust-006/submit", serde_json::json!({})).await;

    assert_eq!(status, StatusCode::OK);
    assert!(json["order_id"].as_str().is_some());
    assert_eq!(json["email"], "ada@example.com");
    assert_eq!(json["subtotal_cents"], 2000);
    assert_eq!(json["tax_cents"], 500);
    assert_eq!(json["shipping_cents"], 1000);
    assert_eq!(json["total_cents"], 3500);
    assert_eq!(state.orders.order_count(), 1);

    let (status, _) = get_json(&app, "/checkout/cust-006").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_failed_order_creation_preserves_draft() {
    let (app, state) = setup_with_state();

    post_json(
        &app,
        "/checkout/cust-007",
        serde_json::json!({
            "items": [{ "name": "Widget", "price_cents": 1000, "quantity": 1 }],
            "shipping_address": address_json()
        }),
    )
    .await;

    state.orders.set_fail_on_create(true);
    let (status, _) = post_json(&app, "/checkout/cust-007/submit", serde_json::json!({})).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);

    // Draft is still there; the submit can be retried.
    let (status, _) = get_json(&app, "/checkout/cust-007").await;
    assert_eq!(status, StatusCode::OK);

    state.orders.set_fail_on_create(false);
    let (status, _) = post_json(&app, "/checkout/cust-007/submit", serde_json::json!({})).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_malformed_body_is_client_error() {
    let app = setup();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/checkout/cust-008")
                .header("content-type", "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response.status().is_client_error());
}
