//! Router-level tests for the admin rewards routes.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header::CONTENT_TYPE};
use http_body_util::BodyExt;
use sea_orm::{ConnectOptions, Database};
use sea_orm_migration::MigratorTrait;
use std::sync::Arc;
use tower::ServiceExt;

use rewards_api::{AppState, create_router};
use rewards_db::migration::Migrator;

const SHOP: &str = "test-shop.myshopify.com";

async fn setup_app() -> Router {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1);

    let db = Database::connect(options)
        .await
        .expect("connect to in-memory sqlite");
    Migrator::up(&db, None).await.expect("run migrations");

    create_router(AppState { db: Arc::new(db) })
}

fn action_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/v1/rewards/actions")
        .header(CONTENT_TYPE, "application/json")
        .header("x-shopify-shop-domain", SHOP)
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn webhook_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/webhooks/orders/create")
        .header(CONTENT_TYPE, "application/json")
        .header("x-shopify-shop-domain", SHOP)
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn add_points_creates_customer_and_returns_refreshed_list() {
    let app = setup_app().await;

    let response = app
        .clone()
        .oneshot(action_request(
            r#"{
                "action": "add-points",
                "email": "a@x.com",
                "firstName": "Ada",
                "lastName": "Lovelace",
                "points": 50,
                "orderAmount": "49.99"
            }"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    let customers = body["customers"].as_array().unwrap();
    assert_eq!(customers.len(), 1);
    assert_eq!(customers[0]["email"], "a@x.com");
    assert_eq!(customers[0]["firstName"], "Ada");
    assert_eq!(customers[0]["totalPoints"], 50);
    assert_eq!(customers[0]["transactions"][0]["description"], "Order purchase");
}

#[tokio::test]
async fn add_points_rejects_bad_fields_with_422() {
    let app = setup_app().await;

    let missing_email = r#"{ "action": "add-points", "email": "", "points": 10 }"#;
    let zero_points = r#"{ "action": "add-points", "email": "a@x.com", "points": 0 }"#;
    let negative_points = r#"{ "action": "add-points", "email": "a@x.com", "points": -5 }"#;
    let non_numeric = r#"{ "action": "add-points", "email": "a@x.com", "points": "lots" }"#;

    for payload in [missing_email, zero_points, negative_points, non_numeric] {
        let response = app.clone().oneshot(action_request(payload)).await.unwrap();
        assert_eq!(
            response.status(),
            StatusCode::UNPROCESSABLE_ENTITY,
            "payload should be rejected: {payload}"
        );
    }

    // None of the rejected submissions touched the ledger.
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/v1/rewards/customers")
                .header("x-shopify-shop-domain", SHOP)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let body = json_body(response).await;
    assert_eq!(body["customers"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn remove_points_rejects_unknown_customer_with_422() {
    let app = setup_app().await;

    let response = app
        .clone()
        .oneshot(action_request(
            r#"{
                "action": "remove-points",
                "customerId": "00000000-0000-0000-0000-000000000000",
                "points": 10
            }"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = json_body(response).await;
    assert_eq!(body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn actions_without_shop_header_are_rejected() {
    let app = setup_app().await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/rewards/actions")
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(
                    r#"{ "action": "add-points", "email": "a@x.com", "points": 1 }"#,
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// End-to-end scenario: admin award, webhook award, admin redemption.
#[tokio::test]
async fn full_admin_and_webhook_lifecycle() {
    let app = setup_app().await;

    // Admin adds 50 points for a new email.
    let response = app
        .clone()
        .oneshot(action_request(
            r#"{ "action": "add-points", "email": "a@x.com", "points": 50 }"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["customers"][0]["totalPoints"], 50);
    assert_eq!(body["customers"][0]["transactionCount"], 1);
    let customer_id = body["customers"][0]["id"].as_str().unwrap().to_string();

    // Webhook for order #100, 12.40 spent, same email.
    let response = app
        .clone()
        .oneshot(webhook_request(
            r#"{
                "customer": { "email": "a@x.com" },
                "total_price": "12.40",
                "order_number": 100,
                "id": 100
            }"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Admin removes 20 points.
    let response = app
        .clone()
        .oneshot(action_request(&format!(
            r#"{{ "action": "remove-points", "customerId": "{customer_id}", "points": 20 }}"#
        )))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    let customer = &body["customers"][0];
    assert_eq!(customer["totalPoints"], 42);
    assert_eq!(customer["transactionCount"], 3);
    assert_eq!(customer["transactions"][0]["points"], -20);
    assert_eq!(customer["transactions"][0]["description"], "Points redeemed");
}
