//! End-to-end tests for the HTTP API over the in-memory store.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use ruua::build_router;
use ruua::config::AppConfig;
use ruua::services::admin_auth;
use ruua::state::AppState;

fn test_app() -> Router {
    build_router(AppState::in_memory(AppConfig::default()))
}

async fn secured_app() -> Router {
    let config = AppConfig {
        admin_password: Some("letmein".to_string()),
        admin_auth_required: true,
        jwt_secret: "integration-secret".to_string(),
        ..AppConfig::default()
    };
    let state = AppState::in_memory(config);
    admin_auth::seed_admin(state.store.as_ref(), &state.config)
        .await
        .unwrap();
    build_router(state)
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
    token: Option<&str>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
    (status, value)
}

async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, "POST", uri, Some(body), None).await
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, "GET", uri, None, None).await
}

fn offer_request(user_id: &str, amount: f64, recent_payments: i64) -> Value {
    json!({
        "user_id": user_id,
        "order_amount": amount,
        "recent_payments": recent_payments,
        "failed_payments_last_30_days": 0,
        "device_country": "US",
        "billing_country": "US",
        "employer_enrolled": true,
        "salary_monthly": 5000.0
    })
}

fn fraud_request(amount: f64, device: &str, billing: &str, devices: i64, failed: i64) -> Value {
    json!({
        "user_id": "fraud_user",
        "transaction_amount": amount,
        "device_country": device,
        "billing_country": billing,
        "device_count": devices,
        "failed_payments_last_30_days": failed
    })
}

#[tokio::test]
async fn test_root_endpoint() {
    let app = test_app();
    let (status, body) = get(&app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["message"].as_str().unwrap().contains("Ruua API is running"));
}

#[tokio::test]
async fn test_health_reports_memory_store() {
    let app = test_app();
    let (status, body) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["store"], "memory");
    assert_eq!(body["database"], "connected");
}

#[tokio::test]
async fn test_create_offer_instant_approval() {
    let app = test_app();
    let (status, body) = post(&app, "/api/offer", offer_request("test_user_1", 150.0, 5)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "approved");
    assert_eq!(body["amount_offered"], 150.0);
    assert_eq!(body["term_months"], 1);
    assert_eq!(body["interest_rate"], 3.0);
    assert_eq!(body["monthly_payment"], 154.5);
    assert!(!body["offer_id"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_create_offer_installment_approval() {
    let app = test_app();
    let (status, body) = post(&app, "/api/offer", offer_request("test_user_2", 800.0, 5)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "approved_installments");
    assert_eq!(body["amount_offered"], 800.0);
    assert_eq!(body["term_months"], 2);
    assert_eq!(body["interest_rate"], 4.0);
    assert_eq!(body["monthly_payment"], 402.67);
}

#[tokio::test]
async fn test_create_offer_manual_review() {
    let app = test_app();
    let (status, body) = post(&app, "/api/offer", offer_request("test_user_3", 1500.0, 1)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "manual_review");
    assert_eq!(body["amount_offered"], 0.0);
    assert_eq!(body["term_months"], 0);
}

#[tokio::test]
async fn test_offer_without_salary_is_accepted() {
    let app = test_app();
    let mut request = offer_request("no_salary", 50.0, 0);
    request.as_object_mut().unwrap().remove("salary_monthly");

    let (status, body) = post(&app, "/api/offer", request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "approved");
}

#[tokio::test]
async fn test_offer_validation_failures() {
    let app = test_app();

    let (status, body) = post(&app, "/api/offer", offer_request("u", 0.0, 1)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Validation failed");

    let (status, _) = post(&app, "/api/offer", offer_request("u", -5.0, 1)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = post(&app, "/api/offer", offer_request("u", 100.0, -1)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = post(&app, "/api/offer", offer_request("", 100.0, 1)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = post(&app, "/api/offer", json!({ "user_id": "u" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("Invalid JSON data"));
}

#[tokio::test]
async fn test_process_payment() {
    let app = test_app();
    let (_, offer) = post(&app, "/api/offer", offer_request("test_user_4", 100.0, 3)).await;
    let offer_id = offer["offer_id"].as_str().unwrap();

    let (status, body) = post(&app, "/api/pay", json!({ "offer_id": offer_id })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Payment processed successfully");
    let transaction_id = body["transaction_id"].as_str().unwrap().to_string();

    let (status, transactions) = get(&app, "/admin/transactions").await;
    assert_eq!(status, StatusCode::OK);
    let transactions = transactions.as_array().unwrap();
    assert_eq!(transactions.len(), 1);
    assert_eq!(transactions[0]["transaction_id"], transaction_id);
    assert_eq!(transactions[0]["offer_id"], offer_id);
    assert_eq!(transactions[0]["amount"], 100.0);
    assert_eq!(transactions[0]["status"], "completed");
    assert_eq!(transactions[0]["user_id"], "test_user_4");
}

#[tokio::test]
async fn test_payment_on_manual_review_offer_rejected() {
    let app = test_app();
    let (_, offer) = post(&app, "/api/offer", offer_request("reviewed", 5000.0, 0)).await;
    assert_eq!(offer["status"], "manual_review");

    let (status, body) = post(&app, "/api/pay", json!({ "offer_id": offer["offer_id"] })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Offer is not approved for payment");

    let (_, transactions) = get(&app, "/admin/transactions").await;
    assert!(transactions.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_payment_on_unknown_offer_not_found() {
    let app = test_app();
    let (status, body) = post(&app, "/api/pay", json!({ "offer_id": "missing" })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Offer not found");
}

#[tokio::test]
async fn test_payment_requires_offer_id() {
    let app = test_app();
    let (status, _) = post(&app, "/api/pay", json!({ "offer_id": "" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_fraud_check_approved() {
    let app = test_app();
    let (status, body) = post(&app, "/api/fraud-check", fraud_request(200.0, "US", "US", 1, 0)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "approved");
    assert_eq!(body["action"], "allow");
    assert_eq!(body["fraud_score"], 0);
    assert!(body["flags"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_fraud_check_flagged() {
    let app = test_app();
    let (status, body) = post(&app, "/api/fraud-check", fraud_request(1000.0, "US", "CA", 5, 5)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "flagged");
    assert_eq!(body["action"], "block");
    assert!(body["fraud_score"].as_i64().unwrap() >= 50);
    assert_eq!(
        body["flags"],
        json!([
            "Device and billing country mismatch",
            "High number of failed payments in last 30 days",
            "Multiple devices detected"
        ])
    );
}

#[tokio::test]
async fn test_fraud_check_suspicious() {
    let app = test_app();
    let (_, body) = post(&app, "/api/fraud-check", fraud_request(100.0, "DE", "FR", 1, 0)).await;
    assert_eq!(body["status"], "suspicious");
    assert_eq!(body["action"], "review");
    assert_eq!(body["fraud_score"], 30);
}

#[tokio::test]
async fn test_fraud_check_validation() {
    let app = test_app();
    let (status, _) = post(&app, "/api/fraud-check", fraud_request(100.0, "US", "US", 0, 0)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = post(&app, "/api/fraud-check", fraud_request(0.0, "US", "US", 1, 0)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_admin_listings_in_arrival_order() {
    let app = test_app();
    for (i, amount) in [50.0, 800.0, 1500.0].into_iter().enumerate() {
        post(&app, "/api/offer", offer_request(&format!("user_{}", i), amount, 5)).await;
    }
    post(&app, "/api/fraud-check", fraud_request(10.0, "US", "US", 1, 0)).await;

    let (status, offers) = get(&app, "/admin/offers").await;
    assert_eq!(status, StatusCode::OK);
    let statuses: Vec<_> = offers
        .as_array()
        .unwrap()
        .iter()
        .map(|o| o["status"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(statuses, vec!["approved", "approved_installments", "manual_review"]);

    let (_, page) = get(&app, "/admin/offers?skip=1&limit=1").await;
    let page = page.as_array().unwrap();
    assert_eq!(page.len(), 1);
    assert_eq!(page[0]["user_id"], "user_1");

    let (_, checks) = get(&app, "/admin/fraud-checks").await;
    assert_eq!(checks.as_array().unwrap().len(), 1);

    let (_, users) = get(&app, "/admin/users").await;
    assert_eq!(users.as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_admin_listing_rejects_bad_pagination() {
    let app = test_app();
    let (status, _) = get(&app, "/admin/offers?limit=0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = get(&app, "/admin/offers?skip=-1").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = get(&app, "/admin/offers?limit=abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_admin_summary() {
    let app = test_app();
    let (_, offer) = post(&app, "/api/offer", offer_request("sum_user", 100.0, 0)).await;
    post(&app, "/api/pay", json!({ "offer_id": offer["offer_id"] })).await;
    post(&app, "/api/offer", offer_request("sum_user", 5000.0, 0)).await;
    post(&app, "/api/fraud-check", fraud_request(1000.0, "US", "CA", 5, 5)).await;

    let (status, summary) = get(&app, "/admin/summary").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["total_offers"], 2);
    assert_eq!(summary["total_transactions"], 1);
    assert_eq!(summary["total_fraud_checks"], 1);
    assert_eq!(summary["total_processed"], 100.0);
    assert_eq!(summary["offer_status_counts"]["approved"], 1);
    assert_eq!(summary["offer_status_counts"]["manual_review"], 1);
    assert_eq!(summary["fraud_status_counts"]["flagged"], 1);
}

#[tokio::test]
async fn test_register_user_and_duplicate() {
    let app = test_app();
    let user = json!({
        "user_id": "reg_1",
        "email": "reg1@example.com",
        "phone": "+15550100",
        "country": "US"
    });

    let (status, body) = post(&app, "/api/users", user.clone()).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["is_verified"], false);

    let (status, _) = post(&app, "/api/users", user).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = post(
        &app,
        "/api/users",
        json!({ "user_id": "reg_2", "email": "not-an-email", "country": "US" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_offer_requester_can_register_later() {
    let app = test_app();
    let (status, _) = post(&app, "/api/offer", offer_request("alice", 150.0, 0)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = post(
        &app,
        "/api/users",
        json!({ "user_id": "alice", "email": "alice@example.com", "country": "US" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["email"], "alice@example.com");

    let (_, users) = get(&app, "/admin/users").await;
    let users = users.as_array().unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0]["email"], "alice@example.com");

    let (status, _) = post(
        &app,
        "/api/users",
        json!({ "user_id": "alice", "email": "alice2@example.com", "country": "US" }),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_blank_countries_rejected() {
    let app = test_app();
    let (status, body) = post(&app, "/api/fraud-check", fraud_request(100.0, "  ", " ", 1, 0)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("device_country"));

    let mut offer = offer_request("u", 100.0, 0);
    offer["billing_country"] = json!("\t");
    let (status, _) = post(&app, "/api/offer", offer).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = post(
        &app,
        "/api/users",
        json!({ "user_id": "   ", "email": "x@example.com", "country": "US" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_csv_export() {
    let app = test_app();
    post(&app, "/api/offer", offer_request("csv_user", 120.0, 0)).await;

    let request = Request::builder()
        .uri("/admin/export/offers")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers()[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("text/csv"));
    assert!(response.headers()[header::CONTENT_DISPOSITION]
        .to_str()
        .unwrap()
        .contains("offers_"));

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let csv = String::from_utf8(bytes.to_vec()).unwrap();
    let mut lines = csv.lines();
    assert!(lines.next().unwrap().starts_with("offer_id,user_id,order_amount,status"));
    assert!(lines.next().unwrap().contains("csv_user,120.0,approved"));
}

#[tokio::test]
async fn test_fraud_csv_export() {
    let app = test_app();
    post(&app, "/api/fraud-check", fraud_request(1000.0, "US", "CA", 1, 0)).await;

    let (status, body) = get(&app, "/admin/export/fraud-checks").await;
    assert_eq!(status, StatusCode::OK);
    let csv = body.as_str().unwrap();
    assert!(csv.contains("Device and billing country mismatch"));
    assert!(csv.contains("suspicious"));
}

#[tokio::test]
async fn test_dashboard_renders() {
    let app = test_app();
    post(&app, "/api/offer", offer_request("dash_user", 120.0, 0)).await;

    let (status, body) = get(&app, "/dashboard").await;
    assert_eq!(status, StatusCode::OK);
    let html = body.as_str().unwrap();
    assert!(html.contains("Ruua - Embedded Finance Platform"));
    assert!(html.contains("dash_user"));
}

#[tokio::test]
async fn test_admin_routes_require_token_when_enabled() {
    let app = secured_app().await;

    let (status, body) = get(&app, "/admin/offers").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Authentication failed");

    let (status, _) = get(&app, "/dashboard").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, "GET", "/admin/offers", None, Some("garbage")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = post(
        &app,
        "/admin/login",
        json!({ "username": "admin", "password": "wrong" }),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, login) = post(
        &app,
        "/admin/login",
        json!({ "username": "admin", "password": "letmein" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let token = login["token"].as_str().unwrap();

    let (status, offers) = send(&app, "GET", "/admin/offers", None, Some(token)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(offers.as_array().unwrap().is_empty());

    // Public API stays open.
    let (status, _) = post(&app, "/api/offer", offer_request("open", 10.0, 0)).await;
    assert_eq!(status, StatusCode::OK);
}
