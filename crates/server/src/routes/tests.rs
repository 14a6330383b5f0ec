//! Router-level tests over the in-memory store.

#![allow(clippy::unwrap_used)]

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use chrono::{Days, Utc};
use serde_json::{Value, json};
use tower::ServiceExt;

use crate::state::AppState;

use super::app;

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            request = request.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(request.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

async fn create_user(app: &Router) -> i64 {
    let (status, body) = send(
        app,
        "PUT",
        "/api/v1/users/create",
        Some(json!({ "username": "testuser", "email": "test@example.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body.as_i64().unwrap()
}

fn in_days(days: u64) -> String {
    (Utc::now().date_naive() + Days::new(days)).to_string()
}

async fn create_order(app: &Router, user_id: i64) -> i64 {
    let (status, body) = send(
        app,
        "PUT",
        "/api/v1/orders/create",
        Some(json!({
            "userId": user_id,
            "product_name": "Test Product",
            "delivery_date": in_days(7),
            "status": "CREATED",
            "total": 99.99,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body.as_i64().unwrap()
}

#[tokio::test]
async fn test_health() {
    let app = app(AppState::in_memory());
    let (status, _) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, "GET", "/health/ready", None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_user_lifecycle() {
    let app = app(AppState::in_memory());
    let id = create_user(&app).await;

    let (status, user) = send(&app, "GET", &format!("/api/v1/users/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(user["username"], "testuser");
    assert_eq!(user["email"], "test@example.com");
    assert!(user["createdAt"].is_string());
    assert!(user["updatedAt"].is_string());
    assert_eq!(user["orders"], json!([]));

    let (status, user) = send(
        &app,
        "PUT",
        &format!("/api/v1/users/update/{id}"),
        Some(json!({ "email": "new@example.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(user["username"], "testuser");
    assert_eq!(user["email"], "new@example.com");

    let (status, _) = send(&app, "DELETE", &format!("/api/v1/users/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, "GET", &format!("/api/v1/users/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], format!("User not found with id {id}"));
    assert_eq!(body["status"], 404);
}

#[tokio::test]
async fn test_create_user_with_empty_body() {
    let app = app(AppState::in_memory());
    let (status, _) = send(&app, "PUT", "/api/v1/users/create", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, "PUT", "/api/v1/users/create", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_missing_user() {
    let app = app(AppState::in_memory());
    let (status, _) = send(&app, "DELETE", "/api/v1/users/42", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_non_numeric_id() {
    let app = app(AppState::in_memory());
    let (status, body) = send(&app, "GET", "/api/v1/orders/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);
}

#[tokio::test]
async fn test_order_shape_and_user_embedding() {
    let app = app(AppState::in_memory());
    let user_id = create_user(&app).await;
    let order_id = create_order(&app, user_id).await;

    let (status, order) = send(&app, "GET", &format!("/api/v1/orders/{order_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        order,
        json!({
            "id": order_id,
            "userId": user_id,
            "productName": "Test Product",
            "deliveryDate": in_days(7),
            "status": "CREATED",
            "total": 99.99,
        })
    );

    let (_, users) = send(&app, "GET", "/api/v1/users", None).await;
    assert_eq!(users[0]["orders"][0]["id"], order_id);
}

#[tokio::test]
async fn test_create_order_without_user() {
    let app = app(AppState::in_memory());
    let body = json!({
        "product_name": "Test Product",
        "delivery_date": in_days(7),
        "status": "CREATED",
        "total": 99.99,
    });

    let (status, _) = send(&app, "PUT", "/api/v1/orders/create", Some(body.clone())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let mut with_null = body.clone();
    with_null["userId"] = Value::Null;
    let (status, _) = send(&app, "PUT", "/api/v1/orders/create", Some(with_null)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let mut unknown = body;
    unknown["userId"] = json!(999);
    let (status, _) = send(&app, "PUT", "/api/v1/orders/create", Some(unknown)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, orders) = send(&app, "GET", "/api/v1/orders", None).await;
    assert_eq!(orders, json!([]));
}

async fn get_raw(app: &Router, uri: &str) -> String {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn test_order_total_round_trips_exactly() {
    let app = app(AppState::in_memory());
    let user_id = create_user(&app).await;

    let raw = format!(
        r#"{{"userId":{user_id},"product_name":"Ledger","delivery_date":"{}","total":12345678901234567.89}}"#,
        in_days(1)
    );
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/api/v1/orders/create")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(raw))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let order_id: i64 = std::str::from_utf8(&bytes).unwrap().parse().unwrap();
    let uri = format!("/api/v1/orders/{order_id}");

    let body = get_raw(&app, &uri).await;
    assert!(body.contains(r#""total":12345678901234567.89"#), "{body}");

    let (status, _) = send(
        &app,
        "PUT",
        &format!("/api/v1/orders/update/{order_id}"),
        Some(json!({ "total": "98765432109876543.21" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let body = get_raw(&app, &uri).await;
    assert!(body.contains(r#""total":98765432109876543.21"#), "{body}");
}

#[tokio::test]
async fn test_create_order_with_empty_body() {
    let app = app(AppState::in_memory());
    let (status, _) = send(&app, "PUT", "/api/v1/orders/create", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_orders_listed_in_insertion_order() {
    let app = app(AppState::in_memory());
    let user_id = create_user(&app).await;
    let first = create_order(&app, user_id).await;
    let second = create_order(&app, user_id).await;

    let (status, orders) = send(&app, "GET", "/api/v1/orders", None).await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<i64> = orders
        .as_array()
        .unwrap()
        .iter()
        .map(|o| o["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![first, second]);
}

#[tokio::test]
async fn test_order_update_rules() {
    let app = app(AppState::in_memory());
    let user_id = create_user(&app).await;
    let id = create_order(&app, user_id).await;
    let uri = format!("/api/v1/orders/update/{id}");

    let (status, order) = send(&app, "PUT", &uri, Some(json!({ "total": 299.99 }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(order["total"], 299.99);
    assert_eq!(order["deliveryDate"], in_days(7));

    let (status, body) = send(
        &app,
        "PUT",
        &uri,
        Some(json!({ "delivery_date": in_days(0) })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "delivery date cannot be moved earlier");

    let (status, order) = send(
        &app,
        "PUT",
        &uri,
        Some(json!({ "delivery_date": in_days(7), "total": null })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(order["deliveryDate"], in_days(7));
    assert_eq!(order["total"], 299.99);
}

#[tokio::test]
async fn test_missing_order() {
    let app = app(AppState::in_memory());

    let (status, _) = send(&app, "GET", "/api/v1/orders/7", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(
        &app,
        "PUT",
        "/api/v1/orders/update/7",
        Some(json!({ "total": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Order with id 7 not found");

    let (status, _) = send(&app, "DELETE", "/api/v1/orders/7", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_deleting_user_removes_orders() {
    let app = app(AppState::in_memory());
    let user_id = create_user(&app).await;
    let order_id = create_order(&app, user_id).await;

    let (status, _) = send(&app, "DELETE", &format!("/api/v1/users/{user_id}"), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, "GET", &format!("/api/v1/orders/{order_id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
