//! Integration tests for Order Desk.
//!
//! # Running Tests
//!
//! ```bash
//! # Start a server (in-memory is enough)
//! ORDERDESK_IN_MEMORY=true cargo run -p orderdesk-server
//!
//! # Run the ignored HTTP tests against it
//! ORDERDESK_BASE_URL=http://localhost:8080 cargo test -p orderdesk-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `users_api` - User endpoints
//! - `orders_api` - Order endpoints and the delivery-date rule

use chrono::{Days, Utc};
use reqwest::{Client, Response};
use serde_json::{Value, json};
use uuid::Uuid;

/// Base URL of the server under test (configurable via environment).
#[must_use]
pub fn base_url() -> String {
    std::env::var("ORDERDESK_BASE_URL").unwrap_or_else(|_| "http://localhost:8080".to_string())
}

/// Shared HTTP client and helpers for the API under `/api/v1`.
pub struct TestContext {
    pub client: Client,
    pub api: String,
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TestContext {
    #[must_use]
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            api: format!("{}/api/v1", base_url()),
        }
    }

    /// Absolute URL for a path below `/api/v1`.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.api)
    }

    /// Send a `PUT` with a JSON body.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be sent.
    pub async fn put_json(&self, path: &str, body: &Value) -> Response {
        self.client
            .put(self.url(path))
            .json(body)
            .send()
            .await
            .expect("Failed to send PUT request")
    }

    /// Send a `GET`.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be sent.
    pub async fn get(&self, path: &str) -> Response {
        self.client
            .get(self.url(path))
            .send()
            .await
            .expect("Failed to send GET request")
    }

    /// Send a `DELETE`.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be sent.
    pub async fn delete(&self, path: &str) -> Response {
        self.client
            .delete(self.url(path))
            .send()
            .await
            .expect("Failed to send DELETE request")
    }

    /// Create a user with a unique username and return its id.
    ///
    /// # Panics
    ///
    /// Panics if the server does not answer with an id.
    pub async fn create_user(&self) -> i64 {
        let suffix = Uuid::new_v4().simple().to_string();
        let body = json!({
            "username": format!("testuser-{suffix}"),
            "email": format!("test-{suffix}@example.com"),
        });
        let resp = self.put_json("/users/create", &body).await;
        assert!(resp.status().is_success(), "create user: {}", resp.status());
        resp.json::<i64>().await.expect("user id in response")
    }

    /// Create an order delivered `days` from today and return its id.
    ///
    /// # Panics
    ///
    /// Panics if the server does not answer with an id.
    pub async fn create_order(&self, user_id: i64, days: u64, total: f64) -> i64 {
        let body = json!({
            "userId": user_id,
            "product_name": "Test Product",
            "delivery_date": date_in_days(days),
            "status": "CREATED",
            "total": total,
        });
        let resp = self.put_json("/orders/create", &body).await;
        assert!(resp.status().is_success(), "create order: {}", resp.status());
        resp.json::<i64>().await.expect("order id in response")
    }
}

/// `YYYY-MM-DD` for today plus `days`.
#[must_use]
pub fn date_in_days(days: u64) -> String {
    (Utc::now().date_naive() + Days::new(days)).to_string()
}
