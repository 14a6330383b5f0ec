//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                       - Liveness check
//! GET    /health/ready                 - Readiness check (database reachable)
//!
//! # Users
//! GET    /api/v1/users                 - List users with their orders
//! GET    /api/v1/users/{id}            - User detail with orders
//! PUT    /api/v1/users/create          - Create user, returns id
//! PUT    /api/v1/users/update/{id}     - Partial update
//! DELETE /api/v1/users/{id}            - Delete user and its orders
//!
//! # Orders
//! GET    /api/v1/orders                - List orders
//! GET    /api/v1/orders/{id}           - Order detail
//! PUT    /api/v1/orders/create         - Create order, returns id
//! PUT    /api/v1/orders/update/{id}    - Change delivery date and/or total
//! DELETE /api/v1/orders/{id}           - Delete order
//! ```

pub mod extract;
pub mod orders;
pub mod users;

use axum::{Router, extract::State, http::StatusCode, routing::get};
use tower_http::trace::TraceLayer;

use crate::middleware::request_id_middleware;
use crate::state::AppState;

/// Create the versioned API routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/users", users::router())
        .nest("/orders", orders::router())
}

/// Build the complete application router with tracing and request ids.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .nest("/api/v1", api_routes())
        .with_state(state)
        .layer(axum::middleware::from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = tracing::field::Empty,
                )
            }),
        )
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Verifies database connectivity before returning OK.
/// Returns 503 Service Unavailable if the database is not reachable.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    let Some(pool) = state.pool() else {
        return StatusCode::OK;
    };
    match sqlx::query("SELECT 1").fetch_one(pool).await {
        Ok(_) => StatusCode::OK,
        Err(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}

#[cfg(test)]
mod tests;
