//! Order route handlers.

pub mod types;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, put},
};
use tracing::instrument;

use orderdesk_core::{CreateOrder, OrderId};

use crate::error::Result;
use crate::routes::extract::{ApiJson, ApiPath};
use crate::state::AppState;

pub use types::{CreateOrderRequest, OrderResponse, UpdateOrderRequest};

/// Build the order router (mounted at `/orders`).
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list))
        .route("/create", put(create))
        .route("/update/{id}", put(update))
        .route("/{id}", get(show).delete(delete))
}

/// List every order.
#[instrument(skip(state))]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<OrderResponse>>> {
    let orders = state.orders().list().await?;
    Ok(Json(orders.into_iter().map(OrderResponse::from).collect()))
}

/// Fetch one order.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<OrderId>,
) -> Result<Json<OrderResponse>> {
    let order = state.orders().get(id).await?;
    Ok(Json(order.into()))
}

/// Create an order and return its id.
#[instrument(skip(state, body))]
pub async fn create(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<CreateOrderRequest>,
) -> Result<Json<OrderId>> {
    let command = CreateOrder::try_from(body)?;
    let id = state.orders().create(command).await?;
    Ok(Json(id))
}

/// Change the delivery date and/or total of an order.
#[instrument(skip(state, body))]
pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<OrderId>,
    ApiJson(body): ApiJson<UpdateOrderRequest>,
) -> Result<Json<OrderResponse>> {
    let order = state.orders().update(id, body.into()).await?;
    Ok(Json(order.into()))
}

/// Delete an order.
#[instrument(skip(state))]
pub async fn delete(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<OrderId>,
) -> Result<StatusCode> {
    state.orders().delete(id).await?;
    Ok(StatusCode::OK)
}
