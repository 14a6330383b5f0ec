//! User route handlers.

pub mod types;

use std::collections::HashMap;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, put},
};
use tracing::instrument;

use orderdesk_core::{Order, UserId};

use crate::error::Result;
use crate::routes::extract::{ApiJson, ApiPath};
use crate::state::AppState;

pub use types::{CreateUserRequest, UpdateUserRequest, UserResponse};

/// Build the user router (mounted at `/users`).
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list))
        .route("/create", put(create))
        .route("/update/{id}", put(update))
        .route("/{id}", get(show).delete(delete))
}

/// List every user with its orders.
#[instrument(skip(state))]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<UserResponse>>> {
    let users = state.users().list().await?;

    // One pass over all orders instead of a query per user.
    let mut by_owner: HashMap<UserId, Vec<Order>> = HashMap::new();
    for order in state.orders().list().await? {
        by_owner.entry(order.user_id).or_default().push(order);
    }

    let body = users
        .into_iter()
        .map(|user| {
            let orders = by_owner.remove(&user.id).unwrap_or_default();
            UserResponse::new(user, orders)
        })
        .collect();
    Ok(Json(body))
}

/// Fetch one user with its orders.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<UserId>,
) -> Result<Json<UserResponse>> {
    let user = state.users().get(id).await?;
    let orders = state.orders().list_for_user(id).await?;
    Ok(Json(UserResponse::new(user, orders)))
}

/// Create a user and return its id.
#[instrument(skip(state, body))]
pub async fn create(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<CreateUserRequest>,
) -> Result<Json<UserId>> {
    let id = state.users().create(body.into()).await?;
    Ok(Json(id))
}

/// Change the username and/or email of a user.
#[instrument(skip(state, body))]
pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<UserId>,
    ApiJson(body): ApiJson<UpdateUserRequest>,
) -> Result<Json<UserResponse>> {
    let user = state.users().update(id, body.into()).await?;
    let orders = state.orders().list_for_user(id).await?;
    Ok(Json(UserResponse::new(user, orders)))
}

/// Delete a user and its orders.
#[instrument(skip(state))]
pub async fn delete(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<UserId>,
) -> Result<StatusCode> {
    state.users().delete(id).await?;
    Ok(StatusCode::OK)
}
