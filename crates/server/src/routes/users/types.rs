//! Wire types for the user endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use orderdesk_core::{NewUser, Order, User, UserChanges, UserId};

use crate::routes::orders::OrderResponse;

/// User as returned by the API, with the orders it owns.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub orders: Vec<OrderResponse>,
}

impl UserResponse {
    #[must_use]
    pub fn new(user: User, orders: Vec<Order>) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            created_at: user.created_at,
            updated_at: user.updated_at,
            orders: orders.into_iter().map(OrderResponse::from).collect(),
        }
    }
}

/// Body of `PUT /users/create`. Missing fields are treated as blank and
/// rejected by the service.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub username: Option<String>,
    pub email: Option<String>,
}

impl From<CreateUserRequest> for NewUser {
    fn from(body: CreateUserRequest) -> Self {
        Self {
            username: body.username.unwrap_or_default(),
            email: body.email.unwrap_or_default(),
        }
    }
}

/// Body of `PUT /users/update/{id}`.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateUserRequest {
    pub username: Option<String>,
    pub email: Option<String>,
}

impl From<UpdateUserRequest> for UserChanges {
    fn from(body: UpdateUserRequest) -> Self {
        Self {
            username: body.username,
            email: body.email,
        }
    }
}
