//! Persistence ports.
//!
//! Services hold these as `Arc<dyn ...>`. The server crate provides the
//! `PostgreSQL` implementations; [`crate::memory`] provides an in-memory one.

use async_trait::async_trait;
use thiserror::Error;

use crate::order::{NewOrder, Order};
use crate::types::{OrderId, UserId};
use crate::user::{NewUser, User};

/// Errors reported by repository implementations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(String),

    /// The row addressed by a write no longer exists.
    #[error("not found")]
    NotFound,

    /// The write was refused by a store-side guard or constraint.
    #[error("conflict: {0}")]
    Conflict(String),
}

#[cfg(feature = "postgres")]
impl From<sqlx::Error> for RepositoryError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => Self::NotFound,
            sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
                Self::Conflict(db.message().to_string())
            }
            other => Self::Database(other.to_string()),
        }
    }
}

/// Storage for users.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError>;

    /// All users in ascending id order.
    async fn find_all(&self) -> Result<Vec<User>, RepositoryError>;

    /// Insert a user, assigning its id and timestamps.
    async fn insert(&self, user: NewUser) -> Result<User, RepositoryError>;

    /// Overwrite the mutable fields of an existing user and bump `updated_at`.
    ///
    /// Fails with [`RepositoryError::NotFound`] if the row is gone.
    async fn update(&self, user: &User) -> Result<User, RepositoryError>;

    /// Delete a user and every order it owns. Returns `false` if no such user.
    async fn delete(&self, id: UserId) -> Result<bool, RepositoryError>;
}

/// Storage for orders.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn find_by_id(&self, id: OrderId) -> Result<Option<Order>, RepositoryError>;

    /// All orders in ascending id order.
    async fn find_all(&self) -> Result<Vec<Order>, RepositoryError>;

    /// Orders owned by `user_id`, ascending id order.
    async fn find_by_user(&self, user_id: UserId) -> Result<Vec<Order>, RepositoryError>;

    /// Insert an order, assigning its id.
    ///
    /// Fails with [`RepositoryError::Conflict`] if the owner does not exist.
    async fn insert(&self, order: NewOrder) -> Result<Order, RepositoryError>;

    /// Persist the delivery date and total of an existing order.
    ///
    /// Implementations must refuse to move the stored delivery date earlier
    /// ([`RepositoryError::Conflict`]), so a write based on a stale read
    /// cannot undo a concurrent forward move.
    async fn update(&self, order: &Order) -> Result<Order, RepositoryError>;

    /// Delete an order. Returns `false` if no such order.
    async fn delete(&self, id: OrderId) -> Result<bool, RepositoryError>;
}
