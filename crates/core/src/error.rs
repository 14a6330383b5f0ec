//! Domain error taxonomy.
//!
//! Every service operation fails with exactly one of these. The HTTP layer
//! maps them onto status codes; nothing below the services knows about HTTP.

use thiserror::Error;

use crate::repository::RepositoryError;

/// Errors returned by [`UserService`](crate::UserService) and
/// [`OrderService`](crate::OrderService).
#[derive(Debug, Error)]
pub enum DomainError {
    /// The addressed entity does not exist.
    #[error("{0}")]
    NotFound(String),

    /// The request breaks a business rule. Nothing was persisted.
    #[error("{0}")]
    InvalidArgument(String),

    /// The store failed for a reason unrelated to the request.
    #[error("storage failure: {0}")]
    Storage(#[from] RepositoryError),
}

impl DomainError {
    pub(crate) fn user_not_found(id: impl std::fmt::Display) -> Self {
        Self::NotFound(format!("User not found with id {id}"))
    }

    pub(crate) fn order_not_found(id: impl std::fmt::Display) -> Self {
        Self::NotFound(format!("Order not found with id {id}"))
    }
}
