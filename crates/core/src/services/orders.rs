use std::sync::Arc;

use tracing::{info, instrument};

use crate::error::DomainError;
use crate::order::{CreateOrder, Order, OrderChanges};
use crate::repository::{OrderRepository, RepositoryError};
use crate::services::UserService;
use crate::types::{OrderId, UserId};

/// Order commands and queries.
///
/// Owner lookups go through [`UserService`] rather than the user repository,
/// so a missing owner is reported the same way everywhere.
#[derive(Clone)]
pub struct OrderService {
    orders: Arc<dyn OrderRepository>,
    users: UserService,
}

impl OrderService {
    #[must_use]
    pub fn new(orders: Arc<dyn OrderRepository>, users: UserService) -> Self {
        Self { orders, users }
    }

    /// Fetch an order by id.
    ///
    /// # Errors
    ///
    /// `DomainError::NotFound` if there is no such order.
    #[instrument(skip(self))]
    pub async fn get(&self, id: OrderId) -> Result<Order, DomainError> {
        self.orders
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::order_not_found(id))
    }

    /// All orders, ascending by id.
    ///
    /// # Errors
    ///
    /// `DomainError::Storage` if the store fails.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Order>, DomainError> {
        Ok(self.orders.find_all().await?)
    }

    /// Orders owned by a user. Empty for unknown users.
    ///
    /// # Errors
    ///
    /// `DomainError::Storage` if the store fails.
    #[instrument(skip(self))]
    pub async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Order>, DomainError> {
        Ok(self.orders.find_by_user(user_id).await?)
    }

    /// Create an order for an existing user and return its id.
    ///
    /// # Errors
    ///
    /// `DomainError::InvalidArgument` if no owner was given or the owner
    /// does not exist. Nothing is written in either case.
    #[instrument(skip(self, order), fields(user_id = ?order.user_id))]
    pub async fn create(&self, order: CreateOrder) -> Result<OrderId, DomainError> {
        let Some(user_id) = order.user_id else {
            info!("Rejected order without owner");
            return Err(DomainError::InvalidArgument(
                "user id is required".to_string(),
            ));
        };

        let owner = match self.users.get(user_id).await {
            Ok(user) => user,
            Err(DomainError::NotFound(message)) => {
                info!(user_id = %user_id, "Rejected order for unknown user");
                return Err(DomainError::InvalidArgument(message));
            }
            Err(e) => return Err(e),
        };

        let created = self
            .orders
            .insert(order.for_owner(owner.id))
            .await
            .map_err(|e| match e {
                // Owner deleted between the lookup and the insert.
                RepositoryError::Conflict(_) => {
                    DomainError::InvalidArgument(format!("User not found with id {user_id}"))
                }
                other => DomainError::Storage(other),
            })?;

        info!(order_id = %created.id, user_id = %user_id, "Created order");
        Ok(created.id)
    }

    /// Apply a partial update and return the stored result.
    ///
    /// # Errors
    ///
    /// `DomainError::NotFound` if there is no such order,
    /// `DomainError::InvalidArgument` if the delivery date would move
    /// earlier. A rejected update writes nothing.
    #[instrument(skip(self, changes))]
    pub async fn update(&self, id: OrderId, changes: OrderChanges) -> Result<Order, DomainError> {
        let mut order = self.orders.find_by_id(id).await?.ok_or_else(|| {
            DomainError::NotFound(format!("Order with id {id} not found"))
        })?;

        if let Err(e) = changes.apply_to(&mut order) {
            info!(order_id = %id, error = %e, "Rejected order update");
            return Err(e);
        }

        let saved = self.orders.update(&order).await.map_err(|e| match e {
            RepositoryError::NotFound => DomainError::order_not_found(id),
            RepositoryError::Conflict(_) => DomainError::InvalidArgument(
                "delivery date cannot be moved earlier".to_string(),
            ),
            other => DomainError::Storage(other),
        })?;

        info!(order_id = %id, "Updated order");
        Ok(saved)
    }

    /// Delete an order.
    ///
    /// # Errors
    ///
    /// `DomainError::NotFound` if there is no such order.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: OrderId) -> Result<(), DomainError> {
        if !self.orders.delete(id).await? {
            return Err(DomainError::order_not_found(id));
        }
        info!(order_id = %id, "Deleted order");
        Ok(())
    }
}
