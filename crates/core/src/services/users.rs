use std::sync::Arc;

use tracing::{info, instrument};

use crate::error::DomainError;
use crate::repository::{RepositoryError, UserRepository};
use crate::types::UserId;
use crate::user::{NewUser, User, UserChanges};

/// User commands and queries.
#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserRepository>,
}

impl UserService {
    #[must_use]
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// Fetch a user by id.
    ///
    /// # Errors
    ///
    /// `DomainError::NotFound` if there is no such user.
    #[instrument(skip(self))]
    pub async fn get(&self, id: UserId) -> Result<User, DomainError> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::user_not_found(id))
    }

    /// All users, ascending by id.
    ///
    /// # Errors
    ///
    /// `DomainError::Storage` if the store fails.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<User>, DomainError> {
        Ok(self.users.find_all().await?)
    }

    /// Create a user and return its id.
    ///
    /// Usernames and emails are not required to be unique.
    ///
    /// # Errors
    ///
    /// `DomainError::InvalidArgument` if the username or email is blank.
    #[instrument(skip(self, user), fields(username = %user.username))]
    pub async fn create(&self, user: NewUser) -> Result<UserId, DomainError> {
        user.validate()?;
        let created = self.users.insert(user).await?;
        info!(user_id = %created.id, "Created user");
        Ok(created.id)
    }

    /// Apply a partial update and return the stored result.
    ///
    /// # Errors
    ///
    /// `DomainError::NotFound` if there is no such user,
    /// `DomainError::InvalidArgument` if a supplied field is blank.
    #[instrument(skip(self, changes))]
    pub async fn update(&self, id: UserId, changes: UserChanges) -> Result<User, DomainError> {
        let mut user = self.get(id).await?;
        if let Err(e) = changes.apply_to(&mut user) {
            info!(user_id = %id, error = %e, "Rejected user update");
            return Err(e);
        }

        let saved = self.users.update(&user).await.map_err(|e| match e {
            RepositoryError::NotFound => DomainError::user_not_found(id),
            other => DomainError::Storage(other),
        })?;
        info!(user_id = %id, "Updated user");
        Ok(saved)
    }

    /// Delete a user together with its orders.
    ///
    /// # Errors
    ///
    /// `DomainError::NotFound` if there is no such user.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: UserId) -> Result<(), DomainError> {
        if !self.users.delete(id).await? {
            return Err(DomainError::user_not_found(id));
        }
        info!(user_id = %id, "Deleted user");
        Ok(())
    }
}
