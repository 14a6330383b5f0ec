//! User entity and the commands that create and change it.

use chrono::{DateTime, Utc};

use crate::error::DomainError;
use crate::types::UserId;

/// A registered user.
///
/// Orders are not embedded; fetch them with
/// [`OrderService::list_for_user`](crate::OrderService::list_for_user).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    /// Set by the store on insert.
    pub created_at: DateTime<Utc>,
    /// Set by the store on every write.
    pub updated_at: DateTime<Utc>,
}

/// Data for creating a user. The store assigns the id and timestamps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub email: String,
}

impl NewUser {
    /// Check that both fields carry a value.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidArgument` if either field is blank.
    pub fn validate(&self) -> Result<(), DomainError> {
        require_non_blank("username", &self.username)?;
        require_non_blank("email", &self.email)
    }
}

/// Partial update of a user. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserChanges {
    pub username: Option<String>,
    pub email: Option<String>,
}

impl UserChanges {
    /// Merge the present fields into `user`.
    ///
    /// Validation runs before any field is written, so a rejected change
    /// leaves `user` as it was.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidArgument` if a present field is blank.
    pub fn apply_to(self, user: &mut User) -> Result<(), DomainError> {
        if let Some(username) = &self.username {
            require_non_blank("username", username)?;
        }
        if let Some(email) = &self.email {
            require_non_blank("email", email)?;
        }

        if let Some(username) = self.username {
            user.username = username;
        }
        if let Some(email) = self.email {
            user.email = email;
        }
        Ok(())
    }
}

fn require_non_blank(field: &str, value: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::InvalidArgument(format!(
            "{field} must not be blank"
        )));
    }
    Ok(())
}
