//! Order entity and the commands that create and change it.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::error::DomainError;
use crate::types::{OrderId, OrderStatus, UserId};

/// An order placed by a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub id: OrderId,
    /// Owning user. Fixed at creation.
    pub user_id: UserId,
    pub product_name: String,
    pub delivery_date: NaiveDate,
    pub status: OrderStatus,
    pub total: Decimal,
}

/// Order creation request as it arrives from a caller.
///
/// The owner is optional here because callers can omit it; the service
/// rejects that before touching storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateOrder {
    pub user_id: Option<UserId>,
    pub product_name: String,
    pub delivery_date: NaiveDate,
    pub status: OrderStatus,
    pub total: Decimal,
}

impl CreateOrder {
    pub(crate) fn for_owner(self, user_id: UserId) -> NewOrder {
        NewOrder {
            user_id,
            product_name: self.product_name,
            delivery_date: self.delivery_date,
            status: self.status,
            total: self.total,
        }
    }
}

/// A validated order ready to be inserted. The store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub user_id: UserId,
    pub product_name: String,
    pub delivery_date: NaiveDate,
    pub status: OrderStatus,
    pub total: Decimal,
}

/// Partial update of an order. Only the delivery date and the total are
/// mutable; `None` leaves the stored value untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrderChanges {
    pub delivery_date: Option<NaiveDate>,
    pub total: Option<Decimal>,
}

impl OrderChanges {
    /// Merge the present fields into `order`.
    ///
    /// The delivery date may stay the same or move later, never earlier.
    /// On rejection `order` is left unmodified.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidArgument` if the new delivery date is
    /// before the current one.
    pub fn apply_to(self, order: &mut Order) -> Result<(), DomainError> {
        if let Some(date) = self.delivery_date {
            if date < order.delivery_date {
                return Err(DomainError::InvalidArgument(
                    "delivery date cannot be moved earlier".to_string(),
                ));
            }
            order.delivery_date = date;
        }
        if let Some(total) = self.total {
            order.total = total;
        }
        Ok(())
    }
}
