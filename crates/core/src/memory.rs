//! In-memory repository implementation.
//!
//! One [`MemoryStore`] implements both ports over shared state, so deleting
//! a user can drop its orders the way the database's `ON DELETE CASCADE`
//! does. Used by tests and by the server when `ORDERDESK_IN_MEMORY=true`.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;

use crate::order::{NewOrder, Order};
use crate::repository::{OrderRepository, RepositoryError, UserRepository};
use crate::types::{OrderId, UserId};
use crate::user::{NewUser, User};

#[derive(Debug, Default)]
struct State {
    users: BTreeMap<UserId, User>,
    orders: BTreeMap<OrderId, Order>,
    last_user_id: i64,
    last_order_id: i64,
}

/// Thread-safe in-memory store. Ids start at 1 and are never reused.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>, RepositoryError> {
        self.state
            .lock()
            .map_err(|_| RepositoryError::Database("memory store lock poisoned".to_string()))
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        Ok(self.lock()?.users.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<User>, RepositoryError> {
        Ok(self.lock()?.users.values().cloned().collect())
    }

    async fn insert(&self, user: NewUser) -> Result<User, RepositoryError> {
        let mut state = self.lock()?;
        state.last_user_id += 1;
        let now = Utc::now();
        let user = User {
            id: UserId::new(state.last_user_id),
            username: user.username,
            email: user.email,
            created_at: now,
            updated_at: now,
        };
        state.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update(&self, user: &User) -> Result<User, RepositoryError> {
        let mut state = self.lock()?;
        let stored = state
            .users
            .get_mut(&user.id)
            .ok_or(RepositoryError::NotFound)?;
        stored.username.clone_from(&user.username);
        stored.email.clone_from(&user.email);
        stored.updated_at = Utc::now();
        Ok(stored.clone())
    }

    async fn delete(&self, id: UserId) -> Result<bool, RepositoryError> {
        let mut state = self.lock()?;
        if state.users.remove(&id).is_none() {
            return Ok(false);
        }
        state.orders.retain(|_, order| order.user_id != id);
        Ok(true)
    }
}

#[async_trait]
impl OrderRepository for MemoryStore {
    async fn find_by_id(&self, id: OrderId) -> Result<Option<Order>, RepositoryError> {
        Ok(self.lock()?.orders.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Order>, RepositoryError> {
        Ok(self.lock()?.orders.values().cloned().collect())
    }

    async fn find_by_user(&self, user_id: UserId) -> Result<Vec<Order>, RepositoryError> {
        Ok(self
            .lock()?
            .orders
            .values()
            .filter(|order| order.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn insert(&self, order: NewOrder) -> Result<Order, RepositoryError> {
        let mut state = self.lock()?;
        if !state.users.contains_key(&order.user_id) {
            return Err(RepositoryError::Conflict(format!(
                "user {} does not exist",
                order.user_id
            )));
        }
        state.last_order_id += 1;
        let order = Order {
            id: OrderId::new(state.last_order_id),
            user_id: order.user_id,
            product_name: order.product_name,
            delivery_date: order.delivery_date,
            status: order.status,
            total: order.total,
        };
        state.orders.insert(order.id, order.clone());
        Ok(order)
    }

    async fn update(&self, order: &Order) -> Result<Order, RepositoryError> {
        let mut state = self.lock()?;
        let stored = state
            .orders
            .get_mut(&order.id)
            .ok_or(RepositoryError::NotFound)?;
        if order.delivery_date < stored.delivery_date {
            return Err(RepositoryError::Conflict(format!(
                "order {} has a later delivery date",
                order.id
            )));
        }
        stored.delivery_date = order.delivery_date;
        stored.total = order.total;
        Ok(stored.clone())
    }

    async fn delete(&self, id: OrderId) -> Result<bool, RepositoryError> {
        Ok(self.lock()?.orders.remove(&id).is_some())
    }
}
