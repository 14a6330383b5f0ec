//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use orderdesk_core::memory::MemoryStore;
use orderdesk_core::{OrderService, UserService};

use crate::db::{PgOrderRepository, PgUserRepository};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// domain services and, when backed by `PostgreSQL`, the connection pool.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    users: UserService,
    orders: OrderService,
    pool: Option<PgPool>,
}

impl AppState {
    /// Wire the services to `PostgreSQL` repositories.
    #[must_use]
    pub fn postgres(pool: PgPool) -> Self {
        let users = UserService::new(Arc::new(PgUserRepository::new(pool.clone())));
        let orders = OrderService::new(
            Arc::new(PgOrderRepository::new(pool.clone())),
            users.clone(),
        );
        Self::from_parts(users, orders, Some(pool))
    }

    /// Wire the services to a fresh in-memory store.
    #[must_use]
    pub fn in_memory() -> Self {
        let store = Arc::new(MemoryStore::new());
        let users = UserService::new(store.clone());
        let orders = OrderService::new(store, users.clone());
        Self::from_parts(users, orders, None)
    }

    fn from_parts(users: UserService, orders: OrderService, pool: Option<PgPool>) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                users,
                orders,
                pool,
            }),
        }
    }

    #[must_use]
    pub fn users(&self) -> &UserService {
        &self.inner.users
    }

    #[must_use]
    pub fn orders(&self) -> &OrderService {
        &self.inner.orders
    }

    /// The database pool, or `None` in in-memory mode.
    #[must_use]
    pub fn pool(&self) -> Option<&PgPool> {
        self.inner.pool.as_ref()
    }
}
