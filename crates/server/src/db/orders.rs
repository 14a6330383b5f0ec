//! Order repository backed by the `orders` table.

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;

use orderdesk_core::{
    NewOrder, Order, OrderId, OrderRepository, OrderStatus, RepositoryError, UserId,
};

// =============================================================================
// Internal Row Types
// =============================================================================

#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: i64,
    user_id: i64,
    product_name: String,
    delivery_date: NaiveDate,
    status: OrderStatus,
    total: Decimal,
}

impl From<OrderRow> for Order {
    fn from(row: OrderRow) -> Self {
        Self {
            id: OrderId::new(row.id),
            user_id: UserId::new(row.user_id),
            product_name: row.product_name,
            delivery_date: row.delivery_date,
            status: row.status,
            total: row.total,
        }
    }
}

// =============================================================================
// Repository
// =============================================================================

/// `PostgreSQL` implementation of [`OrderRepository`].
#[derive(Clone)]
pub struct PgOrderRepository {
    pool: PgPool,
}

impl PgOrderRepository {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OrderRepository for PgOrderRepository {
    async fn find_by_id(&self, id: OrderId) -> Result<Option<Order>, RepositoryError> {
        let row = sqlx::query_as::<_, OrderRow>(
            r"
            SELECT id, user_id, product_name, delivery_date, status, total
            FROM orders
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Order::from))
    }

    async fn find_all(&self) -> Result<Vec<Order>, RepositoryError> {
        let rows = sqlx::query_as::<_, OrderRow>(
            r"
            SELECT id, user_id, product_name, delivery_date, status, total
            FROM orders
            ORDER BY id
            ",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Order::from).collect())
    }

    async fn find_by_user(&self, user_id: UserId) -> Result<Vec<Order>, RepositoryError> {
        let rows = sqlx::query_as::<_, OrderRow>(
            r"
            SELECT id, user_id, product_name, delivery_date, status, total
            FROM orders
            WHERE user_id = $1
            ORDER BY id
            ",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Order::from).collect())
    }

    async fn insert(&self, order: NewOrder) -> Result<Order, RepositoryError> {
        // A missing owner surfaces as a foreign key violation (Conflict).
        let row = sqlx::query_as::<_, OrderRow>(
            r"
            INSERT INTO orders (user_id, product_name, delivery_date, status, total)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_id, product_name, delivery_date, status, total
            ",
        )
        .bind(order.user_id)
        .bind(&order.product_name)
        .bind(order.delivery_date)
        .bind(order.status)
        .bind(order.total)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn update(&self, order: &Order) -> Result<Order, RepositoryError> {
        let row = sqlx::query_as::<_, OrderRow>(
            r"
            UPDATE orders
            SET delivery_date = $2, total = $3
            WHERE id = $1 AND delivery_date <= $2
            RETURNING id, user_id, product_name, delivery_date, status, total
            ",
        )
        .bind(order.id)
        .bind(order.delivery_date)
        .bind(order.total)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(row) = row {
            return Ok(row.into());
        }

        // Nothing updated: either the row is gone or the guard refused it.
        let exists: bool = sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM orders WHERE id = $1)")
            .bind(order.id)
            .fetch_one(&self.pool)
            .await?;

        if exists {
            Err(RepositoryError::Conflict(format!(
                "order {} has a later delivery date",
                order.id
            )))
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    async fn delete(&self, id: OrderId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM orders WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
