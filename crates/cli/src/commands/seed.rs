//! Seed the database with users and orders from a YAML fixture.
//!
//! Records are created through the domain services, so the same validation
//! applies as for API requests.

use chrono::{Days, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use orderdesk_core::{CreateOrder, DomainError, NewUser, OrderService, OrderStatus, UserService};
use orderdesk_server::config::{ConfigError, database_url_from_env};
use orderdesk_server::{db, state::AppState};

/// Demo fixture, compiled into the binary so `seed` works from any directory.
pub const DEMO_FIXTURE: &str = include_str!("../../fixtures/demo.yaml");

/// Errors that can occur while seeding.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Could not read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Invalid fixture: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Could not create {entity}: {source}")]
    Domain {
        entity: String,
        source: DomainError,
    },
}

/// Top level of a fixture file.
#[derive(Debug, Deserialize)]
pub struct Fixture {
    #[serde(default)]
    pub users: Vec<FixtureUser>,
}

#[derive(Debug, Deserialize)]
pub struct FixtureUser {
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub orders: Vec<FixtureOrder>,
}

#[derive(Debug, Deserialize)]
pub struct FixtureOrder {
    pub product_name: String,
    /// Days after the seed date.
    #[serde(default)]
    pub delivery_in_days: u64,
    #[serde(default)]
    pub status: OrderStatus,
    pub total: Decimal,
}

/// Counts of created records.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub users: usize,
    pub orders: usize,
}

/// Parse a fixture document.
///
/// # Errors
///
/// Returns `SeedError::Yaml` if the document does not match the fixture shape.
pub fn parse_fixture(content: &str) -> Result<Fixture, SeedError> {
    Ok(serde_yaml::from_str(content)?)
}

/// Create every user and order in `fixture`, dating deliveries from `today`.
///
/// # Errors
///
/// Stops at the first record the services reject.
pub async fn apply_fixture(
    users: &UserService,
    orders: &OrderService,
    fixture: Fixture,
    today: NaiveDate,
) -> Result<SeedSummary, SeedError> {
    let mut summary = SeedSummary::default();

    for user in fixture.users {
        let username = user.username.clone();
        let user_id = users
            .create(NewUser {
                username: user.username,
                email: user.email,
            })
            .await
            .map_err(|source| SeedError::Domain {
                entity: format!("user {username}"),
                source,
            })?;
        summary.users += 1;

        for order in user.orders {
            let product = order.product_name.clone();
            orders
                .create(CreateOrder {
                    user_id: Some(user_id),
                    product_name: order.product_name,
                    delivery_date: today + Days::new(order.delivery_in_days),
                    status: order.status,
                    total: order.total,
                })
                .await
                .map_err(|source| SeedError::Domain {
                    entity: format!("order {product} for {username}"),
                    source,
                })?;
            summary.orders += 1;
        }
    }

    Ok(summary)
}

/// Load `file_path`, or the demo fixture when it is `None`, and seed the
/// configured database.
///
/// # Errors
///
/// Returns an error if the database URL is unset, the file cannot be read or
/// parsed, or a record is rejected.
pub async fn run(file_path: Option<&str>) -> Result<(), SeedError> {
    // Parse before connecting so a bad fixture fails fast
    let fixture = match file_path {
        Some(path) => {
            info!(path = %path, "Loading fixture");
            let content = tokio::fs::read_to_string(path)
                .await
                .map_err(|source| SeedError::Io {
                    path: path.to_string(),
                    source,
                })?;
            parse_fixture(&content)?
        }
        None => {
            info!("Loading demo fixture");
            parse_fixture(DEMO_FIXTURE)?
        }
    };
    info!(users = fixture.users.len(), "Parsed fixture");

    let database_url = database_url_from_env()?;
    let pool = db::create_pool(&database_url, 2).await?;
    info!("Connected to database");

    let state = AppState::postgres(pool);
    let summary = apply_fixture(
        state.users(),
        state.orders(),
        fixture,
        Utc::now().date_naive(),
    )
    .await?;

    info!(
        users = summary.users,
        orders = summary.orders,
        "Seeding complete!"
    );
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::str::FromStr;
    use std::sync::Arc;

    use orderdesk_core::memory::MemoryStore;

    use super::*;

    fn services() -> (UserService, OrderService) {
        let store = Arc::new(MemoryStore::new());
        let users = UserService::new(store.clone());
        let orders = OrderService::new(store, users.clone());
        (users, orders)
    }

    #[test]
    fn test_bundled_fixture_parses() {
        let fixture = parse_fixture(DEMO_FIXTURE).unwrap();
        assert_eq!(fixture.users.len(), 3);
        assert_eq!(fixture.users[0].orders[0].total, Decimal::from_str("99.99").unwrap());
        assert_eq!(fixture.users[0].orders[1].status, OrderStatus::Created);
        assert!(fixture.users[2].orders.is_empty());
    }

    #[test]
    fn test_rejects_unknown_status() {
        let result = parse_fixture(
            "users:\n  - username: a\n    email: a@b.c\n    orders:\n      - product_name: x\n        status: SHIPPED\n        total: 1\n",
        );
        assert!(matches!(result, Err(SeedError::Yaml(_))));
    }

    #[tokio::test]
    async fn test_apply_creates_records() {
        let (users, orders) = services();
        let fixture = parse_fixture(DEMO_FIXTURE).unwrap();
        let today = NaiveDate::from_ymd_opt(2026, 6, 1).unwrap();

        let summary = apply_fixture(&users, &orders, fixture, today).await.unwrap();
        assert_eq!(summary, SeedSummary { users: 3, orders: 4 });

        let all = orders.list().await.unwrap();
        assert_eq!(all[0].delivery_date, NaiveDate::from_ymd_opt(2026, 6, 8).unwrap());
        assert_eq!(all[2].status, OrderStatus::Delivered);
    }

    #[tokio::test]
    async fn test_apply_stops_on_rejected_user() {
        let (users, orders) = services();
        let fixture = parse_fixture("users:\n  - username: ''\n    email: a@b.c\n").unwrap();
        let today = NaiveDate::from_ymd_opt(2026, 6, 1).unwrap();

        let err = apply_fixture(&users, &orders, fixture, today).await.unwrap_err();
        assert!(matches!(
            err,
            SeedError::Domain {
                source: DomainError::InvalidArgument(_),
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_missing_file_fails_before_connecting() {
        let err = run(Some("no/such/fixture.yaml")).await.unwrap_err();
        assert!(matches!(err, SeedError::Io { ref path, .. } if path == "no/such/fixture.yaml"));
    }
}
