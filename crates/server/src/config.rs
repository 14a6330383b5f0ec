//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `ORDERDESK_DATABASE_URL` - `PostgreSQL` connection string (falls back to
//!   `DATABASE_URL`). Not needed when `ORDERDESK_IN_MEMORY=true`.
//!
//! ## Optional
//! - `ORDERDESK_HOST` - Bind address (default: 127.0.0.1)
//! - `ORDERDESK_PORT` - Listen port (default: 8080)
//! - `ORDERDESK_DB_MAX_CONNECTIONS` - Pool size (default: 10)
//! - `ORDERDESK_CORS_ORIGINS` - Comma-separated allowed origins (default: none)
//! - `ORDERDESK_IN_MEMORY` - Keep data in process memory instead of `PostgreSQL`
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Transaction sample rate (default: 0.0)

use std::net::{IpAddr, SocketAddr};

use secrecy::SecretString;
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Primary variable holding the `PostgreSQL` connection string.
pub const DATABASE_URL_VAR: &str = "ORDERDESK_DATABASE_URL";

/// Load only the database URL, for tools that need nothing else.
///
/// Loads `.env` and applies the same `DATABASE_URL` fallback as
/// [`ServerConfig::from_env`].
///
/// # Errors
///
/// Returns `ConfigError::MissingEnvVar` if neither variable is set.
pub fn database_url_from_env() -> Result<SecretString, ConfigError> {
    let _ = dotenvy::dotenv();
    get_database_url(&|key| std::env::var(key).ok(), DATABASE_URL_VAR)
}

/// Where users and orders are kept.
#[derive(Debug, Clone)]
pub enum StorageConfig {
    Postgres {
        /// Connection URL (contains password)
        database_url: SecretString,
        max_connections: u32,
    },
    InMemory,
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub storage: StorageConfig,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Origins allowed to call the API from a browser. Empty disables CORS.
    pub cors_origins: Vec<String>,
    pub sentry_dsn: Option<String>,
    pub sentry_environment: Option<String>,
    pub sentry_sample_rate: f32,
    pub sentry_traces_sample_rate: f32,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(&|key| std::env::var(key).ok())
    }

    fn from_lookup(env: &dyn Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let in_memory = parse_or_default(env, "ORDERDESK_IN_MEMORY", false)?;
        let storage = if in_memory {
            StorageConfig::InMemory
        } else {
            StorageConfig::Postgres {
                database_url: get_database_url(env, DATABASE_URL_VAR)?,
                max_connections: parse_or_default(env, "ORDERDESK_DB_MAX_CONNECTIONS", 10)?,
            }
        };

        Ok(Self {
            storage,
            host: parse_or_default(env, "ORDERDESK_HOST", IpAddr::from([127, 0, 0, 1]))?,
            port: parse_or_default(env, "ORDERDESK_PORT", 8080)?,
            cors_origins: env("ORDERDESK_CORS_ORIGINS")
                .map(|origins| {
                    origins
                        .split(',')
                        .map(str::trim)
                        .filter(|origin| !origin.is_empty())
                        .map(String::from)
                        .collect()
                })
                .unwrap_or_default(),
            sentry_dsn: env("SENTRY_DSN").filter(|dsn| !dsn.is_empty()),
            sentry_environment: env("SENTRY_ENVIRONMENT"),
            sentry_sample_rate: parse_or_default(env, "SENTRY_SAMPLE_RATE", 1.0)?,
            sentry_traces_sample_rate: parse_or_default(env, "SENTRY_TRACES_SAMPLE_RATE", 0.0)?,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get database URL with fallback to generic `DATABASE_URL` (used by Fly.io postgres attach).
fn get_database_url(
    env: &dyn Fn(&str) -> Option<String>,
    primary_key: &str,
) -> Result<SecretString, ConfigError> {
    env(primary_key)
        .or_else(|| env("DATABASE_URL"))
        .map(SecretString::from)
        .ok_or_else(|| ConfigError::MissingEnvVar(primary_key.to_string()))
}

/// Parse an optional environment variable, using `default` when unset.
fn parse_or_default<T>(
    env: &dyn Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    env(key).map_or(Ok(default), |value| {
        value
            .trim()
            .parse()
            .map_err(|e: T::Err| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    })
}
