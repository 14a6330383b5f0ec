//! Order Desk Core - domain model and command/query services.
//!
//! This crate holds everything about users and orders that does not depend on
//! a transport or a particular database:
//! - `server` - HTTP boundary and `PostgreSQL` adapter
//! - `cli` - migrations and fixture seeding
//!
//! # Architecture
//!
//! Services talk to storage only through the [`repository`] ports. Adapters
//! live outside this crate, except for the in-memory store behind the
//! `memory` feature which backs tests and local demos.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs and the order status enum
//! - [`user`] / [`order`] - Entities, creation commands and partial updates
//! - [`repository`] - Persistence ports
//! - [`services`] - `UserService` and `OrderService`
//! - [`error`] - Domain error taxonomy

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod error;
#[cfg(any(test, feature = "memory"))]
pub mod memory;
pub mod order;
pub mod repository;
pub mod services;
pub mod types;
pub mod user;

pub use error::DomainError;
pub use order::{CreateOrder, NewOrder, Order, OrderChanges};
pub use repository::{OrderRepository, RepositoryError, UserRepository};
pub use services::{OrderService, UserService};
pub use types::*;
pub use user::{NewUser, User, UserChanges};
