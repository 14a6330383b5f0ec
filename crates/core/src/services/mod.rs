//! Command/query services.
//!
//! - `users` - create, fetch, partially update and delete users
//! - `orders` - the same for orders, plus the owner check and the
//!   delivery-date rule
//!
//! Services are cheap to clone; each holds `Arc`s to its repositories.

mod orders;
mod users;

pub use orders::OrderService;
pub use users::UserService;
