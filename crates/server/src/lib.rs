//! Order Desk server library.
//!
//! This crate provides the HTTP API as a library, allowing the router to be
//! driven directly in tests.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;
