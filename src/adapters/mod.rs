//! Adapters - Implementations of port interfaces.
//!
//! - `auth` - Session validators (JWT, mock)
//! - `http` - axum routes, handlers and middleware
//! - `memory` - In-memory store implementing every storage port
//! - `postgres` - PostgreSQL implementations of the storage ports

pub mod auth;
pub mod http;
pub mod memory;
pub mod postgres;
