//! Adapters - Concrete implementations of ports.
//!
//! Each submodule implements one external concern:
//!
//! - `auth` - Hosted identity provider (GoTrue-compatible HTTP API)
//! - `payment` - Payment provider checkout API (Stripe)
//! - `postgres` - Profile reads and atomic billing writes
//! - `http` - Axum routes, DTOs, and middleware
//! - `clock` - System time and tokio-backed delays

pub mod auth;
pub mod clock;
pub mod http;
pub mod payment;
pub mod postgres;
