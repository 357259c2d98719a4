//! HTTP adapters - Axum routes, DTOs, and middleware.

pub mod billing;
pub mod middleware;
