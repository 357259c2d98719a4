//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors)
//! - `session` - Authentication session lifecycle and profile state
//! - `subscription` - Payment events, activation, and webhook verification

pub mod foundation;
pub mod session;
pub mod subscription;
