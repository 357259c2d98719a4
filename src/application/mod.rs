//! Application layer - Command and query handlers.
//!
//! Handlers orchestrate domain objects through ports. They own no state
//! beyond what coordination requires and never talk to concrete adapters.

pub mod handlers;
