//! HTTP middleware.

mod auth;

pub use auth::{require_auth, AuthState, AuthenticatedUser, JwtValidator};
