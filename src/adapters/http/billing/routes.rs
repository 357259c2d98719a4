//! Route definitions for the billing surface.

use axum::routing::post;
use axum::{middleware, Router};

use crate::adapters::http::middleware::{require_auth, AuthState};

use super::handlers::{create_checkout, handle_payment_webhook, BillingAppState};

/// Authenticated billing routes, mounted under `/api/billing`.
pub fn billing_routes(state: BillingAppState, auth: AuthState) -> Router {
    Router::new()
        .route("/checkout", post(create_checkout))
        .layer(middleware::from_fn_with_state(auth, require_auth))
        .with_state(state)
}

/// Webhook routes, mounted under `/api/webhooks`.
///
/// No bearer auth: the provider authenticates with the signature header.
pub fn webhook_routes(state: BillingAppState) -> Router {
    Router::new()
        .route("/payment", post(handle_payment_webhook))
        .with_state(state)
}
