//! Checkout gateway port.
//!
//! The client-side view of this service's own checkout endpoint: callers
//! hold a bearer token and an email and get back a redirect URL.

use async_trait::async_trait;

use crate::domain::subscription::CheckoutError;

/// A checkout redirect returned by the endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutLink {
    pub url: String,
}

/// Port for initiating a hosted checkout from the authenticated client.
#[async_trait]
pub trait CheckoutGateway: Send + Sync {
    /// Requests a checkout session, authenticated by the bearer token.
    async fn create_checkout(
        &self,
        access_token: &str,
        email: &str,
    ) -> Result<CheckoutLink, CheckoutError>;
}
