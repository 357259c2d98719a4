//! StartCheckoutHandler - Command handler for beginning a pro upgrade.

use std::sync::Arc;

use crate::domain::session::SessionStore;
use crate::domain::subscription::CheckoutError;
use crate::ports::CheckoutGateway;

/// A redirect the caller should follow to the hosted payment page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutRedirect {
    pub url: String,
}

/// Handler for starting a checkout from the authenticated session.
///
/// The bearer token comes from the current session; the email prefers the
/// enriched profile and falls back to the token claim.
pub struct StartCheckoutHandler {
    gateway: Arc<dyn CheckoutGateway>,
    store: SessionStore,
}

impl StartCheckoutHandler {
    pub fn new(gateway: Arc<dyn CheckoutGateway>, store: SessionStore) -> Self {
        Self { gateway, store }
    }

    pub async fn handle(&self) -> Result<CheckoutRedirect, CheckoutError> {
        let snapshot = self.store.snapshot();

        let session = snapshot.session.ok_or(CheckoutError::Unauthenticated)?;

        let email = snapshot
            .profile
            .map(|p| p.email)
            .filter(|e| !e.is_empty())
            .or_else(|| session.email.clone())
            .ok_or(CheckoutError::MissingEmail)?;

        let link = self
            .gateway
            .create_checkout(&session.access_token, &email)
            .await?;

        if link.url.is_empty() {
            return Err(CheckoutError::MissingUrl);
        }

        Ok(CheckoutRedirect { url: link.url })
    }
}
