//! SignOutHandler - Command handler for signing out.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::warn;

use crate::domain::session::{AuthEvent, NavigationIntent, PageContext};
use crate::ports::AuthGateway;

use super::synchronizer::AuthSynchronizer;

/// Handler for signing out.
///
/// Revocation at the provider is best effort; the local session is cleared
/// even when the provider call fails, so the user is never stuck signed in.
pub struct SignOutHandler {
    gateway: Arc<dyn AuthGateway>,
    synchronizer: Arc<Mutex<AuthSynchronizer>>,
}

impl SignOutHandler {
    pub fn new(gateway: Arc<dyn AuthGateway>, synchronizer: Arc<Mutex<AuthSynchronizer>>) -> Self {
        Self {
            gateway,
            synchronizer,
        }
    }

    pub async fn handle(&self, page: PageContext) -> NavigationIntent {
        let mut sync = self.synchronizer.lock().await;

        if let Some(session) = sync.store().snapshot().session {
            if let Err(e) = self.gateway.sign_out(&session.access_token).await {
                warn!(error = %e, "provider sign-out failed, clearing local session anyway");
            }
        }

        sync.process(AuthEvent::SignedOut, page).await
    }
}
