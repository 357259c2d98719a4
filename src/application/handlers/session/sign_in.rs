//! SignInHandler - Command handler for email/password sign-in.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::domain::session::{AuthError, AuthEvent, NavigationIntent, PageContext};
use crate::ports::AuthGateway;

use super::synchronizer::AuthSynchronizer;

/// Command to sign in with credentials.
#[derive(Debug, Clone)]
pub struct SignInCommand {
    pub email: String,
    pub password: String,
    pub page: PageContext,
}

/// Handler for credential sign-in.
///
/// Delegates authentication to the gateway and routes the resulting
/// session through the synchronizer so the store update and redirect
/// decision stay in one place.
pub struct SignInHandler {
    gateway: Arc<dyn AuthGateway>,
    synchronizer: Arc<Mutex<AuthSynchronizer>>,
}

impl SignInHandler {
    pub fn new(gateway: Arc<dyn AuthGateway>, synchronizer: Arc<Mutex<AuthSynchronizer>>) -> Self {
        Self {
            gateway,
            synchronizer,
        }
    }

    pub async fn handle(&self, cmd: SignInCommand) -> Result<NavigationIntent, AuthError> {
        let session = self.gateway.sign_in(&cmd.email, &cmd.password).await?;

        let mut sync = self.synchronizer.lock().await;
        Ok(sync.process(AuthEvent::SignedIn(session), cmd.page).await)
    }
}
