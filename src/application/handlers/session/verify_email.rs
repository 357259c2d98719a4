//! VerifyEmailHandler - Command handler for email-verification deep links.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::domain::session::{
    AuthError, AuthEvent, LinkError, NavigationIntent, PageContext, VerificationLink,
};
use crate::ports::AuthGateway;

use super::synchronizer::AuthSynchronizer;

/// Command to complete email verification from a signup link.
#[derive(Debug, Clone)]
pub struct VerifyEmailCommand {
    /// The full verification link the user arrived on.
    pub link: String,
    pub page: PageContext,
}

/// Errors from the verification flow.
#[derive(Debug, Clone, thiserror::Error)]
pub enum VerifyEmailError {
    #[error(transparent)]
    Link(#[from] LinkError),
    #[error(transparent)]
    Auth(#[from] AuthError),
}

/// Handler for signup verification links.
///
/// Extracts the token pair from the link fragment, builds a session from
/// it, and processes the result as a regular sign-in.
pub struct VerifyEmailHandler {
    gateway: Arc<dyn AuthGateway>,
    synchronizer: Arc<Mutex<AuthSynchronizer>>,
}

impl VerifyEmailHandler {
    pub fn new(gateway: Arc<dyn AuthGateway>, synchronizer: Arc<Mutex<AuthSynchronizer>>) -> Self {
        Self {
            gateway,
            synchronizer,
        }
    }

    pub async fn handle(
        &self,
        cmd: VerifyEmailCommand,
    ) -> Result<NavigationIntent, VerifyEmailError> {
        let link = VerificationLink::parse(&cmd.link)?;

        let session = self
            .gateway
            .session_from_tokens(&link.access_token, &link.refresh_token)
            .await?;

        let mut sync = self.synchronizer.lock().await;
        Ok(sync.process(AuthEvent::SignedIn(session), cmd.page).await)
    }
}
