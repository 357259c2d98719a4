//! RecoverPasswordHandler - Command handler for the password-recovery flow.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::domain::session::{AuthError, AuthEvent, LinkError, PageContext, RecoveryLink};
use crate::ports::AuthGateway;

use super::synchronizer::AuthSynchronizer;

/// Command to complete a password recovery.
#[derive(Debug, Clone)]
pub struct RecoverPasswordCommand {
    /// The full recovery link the user arrived on.
    pub link: String,
    /// The replacement password.
    pub new_password: String,
}

/// Errors from the recovery flow.
#[derive(Debug, Clone, thiserror::Error)]
pub enum RecoverPasswordError {
    #[error(transparent)]
    Link(#[from] LinkError),
    #[error(transparent)]
    Auth(#[from] AuthError),
}

/// Handler for the recovery deep link.
///
/// Exchanges the one-time code for a temporary session, routes it through
/// the synchronizer as a recovery event (so no dashboard redirect fires),
/// then sets the new password against that session.
pub struct RecoverPasswordHandler {
    gateway: Arc<dyn AuthGateway>,
    synchronizer: Arc<Mutex<AuthSynchronizer>>,
}

impl RecoverPasswordHandler {
    pub fn new(gateway: Arc<dyn AuthGateway>, synchronizer: Arc<Mutex<AuthSynchronizer>>) -> Self {
        Self {
            gateway,
            synchronizer,
        }
    }

    pub async fn handle(&self, cmd: RecoverPasswordCommand) -> Result<(), RecoverPasswordError> {
        let link = RecoveryLink::parse(&cmd.link)?;

        let session = self.gateway.verify_recovery_code(&link.code).await?;
        let access_token = session.access_token.clone();

        {
            let mut sync = self.synchronizer.lock().await;
            sync.process(AuthEvent::PasswordRecovery(session), PageContext::Recovery)
                .await;
        }

        self.gateway
            .update_password(&access_token, &cmd.new_password)
            .await?;

        let mut sync = self.synchronizer.lock().await;
        sync.end_recovery();

        Ok(())
    }
}
