//! Auth gateway port for the hosted identity provider.

use async_trait::async_trait;

use crate::domain::session::{AuthError, Session};

/// Port for the hosted identity provider.
///
/// Every method maps to one provider operation; implementations translate
/// provider-specific failures into the [`AuthError`] taxonomy and never
/// panic on network errors.
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// Signs in with email and password.
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError>;

    /// Signs out the current session at the provider.
    async fn sign_out(&self, access_token: &str) -> Result<(), AuthError>;

    /// Restores the persisted session, if one exists and is still valid.
    async fn current_session(&self) -> Result<Option<Session>, AuthError>;

    /// Exchanges a refresh token for a fresh session.
    async fn refresh_session(&self, refresh_token: &str) -> Result<Session, AuthError>;

    /// Exchanges a one-time recovery code for a temporary session.
    async fn verify_recovery_code(&self, code: &str) -> Result<Session, AuthError>;

    /// Sets a new password for the session holder.
    async fn update_password(
        &self,
        access_token: &str,
        new_password: &str,
    ) -> Result<(), AuthError>;

    /// Builds a session from tokens carried by a verification link.
    async fn session_from_tokens(
        &self,
        access_token: &str,
        refresh_token: &str,
    ) -> Result<Session, AuthError>;
}
