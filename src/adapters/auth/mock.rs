//! In-memory auth gateway for tests and local development.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::foundation::{Timestamp, UserId};
use crate::domain::session::{AuthError, Session};
use crate::ports::AuthGateway;

/// Deterministic in-memory gateway.
///
/// Accounts are registered up front; sign-in checks against them, tokens
/// are derived from the user id so assertions can predict them.
pub struct MockAuthGateway {
    accounts: Mutex<HashMap<String, MockAccount>>,
    current: Mutex<Option<Session>>,
}

struct MockAccount {
    user_id: UserId,
    password: String,
    confirmed: bool,
}

impl MockAuthGateway {
    pub fn new() -> Self {
        Self {
            accounts: Mutex::new(HashMap::new()),
            current: Mutex::new(None),
        }
    }

    /// Registers a confirmed account.
    pub fn with_account(
        self,
        email: impl Into<String>,
        password: impl Into<String>,
        user_id: UserId,
    ) -> Self {
        self.accounts.lock().unwrap().insert(
            email.into(),
            MockAccount {
                user_id,
                password: password.into(),
                confirmed: true,
            },
        );
        self
    }

    /// Registers an account whose email is not yet confirmed.
    pub fn with_unconfirmed_account(
        self,
        email: impl Into<String>,
        password: impl Into<String>,
        user_id: UserId,
    ) -> Self {
        self.accounts.lock().unwrap().insert(
            email.into(),
            MockAccount {
                user_id,
                password: password.into(),
                confirmed: false,
            },
        );
        self
    }

    fn session_for(user_id: &UserId, email: Option<String>) -> Session {
        Session::new(
            format!("access-{user_id}"),
            format!("refresh-{user_id}"),
            Timestamp::now().plus_secs(3600),
            user_id.clone(),
            email,
        )
    }
}

impl Default for MockAuthGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuthGateway for MockAuthGateway {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let accounts = self.accounts.lock().unwrap();
        let account = accounts.get(email).ok_or(AuthError::InvalidCredentials)?;

        if account.password != password {
            return Err(AuthError::InvalidCredentials);
        }
        if !account.confirmed {
            return Err(AuthError::EmailNotConfirmed);
        }

        let session = Self::session_for(&account.user_id, Some(email.to_string()));
        *self.current.lock().unwrap() = Some(session.clone());
        Ok(session)
    }

    async fn sign_out(&self, _access_token: &str) -> Result<(), AuthError> {
        *self.current.lock().unwrap() = None;
        Ok(())
    }

    async fn current_session(&self) -> Result<Option<Session>, AuthError> {
        Ok(self.current.lock().unwrap().clone())
    }

    async fn refresh_session(&self, refresh_token: &str) -> Result<Session, AuthError> {
        let current = self.current.lock().unwrap().clone();
        match current {
            Some(session) if session.refresh_token == refresh_token => {
                Ok(Self::session_for(&session.user_id, session.email))
            }
            _ => Err(AuthError::InvalidCode),
        }
    }

    async fn verify_recovery_code(&self, code: &str) -> Result<Session, AuthError> {
        if code.is_empty() || code == "expired" {
            return Err(AuthError::InvalidCode);
        }
        let user_id = UserId::new(format!("recovered-{code}"))
            .map_err(|e| AuthError::service_unavailable(e.to_string()))?;
        let session = Self::session_for(&user_id, None);
        *self.current.lock().unwrap() = Some(session.clone());
        Ok(session)
    }

    async fn update_password(
        &self,
        _access_token: &str,
        _new_password: &str,
    ) -> Result<(), AuthError> {
        Ok(())
    }

    async fn session_from_tokens(
        &self,
        access_token: &str,
        refresh_token: &str,
    ) -> Result<Session, AuthError> {
        if access_token.is_empty() || refresh_token.is_empty() {
            return Err(AuthError::InvalidCode);
        }
        let user_id = UserId::new("verified-user")
            .map_err(|e| AuthError::service_unavailable(e.to_string()))?;
        let session = Session::new(
            access_token,
            refresh_token,
            Timestamp::now().plus_secs(3600),
            user_id,
            None,
        );
        *self.current.lock().unwrap() = Some(session.clone());
        Ok(session)
    }
}
