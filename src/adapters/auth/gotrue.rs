//! GoTrue-compatible auth gateway.
//!
//! Implements the `AuthGateway` port against a hosted GoTrue HTTP API
//! (the auth service behind Supabase). Provider error strings are mapped
//! to the domain taxonomy; everything unrecognized degrades to
//! `ServiceUnavailable`.
//!
//! # Security
//!
//! - The anon key is held in `secrecy::SecretString`
//! - Tokens are never logged

use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::foundation::{Timestamp, UserId};
use crate::domain::session::{AuthError, Session};
use crate::ports::AuthGateway;

/// Configuration for the GoTrue gateway.
#[derive(Clone)]
pub struct GoTrueConfig {
    /// Base URL of the auth service (e.g. `https://xyz.supabase.co/auth/v1`).
    base_url: String,

    /// Public anon key sent as the `apikey` header.
    anon_key: SecretString,
}

impl GoTrueConfig {
    pub fn new(base_url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            anon_key: SecretString::new(anon_key.into()),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }
}

/// Token response from GoTrue grant and verify endpoints.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: String,
    expires_in: u64,
    user: TokenUser,
}

#[derive(Debug, Deserialize)]
struct TokenUser {
    id: String,
    #[serde(default)]
    email: Option<String>,
}

/// Error body returned by GoTrue.
#[derive(Debug, Deserialize, Default)]
struct ErrorBody {
    #[serde(default)]
    error_description: Option<String>,
    #[serde(default)]
    msg: Option<String>,
}

impl ErrorBody {
    fn message(&self) -> &str {
        self.error_description
            .as_deref()
            .or(self.msg.as_deref())
            .unwrap_or("")
    }
}

/// GoTrue implementation of the auth gateway.
///
/// Holds the refresh token from the last successful grant so the session
/// can be restored across restarts of the consuming process.
pub struct GoTrueAuthGateway {
    config: GoTrueConfig,
    http_client: reqwest::Client,
    stored_refresh_token: RwLock<Option<String>>,
}

impl GoTrueAuthGateway {
    pub fn new(config: GoTrueConfig) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_default();

        Self {
            config,
            http_client,
            stored_refresh_token: RwLock::new(None),
        }
    }

    /// Seeds the persisted refresh token, enabling session restoration.
    pub fn with_stored_refresh_token(mut self, refresh_token: impl Into<String>) -> Self {
        *self.stored_refresh_token.get_mut() = Some(refresh_token.into());
        self
    }

    async fn grant(&self, grant_type: &str, body: serde_json::Value) -> Result<Session, AuthError> {
        let url = self.config.endpoint(&format!("token?grant_type={grant_type}"));

        let response = self
            .http_client
            .post(&url)
            .header("apikey", self.config.anon_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| AuthError::service_unavailable(e.to_string()))?;

        self.session_from_response(response).await
    }

    async fn session_from_response(
        &self,
        response: reqwest::Response,
    ) -> Result<Session, AuthError> {
        let status = response.status();

        if !status.is_success() {
            let body: ErrorBody = response.json().await.unwrap_or_default();
            return Err(map_provider_error(status.as_u16(), body.message()));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| AuthError::service_unavailable(format!("malformed token response: {e}")))?;

        let user_id = UserId::new(token.user.id)
            .map_err(|e| AuthError::service_unavailable(format!("invalid user id: {e}")))?;

        let session = Session::new(
            token.access_token,
            token.refresh_token.clone(),
            Timestamp::now().plus_secs(token.expires_in),
            user_id,
            token.user.email,
        );

        *self.stored_refresh_token.write().await = Some(token.refresh_token);

        Ok(session)
    }
}

#[async_trait]
impl AuthGateway for GoTrueAuthGateway {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        self.grant(
            "password",
            serde_json::json!({ "email": email, "password": password }),
        )
        .await
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), AuthError> {
        let url = self.config.endpoint("logout");

        let response = self
            .http_client
            .post(&url)
            .header("apikey", self.config.anon_key.expose_secret())
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AuthError::service_unavailable(e.to_string()))?;

        *self.stored_refresh_token.write().await = None;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body: ErrorBody = response.json().await.unwrap_or_default();
            return Err(map_provider_error(status, body.message()));
        }

        Ok(())
    }

    async fn current_session(&self) -> Result<Option<Session>, AuthError> {
        let refresh_token = self.stored_refresh_token.read().await.clone();

        match refresh_token {
            Some(token) => {
                debug!("restoring session from stored refresh token");
                self.refresh_session(&token).await.map(Some)
            }
            None => Ok(None),
        }
    }

    async fn refresh_session(&self, refresh_token: &str) -> Result<Session, AuthError> {
        self.grant(
            "refresh_token",
            serde_json::json!({ "refresh_token": refresh_token }),
        )
        .await
    }

    async fn verify_recovery_code(&self, code: &str) -> Result<Session, AuthError> {
        let url = self.config.endpoint("verify");

        let response = self
            .http_client
            .post(&url)
            .header("apikey", self.config.anon_key.expose_secret())
            .json(&serde_json::json!({ "type": "recovery", "token": code }))
            .send()
            .await
            .map_err(|e| AuthError::service_unavailable(e.to_string()))?;

        if response.status().as_u16() == 401 || response.status().as_u16() == 403 {
            return Err(AuthError::InvalidCode);
        }

        self.session_from_response(response).await
    }

    async fn update_password(
        &self,
        access_token: &str,
        new_password: &str,
    ) -> Result<(), AuthError> {
        let url = self.config.endpoint("user");

        let response = self
            .http_client
            .put(&url)
            .header("apikey", self.config.anon_key.expose_secret())
            .bearer_auth(access_token)
            .json(&serde_json::json!({ "password": new_password }))
            .send()
            .await
            .map_err(|e| AuthError::service_unavailable(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body: ErrorBody = response.json().await.unwrap_or_default();
            return Err(map_provider_error(status, body.message()));
        }

        Ok(())
    }

    async fn session_from_tokens(
        &self,
        _access_token: &str,
        refresh_token: &str,
    ) -> Result<Session, AuthError> {
        // The refresh grant validates the pair server-side and rotates it.
        self.refresh_session(refresh_token).await
    }
}

/// Maps a GoTrue error response to the domain taxonomy.
fn map_provider_error(status: u16, message: &str) -> AuthError {
    if status == 429 {
        return AuthError::RateLimited;
    }
    if message.contains("Invalid login credentials") {
        return AuthError::InvalidCredentials;
    }
    if message.contains("Email not confirmed") {
        return AuthError::EmailNotConfirmed;
    }
    if message.contains("User not found") {
        return AuthError::UserNotFound;
    }
    if status == 401 && (message.contains("expired") || message.contains("invalid")) {
        return AuthError::InvalidCode;
    }
    AuthError::service_unavailable(format!("provider returned {status}: {message}"))
}
