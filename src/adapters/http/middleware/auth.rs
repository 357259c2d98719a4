//! Bearer token authentication middleware.
//!
//! Validates HS256 access tokens issued by the hosted auth provider and
//! injects `AuthenticatedUser` into request extensions. Protected routes
//! read it with `Extension<AuthenticatedUser>`.
//!
//! ```text
//! Request → require_auth → injects AuthenticatedUser into extensions
//!                                   ↓
//!                          Handler → Extension<AuthenticatedUser>
//! ```

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::debug;

use crate::domain::foundation::UserId;

/// Auth middleware state.
pub type AuthState = Arc<JwtValidator>;

/// The authenticated caller, extracted from a validated access token.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub email: Option<String>,
}

/// Claims carried by the provider's access tokens.
#[derive(Debug, Deserialize)]
struct AccessTokenClaims {
    sub: String,
    #[serde(default)]
    email: Option<String>,
    #[allow(dead_code)]
    exp: i64,
}

/// HS256 validator for provider-issued access tokens.
pub struct JwtValidator {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtValidator {
    pub fn new(secret: SecretString, audience: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[audience]);

        Self {
            decoding_key: DecodingKey::from_secret(secret.expose_secret().as_bytes()),
            validation,
        }
    }

    /// Validates a token and extracts the caller identity.
    pub fn validate(&self, token: &str) -> Result<AuthenticatedUser, jsonwebtoken::errors::Error> {
        let data = decode::<AccessTokenClaims>(token, &self.decoding_key, &self.validation)?;

        let user_id = UserId::new(data.claims.sub).map_err(|_| {
            jsonwebtoken::errors::Error::from(jsonwebtoken::errors::ErrorKind::InvalidSubject)
        })?;

        Ok(AuthenticatedUser {
            user_id,
            email: data.claims.email,
        })
    }
}

/// Middleware that requires a valid bearer token.
///
/// Missing or invalid tokens get a 401 JSON response; valid tokens have
/// their identity injected into request extensions.
pub async fn require_auth(
    State(validator): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "));

    let token = match token {
        Some(token) => token,
        None => return unauthorized("Missing bearer token"),
    };

    match validator.validate(token) {
        Ok(user) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(e) => {
            debug!(error = %e, "bearer token rejected");
            unauthorized("Invalid or expired token")
        }
    }
}

fn unauthorized(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(serde_json::json!({
            "error": "UNAUTHORIZED",
            "message": message,
        })),
    )
        .into_response()
}
