//! Authentication session value object.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Timestamp, UserId};

/// An authenticated session issued by the hosted auth provider.
///
/// Tokens are opaque to this crate; only expiry and the associated user id
/// are interpreted. Owned exclusively by the `SessionStore`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Bearer token presented on authenticated requests.
    pub access_token: String,

    /// Token used to obtain a fresh access token.
    pub refresh_token: String,

    /// When the access token expires.
    pub expires_at: Timestamp,

    /// The identity this session belongs to.
    pub user_id: UserId,

    /// Email claim carried by the token, when the provider includes one.
    pub email: Option<String>,
}

impl Session {
    /// Creates a new session.
    pub fn new(
        access_token: impl Into<String>,
        refresh_token: impl Into<String>,
        expires_at: Timestamp,
        user_id: UserId,
        email: Option<String>,
    ) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
            expires_at,
            user_id,
            email,
        }
    }

    /// Returns true if the access token has expired.
    pub fn is_expired(&self) -> bool {
        !self.expires_at.is_future()
    }
}
