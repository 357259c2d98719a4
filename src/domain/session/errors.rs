//! Authentication error taxonomy.
//!
//! These errors are domain-centric: they describe what went wrong from the
//! application's perspective, not the hosted provider's. Every variant maps
//! to a user-facing message; none of them is fatal to the application shell.

use thiserror::Error;

/// Authentication errors surfaced by the hosted auth provider.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// The supplied email/password pair was rejected.
    #[error("Invalid login credentials")]
    InvalidCredentials,

    /// The account exists but the email address is not yet confirmed.
    #[error("Email not confirmed")]
    EmailNotConfirmed,

    /// Too many attempts in a short window.
    #[error("Rate limited")]
    RateLimited,

    /// No account exists for the identity.
    #[error("User not found")]
    UserNotFound,

    /// A recovery or verification code was rejected by the provider.
    #[error("Invalid or expired code")]
    InvalidCode,

    /// The auth service is unreachable or returned an unexpected failure.
    #[error("Auth service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AuthError {
    /// Creates a service unavailable error with a message.
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }

    /// Returns true if this is a transient error that may succeed on retry.
    pub fn is_transient(&self) -> bool {
        matches!(self, AuthError::RateLimited | AuthError::ServiceUnavailable(_))
    }

    /// Localized user-facing message for this error.
    pub fn user_message(&self) -> &'static str {
        match self {
            AuthError::InvalidCredentials => "The email or password is incorrect.",
            AuthError::EmailNotConfirmed => {
                "Please confirm your email address before signing in."
            }
            AuthError::RateLimited => "Too many attempts. Please wait a moment and try again.",
            AuthError::UserNotFound => "No account exists for this email address.",
            AuthError::InvalidCode => "This link is invalid or has expired. Request a new one.",
            AuthError::ServiceUnavailable(_) => {
                "Sign-in is temporarily unavailable. Please try again."
            }
        }
    }
}

/// Errors from parsing recovery/verification deep links.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LinkError {
    /// The link is missing a required parameter or is malformed.
    #[error("Invalid link: {0}")]
    Invalid(String),
}

impl LinkError {
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::Invalid(reason.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_credentials_message_mentions_incorrect() {
        assert!(AuthError::InvalidCredentials
            .user_message()
            .contains("incorrect"));
    }

    #[test]
    fn transient_errors_are_rate_limit_and_unavailable() {
        assert!(AuthError::RateLimited.is_transient());
        assert!(AuthError::service_unavailable("timeout").is_transient());
        assert!(!AuthError::InvalidCredentials.is_transient());
        assert!(!AuthError::UserNotFound.is_transient());
    }

    #[test]
    fn every_variant_has_a_user_message() {
        let variants = [
            AuthError::InvalidCredentials,
            AuthError::EmailNotConfirmed,
            AuthError::RateLimited,
            AuthError::UserNotFound,
            AuthError::InvalidCode,
            AuthError::service_unavailable("down"),
        ];
        for v in variants {
            assert!(!v.user_message().is_empty());
        }
    }

    #[test]
    fn link_error_displays_reason() {
        let err = LinkError::invalid("missing code");
        assert_eq!(format!("{}", err), "Invalid link: missing code");
    }
}
