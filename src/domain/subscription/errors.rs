//! Errors for the checkout and webhook flows.

use thiserror::Error;

/// Errors raised while verifying or applying a payment webhook.
#[derive(Debug, Clone, Error)]
pub enum WebhookError {
    /// Signature verification failed.
    #[error("Invalid webhook signature")]
    InvalidSignature,

    /// Event timestamp is older than the replay window allows.
    #[error("Webhook timestamp out of acceptable range")]
    TimestampOutOfRange,

    /// Event timestamp is too far in the future.
    #[error("Invalid webhook timestamp")]
    InvalidTimestamp,

    /// Header or payload could not be parsed.
    #[error("Webhook parse error: {0}")]
    ParseError(String),

    /// No profile exists for the email carried by the event.
    #[error("No user found for email: {0}")]
    UserNotFound(String),

    /// Profile update or payment insert failed.
    #[error("Webhook storage error: {0}")]
    Storage(String),
}

impl WebhookError {
    pub fn parse(message: impl Into<String>) -> Self {
        Self::ParseError(message.into())
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }
}

/// Errors raised while initiating a checkout session.
#[derive(Debug, Clone, Error)]
pub enum CheckoutError {
    /// No session is held, so no bearer token can be attached.
    #[error("Not authenticated")]
    Unauthenticated,

    /// Neither the profile nor the session carries an email address.
    #[error("Missing email address")]
    MissingEmail,

    /// The checkout endpoint rejected the request.
    #[error("Checkout endpoint returned {status}: {message}")]
    Endpoint { status: u16, message: String },

    /// The checkout endpoint could not be reached.
    #[error("Checkout request failed: {0}")]
    Network(String),

    /// The endpoint responded but without a redirect URL.
    #[error("Checkout response missing redirect URL")]
    MissingUrl,
}

impl CheckoutError {
    pub fn endpoint(status: u16, message: impl Into<String>) -> Self {
        Self::Endpoint {
            status,
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// User-facing message for this error.
    pub fn user_message(&self) -> String {
        match self {
            CheckoutError::Unauthenticated => {
                "Please sign in before upgrading your plan.".to_string()
            }
            CheckoutError::MissingEmail => {
                "Your account has no email address on file.".to_string()
            }
            CheckoutError::Endpoint { .. }
            | CheckoutError::Network(_)
            | CheckoutError::MissingUrl => {
                "Could not start checkout. Please try again.".to_string()
            }
        }
    }
}
