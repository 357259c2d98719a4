//! Payment provider configuration

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;
use crate::application::handlers::subscription::PollConfig;

/// Payment provider configuration
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentConfig {
    /// Stripe secret API key (sk_...)
    pub stripe_api_key: SecretString,

    /// Stripe webhook signing secret (whsec_...)
    pub stripe_webhook_secret: SecretString,

    /// Price id of the Pro subscription (price_...)
    pub stripe_price_id: String,

    /// Redirect target after a completed checkout
    pub checkout_success_url: String,

    /// Redirect target after an abandoned checkout
    pub checkout_cancel_url: String,

    /// Seconds between activation poll attempts
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,

    /// Maximum number of activation poll attempts
    #[serde(default = "default_poll_max_attempts")]
    pub poll_max_attempts: u32,
}

impl PaymentConfig {
    /// Build the poll settings used after a checkout redirect
    pub fn poll_config(&self) -> PollConfig {
        PollConfig {
            interval: Duration::from_secs(self.poll_interval_secs),
            max_attempts: self.poll_max_attempts,
        }
    }

    /// Validate payment configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.stripe_api_key.expose_secret().starts_with("sk_") {
            return Err(ValidationError::InvalidStripeKey);
        }
        if !self
            .stripe_webhook_secret
            .expose_secret()
            .starts_with("whsec_")
        {
            return Err(ValidationError::InvalidStripeWebhookSecret);
        }
        if !self.stripe_price_id.starts_with("price_") {
            return Err(ValidationError::InvalidStripePriceId);
        }
        if self.checkout_success_url.is_empty() {
            return Err(ValidationError::MissingRequired("payment.checkout_success_url"));
        }
        if self.checkout_cancel_url.is_empty() {
            return Err(ValidationError::MissingRequired("payment.checkout_cancel_url"));
        }
        if self.poll_interval_secs == 0 || self.poll_max_attempts == 0 {
            return Err(ValidationError::InvalidPollConfig);
        }
        Ok(())
    }
}

fn default_poll_interval() -> u64 {
    5
}

fn default_poll_max_attempts() -> u32 {
    12
}
