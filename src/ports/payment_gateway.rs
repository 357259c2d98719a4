//! Payment gateway port for the external payment provider.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Request to create a hosted checkout session at the provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCheckoutRequest {
    /// Email to pre-fill and later reconcile against.
    pub customer_email: String,

    /// Provider price id for the pro plan.
    pub price_id: String,

    /// Redirect after successful payment.
    pub success_url: String,

    /// Redirect after abandoned checkout.
    pub cancel_url: String,
}

/// A checkout session created at the provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderCheckout {
    /// Provider session id (`cs_...`).
    pub id: String,

    /// Hosted payment page URL.
    pub url: String,
}

/// Errors from payment provider operations.
#[derive(Debug, Clone, Error)]
pub enum PaymentGatewayError {
    /// The provider could not be reached.
    #[error("Payment provider network error: {0}")]
    Network(String),

    /// The provider rejected the API credentials.
    #[error("Payment provider authentication failed")]
    Authentication,

    /// The provider returned an error response.
    #[error("Payment provider error ({status}): {message}")]
    Provider { status: u16, message: String },
}

impl PaymentGatewayError {
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    pub fn provider(status: u16, message: impl Into<String>) -> Self {
        Self::Provider {
            status,
            message: message.into(),
        }
    }

    /// True if the operation may succeed on retry.
    pub fn is_retryable(&self) -> bool {
        matches!(self, PaymentGatewayError::Network(_))
    }
}

/// Port for the external payment provider's checkout API.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Creates a hosted checkout session.
    async fn create_checkout_session(
        &self,
        request: CreateCheckoutRequest,
    ) -> Result<ProviderCheckout, PaymentGatewayError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payment_gateway_is_object_safe() {
        fn _accepts_dyn(_gateway: &dyn PaymentGateway) {}
    }

    #[test]
    fn network_errors_are_retryable() {
        assert!(PaymentGatewayError::network("timeout").is_retryable());
        assert!(!PaymentGatewayError::Authentication.is_retryable());
        assert!(!PaymentGatewayError::provider(400, "bad request").is_retryable());
    }
}
