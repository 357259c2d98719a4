//! Stripe payment gateway adapter.
//!
//! Implements the `PaymentGateway` port against the Stripe checkout
//! sessions API. Requests are form-encoded, authenticated with the secret
//! key over basic auth.
//!
//! # Security
//!
//! - The API key is held in `secrecy::SecretString`
//! - Webhook verification lives in the domain (`WebhookVerifier`), not here

use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::warn;

use crate::ports::{CreateCheckoutRequest, PaymentGateway, PaymentGatewayError, ProviderCheckout};

/// Stripe API configuration.
#[derive(Clone)]
pub struct StripeConfig {
    /// Secret API key (sk_live_... or sk_test_...).
    api_key: SecretString,

    /// Base URL for the Stripe API.
    api_base_url: String,
}

impl StripeConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::new(api_key.into()),
            api_base_url: "https://api.stripe.com".to_string(),
        }
    }

    /// Set a custom API base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }
}

/// Checkout session response from Stripe.
#[derive(Debug, Deserialize)]
struct CheckoutSessionResponse {
    id: String,
    url: Option<String>,
}

/// Error envelope from Stripe.
#[derive(Debug, Deserialize, Default)]
struct StripeErrorResponse {
    #[serde(default)]
    error: StripeErrorBody,
}

#[derive(Debug, Deserialize, Default)]
struct StripeErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// Stripe implementation of the payment gateway.
pub struct StripePaymentGateway {
    config: StripeConfig,
    http_client: reqwest::Client,
}

impl StripePaymentGateway {
    pub fn new(config: StripeConfig) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .unwrap_or_default();

        Self {
            config,
            http_client,
        }
    }
}

#[async_trait]
impl PaymentGateway for StripePaymentGateway {
    async fn create_checkout_session(
        &self,
        request: CreateCheckoutRequest,
    ) -> Result<ProviderCheckout, PaymentGatewayError> {
        let url = format!("{}/v1/checkout/sessions", self.config.api_base_url);

        let params = [
            ("mode", "subscription"),
            ("customer_email", &request.customer_email),
            ("line_items[0][price]", &request.price_id),
            ("line_items[0][quantity]", "1"),
            ("success_url", &request.success_url),
            ("cancel_url", &request.cancel_url),
        ];

        let response = self
            .http_client
            .post(&url)
            .basic_auth(self.config.api_key.expose_secret(), Option::<&str>::None)
            .form(&params)
            .send()
            .await
            .map_err(|e| PaymentGatewayError::network(e.to_string()))?;

        let status = response.status();

        if status.as_u16() == 401 {
            return Err(PaymentGatewayError::Authentication);
        }

        if !status.is_success() {
            let body: StripeErrorResponse = response.json().await.unwrap_or_default();
            let message = body.error.message.unwrap_or_default();
            warn!(status = status.as_u16(), %message, "checkout session creation failed");
            return Err(PaymentGatewayError::provider(status.as_u16(), message));
        }

        let session: CheckoutSessionResponse = response
            .json()
            .await
            .map_err(|e| PaymentGatewayError::network(format!("malformed response: {e}")))?;

        let checkout_url = session.url.unwrap_or_default();
        if checkout_url.is_empty() {
            return Err(PaymentGatewayError::provider(
                status.as_u16(),
                "checkout session has no URL",
            ));
        }

        Ok(ProviderCheckout {
            id: session.id,
            url: checkout_url,
        })
    }
}
