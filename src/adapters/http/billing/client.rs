//! HTTP client for the checkout endpoint.
//!
//! Implements the `CheckoutGateway` port by calling this service's own
//! `/api/billing/checkout` route with the caller's bearer token, the way
//! an authenticated frontend would.

use std::time::Duration;

use async_trait::async_trait;

use crate::domain::subscription::CheckoutError;
use crate::ports::{CheckoutGateway, CheckoutLink};

use super::dto::{CheckoutRequest, CheckoutResponse, ErrorResponse};

/// Reqwest-backed checkout gateway.
pub struct HttpCheckoutGateway {
    endpoint_url: String,
    http_client: reqwest::Client,
}

impl HttpCheckoutGateway {
    /// `endpoint_url` is the full checkout endpoint URL.
    pub fn new(endpoint_url: impl Into<String>) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .unwrap_or_default();

        Self {
            endpoint_url: endpoint_url.into(),
            http_client,
        }
    }
}

#[async_trait]
impl CheckoutGateway for HttpCheckoutGateway {
    async fn create_checkout(
        &self,
        access_token: &str,
        email: &str,
    ) -> Result<CheckoutLink, CheckoutError> {
        let response = self
            .http_client
            .post(&self.endpoint_url)
            .bearer_auth(access_token)
            .json(&CheckoutRequest {
                customer_email: Some(email.to_string()),
            })
            .send()
            .await
            .map_err(|e| CheckoutError::network(e.to_string()))?;

        let status = response.status();

        if status.as_u16() == 401 {
            return Err(CheckoutError::Unauthenticated);
        }

        if !status.is_success() {
            let body: ErrorResponse = response.json().await.unwrap_or_else(|_| {
                ErrorResponse::new("UNKNOWN", "no error body")
            });
            if body.error == "MISSING_EMAIL" {
                return Err(CheckoutError::MissingEmail);
            }
            return Err(CheckoutError::endpoint(status.as_u16(), body.message));
        }

        let body: CheckoutResponse = response
            .json()
            .await
            .map_err(|_| CheckoutError::MissingUrl)?;

        if body.url.is_empty() {
            return Err(CheckoutError::MissingUrl);
        }

        Ok(CheckoutLink { url: body.url })
    }
}
