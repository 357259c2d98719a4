//! HTTP handlers for the billing endpoints.
//!
//! These handlers connect Axum routes to application layer handlers.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::{Extension, Json};
use tracing::{info, warn};

use crate::application::handlers::subscription::{
    HandlePaymentWebhookCommand, HandlePaymentWebhookHandler, WebhookDisposition,
};
use crate::domain::subscription::{WebhookError, WebhookVerifier};
use crate::ports::{BillingRepository, Clock, CreateCheckoutRequest, PaymentGateway, ProfileReader};

use super::dto::{CheckoutRequest, CheckoutResponse, ErrorResponse};
use crate::adapters::http::middleware::AuthenticatedUser;

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Checkout parameters fixed at startup.
#[derive(Debug, Clone)]
pub struct CheckoutParams {
    pub price_id: String,
    pub success_url: String,
    pub cancel_url: String,
}

/// Shared state for the billing routes.
#[derive(Clone)]
pub struct BillingAppState {
    pub profiles: Arc<dyn ProfileReader>,
    pub billing: Arc<dyn BillingRepository>,
    pub payment_gateway: Arc<dyn PaymentGateway>,
    pub clock: Arc<dyn Clock>,
    pub webhook_verifier: Arc<WebhookVerifier>,
    pub checkout: CheckoutParams,
}

impl BillingAppState {
    fn webhook_handler(&self) -> HandlePaymentWebhookHandler {
        HandlePaymentWebhookHandler::new(
            self.profiles.clone(),
            self.billing.clone(),
            self.clock.clone(),
        )
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/billing/checkout - Create a hosted checkout session.
///
/// Requires a bearer token (enforced by middleware). The email comes from
/// the request body when present, otherwise from the token claim.
pub async fn create_checkout(
    State(state): State<BillingAppState>,
    Extension(user): Extension<AuthenticatedUser>,
    body: Option<Json<CheckoutRequest>>,
) -> Result<impl IntoResponse, BillingApiError> {
    let requested_email = body.and_then(|Json(b)| b.customer_email);

    let email = requested_email
        .or(user.email)
        .filter(|e| !e.is_empty())
        .ok_or(BillingApiError::MissingEmail)?;

    let checkout = state
        .payment_gateway
        .create_checkout_session(CreateCheckoutRequest {
            customer_email: email,
            price_id: state.checkout.price_id.clone(),
            success_url: state.checkout.success_url.clone(),
            cancel_url: state.checkout.cancel_url.clone(),
        })
        .await
        .map_err(BillingApiError::Gateway)?;

    info!(user_id = %user.user_id, session_id = %checkout.id, "checkout session created");

    Ok((StatusCode::OK, Json(CheckoutResponse { url: checkout.url })))
}

/// POST /api/webhooks/payment - Receive payment provider events.
///
/// Signature verification happens before any parsing of the body; the
/// provider retries on non-2xx, so status codes distinguish permanent
/// rejections (4xx) from retryable persistence failures (500).
pub async fn handle_payment_webhook(
    State(state): State<BillingAppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, BillingApiError> {
    let signature = headers
        .get("Stripe-Signature")
        .and_then(|v| v.to_str().ok())
        .ok_or(BillingApiError::Webhook(WebhookError::InvalidSignature))?;

    let event = state
        .webhook_verifier
        .verify_and_parse(&body, signature)
        .map_err(BillingApiError::Webhook)?;

    let disposition = state
        .webhook_handler()
        .handle(HandlePaymentWebhookCommand { event })
        .await
        .map_err(BillingApiError::Webhook)?;

    let body = match disposition {
        WebhookDisposition::Applied { user_id } => {
            serde_json::json!({ "received": true, "applied": true, "user_id": user_id })
        }
        WebhookDisposition::Ignored => {
            serde_json::json!({ "received": true, "applied": false })
        }
    };

    Ok((StatusCode::OK, Json(body)))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Mapping
// ════════════════════════════════════════════════════════════════════════════════

/// API-level error wrapper for the billing routes.
#[derive(Debug)]
pub enum BillingApiError {
    MissingEmail,
    Gateway(crate::ports::PaymentGatewayError),
    Webhook(WebhookError),
}

impl IntoResponse for BillingApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, error, message) = match &self {
            BillingApiError::MissingEmail => (
                StatusCode::BAD_REQUEST,
                "MISSING_EMAIL",
                "No email address available for checkout".to_string(),
            ),
            BillingApiError::Gateway(e) => {
                warn!(error = %e, "payment gateway call failed");
                (
                    StatusCode::BAD_GATEWAY,
                    "PAYMENT_PROVIDER_ERROR",
                    "Could not create checkout session".to_string(),
                )
            }
            BillingApiError::Webhook(e) => match e {
                WebhookError::InvalidSignature
                | WebhookError::TimestampOutOfRange
                | WebhookError::InvalidTimestamp => (
                    StatusCode::UNAUTHORIZED,
                    "INVALID_SIGNATURE",
                    "Webhook signature verification failed".to_string(),
                ),
                WebhookError::ParseError(msg) => {
                    (StatusCode::BAD_REQUEST, "INVALID_PAYLOAD", msg.clone())
                }
                WebhookError::UserNotFound(email) => (
                    StatusCode::NOT_FOUND,
                    "USER_NOT_FOUND",
                    format!("No user for email {email}"),
                ),
                WebhookError::Storage(msg) => {
                    warn!(error = %msg, "webhook persistence failed");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "STORAGE_ERROR",
                        "Failed to apply webhook".to_string(),
                    )
                }
            },
        };

        (status, Json(ErrorResponse::new(error, message))).into_response()
    }
}
