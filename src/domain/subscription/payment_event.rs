//! Payment-provider webhook event types.
//!
//! Only `checkout.session.completed` is interpreted; every other event type
//! is acknowledged and dropped. The nested object is kept as raw JSON until
//! the event type is known, then deserialized into the concrete shape.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::errors::WebhookError;

/// A webhook event as delivered by the payment provider.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PaymentEvent {
    /// Provider event id (`evt_...`).
    #[serde(default)]
    pub id: String,

    /// Event type string, e.g. `checkout.session.completed`.
    #[serde(rename = "type")]
    pub event_type: String,

    /// Unix timestamp when the event was created.
    #[serde(default)]
    pub created: i64,

    /// The event payload.
    pub data: PaymentEventData,

    /// True for live-mode events.
    #[serde(default)]
    pub livemode: bool,
}

/// The `data` envelope of a payment event.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PaymentEventData {
    /// The raw provider object; shape depends on the event type.
    pub object: Value,
}

impl PaymentEvent {
    /// The typed event kind.
    pub fn kind(&self) -> PaymentEventType {
        PaymentEventType::from_str(&self.event_type)
    }

    /// Deserializes the nested object as a completed checkout session.
    pub fn checkout_session(&self) -> Result<CheckoutSessionObject, WebhookError> {
        serde_json::from_value(self.data.object.clone())
            .map_err(|e| WebhookError::parse(format!("invalid checkout session object: {e}")))
    }

    /// True for live-mode events.
    pub fn is_live(&self) -> bool {
        self.livemode
    }
}

/// Recognized payment event types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentEventType {
    /// A hosted checkout session finished and was paid.
    CheckoutSessionCompleted,
    /// Any event type this crate does not handle.
    Unknown,
}

impl PaymentEventType {
    pub fn from_str(s: &str) -> Self {
        match s {
            "checkout.session.completed" => Self::CheckoutSessionCompleted,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CheckoutSessionCompleted => "checkout.session.completed",
            Self::Unknown => "unknown",
        }
    }
}

/// The checkout session object carried by `checkout.session.completed`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CheckoutSessionObject {
    /// Session id (`cs_...`).
    pub id: String,

    /// Provider customer id (`cus_...`).
    #[serde(default)]
    pub customer: Option<String>,

    /// Provider subscription id (`sub_...`).
    #[serde(default)]
    pub subscription: Option<String>,

    /// Email the session was created with.
    #[serde(default)]
    pub customer_email: Option<String>,

    /// Details collected during checkout, including the email actually used.
    #[serde(default)]
    pub customer_details: Option<CustomerDetails>,

    /// Total amount in the smallest currency unit.
    #[serde(default)]
    pub amount_total: Option<i64>,

    /// ISO currency code.
    #[serde(default)]
    pub currency: Option<String>,

    /// Payment status, e.g. `paid`.
    #[serde(default)]
    pub payment_status: Option<String>,
}

/// Customer details nested inside a checkout session.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CustomerDetails {
    #[serde(default)]
    pub email: Option<String>,
}

impl CheckoutSessionObject {
    /// The email to reconcile against, preferring the session-level field
    /// and falling back to the collected customer details.
    pub fn email(&self) -> Option<&str> {
        self.customer_email
            .as_deref()
            .or_else(|| self.customer_details.as_ref()?.email.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn completed_event(object: Value) -> PaymentEvent {
        serde_json::from_value(json!({
            "id": "evt_123",
            "type": "checkout.session.completed",
            "created": 1704067200,
            "data": { "object": object },
            "livemode": false
        }))
        .unwrap()
    }

    #[test]
    fn event_type_maps_checkout_completed() {
        assert_eq!(
            PaymentEventType::from_str("checkout.session.completed"),
            PaymentEventType::CheckoutSessionCompleted
        );
        assert_eq!(
            PaymentEventType::from_str("invoice.payment_succeeded"),
            PaymentEventType::Unknown
        );
    }

    #[test]
    fn checkout_session_deserializes_from_event() {
        let event = completed_event(json!({
            "id": "cs_test_1",
            "customer": "cus_1",
            "subscription": "sub_1",
            "customer_email": "t@school.example",
            "amount_total": 999,
            "currency": "usd",
            "payment_status": "paid"
        }));

        let session = event.checkout_session().unwrap();
        assert_eq!(session.id, "cs_test_1");
        assert_eq!(session.email(), Some("t@school.example"));
        assert_eq!(session.customer.as_deref(), Some("cus_1"));
        assert_eq!(session.amount_total, Some(999));
    }

    #[test]
    fn email_falls_back_to_customer_details() {
        let event = completed_event(json!({
            "id": "cs_test_2",
            "customer_details": { "email": "detail@school.example" }
        }));

        let session = event.checkout_session().unwrap();
        assert_eq!(session.email(), Some("detail@school.example"));
    }

    #[test]
    fn email_is_none_when_absent_everywhere() {
        let event = completed_event(json!({ "id": "cs_test_3" }));
        assert!(event.checkout_session().unwrap().email().is_none());
    }

    #[test]
    fn malformed_object_is_a_parse_error() {
        let event = completed_event(json!("not an object"));
        assert!(matches!(
            event.checkout_session(),
            Err(WebhookError::ParseError(_))
        ));
    }

    #[test]
    fn event_deserializes_without_optional_fields() {
        let event: PaymentEvent = serde_json::from_value(json!({
            "type": "customer.subscription.deleted",
            "data": { "object": {} }
        }))
        .unwrap();

        assert_eq!(event.kind(), PaymentEventType::Unknown);
        assert!(!event.is_live());
    }
}
