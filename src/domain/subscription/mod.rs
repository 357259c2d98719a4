//! Subscription module - Pro upgrades and payment reconciliation.
//!
//! Covers the payment-provider event types, webhook signature verification,
//! the 30-day activation rule, and the append-only payment record.

mod activation;
mod errors;
mod payment_event;
mod payment_record;
mod webhook_verifier;

pub use activation::{SubscriptionActivation, PRO_SUBSCRIPTION_DAYS};
pub use errors::{CheckoutError, WebhookError};
pub use payment_event::{CheckoutSessionObject, PaymentEvent, PaymentEventType};
pub use payment_record::PaymentRecord;
pub use webhook_verifier::{SignatureHeader, WebhookVerifier};
