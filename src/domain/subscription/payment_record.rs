//! Append-only payment record.

use crate::domain::foundation::{PaymentId, Timestamp, UserId};

use super::payment_event::CheckoutSessionObject;

/// One row in the payment audit trail.
///
/// Records are inserted once per reconciled checkout and never updated.
/// The provider ids are kept here as well as on the profile, so the
/// trail stays complete even after the profile is overwritten by a
/// later checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentRecord {
    pub id: PaymentId,
    pub user_id: UserId,
    pub email: String,
    pub provider_session_id: String,
    pub stripe_customer_id: Option<String>,
    pub stripe_subscription_id: Option<String>,
    pub amount_total: Option<i64>,
    pub currency: Option<String>,
    pub payment_status: Option<String>,
    pub created_at: Timestamp,
}

impl PaymentRecord {
    /// Builds a record from a completed checkout session.
    pub fn from_checkout(user_id: UserId, session: &CheckoutSessionObject, now: Timestamp) -> Self {
        Self {
            id: PaymentId::new(),
            user_id,
            email: session.email().unwrap_or_default().to_string(),
            provider_session_id: session.id.clone(),
            stripe_customer_id: session.customer.clone(),
            stripe_subscription_id: session.subscription.clone(),
            amount_total: session.amount_total,
            currency: session.currency.clone(),
            payment_status: session.payment_status.clone(),
            created_at: now,
        }
    }
}
