//! Subscription activation rule.

use crate::domain::foundation::Timestamp;
use crate::domain::session::{Plan, UserProfile};

/// Length of a paid pro period granted by one completed checkout.
pub const PRO_SUBSCRIPTION_DAYS: i64 = 30;

/// The profile mutation produced by a completed checkout.
///
/// The active flag and the expiry are computed together so they can only be
/// persisted as a pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionActivation {
    pub expires_at: Timestamp,
    pub customer_id: Option<String>,
    pub subscription_id: Option<String>,
}

impl SubscriptionActivation {
    /// Activation starting now, expiring after the standard pro period.
    pub fn starting(
        now: Timestamp,
        customer_id: Option<String>,
        subscription_id: Option<String>,
    ) -> Self {
        Self {
            expires_at: now.add_days(PRO_SUBSCRIPTION_DAYS),
            customer_id,
            subscription_id,
        }
    }

    /// Applies this activation to a profile.
    pub fn apply_to(&self, profile: &mut UserProfile) {
        profile.plan = Plan::Pro;
        profile.pro_subscription_active = true;
        profile.subscription_expires_at = Some(self.expires_at);
        if self.customer_id.is_some() {
            profile.stripe_customer_id = self.customer_id.clone();
        }
        if self.subscription_id.is_some() {
            profile.stripe_subscription_id = self.subscription_id.clone();
        }
    }
}
