//! Billing repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::subscription::{PaymentRecord, SubscriptionActivation};

/// Atomic persistence for subscription reconciliation.
///
/// The activation write and the payment insert must commit or roll back
/// together; implementations perform both in one transaction.
#[async_trait]
pub trait BillingRepository: Send + Sync {
    /// Applies a completed checkout: upgrades the profile's subscription
    /// fields as a pair and appends the payment record.
    ///
    /// # Errors
    ///
    /// - `ProfileNotFound` if no profile row matches `user_id`
    /// - `DatabaseError` if either write fails (nothing is persisted)
    async fn apply_checkout_completed(
        &self,
        user_id: &UserId,
        activation: &SubscriptionActivation,
        payment: &PaymentRecord,
    ) -> Result<(), DomainError>;
}
