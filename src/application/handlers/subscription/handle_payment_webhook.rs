//! HandlePaymentWebhookHandler - Command handler for payment provider webhooks.
//!
//! Reconciles `checkout.session.completed` events against stored profiles
//! by the checkout email and applies the activation and the payment record
//! atomically. Every other event type is acknowledged and dropped.
//!
//! Known gap: events are not deduplicated by id, so a provider redelivery
//! re-applies the activation (extending the expiry from the later delivery
//! time) and appends a second payment record.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::foundation::ErrorCode;
use crate::domain::subscription::{
    PaymentEvent, PaymentEventType, PaymentRecord, SubscriptionActivation, WebhookError,
};
use crate::ports::{BillingRepository, Clock, ProfileReader};

/// Command carrying a verified, parsed webhook event.
#[derive(Debug, Clone)]
pub struct HandlePaymentWebhookCommand {
    pub event: PaymentEvent,
}

/// What happened to the event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookDisposition {
    /// A subscription was activated and a payment recorded.
    Applied { user_id: String },
    /// The event type is not handled; acknowledged without side effects.
    Ignored,
}

/// Handler for verified payment webhooks.
pub struct HandlePaymentWebhookHandler {
    profiles: Arc<dyn ProfileReader>,
    billing: Arc<dyn BillingRepository>,
    clock: Arc<dyn Clock>,
}

impl HandlePaymentWebhookHandler {
    pub fn new(
        profiles: Arc<dyn ProfileReader>,
        billing: Arc<dyn BillingRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            profiles,
            billing,
            clock,
        }
    }

    pub async fn handle(
        &self,
        cmd: HandlePaymentWebhookCommand,
    ) -> Result<WebhookDisposition, WebhookError> {
        match cmd.event.kind() {
            PaymentEventType::CheckoutSessionCompleted => {
                self.apply_checkout_completed(&cmd.event).await
            }
            PaymentEventType::Unknown => {
                info!(event_type = %cmd.event.event_type, "ignoring unhandled webhook event");
                Ok(WebhookDisposition::Ignored)
            }
        }
    }

    async fn apply_checkout_completed(
        &self,
        event: &PaymentEvent,
    ) -> Result<WebhookDisposition, WebhookError> {
        let session = event.checkout_session()?;

        let email = session
            .email()
            .ok_or_else(|| WebhookError::parse("checkout session carries no email"))?
            .to_string();

        let profile = self
            .profiles
            .find_by_email(&email)
            .await
            .map_err(|e| WebhookError::storage(e.to_string()))?
            .ok_or_else(|| WebhookError::UserNotFound(email.clone()))?;

        let now = self.clock.now();
        let activation = SubscriptionActivation::starting(
            now,
            session.customer.clone(),
            session.subscription.clone(),
        );
        let payment = PaymentRecord::from_checkout(profile.user_id.clone(), &session, now);

        self.billing
            .apply_checkout_completed(&profile.user_id, &activation, &payment)
            .await
            .map_err(|e| {
                warn!(user_id = %profile.user_id, error = %e, "checkout reconciliation failed");
                if e.code == ErrorCode::ProfileNotFound {
                    WebhookError::UserNotFound(email.clone())
                } else {
                    WebhookError::storage(e.to_string())
                }
            })?;

        info!(user_id = %profile.user_id, session_id = %session.id, "subscription activated");

        Ok(WebhookDisposition::Applied {
            user_id: profile.user_id.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    use crate::domain::foundation::{DomainError, Timestamp, UserId};
    use crate::domain::session::UserProfile;
    use crate::domain::subscription::PRO_SUBSCRIPTION_DAYS;

    struct MockProfiles {
        by_email: Option<UserProfile>,
    }

    #[async_trait]
    impl ProfileReader for MockProfiles {
        async fn find_by_user_id(
            &self,
            _user_id: &UserId,
        ) -> Result<Option<UserProfile>, DomainError> {
            Ok(None)
        }

        async fn find_by_email(&self, _email: &str) -> Result<Option<UserProfile>, DomainError> {
            Ok(self.by_email.clone())
        }
    }

    struct MockBilling {
        fail: bool,
        applied: Mutex<Vec<(UserId, SubscriptionActivation, PaymentRecord)>>,
    }

    impl MockBilling {
        fn new() -> Self {
            Self {
                fail: false,
                applied: Mutex::new(Vec::new()),
            }
        }

        fn failing() -> Self {
            Self {
                fail: true,
                applied: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl BillingRepository for MockBilling {
        async fn apply_checkout_completed(
            &self,
            user_id: &UserId,
            activation: &SubscriptionActivation,
            payment: &PaymentRecord,
        ) -> Result<(), DomainError> {
            if self.fail {
                return Err(DomainError::database("insert failed"));
            }
            self.applied.lock().unwrap().push((
                user_id.clone(),
                activation.clone(),
                payment.clone(),
            ));
            Ok(())
        }
    }

    struct FixedClock(Timestamp);

    impl Clock for FixedClock {
        fn now(&self) -> Timestamp {
            self.0
        }
    }

    fn known_profile() -> UserProfile {
        UserProfile::minimal(UserId::new("user-123").unwrap(), "t@school.example")
    }

    fn completed_event(object: serde_json::Value) -> PaymentEvent {
        serde_json::from_value(json!({
            "id": "evt_1",
            "type": "checkout.session.completed",
            "created": 1704067200,
            "data": { "object": object },
            "livemode": false
        }))
        .unwrap()
    }

    fn handler(
        profiles: MockProfiles,
        billing: Arc<MockBilling>,
        now: Timestamp,
    ) -> HandlePaymentWebhookHandler {
        HandlePaymentWebhookHandler::new(Arc::new(profiles), billing, Arc::new(FixedClock(now)))
    }

    #[tokio::test]
    async fn completed_checkout_activates_subscription_for_thirty_days() {
        let billing = Arc::new(MockBilling::new());
        let now = Timestamp::from_unix_secs(1_705_276_800);
        let h = handler(
            MockProfiles {
                by_email: Some(known_profile()),
            },
            billing.clone(),
            now,
        );

        let disposition = h
            .handle(HandlePaymentWebhookCommand {
                event: completed_event(json!({
                    "id": "cs_1",
                    "customer": "cus_1",
                    "subscription": "sub_1",
                    "customer_email": "t@school.example",
                    "amount_total": 999,
                    "currency": "usd",
                    "payment_status": "paid"
                })),
            })
            .await
            .unwrap();

        assert_eq!(
            disposition,
            WebhookDisposition::Applied {
                user_id: "user-123".to_string()
            }
        );

        let applied = billing.applied.lock().unwrap();
        assert_eq!(applied.len(), 1);
        let (user_id, activation, payment) = &applied[0];
        assert_eq!(user_id.as_str(), "user-123");
        assert_eq!(
            activation.expires_at.as_unix_secs() - now.as_unix_secs(),
            (PRO_SUBSCRIPTION_DAYS * 86_400) as u64
        );
        assert_eq!(activation.customer_id.as_deref(), Some("cus_1"));
        assert_eq!(payment.provider_session_id, "cs_1");
        assert_eq!(payment.email, "t@school.example");
        assert_eq!(payment.stripe_customer_id.as_deref(), Some("cus_1"));
        assert_eq!(payment.stripe_subscription_id.as_deref(), Some("sub_1"));
        assert_eq!(payment.amount_total, Some(999));
    }

    #[tokio::test]
    async fn other_event_types_are_ignored_without_side_effects() {
        let billing = Arc::new(MockBilling::new());
        let h = handler(
            MockProfiles {
                by_email: Some(known_profile()),
            },
            billing.clone(),
            Timestamp::now(),
        );

        let event: PaymentEvent = serde_json::from_value(json!({
            "id": "evt_2",
            "type": "invoice.payment_succeeded",
            "data": { "object": {} }
        }))
        .unwrap();

        let disposition = h
            .handle(HandlePaymentWebhookCommand { event })
            .await
            .unwrap();

        assert_eq!(disposition, WebhookDisposition::Ignored);
        assert!(billing.applied.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_email_is_user_not_found() {
        let billing = Arc::new(MockBilling::new());
        let h = handler(MockProfiles { by_email: None }, billing.clone(), Timestamp::now());

        let err = h
            .handle(HandlePaymentWebhookCommand {
                event: completed_event(json!({
                    "id": "cs_2",
                    "customer_email": "stranger@school.example"
                })),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, WebhookError::UserNotFound(email) if email == "stranger@school.example"));
        assert!(billing.applied.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_email_is_a_parse_error() {
        let billing = Arc::new(MockBilling::new());
        let h = handler(
            MockProfiles {
                by_email: Some(known_profile()),
            },
            billing.clone(),
            Timestamp::now(),
        );

        let err = h
            .handle(HandlePaymentWebhookCommand {
                event: completed_event(json!({ "id": "cs_3" })),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, WebhookError::ParseError(_)));
    }

    #[tokio::test]
    async fn persistence_failure_surfaces_as_storage_error() {
        let billing = Arc::new(MockBilling::failing());
        let h = handler(
            MockProfiles {
                by_email: Some(known_profile()),
            },
            billing,
            Timestamp::now(),
        );

        let err = h
            .handle(HandlePaymentWebhookCommand {
                event: completed_event(json!({
                    "id": "cs_4",
                    "customer_email": "t@school.example"
                })),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, WebhookError::Storage(_)));
    }

    /// Redelivered events are applied again: the expiry is recomputed from
    /// the later delivery and a second payment row is appended. Dedup by
    /// event id would make this a no-op; it is not implemented.
    #[tokio::test]
    async fn redelivered_event_applies_twice() {
        let billing = Arc::new(MockBilling::new());
        let h = handler(
            MockProfiles {
                by_email: Some(known_profile()),
            },
            billing.clone(),
            Timestamp::now(),
        );

        let event = completed_event(json!({
            "id": "cs_5",
            "customer_email": "t@school.example"
        }));

        h.handle(HandlePaymentWebhookCommand {
            event: event.clone(),
        })
        .await
        .unwrap();
        h.handle(HandlePaymentWebhookCommand { event })
            .await
            .unwrap();

        assert_eq!(billing.applied.lock().unwrap().len(), 2);
    }
}
