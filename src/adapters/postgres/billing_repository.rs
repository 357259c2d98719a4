//! PostgreSQL implementation of BillingRepository.
//!
//! The subscription upgrade and the payment insert run in one transaction,
//! so the active flag, the expiry, and the audit row commit together or
//! not at all.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::domain::subscription::{PaymentRecord, SubscriptionActivation};
use crate::ports::BillingRepository;

/// PostgreSQL implementation of the BillingRepository port.
pub struct PostgresBillingRepository {
    pool: PgPool,
}

impl PostgresBillingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BillingRepository for PostgresBillingRepository {
    async fn apply_checkout_completed(
        &self,
        user_id: &UserId,
        activation: &SubscriptionActivation,
        payment: &PaymentRecord,
    ) -> Result<(), DomainError> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to begin transaction: {}", e),
            )
        })?;

        let result = sqlx::query(
            r#"
            UPDATE user_profiles SET
                plan = 'pro',
                pro_subscription_active = TRUE,
                subscription_expires_at = $2,
                stripe_customer_id = COALESCE($3, stripe_customer_id),
                stripe_subscription_id = COALESCE($4, stripe_subscription_id),
                updated_at = NOW()
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_str())
        .bind(activation.expires_at.as_datetime())
        .bind(&activation.customer_id)
        .bind(&activation.subscription_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to update subscription: {}", e),
            )
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::ProfileNotFound,
                format!("No profile for user {}", user_id),
            ));
        }

        sqlx::query(
            r#"
            INSERT INTO payments (
                id, user_id, email, provider_session_id,
                stripe_customer_id, stripe_subscription_id,
                amount_total, currency, payment_status, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(payment.id.as_uuid())
        .bind(payment.user_id.as_str())
        .bind(&payment.email)
        .bind(&payment.provider_session_id)
        .bind(&payment.stripe_customer_id)
        .bind(&payment.stripe_subscription_id)
        .bind(payment.amount_total)
        .bind(&payment.currency)
        .bind(&payment.payment_status)
        .bind(payment.created_at.as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to insert payment: {}", e),
            )
        })?;

        tx.commit().await.map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to commit transaction: {}", e),
            )
        })?;

        Ok(())
    }
}
