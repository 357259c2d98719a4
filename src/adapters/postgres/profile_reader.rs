//! PostgreSQL implementation of ProfileReader.
//!
//! Rows are validated at this boundary; the rest of the crate only sees
//! typed `UserProfile` values.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, UserId};
use crate::domain::session::{Plan, Role, UserProfile};
use crate::ports::ProfileReader;

/// PostgreSQL implementation of the ProfileReader port.
pub struct PostgresProfileReader {
    pool: PgPool,
}

impl PostgresProfileReader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a user profile.
#[derive(Debug, sqlx::FromRow)]
struct ProfileRow {
    user_id: String,
    email: String,
    role: String,
    plan: String,
    pro_subscription_active: bool,
    subscription_expires_at: Option<DateTime<Utc>>,
    stripe_customer_id: Option<String>,
    stripe_subscription_id: Option<String>,
}

impl TryFrom<ProfileRow> for UserProfile {
    type Error = DomainError;

    fn try_from(row: ProfileRow) -> Result<Self, Self::Error> {
        let user_id = UserId::new(row.user_id).map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Invalid user_id: {}", e))
        })?;
        let role = Role::from_str(&row.role).ok_or_else(|| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Invalid role value: {}", row.role),
            )
        })?;
        let plan = Plan::from_str(&row.plan).ok_or_else(|| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Invalid plan value: {}", row.plan),
            )
        })?;

        Ok(UserProfile {
            user_id,
            email: row.email,
            role,
            plan,
            pro_subscription_active: row.pro_subscription_active,
            subscription_expires_at: row.subscription_expires_at.map(Timestamp::from_datetime),
            stripe_customer_id: row.stripe_customer_id,
            stripe_subscription_id: row.stripe_subscription_id,
        })
    }
}

const PROFILE_COLUMNS: &str = r#"
    user_id, email, role, plan, pro_subscription_active,
    subscription_expires_at, stripe_customer_id, stripe_subscription_id
"#;

#[async_trait]
impl ProfileReader for PostgresProfileReader {
    async fn find_by_user_id(
        &self,
        user_id: &UserId,
    ) -> Result<Option<UserProfile>, DomainError> {
        let row: Option<ProfileRow> = sqlx::query_as(&format!(
            "SELECT {PROFILE_COLUMNS} FROM user_profiles WHERE user_id = $1"
        ))
        .bind(user_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch profile: {}", e),
            )
        })?;

        row.map(UserProfile::try_from).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserProfile>, DomainError> {
        let row: Option<ProfileRow> = sqlx::query_as(&format!(
            "SELECT {PROFILE_COLUMNS} FROM user_profiles WHERE lower(email) = lower($1)"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch profile by email: {}", e),
            )
        })?;

        row.map(UserProfile::try_from).transpose()
    }
}
