//! Application user profile as stored in the backend.
//!
//! The profile is the typed counterpart of the `user_profiles` row; rows are
//! validated at the storage boundary instead of being passed around as
//! loosely-typed records.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Timestamp, UserId};

/// Application role. The grading domain has a single role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Teacher,
}

impl Role {
    /// Parse a role from its storage representation.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "teacher" => Some(Self::Teacher),
            _ => None,
        }
    }

    /// Storage representation of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Teacher => "teacher",
        }
    }
}

/// Subscription plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Plan {
    Free,
    Pro,
}

impl Plan {
    /// Parse a plan from its storage representation.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "free" => Some(Self::Free),
            "pro" => Some(Self::Pro),
            _ => None,
        }
    }

    /// Storage representation of the plan.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Pro => "pro",
        }
    }
}

/// The resolved application user profile.
///
/// Created on first sign-up, mutated by the payment webhook (subscription
/// fields) and by the user (email/password changes).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_id: UserId,
    pub email: String,
    pub role: Role,
    pub plan: Plan,
    pub pro_subscription_active: bool,
    pub subscription_expires_at: Option<Timestamp>,
    pub stripe_customer_id: Option<String>,
    pub stripe_subscription_id: Option<String>,
}

impl UserProfile {
    /// Minimal profile derived from the session alone.
    ///
    /// Used as the enrichment fallback when the profile fetch fails: a
    /// backend hiccup must degrade to defaults, not sign the user out.
    pub fn minimal(user_id: UserId, email: impl Into<String>) -> Self {
        Self {
            user_id,
            email: email.into(),
            role: Role::Teacher,
            plan: Plan::Free,
            pro_subscription_active: false,
            subscription_expires_at: None,
            stripe_customer_id: None,
            stripe_subscription_id: None,
        }
    }

    /// True if the pro subscription is flagged active and unexpired.
    pub fn has_active_pro(&self) -> bool {
        self.pro_subscription_active
            && self
                .subscription_expires_at
                .map(|t| t.is_future())
                .unwrap_or(false)
    }

    /// Checks the active/expiry pairing invariant.
    ///
    /// `pro_subscription_active = true` must imply a non-null future
    /// `subscription_expires_at`; the two fields are only written together.
    pub fn subscription_invariant_holds(&self) -> bool {
        if !self.pro_subscription_active {
            return true;
        }
        self.subscription_expires_at
            .map(|t| t.is_future())
            .unwrap_or(false)
    }
}
