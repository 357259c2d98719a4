//! Profile reader port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::session::UserProfile;

/// Read access to stored user profiles.
///
/// Implementations validate rows at the boundary and return typed profiles;
/// a missing profile is `Ok(None)`, not an error.
#[async_trait]
pub trait ProfileReader: Send + Sync {
    /// Fetches a profile by its provider-issued user id.
    async fn find_by_user_id(&self, user_id: &UserId)
        -> Result<Option<UserProfile>, DomainError>;

    /// Fetches a profile by email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<UserProfile>, DomainError>;
}
