//! AuthSynchronizer - the single writer of the session store.
//!
//! Consumes provider auth events in order, enriches sessions with the
//! stored profile, and returns navigation intents. It never navigates
//! itself and it never lets a profile-fetch failure sign the user out.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::session::{
    AuthEvent, NavigationIntent, PageContext, Session, SessionStore, UserProfile,
};
use crate::ports::{AuthGateway, ProfileReader};

/// Serializes auth events into session store updates.
///
/// Holds the redirect bookkeeping that makes the post-sign-in redirect
/// fire exactly once per sign-in, and the recovery flag that suppresses
/// it during password recovery. Callers wrap it in a mutex so events are
/// processed strictly in arrival order.
pub struct AuthSynchronizer {
    store: SessionStore,
    gateway: Arc<dyn AuthGateway>,
    profiles: Arc<dyn ProfileReader>,
    recovery_active: bool,
    redirected: bool,
}

impl AuthSynchronizer {
    pub fn new(
        store: SessionStore,
        gateway: Arc<dyn AuthGateway>,
        profiles: Arc<dyn ProfileReader>,
    ) -> Self {
        Self {
            store,
            gateway,
            profiles,
            recovery_active: false,
            redirected: false,
        }
    }

    /// Restores the persisted session, if any, and processes it as the
    /// initial event. A gateway failure degrades to the unauthenticated
    /// state instead of leaving the store loading forever.
    pub async fn initialize(&mut self, page: PageContext) -> NavigationIntent {
        let session = match self.gateway.current_session().await {
            Ok(session) => session,
            Err(e) => {
                warn!(error = %e, "session restoration failed, starting unauthenticated");
                None
            }
        };

        self.process(AuthEvent::Initial(session), page).await
    }

    /// Processes one auth event and returns what the caller should do next.
    pub async fn process(&mut self, event: AuthEvent, page: PageContext) -> NavigationIntent {
        match event {
            AuthEvent::Initial(Some(session)) | AuthEvent::SignedIn(session) => {
                self.establish(session).await;
                self.redirect_after_sign_in(page)
            }
            AuthEvent::Initial(None) => {
                self.store.clear();
                NavigationIntent::None
            }
            AuthEvent::TokenRefreshed(session) => {
                // Token rotation must not trigger navigation.
                self.establish(session).await;
                NavigationIntent::None
            }
            AuthEvent::PasswordRecovery(session) => {
                self.recovery_active = true;
                self.establish(session).await;
                NavigationIntent::None
            }
            AuthEvent::SignedOut | AuthEvent::UserDeleted => {
                self.store.clear();
                self.recovery_active = false;
                self.redirected = false;
                if page == PageContext::Recovery {
                    NavigationIntent::None
                } else {
                    NavigationIntent::ToLogin
                }
            }
        }
    }

    /// Marks recovery as finished, re-enabling the sign-in redirect.
    pub fn end_recovery(&mut self) {
        self.recovery_active = false;
    }

    /// Read access for callers that share this synchronizer's store.
    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Installs the session with its enriched profile.
    async fn establish(&self, session: Session) {
        let profile = self.enrich(&session).await;
        self.store.set_authenticated(session, profile);
    }

    /// Fetches the stored profile for the session, degrading to a minimal
    /// profile when the fetch fails or the row is missing.
    async fn enrich(&self, session: &Session) -> UserProfile {
        match self.profiles.find_by_user_id(&session.user_id).await {
            Ok(Some(profile)) => profile,
            Ok(None) => {
                debug!(user_id = %session.user_id, "no profile row, using defaults");
                self.minimal_profile(session)
            }
            Err(e) => {
                warn!(error = %e, "profile fetch failed, using defaults");
                self.minimal_profile(session)
            }
        }
    }

    fn minimal_profile(&self, session: &Session) -> UserProfile {
        UserProfile::minimal(
            session.user_id.clone(),
            session.email.clone().unwrap_or_default(),
        )
    }

    fn redirect_after_sign_in(&mut self, page: PageContext) -> NavigationIntent {
        if page == PageContext::Login && !self.recovery_active && !self.redirected {
            self.redirected = true;
            NavigationIntent::ToDashboard
        } else {
            NavigationIntent::None
        }
    }
}
