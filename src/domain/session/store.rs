//! Observable session store.
//!
//! Single writable source of truth for the current session and profile.
//! Readers subscribe explicitly and receive every state change; nothing in
//! the crate reads auth state from anywhere else.

use std::sync::Arc;

use tokio::sync::watch;

use super::profile::UserProfile;
use super::session::Session;

/// A point-in-time view of the auth state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    /// The current session, if authenticated.
    pub session: Option<Session>,
    /// The enriched profile, present whenever a session is.
    pub profile: Option<UserProfile>,
    /// True until the initial session restoration has completed.
    pub loading: bool,
}

impl SessionSnapshot {
    fn initial() -> Self {
        Self {
            session: None,
            profile: None,
            loading: true,
        }
    }

    /// True if a session is present.
    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }
}

/// Shared observable holder of the auth state.
///
/// Cheap to clone; all clones observe the same state. Writes go through
/// the synchronizer, reads through [`subscribe`](Self::subscribe) or
/// [`snapshot`](Self::snapshot).
#[derive(Debug, Clone)]
pub struct SessionStore {
    inner: Arc<watch::Sender<SessionSnapshot>>,
}

impl SessionStore {
    /// Creates a store in the loading state with no session.
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(SessionSnapshot::initial());
        Self { inner: Arc::new(tx) }
    }

    /// Subscribes to state changes. The receiver immediately sees the
    /// current snapshot and is notified on every subsequent change.
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.inner.subscribe()
    }

    /// Returns the current snapshot.
    pub fn snapshot(&self) -> SessionSnapshot {
        self.inner.borrow().clone()
    }

    /// True if a session is currently held.
    pub fn is_authenticated(&self) -> bool {
        self.inner.borrow().session.is_some()
    }

    /// Sets the loading flag, leaving session and profile untouched.
    pub fn set_loading(&self, loading: bool) {
        self.inner.send_modify(|state| state.loading = loading);
    }

    /// Atomically installs a session and its profile and clears loading.
    ///
    /// Subscribers never observe a session without its profile.
    pub fn set_authenticated(&self, session: Session, profile: UserProfile) {
        self.inner.send_replace(SessionSnapshot {
            session: Some(session),
            profile: Some(profile),
            loading: false,
        });
    }

    /// Replaces only the profile of the current session.
    pub fn set_profile(&self, profile: UserProfile) {
        self.inner.send_modify(|state| state.profile = Some(profile));
    }

    /// Clears session and profile together and ends loading.
    pub fn clear(&self) {
        self.inner.send_replace(SessionSnapshot {
            session: None,
            profile: None,
            loading: false,
        });
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{Timestamp, UserId};

    fn test_session() -> Session {
        Session::new(
            "access",
            "refresh",
            Timestamp::now().plus_secs(3600),
            UserId::new("user-123").unwrap(),
            Some("t@school.example".to_string()),
        )
    }

    fn test_profile() -> UserProfile {
        UserProfile::minimal(UserId::new("user-123").unwrap(), "t@school.example")
    }

    #[test]
    fn new_store_is_loading_and_unauthenticated() {
        let store = SessionStore::new();
        let snapshot = store.snapshot();

        assert!(snapshot.loading);
        assert!(snapshot.session.is_none());
        assert!(snapshot.profile.is_none());
        assert!(!store.is_authenticated());
    }

    #[test]
    fn set_authenticated_installs_session_and_profile_together() {
        let store = SessionStore::new();
        store.set_authenticated(test_session(), test_profile());

        let snapshot = store.snapshot();
        assert!(snapshot.is_authenticated());
        assert!(snapshot.profile.is_some());
        assert!(!snapshot.loading);
    }

    #[test]
    fn clear_removes_session_and_profile_together() {
        let store = SessionStore::new();
        store.set_authenticated(test_session(), test_profile());
        store.clear();

        let snapshot = store.snapshot();
        assert!(snapshot.session.is_none());
        assert!(snapshot.profile.is_none());
        assert!(!snapshot.loading);
    }

    #[tokio::test]
    async fn subscribers_observe_every_change() {
        let store = SessionStore::new();
        let mut rx = store.subscribe();

        assert!(rx.borrow().loading);

        store.set_authenticated(test_session(), test_profile());
        rx.changed().await.unwrap();
        assert!(rx.borrow().is_authenticated());

        store.clear();
        rx.changed().await.unwrap();
        assert!(!rx.borrow().is_authenticated());
    }

    #[test]
    fn clones_share_state() {
        let store = SessionStore::new();
        let clone = store.clone();

        store.set_authenticated(test_session(), test_profile());
        assert!(clone.is_authenticated());
    }

    #[test]
    fn snapshot_never_holds_session_without_profile() {
        let store = SessionStore::new();
        store.set_authenticated(test_session(), test_profile());

        let snapshot = store.snapshot();
        assert_eq!(snapshot.session.is_some(), snapshot.profile.is_some());
    }
}
