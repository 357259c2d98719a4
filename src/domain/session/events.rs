//! Auth state change events emitted by the hosted identity provider.

use super::session::Session;

/// Events delivered by the identity provider's auth state stream.
///
/// The synchronizer consumes these in order and is the only writer of the
/// session store. Unknown provider events are dropped before this type is
/// constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthEvent {
    /// First event after subscribing: the persisted session, if any.
    Initial(Option<Session>),

    /// The user completed a credential sign-in.
    SignedIn(Session),

    /// The provider rotated the access token.
    TokenRefreshed(Session),

    /// A password-recovery link established a temporary session.
    PasswordRecovery(Session),

    /// The account was deleted at the provider.
    UserDeleted,

    /// The user signed out (or the session was revoked).
    SignedOut,
}

impl AuthEvent {
    /// The session carried by this event, if it establishes one.
    pub fn session(&self) -> Option<&Session> {
        match self {
            AuthEvent::Initial(session) => session.as_ref(),
            AuthEvent::SignedIn(session)
            | AuthEvent::TokenRefreshed(session)
            | AuthEvent::PasswordRecovery(session) => Some(session),
            AuthEvent::UserDeleted | AuthEvent::SignedOut => None,
        }
    }

    /// True if this event terminates the authenticated state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, AuthEvent::UserDeleted | AuthEvent::SignedOut)
            || matches!(self, AuthEvent::Initial(None))
    }
}
