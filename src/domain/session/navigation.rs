//! Navigation intents returned by the auth synchronizer.
//!
//! The synchronizer never performs navigation itself; it returns an intent
//! and the caller (the HTTP shell or a client) decides how to act on it.

/// Where the user currently is, as far as routing is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageContext {
    /// The login page.
    Login,
    /// The password-recovery page.
    Recovery,
    /// Any other page.
    Other,
}

/// What the caller should do after an auth event was processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationIntent {
    /// Stay where you are.
    None,
    /// Navigate to the authenticated dashboard.
    ToDashboard,
    /// Navigate to the login page.
    ToLogin,
}
