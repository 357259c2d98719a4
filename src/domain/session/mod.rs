//! Session module - Authentication session lifecycle.
//!
//! Covers the session and profile value objects, the injected session store,
//! the identity-provider event vocabulary, navigation intents, and deep-link
//! parsing for recovery/verification flows.

mod errors;
mod events;
mod links;
mod navigation;
mod profile;
mod session;
mod store;

pub use errors::{AuthError, LinkError};
pub use events::AuthEvent;
pub use links::{RecoveryLink, VerificationLink};
pub use navigation::{NavigationIntent, PageContext};
pub use profile::{Plan, Role, UserProfile};
pub use session::Session;
pub use store::{SessionSnapshot, SessionStore};
