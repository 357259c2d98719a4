//! Session handlers - auth lifecycle orchestration.

mod recover_password;
mod sign_in;
mod sign_out;
mod synchronizer;
mod verify_email;

pub use recover_password::{RecoverPasswordCommand, RecoverPasswordHandler};
pub use sign_in::{SignInCommand, SignInHandler};
pub use sign_out::SignOutHandler;
pub use synchronizer::AuthSynchronizer;
pub use verify_email::{VerifyEmailCommand, VerifyEmailHandler};
