//! Auth adapters - hosted identity provider integrations.

mod gotrue;
mod mock;

pub use gotrue::{GoTrueAuthGateway, GoTrueConfig};
pub use mock::MockAuthGateway;
