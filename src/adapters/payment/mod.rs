//! Payment adapters - provider checkout integrations.

mod mock;
mod stripe;

pub use mock::MockPaymentGateway;
pub use stripe::{StripeConfig, StripePaymentGateway};
