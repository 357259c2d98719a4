//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Auth Ports
//!
//! - `AuthGateway` - Hosted identity provider operations
//! - `ProfileReader` - Read access to stored user profiles
//!
//! ## Billing Ports
//!
//! - `BillingRepository` - Atomic subscription/payment persistence
//! - `CheckoutGateway` - This service's checkout endpoint, as a client
//! - `PaymentGateway` - The external payment provider's checkout API
//!
//! ## Time Ports
//!
//! - `Clock` / `Delay` - Injectable time and sleeping for deterministic tests

mod auth_gateway;
mod billing_repository;
mod checkout_gateway;
mod clock;
mod payment_gateway;
mod profile_reader;

pub use auth_gateway::AuthGateway;
pub use billing_repository::BillingRepository;
pub use checkout_gateway::{CheckoutGateway, CheckoutLink};
pub use clock::{Clock, Delay};
pub use payment_gateway::{
    CreateCheckoutRequest, PaymentGateway, PaymentGatewayError, ProviderCheckout,
};
pub use profile_reader::ProfileReader;
