//! PostgreSQL adapters.

mod billing_repository;
mod profile_reader;

pub use billing_repository::PostgresBillingRepository;
pub use profile_reader::PostgresProfileReader;
