//! Auth service configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;

/// Auth service configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Base URL of the auth service
    pub service_url: String,

    /// Public API key sent with every auth request
    pub anon_key: SecretString,

    /// Shared secret used to validate access tokens
    pub jwt_secret: SecretString,

    /// Expected audience claim on access tokens
    #[serde(default = "default_audience")]
    pub audience: String,
}

impl AuthConfig {
    /// Validate auth configuration for the given environment
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if self.service_url.is_empty() {
            return Err(ValidationError::MissingRequired("auth.service_url"));
        }
        if *environment == Environment::Production && !self.service_url.starts_with("https://") {
            return Err(ValidationError::AuthUrlMustBeHttps);
        }
        if self.anon_key.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("auth.anon_key"));
        }
        if self.jwt_secret.expose_secret().len() < 32 {
            return Err(ValidationError::JwtSecretTooShort);
        }
        Ok(())
    }
}

fn default_audience() -> String {
    "authenticated".to_string()
}
