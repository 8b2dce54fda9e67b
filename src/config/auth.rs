//! Authentication configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use super::server::Environment;

const MIN_PRODUCTION_SECRET_LEN: usize = 32;

/// Authentication configuration (JWT sessions)
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// HMAC signing key for session tokens
    pub jwt_secret: Secret<String>,

    /// Token lifetime in seconds
    #[serde(default = "default_token_ttl")]
    pub token_ttl_secs: u64,

    /// Issuer claim embedded in tokens
    #[serde(default = "default_issuer")]
    pub issuer: String,
}

impl AuthConfig {
    /// Get token TTL as Duration
    pub fn token_ttl(&self) -> Duration {
        Duration::from_secs(self.token_ttl_secs)
    }

    /// Validate authentication configuration
    ///
    /// Production requires a signing key of at least 32 bytes; development
    /// only requires a non-empty key.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        let secret = self.jwt_secret.expose_secret();
        if secret.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH_JWT_SECRET"));
        }
        if *environment == Environment::Production && secret.len() < MIN_PRODUCTION_SECRET_LEN {
            return Err(ValidationError::JwtSecretTooShort);
        }
        if self.token_ttl_secs == 0 {
            return Err(ValidationError::InvalidTokenTtl);
        }
        Ok(())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: Secret::new(String::new()),
            token_ttl_secs: default_token_ttl(),
            issuer: default_issuer(),
        }
    }
}

fn default_token_ttl() -> u64 {
    // 24 hours
    86_400
}

fn default_issuer() -> String {
    "claritylog".to_string()
}
