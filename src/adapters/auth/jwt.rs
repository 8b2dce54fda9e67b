//! JWT session adapter.
//!
//! Implements both `TokenIssuer` and `SessionValidator` with HMAC-signed
//! tokens (HS256). Claims validated on every request:
//!
//! - **Issuer (iss)**: must match the configured issuer
//! - **Expiry (exp)**: must be in the future
//! - **Signature**: must verify against the configured secret

use async_trait::async_trait;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

use crate::config::AuthConfig;
use crate::domain::foundation::{AuthError, AuthenticatedUser, UserId};
use crate::domain::user::User;
use crate::ports::{SessionValidator, TokenIssuer};

/// JWT claims carried in session tokens.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// Subject - the user ID
    sub: String,

    /// User's email address
    email: String,

    /// User's display name
    name: String,

    /// Issuer
    iss: String,

    /// Issued at timestamp (Unix epoch seconds)
    iat: i64,

    /// Expiry timestamp (Unix epoch seconds)
    exp: i64,
}

/// Session service backed by HMAC-signed JWTs.
pub struct JwtSessionService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
    token_ttl_secs: u64,
}

impl JwtSessionService {
    /// Creates a new JwtSessionService from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let secret = config.jwt_secret.expose_secret().as_bytes();
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            issuer: config.issuer.clone(),
            token_ttl_secs: config.token_ttl_secs,
        }
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.issuer]);
        validation
    }
}

#[async_trait]
impl TokenIssuer for JwtSessionService {
    async fn issue(&self, user: &User) -> Result<String, AuthError> {
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: user.id().to_string(),
            email: user.email().to_string(),
            name: user.name().to_string(),
            iss: self.issuer.clone(),
            iat: now,
            exp: now + self.token_ttl_secs as i64,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::service_unavailable(format!("Failed to sign token: {}", e)))
    }
}

#[async_trait]
impl SessionValidator for JwtSessionService {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation()).map_err(
            |e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken,
            },
        )?;

        let user_id: UserId = data
            .claims
            .sub
            .parse()
            .map_err(|_| AuthError::InvalidToken)?;

        Ok(AuthenticatedUser::new(
            user_id,
            data.claims.email,
            Some(data.claims.name),
        ))
    }
}
