//! Session token ports.
//!
//! `SessionValidator` turns an opaque bearer token into an
//! `AuthenticatedUser`; `TokenIssuer` mints tokens at signup/login. The
//! HTTP middleware depends only on the validator, so the token mechanism
//! can change without touching it.

use crate::domain::foundation::{AuthError, AuthenticatedUser};
use crate::domain::user::User;
use async_trait::async_trait;

/// Port for validating session tokens.
#[async_trait]
pub trait SessionValidator: Send + Sync {
    /// Validates a token and returns the authenticated user.
    ///
    /// # Errors
    ///
    /// - `InvalidToken` / `TokenExpired` for bad tokens
    /// - `ServiceUnavailable` when validation infrastructure fails
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError>;
}

/// Port for issuing session tokens.
#[async_trait]
pub trait TokenIssuer: Send + Sync {
    /// Issues a session token for the given account.
    async fn issue(&self, user: &User) -> Result<String, AuthError>;
}
