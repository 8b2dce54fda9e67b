//! Mock authentication adapters for testing.
//!
//! Implement the `SessionValidator` and `TokenIssuer` ports without real
//! cryptography, so HTTP tests can mint and validate tokens cheaply.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser, UserId};
use crate::domain::user::User;
use crate::ports::{SessionValidator, TokenIssuer};

/// Mock session validator for testing.
///
/// Stores a map of tokens to users. Tokens not in the map return `InvalidToken`.
#[derive(Debug, Default)]
pub struct MockSessionValidator {
    /// Map of valid tokens to their associated users
    tokens: RwLock<HashMap<String, AuthenticatedUser>>,
    /// Optional error to return for all validations (for error testing)
    force_error: RwLock<Option<AuthError>>,
}

impl MockSessionValidator {
    /// Creates a new empty mock validator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a valid token that maps to a user.
    pub fn with_user(self, token: impl Into<String>, user: AuthenticatedUser) -> Self {
        self.tokens.write().unwrap().insert(token.into(), user);
        self
    }

    /// Adds a valid token with a simple test user, returning the user's id.
    pub fn with_test_user(self, token: impl Into<String>) -> (Self, UserId) {
        let user_id = UserId::new();
        let user = AuthenticatedUser::new(
            user_id,
            format!("{}@test.example.com", user_id),
            Some("Test User".to_string()),
        );
        (self.with_user(token, user), user_id)
    }

    /// Forces all validations to return the specified error.
    pub fn with_error(self, error: AuthError) -> Self {
        *self.force_error.write().unwrap() = Some(error);
        self
    }

    /// Clears the forced error and returns to normal operation.
    pub fn clear_error(&self) {
        *self.force_error.write().unwrap() = None;
    }

    /// Registers a new valid token at runtime.
    pub fn add_token(&self, token: impl Into<String>, user: AuthenticatedUser) {
        self.tokens.write().unwrap().insert(token.into(), user);
    }

    /// Removes a token, making it invalid.
    pub fn remove_token(&self, token: &str) {
        self.tokens.write().unwrap().remove(token);
    }
}

#[async_trait]
impl SessionValidator for MockSessionValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        if let Some(error) = self.force_error.read().unwrap().clone() {
            return Err(error);
        }

        self.tokens
            .read()
            .unwrap()
            .get(token)
            .cloned()
            .ok_or(AuthError::InvalidToken)
    }
}

/// Mock token issuer producing predictable tokens.
///
/// Issued tokens are registered with the paired validator so a
/// signup-then-request flow works end to end in tests.
#[derive(Debug, Default)]
pub struct MockTokenIssuer {
    issued: RwLock<Vec<String>>,
}

impl MockTokenIssuer {
    /// Creates a new mock issuer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all tokens issued so far.
    pub fn issued_tokens(&self) -> Vec<String> {
        self.issued.read().unwrap().clone()
    }
}

#[async_trait]
impl TokenIssuer for MockTokenIssuer {
    async fn issue(&self, user: &User) -> Result<String, AuthError> {
        let token = format!("mock-token-{}", user.id());
        self.issued.write().unwrap().push(token.clone());
        Ok(token)
    }
}
