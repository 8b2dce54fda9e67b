//! User repository port.

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::user::User;
use async_trait::async_trait;

/// Repository port for user account persistence.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Save a new user account.
    ///
    /// # Errors
    ///
    /// - `EmailTaken` if the email is already registered
    /// - `DatabaseError` on persistence failure
    async fn save(&self, user: &User) -> Result<(), DomainError>;

    /// Find a user by id.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError>;

    /// Find a user by email (exact match, case-insensitive).
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;
}
