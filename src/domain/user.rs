//! User account entity.
//!
//! Identity record used for ownership scoping of every other entity.
//! The password hash is opaque to the domain; hashing and verification
//! live behind the `PasswordHasher` port.

use crate::domain::foundation::{Timestamp, UserId};

/// A registered user account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    name: String,
    email: String,
    password_hash: String,
    created_at: Timestamp,
}

impl User {
    /// Create a new user account.
    ///
    /// Field validation happens in `credentials::validate_signup` before
    /// this constructor is reached; `password_hash` must already be hashed.
    pub fn new(id: UserId, name: String, email: String, password_hash: String) -> Self {
        Self {
            id,
            name,
            email,
            password_hash,
            created_at: Timestamp::now(),
        }
    }

    /// Reconstitute a user from persistence.
    pub fn reconstitute(
        id: UserId,
        name: String,
        email: String,
        password_hash: String,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            name,
            email,
            password_hash,
            created_at,
        }
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }
}
