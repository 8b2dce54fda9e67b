//! Password hashing port.
//!
//! Keeps the hashing scheme out of the application layer; the argon2
//! adapter implements it in production, tests substitute a cheap fake.

use crate::domain::foundation::DomainError;

/// Port for hashing and verifying passwords.
pub trait PasswordHasher: Send + Sync {
    /// Hashes a plaintext password into a self-describing hash string.
    ///
    /// # Errors
    ///
    /// - `InternalError` if hashing fails
    fn hash(&self, password: &str) -> Result<String, DomainError>;

    /// Verifies a plaintext password against a stored hash.
    ///
    /// Returns `Ok(false)` on mismatch; errors are reserved for malformed
    /// hashes or infrastructure failure.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_hasher_is_object_safe() {
        fn _accepts_dyn(_hasher: &dyn PasswordHasher) {}
    }
}
