//! Authentication adapters.
//!
//! - `JwtSessionService` - issues and validates HMAC-signed session tokens
//! - `Argon2PasswordHasher` - production password hashing
//! - `MockSessionValidator` / `MockTokenIssuer` - test doubles

mod jwt;
mod mock;
mod password;

pub use jwt::JwtSessionService;
pub use mock::{MockSessionValidator, MockTokenIssuer};
pub use password::Argon2PasswordHasher;
