//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, and error types that form the
//! vocabulary of the ClarityLog domain.

mod auth;
mod errors;
mod ids;
mod timestamp;

pub use auth::{AuthError, AuthenticatedUser};
pub use errors::{DomainError, ErrorCode, FieldErrors, ValidationError};
pub use ids::{DecisionId, DocumentId, FocusEntryId, UserId};
pub use timestamp::Timestamp;
