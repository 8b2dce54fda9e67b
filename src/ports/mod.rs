//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.

mod decision_repository;
mod document_repository;
mod focus_repository;
mod password_hasher;
mod session;
mod user_repository;

pub use decision_repository::DecisionRepository;
pub use document_repository::DocumentRepository;
pub use focus_repository::FocusRepository;
pub use password_hasher::PasswordHasher;
pub use session::{SessionValidator, TokenIssuer};
pub use user_repository::UserRepository;
