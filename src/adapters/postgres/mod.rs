//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! Every query that reads or mutates user-owned data carries the owner in
//! its WHERE clause, so a record belonging to another user is
//! indistinguishable from a missing one.

mod decision_repository;
mod document_repository;
mod focus_repository;
mod user_repository;

pub use decision_repository::PostgresDecisionRepository;
pub use document_repository::PostgresDocumentRepository;
pub use focus_repository::PostgresFocusRepository;
pub use user_repository::PostgresUserRepository;
