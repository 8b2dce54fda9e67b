//! Document repository port.

use crate::domain::document::Document;
use crate::domain::foundation::{DocumentId, DomainError, UserId};
use async_trait::async_trait;

/// Repository port for document persistence.
///
/// Implementations persist the link ids alongside the document and must
/// keep the owner id in every read and write predicate.
#[async_trait]
pub trait DocumentRepository: Send + Sync {
    /// Save a new document with its focus/decision links.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn save(&self, document: &Document) -> Result<(), DomainError>;

    /// Update an existing document. The `doc_type` column is never
    /// touched; the kind is immutable after creation.
    ///
    /// # Errors
    ///
    /// - `DocumentNotFound` if no row matches (id, owner)
    /// - `DatabaseError` on persistence failure
    async fn update(&self, document: &Document) -> Result<(), DomainError>;

    /// Find a document by id, scoped to its owner.
    ///
    /// Returns `None` when the document does not exist or belongs to
    /// another user.
    async fn find_by_id(
        &self,
        id: &DocumentId,
        user_id: &UserId,
    ) -> Result<Option<Document>, DomainError>;

    /// All documents owned by a user, most recently updated first.
    async fn find_all_by_user(&self, user_id: &UserId) -> Result<Vec<Document>, DomainError>;
}
