//! Focus entry repository port.
//!
//! Every read takes the owner's id and implementations must put it in the
//! query predicate itself, so a record owned by someone else is
//! indistinguishable from a record that does not exist.

use crate::domain::focus::FocusEntry;
use crate::domain::foundation::{DomainError, FocusEntryId, UserId};
use async_trait::async_trait;

/// Repository port for focus entry persistence.
#[async_trait]
pub trait FocusRepository: Send + Sync {
    /// Save a new focus entry.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn save(&self, entry: &FocusEntry) -> Result<(), DomainError>;

    /// Find an entry by id, scoped to its owner.
    ///
    /// Returns `None` when the entry does not exist or belongs to another
    /// user.
    async fn find_by_id(
        &self,
        id: &FocusEntryId,
        user_id: &UserId,
    ) -> Result<Option<FocusEntry>, DomainError>;

    /// All entries owned by a user, most recent (`occurred_at`) first.
    ///
    /// An empty history yields `Ok(vec![])`, never an error.
    async fn find_all_by_user(&self, user_id: &UserId) -> Result<Vec<FocusEntry>, DomainError>;

    /// How many of the given ids exist and belong to the user.
    ///
    /// Used to verify document links reference the caller's own records.
    async fn count_owned(&self, ids: &[FocusEntryId], user_id: &UserId)
        -> Result<u64, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn focus_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn FocusRepository) {}
    }
}
