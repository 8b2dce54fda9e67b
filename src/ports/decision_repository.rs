//! Decision repository port.
//!
//! Owner-scoped reads, same not-found conflation contract as the other
//! repositories.

use crate::domain::decision::Decision;
use crate::domain::foundation::{DecisionId, DomainError, UserId};
use async_trait::async_trait;

/// Repository port for decision persistence.
#[async_trait]
pub trait DecisionRepository: Send + Sync {
    /// Save a new decision.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn save(&self, decision: &Decision) -> Result<(), DomainError>;

    /// Find a decision by id, scoped to its owner.
    async fn find_by_id(
        &self,
        id: &DecisionId,
        user_id: &UserId,
    ) -> Result<Option<Decision>, DomainError>;

    /// Decisions owned by a user, most recent (`decided_at`) first,
    /// optionally limited.
    ///
    /// An empty history yields `Ok(vec![])`.
    async fn find_recent_by_user(
        &self,
        user_id: &UserId,
        limit: Option<u32>,
    ) -> Result<Vec<Decision>, DomainError>;

    /// How many of the given ids exist and belong to the user.
    async fn count_owned(&self, ids: &[DecisionId], user_id: &UserId) -> Result<u64, DomainError>;
}
