//! Decision handlers.

use std::sync::Arc;

use crate::domain::decision::Decision;
use crate::domain::foundation::{DecisionId, DomainError, Timestamp, UserId};
use crate::ports::DecisionRepository;

/// Query for a user's recent decisions.
#[derive(Debug, Clone)]
pub struct GetRecentDecisionsQuery {
    pub user_id: UserId,
    /// Cap on the number of decisions returned; `None` returns all.
    pub limit: Option<u32>,
}

/// Handler returning decisions most-recent-first.
pub struct GetRecentDecisionsHandler {
    repo: Arc<dyn DecisionRepository>,
}

impl GetRecentDecisionsHandler {
    pub fn new(repo: Arc<dyn DecisionRepository>) -> Self {
        Self { repo }
    }

    pub async fn handle(
        &self,
        query: GetRecentDecisionsQuery,
    ) -> Result<Vec<Decision>, DomainError> {
        self.repo
            .find_recent_by_user(&query.user_id, query.limit)
            .await
    }
}

/// Command to record a decision.
#[derive(Debug, Clone)]
pub struct RecordDecisionCommand {
    pub user_id: UserId,
    pub title: String,
    pub context: Option<String>,
    pub decided_at: Timestamp,
}

/// Handler creating a decision record for the caller.
pub struct RecordDecisionHandler {
    repo: Arc<dyn DecisionRepository>,
}

impl RecordDecisionHandler {
    pub fn new(repo: Arc<dyn DecisionRepository>) -> Self {
        Self { repo }
    }

    pub async fn handle(&self, cmd: RecordDecisionCommand) -> Result<Decision, DomainError> {
        let decision = Decision::new(
            DecisionId::new(),
            cmd.user_id,
            cmd.title,
            cmd.context,
            cmd.decided_at,
        )?;
        self.repo.save(&decision).await?;
        Ok(decision)
    }
}
