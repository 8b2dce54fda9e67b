//! Insights handler.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, Timestamp, UserId};
use crate::domain::insights::InsightReport;
use crate::ports::{DecisionRepository, DocumentRepository, FocusRepository};

/// Query for a user's insight report.
#[derive(Debug, Clone)]
pub struct GetInsightsQuery {
    pub user_id: UserId,
}

/// Handler fetching a user's full history concurrently and deriving the
/// insight report from it.
pub struct GetInsightsHandler {
    focus: Arc<dyn FocusRepository>,
    decisions: Arc<dyn DecisionRepository>,
    documents: Arc<dyn DocumentRepository>,
}

impl GetInsightsHandler {
    pub fn new(
        focus: Arc<dyn FocusRepository>,
        decisions: Arc<dyn DecisionRepository>,
        documents: Arc<dyn DocumentRepository>,
    ) -> Self {
        Self {
            focus,
            decisions,
            documents,
        }
    }

    pub async fn handle(&self, query: GetInsightsQuery) -> Result<InsightReport, DomainError> {
        let (focus, decisions, documents) = tokio::try_join!(
            self.focus.find_all_by_user(&query.user_id),
            self.decisions.find_recent_by_user(&query.user_id, None),
            self.documents.find_all_by_user(&query.user_id),
        )?;

        Ok(InsightReport::build(
            &focus,
            &decisions,
            &documents,
            Timestamp::now(),
        ))
    }
}
