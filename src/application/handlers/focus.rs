//! Focus entry handlers.

use std::sync::Arc;

use crate::domain::focus::FocusEntry;
use crate::domain::foundation::{DomainError, FocusEntryId, Timestamp, UserId};
use crate::ports::FocusRepository;

/// Query for all of a user's focus entries.
#[derive(Debug, Clone)]
pub struct GetAllFocusQuery {
    pub user_id: UserId,
}

/// Handler returning a user's focus history, most recent first.
pub struct GetAllFocusHandler {
    repo: Arc<dyn FocusRepository>,
}

impl GetAllFocusHandler {
    pub fn new(repo: Arc<dyn FocusRepository>) -> Self {
        Self { repo }
    }

    pub async fn handle(&self, query: GetAllFocusQuery) -> Result<Vec<FocusEntry>, DomainError> {
        self.repo.find_all_by_user(&query.user_id).await
    }
}

/// Command to record a new focus entry.
#[derive(Debug, Clone)]
pub struct RecordFocusCommand {
    pub user_id: UserId,
    pub title: String,
    pub note: Option<String>,
    pub duration_minutes: u32,
    pub occurred_at: Timestamp,
}

/// Handler creating a focus entry for the caller.
pub struct RecordFocusHandler {
    repo: Arc<dyn FocusRepository>,
}

impl RecordFocusHandler {
    pub fn new(repo: Arc<dyn FocusRepository>) -> Self {
        Self { repo }
    }

    pub async fn handle(&self, cmd: RecordFocusCommand) -> Result<FocusEntry, DomainError> {
        let entry = FocusEntry::new(
            FocusEntryId::new(),
            cmd.user_id,
            cmd.title,
            cmd.note,
            cmd.duration_minutes,
            cmd.occurred_at,
        )?;
        self.repo.save(&entry).await?;
        Ok(entry)
    }
}
