//! Timeline handler.
//!
//! Fetches focus entries and decisions concurrently and merges them into
//! one chronological sequence. Both fetches must succeed; if either
//! fails, the combined view fails.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::timeline::{merge_timeline, TimelineEvent};
use crate::ports::{DecisionRepository, FocusRepository};

/// Query for a user's merged timeline.
#[derive(Debug, Clone)]
pub struct GetTimelineQuery {
    pub user_id: UserId,
}

/// Handler producing the merged chronological timeline.
pub struct GetTimelineHandler {
    focus: Arc<dyn FocusRepository>,
    decisions: Arc<dyn DecisionRepository>,
}

impl GetTimelineHandler {
    pub fn new(focus: Arc<dyn FocusRepository>, decisions: Arc<dyn DecisionRepository>) -> Self {
        Self { focus, decisions }
    }

    pub async fn handle(
        &self,
        query: GetTimelineQuery,
    ) -> Result<Vec<TimelineEvent>, DomainError> {
        let (focus, decisions) = tokio::try_join!(
            self.focus.find_all_by_user(&query.user_id),
            self.decisions.find_recent_by_user(&query.user_id, None),
        )?;

        Ok(merge_timeline(focus, decisions))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::decision::Decision;
    use crate::domain::focus::FocusEntry;
    use crate::domain::foundation::{DecisionId, ErrorCode, FocusEntryId, Timestamp};
    use async_trait::async_trait;

    struct MockFocusRepository {
        entries: Vec<FocusEntry>,
        fail: bool,
    }

    #[async_trait]
    impl FocusRepository for MockFocusRepository {
        async fn save(&self, _entry: &FocusEntry) -> Result<(), DomainError> {
            Ok(())
        }

        async fn find_by_id(
            &self,
            _id: &FocusEntryId,
            _user_id: &UserId,
        ) -> Result<Option<FocusEntry>, DomainError> {
            Ok(None)
        }

        async fn find_all_by_user(
            &self,
            _user_id: &UserId,
        ) -> Result<Vec<FocusEntry>, DomainError> {
            if self.fail {
                return Err(DomainError::database("focus fetch failed"));
            }
            Ok(self.entries.clone())
        }

        async fn count_owned(
            &self,
            _ids: &[FocusEntryId],
            _user_id: &UserId,
        ) -> Result<u64, DomainError> {
            Ok(0)
        }
    }

    struct MockDecisionRepository {
        decisions: Vec<Decision>,
        fail: bool,
    }

    #[async_trait]
    impl DecisionRepository for MockDecisionRepository {
        async fn save(&self, _decision: &Decision) -> Result<(), DomainError> {
            Ok(())
        }

        async fn find_by_id(
            &self,
            _id: &DecisionId,
            _user_id: &UserId,
        ) -> Result<Option<Decision>, DomainError> {
            Ok(None)
        }

        async fn find_recent_by_user(
            &self,
            _user_id: &UserId,
            _limit: Option<u32>,
        ) -> Result<Vec<Decision>, DomainError> {
            if self.fail {
                return Err(DomainError::database("decision fetch failed"));
            }
            Ok(self.decisions.clone())
        }

        async fn count_owned(
            &self,
            _ids: &[DecisionId],
            _user_id: &UserId,
        ) -> Result<u64, DomainError> {
            Ok(0)
        }
    }

    fn focus_at(secs: u64) -> FocusEntry {
        FocusEntry::reconstitute(
            FocusEntryId::new(),
            UserId::new(),
            format!("focus@{}", secs),
            None,
            30,
            Timestamp::from_unix_secs(secs),
            Timestamp::from_unix_secs(secs),
        )
    }

    fn decision_at(secs: u64) -> Decision {
        Decision::reconstitute(
            DecisionId::new(),
            UserId::new(),
            format!("decision@{}", secs),
            None,
            Timestamp::from_unix_secs(secs),
            Timestamp::from_unix_secs(secs),
        )
    }

    fn handler(focus: MockFocusRepository, decisions: MockDecisionRepository) -> GetTimelineHandler {
        GetTimelineHandler::new(Arc::new(focus), Arc::new(decisions))
    }

    #[tokio::test]
    async fn timeline_merges_both_kinds_chronologically() {
        let h = handler(
            MockFocusRepository {
                entries: vec![focus_at(1), focus_at(3)],
                fail: false,
            },
            MockDecisionRepository {
                decisions: vec![decision_at(2)],
                fail: false,
            },
        );

        let timeline = h
            .handle(GetTimelineQuery {
                user_id: UserId::new(),
            })
            .await
            .unwrap();

        let titles: Vec<&str> = timeline
            .iter()
            .map(|e| match e {
                TimelineEvent::Focus(f) => f.title(),
                TimelineEvent::Decision(d) => d.title(),
            })
            .collect();
        assert_eq!(titles, vec!["focus@1", "decision@2", "focus@3"]);
    }

    #[tokio::test]
    async fn timeline_of_empty_history_is_empty() {
        let h = handler(
            MockFocusRepository {
                entries: vec![],
                fail: false,
            },
            MockDecisionRepository {
                decisions: vec![],
                fail: false,
            },
        );

        let timeline = h
            .handle(GetTimelineQuery {
                user_id: UserId::new(),
            })
            .await
            .unwrap();

        assert!(timeline.is_empty());
    }

    #[tokio::test]
    async fn timeline_fails_when_decision_fetch_fails() {
        let h = handler(
            MockFocusRepository {
                entries: vec![focus_at(1)],
                fail: false,
            },
            MockDecisionRepository {
                decisions: vec![],
                fail: true,
            },
        );

        let err = h
            .handle(GetTimelineQuery {
                user_id: UserId::new(),
            })
            .await
            .unwrap_err();

        // Partial success must not surface as a populated view.
        assert_eq!(err.code, ErrorCode::DatabaseError);
    }

    #[tokio::test]
    async fn timeline_fails_when_focus_fetch_fails() {
        let h = handler(
            MockFocusRepository {
                entries: vec![],
                fail: true,
            },
            MockDecisionRepository {
                decisions: vec![decision_at(2)],
                fail: false,
            },
        );

        assert!(h
            .handle(GetTimelineQuery {
                user_id: UserId::new(),
            })
            .await
            .is_err());
    }
}
