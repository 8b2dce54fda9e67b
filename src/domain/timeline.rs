//! Timeline merge.
//!
//! Interleaves focus entries and decisions into a single chronological
//! sequence (oldest first). Ties on the event timestamp are broken by
//! record UUID ascending, which is deterministic regardless of fetch
//! order; focus and decision ids share the uuid space.

use crate::domain::decision::Decision;
use crate::domain::focus::FocusEntry;
use crate::domain::foundation::Timestamp;
use serde::Serialize;
use uuid::Uuid;

/// One event on the merged timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum TimelineEvent {
    Focus(FocusEntry),
    Decision(Decision),
}

impl TimelineEvent {
    /// The timestamp the event is ordered by.
    pub fn occurred_at(&self) -> Timestamp {
        match self {
            TimelineEvent::Focus(f) => f.occurred_at(),
            TimelineEvent::Decision(d) => d.decided_at(),
        }
    }

    /// The record id used as the tie-break key.
    pub fn record_uuid(&self) -> Uuid {
        match self {
            TimelineEvent::Focus(f) => *f.id().as_uuid(),
            TimelineEvent::Decision(d) => *d.id().as_uuid(),
        }
    }
}

/// Merges focus entries and decisions into ascending chronological order.
///
/// Both inputs may arrive in any order; the output is fully determined by
/// (timestamp, record uuid).
pub fn merge_timeline(focus: Vec<FocusEntry>, decisions: Vec<Decision>) -> Vec<TimelineEvent> {
    let mut events: Vec<TimelineEvent> = focus
        .into_iter()
        .map(TimelineEvent::Focus)
        .chain(decisions.into_iter().map(TimelineEvent::Decision))
        .collect();

    events.sort_by_key(|e| (e.occurred_at(), e.record_uuid()));
    events
}
