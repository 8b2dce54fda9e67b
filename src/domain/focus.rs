//! Focus entry entity.
//!
//! A focus entry records one period of focused work, owned by exactly
//! one user.

use crate::domain::foundation::{
    DomainError, FieldErrors, FocusEntryId, Timestamp, UserId, ValidationError,
};
use serde::{Deserialize, Serialize};

/// Maximum length for a focus entry title.
pub const MAX_TITLE_LENGTH: usize = 200;

/// Upper bound on a single entry's duration (24 hours).
pub const MAX_DURATION_MINUTES: u32 = 24 * 60;

/// One recorded period of focused work.
///
/// # Invariants
///
/// - `title` is 1-200 characters
/// - `duration_minutes` is 1..=1440
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FocusEntry {
    id: FocusEntryId,
    user_id: UserId,
    title: String,
    note: Option<String>,
    duration_minutes: u32,
    /// When the focused work happened (not when it was recorded).
    occurred_at: Timestamp,
    created_at: Timestamp,
}

impl FocusEntry {
    /// Create a new focus entry.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if title or duration is out of range
    pub fn new(
        id: FocusEntryId,
        user_id: UserId,
        title: String,
        note: Option<String>,
        duration_minutes: u32,
        occurred_at: Timestamp,
    ) -> Result<Self, DomainError> {
        let mut fields = FieldErrors::new();
        if title.trim().is_empty() {
            fields.push(ValidationError::empty_field("title"));
        } else if title.chars().count() > MAX_TITLE_LENGTH {
            fields.push(ValidationError::length_out_of_range(
                "title",
                1,
                MAX_TITLE_LENGTH,
                title.chars().count(),
            ));
        }
        if duration_minutes == 0 || duration_minutes > MAX_DURATION_MINUTES {
            fields.push(ValidationError::invalid_format(
                "durationMinutes",
                format!("must be 1..={}", MAX_DURATION_MINUTES),
            ));
        }
        if !fields.is_empty() {
            return Err(DomainError::validation(fields));
        }

        Ok(Self {
            id,
            user_id,
            title,
            note,
            duration_minutes,
            occurred_at,
            created_at: Timestamp::now(),
        })
    }

    /// Reconstitute a focus entry from persistence (no validation).
    pub fn reconstitute(
        id: FocusEntryId,
        user_id: UserId,
        title: String,
        note: Option<String>,
        duration_minutes: u32,
        occurred_at: Timestamp,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            user_id,
            title,
            note,
            duration_minutes,
            occurred_at,
            created_at,
        }
    }

    pub fn id(&self) -> &FocusEntryId {
        &self.id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }

    pub fn duration_minutes(&self) -> u32 {
        self.duration_minutes
    }

    pub fn occurred_at(&self) -> Timestamp {
        self.occurred_at
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }
}
