//! Decision entity.
//!
//! A decision is an event record of a discrete choice made by a user.
//! Creation order matters: "recent" queries sort most-recent-first.

use crate::domain::foundation::{
    DecisionId, DomainError, FieldErrors, Timestamp, UserId, ValidationError,
};
use serde::{Deserialize, Serialize};

/// Maximum length for a decision title.
pub const MAX_TITLE_LENGTH: usize = 200;

/// A discrete choice made by a user at a point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    id: DecisionId,
    user_id: UserId,
    title: String,
    /// Optional free-form context around the choice.
    context: Option<String>,
    decided_at: Timestamp,
    created_at: Timestamp,
}

impl Decision {
    /// Create a new decision record.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if title is empty or too long
    pub fn new(
        id: DecisionId,
        user_id: UserId,
        title: String,
        context: Option<String>,
        decided_at: Timestamp,
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
        if !fields.is_empty() {
            return Err(DomainError::validation(fields));
        }

        Ok(Self {
            id,
            user_id,
            title,
            context,
            decided_at,
            created_at: Timestamp::now(),
        })
    }

    /// Reconstitute a decision from persistence (no validation).
    pub fn reconstitute(
        id: DecisionId,
        user_id: UserId,
        title: String,
        context: Option<String>,
        decided_at: Timestamp,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            user_id,
            title,
            context,
            decided_at,
            created_at,
        }
    }

    pub fn id(&self) -> &DecisionId {
        &self.id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }

    pub fn decided_at(&self) -> Timestamp {
        self.decided_at
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }
}
