//! Document aggregate.
//!
//! Rich-text documents owned by exactly one user, optionally linking to
//! focus entries and decisions by id. Links are references, not ownership:
//! deleting a document never touches the linked records.

mod content;

pub use content::{RichContent, CURRENT_SCHEMA_VERSION};

use std::collections::BTreeSet;

use crate::domain::foundation::{
    DecisionId, DocumentId, DomainError, FieldErrors, FocusEntryId, Timestamp, UserId,
    ValidationError,
};
use serde::{Deserialize, Serialize};

/// Maximum length for a document title.
pub const MAX_TITLE_LENGTH: usize = 200;

/// Maximum number of tags on one document.
pub const MAX_TAGS: usize = 20;

/// Maximum length of a single tag.
pub const MAX_TAG_LENGTH: usize = 50;

/// Closed set of document kinds. Immutable after creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentType {
    GeneralNotes,
    FocusReview,
    DecisionReflection,
    WeeklyReview,
    Other,
}

impl DocumentType {
    /// Stable string form used in persistence.
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentType::GeneralNotes => "GENERAL_NOTES",
            DocumentType::FocusReview => "FOCUS_REVIEW",
            DocumentType::DecisionReflection => "DECISION_REFLECTION",
            DocumentType::WeeklyReview => "WEEKLY_REVIEW",
            DocumentType::Other => "OTHER",
        }
    }

    /// Parses the persisted string form.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "GENERAL_NOTES" => Some(DocumentType::GeneralNotes),
            "FOCUS_REVIEW" => Some(DocumentType::FocusReview),
            "DECISION_REFLECTION" => Some(DocumentType::DecisionReflection),
            "WEEKLY_REVIEW" => Some(DocumentType::WeeklyReview),
            "OTHER" => Some(DocumentType::Other),
            _ => None,
        }
    }
}

/// A rich-text document.
///
/// # Invariants
///
/// - `title` is 1-200 characters
/// - `doc_type` never changes after creation
/// - `tags` is a set (no duplicates), each tag 1-50 characters
/// - linked ids reference records owned by the same user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    id: DocumentId,
    user_id: UserId,
    title: String,
    content: RichContent,
    doc_type: DocumentType,
    tags: BTreeSet<String>,
    focus_ids: Vec<FocusEntryId>,
    decision_ids: Vec<DecisionId>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Document {
    /// Create a new document.
    ///
    /// Linked-id ownership is checked by the application layer against the
    /// repositories; this constructor validates shape only.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if title or tags are out of range
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: DocumentId,
        user_id: UserId,
        title: String,
        content: RichContent,
        doc_type: DocumentType,
        tags: BTreeSet<String>,
        focus_ids: Vec<FocusEntryId>,
        decision_ids: Vec<DecisionId>,
    ) -> Result<Self, DomainError> {
        let mut fields = FieldErrors::new();
        validate_title(&title, &mut fields);
        validate_tags(&tags, &mut fields);
        if !fields.is_empty() {
            return Err(DomainError::validation(fields));
        }

        let now = Timestamp::now();
        Ok(Self {
            id,
            user_id,
            title,
            content,
            doc_type,
            tags,
            focus_ids: dedup_preserving_order(focus_ids),
            decision_ids: dedup_preserving_order(decision_ids),
            created_at: now,
            updated_at: now,
        })
    }

    /// Reconstitute a document from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: DocumentId,
        user_id: UserId,
        title: String,
        content: RichContent,
        doc_type: DocumentType,
        tags: BTreeSet<String>,
        focus_ids: Vec<FocusEntryId>,
        decision_ids: Vec<DecisionId>,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            user_id,
            title,
            content,
            doc_type,
            tags,
            focus_ids,
            decision_ids,
            created_at,
            updated_at,
        }
    }

    /// Apply an update. `doc_type` is deliberately absent: the document
    /// kind is immutable after creation.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if title or tags are out of range
    pub fn apply_update(
        &mut self,
        title: String,
        content: RichContent,
        tags: BTreeSet<String>,
        focus_ids: Vec<FocusEntryId>,
        decision_ids: Vec<DecisionId>,
    ) -> Result<(), DomainError> {
        let mut fields = FieldErrors::new();
        validate_title(&title, &mut fields);
        validate_tags(&tags, &mut fields);
        if !fields.is_empty() {
            return Err(DomainError::validation(fields));
        }

        self.title = title;
        self.content = content;
        self.tags = tags;
        self.focus_ids = dedup_preserving_order(focus_ids);
        self.decision_ids = dedup_preserving_order(decision_ids);
        self.updated_at = Timestamp::now();
        Ok(())
    }

    pub fn id(&self) -> &DocumentId {
        &self.id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &RichContent {
        &self.content
    }

    pub fn doc_type(&self) -> DocumentType {
        self.doc_type
    }

    pub fn tags(&self) -> &BTreeSet<String> {
        &self.tags
    }

    pub fn focus_ids(&self) -> &[FocusEntryId] {
        &self.focus_ids
    }

    pub fn decision_ids(&self) -> &[DecisionId] {
        &self.decision_ids
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }
}

fn validate_title(title: &str, fields: &mut FieldErrors) {
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
}

fn validate_tags(tags: &BTreeSet<String>, fields: &mut FieldErrors) {
    if tags.len() > MAX_TAGS {
        fields.push(ValidationError::invalid_format(
            "tags",
            format!("at most {} tags allowed", MAX_TAGS),
        ));
    }
    for tag in tags {
        if tag.trim().is_empty() || tag.chars().count() > MAX_TAG_LENGTH {
            fields.push(ValidationError::invalid_format(
                "tags",
                format!("tag '{}' must be 1-{} characters", tag, MAX_TAG_LENGTH),
            ));
        }
    }
}

fn dedup_preserving_order<T: Clone + Eq + std::hash::Hash>(ids: Vec<T>) -> Vec<T> {
    let mut seen = std::collections::HashSet::new();
    ids.into_iter().filter(|id| seen.insert(id.clone())).collect()
}
