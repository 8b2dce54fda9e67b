//! Document handlers.
//!
//! Create and update verify that every linked focus/decision id belongs
//! to the caller before persisting; a link to someone else's record is a
//! validation failure, not a hint that the record exists.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::domain::document::{Document, DocumentType, RichContent};
use crate::domain::foundation::{
    DecisionId, DocumentId, DomainError, ErrorCode, FieldErrors, FocusEntryId, UserId,
};
use crate::ports::{DecisionRepository, DocumentRepository, FocusRepository};

/// Command to create a document.
#[derive(Debug, Clone)]
pub struct CreateDocumentCommand {
    pub user_id: UserId,
    pub title: String,
    pub content: RichContent,
    pub doc_type: DocumentType,
    pub tags: BTreeSet<String>,
    pub focus_ids: Vec<FocusEntryId>,
    pub decision_ids: Vec<DecisionId>,
}

/// Handler creating a document after checking link ownership.
pub struct CreateDocumentHandler {
    documents: Arc<dyn DocumentRepository>,
    focus: Arc<dyn FocusRepository>,
    decisions: Arc<dyn DecisionRepository>,
}

impl CreateDocumentHandler {
    pub fn new(
        documents: Arc<dyn DocumentRepository>,
        focus: Arc<dyn FocusRepository>,
        decisions: Arc<dyn DecisionRepository>,
    ) -> Self {
        Self {
            documents,
            focus,
            decisions,
        }
    }

    pub async fn handle(&self, cmd: CreateDocumentCommand) -> Result<Document, DomainError> {
        let document = Document::new(
            DocumentId::new(),
            cmd.user_id,
            cmd.title,
            cmd.content,
            cmd.doc_type,
            cmd.tags,
            cmd.focus_ids,
            cmd.decision_ids,
        )?;

        check_link_ownership(
            self.focus.as_ref(),
            self.decisions.as_ref(),
            document.focus_ids(),
            document.decision_ids(),
            &cmd.user_id,
        )
        .await?;

        self.documents.save(&document).await?;
        Ok(document)
    }
}

/// Query for one document by id.
#[derive(Debug, Clone)]
pub struct GetDocumentQuery {
    pub document_id: DocumentId,
    pub user_id: UserId,
}

/// Handler fetching a single owned document.
pub struct GetDocumentHandler {
    documents: Arc<dyn DocumentRepository>,
}

impl GetDocumentHandler {
    pub fn new(documents: Arc<dyn DocumentRepository>) -> Self {
        Self { documents }
    }

    /// Returns `DocumentNotFound` both when the document is absent and
    /// when it belongs to another user.
    pub async fn handle(&self, query: GetDocumentQuery) -> Result<Document, DomainError> {
        self.documents
            .find_by_id(&query.document_id, &query.user_id)
            .await?
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::DocumentNotFound,
                    format!("Document not found: {}", query.document_id),
                )
            })
    }
}

/// Query for all of a user's documents.
#[derive(Debug, Clone)]
pub struct ListDocumentsQuery {
    pub user_id: UserId,
}

/// Handler listing a user's documents, most recently updated first.
pub struct ListDocumentsHandler {
    documents: Arc<dyn DocumentRepository>,
}

impl ListDocumentsHandler {
    pub fn new(documents: Arc<dyn DocumentRepository>) -> Self {
        Self { documents }
    }

    pub async fn handle(&self, query: ListDocumentsQuery) -> Result<Vec<Document>, DomainError> {
        self.documents.find_all_by_user(&query.user_id).await
    }
}

/// Command to update a document. The document kind is not part of the
/// update surface; it is immutable after creation.
#[derive(Debug, Clone)]
pub struct UpdateDocumentCommand {
    pub document_id: DocumentId,
    pub user_id: UserId,
    pub title: String,
    pub content: RichContent,
    pub tags: BTreeSet<String>,
    pub focus_ids: Vec<FocusEntryId>,
    pub decision_ids: Vec<DecisionId>,
}

/// Handler updating an owned document.
pub struct UpdateDocumentHandler {
    documents: Arc<dyn DocumentRepository>,
    focus: Arc<dyn FocusRepository>,
    decisions: Arc<dyn DecisionRepository>,
}

impl UpdateDocumentHandler {
    pub fn new(
        documents: Arc<dyn DocumentRepository>,
        focus: Arc<dyn FocusRepository>,
        decisions: Arc<dyn DecisionRepository>,
    ) -> Self {
        Self {
            documents,
            focus,
            decisions,
        }
    }

    pub async fn handle(&self, cmd: UpdateDocumentCommand) -> Result<Document, DomainError> {
        let mut document = self
            .documents
            .find_by_id(&cmd.document_id, &cmd.user_id)
            .await?
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::DocumentNotFound,
                    format!("Document not found: {}", cmd.document_id),
                )
            })?;

        document.apply_update(
            cmd.title,
            cmd.content,
            cmd.tags,
            cmd.focus_ids,
            cmd.decision_ids,
        )?;

        check_link_ownership(
            self.focus.as_ref(),
            self.decisions.as_ref(),
            document.focus_ids(),
            document.decision_ids(),
            &cmd.user_id,
        )
        .await?;

        self.documents.update(&document).await?;
        Ok(document)
    }
}

/// Verifies all linked ids belong to the user. Fails the offending field
/// with a validation error that does not reveal which ids exist.
async fn check_link_ownership(
    focus: &dyn FocusRepository,
    decisions: &dyn DecisionRepository,
    focus_ids: &[FocusEntryId],
    decision_ids: &[DecisionId],
    user_id: &UserId,
) -> Result<(), DomainError> {
    let mut fields = FieldErrors::new();

    if !focus_ids.is_empty() {
        let owned = focus.count_owned(focus_ids, user_id).await?;
        if owned != focus_ids.len() as u64 {
            fields.push_message("focusIds", "references a focus entry that was not found");
        }
    }
    if !decision_ids.is_empty() {
        let owned = decisions.count_owned(decision_ids, user_id).await?;
        if owned != decision_ids.len() as u64 {
            fields.push_message("decisionIds", "references a decision that was not found");
        }
    }

    if fields.is_empty() {
        Ok(())
    } else {
        Err(DomainError::validation(fields))
    }
}
