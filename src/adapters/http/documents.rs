//! HTTP handlers for document endpoints.
//!
//! The rich content payload crosses this boundary untouched; only its
//! schema version tag is read and written.

use std::collections::BTreeSet;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::handlers::{
    CreateDocumentCommand, CreateDocumentHandler, GetDocumentHandler, GetDocumentQuery,
    ListDocumentsHandler, ListDocumentsQuery, UpdateDocumentCommand, UpdateDocumentHandler,
};
use crate::domain::document::{Document, DocumentType, RichContent, CURRENT_SCHEMA_VERSION};
use crate::domain::foundation::{
    DecisionId, DocumentId, DomainError, ErrorCode, FieldErrors, FocusEntryId,
};

use super::error::ApiError;
use super::middleware::RequireAuth;

#[derive(Clone)]
pub struct DocumentHandlers {
    create: Arc<CreateDocumentHandler>,
    get: Arc<GetDocumentHandler>,
    list: Arc<ListDocumentsHandler>,
    update: Arc<UpdateDocumentHandler>,
}

impl DocumentHandlers {
    pub fn new(
        create: Arc<CreateDocumentHandler>,
        get: Arc<GetDocumentHandler>,
        list: Arc<ListDocumentsHandler>,
        update: Arc<UpdateDocumentHandler>,
    ) -> Self {
        Self {
            create,
            get,
            list,
            update,
        }
    }
}

/// Creates the document router.
pub fn document_routes(handlers: DocumentHandlers) -> Router {
    Router::new()
        .route("/", get(list_documents))
        .route("/", post(create_document))
        .route("/:id", get(get_document))
        .route("/:id", put(update_document))
        .with_state(handlers)
}

// ════════════════════════════════════════════════════════════════════════════
// DTOs
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RichContentDto {
    #[serde(default = "current_schema_version")]
    pub schema_version: i32,
    pub payload: String,
}

fn current_schema_version() -> i32 {
    CURRENT_SCHEMA_VERSION
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDocumentRequest {
    pub title: String,
    pub content: RichContentDto,
    pub doc_type: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub focus_ids: Vec<Uuid>,
    #[serde(default)]
    pub decision_ids: Vec<Uuid>,
}

/// Update surface; `docType` is deliberately absent.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDocumentRequest {
    pub title: String,
    pub content: RichContentDto,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub focus_ids: Vec<Uuid>,
    #[serde(default)]
    pub decision_ids: Vec<Uuid>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentResponse {
    pub id: String,
    pub title: String,
    pub content: RichContentDto,
    pub doc_type: String,
    pub tags: Vec<String>,
    pub focus_ids: Vec<String>,
    pub decision_ids: Vec<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&Document> for DocumentResponse {
    fn from(document: &Document) -> Self {
        Self {
            id: document.id().to_string(),
            title: document.title().to_string(),
            content: RichContentDto {
                schema_version: document.content().schema_version,
                payload: document.content().payload.clone(),
            },
            doc_type: document.doc_type().as_str().to_string(),
            tags: document.tags().iter().cloned().collect(),
            focus_ids: document.focus_ids().iter().map(|id| id.to_string()).collect(),
            decision_ids: document
                .decision_ids()
                .iter()
                .map(|id| id.to_string())
                .collect(),
            created_at: document.created_at().as_datetime().to_rfc3339(),
            updated_at: document.updated_at().as_datetime().to_rfc3339(),
        }
    }
}

fn parse_doc_type(raw: &str) -> Result<DocumentType, ApiError> {
    DocumentType::parse(raw).ok_or_else(|| {
        let mut fields = FieldErrors::new();
        fields.push_message("docType", format!("unknown document type '{}'", raw));
        ApiError::from(DomainError::validation(fields))
    })
}

fn parse_document_id(raw: &str) -> Result<DocumentId, ApiError> {
    raw.parse::<DocumentId>().map_err(|_| {
        ApiError::from(DomainError::new(
            ErrorCode::DocumentNotFound,
            format!("Document not found: {}", raw),
        ))
    })
}

// ════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════

/// GET /api/documents - All documents for the caller
async fn list_documents(
    State(handlers): State<DocumentHandlers>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let documents = handlers
        .list
        .handle(ListDocumentsQuery { user_id: user.id })
        .await?;

    let body: Vec<DocumentResponse> = documents.iter().map(Into::into).collect();
    Ok((StatusCode::OK, Json(body)))
}

/// POST /api/documents - Create a document
async fn create_document(
    State(handlers): State<DocumentHandlers>,
    RequireAuth(user): RequireAuth,
    Json(req): Json<CreateDocumentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let doc_type = parse_doc_type(&req.doc_type)?;

    let document = handlers
        .create
        .handle(CreateDocumentCommand {
            user_id: user.id,
            title: req.title,
            content: RichContent::from_parts(req.content.schema_version, req.content.payload),
            doc_type,
            tags: req.tags.into_iter().collect::<BTreeSet<String>>(),
            focus_ids: req.focus_ids.into_iter().map(FocusEntryId::from_uuid).collect(),
            decision_ids: req.decision_ids.into_iter().map(DecisionId::from_uuid).collect(),
        })
        .await?;

    Ok((StatusCode::CREATED, Json(DocumentResponse::from(&document))))
}

/// GET /api/documents/:id - Fetch one owned document
async fn get_document(
    State(handlers): State<DocumentHandlers>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let document_id = parse_document_id(&id)?;

    let document = handlers
        .get
        .handle(GetDocumentQuery {
            document_id,
            user_id: user.id,
        })
        .await?;

    Ok((StatusCode::OK, Json(DocumentResponse::from(&document))))
}

/// PUT /api/documents/:id - Update an owned document
async fn update_document(
    State(handlers): State<DocumentHandlers>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
    Json(req): Json<UpdateDocumentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let document_id = parse_document_id(&id)?;

    let document = handlers
        .update
        .handle(UpdateDocumentCommand {
            document_id,
            user_id: user.id,
            title: req.title,
            content: RichContent::from_parts(req.content.schema_version, req.content.payload),
            tags: req.tags.into_iter().collect::<BTreeSet<String>>(),
            focus_ids: req.focus_ids.into_iter().map(FocusEntryId::from_uuid).collect(),
            decision_ids: req.decision_ids.into_iter().map(DecisionId::from_uuid).collect(),
        })
        .await?;

    Ok((StatusCode::OK, Json(DocumentResponse::from(&document))))
}
