//! HTTP handlers for focus entry endpoints.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::application::handlers::{
    GetAllFocusHandler, GetAllFocusQuery, RecordFocusCommand, RecordFocusHandler,
};
use crate::domain::focus::FocusEntry;
use crate::domain::foundation::Timestamp;

use super::error::ApiError;
use super::middleware::RequireAuth;

#[derive(Clone)]
pub struct FocusHandlers {
    list: Arc<GetAllFocusHandler>,
    record: Arc<RecordFocusHandler>,
}

impl FocusHandlers {
    pub fn new(list: Arc<GetAllFocusHandler>, record: Arc<RecordFocusHandler>) -> Self {
        Self { list, record }
    }
}

/// Creates the focus router.
pub fn focus_routes(handlers: FocusHandlers) -> Router {
    Router::new()
        .route("/", get(list_focus))
        .route("/", post(record_focus))
        .with_state(handlers)
}

// ════════════════════════════════════════════════════════════════════════════
// DTOs
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordFocusRequest {
    pub title: String,
    #[serde(default)]
    pub note: Option<String>,
    pub duration_minutes: u32,
    pub occurred_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FocusEntryResponse {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub duration_minutes: u32,
    pub occurred_at: String,
    pub created_at: String,
}

impl From<&FocusEntry> for FocusEntryResponse {
    fn from(entry: &FocusEntry) -> Self {
        Self {
            id: entry.id().to_string(),
            title: entry.title().to_string(),
            note: entry.note().map(|n| n.to_string()),
            duration_minutes: entry.duration_minutes(),
            occurred_at: entry.occurred_at().as_datetime().to_rfc3339(),
            created_at: entry.created_at().as_datetime().to_rfc3339(),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════

/// GET /api/focus - All focus entries for the caller, most recent first
async fn list_focus(
    State(handlers): State<FocusHandlers>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let entries = handlers
        .list
        .handle(GetAllFocusQuery { user_id: user.id })
        .await?;

    let body: Vec<FocusEntryResponse> = entries.iter().map(Into::into).collect();
    Ok((StatusCode::OK, Json(body)))
}

/// POST /api/focus - Record a focus entry
async fn record_focus(
    State(handlers): State<FocusHandlers>,
    RequireAuth(user): RequireAuth,
    Json(req): Json<RecordFocusRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let entry = handlers
        .record
        .handle(RecordFocusCommand {
            user_id: user.id,
            title: req.title,
            note: req.note,
            duration_minutes: req.duration_minutes,
            occurred_at: Timestamp::from_datetime(req.occurred_at),
        })
        .await?;

    Ok((StatusCode::CREATED, Json(FocusEntryResponse::from(&entry))))
}
