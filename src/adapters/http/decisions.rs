//! HTTP handlers for decision endpoints.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::application::handlers::{
    GetRecentDecisionsHandler, GetRecentDecisionsQuery, RecordDecisionCommand,
    RecordDecisionHandler,
};
use crate::domain::decision::Decision;
use crate::domain::foundation::Timestamp;

use super::error::ApiError;
use super::middleware::RequireAuth;

#[derive(Clone)]
pub struct DecisionHandlers {
    recent: Arc<GetRecentDecisionsHandler>,
    record: Arc<RecordDecisionHandler>,
}

impl DecisionHandlers {
    pub fn new(recent: Arc<GetRecentDecisionsHandler>, record: Arc<RecordDecisionHandler>) -> Self {
        Self { recent, record }
    }
}

/// Creates the decision router.
pub fn decision_routes(handlers: DecisionHandlers) -> Router {
    Router::new()
        .route("/", get(list_decisions))
        .route("/", post(record_decision))
        .with_state(handlers)
}

// ════════════════════════════════════════════════════════════════════════════
// DTOs
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Deserialize)]
pub struct ListDecisionsQuery {
    #[serde(default)]
    pub limit: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordDecisionRequest {
    pub title: String,
    #[serde(default)]
    pub context: Option<String>,
    pub decided_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionResponse {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    pub decided_at: String,
    pub created_at: String,
}

impl From<&Decision> for DecisionResponse {
    fn from(decision: &Decision) -> Self {
        Self {
            id: decision.id().to_string(),
            title: decision.title().to_string(),
            context: decision.context().map(|c| c.to_string()),
            decided_at: decision.decided_at().as_datetime().to_rfc3339(),
            created_at: decision.created_at().as_datetime().to_rfc3339(),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════

/// GET /api/decisions?limit=N - Recent decisions for the caller
async fn list_decisions(
    State(handlers): State<DecisionHandlers>,
    RequireAuth(user): RequireAuth,
    Query(params): Query<ListDecisionsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let decisions = handlers
        .recent
        .handle(GetRecentDecisionsQuery {
            user_id: user.id,
            limit: params.limit,
        })
        .await?;

    let body: Vec<DecisionResponse> = decisions.iter().map(Into::into).collect();
    Ok((StatusCode::OK, Json(body)))
}

/// POST /api/decisions - Record a decision
async fn record_decision(
    State(handlers): State<DecisionHandlers>,
    RequireAuth(user): RequireAuth,
    Json(req): Json<RecordDecisionRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let decision = handlers
        .record
        .handle(RecordDecisionCommand {
            user_id: user.id,
            title: req.title,
            context: req.context,
            decided_at: Timestamp::from_datetime(req.decided_at),
        })
        .await?;

    Ok((StatusCode::CREATED, Json(DecisionResponse::from(&decision))))
}
