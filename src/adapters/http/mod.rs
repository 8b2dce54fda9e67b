//! HTTP adapters - REST API implementation.
//!
//! Each feature has its own module with DTOs, handlers, and routes; this
//! module wires them into one router behind the auth middleware.

pub mod account;
pub mod decisions;
pub mod documents;
pub mod error;
pub mod focus;
pub mod insights;
pub mod middleware;
pub mod robots;
pub mod timeline;

use std::sync::Arc;

use axum::{routing::get, Json, Router};

use crate::application::handlers::{
    CreateDocumentHandler, GetAllFocusHandler, GetDocumentHandler, GetInsightsHandler,
    GetRecentDecisionsHandler, GetTimelineHandler, ListDocumentsHandler, LoginHandler,
    RecordDecisionHandler, RecordFocusHandler, SignupHandler, UpdateDocumentHandler,
};
use crate::ports::{
    DecisionRepository, DocumentRepository, FocusRepository, PasswordHasher, SessionValidator,
    TokenIssuer, UserRepository,
};

use account::{account_routes, AccountHandlers};
use decisions::{decision_routes, DecisionHandlers};
use documents::{document_routes, DocumentHandlers};
use focus::{focus_routes, FocusHandlers};
use insights::{insight_routes, InsightHandlers};
use middleware::auth_middleware;
use robots::robots_routes;
use timeline::{timeline_routes, TimelineHandlers};

/// Everything the HTTP layer needs, expressed as ports.
#[derive(Clone)]
pub struct ApiDependencies {
    pub focus: Arc<dyn FocusRepository>,
    pub decisions: Arc<dyn DecisionRepository>,
    pub documents: Arc<dyn DocumentRepository>,
    pub users: Arc<dyn UserRepository>,
    pub passwords: Arc<dyn PasswordHasher>,
    pub session_validator: Arc<dyn SessionValidator>,
    pub token_issuer: Arc<dyn TokenIssuer>,
}

/// Builds the full application router.
///
/// Public surface: `/signup`, `/login`, `/robots.txt`, `/health`.
/// Everything under `/api/` requires a Bearer token.
pub fn build_router(deps: ApiDependencies) -> Router {
    let account = AccountHandlers::new(
        Arc::new(SignupHandler::new(
            deps.users.clone(),
            deps.passwords.clone(),
            deps.token_issuer.clone(),
        )),
        Arc::new(LoginHandler::new(
            deps.users.clone(),
            deps.passwords.clone(),
            deps.token_issuer.clone(),
        )),
    );

    let focus = FocusHandlers::new(
        Arc::new(GetAllFocusHandler::new(deps.focus.clone())),
        Arc::new(RecordFocusHandler::new(deps.focus.clone())),
    );

    let decisions = DecisionHandlers::new(
        Arc::new(GetRecentDecisionsHandler::new(deps.decisions.clone())),
        Arc::new(RecordDecisionHandler::new(deps.decisions.clone())),
    );

    let documents = DocumentHandlers::new(
        Arc::new(CreateDocumentHandler::new(
            deps.documents.clone(),
            deps.focus.clone(),
            deps.decisions.clone(),
        )),
        Arc::new(GetDocumentHandler::new(deps.documents.clone())),
        Arc::new(ListDocumentsHandler::new(deps.documents.clone())),
        Arc::new(UpdateDocumentHandler::new(
            deps.documents.clone(),
            deps.focus.clone(),
            deps.decisions.clone(),
        )),
    );

    let timeline = TimelineHandlers::new(Arc::new(GetTimelineHandler::new(
        deps.focus.clone(),
        deps.decisions.clone(),
    )));

    let insights = InsightHandlers::new(Arc::new(GetInsightsHandler::new(
        deps.focus.clone(),
        deps.decisions.clone(),
        deps.documents.clone(),
    )));

    let protected = Router::new()
        .nest("/api/focus", focus_routes(focus))
        .nest("/api/decisions", decision_routes(decisions))
        .nest("/api/documents", document_routes(documents))
        .nest("/api/timeline", timeline_routes(timeline))
        .nest("/api/insights", insight_routes(insights))
        .layer(axum::middleware::from_fn_with_state(
            deps.session_validator.clone(),
            auth_middleware,
        ));

    Router::new()
        .route("/health", get(health))
        .merge(account_routes(account))
        .merge(robots_routes())
        .merge(protected)
}

/// GET /health - liveness probe
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
