//! HTTP handler for the merged timeline.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde::Serialize;

use crate::application::handlers::{GetTimelineHandler, GetTimelineQuery};
use crate::domain::timeline::TimelineEvent;

use super::error::ApiError;
use super::middleware::RequireAuth;

#[derive(Clone)]
pub struct TimelineHandlers {
    timeline: Arc<GetTimelineHandler>,
}

impl TimelineHandlers {
    pub fn new(timeline: Arc<GetTimelineHandler>) -> Self {
        Self { timeline }
    }
}

/// Creates the timeline router.
pub fn timeline_routes(handlers: TimelineHandlers) -> Router {
    Router::new()
        .route("/", get(get_timeline))
        .with_state(handlers)
}

/// One event on the merged timeline, discriminated by `kind`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEventResponse {
    pub kind: &'static str,
    pub id: String,
    pub title: String,
    pub occurred_at: String,
    /// Focus events carry their duration; decision events do not.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<u32>,
}

impl From<&TimelineEvent> for TimelineEventResponse {
    fn from(event: &TimelineEvent) -> Self {
        match event {
            TimelineEvent::Focus(entry) => Self {
                kind: "focus",
                id: entry.id().to_string(),
                title: entry.title().to_string(),
                occurred_at: entry.occurred_at().as_datetime().to_rfc3339(),
                duration_minutes: Some(entry.duration_minutes()),
            },
            TimelineEvent::Decision(decision) => Self {
                kind: "decision",
                id: decision.id().to_string(),
                title: decision.title().to_string(),
                occurred_at: decision.decided_at().as_datetime().to_rfc3339(),
                duration_minutes: None,
            },
        }
    }
}

/// GET /api/timeline - Chronologically merged focus entries and decisions
async fn get_timeline(
    State(handlers): State<TimelineHandlers>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let events = handlers
        .timeline
        .handle(GetTimelineQuery { user_id: user.id })
        .await?;

    let body: Vec<TimelineEventResponse> = events.iter().map(Into::into).collect();
    Ok((StatusCode::OK, Json(body)))
}
