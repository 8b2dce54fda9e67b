//! HTTP handler for the insights report.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde::Serialize;

use crate::application::handlers::{GetInsightsHandler, GetInsightsQuery};
use crate::domain::insights::InsightReport;

use super::error::ApiError;
use super::middleware::RequireAuth;

#[derive(Clone)]
pub struct InsightHandlers {
    insights: Arc<GetInsightsHandler>,
}

impl InsightHandlers {
    pub fn new(insights: Arc<GetInsightsHandler>) -> Self {
        Self { insights }
    }
}

/// Creates the insights router.
pub fn insight_routes(handlers: InsightHandlers) -> Router {
    Router::new()
        .route("/", get(get_insights))
        .with_state(handlers)
}

/// The report serializes as-is; this wrapper keys it under camelCase.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightsResponse {
    pub focus_count: usize,
    pub decision_count: usize,
    pub document_count: usize,
    pub total_focus_minutes: u64,
    pub weekday_activity: [u32; 7],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub busiest_weekday: Option<String>,
    pub weekly_trend: Vec<WeekActivityResponse>,
    pub current_streak_days: u32,
    pub top_tags: Vec<TagCountResponse>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekActivityResponse {
    pub week_start: String,
    pub focus_count: u32,
    pub decision_count: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TagCountResponse {
    pub tag: String,
    pub count: u32,
}

impl From<InsightReport> for InsightsResponse {
    fn from(report: InsightReport) -> Self {
        Self {
            focus_count: report.focus_count,
            decision_count: report.decision_count,
            document_count: report.document_count,
            total_focus_minutes: report.total_focus_minutes,
            weekday_activity: report.weekday_activity,
            busiest_weekday: report.busiest_weekday,
            weekly_trend: report
                .weekly_trend
                .into_iter()
                .map(|week| WeekActivityResponse {
                    week_start: week.week_start.to_string(),
                    focus_count: week.focus_count,
                    decision_count: week.decision_count,
                })
                .collect(),
            current_streak_days: report.current_streak_days,
            top_tags: report
                .top_tags
                .into_iter()
                .map(|tag| TagCountResponse {
                    tag: tag.tag,
                    count: tag.count,
                })
                .collect(),
        }
    }
}

/// GET /api/insights - Derived analytics over the caller's full history
async fn get_insights(
    State(handlers): State<InsightHandlers>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let report = handlers
        .insights
        .handle(GetInsightsQuery { user_id: user.id })
        .await?;

    Ok((StatusCode::OK, Json(InsightsResponse::from(report))))
}
