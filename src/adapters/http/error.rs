//! HTTP error mapping.
//!
//! One `ApiError` type maps every `DomainError` to a status code and a
//! JSON body of the shape:
//!
//! ```json
//! { "error": { "code": "DOCUMENT_NOT_FOUND", "message": "...", "details": {} } }
//! ```
//!
//! Infrastructure errors are logged server-side and surfaced with an
//! opaque message only.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Domain error carried across the HTTP boundary.
#[derive(Debug)]
pub struct ApiError(DomainError);

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self.0.code {
            ErrorCode::ValidationFailed => StatusCode::BAD_REQUEST,
            code if code.is_not_found() => StatusCode::NOT_FOUND,
            ErrorCode::EmailTaken => StatusCode::CONFLICT,
            ErrorCode::InvalidCredentials | ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorCode::DatabaseError | ErrorCode::InternalError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Do not leak infrastructure detail to clients.
        let (message, details) = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(code = %self.0.code, "request failed: {}", self.0.message);
            ("Internal server error".to_string(), Default::default())
        } else {
            (self.0.message, self.0.details)
        };

        let body = serde_json::json!({
            "error": {
                "code": self.0.code.to_string(),
                "message": message,
                "details": details,
            }
        });

        (status, Json(body)).into_response()
    }
}
