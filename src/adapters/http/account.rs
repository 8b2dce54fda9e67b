//! HTTP handlers for signup and login.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::post, Json, Router};
use serde::{Deserialize, Serialize};

use crate::application::handlers::{
    LoginCommand, LoginHandler, SignupCommand, SignupHandler, SignupResult,
};

use super::error::ApiError;

#[derive(Clone)]
pub struct AccountHandlers {
    signup: Arc<SignupHandler>,
    login: Arc<LoginHandler>,
}

impl AccountHandlers {
    pub fn new(signup: Arc<SignupHandler>, login: Arc<LoginHandler>) -> Self {
        Self { signup, login }
    }
}

/// Creates the account router.
pub fn account_routes(handlers: AccountHandlers) -> Router {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .with_state(handlers)
}

// ════════════════════════════════════════════════════════════════════════════
// DTOs
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub token: String,
    pub user: AccountResponse,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountResponse {
    pub id: String,
    pub name: String,
    pub email: String,
}

impl From<SignupResult> for SessionResponse {
    fn from(result: SignupResult) -> Self {
        Self {
            token: result.token,
            user: AccountResponse {
                id: result.account.user_id.to_string(),
                name: result.account.name,
                email: result.account.email,
            },
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /signup - Create an account
async fn signup(
    State(handlers): State<AccountHandlers>,
    Json(req): Json<SignupRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let result = handlers
        .signup
        .handle(SignupCommand {
            name: req.name,
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(SessionResponse::from(result))))
}

/// POST /login - Exchange credentials for a session token
async fn login(
    State(handlers): State<AccountHandlers>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let result = handlers
        .login
        .handle(LoginCommand {
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok((StatusCode::OK, Json(SessionResponse::from(result))))
}
