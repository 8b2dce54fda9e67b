//! HTTP API integration tests.
//!
//! Runs the full router over in-memory repositories and a mock session
//! validator; requests go through `tower::ServiceExt::oneshot` without a
//! real listener.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use claritylog::adapters::auth::{Argon2PasswordHasher, MockSessionValidator, MockTokenIssuer};
use claritylog::adapters::http::{build_router, ApiDependencies};
use claritylog::domain::decision::Decision;
use claritylog::domain::document::Document;
use claritylog::domain::focus::FocusEntry;
use claritylog::domain::foundation::{
    AuthenticatedUser, DecisionId, DocumentId, DomainError, ErrorCode, FocusEntryId, Timestamp,
    UserId,
};
use claritylog::domain::user::User;
use claritylog::ports::{
    DecisionRepository, DocumentRepository, FocusRepository, UserRepository,
};

// ─────────────────────────────────────────────────────────────────────────
// In-memory repositories
// ─────────────────────────────────────────────────────────────────────────

#[derive(Default)]
struct InMemoryFocusRepository {
    entries: Mutex<Vec<FocusEntry>>,
}

#[async_trait]
impl FocusRepository for InMemoryFocusRepository {
    async fn save(&self, entry: &FocusEntry) -> Result<(), DomainError> {
        self.entries.lock().unwrap().push(entry.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: &FocusEntryId,
        user_id: &UserId,
    ) -> Result<Option<FocusEntry>, DomainError> {
        Ok(self
            .entries
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.id() == id && e.user_id() == user_id)
            .cloned())
    }

    async fn find_all_by_user(&self, user_id: &UserId) -> Result<Vec<FocusEntry>, DomainError> {
        let mut entries: Vec<FocusEntry> = self
            .entries
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.user_id() == user_id)
            .cloned()
            .collect();
        entries.sort_by_key(|e| std::cmp::Reverse(e.occurred_at()));
        Ok(entries)
    }

    async fn count_owned(
        &self,
        ids: &[FocusEntryId],
        user_id: &UserId,
    ) -> Result<u64, DomainError> {
        let entries = self.entries.lock().unwrap();
        Ok(ids
            .iter()
            .filter(|id| entries.iter().any(|e| e.id() == *id && e.user_id() == user_id))
            .count() as u64)
    }
}

#[derive(Default)]
struct InMemoryDecisionRepository {
    decisions: Mutex<Vec<Decision>>,
}

#[async_trait]
impl DecisionRepository for InMemoryDecisionRepository {
    async fn save(&self, decision: &Decision) -> Result<(), DomainError> {
        self.decisions.lock().unwrap().push(decision.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: &DecisionId,
        user_id: &UserId,
    ) -> Result<Option<Decision>, DomainError> {
        Ok(self
            .decisions
            .lock()
            .unwrap()
            .iter()
            .find(|d| d.id() == id && d.user_id() == user_id)
            .cloned())
    }

    async fn find_recent_by_user(
        &self,
        user_id: &UserId,
        limit: Option<u32>,
    ) -> Result<Vec<Decision>, DomainError> {
        let mut decisions: Vec<Decision> = self
            .decisions
            .lock()
            .unwrap()
            .iter()
            .filter(|d| d.user_id() == user_id)
            .cloned()
            .collect();
        decisions.sort_by_key(|d| std::cmp::Reverse(d.decided_at()));
        if let Some(limit) = limit {
            decisions.truncate(limit as usize);
        }
        Ok(decisions)
    }

    async fn count_owned(&self, ids: &[DecisionId], user_id: &UserId) -> Result<u64, DomainError> {
        let decisions = self.decisions.lock().unwrap();
        Ok(ids
            .iter()
            .filter(|id| decisions.iter().any(|d| d.id() == *id && d.user_id() == user_id))
            .count() as u64)
    }
}

#[derive(Default)]
struct InMemoryDocumentRepository {
    documents: Mutex<Vec<Document>>,
}

#[async_trait]
impl DocumentRepository for InMemoryDocumentRepository {
    async fn save(&self, document: &Document) -> Result<(), DomainError> {
        self.documents.lock().unwrap().push(document.clone());
        Ok(())
    }

    async fn update(&self, document: &Document) -> Result<(), DomainError> {
        let mut documents = self.documents.lock().unwrap();
        match documents
            .iter_mut()
            .find(|d| d.id() == document.id() && d.user_id() == document.user_id())
        {
            Some(slot) => {
                *slot = document.clone();
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::DocumentNotFound,
                "Document not found",
            )),
        }
    }

    async fn find_by_id(
        &self,
        id: &DocumentId,
        user_id: &UserId,
    ) -> Result<Option<Document>, DomainError> {
        Ok(self
            .documents
            .lock()
            .unwrap()
            .iter()
            .find(|d| d.id() == id && d.user_id() == user_id)
            .cloned())
    }

    async fn find_all_by_user(&self, user_id: &UserId) -> Result<Vec<Document>, DomainError> {
        Ok(self
            .documents
            .lock()
            .unwrap()
            .iter()
            .filter(|d| d.user_id() == user_id)
            .cloned()
            .collect())
    }
}

#[derive(Default)]
struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn save(&self, user: &User) -> Result<(), DomainError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email() == user.email()) {
            return Err(DomainError::new(
                ErrorCode::EmailTaken,
                "An account with this email already exists",
            ));
        }
        users.push(user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id() == id)
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email() == email)
            .cloned())
    }
}

// ─────────────────────────────────────────────────────────────────────────
// Test app wiring
// ─────────────────────────────────────────────────────────────────────────

struct TestApp {
    router: Router,
    focus: Arc<InMemoryFocusRepository>,
    decisions: Arc<InMemoryDecisionRepository>,
    user_id: UserId,
}

const TOKEN: &str = "test-session-token";

fn test_app() -> TestApp {
    let user_id = UserId::new();
    let validator = MockSessionValidator::new().with_user(
        TOKEN,
        AuthenticatedUser::new(user_id, "owner@example.com", Some("Owner".to_string())),
    );

    let focus = Arc::new(InMemoryFocusRepository::default());
    let decisions = Arc::new(InMemoryDecisionRepository::default());

    let deps = ApiDependencies {
        focus: focus.clone(),
        decisions: decisions.clone(),
        documents: Arc::new(InMemoryDocumentRepository::default()),
        users: Arc::new(InMemoryUserRepository::default()),
        passwords: Arc::new(Argon2PasswordHasher::new()),
        session_validator: Arc::new(validator),
        token_issuer: Arc::new(MockTokenIssuer::new()),
    };

    TestApp {
        router: build_router(deps),
        focus,
        decisions,
        user_id,
    }
}

fn get(path: &str) -> Request<Body> {
    Request::builder().uri(path).body(Body::empty()).unwrap()
}

fn authed_get(path: &str) -> Request<Body> {
    Request::builder()
        .uri(path)
        .header(header::AUTHORIZATION, format!("Bearer {}", TOKEN))
        .body(Body::empty())
        .unwrap()
}

fn authed_post(path: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(path)
        .header(header::AUTHORIZATION, format!("Bearer {}", TOKEN))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn post(path: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ─────────────────────────────────────────────────────────────────────────
// Public surface
// ─────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn health_is_public() {
    let app = test_app();

    let response = app.router.oneshot(get("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn robots_txt_allows_public_and_disallows_private() {
    let app = test_app();

    let response = app.router.oneshot(get("/robots.txt")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(body.contains("Allow: /signup"));
    assert!(body.contains("Disallow: /dashboard/"));
    assert!(body.contains("Disallow: /login"));
    assert!(body.contains("Disallow: /api/"));
    assert!(body.contains("Disallow: /admin/"));
}

#[tokio::test]
async fn api_routes_require_authentication() {
    let app = test_app();

    let response = app.router.oneshot(get("/api/focus")).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn invalid_token_is_rejected() {
    let app = test_app();

    let request = Request::builder()
        .uri("/api/focus")
        .header(header::AUTHORIZATION, "Bearer wrong-token")
        .body(Body::empty())
        .unwrap();
    let response = app.router.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ─────────────────────────────────────────────────────────────────────────
// Signup / login
// ─────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn signup_and_login_roundtrip() {
    let app = test_app();

    let response = app
        .router
        .clone()
        .oneshot(post(
            "/signup",
            serde_json::json!({
                "name": "Alice",
                "email": "alice@example.com",
                "password": "Abcdefg1"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = json_body(response).await;
    assert_eq!(body["user"]["email"], "alice@example.com");
    assert!(body["token"].as_str().unwrap().len() > 0);

    let response = app
        .router
        .oneshot(post(
            "/login",
            serde_json::json!({
                "email": "alice@example.com",
                "password": "Abcdefg1"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn signup_reports_field_errors() {
    let app = test_app();

    let response = app
        .router
        .oneshot(post(
            "/signup",
            serde_json::json!({
                "name": "A",
                "email": "not-an-email",
                "password": "abcdefgh"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error"]["code"], "VALIDATION_FAILED");
    let details = &body["error"]["details"];
    assert!(details["name"].is_string());
    assert!(details["email"].is_string());
    assert!(details["password"].is_string());
}

#[tokio::test]
async fn duplicate_signup_conflicts() {
    let app = test_app();
    let signup = serde_json::json!({
        "name": "Alice",
        "email": "alice@example.com",
        "password": "Abcdefg1"
    });

    let first = app
        .router
        .clone()
        .oneshot(post("/signup", signup.clone()))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = app.router.oneshot(post("/signup", signup)).await.unwrap();
    assert_eq!(second.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn login_with_wrong_password_is_unauthorized() {
    let app = test_app();

    app.router
        .clone()
        .oneshot(post(
            "/signup",
            serde_json::json!({
                "name": "Alice",
                "email": "alice@example.com",
                "password": "Abcdefg1"
            }),
        ))
        .await
        .unwrap();

    let response = app
        .router
        .oneshot(post(
            "/login",
            serde_json::json!({
                "email": "alice@example.com",
                "password": "Wrong1234"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ─────────────────────────────────────────────────────────────────────────
// Authenticated flows
// ─────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn record_and_list_focus_entries() {
    let app = test_app();

    let response = app
        .router
        .clone()
        .oneshot(authed_post(
            "/api/focus",
            serde_json::json!({
                "title": "Deep work",
                "durationMinutes": 90,
                "occurredAt": "2024-01-15T09:00:00Z"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app.router.oneshot(authed_get("/api/focus")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["title"], "Deep work");
    assert_eq!(body[0]["durationMinutes"], 90);
}

#[tokio::test]
async fn record_focus_validation_failure_is_400() {
    let app = test_app();

    let response = app
        .router
        .oneshot(authed_post(
            "/api/focus",
            serde_json::json!({
                "title": "  ",
                "durationMinutes": 30,
                "occurredAt": "2024-01-15T09:00:00Z"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert!(body["error"]["details"]["title"].is_string());
}

#[tokio::test]
async fn timeline_merges_focus_and_decisions_chronologically() {
    let app = test_app();

    app.focus
        .save(
            &FocusEntry::reconstitute(
                FocusEntryId::new(),
                app.user_id,
                "first focus".to_string(),
                None,
                25,
                Timestamp::from_unix_secs(1_000),
                Timestamp::from_unix_secs(1_000),
            ),
        )
        .await
        .unwrap();
    app.focus
        .save(
            &FocusEntry::reconstitute(
                FocusEntryId::new(),
                app.user_id,
                "second focus".to_string(),
                None,
                25,
                Timestamp::from_unix_secs(3_000),
                Timestamp::from_unix_secs(3_000),
            ),
        )
        .await
        .unwrap();
    app.decisions
        .save(&Decision::reconstitute(
            DecisionId::new(),
            app.user_id,
            "a decision".to_string(),
            None,
            Timestamp::from_unix_secs(2_000),
            Timestamp::from_unix_secs(2_000),
        ))
        .await
        .unwrap();

    let response = app
        .router
        .oneshot(authed_get("/api/timeline"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    let titles: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["first focus", "a decision", "second focus"]);
    assert_eq!(body[0]["kind"], "focus");
    assert_eq!(body[1]["kind"], "decision");
}

#[tokio::test]
async fn cross_user_document_access_is_not_found() {
    // One router, two sessions over the same stores.
    const STRANGER_TOKEN: &str = "stranger-token";
    let owner_id = UserId::new();
    let validator = MockSessionValidator::new()
        .with_user(
            TOKEN,
            AuthenticatedUser::new(owner_id, "owner@example.com", None),
        )
        .with_user(
            STRANGER_TOKEN,
            AuthenticatedUser::new(UserId::new(), "stranger@example.com", None),
        );
    let deps = ApiDependencies {
        focus: Arc::new(InMemoryFocusRepository::default()),
        decisions: Arc::new(InMemoryDecisionRepository::default()),
        documents: Arc::new(InMemoryDocumentRepository::default()),
        users: Arc::new(InMemoryUserRepository::default()),
        passwords: Arc::new(Argon2PasswordHasher::new()),
        session_validator: Arc::new(validator),
        token_issuer: Arc::new(MockTokenIssuer::new()),
    };
    let router = build_router(deps);

    // Created by the owner's session.
    let response = router
        .clone()
        .oneshot(authed_post(
            "/api/documents",
            serde_json::json!({
                "title": "My notes",
                "content": { "payload": "{\"type\":\"doc\"}" },
                "docType": "GENERAL_NOTES"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = json_body(response).await;
    let document_id = body["id"].as_str().unwrap().to_string();

    // The owner can fetch it back.
    let response = router
        .clone()
        .oneshot(authed_get(&format!("/api/documents/{}", document_id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // The stranger sees it as missing, not forbidden.
    let request = Request::builder()
        .uri(format!("/api/documents/{}", document_id))
        .header(header::AUTHORIZATION, format!("Bearer {}", STRANGER_TOKEN))
        .body(Body::empty())
        .unwrap();
    let response = router.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = json_body(response).await;
    assert_eq!(body["error"]["code"], "DOCUMENT_NOT_FOUND");
}

#[tokio::test]
async fn document_link_to_foreign_focus_entry_is_rejected() {
    let app = test_app();

    let response = app
        .router
        .oneshot(authed_post(
            "/api/documents",
            serde_json::json!({
                "title": "Review",
                "content": { "payload": "{}" },
                "docType": "FOCUS_REVIEW",
                "focusIds": [uuid::Uuid::new_v4().to_string()]
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert!(body["error"]["details"]["focusIds"].is_string());
}

#[tokio::test]
async fn insights_over_empty_history_is_neutral() {
    let app = test_app();

    let response = app
        .router
        .oneshot(authed_get("/api/insights"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["focusCount"], 0);
    assert_eq!(body["decisionCount"], 0);
    assert_eq!(body["currentStreakDays"], 0);
    assert!(body["busiestWeekday"].is_null());
}

#[tokio::test]
async fn empty_listings_are_ok_not_errors() {
    let app = test_app();

    for path in ["/api/focus", "/api/decisions", "/api/documents", "/api/timeline"] {
        let response = app
            .router
            .clone()
            .oneshot(authed_get(path))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK, "path {}", path);
        let body = json_body(response).await;
        assert_eq!(body, serde_json::json!([]), "path {}", path);
    }
}
