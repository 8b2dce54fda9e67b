//! ClarityLog API server.

use std::sync::Arc;
use std::time::Duration;

use axum::http::HeaderValue;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use claritylog::adapters::auth::{Argon2PasswordHasher, JwtSessionService};
use claritylog::adapters::http::{build_router, ApiDependencies};
use claritylog::adapters::postgres::{
    PostgresDecisionRepository, PostgresDocumentRepository, PostgresFocusRepository,
    PostgresUserRepository,
};
use claritylog::config::AppConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(config.server.log_level.clone()))
        .init();

    let pool = PgPoolOptions::new()
        .min_connections(config.database.min_connections)
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .idle_timeout(config.database.idle_timeout())
        .connect(&config.database.url)
        .await?;

    if config.database.run_migrations {
        tracing::info!("running database migrations");
        sqlx::migrate!("./migrations").run(&pool).await?;
    }

    let sessions = Arc::new(JwtSessionService::new(&config.auth));
    let deps = ApiDependencies {
        focus: Arc::new(PostgresFocusRepository::new(pool.clone())),
        decisions: Arc::new(PostgresDecisionRepository::new(pool.clone())),
        documents: Arc::new(PostgresDocumentRepository::new(pool.clone())),
        users: Arc::new(PostgresUserRepository::new(pool.clone())),
        passwords: Arc::new(Argon2PasswordHasher::new()),
        session_validator: sessions.clone(),
        token_issuer: sessions,
    };

    let app = build_router(deps)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(cors_layer(&config)?);

    let addr = config.server.socket_addr()?;
    tracing::info!(%addr, environment = ?config.server.environment, "starting server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn cors_layer(config: &AppConfig) -> Result<CorsLayer, Box<dyn std::error::Error>> {
    let origins = config.server.cors_origins_list();
    if origins.is_empty() {
        // No origins configured: open CORS for local development.
        return Ok(CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any));
    }

    let parsed: Result<Vec<HeaderValue>, _> =
        origins.iter().map(|o| o.parse::<HeaderValue>()).collect();
    Ok(CorsLayer::new()
        .allow_origin(parsed?)
        .allow_methods(Any)
        .allow_headers(Any))
}
