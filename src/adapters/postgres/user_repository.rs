//! PostgreSQL implementation of UserRepository.
//!
//! The unique index on `email` is the authority on duplicates; its
//! violation is surfaced as `EmailTaken` so the signup race resolves the
//! same way as the up-front check.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, UserId};
use crate::domain::user::User;
use crate::ports::UserRepository;

use super::focus_repository::get_column;

/// PostgreSQL implementation of UserRepository.
#[derive(Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Creates a new PostgresUserRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn save(&self, user: &User) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, name, email, password_hash, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(user.id().as_uuid())
        .bind(user.name())
        .bind(user.email())
        .bind(user.password_hash())
        .bind(user.created_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if e.as_database_error()
                .map(|db| db.is_unique_violation())
                .unwrap_or(false)
            {
                DomainError::new(
                    ErrorCode::EmailTaken,
                    "An account with this email already exists",
                )
                .with_detail("field", "email")
            } else {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to insert user: {}", e),
                )
            }
        })?;

        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        let row = sqlx::query(
            "SELECT id, name, email, password_hash, created_at FROM users WHERE id = $1",
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch user: {}", e),
            )
        })?;

        row.map(row_to_user).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let row = sqlx::query(
            "SELECT id, name, email, password_hash, created_at FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch user by email: {}", e),
            )
        })?;

        row.map(row_to_user).transpose()
    }
}

fn row_to_user(row: sqlx::postgres::PgRow) -> Result<User, DomainError> {
    let id: uuid::Uuid = get_column(&row, "id")?;
    let name: String = get_column(&row, "name")?;
    let email: String = get_column(&row, "email")?;
    let password_hash: String = get_column(&row, "password_hash")?;
    let created_at: chrono::DateTime<chrono::Utc> = get_column(&row, "created_at")?;

    Ok(User::reconstitute(
        UserId::from_uuid(id),
        name,
        email,
        password_hash,
        Timestamp::from_datetime(created_at),
    ))
}
