//! PostgreSQL implementation of DecisionRepository.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::decision::Decision;
use crate::domain::foundation::{DecisionId, DomainError, ErrorCode, Timestamp, UserId};
use crate::ports::DecisionRepository;

use super::focus_repository::get_column;

/// PostgreSQL implementation of DecisionRepository.
#[derive(Clone)]
pub struct PostgresDecisionRepository {
    pool: PgPool,
}

impl PostgresDecisionRepository {
    /// Creates a new PostgresDecisionRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DecisionRepository for PostgresDecisionRepository {
    async fn save(&self, decision: &Decision) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO decisions (
                id, user_id, title, context, decided_at, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(decision.id().as_uuid())
        .bind(decision.user_id().as_uuid())
        .bind(decision.title())
        .bind(decision.context())
        .bind(decision.decided_at().as_datetime())
        .bind(decision.created_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to insert decision: {}", e),
            )
        })?;

        Ok(())
    }

    async fn find_by_id(
        &self,
        id: &DecisionId,
        user_id: &UserId,
    ) -> Result<Option<Decision>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, title, context, decided_at, created_at
            FROM decisions
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id.as_uuid())
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch decision: {}", e),
            )
        })?;

        row.map(row_to_decision).transpose()
    }

    async fn find_recent_by_user(
        &self,
        user_id: &UserId,
        limit: Option<u32>,
    ) -> Result<Vec<Decision>, DomainError> {
        // LIMIT NULL means no limit in Postgres.
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, title, context, decided_at, created_at
            FROM decisions
            WHERE user_id = $1
            ORDER BY decided_at DESC, id
            LIMIT $2
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(limit.map(|l| l as i64))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch decisions: {}", e),
            )
        })?;

        rows.into_iter().map(row_to_decision).collect()
    }

    async fn count_owned(
        &self,
        ids: &[DecisionId],
        user_id: &UserId,
    ) -> Result<u64, DomainError> {
        if ids.is_empty() {
            return Ok(0);
        }

        let uuids: Vec<uuid::Uuid> = ids.iter().map(|id| *id.as_uuid()).collect();
        let result: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM decisions WHERE id = ANY($1) AND user_id = $2")
                .bind(&uuids)
                .bind(user_id.as_uuid())
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    DomainError::new(
                        ErrorCode::DatabaseError,
                        format!("Failed to count decisions: {}", e),
                    )
                })?;

        Ok(result.0 as u64)
    }
}

fn row_to_decision(row: sqlx::postgres::PgRow) -> Result<Decision, DomainError> {
    let id: uuid::Uuid = get_column(&row, "id")?;
    let user_id: uuid::Uuid = get_column(&row, "user_id")?;
    let title: String = get_column(&row, "title")?;
    let context: Option<String> = get_column(&row, "context")?;
    let decided_at: chrono::DateTime<chrono::Utc> = get_column(&row, "decided_at")?;
    let created_at: chrono::DateTime<chrono::Utc> = get_column(&row, "created_at")?;

    Ok(Decision::reconstitute(
        DecisionId::from_uuid(id),
        UserId::from_uuid(user_id),
        title,
        context,
        Timestamp::from_datetime(decided_at),
        Timestamp::from_datetime(created_at),
    ))
}
