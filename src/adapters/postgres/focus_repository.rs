//! PostgreSQL implementation of FocusRepository.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::focus::FocusEntry;
use crate::domain::foundation::{DomainError, ErrorCode, FocusEntryId, Timestamp, UserId};
use crate::ports::FocusRepository;

/// PostgreSQL implementation of FocusRepository.
#[derive(Clone)]
pub struct PostgresFocusRepository {
    pool: PgPool,
}

impl PostgresFocusRepository {
    /// Creates a new PostgresFocusRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FocusRepository for PostgresFocusRepository {
    async fn save(&self, entry: &FocusEntry) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO focus_entries (
                id, user_id, title, note, duration_minutes, occurred_at, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(entry.id().as_uuid())
        .bind(entry.user_id().as_uuid())
        .bind(entry.title())
        .bind(entry.note())
        .bind(entry.duration_minutes() as i32)
        .bind(entry.occurred_at().as_datetime())
        .bind(entry.created_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to insert focus entry: {}", e),
            )
        })?;

        Ok(())
    }

    async fn find_by_id(
        &self,
        id: &FocusEntryId,
        user_id: &UserId,
    ) -> Result<Option<FocusEntry>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, title, note, duration_minutes, occurred_at, created_at
            FROM focus_entries
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
                format!("Failed to fetch focus entry: {}", e),
            )
        })?;

        row.map(row_to_focus_entry).transpose()
    }

    async fn find_all_by_user(&self, user_id: &UserId) -> Result<Vec<FocusEntry>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, title, note, duration_minutes, occurred_at, created_at
            FROM focus_entries
            WHERE user_id = $1
            ORDER BY occurred_at DESC
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch focus entries: {}", e),
            )
        })?;

        rows.into_iter().map(row_to_focus_entry).collect()
    }

    async fn count_owned(
        &self,
        ids: &[FocusEntryId],
        user_id: &UserId,
    ) -> Result<u64, DomainError> {
        if ids.is_empty() {
            return Ok(0);
        }

        let uuids: Vec<uuid::Uuid> = ids.iter().map(|id| *id.as_uuid()).collect();
        let result: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM focus_entries WHERE id = ANY($1) AND user_id = $2",
        )
        .bind(&uuids)
        .bind(user_id.as_uuid())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to count focus entries: {}", e),
            )
        })?;

        Ok(result.0 as u64)
    }
}

fn row_to_focus_entry(row: sqlx::postgres::PgRow) -> Result<FocusEntry, DomainError> {
    let id: uuid::Uuid = get_column(&row, "id")?;
    let user_id: uuid::Uuid = get_column(&row, "user_id")?;
    let title: String = get_column(&row, "title")?;
    let note: Option<String> = get_column(&row, "note")?;
    let duration_minutes: i32 = get_column(&row, "duration_minutes")?;
    let occurred_at: chrono::DateTime<chrono::Utc> = get_column(&row, "occurred_at")?;
    let created_at: chrono::DateTime<chrono::Utc> = get_column(&row, "created_at")?;

    Ok(FocusEntry::reconstitute(
        FocusEntryId::from_uuid(id),
        UserId::from_uuid(user_id),
        title,
        note,
        duration_minutes as u32,
        Timestamp::from_datetime(occurred_at),
        Timestamp::from_datetime(created_at),
    ))
}

pub(super) fn get_column<'r, T>(
    row: &'r sqlx::postgres::PgRow,
    name: &str,
) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
{
    row.try_get(name).map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get {}: {}", name, e),
        )
    })
}
