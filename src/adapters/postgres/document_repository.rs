//! PostgreSQL implementation of DocumentRepository.
//!
//! Documents live in one table; links to focus entries and decisions live
//! in join tables with a position column so link order survives a round
//! trip. Inserts and updates run in a transaction so a document is never
//! visible with half its links.

use std::collections::BTreeSet;

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};

use crate::domain::document::{Document, DocumentType, RichContent};
use crate::domain::foundation::{
    DecisionId, DocumentId, DomainError, ErrorCode, FocusEntryId, Timestamp, UserId,
};
use crate::ports::DocumentRepository;

use super::focus_repository::get_column;

/// PostgreSQL implementation of DocumentRepository.
#[derive(Clone)]
pub struct PostgresDocumentRepository {
    pool: PgPool,
}

impl PostgresDocumentRepository {
    /// Creates a new PostgresDocumentRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const SELECT_DOCUMENT: &str = r#"
    SELECT d.id, d.user_id, d.title, d.content_schema_version, d.content_payload,
           d.doc_type, d.tags, d.created_at, d.updated_at,
           COALESCE(
               (SELECT array_agg(l.focus_entry_id ORDER BY l.position)
                FROM document_focus_links l WHERE l.document_id = d.id),
               '{}'
           ) AS focus_ids,
           COALESCE(
               (SELECT array_agg(l.decision_id ORDER BY l.position)
                FROM document_decision_links l WHERE l.document_id = d.id),
               '{}'
           ) AS decision_ids
    FROM documents d
"#;

#[async_trait]
impl DocumentRepository for PostgresDocumentRepository {
    async fn save(&self, document: &Document) -> Result<(), DomainError> {
        let mut tx = self.pool.begin().await.map_err(tx_err)?;

        sqlx::query(
            r#"
            INSERT INTO documents (
                id, user_id, title, content_schema_version, content_payload,
                doc_type, tags, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(document.id().as_uuid())
        .bind(document.user_id().as_uuid())
        .bind(document.title())
        .bind(document.content().schema_version)
        .bind(&document.content().payload)
        .bind(document.doc_type().as_str())
        .bind(document.tags().iter().cloned().collect::<Vec<String>>())
        .bind(document.created_at().as_datetime())
        .bind(document.updated_at().as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to insert document: {}", e),
            )
        })?;

        insert_links(&mut tx, document).await?;

        tx.commit().await.map_err(tx_err)?;
        Ok(())
    }

    async fn update(&self, document: &Document) -> Result<(), DomainError> {
        let mut tx = self.pool.begin().await.map_err(tx_err)?;

        let result = sqlx::query(
            r#"
            UPDATE documents SET
                title = $3,
                content_schema_version = $4,
                content_payload = $5,
                tags = $6,
                updated_at = $7
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(document.id().as_uuid())
        .bind(document.user_id().as_uuid())
        .bind(document.title())
        .bind(document.content().schema_version)
        .bind(&document.content().payload)
        .bind(document.tags().iter().cloned().collect::<Vec<String>>())
        .bind(document.updated_at().as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to update document: {}", e),
            )
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::DocumentNotFound,
                format!("Document not found: {}", document.id()),
            ));
        }

        sqlx::query("DELETE FROM document_focus_links WHERE document_id = $1")
            .bind(document.id().as_uuid())
            .execute(&mut *tx)
            .await
            .map_err(tx_err)?;
        sqlx::query("DELETE FROM document_decision_links WHERE document_id = $1")
            .bind(document.id().as_uuid())
            .execute(&mut *tx)
            .await
            .map_err(tx_err)?;
        insert_links(&mut tx, document).await?;

        tx.commit().await.map_err(tx_err)?;
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: &DocumentId,
        user_id: &UserId,
    ) -> Result<Option<Document>, DomainError> {
        let query = format!("{} WHERE d.id = $1 AND d.user_id = $2", SELECT_DOCUMENT);
        let row = sqlx::query(&query)
            .bind(id.as_uuid())
            .bind(user_id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to fetch document: {}", e),
                )
            })?;

        row.map(row_to_document).transpose()
    }

    async fn find_all_by_user(&self, user_id: &UserId) -> Result<Vec<Document>, DomainError> {
        let query = format!(
            "{} WHERE d.user_id = $1 ORDER BY d.updated_at DESC",
            SELECT_DOCUMENT
        );
        let rows = sqlx::query(&query)
            .bind(user_id.as_uuid())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to fetch documents: {}", e),
                )
            })?;

        rows.into_iter().map(row_to_document).collect()
    }
}

async fn insert_links(
    tx: &mut Transaction<'_, Postgres>,
    document: &Document,
) -> Result<(), DomainError> {
    for (position, focus_id) in document.focus_ids().iter().enumerate() {
        sqlx::query(
            r#"
            INSERT INTO document_focus_links (document_id, focus_entry_id, position)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(document.id().as_uuid())
        .bind(focus_id.as_uuid())
        .bind(position as i32)
        .execute(&mut **tx)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to insert focus link: {}", e),
            )
        })?;
    }

    for (position, decision_id) in document.decision_ids().iter().enumerate() {
        sqlx::query(
            r#"
            INSERT INTO document_decision_links (document_id, decision_id, position)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(document.id().as_uuid())
        .bind(decision_id.as_uuid())
        .bind(position as i32)
        .execute(&mut **tx)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to insert decision link: {}", e),
            )
        })?;
    }

    Ok(())
}

fn tx_err(e: sqlx::Error) -> DomainError {
    DomainError::new(
        ErrorCode::DatabaseError,
        format!("Document transaction failed: {}", e),
    )
}

fn row_to_document(row: sqlx::postgres::PgRow) -> Result<Document, DomainError> {
    let id: uuid::Uuid = get_column(&row, "id")?;
    let user_id: uuid::Uuid = get_column(&row, "user_id")?;
    let title: String = get_column(&row, "title")?;
    let schema_version: i32 = get_column(&row, "content_schema_version")?;
    let payload: String = get_column(&row, "content_payload")?;
    let doc_type_str: String = get_column(&row, "doc_type")?;
    let tags: Vec<String> = get_column(&row, "tags")?;
    let created_at: chrono::DateTime<chrono::Utc> = get_column(&row, "created_at")?;
    let updated_at: chrono::DateTime<chrono::Utc> = get_column(&row, "updated_at")?;
    let focus_uuids: Vec<uuid::Uuid> = get_column(&row, "focus_ids")?;
    let decision_uuids: Vec<uuid::Uuid> = get_column(&row, "decision_ids")?;

    let doc_type = DocumentType::parse(&doc_type_str).ok_or_else(|| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid document type: {}", doc_type_str),
        )
    })?;

    Ok(Document::reconstitute(
        DocumentId::from_uuid(id),
        UserId::from_uuid(user_id),
        title,
        RichContent::from_parts(schema_version, payload),
        doc_type,
        tags.into_iter().collect::<BTreeSet<String>>(),
        focus_uuids.into_iter().map(FocusEntryId::from_uuid).collect(),
        decision_uuids.into_iter().map(DecisionId::from_uuid).collect(),
        Timestamp::from_datetime(created_at),
        Timestamp::from_datetime(updated_at),
    ))
}
