//! Repository for the `documents` table.

use sqlx::postgres::PgExecutor;
use sqlx::PgPool;

use crate::models::document::Document;

/// Column list for `documents` SELECT and RETURNING clauses.
const COLUMNS: &str = "kind, id, body, deleted_at, created_at, updated_at";

/// Provides query and upsert operations for stored documents.
pub struct DocumentRepo;

impl DocumentRepo {
    /// All documents of one kind ordered by id.
    ///
    /// Soft-deleted rows are included only when `include_deleted` is set.
    pub async fn list_by_kind(
        pool: &PgPool,
        kind: &str,
        include_deleted: bool,
    ) -> Result<Vec<Document>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM documents \
             WHERE kind = $1 AND ($2 OR deleted_at IS NULL) \
             ORDER BY id"
        );
        sqlx::query_as::<_, Document>(&query)
            .bind(kind)
            .bind(include_deleted)
            .fetch_all(pool)
            .await
    }

    /// Find a live document by kind and id.
    pub async fn find_by_id(
        pool: &PgPool,
        kind: &str,
        id: &str,
    ) -> Result<Option<Document>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM documents \
             WHERE kind = $1 AND id = $2 AND deleted_at IS NULL"
        );
        sqlx::query_as::<_, Document>(&query)
            .bind(kind)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a document or replace its body.
    ///
    /// Replacing a soft-deleted document revives it. Accepts any executor
    /// so batches can run inside one transaction.
    pub async fn upsert<'e, E>(
        executor: E,
        kind: &str,
        id: &str,
        body: &serde_json::Value,
    ) -> Result<Document, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "INSERT INTO documents (kind, id, body) \
             VALUES ($1, $2, $3) \
             ON CONFLICT (kind, id) \
             DO UPDATE SET body = EXCLUDED.body, deleted_at = NULL, updated_at = NOW() \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Document>(&query)
            .bind(kind)
            .bind(id)
            .bind(body)
            .fetch_one(executor)
            .await
    }

    /// Soft-delete a document. Returns `true` if a live row was marked.
    pub async fn soft_delete(pool: &PgPool, kind: &str, id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE documents SET deleted_at = NOW(), updated_at = NOW() \
             WHERE kind = $1 AND id = $2 AND deleted_at IS NULL",
        )
        .bind(kind)
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
