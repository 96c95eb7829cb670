//! [`RecordStore`] backed by the Postgres `documents` table.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::repositories::DocumentRepo;
use crate::store::{decode, encode, Record, RecordStore, StoreError};
use crate::transaction::run_in_transaction;

/// Postgres document store. Cheap to clone; shares the pool.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl RecordStore for PgStore {
    async fn scan<R: Record>(&self, include_deleted: bool) -> Result<Vec<R>, StoreError> {
        let rows = DocumentRepo::list_by_kind(&self.pool, R::KIND.as_str(), include_deleted).await?;
        tracing::debug!(kind = %R::KIND, rows = rows.len(), include_deleted, "Scanned documents");
        rows.into_iter()
            .map(|row| decode(&row.id, row.body))
            .collect()
    }

    async fn get_by_id<R: Record>(&self, id: &str) -> Result<Option<R>, StoreError> {
        DocumentRepo::find_by_id(&self.pool, R::KIND.as_str(), id)
            .await?
            .map(|row| decode(&row.id, row.body))
            .transpose()
    }

    async fn upsert<R: Record>(&self, records: &[R]) -> Result<(), StoreError> {
        if records.is_empty() {
            return Ok(());
        }
        let encoded = records
            .iter()
            .map(|r| Ok((r.id().to_string(), encode(r)?)))
            .collect::<Result<Vec<_>, StoreError>>()?;
        let count = encoded.len();

        run_in_transaction(&self.pool, move |tx| {
            Box::pin(async move {
                for (id, body) in &encoded {
                    DocumentRepo::upsert(&mut **tx, R::KIND.as_str(), id, body).await?;
                }
                Ok::<_, StoreError>(())
            })
        })
        .await?;

        tracing::debug!(kind = %R::KIND, count, "Upserted documents");
        Ok(())
    }

    async fn delete<R: Record>(&self, id: &str) -> Result<bool, StoreError> {
        Ok(DocumentRepo::soft_delete(&self.pool, R::KIND.as_str(), id).await?)
    }
}
