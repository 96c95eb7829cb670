//! Transactional execution against the pool.

use futures::future::BoxFuture;
use sqlx::{PgPool, Postgres, Transaction};

pub type PgTransaction = Transaction<'static, Postgres>;

/// Run `f` inside a transaction.
///
/// Commits when `f` returns `Ok`, rolls back otherwise. The closure borrows
/// the transaction for the lifetime of its future, so it must own whatever
/// else it needs:
///
/// ```ignore
/// run_in_transaction(&pool, move |tx| {
///     Box::pin(async move {
///         DocumentRepo::upsert(&mut **tx, "topic", &id, &body).await?;
///         Ok::<_, StoreError>(())
///     })
/// })
/// .await?;
/// ```
pub async fn run_in_transaction<T, E, F>(pool: &PgPool, f: F) -> Result<T, E>
where
    F: for<'t> FnOnce(&'t mut PgTransaction) -> BoxFuture<'t, Result<T, E>> + Send,
    T: Send,
    E: From<sqlx::Error> + Send,
{
    let mut tx = pool.begin().await?;
    match f(&mut tx).await {
        Ok(value) => {
            tx.commit().await?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = tx.rollback().await {
                tracing::warn!(error = %rollback_err, "Transaction rollback failed");
            }
            Err(err)
        }
    }
}
