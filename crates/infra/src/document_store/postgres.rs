//! Postgres-backed document store.
//!
//! Documents live in a single `documents` table keyed by `(collection, id)` with
//! the body stored as `jsonb`. A session's buffered documents are written in one
//! transaction.
//!
//! ## Error Mapping
//!
//! | SQLx Error | PostgreSQL Error Code | PersistenceError |
//! |------------|----------------------|------------------|
//! | Database (unique violation) | `23505` | `Conflict` |
//! | Database (serialization failure) | `40001` | `Conflict` |
//! | Database (other) | Any other | `Storage` |
//! | PoolClosed / Io / other | N/A | `Storage` |

use std::sync::Arc;

use sqlx::types::Json;
use sqlx::{PgPool, Postgres, Transaction};
use tokio_util::sync::CancellationToken;
use tracing::instrument;

use super::r#trait::{DocumentSession, DocumentStore, PendingDocument, PersistenceError};

const CREATE_DOCUMENTS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS documents (
    collection    TEXT        NOT NULL,
    id            UUID        NOT NULL,
    data          JSONB       NOT NULL,
    version       BIGINT      NOT NULL DEFAULT 1,
    last_modified TIMESTAMPTZ NOT NULL DEFAULT now(),
    PRIMARY KEY (collection, id)
)
"#;

const UPSERT_DOCUMENT: &str = r#"
INSERT INTO documents (collection, id, data, version, last_modified)
VALUES ($1, $2, $3, 1, now())
ON CONFLICT (collection, id) DO UPDATE
SET data = EXCLUDED.data,
    version = documents.version + 1,
    last_modified = now()
"#;

/// Postgres-backed document store.
///
/// `Send + Sync`; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct PostgresDocumentStore {
    pool: Arc<PgPool>,
}

impl PostgresDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    /// Create the `documents` table if it does not exist.
    #[instrument(skip(self), err)]
    pub async fn ensure_schema(&self) -> Result<(), PersistenceError> {
        sqlx::query(CREATE_DOCUMENTS_TABLE)
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("ensure_schema", e))?;
        Ok(())
    }
}

impl DocumentStore for PostgresDocumentStore {
    type Session = PostgresSession;

    fn open_session(&self) -> Self::Session {
        PostgresSession {
            pool: Arc::clone(&self.pool),
            pending: Vec::new(),
        }
    }
}

/// Session over a [`PostgresDocumentStore`].
#[derive(Debug)]
pub struct PostgresSession {
    pool: Arc<PgPool>,
    pending: Vec<PendingDocument>,
}

#[async_trait::async_trait]
impl DocumentSession for PostgresSession {
    fn store_pending(&mut self, document: PendingDocument) {
        self.pending.push(document);
    }

    fn pending(&self) -> &[PendingDocument] {
        &self.pending
    }

    #[instrument(skip_all, err)]
    async fn save_changes(&mut self, cancel: &CancellationToken) -> Result<usize, PersistenceError> {
        if cancel.is_cancelled() {
            return Err(PersistenceError::Cancelled);
        }
        if self.pending.is_empty() {
            return Ok(0);
        }
        tracing::debug!(documents = self.pending.len(), "committing documents");

        // Cancellation may abandon the transaction while it is being written;
        // dropping `tx` rolls back.
        let tx = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(PersistenceError::Cancelled),
            written = write_pending(&self.pool, &self.pending) => written?,
        };

        if cancel.is_cancelled() {
            return Err(PersistenceError::Cancelled);
        }

        // Once the commit is sent it runs to completion; its outcome is the
        // outcome of the session.
        tx.commit().await.map_err(|e| map_sqlx_error("commit", e))?;

        let written = self.pending.len();
        self.pending.clear();
        Ok(written)
    }
}

async fn write_pending(
    pool: &PgPool,
    pending: &[PendingDocument],
) -> Result<Transaction<'static, Postgres>, PersistenceError> {
    let mut tx = pool.begin().await.map_err(|e| map_sqlx_error("begin", e))?;

    for doc in pending {
        sqlx::query(UPSERT_DOCUMENT)
            .bind(&doc.collection)
            .bind(doc.id)
            .bind(Json(&doc.body))
            .execute(&mut *tx)
            .await
            .map_err(|e| map_sqlx_error("upsert", e))?;
    }

    Ok(tx)
}

fn map_sqlx_error(operation: &str, err: sqlx::Error) -> PersistenceError {
    match err {
        sqlx::Error::Database(db_err) => {
            let msg = format!("database error in {}: {}", operation, db_err.message());
            match db_err.code().as_deref() {
                Some("23505") | Some("40001") => PersistenceError::Conflict(msg),
                _ => PersistenceError::Storage(msg),
            }
        }
        sqlx::Error::PoolClosed => {
            PersistenceError::Storage(format!("connection pool closed in {operation}"))
        }
        other => PersistenceError::Storage(format!("sqlx error in {operation}: {other}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_closed_maps_to_storage() {
        let err = map_sqlx_error("commit", sqlx::Error::PoolClosed);
        assert_eq!(
            err,
            PersistenceError::Storage("connection pool closed in commit".to_string())
        );
    }

    #[test]
    fn row_not_found_maps_to_storage() {
        let err = map_sqlx_error("get", sqlx::Error::RowNotFound);
        assert!(matches!(err, PersistenceError::Storage(msg) if msg.starts_with("sqlx error in get")));
    }
}
