use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::sync::Arc;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use catalog_core::Entity;
use catalog_products::Product;

/// A type persisted as a JSON document under a collection + id.
pub trait Document: Serialize + DeserializeOwned + Send + Sync {
    /// Collection (document type) name, stable across releases.
    const COLLECTION: &'static str;

    fn document_id(&self) -> Uuid;
}

impl Document for Product {
    const COLLECTION: &'static str = Product::COLLECTION;

    fn document_id(&self) -> Uuid {
        *self.id().as_uuid()
    }
}

/// A document registered with a session but not yet committed.
///
/// Serialization happens at registration time so a commit never has to deal
/// with typed values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingDocument {
    pub collection: String,
    pub id: Uuid,
    pub body: JsonValue,
}

impl PendingDocument {
    pub fn from_typed<D>(document: &D) -> Result<Self, PersistenceError>
    where
        D: Document,
    {
        let body = serde_json::to_value(document)
            .map_err(|e| PersistenceError::Serialization(format!("{}: {e}", D::COLLECTION)))?;

        Ok(Self {
            collection: D::COLLECTION.to_string(),
            id: document.document_id(),
            body,
        })
    }
}

/// A committed document.
///
/// `version` starts at 1 and increases by one on every overwrite of the same
/// collection + id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredDocument {
    pub collection: String,
    pub id: Uuid,
    pub version: u64,
    pub last_modified: DateTime<Utc>,
    pub body: JsonValue,
}

impl StoredDocument {
    pub fn decode<D>(&self) -> Result<D, PersistenceError>
    where
        D: Document,
    {
        serde_json::from_value(self.body.clone())
            .map_err(|e| PersistenceError::Serialization(format!("{}: {e}", D::COLLECTION)))
    }
}

/// Document persistence error.
///
/// These are **infrastructure errors**. Handlers surface them as-is and never
/// retry; retry policy, if any, belongs to the store implementation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    #[error("document serialization failed: {0}")]
    Serialization(String),

    #[error("document write conflict: {0}")]
    Conflict(String),

    #[error("document storage failure: {0}")]
    Storage(String),

    #[error("commit cancelled")]
    Cancelled,
}

/// Unit of work over a document store.
///
/// `store` only buffers; nothing is visible to other sessions until
/// `save_changes` succeeds, and then every buffered document is visible at
/// once. A session must surface a failed commit instead of dropping writes.
#[async_trait::async_trait]
pub trait DocumentSession: Send {
    /// Buffer an already-serialized document.
    fn store_pending(&mut self, document: PendingDocument);

    /// Documents buffered since the last successful commit.
    fn pending(&self) -> &[PendingDocument];

    /// Durably persist every buffered document, returning how many were written.
    async fn save_changes(&mut self, cancel: &CancellationToken) -> Result<usize, PersistenceError>;

    /// Serialize and buffer a typed document.
    fn store<D>(&mut self, document: &D) -> Result<(), PersistenceError>
    where
        D: Document,
        Self: Sized,
    {
        self.store_pending(PendingDocument::from_typed(document)?);
        Ok(())
    }
}

/// Factory of sessions; one session per logical operation.
pub trait DocumentStore: Send + Sync {
    type Session: DocumentSession;

    fn open_session(&self) -> Self::Session;
}

impl<S> DocumentStore for Arc<S>
where
    S: DocumentStore + ?Sized,
{
    type Session = S::Session;

    fn open_session(&self) -> Self::Session {
        (**self).open_session()
    }
}
