use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use chrono::Utc;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use super::r#trait::{
    Document, DocumentSession, DocumentStore, PendingDocument, PersistenceError, StoredDocument,
};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct DocKey {
    collection: String,
    id: Uuid,
}

type Documents = Arc<RwLock<HashMap<DocKey, StoredDocument>>>;

/// In-memory document store.
///
/// Intended for tests/dev. Clones share the same underlying documents.
#[derive(Debug, Default, Clone)]
pub struct InMemoryDocumentStore {
    documents: Documents,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, collection: &str, id: Uuid) -> Option<StoredDocument> {
        let documents = self.documents.read().ok()?;
        documents
            .get(&DocKey {
                collection: collection.to_string(),
                id,
            })
            .cloned()
    }

    /// Load and decode a typed document, `None` if absent.
    pub fn load<D>(&self, id: Uuid) -> Result<Option<D>, PersistenceError>
    where
        D: Document,
    {
        self.get(D::COLLECTION, id)
            .map(|stored| stored.decode::<D>())
            .transpose()
    }

    /// Number of committed documents in `collection`.
    pub fn count(&self, collection: &str) -> usize {
        match self.documents.read() {
            Ok(documents) => documents
                .keys()
                .filter(|k| k.collection == collection)
                .count(),
            Err(_) => 0,
        }
    }

    pub fn len(&self) -> usize {
        self.documents.read().map(|d| d.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DocumentStore for InMemoryDocumentStore {
    type Session = InMemorySession;

    fn open_session(&self) -> Self::Session {
        InMemorySession {
            documents: Arc::clone(&self.documents),
            pending: Vec::new(),
        }
    }
}

/// Session over an [`InMemoryDocumentStore`].
#[derive(Debug)]
pub struct InMemorySession {
    documents: Documents,
    pending: Vec<PendingDocument>,
}

impl InMemorySession {
    fn commit(&mut self) -> Result<usize, PersistenceError> {
        let mut documents = self
            .documents
            .write()
            .map_err(|_| PersistenceError::Storage("lock poisoned".to_string()))?;

        // Whole batch under one write lock: other sessions see all of it or none.
        let now = Utc::now();
        let written = self.pending.len();
        for doc in self.pending.drain(..) {
            let key = DocKey {
                collection: doc.collection.clone(),
                id: doc.id,
            };
            let version = documents.get(&key).map(|d| d.version).unwrap_or(0) + 1;
            documents.insert(
                key,
                StoredDocument {
                    collection: doc.collection,
                    id: doc.id,
                    version,
                    last_modified: now,
                    body: doc.body,
                },
            );
        }

        Ok(written)
    }
}

#[async_trait::async_trait]
impl DocumentSession for InMemorySession {
    fn store_pending(&mut self, document: PendingDocument) {
        self.pending.push(document);
    }

    fn pending(&self) -> &[PendingDocument] {
        &self.pending
    }

    async fn save_changes(&mut self, cancel: &CancellationToken) -> Result<usize, PersistenceError> {
        if cancel.is_cancelled() {
            return Err(PersistenceError::Cancelled);
        }
        if self.pending.is_empty() {
            return Ok(0);
        }
        self.commit()
    }
}
