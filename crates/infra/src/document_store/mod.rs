//! Document store boundary (the persistence gateway).
//!
//! Stores hand out sessions; a session buffers documents and commits them as a
//! unit. Handlers depend on the traits only, so the in-memory store (tests/dev)
//! and the Postgres store are interchangeable.

pub mod in_memory;
pub mod postgres;
pub mod r#trait;

pub use in_memory::{InMemoryDocumentStore, InMemorySession};
pub use postgres::{PostgresDocumentStore, PostgresSession};
pub use r#trait::{
    Document, DocumentSession, DocumentStore, PendingDocument, PersistenceError, StoredDocument,
};
