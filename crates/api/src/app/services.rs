use anyhow::Context;
use sqlx::PgPool;
use tokio_util::sync::CancellationToken;

use catalog_core::TimeOrderedIds;
use catalog_infra::document_store::{InMemoryDocumentStore, PostgresDocumentStore};
use catalog_infra::{CommandHandler, CreateProductError, CreateProductHandler};
use catalog_products::{CreateProductCommand, CreateProductResult};

use crate::config::{AppConfig, StoreConfig};

/// Handler wiring, one variant per backing store.
#[derive(Debug)]
pub enum AppServices {
    InMemory {
        store: InMemoryDocumentStore,
        create_product: CreateProductHandler<InMemoryDocumentStore, TimeOrderedIds>,
    },
    Persistent {
        create_product: CreateProductHandler<PostgresDocumentStore, TimeOrderedIds>,
    },
}

impl AppServices {
    /// In-memory wiring (dev/test).
    pub fn in_memory() -> Self {
        let store = InMemoryDocumentStore::new();
        AppServices::InMemory {
            create_product: CreateProductHandler::new(store.clone(), TimeOrderedIds),
            store,
        }
    }

    pub async fn create_product(
        &self,
        command: CreateProductCommand,
        cancel: &CancellationToken,
    ) -> Result<CreateProductResult, CreateProductError> {
        match self {
            AppServices::InMemory { create_product, .. } => {
                create_product.handle(command, cancel).await
            }
            AppServices::Persistent { create_product } => {
                create_product.handle(command, cancel).await
            }
        }
    }

    /// The in-memory store, if that is what backs the handlers.
    pub fn in_memory_store(&self) -> Option<&InMemoryDocumentStore> {
        match self {
            AppServices::InMemory { store, .. } => Some(store),
            AppServices::Persistent { .. } => None,
        }
    }
}

pub async fn build_services(config: &AppConfig) -> anyhow::Result<AppServices> {
    match &config.store {
        StoreConfig::InMemory => {
            tracing::info!("using in-memory document store");
            Ok(AppServices::in_memory())
        }
        StoreConfig::Postgres { database_url } => {
            let pool = PgPool::connect(database_url)
                .await
                .context("failed to connect to Postgres")?;

            let store = PostgresDocumentStore::new(pool);
            store
                .ensure_schema()
                .await
                .context("failed to create documents table")?;

            tracing::info!("using Postgres document store");
            Ok(AppServices::Persistent {
                create_product: CreateProductHandler::new(store, TimeOrderedIds),
            })
        }
    }
}
