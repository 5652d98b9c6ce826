//! CreateProduct command handler.
//!
//! ```text
//! CreateProductCommand
//!   ↓
//! 1. Validate (all rules, first violation reported; no IO on failure)
//!   ↓
//! 2. Build Product (fresh id from the injected generator)
//!   ↓
//! 3. Open session, store, save_changes (the only suspension point)
//!   ↓
//! CreateProductResult { id }
//! ```
//!
//! The handler never retries. Identical commands create distinct products.

use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{instrument, Span};

use catalog_core::{Command, IdGenerator};
use catalog_products::{
    CreateProductCommand, CreateProductResult, ProductFactory, ValidatedCreateProduct, Violation,
};

use crate::command_handler::CommandHandler;
use crate::document_store::{DocumentSession, DocumentStore, PersistenceError};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CreateProductError {
    /// Input rejected; carries the first violated rule's message.
    #[error("{0}")]
    Validation(String),

    /// The store failed to commit.
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

impl From<Violation> for CreateProductError {
    fn from(value: Violation) -> Self {
        CreateProductError::Validation(value.to_string())
    }
}

/// Handles [`CreateProductCommand`] against a document store `S`, drawing ids from `G`.
#[derive(Debug)]
pub struct CreateProductHandler<S, G> {
    store: S,
    factory: ProductFactory<G>,
}

impl<S, G> CreateProductHandler<S, G>
where
    S: DocumentStore,
    G: IdGenerator,
{
    pub fn new(store: S, ids: G) -> Self {
        Self {
            store,
            factory: ProductFactory::new(ids),
        }
    }
}

#[async_trait::async_trait]
impl<S, G> CommandHandler<CreateProductCommand> for CreateProductHandler<S, G>
where
    S: DocumentStore,
    G: IdGenerator,
{
    type Output = CreateProductResult;
    type Error = CreateProductError;

    #[instrument(
        skip_all,
        fields(command = CreateProductCommand::NAME, product_id = tracing::field::Empty)
    )]
    async fn handle(
        &self,
        command: CreateProductCommand,
        cancel: &CancellationToken,
    ) -> Result<CreateProductResult, CreateProductError> {
        let validated = match ValidatedCreateProduct::new(command) {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!(reason = %e, "create product rejected");
                return Err(e.into());
            }
        };

        let product = self.factory.build(validated);
        let id = product.id_typed();
        Span::current().record("product_id", tracing::field::display(id));

        let mut session = self.store.open_session();
        session.store(&product)?;

        // Cancellation is the session's call; a commit that has started is never abandoned.
        if let Err(e) = session.save_changes(cancel).await {
            tracing::error!(error = %e, "create product failed to commit");
            return Err(e.into());
        }

        tracing::info!("product created");
        Ok(CreateProductResult { id })
    }
}
