//! Infrastructure layer: document persistence and command handlers.

pub mod command_handler;
pub mod document_store;
pub mod handlers;

pub use command_handler::CommandHandler;
pub use handlers::create_product::{CreateProductError, CreateProductHandler};
