//! Command handlers, one module per use case.

pub mod create_product;
