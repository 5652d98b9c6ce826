//! Products domain module (catalog write side).
//!
//! This crate contains the business rules for creating catalog products,
//! implemented purely as deterministic domain logic (no IO, no HTTP, no storage).

pub mod factory;
pub mod product;
pub mod validation;

pub use factory::ProductFactory;
pub use product::{CreateProductCommand, CreateProductResult, Product};
pub use validation::{validate, ValidatedCreateProduct, Violation};
