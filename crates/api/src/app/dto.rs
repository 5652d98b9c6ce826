use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use catalog_products::{CreateProductCommand, CreateProductResult};

// -------------------------
// Request DTOs
// -------------------------

/// Missing fields deserialize to their empty value so they surface as
/// validation messages rather than JSON errors.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateProductRequest {
    pub name: String,
    pub category: Vec<String>,
    pub description: String,
    pub image_file: String,
    pub price: Decimal,
}

impl From<CreateProductRequest> for CreateProductCommand {
    fn from(value: CreateProductRequest) -> Self {
        CreateProductCommand {
            name: value.name,
            category: value.category,
            description: value.description,
            image_file: value.image_file,
            price: value.price,
        }
    }
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
pub struct CreateProductResponse {
    pub id: String,
}

impl From<CreateProductResult> for CreateProductResponse {
    fn from(value: CreateProductResult) -> Self {
        Self {
            id: value.id.to_string(),
        }
    }
}
