use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use catalog_core::{Command, Entity, ProductId, ValueObject};

use crate::validation::ValidatedCreateProduct;

/// Command: CreateProduct.
///
/// Carries the caller's input verbatim. Nothing here is trusted until it has been
/// through [`crate::validation::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateProductCommand {
    pub name: String,
    pub category: Vec<String>,
    pub description: String,
    pub image_file: String,
    pub price: Decimal,
}

impl Command for CreateProductCommand {
    const NAME: &'static str = "products.create";
}

impl ValueObject for CreateProductCommand {}

/// Result of a successful CreateProduct.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateProductResult {
    pub id: ProductId,
}

impl ValueObject for CreateProductResult {}

/// Entity: Product (persisted as a document).
///
/// Only [`crate::ProductFactory`] constructs new products, and only from a
/// [`ValidatedCreateProduct`]. There is no mutation path once built; the `id`
/// in particular has no setter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    name: String,
    category: Vec<String>,
    description: String,
    image_file: String,
    price: Decimal,
}

impl Product {
    /// Document collection products are stored under.
    pub const COLLECTION: &'static str = "products";

    pub(crate) fn create(id: ProductId, command: ValidatedCreateProduct) -> Self {
        let CreateProductCommand {
            name,
            category,
            description,
            image_file,
            price,
        } = command.into_inner();

        Self {
            id,
            name,
            category,
            description,
            image_file,
            price,
        }
    }

    pub fn id_typed(&self) -> ProductId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> &[String] {
        &self.category
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn image_file(&self) -> &str {
        &self.image_file
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    /// True when every copied field equals the command's field.
    pub fn matches(&self, command: &CreateProductCommand) -> bool {
        self.name == command.name
            && self.category == command.category
            && self.description == command.description
            && self.image_file == command.image_file
            && self.price == command.price
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn mug() -> CreateProductCommand {
        CreateProductCommand {
            name: "Mug".to_string(),
            category: vec!["Kitchen".to_string()],
            description: String::new(),
            image_file: "mug.png".to_string(),
            price: Decimal::new(999, 2),
        }
    }

    #[test]
    fn create_copies_fields_verbatim() {
        let mut cmd = mug();
        cmd.name = "  Mug  ".to_string();
        cmd.category = vec!["Kitchen".to_string(), "Drinkware".to_string()];

        let id = ProductId::from_uuid(Uuid::from_u128(7));
        let validated = ValidatedCreateProduct::new(cmd.clone()).unwrap();
        let product = Product::create(id, validated);

        assert_eq!(product.id(), &id);
        assert_eq!(product.name(), "  Mug  ");
        assert_eq!(product.category(), ["Kitchen", "Drinkware"]);
        assert_eq!(product.description(), "");
        assert_eq!(product.image_file(), "mug.png");
        assert_eq!(product.price(), Decimal::new(999, 2));
        assert!(product.matches(&cmd));
    }

    #[test]
    fn document_json_round_trips() {
        let id = ProductId::from_uuid(Uuid::from_u128(1));
        let product = Product::create(id, ValidatedCreateProduct::new(mug()).unwrap());

        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(json["id"], serde_json::json!(id.to_string()));
        assert_eq!(json["image_file"], "mug.png");

        let back: Product = serde_json::from_value(json).unwrap();
        assert_eq!(back, product);
    }
}
