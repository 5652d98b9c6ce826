//! Product construction.

use catalog_core::{IdGenerator, ProductId};

use crate::product::Product;
use crate::validation::ValidatedCreateProduct;

/// Builds new [`Product`]s, drawing identifiers from `G`.
#[derive(Debug, Clone)]
pub struct ProductFactory<G> {
    ids: G,
}

impl<G> ProductFactory<G>
where
    G: IdGenerator,
{
    pub fn new(ids: G) -> Self {
        Self { ids }
    }

    /// Assign a fresh id and copy the command's fields unchanged.
    pub fn build(&self, command: ValidatedCreateProduct) -> Product {
        let id = ProductId::from_uuid(self.ids.next_uuid());
        Product::create(id, command)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU64, Ordering};

    use catalog_core::{Entity, TimeOrderedIds};
    use rust_decimal::Decimal;
    use uuid::Uuid;

    use super::*;
    use crate::CreateProductCommand;

    #[derive(Debug, Default)]
    struct SequentialIds(AtomicU64);

    impl IdGenerator for SequentialIds {
        fn next_uuid(&self) -> Uuid {
            Uuid::from_u128(u128::from(self.0.fetch_add(1, Ordering::SeqCst)) + 1)
        }
    }

    fn validated() -> ValidatedCreateProduct {
        ValidatedCreateProduct::new(CreateProductCommand {
            name: "Mug".to_string(),
            category: vec!["Kitchen".to_string()],
            description: "Stoneware".to_string(),
            image_file: "mug.png".to_string(),
            price: Decimal::new(999, 2),
        })
        .unwrap()
    }

    #[test]
    fn build_uses_injected_generator() {
        let factory = ProductFactory::new(SequentialIds::default());

        let first = factory.build(validated());
        let second = factory.build(validated());

        assert_eq!(first.id().as_uuid(), &Uuid::from_u128(1));
        assert_eq!(second.id().as_uuid(), &Uuid::from_u128(2));
    }

    #[test]
    fn same_input_yields_distinct_products() {
        let factory = ProductFactory::new(TimeOrderedIds);

        let a = factory.build(validated());
        let b = factory.build(validated());

        assert_ne!(a.id(), b.id());
        assert!(!a.id().is_nil());
        assert!(a.matches(validated().command()));
        assert!(b.matches(validated().command()));
    }
}
