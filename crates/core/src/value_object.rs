//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects carry no identity and are never mutated after construction.
/// Commands and command results are modelled as value objects: two requests with
/// the same fields are the same request, even though handling them twice has two
/// distinct outcomes.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq)]
/// struct CreateProductResult {
///     id: ProductId,
/// }
///
/// impl ValueObject for CreateProductResult {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
