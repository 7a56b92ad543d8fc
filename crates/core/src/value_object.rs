//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are immutable and compared by value. `Money` and `Quantity`
/// are value objects: two prices of `R$ 2.50` are the same price, and
/// "changing" a quantity yields a new `Quantity`.
///
/// ```
/// use precocerto_core::{Money, ValueObject};
///
/// fn same<V: ValueObject>(a: &V, b: &V) -> bool {
///     a == b
/// }
///
/// assert!(same(&Money::from_cents(250), &Money::from_cents(250)));
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
