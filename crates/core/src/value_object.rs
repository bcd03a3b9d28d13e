//! Value object trait: equality by value, not identity.
//!
//! Price ranges, theme tokens and option selections are value objects: two of
//! them with the same attributes are interchangeable.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. To "modify" one,
/// compute a new one (e.g. re-resolve theme tokens after an override changes).
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq)]
/// struct PriceRange { min: u64, max: u64, has_range: bool }
///
/// impl ValueObject for PriceRange {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
