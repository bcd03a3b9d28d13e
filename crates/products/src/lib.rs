//! Products domain module: option axes, variants and variant resolution.
//!
//! This crate contains business rules for product variants, implemented purely
//! as deterministic domain logic (no IO, no HTTP, no storage). Inputs are always
//! fully loaded rows; nothing here fails on malformed data.

pub mod option;
pub mod selection;
pub mod variant;

#[cfg(test)]
mod fixtures;

pub use option::{OptionRow, OptionValue, OptionValueRow, ProductOption};
pub use selection::{
    initial_selection, is_selection_complete, is_value_disabled, select_value, selected_variant,
};
pub use variant::{
    Combination, PriceRange, ProductVariant, ProductVariants, VariantRow, build_variants,
    find_matching_variant, price_range,
};
