//! Selection seeding and availability checks for the interactive variant picker.

use vitrine_core::{OptionId, OptionValueId};

use crate::option::ProductOption;
use crate::variant::{Combination, ProductVariant, find_matching_variant};

/// Selection shown when the picker first loads.
///
/// Prefers the combination of the first available variant; when nothing is
/// available, picks the first value of every option.
pub fn initial_selection(options: &[ProductOption], variants: &[ProductVariant]) -> Combination {
    if let Some(available) = variants.iter().find(|v| v.is_available) {
        return available.combination.clone();
    }
    options
        .iter()
        .filter_map(|o| o.first_value().map(|v| (o.id, v.id)))
        .collect()
}

/// Selection after the user picks `value_id` for `option_id`.
pub fn select_value(
    selection: &Combination,
    option_id: OptionId,
    value_id: OptionValueId,
) -> Combination {
    let mut next = selection.clone();
    next.insert(option_id, value_id);
    next
}

/// Whether picking `value_id` for `option_id` would land on a known but
/// unavailable variant.
///
/// Combinations with no variant at all are not disabled.
pub fn is_value_disabled(
    variants: &[ProductVariant],
    selection: &Combination,
    option_id: OptionId,
    value_id: OptionValueId,
) -> bool {
    let tentative = select_value(selection, option_id, value_id);
    find_matching_variant(variants, &tentative).is_some_and(|v| !v.is_available)
}

/// Every option has a selected value that belongs to it.
pub fn is_selection_complete(options: &[ProductOption], selection: &Combination) -> bool {
    options.iter().all(|o| {
        selection
            .get(&o.id)
            .is_some_and(|value_id| o.value(*value_id).is_some())
    })
}

/// Variant for a fully specified selection.
///
/// Partial selections resolve to `None`, since several variants could match.
pub fn selected_variant<'a>(
    options: &[ProductOption],
    variants: &'a [ProductVariant],
    selection: &Combination,
) -> Option<&'a ProductVariant> {
    if !is_selection_complete(options, selection) {
        return None;
    }
    find_matching_variant(variants, selection)
}
