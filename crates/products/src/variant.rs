use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use vitrine_core::{Entity, OptionId, OptionValueId, ProductId, ValueObject, VariantId};

use crate::option::{OptionRow, OptionValue, OptionValueRow, ProductOption};

/// Chosen value per option: identifies a variant or an in-progress selection.
pub type Combination = BTreeMap<OptionId, OptionValueId>;

/// `product_variants` row joined with its `product_variant_options` links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantRow {
    pub id: VariantId,
    pub product_id: ProductId,
    pub sku: Option<String>,
    /// Price in smallest currency unit (e.g., cents). `None` means the product's base price.
    pub price: Option<u64>,
    pub is_available: bool,
    pub image_url: Option<String>,
    pub value_ids: Vec<OptionValueId>,
}

/// A concrete, purchasable combination of one value per option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductVariant {
    pub id: VariantId,
    pub product_id: ProductId,
    pub sku: Option<String>,
    pub price: Option<u64>,
    pub is_available: bool,
    pub image_url: Option<String>,
    pub combination: Combination,
}

impl ProductVariant {
    /// Every `(option, value)` pair of `selection` is part of this variant.
    ///
    /// Options the selection leaves out do not disqualify the variant.
    pub fn matches(&self, selection: &Combination) -> bool {
        selection
            .iter()
            .all(|(option_id, value_id)| self.combination.get(option_id) == Some(value_id))
    }

    pub fn effective_price(&self, base_price: u64) -> u64 {
        self.price.unwrap_or(base_price)
    }

    /// Carries exactly one value for each of the given options.
    pub fn is_complete(&self, options: &[ProductOption]) -> bool {
        self.combination.len() == options.len()
            && options.iter().all(|o| self.combination.contains_key(&o.id))
    }
}

impl Entity for ProductVariant {
    type Id = VariantId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Fully assembled variant data for one product.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductVariants {
    pub options: Vec<ProductOption>,
    pub variants: Vec<ProductVariant>,
}

/// Lowest and highest effective price over a product's variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: u64,
    pub max: u64,
    pub has_range: bool,
}

impl PriceRange {
    pub fn single(price: u64) -> Self {
        Self {
            min: price,
            max: price,
            has_range: false,
        }
    }
}

impl ValueObject for PriceRange {}

/// Assemble options (with their values) and variants (with their combination)
/// from raw rows.
///
/// Options and values are ordered by `sort`. A variant link that points at a
/// value missing from `values_raw` is dropped, so the combination of such a
/// variant can end up incomplete.
pub fn build_variants(
    options_raw: &[OptionRow],
    values_raw: &[OptionValueRow],
    variants_raw: &[VariantRow],
) -> ProductVariants {
    let mut options: Vec<ProductOption> = options_raw
        .iter()
        .map(|row| {
            let mut values: Vec<_> = values_raw
                .iter()
                .filter(|v| v.option_id == row.id)
                .map(OptionValue::from)
                .collect();
            values.sort_by_key(|v| v.sort);
            ProductOption {
                id: row.id,
                product_id: row.product_id,
                name: row.name.clone(),
                sort: row.sort,
                values,
            }
        })
        .collect();
    options.sort_by_key(|o| o.sort);

    let value_owner: HashMap<OptionValueId, OptionId> =
        values_raw.iter().map(|v| (v.id, v.option_id)).collect();

    let variants = variants_raw
        .iter()
        .map(|row| ProductVariant {
            id: row.id,
            product_id: row.product_id,
            sku: row.sku.clone(),
            price: row.price,
            is_available: row.is_available,
            image_url: row.image_url.clone(),
            combination: row
                .value_ids
                .iter()
                .filter_map(|value_id| value_owner.get(value_id).map(|option_id| (*option_id, *value_id)))
                .collect(),
        })
        .collect();

    ProductVariants { options, variants }
}

/// First variant (in list order) that agrees with every pair in `selection`.
pub fn find_matching_variant<'a>(
    variants: &'a [ProductVariant],
    selection: &Combination,
) -> Option<&'a ProductVariant> {
    variants.iter().find(|v| v.matches(selection))
}

/// Price range over the variants' effective prices.
///
/// Variants without their own price count at `base_price`; a product without
/// variants has the single price `base_price`.
pub fn price_range(variants: &[ProductVariant], base_price: u64) -> PriceRange {
    let prices = variants.iter().map(|v| v.effective_price(base_price));
    let (Some(min), Some(max)) = (prices.clone().min(), prices.max()) else {
        return PriceRange::single(base_price);
    };
    PriceRange {
        min,
        max,
        has_range: min != max,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::Fixture;

    fn priced(price: Option<u64>) -> ProductVariant {
        ProductVariant {
            id: VariantId::new(),
            product_id: ProductId::new(),
            sku: None,
            price,
            is_available: true,
            image_url: None,
            combination: Combination::new(),
        }
    }

    #[test]
    fn build_orders_options_and_values_by_sort() {
        let fx = Fixture::new();
        let built = fx.build(&[]);

        let names: Vec<&str> = built.options.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["Tamanho", "Cor"]);
        let sizes: Vec<&str> = built.options[0].values.iter().map(|v| v.label.as_str()).collect();
        assert_eq!(sizes, vec!["P", "M"]);
    }

    #[test]
    fn build_maps_links_to_option_ids() {
        let fx = Fixture::new();
        let built = fx.build(&[fx.variant(&["M", "Preto"], Some(50), true)]);

        let variant = &built.variants[0];
        assert_eq!(variant.combination.get(&fx.size.id), Some(&fx.value("M")));
        assert_eq!(variant.combination.get(&fx.color.id), Some(&fx.value("Preto")));
        assert!(variant.is_complete(&built.options));
    }

    #[test]
    fn dangling_value_links_are_dropped() {
        let fx = Fixture::new();
        let mut row = fx.variant(&["M"], None, true);
        row.value_ids.push(OptionValueId::new());

        let built = fx.build(&[row]);
        let variant = &built.variants[0];
        assert_eq!(variant.combination.len(), 1);
        assert!(!variant.is_complete(&built.options));
    }

    #[test]
    fn matching_ignores_options_missing_from_selection() {
        let fx = Fixture::new();
        let built = fx.build(&[
            fx.variant(&["P", "Azul"], None, true),
            fx.variant(&["M", "Azul"], None, true),
        ]);

        let selection = Combination::from([(fx.size.id, fx.value("M"))]);
        let found = find_matching_variant(&built.variants, &selection).unwrap();
        assert_eq!(found.id, built.variants[1].id);
    }

    #[test]
    fn first_match_in_list_order_wins() {
        let fx = Fixture::new();
        let built = fx.build(&[
            fx.variant(&["P", "Azul"], None, true),
            fx.variant(&["P", "Preto"], None, true),
        ]);

        let selection = Combination::from([(fx.size.id, fx.value("P"))]);
        let found = find_matching_variant(&built.variants, &selection).unwrap();
        assert_eq!(found.id, built.variants[0].id);

        let empty = Combination::new();
        assert_eq!(find_matching_variant(&built.variants, &empty).map(|v| v.id), Some(built.variants[0].id));
    }

    #[test]
    fn no_match_returns_none() {
        let fx = Fixture::new();
        let built = fx.build(&[fx.variant(&["P", "Azul"], None, true)]);
        let selection = Combination::from([
            (fx.size.id, fx.value("M")),
            (fx.color.id, fx.value("Azul")),
        ]);
        assert!(find_matching_variant(&built.variants, &selection).is_none());
    }

    #[test]
    fn price_range_mixes_own_and_base_prices() {
        let variants = vec![priced(Some(10)), priced(Some(15)), priced(None)];
        assert_eq!(
            price_range(&variants, 12),
            PriceRange {
                min: 10,
                max: 15,
                has_range: true
            }
        );
    }

    #[test]
    fn price_range_without_own_prices_is_base() {
        let variants = vec![priced(None), priced(None)];
        assert_eq!(price_range(&variants, 20), PriceRange::single(20));
        assert_eq!(price_range(&[], 20), PriceRange::single(20));
    }

    #[test]
    fn price_range_with_equal_prices_has_no_range() {
        let variants = vec![priced(Some(30)), priced(Some(30))];
        assert_eq!(price_range(&variants, 10), PriceRange::single(30));
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 300,
                ..ProptestConfig::default()
            })]

            /// Property: any subset of a variant's combination matches that variant.
            #[test]
            fn subset_selection_matches(mask in proptest::collection::vec(any::<bool>(), 4)) {
                let options: Vec<OptionId> = (0..4).map(|_| OptionId::new()).collect();
                let mut variant = priced(None);
                variant.combination = options.iter().map(|o| (*o, OptionValueId::new())).collect();

                let selection: Combination = variant
                    .combination
                    .iter()
                    .zip(mask.iter())
                    .filter(|(_, keep)| **keep)
                    .map(|((o, v), _)| (*o, *v))
                    .collect();

                let others = vec![priced(Some(1)), priced(Some(2))];
                let mut all = others.clone();
                all.push(variant.clone());

                prop_assert!(variant.matches(&selection));
                prop_assert!(find_matching_variant(&all, &selection).is_some());
            }

            /// Property: min <= every effective price <= max.
            #[test]
            fn price_range_bounds_all_prices(
                prices in proptest::collection::vec(proptest::option::of(0u64..10_000), 0..10),
                base in 0u64..10_000,
            ) {
                let variants: Vec<ProductVariant> = prices.iter().copied().map(priced).collect();
                let range = price_range(&variants, base);
                for v in &variants {
                    let p = v.effective_price(base);
                    prop_assert!(range.min <= p && p <= range.max);
                }
                prop_assert_eq!(range.has_range, range.min != range.max);
            }
        }
    }
}
