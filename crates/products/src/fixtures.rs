//! Shared test fixture: a product with "Tamanho" (P, M) and "Cor" (Azul, Preto).

use vitrine_core::{OptionId, OptionValueId, ProductId, VariantId};

use crate::option::{OptionRow, OptionValueRow};
use crate::variant::{ProductVariants, VariantRow, build_variants};

pub(crate) struct Fixture {
    pub product_id: ProductId,
    pub size: OptionRow,
    pub color: OptionRow,
    pub values: Vec<OptionValueRow>,
}

impl Fixture {
    pub fn new() -> Self {
        let product_id = ProductId::new();
        let size = OptionRow {
            id: OptionId::new(),
            product_id,
            name: "Tamanho".to_string(),
            sort: 0,
        };
        let color = OptionRow {
            id: OptionId::new(),
            product_id,
            name: "Cor".to_string(),
            sort: 1,
        };
        let value = |option: &OptionRow, label: &str, sort| OptionValueRow {
            id: OptionValueId::new(),
            option_id: option.id,
            label: label.to_string(),
            sort,
        };
        let values = vec![
            value(&size, "P", 0),
            value(&size, "M", 1),
            value(&color, "Azul", 0),
            value(&color, "Preto", 1),
        ];
        Self {
            product_id,
            size,
            color,
            values,
        }
    }

    pub fn value(&self, label: &str) -> OptionValueId {
        self.values
            .iter()
            .find(|v| v.label == label)
            .map(|v| v.id)
            .expect("fixture value")
    }

    pub fn variant(&self, labels: &[&str], price: Option<u64>, is_available: bool) -> VariantRow {
        VariantRow {
            id: VariantId::new(),
            product_id: self.product_id,
            sku: None,
            price,
            is_available,
            image_url: None,
            value_ids: labels.iter().map(|l| self.value(l)).collect(),
        }
    }

    pub fn build(&self, variants: &[VariantRow]) -> ProductVariants {
        build_variants(
            &[self.color.clone(), self.size.clone()],
            &self.values,
            variants,
        )
    }
}
