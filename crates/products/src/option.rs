use serde::{Deserialize, Serialize};

use vitrine_core::{Entity, OptionId, OptionValueId, ProductId};

/// `product_options` row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionRow {
    pub id: OptionId,
    pub product_id: ProductId,
    pub name: String,
    pub sort: i32,
}

/// `product_option_values` row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionValueRow {
    pub id: OptionValueId,
    pub option_id: OptionId,
    #[serde(rename = "value")]
    pub label: String,
    pub sort: i32,
}

/// One point on an option axis (e.g. "M" on "Size").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionValue {
    pub id: OptionValueId,
    pub option_id: OptionId,
    pub label: String,
    pub sort: i32,
}

impl From<&OptionValueRow> for OptionValue {
    fn from(row: &OptionValueRow) -> Self {
        Self {
            id: row.id,
            option_id: row.option_id,
            label: row.label.clone(),
            sort: row.sort,
        }
    }
}

/// An axis of variation with its ordered values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductOption {
    pub id: OptionId,
    pub product_id: ProductId,
    pub name: String,
    pub sort: i32,
    pub values: Vec<OptionValue>,
}

impl ProductOption {
    pub fn first_value(&self) -> Option<&OptionValue> {
        self.values.first()
    }

    pub fn value(&self, id: OptionValueId) -> Option<&OptionValue> {
        self.values.iter().find(|v| v.id == id)
    }
}

impl Entity for ProductOption {
    type Id = OptionId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
