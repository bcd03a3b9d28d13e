//! Loads a product's option, value and variant rows and assembles them.

use tracing::debug;

use vitrine_core::{OptionId, ProductId};
use vitrine_products::{ProductVariants, build_variants};

use crate::error::ServiceResult;
use crate::store::ProductRecords;

pub struct VariantReader<P> {
    records: P,
}

impl<P> VariantReader<P>
where
    P: ProductRecords,
{
    pub fn new(records: P) -> Self {
        Self { records }
    }

    /// Options (with values) and variants (with combinations) of one product.
    ///
    /// A product without option rows has no variants to resolve, so the value
    /// and variant rows are not fetched.
    pub async fn load(&self, product_id: ProductId) -> ServiceResult<ProductVariants> {
        let options = self.records.list_options(product_id).await?;
        if options.is_empty() {
            return Ok(ProductVariants::default());
        }
        let option_ids: Vec<OptionId> = options.iter().map(|o| o.id).collect();
        let values = self.records.list_option_values(&option_ids).await?;
        let variants = self.records.list_variants(product_id).await?;
        debug!(
            product_id = %product_id,
            options = options.len(),
            values = values.len(),
            variants = variants.len(),
            "variant rows loaded"
        );
        Ok(build_variants(&options, &values, &variants))
    }
}
