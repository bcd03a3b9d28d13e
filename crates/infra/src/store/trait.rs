use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use vitrine_blocks::BlockRecord;
use vitrine_catalogs::{Catalog, CatalogPatch};
use vitrine_core::{BlockId, CatalogId, OptionId, ProductId, UserId};
use vitrine_products::{OptionRow, OptionValueRow, VariantRow};

use crate::error::StoreError;

/// Persistence of `catalogs` rows.
#[async_trait]
pub trait CatalogRecords: Send + Sync {
    async fn get_catalog(&self, id: CatalogId) -> Result<Option<Catalog>, StoreError>;

    /// Whether `user_id` already owns a catalog with this slug.
    async fn catalog_slug_exists(&self, user_id: UserId, slug: &str) -> Result<bool, StoreError>;

    async fn list_catalogs(&self, user_id: UserId) -> Result<Vec<Catalog>, StoreError>;

    /// Insert a new row. Fails with [`StoreError::Duplicate`] when the owner
    /// already has the slug.
    async fn insert_catalog(&self, catalog: Catalog) -> Result<(), StoreError>;

    /// Apply a single-field update and return the updated row.
    async fn patch_catalog(
        &self,
        id: CatalogId,
        patch: CatalogPatch,
        at: DateTime<Utc>,
    ) -> Result<Catalog, StoreError>;

    /// Delete the row together with every block of the catalog.
    async fn delete_catalog(&self, id: CatalogId) -> Result<(), StoreError>;
}

/// Persistence of `catalog_blocks` rows.
#[async_trait]
pub trait BlockRecords: Send + Sync {
    async fn list_blocks(&self, catalog_id: CatalogId) -> Result<Vec<BlockRecord>, StoreError>;

    async fn get_block(&self, id: BlockId) -> Result<Option<BlockRecord>, StoreError>;

    /// Bulk insert.
    async fn insert_blocks(&self, records: Vec<BlockRecord>) -> Result<(), StoreError>;

    /// Replace an existing row.
    async fn update_block(&self, record: BlockRecord) -> Result<(), StoreError>;

    async fn update_block_sort(&self, id: BlockId, sort: i64) -> Result<(), StoreError>;

    async fn delete_block(&self, id: BlockId) -> Result<(), StoreError>;
}

/// Read access to a product's option / value / variant rows.
#[async_trait]
pub trait ProductRecords: Send + Sync {
    async fn list_options(&self, product_id: ProductId) -> Result<Vec<OptionRow>, StoreError>;

    async fn list_option_values(
        &self,
        option_ids: &[OptionId],
    ) -> Result<Vec<OptionValueRow>, StoreError>;

    /// Variants with their linked value ids.
    async fn list_variants(&self, product_id: ProductId) -> Result<Vec<VariantRow>, StoreError>;
}

#[async_trait]
impl<S> CatalogRecords for Arc<S>
where
    S: CatalogRecords + ?Sized,
{
    async fn get_catalog(&self, id: CatalogId) -> Result<Option<Catalog>, StoreError> {
        (**self).get_catalog(id).await
    }

    async fn catalog_slug_exists(&self, user_id: UserId, slug: &str) -> Result<bool, StoreError> {
        (**self).catalog_slug_exists(user_id, slug).await
    }

    async fn list_catalogs(&self, user_id: UserId) -> Result<Vec<Catalog>, StoreError> {
        (**self).list_catalogs(user_id).await
    }

    async fn insert_catalog(&self, catalog: Catalog) -> Result<(), StoreError> {
        (**self).insert_catalog(catalog).await
    }

    async fn patch_catalog(
        &self,
        id: CatalogId,
        patch: CatalogPatch,
        at: DateTime<Utc>,
    ) -> Result<Catalog, StoreError> {
        (**self).patch_catalog(id, patch, at).await
    }

    async fn delete_catalog(&self, id: CatalogId) -> Result<(), StoreError> {
        (**self).delete_catalog(id).await
    }
}

#[async_trait]
impl<S> BlockRecords for Arc<S>
where
    S: BlockRecords + ?Sized,
{
    async fn list_blocks(&self, catalog_id: CatalogId) -> Result<Vec<BlockRecord>, StoreError> {
        (**self).list_blocks(catalog_id).await
    }

    async fn get_block(&self, id: BlockId) -> Result<Option<BlockRecord>, StoreError> {
        (**self).get_block(id).await
    }

    async fn insert_blocks(&self, records: Vec<BlockRecord>) -> Result<(), StoreError> {
        (**self).insert_blocks(records).await
    }

    async fn update_block(&self, record: BlockRecord) -> Result<(), StoreError> {
        (**self).update_block(record).await
    }

    async fn update_block_sort(&self, id: BlockId, sort: i64) -> Result<(), StoreError> {
        (**self).update_block_sort(id, sort).await
    }

    async fn delete_block(&self, id: BlockId) -> Result<(), StoreError> {
        (**self).delete_block(id).await
    }
}

#[async_trait]
impl<S> ProductRecords for Arc<S>
where
    S: ProductRecords + ?Sized,
{
    async fn list_options(&self, product_id: ProductId) -> Result<Vec<OptionRow>, StoreError> {
        (**self).list_options(product_id).await
    }

    async fn list_option_values(
        &self,
        option_ids: &[OptionId],
    ) -> Result<Vec<OptionValueRow>, StoreError> {
        (**self).list_option_values(option_ids).await
    }

    async fn list_variants(&self, product_id: ProductId) -> Result<Vec<VariantRow>, StoreError> {
        (**self).list_variants(product_id).await
    }
}
