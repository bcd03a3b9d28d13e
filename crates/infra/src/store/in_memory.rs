use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use vitrine_blocks::BlockRecord;
use vitrine_catalogs::{Catalog, CatalogPatch};
use vitrine_core::{BlockId, CatalogId, OptionId, ProductId, UserId};
use vitrine_products::{OptionRow, OptionValueRow, VariantRow};

use super::r#trait::{BlockRecords, CatalogRecords, ProductRecords};
use crate::error::StoreError;

/// Unlimited sort-update budget.
const NO_LIMIT: usize = usize::MAX;

/// In-memory record store for tests/dev.
///
/// Enforces the same constraints a relational backend would (unique ids,
/// unique `(user_id, slug)`, blocks only for existing catalogs, cascade delete
/// of blocks) and can be told to fail selected operations.
#[derive(Debug)]
pub struct InMemoryRecordStore {
    catalogs: RwLock<HashMap<CatalogId, Catalog>>,
    blocks: RwLock<HashMap<BlockId, BlockRecord>>,
    options: RwLock<Vec<OptionRow>>,
    option_values: RwLock<Vec<OptionValueRow>>,
    variants: RwLock<Vec<VariantRow>>,

    fail_block_inserts: AtomicBool,
    fail_slug_lookups: AtomicBool,
    sort_update_budget: AtomicUsize,
    sort_updates: AtomicUsize,
    slug_lookups: AtomicUsize,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self {
            catalogs: RwLock::new(HashMap::new()),
            blocks: RwLock::new(HashMap::new()),
            options: RwLock::new(Vec::new()),
            option_values: RwLock::new(Vec::new()),
            variants: RwLock::new(Vec::new()),
            fail_block_inserts: AtomicBool::new(false),
            fail_slug_lookups: AtomicBool::new(false),
            sort_update_budget: AtomicUsize::new(NO_LIMIT),
            sort_updates: AtomicUsize::new(0),
            slug_lookups: AtomicUsize::new(0),
        }
    }

    /// Make every `insert_blocks` call fail with a backend error.
    pub fn fail_block_inserts(&self, fail: bool) {
        self.fail_block_inserts.store(fail, Ordering::SeqCst);
    }

    /// Make every `catalog_slug_exists` call fail with a backend error.
    pub fn fail_slug_lookups(&self, fail: bool) {
        self.fail_slug_lookups.store(fail, Ordering::SeqCst);
    }

    /// Let the next `n` sort updates succeed and fail every one after that.
    /// `None` removes the limit.
    pub fn fail_sort_updates_after(&self, n: Option<usize>) {
        self.sort_update_budget
            .store(n.unwrap_or(NO_LIMIT), Ordering::SeqCst);
    }

    /// Number of successful `update_block_sort` calls so far.
    pub fn sort_update_count(&self) -> usize {
        self.sort_updates.load(Ordering::SeqCst)
    }

    /// Number of `catalog_slug_exists` calls so far.
    pub fn slug_lookup_count(&self) -> usize {
        self.slug_lookups.load(Ordering::SeqCst)
    }

    /// Load the option / value / variant rows of one or more products.
    pub fn seed_product_rows(
        &self,
        options: Vec<OptionRow>,
        values: Vec<OptionValueRow>,
        variants: Vec<VariantRow>,
    ) -> Result<(), StoreError> {
        write(&self.options)?.extend(options);
        write(&self.option_values)?.extend(values);
        write(&self.variants)?.extend(variants);
        Ok(())
    }

    fn take_sort_budget(&self) -> Result<(), StoreError> {
        let remaining = self.sort_update_budget.load(Ordering::SeqCst);
        match remaining {
            0 => Err(StoreError::backend("injected sort update failure")),
            NO_LIMIT => Ok(()),
            n => {
                self.sort_update_budget.store(n - 1, Ordering::SeqCst);
                Ok(())
            }
        }
    }
}

impl Default for InMemoryRecordStore {
    fn default() -> Self {
        Self::new()
    }
}

fn read<T>(lock: &RwLock<T>) -> Result<RwLockReadGuard<'_, T>, StoreError> {
    lock.read().map_err(|_| StoreError::backend("lock poisoned"))
}

fn write<T>(lock: &RwLock<T>) -> Result<RwLockWriteGuard<'_, T>, StoreError> {
    lock.write().map_err(|_| StoreError::backend("lock poisoned"))
}

#[async_trait]
impl CatalogRecords for InMemoryRecordStore {
    async fn get_catalog(&self, id: CatalogId) -> Result<Option<Catalog>, StoreError> {
        Ok(read(&self.catalogs)?.get(&id).cloned())
    }

    async fn catalog_slug_exists(&self, user_id: UserId, slug: &str) -> Result<bool, StoreError> {
        self.slug_lookups.fetch_add(1, Ordering::SeqCst);
        if self.fail_slug_lookups.load(Ordering::SeqCst) {
            return Err(StoreError::backend("injected slug lookup failure"));
        }
        Ok(read(&self.catalogs)?
            .values()
            .any(|c| c.user_id == user_id && c.slug == slug))
    }

    async fn list_catalogs(&self, user_id: UserId) -> Result<Vec<Catalog>, StoreError> {
        let mut catalogs: Vec<Catalog> = read(&self.catalogs)?
            .values()
            .filter(|c| c.user_id == user_id)
            .cloned()
            .collect();
        catalogs.sort_by_key(|c| c.created_at);
        Ok(catalogs)
    }

    async fn insert_catalog(&self, catalog: Catalog) -> Result<(), StoreError> {
        let mut map = write(&self.catalogs)?;
        if map.contains_key(&catalog.id) {
            return Err(StoreError::Duplicate(format!("catalog {}", catalog.id)));
        }
        if map
            .values()
            .any(|c| c.user_id == catalog.user_id && c.slug == catalog.slug)
        {
            return Err(StoreError::Duplicate(format!("catalog slug '{}'", catalog.slug)));
        }
        map.insert(catalog.id, catalog);
        Ok(())
    }

    async fn patch_catalog(
        &self,
        id: CatalogId,
        patch: CatalogPatch,
        at: DateTime<Utc>,
    ) -> Result<Catalog, StoreError> {
        let mut map = write(&self.catalogs)?;
        let catalog = map
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found(format!("catalog {id}")))?;
        catalog.apply(patch, at);
        Ok(catalog.clone())
    }

    async fn delete_catalog(&self, id: CatalogId) -> Result<(), StoreError> {
        let mut catalogs = write(&self.catalogs)?;
        let mut blocks = write(&self.blocks)?;
        catalogs.remove(&id);
        blocks.retain(|_, b| b.catalog_id != id);
        Ok(())
    }
}

#[async_trait]
impl BlockRecords for InMemoryRecordStore {
    async fn list_blocks(&self, catalog_id: CatalogId) -> Result<Vec<BlockRecord>, StoreError> {
        let mut records: Vec<BlockRecord> = read(&self.blocks)?
            .values()
            .filter(|b| b.catalog_id == catalog_id)
            .cloned()
            .collect();
        records.sort_by_key(|b| b.sort);
        Ok(records)
    }

    async fn get_block(&self, id: BlockId) -> Result<Option<BlockRecord>, StoreError> {
        Ok(read(&self.blocks)?.get(&id).cloned())
    }

    async fn insert_blocks(&self, records: Vec<BlockRecord>) -> Result<(), StoreError> {
        if self.fail_block_inserts.load(Ordering::SeqCst) {
            return Err(StoreError::backend("injected block insert failure"));
        }
        let catalogs = read(&self.catalogs)?;
        if let Some(orphan) = records.iter().find(|r| !catalogs.contains_key(&r.catalog_id)) {
            return Err(StoreError::not_found(format!("catalog {}", orphan.catalog_id)));
        }
        let mut map = write(&self.blocks)?;
        if let Some(dup) = records.iter().find(|r| map.contains_key(&r.id)) {
            return Err(StoreError::Duplicate(format!("block {}", dup.id)));
        }
        map.extend(records.into_iter().map(|r| (r.id, r)));
        Ok(())
    }

    async fn update_block(&self, record: BlockRecord) -> Result<(), StoreError> {
        if !read(&self.catalogs)?.contains_key(&record.catalog_id) {
            return Err(StoreError::not_found(format!("catalog {}", record.catalog_id)));
        }
        let mut map = write(&self.blocks)?;
        let slot = map
            .get_mut(&record.id)
            .ok_or_else(|| StoreError::not_found(format!("block {}", record.id)))?;
        *slot = record;
        Ok(())
    }

    async fn update_block_sort(&self, id: BlockId, sort: i64) -> Result<(), StoreError> {
        self.take_sort_budget()?;
        let mut map = write(&self.blocks)?;
        let record = map
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found(format!("block {id}")))?;
        record.sort = sort;
        self.sort_updates.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn delete_block(&self, id: BlockId) -> Result<(), StoreError> {
        write(&self.blocks)?.remove(&id);
        Ok(())
    }
}

#[async_trait]
impl ProductRecords for InMemoryRecordStore {
    async fn list_options(&self, product_id: ProductId) -> Result<Vec<OptionRow>, StoreError> {
        Ok(read(&self.options)?
            .iter()
            .filter(|o| o.product_id == product_id)
            .cloned()
            .collect())
    }

    async fn list_option_values(
        &self,
        option_ids: &[OptionId],
    ) -> Result<Vec<OptionValueRow>, StoreError> {
        Ok(read(&self.option_values)?
            .iter()
            .filter(|v| option_ids.contains(&v.option_id))
            .cloned()
            .collect())
    }

    async fn list_variants(&self, product_id: ProductId) -> Result<Vec<VariantRow>, StoreError> {
        Ok(read(&self.variants)?
            .iter()
            .filter(|v| v.product_id == product_id)
            .cloned()
            .collect())
    }
}
