//! Catalog creation, publish-state changes, duplication and deletion.

use chrono::Utc;
use tracing::{info, warn};

use vitrine_blocks::BlockRecord;
use vitrine_catalogs::{Catalog, CatalogPatch, CatalogStatus};
use vitrine_core::{BlockId, CatalogId, DomainError, SlugCandidates, UserId};

use crate::config::BuilderConfig;
use crate::error::{ServiceError, ServiceResult};
use crate::store::{BlockRecords, CatalogRecords};

pub struct CatalogLifecycleService<C, B> {
    catalogs: C,
    blocks: B,
    config: BuilderConfig,
}

impl<C, B> CatalogLifecycleService<C, B> {
    pub fn new(catalogs: C, blocks: B, config: BuilderConfig) -> Self {
        Self {
            catalogs,
            blocks,
            config,
        }
    }

    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }
}

impl<C, B> CatalogLifecycleService<C, B>
where
    C: CatalogRecords,
    B: BlockRecords,
{
    pub async fn get(&self, catalog_id: CatalogId) -> ServiceResult<Catalog> {
        self.catalogs
            .get_catalog(catalog_id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("catalog {catalog_id}")).into())
    }

    pub async fn list(&self, user_id: UserId) -> ServiceResult<Vec<Catalog>> {
        Ok(self.catalogs.list_catalogs(user_id).await?)
    }

    /// New draft catalog with a slug derived from the title and unique for the owner.
    pub async fn create_catalog(&self, user_id: UserId, title: &str) -> ServiceResult<Catalog> {
        let title = Catalog::validate_title(title)?;
        let slug = self.free_slug(user_id, title).await?;
        let catalog = Catalog::new(CatalogId::new(), user_id, title, slug, Utc::now())?;
        self.catalogs.insert_catalog(catalog.clone()).await?;
        info!(catalog_id = %catalog.id, user_id = %user_id, slug = %catalog.slug, "catalog created");
        Ok(catalog)
    }

    pub async fn set_status(&self, catalog_id: CatalogId, status: CatalogStatus) -> ServiceResult<Catalog> {
        self.patch(catalog_id, CatalogPatch::Status(status)).await
    }

    pub async fn set_link_active(&self, catalog_id: CatalogId, active: bool) -> ServiceResult<Catalog> {
        self.patch(catalog_id, CatalogPatch::LinkActive(active)).await
    }

    pub async fn set_on_profile(&self, catalog_id: CatalogId, on_profile: bool) -> ServiceResult<Catalog> {
        self.patch(catalog_id, CatalogPatch::OnProfile(on_profile)).await
    }

    async fn patch(&self, catalog_id: CatalogId, patch: CatalogPatch) -> ServiceResult<Catalog> {
        let catalog = self
            .catalogs
            .patch_catalog(catalog_id, patch, Utc::now())
            .await?;
        info!(catalog_id = %catalog_id, ?patch, "catalog updated");
        Ok(catalog)
    }

    /// Copy a catalog and all of its blocks into a new draft owned by `user_id`.
    ///
    /// The copy's slug is `<source slug>-<suffix>` made unique for the owner.
    /// When the block copy fails after the new catalog row was inserted, the
    /// row is left in place and [`ServiceError::PartialDuplicate`] carries it.
    pub async fn duplicate_catalog(&self, catalog_id: CatalogId, user_id: UserId) -> ServiceResult<Catalog> {
        let source = self.get(catalog_id).await?;
        if source.user_id != user_id {
            return Err(DomainError::not_found(format!("catalog {catalog_id}")).into());
        }
        let blocks = self.blocks.list_blocks(catalog_id).await?;

        let base = format!("{}-{}", source.slug, self.config.copy_slug_suffix);
        let slug = self.free_slug(user_id, &base).await?;
        let copy = source.duplicate_as(CatalogId::new(), slug, Utc::now());
        self.catalogs.insert_catalog(copy.clone()).await?;

        let copied: Vec<BlockRecord> = blocks
            .into_iter()
            .map(|record| BlockRecord {
                id: BlockId::new(),
                catalog_id: copy.id,
                ..record
            })
            .collect();
        let count = copied.len();
        if !copied.is_empty() {
            if let Err(source_err) = self.blocks.insert_blocks(copied).await {
                warn!(catalog_id = %copy.id, error = %source_err, "catalog duplicated without its blocks");
                return Err(ServiceError::PartialDuplicate {
                    catalog: Box::new(copy),
                    source: source_err,
                });
            }
        }

        info!(source = %catalog_id, catalog_id = %copy.id, slug = %copy.slug, blocks = count, "catalog duplicated");
        Ok(copy)
    }

    /// Delete a catalog and every block on it.
    pub async fn delete_catalog(&self, catalog_id: CatalogId) -> ServiceResult<()> {
        self.get(catalog_id).await?;
        self.catalogs.delete_catalog(catalog_id).await?;
        info!(catalog_id = %catalog_id, "catalog deleted");
        Ok(())
    }

    /// First slug candidate for `text` the owner does not use yet.
    ///
    /// A failed lookup counts the candidate as free; the insert's uniqueness
    /// check is the last word.
    async fn free_slug(&self, user_id: UserId, text: &str) -> ServiceResult<String> {
        let mut candidates = SlugCandidates::new(text, self.config.slug_max_attempts);
        for candidate in candidates.by_ref() {
            match self.catalogs.catalog_slug_exists(user_id, &candidate).await {
                Ok(true) => continue,
                Ok(false) => return Ok(candidate),
                Err(err) => {
                    warn!(user_id = %user_id, slug = %candidate, error = %err, "slug lookup failed, assuming free");
                    return Ok(candidate);
                }
            }
        }
        Err(candidates.exhausted().into())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use vitrine_blocks::{Block, BlockType};

    use super::*;
    use crate::error::StoreError;
    use crate::store::InMemoryRecordStore;

    type Service = CatalogLifecycleService<Arc<InMemoryRecordStore>, Arc<InMemoryRecordStore>>;

    fn service() -> (Arc<InMemoryRecordStore>, Service) {
        service_with(BuilderConfig::default())
    }

    fn service_with(config: BuilderConfig) -> (Arc<InMemoryRecordStore>, Service) {
        let store = Arc::new(InMemoryRecordStore::new());
        (store.clone(), CatalogLifecycleService::new(store.clone(), store, config))
    }

    async fn add_blocks(store: &InMemoryRecordStore, catalog_id: CatalogId, kinds: &[BlockType]) {
        let records = kinds
            .iter()
            .enumerate()
            .map(|(sort, kind)| {
                BlockRecord::from(&Block::new(BlockId::new(), catalog_id, *kind, sort as i64 * 10))
            })
            .collect();
        store.insert_blocks(records).await.unwrap();
    }

    #[tokio::test]
    async fn create_derives_a_unique_slug_from_the_title() {
        let (_, service) = service();
        let user = UserId::new();

        let first = service.create_catalog(user, "Cardápio de Verão").await.unwrap();
        let second = service.create_catalog(user, "Cardápio de Verão").await.unwrap();
        let other = service.create_catalog(UserId::new(), "Cardápio de Verão").await.unwrap();

        assert_eq!(first.slug, "cardapio-de-verao");
        assert_eq!(second.slug, "cardapio-de-verao-1");
        assert_eq!(other.slug, "cardapio-de-verao");
        assert_eq!(first.status, CatalogStatus::Rascunho);
        assert_eq!(service.list(user).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn symbol_only_title_uses_the_fallback_slug() {
        let (_, service) = service();
        let catalog = service.create_catalog(UserId::new(), "???").await.unwrap();
        assert_eq!(catalog.slug, "pagina");
    }

    #[tokio::test]
    async fn blank_title_is_rejected_before_any_slug_lookup() {
        let (store, service) = service();
        let user = UserId::new();

        let err = service.create_catalog(user, " \t ").await.unwrap_err();
        assert!(matches!(err, ServiceError::Domain(DomainError::Validation(_))));
        assert_eq!(store.slug_lookup_count(), 0);
        assert!(service.list(user).await.unwrap().is_empty());

        service.create_catalog(user, "  Menu ").await.unwrap();
        assert_eq!(store.slug_lookup_count(), 1);
    }

    #[tokio::test]
    async fn publish_flags_are_independent() {
        let (_, service) = service();
        let catalog = service.create_catalog(UserId::new(), "Menu").await.unwrap();

        let published = service.set_status(catalog.id, CatalogStatus::Publicado).await.unwrap();
        assert!(published.is_published());
        assert!(!published.link_active);

        let listed = service.set_on_profile(catalog.id, true).await.unwrap();
        assert!(listed.on_profile);
        assert!(!listed.link_active);

        let linked = service.set_link_active(catalog.id, true).await.unwrap();
        assert!(linked.listed_on_profile());
        assert_eq!(service.get(catalog.id).await.unwrap(), linked);
    }

    #[tokio::test]
    async fn patching_a_missing_catalog_fails() {
        let (_, service) = service();
        let err = service.set_link_active(CatalogId::new(), true).await.unwrap_err();
        assert!(matches!(err, ServiceError::Store(StoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn duplicate_copies_blocks_into_a_fresh_draft() {
        let (store, service) = service();
        let user = UserId::new();
        let source = service.create_catalog(user, "Menu").await.unwrap();
        service.set_status(source.id, CatalogStatus::Publicado).await.unwrap();
        service.set_link_active(source.id, true).await.unwrap();
        add_blocks(&store, source.id, &[BlockType::Cover, BlockType::ProductGrid]).await;

        let copy = service.duplicate_catalog(source.id, user).await.unwrap();

        assert_eq!(copy.slug, "menu-copia");
        assert_eq!(copy.title, "Menu (cópia)");
        assert_eq!(copy.status, CatalogStatus::Rascunho);
        assert!(!copy.link_active);
        assert!(!copy.on_profile);

        let original = store.list_blocks(source.id).await.unwrap();
        let copied = store.list_blocks(copy.id).await.unwrap();
        assert_eq!(copied.len(), 2);
        for (a, b) in original.iter().zip(&copied) {
            assert_ne!(a.id, b.id);
            assert_eq!(b.catalog_id, copy.id);
            assert_eq!((a.block_type, &a.data, a.sort), (b.block_type, &b.data, b.sort));
        }
    }

    #[tokio::test]
    async fn duplicating_twice_suffixes_the_slug() {
        let (_, service) = service();
        let user = UserId::new();
        let source = service.create_catalog(user, "Menu").await.unwrap();

        let first = service.duplicate_catalog(source.id, user).await.unwrap();
        let second = service.duplicate_catalog(source.id, user).await.unwrap();

        assert_eq!(first.slug, "menu-copia");
        assert_eq!(second.slug, "menu-copia-1");
    }

    #[tokio::test]
    async fn copy_suffix_comes_from_config() {
        let config = BuilderConfig {
            copy_slug_suffix: "copy".to_string(),
            ..BuilderConfig::default()
        };
        let (_, service) = service_with(config);
        let user = UserId::new();
        let source = service.create_catalog(user, "Menu").await.unwrap();

        let copy = service.duplicate_catalog(source.id, user).await.unwrap();
        assert_eq!(copy.slug, "menu-copy");
    }

    #[tokio::test]
    async fn duplicating_someone_elses_catalog_is_not_found() {
        let (_, service) = service();
        let source = service.create_catalog(UserId::new(), "Menu").await.unwrap();

        let err = service.duplicate_catalog(source.id, UserId::new()).await.unwrap_err();
        assert!(matches!(err, ServiceError::Domain(DomainError::NotFound(_))));
    }

    #[tokio::test]
    async fn failed_block_copy_reports_the_partial_catalog() {
        let (store, service) = service();
        let user = UserId::new();
        let source = service.create_catalog(user, "Menu").await.unwrap();
        add_blocks(&store, source.id, &[BlockType::Text]).await;

        store.fail_block_inserts(true);
        let err = service.duplicate_catalog(source.id, user).await.unwrap_err();

        let (catalog, cause) = match err {
            ServiceError::PartialDuplicate { catalog, source } => (catalog, source),
            other => panic!("expected a partial duplicate, got {other:?}"),
        };
        assert!(matches!(cause, StoreError::Backend(_)));
        let persisted = service.get(catalog.id).await.unwrap();
        assert_eq!(persisted.slug, "menu-copia");
        assert!(store.list_blocks(catalog.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn failing_slug_lookups_count_as_free() {
        let (store, service) = service();
        let user = UserId::new();
        service.create_catalog(user, "Menu").await.unwrap();

        store.fail_slug_lookups(true);
        // The lookup says nothing, "menu" is tried and the insert's uniqueness check rejects it.
        let err = service.create_catalog(user, "Menu").await.unwrap_err();
        assert!(matches!(err, ServiceError::Store(StoreError::Duplicate(_))));

        let fresh = service.create_catalog(user, "Loja").await.unwrap();
        assert_eq!(fresh.slug, "loja");
    }

    #[tokio::test]
    async fn slug_search_is_bounded() {
        let config = BuilderConfig {
            slug_max_attempts: 2,
            ..BuilderConfig::default()
        };
        let (_, service) = service_with(config);
        let user = UserId::new();
        service.create_catalog(user, "Menu").await.unwrap();
        service.create_catalog(user, "Menu").await.unwrap();

        let err = service.create_catalog(user, "Menu").await.unwrap_err();
        assert!(matches!(err, ServiceError::Slug(_)));
    }

    #[tokio::test]
    async fn delete_cascades_to_blocks() {
        let (store, service) = service();
        let catalog = service.create_catalog(UserId::new(), "Menu").await.unwrap();
        add_blocks(&store, catalog.id, &[BlockType::Cover, BlockType::Contact]).await;

        service.delete_catalog(catalog.id).await.unwrap();

        assert!(matches!(
            service.get(catalog.id).await.unwrap_err(),
            ServiceError::Domain(DomainError::NotFound(_))
        ));
        assert!(store.list_blocks(catalog.id).await.unwrap().is_empty());
    }
}
