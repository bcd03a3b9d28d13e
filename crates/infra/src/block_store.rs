//! Block editing against the record store.
//!
//! Every operation follows the same pipeline:
//!
//! ```text
//! 1. Load the catalog's block rows
//! 2. Rebuild the ordered BlockList (pure)
//! 3. Apply the pure operation
//! 4. Persist the affected rows, one awaited write at a time
//! ```
//!
//! There is no transaction around step 4. A failing write aborts the operation
//! and leaves earlier writes in place; the next load reflects whatever landed.

use tracing::{debug, info, warn};

use vitrine_blocks::{
    Block, BlockContent, BlockList, BlockRecord, BlockType, DuplicateAnchor, NavigationItem,
    SortAssignment,
};
use vitrine_core::{BlockId, CatalogId, DomainError};

use crate::error::ServiceResult;
use crate::store::BlockRecords;

/// How `set_navigation_anchor` treats anchors already used on the page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AnchorPolicy {
    /// Store the derived anchor as is, even if a sibling uses it.
    #[default]
    AsDerived,
    /// Suffix the anchor (`-1`, `-2`, ...) until no sibling uses it.
    Unique,
}

pub struct BlockStore<R> {
    records: R,
    slug_max_attempts: usize,
}

impl<R> BlockStore<R> {
    pub fn new(records: R, slug_max_attempts: usize) -> Self {
        Self {
            records,
            slug_max_attempts,
        }
    }

    pub fn records(&self) -> &R {
        &self.records
    }
}

impl<R> BlockStore<R>
where
    R: BlockRecords,
{
    /// Load a catalog's blocks in display order.
    pub async fn load(&self, catalog_id: CatalogId) -> ServiceResult<BlockList> {
        let records = self.records.list_blocks(catalog_id).await?;
        let blocks = records
            .into_iter()
            .map(Block::try_from)
            .collect::<Result<Vec<_>, DomainError>>()?;
        Ok(BlockList::from_blocks(catalog_id, blocks)?)
    }

    async fn load_containing(&self, block_id: BlockId) -> ServiceResult<BlockList> {
        let record = self
            .records
            .get_block(block_id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("block {block_id}")))?;
        self.load(record.catalog_id).await
    }

    pub async fn list(&self, catalog_id: CatalogId) -> ServiceResult<Vec<Block>> {
        Ok(self.load(catalog_id).await?.into_blocks())
    }

    /// Append a block of `block_type` with its default content.
    pub async fn add_block(&self, catalog_id: CatalogId, block_type: BlockType) -> ServiceResult<Block> {
        let mut list = self.load(catalog_id).await?;
        let block = list.add(block_type);
        self.records
            .insert_blocks(vec![BlockRecord::from(&block)])
            .await?;
        info!(catalog_id = %catalog_id, block_id = %block.id, block_type = %block_type, sort = block.sort, "block added");
        Ok(block)
    }

    /// Move the block at index `from` to index `to` and persist the new sort of
    /// every block.
    pub async fn reorder(&self, catalog_id: CatalogId, from: usize, to: usize) -> ServiceResult<Vec<Block>> {
        let mut list = self.load(catalog_id).await?;
        let sorts = list.reorder(from, to)?;
        debug!(catalog_id = %catalog_id, from, to, "blocks reordered");
        self.persist_sorts(catalog_id, &sorts).await?;
        Ok(list.into_blocks())
    }

    pub async fn toggle_visible(&self, block_id: BlockId) -> ServiceResult<Block> {
        let mut list = self.load_containing(block_id).await?;
        let block = list.toggle_visible(block_id)?;
        self.records.update_block(BlockRecord::from(&block)).await?;
        info!(block_id = %block_id, visible = block.visible, "block visibility toggled");
        Ok(block)
    }

    /// Replace a block's settings. The payload must keep the block's type.
    pub async fn update_content(&self, block_id: BlockId, content: BlockContent) -> ServiceResult<Block> {
        let list = self.load_containing(block_id).await?;
        let mut block = list
            .get(block_id)
            .cloned()
            .ok_or_else(|| DomainError::not_found(format!("block {block_id}")))?;
        if content.block_type() != block.block_type() {
            return Err(DomainError::validation(format!(
                "block {block_id} is a {} block, got {} content",
                block.block_type(),
                content.block_type()
            ))
            .into());
        }
        block.content = content;
        self.records.update_block(BlockRecord::from(&block)).await?;
        debug!(block_id = %block_id, "block content updated");
        Ok(block)
    }

    /// Insert a copy right after the source and re-sequence the page.
    pub async fn duplicate(&self, block_id: BlockId, anchor: DuplicateAnchor) -> ServiceResult<Block> {
        let mut list = self.load_containing(block_id).await?;
        let duplicated = list.duplicate(block_id, anchor, self.slug_max_attempts)?;
        self.records
            .insert_blocks(vec![BlockRecord::from(&duplicated.block)])
            .await?;
        self.persist_sorts(list.catalog_id(), &duplicated.sorts).await?;
        info!(source = %block_id, block_id = %duplicated.block.id, "block duplicated");
        Ok(duplicated.block)
    }

    /// Remove a block; the remaining blocks keep their sort values.
    pub async fn delete(&self, block_id: BlockId) -> ServiceResult<()> {
        let mut list = self.load_containing(block_id).await?;
        list.remove(block_id)?;
        self.records.delete_block(block_id).await?;
        info!(block_id = %block_id, "block deleted");
        Ok(())
    }

    /// Set the navigation label and derive the block's anchor from it.
    pub async fn set_navigation_anchor(
        &self,
        block_id: BlockId,
        label: &str,
        policy: AnchorPolicy,
    ) -> ServiceResult<Block> {
        let mut list = self.load_containing(block_id).await?;
        let block = match policy {
            AnchorPolicy::AsDerived => {
                let block = list.set_navigation_anchor(block_id, label)?;
                if let Some(anchor) = block.anchor() {
                    if list.anchor_conflicts(block_id, anchor) {
                        warn!(block_id = %block_id, anchor, "navigation anchor shared with another block");
                    }
                }
                block
            }
            AnchorPolicy::Unique => {
                list.set_unique_navigation_anchor(block_id, label, self.slug_max_attempts)?
            }
        };
        self.records.update_block(BlockRecord::from(&block)).await?;
        debug!(block_id = %block_id, anchor = ?block.anchor_slug, "navigation anchor set");
        Ok(block)
    }

    /// Visible blocks in display order.
    pub async fn public_blocks(&self, catalog_id: CatalogId) -> ServiceResult<Vec<Block>> {
        let list = self.load(catalog_id).await?;
        Ok(list.public_blocks().cloned().collect())
    }

    pub async fn navigation(&self, catalog_id: CatalogId) -> ServiceResult<Vec<NavigationItem>> {
        Ok(self.load(catalog_id).await?.navigation())
    }

    async fn persist_sorts(&self, catalog_id: CatalogId, sorts: &[SortAssignment]) -> ServiceResult<()> {
        for (written, assignment) in sorts.iter().enumerate() {
            if let Err(err) = self
                .records
                .update_block_sort(assignment.block_id, assignment.sort)
                .await
            {
                warn!(
                    catalog_id = %catalog_id,
                    written,
                    total = sorts.len(),
                    error = %err,
                    "sort update interrupted"
                );
                return Err(err.into());
            }
        }
        Ok(())
    }
}
