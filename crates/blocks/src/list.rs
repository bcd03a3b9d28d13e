//! Ordered block collection of one page.
//!
//! `BlockList` owns the in-memory ordering of a catalog's blocks and implements
//! every ordering operation as pure state transitions. Callers persist the
//! returned blocks / sort assignments through their record store.

use std::collections::HashSet;

use vitrine_core::{
    BlockId, CatalogId, DomainError, DomainResult, SlugError, position_of, unique_slug,
};

use crate::block::Block;
use crate::content::BlockType;
use crate::navigation::{NavigationItem, derive_anchor};

/// New `sort` value for a block after a re-sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortAssignment {
    pub block_id: BlockId,
    pub sort: i64,
}

/// What a duplicated block does with the source's navigation anchor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DuplicateAnchor {
    /// The copy has no navigation label and no anchor.
    #[default]
    Clear,
    /// The copy keeps the label and gets a fresh anchor that no sibling uses.
    Regenerate,
}

/// Result of duplicating a block: the new block plus the re-sequenced order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Duplicated {
    pub block: Block,
    pub sorts: Vec<SortAssignment>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockList {
    catalog_id: CatalogId,
    blocks: Vec<Block>,
}

impl BlockList {
    pub fn empty(catalog_id: CatalogId) -> Self {
        Self {
            catalog_id,
            blocks: Vec::new(),
        }
    }

    /// Build the display order from loaded blocks (ordered by `sort`).
    ///
    /// Every block must belong to `catalog_id`.
    pub fn from_blocks(catalog_id: CatalogId, mut blocks: Vec<Block>) -> DomainResult<Self> {
        if let Some(stray) = blocks.iter().find(|b| b.catalog_id != catalog_id) {
            return Err(DomainError::invariant(format!(
                "block {} belongs to catalog {}, not {}",
                stray.id, stray.catalog_id, catalog_id
            )));
        }
        blocks.sort_by_key(|b| b.sort);
        Ok(Self { catalog_id, blocks })
    }

    pub fn catalog_id(&self) -> CatalogId {
        self.catalog_id
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn into_blocks(self) -> Vec<Block> {
        self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn get(&self, id: BlockId) -> Option<&Block> {
        self.blocks.iter().find(|b| b.id == id)
    }

    fn index_of(&self, id: BlockId) -> DomainResult<usize> {
        position_of(&self.blocks, &id).ok_or_else(|| DomainError::not_found(format!("block {id}")))
    }

    /// Sort value that places a block after every existing one.
    pub fn next_sort(&self) -> i64 {
        self.blocks.iter().map(|b| b.sort).max().map_or(0, |max| max + 1)
    }

    /// Append a new block of the given kind at the end of the page.
    pub fn add(&mut self, block_type: BlockType) -> Block {
        let block = Block::new(BlockId::new(), self.catalog_id, block_type, self.next_sort());
        self.blocks.push(block.clone());
        block
    }

    /// Move the block at `from` so it ends up at index `to`, then re-derive a
    /// dense `sort` sequence (0, 1, 2, ...) over the new order.
    ///
    /// Returns the sort of every block, to be persisted as one batch.
    pub fn reorder(&mut self, from: usize, to: usize) -> DomainResult<Vec<SortAssignment>> {
        let len = self.blocks.len();
        if from >= len || to >= len {
            return Err(DomainError::validation(format!(
                "cannot move block {from} -> {to} in a list of {len}"
            )));
        }
        let moved = self.blocks.remove(from);
        self.blocks.insert(to, moved);
        Ok(self.resequence())
    }

    /// Assign dense sort values following the current order.
    pub fn resequence(&mut self) -> Vec<SortAssignment> {
        self.blocks
            .iter_mut()
            .enumerate()
            .map(|(idx, block)| {
                block.sort = idx as i64;
                SortAssignment {
                    block_id: block.id,
                    sort: block.sort,
                }
            })
            .collect()
    }

    /// Flip visibility; nothing else changes.
    pub fn toggle_visible(&mut self, id: BlockId) -> DomainResult<Block> {
        let idx = self.index_of(id)?;
        let block = &mut self.blocks[idx];
        block.visible = !block.visible;
        Ok(block.clone())
    }

    /// Copy a block (same type and content, new id) right after its source.
    ///
    /// `max_attempts` bounds the anchor search of [`DuplicateAnchor::Regenerate`].
    pub fn duplicate(
        &mut self,
        id: BlockId,
        anchor: DuplicateAnchor,
        max_attempts: usize,
    ) -> DomainResult<Duplicated> {
        let idx = self.index_of(id)?;
        let source = &self.blocks[idx];

        let mut copy = source.clone();
        copy.id = BlockId::new();
        copy.navigation_label = None;
        copy.anchor_slug = None;

        if anchor == DuplicateAnchor::Regenerate {
            if let Some(label) = source.navigation_label.clone() {
                let base = derive_anchor(&label, source);
                copy.navigation_label = Some(label);
                if let Some(base) = base {
                    let taken = self.taken_anchors(None);
                    copy.anchor_slug = Some(
                        unique_slug(&base, max_attempts, |c| taken.contains(c))
                            .map_err(anchor_exhausted)?,
                    );
                }
            }
        }

        self.blocks.insert(idx + 1, copy);
        let sorts = self.resequence();
        Ok(Duplicated {
            block: self.blocks[idx + 1].clone(),
            sorts,
        })
    }

    /// Remove a block. Remaining sort values are left as they are.
    pub fn remove(&mut self, id: BlockId) -> DomainResult<Block> {
        let idx = self.index_of(id)?;
        Ok(self.blocks.remove(idx))
    }

    /// Set the navigation label and derive the anchor from it.
    ///
    /// The anchor is not checked against sibling anchors; use
    /// [`BlockList::anchor_conflicts`] or
    /// [`BlockList::set_unique_navigation_anchor`] to enforce uniqueness.
    pub fn set_navigation_anchor(&mut self, id: BlockId, label: &str) -> DomainResult<Block> {
        let idx = self.index_of(id)?;
        let anchor = derive_anchor(label, &self.blocks[idx]);
        let block = &mut self.blocks[idx];
        block.anchor_slug = anchor;
        block.navigation_label = non_blank(label);
        Ok(block.clone())
    }

    /// Like [`BlockList::set_navigation_anchor`], but suffixes the anchor
    /// (`-1`, `-2`, ...) until no sibling block uses it.
    pub fn set_unique_navigation_anchor(
        &mut self,
        id: BlockId,
        label: &str,
        max_attempts: usize,
    ) -> DomainResult<Block> {
        let idx = self.index_of(id)?;
        let anchor = match derive_anchor(label, &self.blocks[idx]) {
            Some(base) => {
                let taken = self.taken_anchors(Some(id));
                Some(unique_slug(&base, max_attempts, |c| taken.contains(c)).map_err(anchor_exhausted)?)
            }
            None => None,
        };
        let block = &mut self.blocks[idx];
        block.anchor_slug = anchor;
        block.navigation_label = non_blank(label);
        Ok(block.clone())
    }

    /// Whether any block other than `id` already uses `slug` as its anchor.
    pub fn anchor_conflicts(&self, id: BlockId, slug: &str) -> bool {
        self.blocks
            .iter()
            .any(|b| b.id != id && b.anchor() == Some(slug))
    }

    /// Anchors currently in use, optionally ignoring one block.
    pub fn taken_anchors(&self, except: Option<BlockId>) -> HashSet<String> {
        self.blocks
            .iter()
            .filter(|b| Some(b.id) != except)
            .filter_map(|b| b.anchor().map(str::to_string))
            .collect()
    }

    /// Blocks rendered on the public page, in display order.
    pub fn public_blocks(&self) -> impl Iterator<Item = &Block> {
        self.blocks.iter().filter(|b| b.visible)
    }

    /// Navigation entries for visible blocks that carry an anchor.
    pub fn navigation(&self) -> Vec<NavigationItem> {
        self.public_blocks()
            .filter_map(NavigationItem::for_block)
            .collect()
    }
}

fn non_blank(label: &str) -> Option<String> {
    let label = label.trim();
    (!label.is_empty()).then(|| label.to_string())
}

fn anchor_exhausted(err: SlugError) -> DomainError {
    DomainError::conflict(err.to_string())
}
