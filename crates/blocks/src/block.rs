use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use vitrine_core::{BlockId, CatalogId, DomainError, Entity};

use crate::content::{BlockContent, BlockType};

/// One unit of content on a page.
///
/// `sort` orders blocks inside their catalog; values are unique per catalog and
/// may have gaps. Hidden blocks (`visible == false`) stay in storage and in
/// reorder operations but are left out of public rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub id: BlockId,
    pub catalog_id: CatalogId,
    pub content: BlockContent,
    pub sort: i64,
    pub visible: bool,
    pub navigation_label: Option<String>,
    pub anchor_slug: Option<String>,
}

impl Block {
    /// A visible block with the kind's default content and no anchor.
    pub fn new(id: BlockId, catalog_id: CatalogId, block_type: BlockType, sort: i64) -> Self {
        Self {
            id,
            catalog_id,
            content: BlockContent::default_for(block_type),
            sort,
            visible: true,
            navigation_label: None,
            anchor_slug: None,
        }
    }

    pub fn block_type(&self) -> BlockType {
        self.content.block_type()
    }

    pub fn display_title(&self) -> Option<&str> {
        self.content.display_title()
    }

    /// Anchor slug, treating the empty string as absent.
    pub fn anchor(&self) -> Option<&str> {
        self.anchor_slug.as_deref().filter(|s| !s.is_empty())
    }
}

impl Entity for Block {
    type Id = BlockId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Persisted shape of a block (`catalog_blocks` row).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockRecord {
    pub id: BlockId,
    pub catalog_id: CatalogId,
    #[serde(rename = "type")]
    pub block_type: BlockType,
    pub data: JsonValue,
    pub sort: i64,
    pub visible: bool,
    pub navigation_label: Option<String>,
    pub anchor_slug: Option<String>,
}

impl From<&Block> for BlockRecord {
    fn from(block: &Block) -> Self {
        Self {
            id: block.id,
            catalog_id: block.catalog_id,
            block_type: block.block_type(),
            data: block.content.to_data(),
            sort: block.sort,
            visible: block.visible,
            navigation_label: block.navigation_label.clone(),
            anchor_slug: block.anchor_slug.clone(),
        }
    }
}

impl TryFrom<BlockRecord> for Block {
    type Error = DomainError;

    fn try_from(record: BlockRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            id: record.id,
            catalog_id: record.catalog_id,
            content: BlockContent::from_parts(record.block_type, record.data)?,
            sort: record.sort,
            visible: record.visible,
            navigation_label: record.navigation_label,
            anchor_slug: record.anchor_slug,
        })
    }
}
