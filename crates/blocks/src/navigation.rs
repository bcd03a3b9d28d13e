//! In-page navigation derived from block anchors.

use serde::{Deserialize, Serialize};

use vitrine_core::{BlockId, slugify};

use crate::block::Block;

/// One entry of a page's navigation menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationItem {
    pub block_id: BlockId,
    pub label: String,
    pub anchor: String,
}

impl NavigationItem {
    /// Fragment link to the block (`#anchor`).
    pub fn href(&self) -> String {
        format!("#{}", self.anchor)
    }

    pub(crate) fn for_block(block: &Block) -> Option<Self> {
        let anchor = block.anchor()?;
        let label = block
            .navigation_label
            .as_deref()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .or_else(|| block.display_title())
            .unwrap_or_else(|| block.block_type().label());
        Some(Self {
            block_id: block.id,
            label: label.to_string(),
            anchor: anchor.to_string(),
        })
    }
}

/// Anchor slug for a navigation label.
///
/// Slugifies the label when it is non-blank, otherwise the block's display
/// title. Returns `None` when neither yields a slug.
pub fn derive_anchor(label: &str, block: &Block) -> Option<String> {
    let from_label = slugify(label);
    let slug = if from_label.is_empty() {
        block.display_title().map(slugify).unwrap_or_default()
    } else {
        from_label
    };
    (!slug.is_empty()).then_some(slug)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{BlockContent, BlockType, TextData};
    use vitrine_core::CatalogId;

    fn text_block(title: &str) -> Block {
        let mut block = Block::new(BlockId::new(), CatalogId::new(), BlockType::Text, 0);
        block.content = BlockContent::Text(TextData {
            title: title.to_string(),
            ..TextData::default()
        });
        block
    }

    #[test]
    fn label_wins_over_title() {
        let block = text_block("Nossa História");
        assert_eq!(derive_anchor("Quem Somos", &block).as_deref(), Some("quem-somos"));
    }

    #[test]
    fn blank_label_falls_back_to_title() {
        let block = text_block("Nossa História");
        assert_eq!(derive_anchor("   ", &block).as_deref(), Some("nossa-historia"));
    }

    #[test]
    fn nothing_to_slugify_yields_none() {
        let block = text_block("");
        assert_eq!(derive_anchor("", &block), None);
        assert_eq!(derive_anchor("!!!", &block), None);
    }

    #[test]
    fn item_needs_a_non_empty_anchor() {
        let mut block = text_block("Cardápio");
        assert_eq!(NavigationItem::for_block(&block), None);

        block.anchor_slug = Some("cardapio".to_string());
        let item = NavigationItem::for_block(&block).unwrap();
        assert_eq!(item.label, "Cardápio");
        assert_eq!(item.href(), "#cardapio");
    }
}
