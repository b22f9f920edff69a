//! Paragraph-level content blocks.

use serde::{Deserialize, Serialize};

use super::ContentItem;

/// A reconstructed paragraph: an ordered sequence of merged runs sharing a
/// vertical band.
///
/// Blocks are produced once per document by layout reconstruction and
/// consumed once by the container assembler. The anchor Y is the Y of the
/// item that opened the block; membership of later items is decided
/// against it and it is never updated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentBlock {
    /// Merged runs in reading order
    pub runs: Vec<ContentItem>,

    /// Y coordinate the block was opened at
    pub anchor_y: f32,
}

impl ContentBlock {
    /// Open a new block anchored at the first item's Y.
    pub fn open(first: ContentItem) -> Self {
        let anchor_y = first.y();
        Self {
            runs: vec![first],
            anchor_y,
        }
    }

    /// Append an item to the block.
    pub fn push(&mut self, item: ContentItem) {
        self.runs.push(item);
    }

    /// Get the concatenated text of all text runs.
    pub fn plain_text(&self) -> String {
        self.runs
            .iter()
            .filter_map(|run| match run {
                ContentItem::Text(t) => Some(t.text.as_str()),
                ContentItem::Image(_) => None,
            })
            .collect()
    }

    /// Check if the block holds no runs.
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }
}
