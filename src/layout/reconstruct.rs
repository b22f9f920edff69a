//! Geometric heuristics for rebuilding paragraphs from fragmented runs.
//!
//! The upstream extraction yields glyph runs in stream order, which rarely
//! matches reading order, and splits visually continuous text into many
//! small runs. Reconstruction is a deterministic three-step fold over the
//! whole document's items: sort into reading order, merge adjacent
//! compatible runs, then group into paragraph blocks by vertical band.
//!
//! The three tolerances below are tuned independently for three different
//! decisions; they are intentionally not unified.

use std::cmp::Ordering;

use crate::model::{ContentBlock, ContentItem, TextItem};

/// Items whose Y coordinates differ by at most this much sort as the same
/// row (tie-broken left to right).
pub const SAME_ROW_TOLERANCE: f32 = 5.0;

/// Maximum baseline difference for two adjacent text runs to merge.
pub const MERGE_BASELINE_TOLERANCE: f32 = 4.0;

/// Maximum font-size difference for two adjacent text runs to merge.
pub const MERGE_SIZE_TOLERANCE: f32 = 2.0;

/// A new paragraph block starts when an item lands more than this far from
/// the block's anchor Y.
pub const PARAGRAPH_BAND: f32 = 10.0;

/// A space is inserted between merged runs when the horizontal gap exceeds
/// this fraction of the left run's font size.
pub const SPACE_GAP_FACTOR: f32 = 0.2;

/// Rebuild document-order paragraph blocks from raw items.
///
/// The items must already be concatenated across all pages in page order;
/// reconstruction runs once over the whole document.
pub fn reconstruct(items: Vec<ContentItem>) -> Vec<ContentBlock> {
    let sorted = sort_reading_order(items);
    let merged = merge_adjacent_runs(sorted);
    group_into_blocks(merged)
}

/// Sort items into reading order: top of page first (descending Y, with Y
/// growing upward), left to right within a row.
///
/// The sort is stable, so items the comparator considers equal keep their
/// page/stream order.
pub fn sort_reading_order(mut items: Vec<ContentItem>) -> Vec<ContentItem> {
    items.sort_by(|a, b| {
        if (a.y() - b.y()).abs() <= SAME_ROW_TOLERANCE {
            a.x().partial_cmp(&b.x()).unwrap_or(Ordering::Equal)
        } else {
            b.y().partial_cmp(&a.y()).unwrap_or(Ordering::Equal)
        }
    });
    items
}

/// Merge adjacent compatible text runs into longer runs.
///
/// Two adjacent text items merge when their baselines sit within
/// [`MERGE_BASELINE_TOLERANCE`], their sizes within
/// [`MERGE_SIZE_TOLERANCE`], and their bold/italic flags agree. Images and
/// incompatible runs flush the running item. Re-applying this pass to its
/// own output is a no-op.
pub fn merge_adjacent_runs(items: Vec<ContentItem>) -> Vec<ContentItem> {
    let mut merged = Vec::with_capacity(items.len());
    let mut running: Option<TextItem> = None;

    for item in items {
        match item {
            ContentItem::Text(next) => {
                running = Some(match running.take() {
                    Some(mut current) if can_merge(&current, &next) => {
                        merge_into(&mut current, next);
                        current
                    }
                    Some(current) => {
                        merged.push(ContentItem::Text(current));
                        next
                    }
                    None => next,
                });
            }
            ContentItem::Image(image) => {
                if let Some(current) = running.take() {
                    merged.push(ContentItem::Text(current));
                }
                merged.push(ContentItem::Image(image));
            }
        }
    }
    if let Some(current) = running {
        merged.push(ContentItem::Text(current));
    }

    merged
}

fn can_merge(current: &TextItem, next: &TextItem) -> bool {
    (current.y - next.y).abs() < MERGE_BASELINE_TOLERANCE
        && current.style_matches(next, MERGE_SIZE_TOLERANCE)
}

/// Append `next` to `current`, inserting a single space when the
/// horizontal gap says the runs are separate words.
///
/// The gap comparison is strict: a gap of exactly
/// `SPACE_GAP_FACTOR * font_size` does not get a space. The gap is folded
/// into the width either way, so the merged right edge stays at `next`'s
/// right edge.
fn merge_into(current: &mut TextItem, next: TextItem) {
    let gap = next.x - current.right();
    let wants_space = gap > SPACE_GAP_FACTOR * current.font_size;
    if wants_space && !current.ends_with_space() && !next.starts_with_space() {
        current.text.push(' ');
    }
    current.text.push_str(&next.text);
    current.width += gap + next.width;
}

/// Group merged items into paragraph blocks.
///
/// A block is opened by its first item and anchored at that item's Y; any
/// later item farther than [`PARAGRAPH_BAND`] from the anchor opens a new
/// block. Because the input is sorted by descending Y, all members of a
/// block lie within the band below the anchor, which makes the break
/// decision independent of intermediate items.
fn group_into_blocks(items: Vec<ContentItem>) -> Vec<ContentBlock> {
    let mut blocks = Vec::new();
    let mut current: Option<ContentBlock> = None;

    for item in items {
        current = Some(match current.take() {
            Some(mut block) if (item.y() - block.anchor_y).abs() <= PARAGRAPH_BAND => {
                block.push(item);
                block
            }
            Some(block) => {
                blocks.push(block);
                ContentBlock::open(item)
            }
            None => ContentBlock::open(item),
        });
    }
    if let Some(block) = current {
        blocks.push(block);
    }

    blocks
}
