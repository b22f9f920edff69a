//! Input boundary types supplied by the upstream page parser.
//!
//! The byte-level PDF parser is an external collaborator: it decodes each
//! page into an operator list, decodes text runs (including their own
//! transforms and resolved font metadata), and resolves image-object
//! references to raw pixel data. Everything in this module is the shape of
//! that hand-off; pages typically arrive from the host application as
//! serialized structured data.

use serde::{Deserialize, Serialize};

use super::Matrix;
use crate::error::Result;

/// One page's decoded drawing instructions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageContent {
    /// Operators in stream order
    pub ops: Vec<PageOp>,
}

impl PageContent {
    /// Create page content from an operator list.
    pub fn new(ops: Vec<PageOp>) -> Self {
        Self { ops }
    }

    /// Check if the page carries no operators.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

/// A single drawing instruction.
///
/// The set is closed: the upstream parser normalizes the raw operator
/// stream to exactly these variants, so interpretation is an exhaustive
/// match rather than string dispatch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum PageOp {
    /// Save the current graphics state
    Save,

    /// Restore the most recently saved graphics state
    Restore,

    /// Concatenate a transform onto the current matrix
    Transform(Matrix),

    /// Show a decoded text run positioned by its own transform
    ShowText(TextRunInput),

    /// Draw the image object behind the given resource reference
    DrawImage {
        /// Resource name the image resolver understands
        reference: String,
    },
}

/// A decoded text run as delivered by the upstream parser.
///
/// Runs come with their own baked transform; the page-level matrix is not
/// applied to them again.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextRunInput {
    /// Decoded text content
    pub text: String,

    /// The run's own transform; the baseline sits at its translation
    pub transform: Matrix,

    /// Advance width in points
    pub width: f32,

    /// Resolved font family name (e.g. "Helvetica-Bold")
    pub font_family: String,
}

/// Raw pixel data behind an image reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvedImage {
    /// Encoded image bytes
    pub data: Vec<u8>,

    /// Intrinsic width in pixels
    pub pixel_width: u32,

    /// Intrinsic height in pixels
    pub pixel_height: u32,

    /// File extension of the encoding, when known
    pub extension: Option<String>,
}

impl ResolvedImage {
    /// Check if the image is unusable (no bytes or a zero dimension).
    pub fn is_degenerate(&self) -> bool {
        self.data.is_empty() || self.pixel_width == 0 || self.pixel_height == 0
    }
}

/// The upstream parser's view of a document.
///
/// Implementations supply decoded page content on demand and resolve
/// image references to pixel data. Resolution may block (rasterization,
/// decompression); the walk does not proceed past an image operator until
/// its bytes are available or the image is abandoned.
pub trait PageSource {
    /// Total number of pages in the document.
    fn page_count(&self) -> usize;

    /// Load the decoded operator list for a page (zero-based index).
    ///
    /// An `Err` here drops the page from the output; the conversion
    /// continues with the next page.
    fn load_page(&mut self, index: usize) -> Result<PageContent>;

    /// Resolve an image reference to raw pixel data.
    ///
    /// `None` (unresolvable, rasterization failed) skips that image only.
    fn resolve_image(&mut self, reference: &str) -> Option<ResolvedImage>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degenerate_images() {
        let img = ResolvedImage {
            data: vec![0xFF],
            pixel_width: 4,
            pixel_height: 4,
            extension: Some("png".to_string()),
        };
        assert!(!img.is_degenerate());

        let empty = ResolvedImage {
            data: vec![],
            pixel_width: 4,
            pixel_height: 4,
            extension: None,
        };
        assert!(empty.is_degenerate());

        let flat = ResolvedImage {
            data: vec![0xFF],
            pixel_width: 4,
            pixel_height: 0,
            extension: None,
        };
        assert!(flat.is_degenerate());
    }

    #[test]
    fn test_page_op_serde_round_trip() {
        let page = PageContent::new(vec![
            PageOp::Save,
            PageOp::Transform(Matrix::new(1.0, 0.0, 0.0, 1.0, 72.0, 720.0)),
            PageOp::ShowText(TextRunInput {
                text: "Hello".to_string(),
                transform: Matrix::new(12.0, 0.0, 0.0, 12.0, 72.0, 720.0),
                width: 30.0,
                font_family: "Helvetica".to_string(),
            }),
            PageOp::DrawImage {
                reference: "Im1".to_string(),
            },
            PageOp::Restore,
        ]);

        let json = serde_json::to_string(&page).unwrap();
        let back: PageContent = serde_json::from_str(&json).unwrap();
        assert_eq!(back.ops.len(), 5);
        assert!(matches!(back.ops[0], PageOp::Save));
        assert!(matches!(back.ops[4], PageOp::Restore));
    }
}
