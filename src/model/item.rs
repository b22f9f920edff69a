//! Positioned content items produced by the page walk.

use serde::{Deserialize, Serialize};

/// A positioned piece of page content.
///
/// Items are emitted by the content-stream walk with positions in the
/// page's original coordinate space (Y grows upward) and consumed
/// immutably by layout reconstruction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentItem {
    /// A text run with baseline position and inferred styling
    Text(TextItem),

    /// A placed raster image
    Image(ImageItem),
}

impl ContentItem {
    /// X coordinate of the item (left edge / baseline start).
    pub fn x(&self) -> f32 {
        match self {
            ContentItem::Text(t) => t.x,
            ContentItem::Image(i) => i.x,
        }
    }

    /// Y coordinate of the item (text baseline / image origin).
    pub fn y(&self) -> f32 {
        match self {
            ContentItem::Text(t) => t.y,
            ContentItem::Image(i) => i.y,
        }
    }

    /// Check if this is a text item.
    pub fn is_text(&self) -> bool {
        matches!(self, ContentItem::Text(_))
    }
}

/// A text run positioned on the page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextItem {
    /// The decoded text content; never empty or whitespace-only once emitted
    pub text: String,

    /// Baseline X position in points
    pub x: f32,

    /// Baseline Y position in points
    pub y: f32,

    /// Advance width in points
    pub width: f32,

    /// Estimated font size in points
    pub font_size: f32,

    /// Whether the resolved font family looks bold
    pub bold: bool,

    /// Whether the resolved font family looks italic
    pub italic: bool,
}

impl TextItem {
    /// Right edge of the run (`x + width`).
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Check if the run starts with boundary whitespace.
    pub fn starts_with_space(&self) -> bool {
        self.text.starts_with(' ') || self.text.starts_with('\u{00A0}')
    }

    /// Check if the run ends with boundary whitespace.
    pub fn ends_with_space(&self) -> bool {
        self.text.ends_with(' ') || self.text.ends_with('\u{00A0}')
    }

    /// Check if another run carries the same styling (size band, bold,
    /// italic) for merge purposes. The baseline test lives in the layout
    /// module next to its sibling tolerances.
    pub fn style_matches(&self, other: &TextItem, size_tolerance: f32) -> bool {
        (self.font_size - other.font_size).abs() < size_tolerance
            && self.bold == other.bold
            && self.italic == other.italic
    }
}

/// A raster image placed on the page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageItem {
    /// Raw encoded pixel data as delivered by the upstream resolver
    pub data: Vec<u8>,

    /// X position of the placement origin in points
    pub x: f32,

    /// Y position of the placement origin in points
    pub y: f32,

    /// Placed width in points
    pub width: f32,

    /// Placed height in points
    pub height: f32,

    /// File extension of the source encoding (e.g. "png", "jpg")
    pub extension: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(text: &str, x: f32) -> TextItem {
        TextItem {
            text: text.to_string(),
            x,
            y: 700.0,
            width: 40.0,
            font_size: 12.0,
            bold: false,
            italic: false,
        }
    }

    #[test]
    fn test_right_edge() {
        let t = text("Hello", 50.0);
        assert!((t.right() - 90.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_boundary_whitespace() {
        assert!(text(" World", 0.0).starts_with_space());
        assert!(text("Hello ", 0.0).ends_with_space());
        assert!(text("Hello\u{00A0}", 0.0).ends_with_space());
        assert!(!text("Hello", 0.0).ends_with_space());
    }

    #[test]
    fn test_style_matches() {
        let a = text("a", 0.0);
        let mut b = text("b", 50.0);
        assert!(a.style_matches(&b, 2.0));

        b.font_size = 14.5;
        assert!(!a.style_matches(&b, 2.0));

        b.font_size = 12.0;
        b.bold = true;
        assert!(!a.style_matches(&b, 2.0));
    }

    #[test]
    fn test_item_accessors() {
        let item = ContentItem::Text(text("x", 10.0));
        assert!(item.is_text());
        assert_eq!(item.x(), 10.0);
        assert_eq!(item.y(), 700.0);
    }
}
