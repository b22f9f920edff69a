//! Content-stream interpretation: operators in, positioned items out.

use crate::model::{ContentItem, ImageItem, TextItem};

use super::{GraphicsState, PageContent, PageOp, ResolvedImage, TextRunInput};

/// Fallback extension when the resolver does not know the encoding.
const DEFAULT_IMAGE_EXTENSION: &str = "png";

/// Interprets one page's operator list into positioned content items.
///
/// A walker carries the page's graphics state and is used for exactly one
/// page; create a fresh one per page. Individual bad instructions
/// (unresolvable images, blank text) are skipped and logged; a single
/// defect never aborts the page.
#[derive(Debug)]
pub struct ContentStreamWalker {
    state: GraphicsState,
    images_skipped: u32,
}

impl ContentStreamWalker {
    /// Create a walker with a fresh graphics state.
    pub fn new() -> Self {
        Self {
            state: GraphicsState::new(),
            images_skipped: 0,
        }
    }

    /// Number of image operators skipped during the walk.
    pub fn images_skipped(&self) -> u32 {
        self.images_skipped
    }

    /// Walk a page's operators, resolving image references through the
    /// given callback, and return the emitted items in stream order.
    pub fn walk<R>(&mut self, page: &PageContent, resolve: &mut R) -> Vec<ContentItem>
    where
        R: FnMut(&str) -> Option<ResolvedImage>,
    {
        let mut items = Vec::new();

        for op in &page.ops {
            match op {
                PageOp::Save => self.state.save(),
                PageOp::Restore => self.state.restore(),
                PageOp::Transform(matrix) => self.state.apply(matrix),
                PageOp::ShowText(run) => {
                    if let Some(item) = text_item(run) {
                        items.push(ContentItem::Text(item));
                    }
                }
                PageOp::DrawImage { reference } => match self.image_item(reference, resolve) {
                    Some(item) => items.push(ContentItem::Image(item)),
                    None => self.images_skipped += 1,
                },
            }
        }

        items
    }

    fn image_item<R>(&self, reference: &str, resolve: &mut R) -> Option<ImageItem>
    where
        R: FnMut(&str) -> Option<ResolvedImage>,
    {
        let Some(image) = resolve(reference) else {
            log::warn!("image '{reference}' could not be resolved, skipping");
            return None;
        };
        if image.is_degenerate() {
            log::debug!("image '{reference}' is empty or zero-sized, skipping");
            return None;
        }

        // The current matrix maps the unit placement square to the drawn
        // rectangle, so the basis-vector magnitudes are the placed extents
        // in points.
        let matrix = self.state.matrix();
        let (x, y) = matrix.translation();
        Some(ImageItem {
            data: image.data,
            x,
            y,
            width: matrix.horizontal_scale(),
            height: matrix.vertical_scale(),
            extension: image
                .extension
                .unwrap_or_else(|| DEFAULT_IMAGE_EXTENSION.to_string()),
        })
    }
}

impl Default for ContentStreamWalker {
    fn default() -> Self {
        Self::new()
    }
}

/// Build a text item from a decoded run, or `None` for blank runs.
///
/// The run's own transform positions it: the baseline sits at the
/// translation and the font size is estimated from the vertical basis
/// vector. Bold/italic come from the resolved family name.
fn text_item(run: &TextRunInput) -> Option<TextItem> {
    if run.text.trim().is_empty() {
        log::debug!("dropping blank text run");
        return None;
    }

    let (x, y) = run.transform.translation();
    let (bold, italic) = infer_font_style(&run.font_family);
    Some(TextItem {
        text: run.text.clone(),
        x,
        y,
        width: run.width,
        font_size: run.transform.vertical_scale(),
        bold,
        italic,
    })
}

/// Infer bold/italic flags from a font family name.
fn infer_font_style(family: &str) -> (bool, bool) {
    let lower = family.to_lowercase();
    let bold = lower.contains("bold") || lower.contains("black") || lower.contains("heavy");
    let italic = lower.contains("italic") || lower.contains("oblique");
    (bold, italic)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::walker::Matrix;

    fn show_text(text: &str, size: f32, x: f32, y: f32, family: &str) -> PageOp {
        PageOp::ShowText(TextRunInput {
            text: text.to_string(),
            transform: Matrix::new(size, 0.0, 0.0, size, x, y),
            width: text.len() as f32 * size * 0.5,
            font_family: family.to_string(),
        })
    }

    fn no_images(_: &str) -> Option<ResolvedImage> {
        None
    }

    #[test]
    fn test_text_position_and_size() {
        let page = PageContent::new(vec![show_text("Hello", 12.0, 50.0, 700.0, "Helvetica")]);
        let items = ContentStreamWalker::new().walk(&page, &mut no_images);

        assert_eq!(items.len(), 1);
        let ContentItem::Text(t) = &items[0] else {
            panic!("expected text item");
        };
        assert_eq!(t.text, "Hello");
        assert_eq!(t.x, 50.0);
        assert_eq!(t.y, 700.0);
        assert!((t.font_size - 12.0).abs() < 1e-4);
        assert!(!t.bold);
        assert!(!t.italic);
    }

    #[test]
    fn test_font_style_inference() {
        assert_eq!(infer_font_style("Helvetica-Bold"), (true, false));
        assert_eq!(infer_font_style("Times-BoldItalic"), (true, true));
        assert_eq!(infer_font_style("Courier-Oblique"), (false, true));
        assert_eq!(infer_font_style("ArialBlack"), (true, false));
        assert_eq!(infer_font_style("Georgia"), (false, false));
    }

    #[test]
    fn test_blank_text_is_dropped() {
        let page = PageContent::new(vec![
            show_text("   ", 12.0, 0.0, 0.0, "Helvetica"),
            show_text("", 12.0, 0.0, 0.0, "Helvetica"),
        ]);
        let items = ContentStreamWalker::new().walk(&page, &mut no_images);
        assert!(items.is_empty());
    }

    #[test]
    fn test_unresolved_image_is_skipped() {
        let page = PageContent::new(vec![PageOp::DrawImage {
            reference: "Im1".to_string(),
        }]);
        let mut walker = ContentStreamWalker::new();
        let items = walker.walk(&page, &mut no_images);
        assert!(items.is_empty());
        assert_eq!(walker.images_skipped(), 1);
    }

    #[test]
    fn test_zero_sized_image_is_skipped() {
        let page = PageContent::new(vec![PageOp::DrawImage {
            reference: "Im1".to_string(),
        }]);
        let mut resolve = |_: &str| {
            Some(ResolvedImage {
                data: vec![0xFF],
                pixel_width: 0,
                pixel_height: 8,
                extension: None,
            })
        };
        let mut walker = ContentStreamWalker::new();
        let items = walker.walk(&page, &mut resolve);
        assert!(items.is_empty());
        assert_eq!(walker.images_skipped(), 1);
    }

    #[test]
    fn test_image_placement_from_current_matrix() {
        // Scale 100x50 at (72, 400): the image covers a 100x50pt rectangle.
        let page = PageContent::new(vec![
            PageOp::Save,
            PageOp::Transform(Matrix::new(100.0, 0.0, 0.0, 50.0, 72.0, 400.0)),
            PageOp::DrawImage {
                reference: "Im1".to_string(),
            },
            PageOp::Restore,
        ]);
        let mut resolve = |_: &str| {
            Some(ResolvedImage {
                data: vec![0x89, 0x50, 0x4E, 0x47],
                pixel_width: 200,
                pixel_height: 100,
                extension: Some("png".to_string()),
            })
        };
        let items = ContentStreamWalker::new().walk(&page, &mut resolve);

        assert_eq!(items.len(), 1);
        let ContentItem::Image(img) = &items[0] else {
            panic!("expected image item");
        };
        assert_eq!((img.x, img.y), (72.0, 400.0));
        assert!((img.width - 100.0).abs() < 1e-4);
        assert!((img.height - 50.0).abs() < 1e-4);
        assert_eq!(img.extension, "png");
    }

    #[test]
    fn test_restore_reverts_image_placement() {
        let page = PageContent::new(vec![
            PageOp::Save,
            PageOp::Transform(Matrix::new(1.0, 0.0, 0.0, 1.0, 500.0, 500.0)),
            PageOp::Restore,
            PageOp::Transform(Matrix::new(80.0, 0.0, 0.0, 40.0, 10.0, 20.0)),
            PageOp::DrawImage {
                reference: "Im1".to_string(),
            },
        ]);
        let mut resolve = |_: &str| {
            Some(ResolvedImage {
                data: vec![1],
                pixel_width: 1,
                pixel_height: 1,
                extension: None,
            })
        };
        let items = ContentStreamWalker::new().walk(&page, &mut resolve);

        let ContentItem::Image(img) = &items[0] else {
            panic!("expected image item");
        };
        // The save/restore pair cancels the first translation entirely.
        assert_eq!((img.x, img.y), (10.0, 20.0));
        assert_eq!(img.extension, "png");
    }
}
