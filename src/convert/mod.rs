//! Conversion orchestration.
//!
//! Drives the pipeline end to end: walk each page in order, reconstruct
//! the accumulated items into blocks once, assemble the container once.
//! Pages are strictly sequential: resource-id allocation is a single
//! monotonic counter and paragraph order must reflect page order, so there
//! is nothing to gain from interleaving pages.

use crate::docx::PackageAssembler;
use crate::error::{Error, Result};
use crate::layout;
use crate::model::{ContentItem, DocMetadata};
use crate::walker::{ContentStreamWalker, PageSource};

/// Options for document conversion.
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Metadata written into the container's core-properties part
    pub metadata: DocMetadata,
}

impl ConvertOptions {
    /// Create new conversion options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the document metadata.
    pub fn with_metadata(mut self, metadata: DocMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Set the document title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.metadata.title = Some(title.into());
        self
    }

    /// Set the document author.
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.metadata.author = Some(author.into());
        self
    }
}

/// Statistics collected during a conversion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConversionStats {
    /// Total number of pages in the source document
    pub pages_total: u32,

    /// Pages walked successfully
    pub pages_converted: u32,

    /// Pages dropped because the upstream parser could not supply them
    pub pages_failed: u32,

    /// Text items emitted by the walks
    pub text_items: u32,

    /// Image items emitted by the walks
    pub image_items: u32,

    /// Image operators skipped (unresolvable or degenerate)
    pub images_skipped: u32,

    /// Paragraph blocks in the assembled document
    pub blocks: u32,
}

/// Result of a conversion: container bytes plus statistics.
#[derive(Debug, Clone)]
pub struct ConvertResult {
    /// The assembled package
    pub bytes: Vec<u8>,

    /// Conversion statistics
    pub stats: ConversionStats,
}

/// Orchestrates page walks, layout reconstruction and package assembly.
#[derive(Debug, Clone, Default)]
pub struct DocxConverter {
    options: ConvertOptions,
}

impl DocxConverter {
    /// Create a converter with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a converter with the given options.
    pub fn with_options(options: ConvertOptions) -> Self {
        Self { options }
    }

    /// Convert all pages of a source into container bytes.
    pub fn convert<S: PageSource>(&self, source: &mut S) -> Result<ConvertResult> {
        self.convert_with_progress(source, |_, _| true)
    }

    /// Convert with a progress callback.
    ///
    /// The callback fires synchronously after each page completes with
    /// `(pages_processed, pages_total)`. Returning `false` cancels the
    /// conversion at the next page boundary; a page is an atomic unit of
    /// work and is never abandoned mid-walk.
    pub fn convert_with_progress<S, F>(
        &self,
        source: &mut S,
        mut progress: F,
    ) -> Result<ConvertResult>
    where
        S: PageSource,
        F: FnMut(u32, u32) -> bool,
    {
        let pages_total = source.page_count() as u32;
        let mut stats = ConversionStats {
            pages_total,
            ..Default::default()
        };
        let mut items: Vec<ContentItem> = Vec::new();

        for index in 0..source.page_count() {
            match source.load_page(index) {
                Ok(page) => {
                    let mut walker = ContentStreamWalker::new();
                    let page_items =
                        walker.walk(&page, &mut |reference| source.resolve_image(reference));
                    stats.images_skipped += walker.images_skipped();
                    for item in &page_items {
                        if item.is_text() {
                            stats.text_items += 1;
                        } else {
                            stats.image_items += 1;
                        }
                    }
                    items.extend(page_items);
                    stats.pages_converted += 1;
                }
                Err(err) => {
                    // One bad page never aborts the document.
                    log::warn!("dropping page {index}: {err}");
                    stats.pages_failed += 1;
                }
            }

            let pages_done = stats.pages_converted + stats.pages_failed;
            if !progress(pages_done, pages_total) {
                return Err(Error::Cancelled {
                    pages_done,
                    pages_total,
                });
            }
        }

        let blocks = layout::reconstruct(items);
        stats.blocks = blocks.len() as u32;

        let bytes = PackageAssembler::new().assemble(blocks, &self.options.metadata)?;
        Ok(ConvertResult { bytes, stats })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::walker::{Matrix, PageContent, PageOp, ResolvedImage, TextRunInput};

    struct FakeSource {
        pages: Vec<Result<PageContent>>,
    }

    impl PageSource for FakeSource {
        fn page_count(&self) -> usize {
            self.pages.len()
        }

        fn load_page(&mut self, index: usize) -> Result<PageContent> {
            match &self.pages[index] {
                Ok(page) => Ok(page.clone()),
                Err(_) => Err(Error::page_load(index, "decode failure")),
            }
        }

        fn resolve_image(&mut self, _reference: &str) -> Option<ResolvedImage> {
            None
        }
    }

    fn text_page(text: &str, y: f32) -> PageContent {
        PageContent::new(vec![PageOp::ShowText(TextRunInput {
            text: text.to_string(),
            transform: Matrix::new(12.0, 0.0, 0.0, 12.0, 72.0, y),
            width: 60.0,
            font_family: "Helvetica".to_string(),
        })])
    }

    #[test]
    fn test_convert_counts_pages() {
        let mut source = FakeSource {
            pages: vec![Ok(text_page("one", 700.0)), Ok(text_page("two", 700.0))],
        };
        let result = DocxConverter::new().convert(&mut source).unwrap();

        assert_eq!(result.stats.pages_total, 2);
        assert_eq!(result.stats.pages_converted, 2);
        assert_eq!(result.stats.pages_failed, 0);
        assert_eq!(result.stats.text_items, 2);
        assert!(!result.bytes.is_empty());
    }

    #[test]
    fn test_failed_page_is_dropped_not_fatal() {
        let mut source = FakeSource {
            pages: vec![
                Ok(text_page("kept", 700.0)),
                Err(Error::Other("placeholder".to_string())),
                Ok(text_page("also kept", 100.0)),
            ],
        };
        let result = DocxConverter::new().convert(&mut source).unwrap();

        assert_eq!(result.stats.pages_converted, 2);
        assert_eq!(result.stats.pages_failed, 1);
        assert_eq!(result.stats.blocks, 2);
    }

    #[test]
    fn test_progress_fires_per_page() {
        let mut source = FakeSource {
            pages: vec![Ok(text_page("a", 700.0)), Ok(text_page("b", 100.0))],
        };
        let mut calls = Vec::new();
        DocxConverter::new()
            .convert_with_progress(&mut source, |done, total| {
                calls.push((done, total));
                true
            })
            .unwrap();

        assert_eq!(calls, vec![(1, 2), (2, 2)]);
    }

    #[test]
    fn test_cancellation_between_pages() {
        let mut source = FakeSource {
            pages: vec![Ok(text_page("a", 700.0)), Ok(text_page("b", 100.0))],
        };
        let err = DocxConverter::new()
            .convert_with_progress(&mut source, |done, _| done < 1)
            .unwrap_err();

        assert!(matches!(
            err,
            Error::Cancelled {
                pages_done: 1,
                pages_total: 2
            }
        ));
    }

    #[test]
    fn test_empty_source_yields_valid_package() {
        let mut source = FakeSource { pages: vec![] };
        let result = DocxConverter::new().convert(&mut source).unwrap();
        assert_eq!(result.stats.blocks, 0);
        assert!(!result.bytes.is_empty());
    }
}
