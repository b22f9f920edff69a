//! # redocx
//!
//! Document reconstruction library for Rust.
//!
//! Given a parsed page's drawing instructions, this library recovers the
//! true position of every text run and image by interpreting the
//! stack-based graphics-transform language, merges fragmented glyph runs
//! back into paragraphs with geometric heuristics, and serializes the
//! result into a minimal, strictly valid word-processing container.
//!
//! The byte-level PDF parser is an external collaborator: it supplies
//! per-page operator lists, decoded text runs and an image resolver
//! through the [`PageSource`] trait. This crate is a pure function from
//! that input to package bytes, with an optional progress callback as its
//! only side channel.
//!
//! ## Quick Start
//!
//! ```no_run
//! use redocx::{to_docx, Matrix, PageContent, PageOp, PageSource, ResolvedImage, TextRunInput};
//!
//! /// Pages already decoded by the upstream parser.
//! struct ParsedPages(Vec<PageContent>);
//!
//! impl PageSource for ParsedPages {
//!     fn page_count(&self) -> usize {
//!         self.0.len()
//!     }
//!
//!     fn load_page(&mut self, index: usize) -> redocx::Result<PageContent> {
//!         Ok(self.0[index].clone())
//!     }
//!
//!     fn resolve_image(&mut self, _reference: &str) -> Option<ResolvedImage> {
//!         None
//!     }
//! }
//!
//! fn main() -> redocx::Result<()> {
//!     let page = PageContent::new(vec![PageOp::ShowText(TextRunInput {
//!         text: "Hello".to_string(),
//!         transform: Matrix::new(12.0, 0.0, 0.0, 12.0, 72.0, 700.0),
//!         width: 30.0,
//!         font_family: "Helvetica".to_string(),
//!     })]);
//!
//!     let bytes = to_docx(&mut ParsedPages(vec![page]))?;
//!     std::fs::write("hello.docx", bytes)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Pipeline
//!
//! - **Walk**: [`ContentStreamWalker`] interprets save/restore/transform
//!   operators and emits positioned [`ContentItem`]s
//! - **Reconstruct**: [`layout::reconstruct`] sorts items into reading
//!   order, merges adjacent runs and groups them into paragraph blocks
//! - **Assemble**: [`PackageAssembler`] emits the container parts and
//!   embedded media as one in-memory byte buffer
//!
//! Item- and page-level defects (unresolvable images, a page the parser
//! cannot decode) are absorbed locally and logged; the caller always gets
//! a structurally valid package for whatever pages were processable.

pub mod convert;
pub mod docx;
pub mod error;
pub mod layout;
pub mod model;
pub mod walker;

// Re-export commonly used types
pub use convert::{ConversionStats, ConvertOptions, ConvertResult, DocxConverter};
pub use docx::PackageAssembler;
pub use error::{Error, Result};
pub use model::{ContentBlock, ContentItem, DocMetadata, ImageItem, MediaResource, TextItem};
pub use walker::{
    ContentStreamWalker, GraphicsState, Matrix, PageContent, PageOp, PageSource, ResolvedImage,
    TextRunInput,
};

/// Convert all pages of a source into container bytes.
///
/// # Example
///
/// ```no_run
/// # use redocx::{PageContent, PageSource, ResolvedImage};
/// # struct ParsedPages(Vec<PageContent>);
/// # impl PageSource for ParsedPages {
/// #     fn page_count(&self) -> usize { self.0.len() }
/// #     fn load_page(&mut self, index: usize) -> redocx::Result<PageContent> {
/// #         Ok(self.0[index].clone())
/// #     }
/// #     fn resolve_image(&mut self, _r: &str) -> Option<ResolvedImage> { None }
/// # }
/// let mut source = ParsedPages(vec![]);
/// let bytes = redocx::to_docx(&mut source).unwrap();
/// std::fs::write("output.docx", bytes).unwrap();
/// ```
pub fn to_docx<S: PageSource>(source: &mut S) -> Result<Vec<u8>> {
    let result = DocxConverter::new().convert(source)?;
    Ok(result.bytes)
}

/// Convert with custom options.
pub fn to_docx_with_options<S: PageSource>(
    source: &mut S,
    options: ConvertOptions,
) -> Result<Vec<u8>> {
    let result = DocxConverter::with_options(options).convert(source)?;
    Ok(result.bytes)
}

/// Convert with custom options and a progress callback.
///
/// The callback receives `(pages_processed, pages_total)` after each page;
/// returning `false` cancels the conversion between pages.
pub fn to_docx_with_progress<S, F>(
    source: &mut S,
    options: ConvertOptions,
    progress: F,
) -> Result<ConvertResult>
where
    S: PageSource,
    F: FnMut(u32, u32) -> bool,
{
    DocxConverter::with_options(options).convert_with_progress(source, progress)
}

/// Builder for configuring and running conversions.
///
/// # Example
///
/// ```no_run
/// # use redocx::{PageContent, PageSource, ResolvedImage};
/// # struct ParsedPages(Vec<PageContent>);
/// # impl PageSource for ParsedPages {
/// #     fn page_count(&self) -> usize { self.0.len() }
/// #     fn load_page(&mut self, index: usize) -> redocx::Result<PageContent> {
/// #         Ok(self.0[index].clone())
/// #     }
/// #     fn resolve_image(&mut self, _r: &str) -> Option<ResolvedImage> { None }
/// # }
/// use redocx::Redocx;
///
/// let mut source = ParsedPages(vec![]);
/// let result = Redocx::new()
///     .with_title("Reconstructed Document")
///     .with_author("docs pipeline")
///     .convert(&mut source)?;
/// println!("{} blocks", result.stats.blocks);
/// # Ok::<(), redocx::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Redocx {
    options: ConvertOptions,
}

impl Redocx {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the document title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.options = self.options.with_title(title);
        self
    }

    /// Set the document author.
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.options = self.options.with_author(author);
        self
    }

    /// Set the full document metadata.
    pub fn with_metadata(mut self, metadata: DocMetadata) -> Self {
        self.options = self.options.with_metadata(metadata);
        self
    }

    /// Run the conversion.
    pub fn convert<S: PageSource>(&self, source: &mut S) -> Result<ConvertResult> {
        DocxConverter::with_options(self.options.clone()).convert(source)
    }

    /// Run the conversion with a progress callback.
    pub fn convert_with_progress<S, F>(&self, source: &mut S, progress: F) -> Result<ConvertResult>
    where
        S: PageSource,
        F: FnMut(u32, u32) -> bool,
    {
        DocxConverter::with_options(self.options.clone()).convert_with_progress(source, progress)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_options() {
        let builder = Redocx::new()
            .with_title("Title")
            .with_author("Author");

        assert_eq!(builder.options.metadata.title.as_deref(), Some("Title"));
        assert_eq!(builder.options.metadata.author.as_deref(), Some("Author"));
    }

    #[test]
    fn test_builder_metadata_override() {
        let metadata = DocMetadata::new().with_title("From metadata");
        let builder = Redocx::new().with_metadata(metadata);
        assert_eq!(
            builder.options.metadata.title.as_deref(),
            Some("From metadata")
        );
    }
}
