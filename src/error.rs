//! Error types for the redocx library.

use std::io;
use thiserror::Error;

/// Result type alias for redocx operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during document reconstruction.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error while writing container bytes.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The container archive could not be written.
    #[error("container write error: {0}")]
    Container(#[from] zip::result::ZipError),

    /// The upstream parser failed to supply a page's content.
    ///
    /// Raised by [`PageSource::load_page`](crate::walker::PageSource::load_page)
    /// implementations; the orchestrator absorbs it per page.
    #[error("page {page} could not be loaded: {message}")]
    PageLoad {
        /// Zero-based page index
        page: usize,
        /// Upstream failure description
        message: String,
    },

    /// The conversion was cancelled by the progress callback.
    #[error("conversion cancelled after {pages_done} of {pages_total} pages")]
    Cancelled {
        /// Pages fully processed before cancellation
        pages_done: u32,
        /// Total pages in the document
        pages_total: u32,
    },

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Construct a page-load error for the given page index.
    pub fn page_load(page: usize, message: impl Into<String>) -> Self {
        Error::PageLoad {
            page,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::page_load(3, "truncated content stream");
        assert_eq!(
            err.to_string(),
            "page 3 could not be loaded: truncated content stream"
        );

        let err = Error::Cancelled {
            pages_done: 2,
            pages_total: 10,
        };
        assert_eq!(err.to_string(), "conversion cancelled after 2 of 10 pages");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
