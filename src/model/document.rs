//! Document-level metadata for the output container.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metadata written into the container's core-properties part.
///
/// All fields are optional; an empty metadata set still produces a valid
/// core-properties part.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocMetadata {
    /// Document title
    pub title: Option<String>,

    /// Document author
    pub author: Option<String>,

    /// Creation timestamp
    pub created: Option<DateTime<Utc>>,

    /// Last modification timestamp
    pub modified: Option<DateTime<Utc>>,
}

impl DocMetadata {
    /// Create empty metadata.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the document title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the document author.
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Set the creation timestamp.
    pub fn with_created(mut self, created: DateTime<Utc>) -> Self {
        self.created = Some(created);
        self
    }

    /// Set the modification timestamp.
    pub fn with_modified(mut self, modified: DateTime<Utc>) -> Self {
        self.modified = Some(modified);
        self
    }

    /// Check if any field is set.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.author.is_none()
            && self.created.is_none()
            && self.modified.is_none()
    }
}
