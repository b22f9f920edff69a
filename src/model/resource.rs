//! Media resources embedded in the output container.

use serde::{Deserialize, Serialize};

/// An embedded media resource with a stable relationship id.
///
/// Resources are allocated by the container assembler exactly when an
/// image run is first serialized. Ids are unique and monotonically
/// allocated; they are never reused within one document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaResource {
    /// Relationship id referenced from the body part (e.g. "rId4")
    pub id: String,

    /// Target path relative to the body part (e.g. "media/image1.png")
    pub target: String,

    /// MIME content type registered for the resource's extension
    pub content_type: String,

    /// Raw encoded bytes written under the media folder
    #[serde(skip_serializing, default)]
    pub data: Vec<u8>,
}

impl MediaResource {
    /// File extension of the target path.
    pub fn extension(&self) -> &str {
        self.target.rsplit('.').next().unwrap_or("png")
    }

    /// Size of the resource data in bytes.
    pub fn size(&self) -> usize {
        self.data.len()
    }
}

/// Map a media file extension to its registered content type.
///
/// Unrecognized extensions fall back to an opaque binary type; the
/// extension still gets a default entry in the content-types manifest so
/// the package stays valid.
pub fn content_type_for_extension(extension: &str) -> &'static str {
    match extension.to_ascii_lowercase().as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "tiff" | "tif" => "image/tiff",
        "bmp" => "image/bmp",
        "webp" => "image/webp",
        "jp2" => "image/jp2",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_mapping() {
        assert_eq!(content_type_for_extension("png"), "image/png");
        assert_eq!(content_type_for_extension("JPG"), "image/jpeg");
        assert_eq!(content_type_for_extension("jpeg"), "image/jpeg");
        assert_eq!(
            content_type_for_extension("raw"),
            "application/octet-stream"
        );
    }

    #[test]
    fn test_resource_extension() {
        let res = MediaResource {
            id: "rId2".to_string(),
            target: "media/image1.png".to_string(),
            content_type: "image/png".to_string(),
            data: vec![1, 2, 3],
        };
        assert_eq!(res.extension(), "png");
        assert_eq!(res.size(), 3);
    }
}
