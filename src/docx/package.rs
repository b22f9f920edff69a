//! Container assembly: content blocks into package bytes.
//!
//! The output is an OPC package: a ZIP of XML parts tied together by
//! relationship files. The parts reference each other by relationship id
//! and every media extension must be declared in the content-types
//! manifest; both invariants are upheld by construction here (a resource
//! is registered at the moment its run is serialized, and the manifest and
//! relationship parts are generated from the registered set).

use std::collections::BTreeMap;
use std::io::{Cursor, Write};

use chrono::SecondsFormat;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::Result;
use crate::model::{
    content_type_for_extension, ContentBlock, ContentItem, DocMetadata, ImageItem, MediaResource,
    TextItem,
};

use super::units::{points_to_emu, points_to_half_points};
use super::xml::XmlWriter;

const NS_WORDPROCESSING: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const NS_DOC_RELATIONSHIPS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const NS_PKG_RELATIONSHIPS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
const NS_CONTENT_TYPES: &str = "http://schemas.openxmlformats.org/package/2006/content-types";
const NS_DRAWING_WP: &str =
    "http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing";
const NS_DRAWING_MAIN: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
const NS_DRAWING_PICTURE: &str = "http://schemas.openxmlformats.org/drawingml/2006/picture";

const REL_TYPE_DOCUMENT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
const REL_TYPE_STYLES: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles";
const REL_TYPE_IMAGE: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/image";
const REL_TYPE_CORE_PROPS: &str =
    "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties";

const CT_RELATIONSHIPS: &str = "application/vnd.openxmlformats-package.relationships+xml";
const CT_XML: &str = "application/xml";
const CT_DOCUMENT: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml";
const CT_STYLES: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml";
const CT_CORE_PROPS: &str = "application/vnd.openxmlformats-package.core-properties+xml";

/// Assembles the whole document's content blocks into container bytes.
///
/// Relationship ids are drawn from a single monotonically increasing
/// counter scoped to the document: the styles part takes the first id,
/// each embedded image the next one in emission order. An assembler is
/// consumed by [`assemble`](Self::assemble); ids are never reused.
#[derive(Debug, Default)]
pub struct PackageAssembler {
    resources: Vec<MediaResource>,
    rel_counter: u32,
    drawing_counter: u32,
}

impl PackageAssembler {
    /// Create an assembler with no allocated resources.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serialize the blocks and write the full package.
    ///
    /// The degenerate empty-block case still yields a valid package with
    /// an empty body.
    pub fn assemble(mut self, blocks: Vec<ContentBlock>, metadata: &DocMetadata) -> Result<Vec<u8>> {
        let styles_rel_id = self.alloc_rel_id();
        // Body emission registers image resources as a side effect, so it
        // must run before the manifest and relationship parts.
        let document = self.document_xml(blocks);
        let document_rels = self.document_rels_xml(&styles_rel_id);
        let content_types = self.content_types_xml();

        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options =
            SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        zip.start_file("[Content_Types].xml", options)?;
        zip.write_all(content_types.as_bytes())?;

        zip.add_directory("_rels/", options)?;
        zip.start_file("_rels/.rels", options)?;
        zip.write_all(package_rels_xml().as_bytes())?;

        zip.add_directory("docProps/", options)?;
        zip.start_file("docProps/core.xml", options)?;
        zip.write_all(core_properties_xml(metadata).as_bytes())?;

        zip.add_directory("word/", options)?;
        zip.start_file("word/document.xml", options)?;
        zip.write_all(document.as_bytes())?;

        zip.add_directory("word/_rels/", options)?;
        zip.start_file("word/_rels/document.xml.rels", options)?;
        zip.write_all(document_rels.as_bytes())?;

        zip.start_file("word/styles.xml", options)?;
        zip.write_all(styles_xml().as_bytes())?;

        if !self.resources.is_empty() {
            zip.add_directory("word/media/", options)?;
            for resource in &self.resources {
                zip.start_file(format!("word/{}", resource.target), options)?;
                zip.write_all(&resource.data)?;
            }
        }

        let cursor = zip.finish()?;
        Ok(cursor.into_inner())
    }

    /// Media resources allocated so far, in id order.
    pub fn resources(&self) -> &[MediaResource] {
        &self.resources
    }

    fn alloc_rel_id(&mut self) -> String {
        self.rel_counter += 1;
        format!("rId{}", self.rel_counter)
    }

    fn document_xml(&mut self, blocks: Vec<ContentBlock>) -> String {
        let mut xml = XmlWriter::new();
        xml.open_with(
            "w:document",
            &[
                ("xmlns:w", NS_WORDPROCESSING),
                ("xmlns:r", NS_DOC_RELATIONSHIPS),
                ("xmlns:wp", NS_DRAWING_WP),
                ("xmlns:a", NS_DRAWING_MAIN),
                ("xmlns:pic", NS_DRAWING_PICTURE),
            ],
        );
        xml.open("w:body");

        for block in blocks {
            xml.open("w:p");
            for run in block.runs {
                match run {
                    ContentItem::Text(text) => write_text_run(&mut xml, &text),
                    ContentItem::Image(image) => self.write_image_run(&mut xml, image),
                }
            }
            xml.close();
        }

        // US Letter with one-inch margins; the reconstruction keeps source
        // coordinates, it does not re-derive page geometry.
        xml.open("w:sectPr");
        xml.empty("w:pgSz", &[("w:w", "12240"), ("w:h", "15840")]);
        xml.empty(
            "w:pgMar",
            &[
                ("w:top", "1440"),
                ("w:right", "1440"),
                ("w:bottom", "1440"),
                ("w:left", "1440"),
                ("w:header", "720"),
                ("w:footer", "720"),
                ("w:gutter", "0"),
            ],
        );
        xml.close();

        xml.close();
        xml.close();
        xml.finish()
    }

    /// Emit one inline drawing, registering the image as a media resource
    /// with a freshly allocated relationship id.
    fn write_image_run(&mut self, xml: &mut XmlWriter, image: ImageItem) {
        let index = self.resources.len() + 1;
        let mut extension = image.extension.to_ascii_lowercase();
        if extension.is_empty() {
            extension = "png".to_string();
        }

        let rel_id = self.alloc_rel_id();
        let target = format!("media/image{index}.{extension}");
        let name = format!("image{index}.{extension}");
        self.resources.push(MediaResource {
            id: rel_id.clone(),
            target,
            content_type: content_type_for_extension(&extension).to_string(),
            data: image.data,
        });

        self.drawing_counter += 1;
        let drawing_id = self.drawing_counter.to_string();
        let cx = points_to_emu(image.width).to_string();
        let cy = points_to_emu(image.height).to_string();

        xml.open("w:r");
        xml.open("w:drawing");
        xml.open_with(
            "wp:inline",
            &[("distT", "0"), ("distB", "0"), ("distL", "0"), ("distR", "0")],
        );
        xml.empty("wp:extent", &[("cx", &cx), ("cy", &cy)]);
        xml.empty("wp:docPr", &[("id", &drawing_id), ("name", &name)]);
        xml.open("a:graphic");
        xml.open_with("a:graphicData", &[("uri", NS_DRAWING_PICTURE)]);
        xml.open("pic:pic");
        xml.open("pic:nvPicPr");
        xml.empty("pic:cNvPr", &[("id", &drawing_id), ("name", &name)]);
        xml.empty("pic:cNvPicPr", &[]);
        xml.close();
        xml.open("pic:blipFill");
        xml.empty("a:blip", &[("r:embed", &rel_id)]);
        xml.open("a:stretch");
        xml.empty("a:fillRect", &[]);
        xml.close();
        xml.close();
        xml.open("pic:spPr");
        xml.open("a:xfrm");
        xml.empty("a:off", &[("x", "0"), ("y", "0")]);
        xml.empty("a:ext", &[("cx", &cx), ("cy", &cy)]);
        xml.close();
        xml.open_with("a:prstGeom", &[("prst", "rect")]);
        xml.empty("a:avLst", &[]);
        xml.close();
        xml.close();
        xml.close();
        xml.close();
        xml.close();
        xml.close();
        xml.close();
        xml.close();
    }

    fn document_rels_xml(&self, styles_rel_id: &str) -> String {
        let mut xml = XmlWriter::new();
        xml.open_with("Relationships", &[("xmlns", NS_PKG_RELATIONSHIPS)]);
        xml.empty(
            "Relationship",
            &[
                ("Id", styles_rel_id),
                ("Type", REL_TYPE_STYLES),
                ("Target", "styles.xml"),
            ],
        );
        for resource in &self.resources {
            xml.empty(
                "Relationship",
                &[
                    ("Id", &resource.id),
                    ("Type", REL_TYPE_IMAGE),
                    ("Target", &resource.target),
                ],
            );
        }
        xml.close();
        xml.finish()
    }

    fn content_types_xml(&self) -> String {
        let mut xml = XmlWriter::new();
        xml.open_with("Types", &[("xmlns", NS_CONTENT_TYPES)]);
        xml.empty(
            "Default",
            &[("Extension", "rels"), ("ContentType", CT_RELATIONSHIPS)],
        );
        xml.empty("Default", &[("Extension", "xml"), ("ContentType", CT_XML)]);

        // One default per distinct media extension, in deterministic order.
        // "xml" and "rels" are already declared above.
        let mut extensions: BTreeMap<&str, &str> = BTreeMap::new();
        for resource in &self.resources {
            let extension = resource.extension();
            if extension == "xml" || extension == "rels" {
                continue;
            }
            extensions
                .entry(extension)
                .or_insert(resource.content_type.as_str());
        }
        for (extension, content_type) in extensions {
            xml.empty(
                "Default",
                &[("Extension", extension), ("ContentType", content_type)],
            );
        }

        xml.empty(
            "Override",
            &[
                ("PartName", "/word/document.xml"),
                ("ContentType", CT_DOCUMENT),
            ],
        );
        xml.empty(
            "Override",
            &[("PartName", "/word/styles.xml"), ("ContentType", CT_STYLES)],
        );
        xml.empty(
            "Override",
            &[
                ("PartName", "/docProps/core.xml"),
                ("ContentType", CT_CORE_PROPS),
            ],
        );
        xml.close();
        xml.finish()
    }
}

fn write_text_run(xml: &mut XmlWriter, text: &TextItem) {
    let size = points_to_half_points(text.font_size).to_string();

    xml.open("w:r");
    xml.open("w:rPr");
    if text.bold {
        xml.empty("w:b", &[]);
    }
    if text.italic {
        xml.empty("w:i", &[]);
    }
    xml.empty("w:sz", &[("w:val", &size)]);
    xml.empty("w:szCs", &[("w:val", &size)]);
    xml.close();
    xml.open_with("w:t", &[("xml:space", "preserve")]);
    xml.text(&text.text);
    xml.close();
    xml.close();
}

fn package_rels_xml() -> String {
    let mut xml = XmlWriter::new();
    xml.open_with("Relationships", &[("xmlns", NS_PKG_RELATIONSHIPS)]);
    xml.empty(
        "Relationship",
        &[
            ("Id", "rId1"),
            ("Type", REL_TYPE_DOCUMENT),
            ("Target", "word/document.xml"),
        ],
    );
    xml.empty(
        "Relationship",
        &[
            ("Id", "rId2"),
            ("Type", REL_TYPE_CORE_PROPS),
            ("Target", "docProps/core.xml"),
        ],
    );
    xml.close();
    xml.finish()
}

fn styles_xml() -> String {
    let mut xml = XmlWriter::new();
    xml.open_with("w:styles", &[("xmlns:w", NS_WORDPROCESSING)]);
    xml.open_with(
        "w:style",
        &[
            ("w:type", "paragraph"),
            ("w:default", "1"),
            ("w:styleId", "Normal"),
        ],
    );
    xml.empty("w:name", &[("w:val", "Normal")]);
    xml.empty("w:qFormat", &[]);
    xml.close();
    xml.close();
    xml.finish()
}

fn core_properties_xml(metadata: &DocMetadata) -> String {
    let mut xml = XmlWriter::new();
    xml.open_with(
        "cp:coreProperties",
        &[
            (
                "xmlns:cp",
                "http://schemas.openxmlformats.org/package/2006/metadata/core-properties",
            ),
            ("xmlns:dc", "http://purl.org/dc/elements/1.1/"),
            ("xmlns:dcterms", "http://purl.org/dc/terms/"),
            ("xmlns:xsi", "http://www.w3.org/2001/XMLSchema-instance"),
        ],
    );
    if let Some(title) = &metadata.title {
        xml.open("dc:title");
        xml.text(title);
        xml.close();
    }
    if let Some(author) = &metadata.author {
        xml.open("dc:creator");
        xml.text(author);
        xml.close();
    }
    if let Some(created) = &metadata.created {
        xml.open_with("dcterms:created", &[("xsi:type", "dcterms:W3CDTF")]);
        xml.text(&created.to_rfc3339_opts(SecondsFormat::Secs, true));
        xml.close();
    }
    if let Some(modified) = &metadata.modified {
        xml.open_with("dcterms:modified", &[("xsi:type", "dcterms:W3CDTF")]);
        xml.text(&modified.to_rfc3339_opts(SecondsFormat::Secs, true));
        xml.close();
    }
    xml.close();
    xml.finish()
}
