//! Structured XML emission.
//!
//! Every XML part of the output container is built through [`XmlWriter`],
//! so metacharacter escaping and control-character stripping happen at one
//! choke point and cannot be skipped at a call site.

/// Escape the five XML metacharacters and drop control characters that
/// the container's XML schema forbids (0x00–0x08 and 0x0B–0x1F, keeping
/// tab, line feed and carriage return).
///
/// This is the single sanitization routine for every literal string that
/// enters a part, element text and attribute values alike.
pub fn escape_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    escape_into(&mut out, value);
    out
}

fn escape_into(buf: &mut String, value: &str) {
    for ch in value.chars() {
        match ch {
            '&' => buf.push_str("&amp;"),
            '<' => buf.push_str("&lt;"),
            '>' => buf.push_str("&gt;"),
            '"' => buf.push_str("&quot;"),
            '\'' => buf.push_str("&apos;"),
            '\u{00}'..='\u{08}' | '\u{0B}' | '\u{0C}' | '\u{0E}'..='\u{1F}' => {}
            _ => buf.push(ch),
        }
    }
}

/// A minimal streaming XML writer.
///
/// Elements are opened and closed in stack order; text and attribute
/// values pass through [`escape_text`]'s rules unconditionally. Tag and
/// attribute names are compile-time literals supplied by the assembler,
/// not data, so they are written verbatim.
#[derive(Debug)]
pub struct XmlWriter {
    buf: String,
    open_tags: Vec<&'static str>,
}

impl XmlWriter {
    /// Create a writer with the XML declaration already emitted.
    pub fn new() -> Self {
        Self {
            buf: String::from("<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n"),
            open_tags: Vec::new(),
        }
    }

    /// Open an element with no attributes.
    pub fn open(&mut self, tag: &'static str) {
        self.open_with(tag, &[]);
    }

    /// Open an element with attributes.
    pub fn open_with(&mut self, tag: &'static str, attrs: &[(&str, &str)]) {
        self.start_tag(tag, attrs);
        self.buf.push('>');
        self.open_tags.push(tag);
    }

    /// Write a self-closing element.
    pub fn empty(&mut self, tag: &'static str, attrs: &[(&str, &str)]) {
        self.start_tag(tag, attrs);
        self.buf.push_str("/>");
    }

    /// Write escaped character data into the current element.
    pub fn text(&mut self, value: &str) {
        escape_into(&mut self.buf, value);
    }

    /// Close the most recently opened element.
    ///
    /// Closing with no element open is a construction bug in the
    /// assembler, not a runtime condition, and panics.
    pub fn close(&mut self) {
        let tag = self
            .open_tags
            .pop()
            .expect("XmlWriter::close without a matching open");
        self.buf.push_str("</");
        self.buf.push_str(tag);
        self.buf.push('>');
    }

    /// Finish the document and return the serialized part.
    pub fn finish(self) -> String {
        debug_assert!(
            self.open_tags.is_empty(),
            "XmlWriter::finish with unclosed elements: {:?}",
            self.open_tags
        );
        self.buf
    }

    fn start_tag(&mut self, tag: &'static str, attrs: &[(&str, &str)]) {
        self.buf.push('<');
        self.buf.push_str(tag);
        for (name, value) in attrs {
            self.buf.push(' ');
            self.buf.push_str(name);
            self.buf.push_str("=\"");
            escape_into(&mut self.buf, value);
            self.buf.push('"');
        }
    }
}

impl Default for XmlWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_metacharacters() {
        assert_eq!(
            escape_text(r#"a & b < c > d " e ' f"#),
            "a &amp; b &lt; c &gt; d &quot; e &apos; f"
        );
    }

    #[test]
    fn test_strip_control_characters() {
        let input = "a\u{0}b\u{8}c\u{B}d\u{C}e\u{1F}f";
        assert_eq!(escape_text(input), "abcdef");
    }

    #[test]
    fn test_keep_whitespace_controls() {
        assert_eq!(escape_text("a\tb\nc\rd"), "a\tb\nc\rd");
    }

    #[test]
    fn test_nested_elements() {
        let mut xml = XmlWriter::new();
        xml.open_with("root", &[("id", "1")]);
        xml.open("child");
        xml.text("x < y");
        xml.close();
        xml.empty("leaf", &[("v", "a\"b")]);
        xml.close();

        let out = xml.finish();
        assert!(out.starts_with("<?xml"));
        assert!(out.contains("<root id=\"1\"><child>x &lt; y</child><leaf v=\"a&quot;b\"/></root>"));
    }

    #[test]
    #[should_panic(expected = "without a matching open")]
    fn test_unbalanced_close_panics() {
        let mut xml = XmlWriter::new();
        xml.close();
    }
}
