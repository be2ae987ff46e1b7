//! DOCX Writer
//!
//! Serialises rebuilt paragraphs into a minimal WordprocessingML package:
//! `[Content_Types].xml`, `_rels/.rels` and `word/document.xml`. The page is
//! A4 with the same margin on every side.

use super::xml_parser::DOCUMENT_PART;
use crate::error::{DocumentError, DocumentResult};
use crate::types::{RebuiltParagraph, RebuiltRun};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::fmt::Display;
use std::io::{Cursor, Write};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

const WORDML_NAMESPACE: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

// A4 in twips
const PAGE_WIDTH: &str = "11906";
const PAGE_HEIGHT: &str = "16838";

const CONTENT_TYPES_XML: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#,
    r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#,
    r#"<Default Extension="xml" ContentType="application/xml"/>"#,
    r#"<Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>"#,
    r#"</Types>"#
);

const PACKAGE_RELS_XML: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>"#,
    r#"</Relationships>"#
);

fn package_error(e: impl Display) -> DocumentError {
    DocumentError::Package(e.to_string())
}

/// Zip the rebuilt paragraphs into a DOCX container.
pub fn package_docx(paragraphs: &[RebuiltParagraph], margin_twips: u32) -> DocumentResult<Vec<u8>> {
    let document_xml = write_document_xml(paragraphs, margin_twips)?;

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = FileOptions::default().compression_method(CompressionMethod::Deflated);

    for (name, content) in [
        ("[Content_Types].xml", CONTENT_TYPES_XML),
        ("_rels/.rels", PACKAGE_RELS_XML),
        (DOCUMENT_PART, document_xml.as_str()),
    ] {
        zip.start_file(name, options).map_err(package_error)?;
        zip.write_all(content.as_bytes()).map_err(package_error)?;
    }

    let cursor = zip.finish().map_err(package_error)?;
    Ok(cursor.into_inner())
}

/// Render `word/document.xml` for the given paragraphs.
pub fn write_document_xml(paragraphs: &[RebuiltParagraph], margin_twips: u32) -> DocumentResult<String> {
    let mut out = XmlOut::new();

    out.event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;
    out.start("w:document", &[("xmlns:w", WORDML_NAMESPACE)])?;
    out.start("w:body", &[])?;

    for paragraph in paragraphs {
        write_paragraph(&mut out, paragraph)?;
    }

    let margin = margin_twips.to_string();
    out.start("w:sectPr", &[])?;
    out.empty("w:pgSz", &[("w:w", PAGE_WIDTH), ("w:h", PAGE_HEIGHT)])?;
    out.empty(
        "w:pgMar",
        &[
            ("w:top", margin.as_str()),
            ("w:right", margin.as_str()),
            ("w:bottom", margin.as_str()),
            ("w:left", margin.as_str()),
            ("w:header", "708"),
            ("w:footer", "708"),
            ("w:gutter", "0"),
        ],
    )?;
    out.end("w:sectPr")?;

    out.end("w:body")?;
    out.end("w:document")?;
    out.finish()
}

fn write_paragraph(out: &mut XmlOut, paragraph: &RebuiltParagraph) -> DocumentResult<()> {
    out.start("w:p", &[])?;
    out.start("w:pPr", &[])?;

    let spacing = paragraph.spacing;
    let values = [
        ("w:before", spacing.before.map(|v| v.to_string())),
        ("w:after", spacing.after.map(|v| v.to_string())),
        ("w:line", spacing.line.map(|v| v.to_string())),
    ];
    let mut spacing_attrs: Vec<(&str, &str)> = values
        .iter()
        .filter_map(|(key, value)| value.as_deref().map(|v| (*key, v)))
        .collect();
    if spacing.line.is_some() {
        spacing_attrs.push(("w:lineRule", "auto"));
    }
    if !spacing_attrs.is_empty() {
        out.empty("w:spacing", &spacing_attrs)?;
    }

    if let Some(indent) = paragraph.indent {
        let left = indent.left.to_string();
        let hanging = indent.hanging.to_string();
        out.empty("w:ind", &[("w:left", left.as_str()), ("w:hanging", hanging.as_str())])?;
    }

    out.empty("w:jc", &[("w:val", paragraph.alignment.as_ooxml())])?;
    out.end("w:pPr")?;

    for run in &paragraph.runs {
        write_run(out, run)?;
    }

    out.end("w:p")
}

fn write_run(out: &mut XmlOut, run: &RebuiltRun) -> DocumentResult<()> {
    out.start("w:r", &[])?;
    out.start("w:rPr", &[])?;
    if run.bold {
        out.empty("w:b", &[])?;
    }
    if run.italic {
        out.empty("w:i", &[])?;
    }
    let size = run.size.to_string();
    out.empty("w:sz", &[("w:val", size.as_str())])?;
    out.empty("w:szCs", &[("w:val", size.as_str())])?;
    if run.underline {
        out.empty("w:u", &[("w:val", "single")])?;
    }
    if run.superscript {
        out.empty("w:vertAlign", &[("w:val", "superscript")])?;
    } else if run.subscript {
        out.empty("w:vertAlign", &[("w:val", "subscript")])?;
    }
    out.end("w:rPr")?;

    for (i, piece) in run.text.split('\t').enumerate() {
        if i > 0 {
            out.empty("w:tab", &[])?;
        }
        if !piece.is_empty() {
            out.start("w:t", &[("xml:space", "preserve")])?;
            out.event(Event::Text(BytesText::new(piece)))?;
            out.end("w:t")?;
        }
    }

    out.end("w:r")
}

struct XmlOut {
    writer: Writer<Vec<u8>>,
}

impl XmlOut {
    fn new() -> Self {
        Self {
            writer: Writer::new(Vec::new()),
        }
    }

    fn event(&mut self, event: Event<'_>) -> DocumentResult<()> {
        self.writer.write_event(event).map_err(package_error)
    }

    fn start(&mut self, name: &str, attrs: &[(&str, &str)]) -> DocumentResult<()> {
        let start = BytesStart::new(name).with_attributes(attrs.iter().copied());
        self.event(Event::Start(start))
    }

    fn empty(&mut self, name: &str, attrs: &[(&str, &str)]) -> DocumentResult<()> {
        let start = BytesStart::new(name).with_attributes(attrs.iter().copied());
        self.event(Event::Empty(start))
    }

    fn end(&mut self, name: &str) -> DocumentResult<()> {
        self.event(Event::End(BytesEnd::new(name)))
    }

    fn finish(self) -> DocumentResult<String> {
        String::from_utf8(self.writer.into_inner()).map_err(package_error)
    }
}
