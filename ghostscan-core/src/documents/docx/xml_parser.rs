//! WordprocessingML Parser
//!
//! Reads `word/document.xml` into [`ParsedParagraph`]s. Only paragraphs that
//! are direct children of `w:body` are kept; paragraphs inside tables or text
//! boxes are skipped along with their text.
//!
//! Per run the parser records:
//! - text from each `w:t` (one `ParsedRun` per text element)
//! - `w:tab` as a literal tab
//! - `w:b`, `w:i`, `w:u`, `w:vertAlign` from `w:rPr`
//!
//! Per paragraph it records `w:jc` and `w:pStyle` from `w:pPr`.

use crate::error::{DocumentError, DocumentResult};
use crate::types::{ParsedParagraph, ParsedRun};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::io::{Cursor, Read};
use zip::result::ZipError;
use zip::ZipArchive;

pub const DOCUMENT_PART: &str = "word/document.xml";

/// Pull the main document part out of a DOCX container.
pub fn read_document_xml(bytes: &[u8]) -> DocumentResult<String> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;
    let mut part = match archive.by_name(DOCUMENT_PART) {
        Ok(part) => part,
        Err(ZipError::FileNotFound) => {
            return Err(DocumentError::invalid(format!("missing {DOCUMENT_PART}")))
        }
        Err(e) => return Err(e.into()),
    };

    let mut xml = String::new();
    part.read_to_string(&mut xml)
        .map_err(|e| DocumentError::invalid(format!("unreadable {DOCUMENT_PART}: {e}")))?;
    Ok(xml)
}

/// Parse the main document part into body paragraphs with non-blank text.
pub fn parse_document_xml(xml: &str) -> DocumentResult<Vec<ParsedParagraph>> {
    let mut reader = Reader::from_str(xml);
    let mut state = ParseState::default();

    loop {
        match reader.read_event()? {
            Event::Start(e) => state.open(&e)?,
            Event::Empty(e) => {
                state.open(&e)?;
                state.close(e.name().as_ref());
            }
            Event::End(e) => state.close(e.name().as_ref()),
            Event::Text(t) => {
                if state.in_text() {
                    state.push_text(&t.unescape()?);
                }
            }
            Event::CData(c) => {
                if state.in_text() {
                    state.push_text(&String::from_utf8_lossy(&c));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    state.finish()
}

#[derive(Default)]
struct ParagraphBuilder {
    runs: Vec<ParsedRun>,
    alignment: Option<String>,
    style_name: Option<String>,
}

impl ParagraphBuilder {
    fn build(self) -> ParsedParagraph {
        let text = self.runs.iter().map(|r| r.text.as_str()).collect();
        ParsedParagraph {
            text,
            runs: self.runs,
            alignment: self.alignment,
            style_name: self.style_name,
        }
    }
}

#[derive(Default)]
struct ParseState {
    stack: Vec<Vec<u8>>,
    saw_body: bool,
    paragraph: Option<ParagraphBuilder>,
    // w:p elements opened inside the current body paragraph (text boxes)
    nested_paragraphs: usize,
    // formatting template for the open w:r; its text stays empty
    run: Option<ParsedRun>,
    // Some while inside a w:t of the open run
    text: Option<String>,
    paragraphs: Vec<ParsedParagraph>,
}

impl ParseState {
    fn parent_is(&self, name: &[u8]) -> bool {
        self.stack.last().is_some_and(|p| p.as_slice() == name)
    }

    fn in_text(&self) -> bool {
        self.text.is_some()
    }

    fn push_text(&mut self, text: &str) {
        if let Some(buf) = self.text.as_mut() {
            buf.push_str(text);
        }
    }

    fn push_segment(&mut self, text: String) {
        if let (Some(paragraph), Some(run)) = (self.paragraph.as_mut(), self.run.as_ref()) {
            paragraph.runs.push(ParsedRun {
                text,
                ..run.clone()
            });
        }
    }

    fn open(&mut self, e: &BytesStart<'_>) -> DocumentResult<()> {
        let name = e.name().as_ref().to_vec();

        match name.as_slice() {
            b"w:body" if self.parent_is(b"w:document") => self.saw_body = true,
            b"w:p" => {
                if self.paragraph.is_some() {
                    self.nested_paragraphs += 1;
                } else if self.parent_is(b"w:body") {
                    self.paragraph = Some(ParagraphBuilder::default());
                }
            }
            _ if self.paragraph.is_some() && self.nested_paragraphs == 0 => {
                self.open_in_paragraph(&name, e)?;
            }
            _ => {}
        }

        self.stack.push(name);
        Ok(())
    }

    fn open_in_paragraph(&mut self, name: &[u8], e: &BytesStart<'_>) -> DocumentResult<()> {
        let in_ppr = self.parent_is(b"w:pPr");
        let in_rpr = self.parent_is(b"w:rPr") && self.run.is_some();
        let in_run = self.parent_is(b"w:r") && self.run.is_some();

        match name {
            b"w:jc" if in_ppr => {
                let value = attr_value(e, b"w:val")?;
                if let Some(p) = self.paragraph.as_mut() {
                    p.alignment = value;
                }
            }
            b"w:pStyle" if in_ppr => {
                let value = attr_value(e, b"w:val")?;
                if let Some(p) = self.paragraph.as_mut() {
                    p.style_name = value;
                }
            }
            b"w:r" => self.run = Some(ParsedRun::default()),
            b"w:b" | b"w:i" | b"w:u" | b"w:vertAlign" if in_rpr => {
                let value = attr_value(e, b"w:val")?;
                if let Some(run) = self.run.as_mut() {
                    match name {
                        b"w:b" => run.bold = is_toggle_on(value.as_deref()),
                        b"w:i" => run.italic = is_toggle_on(value.as_deref()),
                        b"w:u" => run.underline = !matches!(value.as_deref(), Some("none")),
                        _ => {
                            run.superscript = value.as_deref() == Some("superscript");
                            run.subscript = value.as_deref() == Some("subscript");
                        }
                    }
                }
            }
            b"w:t" if in_run => self.text = Some(String::new()),
            b"w:tab" if in_run => self.push_segment("\t".to_string()),
            _ => {}
        }

        Ok(())
    }

    fn close(&mut self, name: &[u8]) {
        self.stack.pop();

        match name {
            b"w:t" => {
                if let Some(text) = self.text.take() {
                    if !text.is_empty() {
                        self.push_segment(text);
                    }
                }
            }
            b"w:r" if self.nested_paragraphs == 0 => self.run = None,
            b"w:p" => {
                if self.nested_paragraphs > 0 {
                    self.nested_paragraphs -= 1;
                } else if let Some(builder) = self.paragraph.take() {
                    self.run = None;
                    let paragraph = builder.build();
                    if !paragraph.text.trim().is_empty() {
                        self.paragraphs.push(paragraph);
                    }
                }
            }
            _ => {}
        }
    }

    fn finish(self) -> DocumentResult<Vec<ParsedParagraph>> {
        if !self.stack.is_empty() {
            return Err(DocumentError::invalid("unexpected end of markup"));
        }
        if !self.saw_body {
            return Err(DocumentError::invalid("missing w:body"));
        }
        Ok(self.paragraphs)
    }
}

fn attr_value(e: &BytesStart<'_>, key: &[u8]) -> DocumentResult<Option<String>> {
    for attr in e.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        if attr.key.as_ref() == key {
            return Ok(Some(attr.unescape_value()?.into_owned()));
        }
    }
    Ok(None)
}

// On/off properties are on when present unless explicitly switched off.
fn is_toggle_on(value: Option<&str>) -> bool {
    !matches!(value, Some("0") | Some("false") | Some("off"))
}
