// DOCX adapter - WordprocessingML containers in and out
//
// - xml_parser.rs: word/document.xml -> ParsedParagraph
// - writer.rs: RebuiltParagraph -> zipped package

pub mod writer;
pub mod xml_parser;

use super::adapter::DocumentAdapter;
use super::rebuild::rebuild_paragraphs;
use super::{is_valid_docx_file, PARAGRAPH_BREAK};
use crate::config::RebuildConfig;
use crate::error::DocumentResult;
use crate::rules::RoleEngine;
use crate::types::{FlattenedDocument, ParsedParagraph, RebuiltParagraph};
use anyhow::Result;
use std::path::Path;

pub struct DocxAdapter {
    engine: RoleEngine,
    config: RebuildConfig,
}

impl DocxAdapter {
    /// Fails only when the configured reference pattern is not a valid regex.
    pub fn new(config: &RebuildConfig) -> Result<Self> {
        let engine = RoleEngine::new(config)?;
        tracing::debug!(rules = ?engine.rule_names(), "docx role rules");
        Ok(Self {
            engine,
            config: config.clone(),
        })
    }
}

impl Default for DocxAdapter {
    fn default() -> Self {
        Self {
            engine: RoleEngine::default(),
            config: RebuildConfig::default(),
        }
    }
}

impl DocumentAdapter for DocxAdapter {
    fn flatten(&self, bytes: &[u8]) -> DocumentResult<FlattenedDocument> {
        let xml = xml_parser::read_document_xml(bytes)?;
        let paragraphs = xml_parser::parse_document_xml(&xml)?;

        let text = paragraphs
            .iter()
            .map(|p| p.text.as_str())
            .collect::<Vec<_>>()
            .join(PARAGRAPH_BREAK);

        tracing::debug!(
            paragraphs = paragraphs.len(),
            chars = text.chars().count(),
            "flattened docx"
        );

        Ok(FlattenedDocument { text, paragraphs })
    }

    fn rebuild(&self, original: &[ParsedParagraph], cleaned_text: &str) -> Vec<RebuiltParagraph> {
        rebuild_paragraphs(original, cleaned_text, &self.engine, &self.config.styles)
    }

    fn package(&self, paragraphs: &[RebuiltParagraph]) -> DocumentResult<Vec<u8>> {
        writer::package_docx(paragraphs, self.config.page_margin_twips)
    }

    fn name(&self) -> &str {
        "DOCX"
    }

    fn supports_file_type(&self, path: &Path) -> bool {
        is_valid_docx_file(&path.to_string_lossy(), None)
    }
}
