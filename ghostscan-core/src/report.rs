// Analysis reports - CSV character table and JSON summary

use crate::scanner::{aggregate, character_details};
use crate::types::*;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashSet;

pub const CSV_HEADER: [&str; 6] = ["Character", "Unicode", "Hex", "Name", "Category", "Block"];

/// Character table for `text`, one row per distinct code point in order of
/// first appearance. Every cell is quoted.
pub fn character_csv(text: &str) -> Result<String> {
    let mut seen = HashSet::new();
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(CSV_HEADER)?;
    for detail in character_details(text) {
        if !seen.insert(detail.code_point) {
            continue;
        }
        writer.write_record([
            detail.character.to_string(),
            detail.code_point.to_string(),
            detail.code_point_hex,
            detail.name,
            detail.category.to_string(),
            detail.block.to_string(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to flush CSV writer: {e}"))?;
    String::from_utf8(bytes).context("CSV output is not UTF-8")
}

/// Summary written by `--report`.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub generated_at: DateTime<Utc>,
    pub source: String,
    /// Scalar values in the analysed text
    pub total_characters: usize,
    pub invisible_count: usize,
    pub unique_invisible: usize,
    pub characters: Vec<DetectedCharacterAggregate>,
    pub cleaned_text: String,
}

impl AnalysisReport {
    pub fn from_text(source: &str, analysis: &TextAnalysis) -> Self {
        let characters = aggregate(&analysis.characters);
        Self {
            generated_at: Utc::now(),
            source: source.to_string(),
            total_characters: analysis.original_text.chars().count(),
            invisible_count: analysis.characters.len(),
            unique_invisible: characters.len(),
            characters,
            cleaned_text: analysis.cleaned_text.clone(),
        }
    }

    pub fn from_docx(analysis: &DocxAnalysis) -> Self {
        Self {
            generated_at: Utc::now(),
            source: analysis.file_name.clone(),
            total_characters: analysis.original_text.chars().count(),
            invisible_count: analysis.detected_characters.iter().map(|a| a.count).sum(),
            unique_invisible: analysis.detected_characters.len(),
            characters: analysis.detected_characters.clone(),
            cleaned_text: analysis.cleaned_text.clone(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize analysis report")
    }
}
