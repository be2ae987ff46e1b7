// Document adapter abstraction
//
// This module defines the boundary between structured documents (paragraphs of
// formatted runs) and the flat text the scanner and reconstructor work on.
// Adapters flatten a document to text, and later rebuild a document from the
// cleaned text using the paragraphs captured during flattening.

use crate::error::DocumentResult;
use crate::types::*;
use std::path::Path;

/// DocumentAdapter trait - bridges document containers and flat text
///
/// Flattening may fail with `DocumentError::InvalidStructure`. Rebuilding never
/// fails: when the original cannot be parsed it degrades to role-only styling.
pub trait DocumentAdapter {
    /// Read the paragraph/run tree and join paragraph texts with a blank line.
    fn flatten(&self, bytes: &[u8]) -> DocumentResult<FlattenedDocument>;

    /// Pair cleaned text blocks with the original paragraphs and restyle them.
    fn rebuild(&self, original: &[ParsedParagraph], cleaned_text: &str) -> Vec<RebuiltParagraph>;

    /// Write rebuilt paragraphs out as a document container.
    fn package(&self, paragraphs: &[RebuiltParagraph]) -> DocumentResult<Vec<u8>>;

    /// Convenience method: original bytes + cleaned text -> cleaned document bytes
    ///
    /// If the original no longer parses, every cleaned block becomes its own
    /// paragraph with role styling only.
    fn rebuild_document(&self, original_bytes: &[u8], cleaned_text: &str) -> DocumentResult<Vec<u8>> {
        let paragraphs = match self.flatten(original_bytes) {
            Ok(original) => self.rebuild(&original.paragraphs, cleaned_text),
            Err(e) => {
                tracing::warn!(error = %e, adapter = self.name(), "original unreadable, rebuilding without formatting");
                self.rebuild(&[], cleaned_text)
            }
        };
        self.package(&paragraphs)
    }

    /// Get adapter name for logging
    fn name(&self) -> &str;

    /// Check if adapter supports the given file type
    fn supports_file_type(&self, path: &Path) -> bool;
}
