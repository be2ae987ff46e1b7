// Ghostscan Core Library
//
// Finds invisible and control characters in text, removes or marks them, and
// carries DOCX documents through the same clean-up with their paragraph
// formatting rebuilt afterwards.

pub mod types;
pub mod catalog;
pub mod scanner;
pub mod reconstructor;
pub mod documents;
pub mod rules;
pub mod processor;
pub mod report;
pub mod comparator;
pub mod config;
pub mod error;

// Re-export main types and functions for easy use
pub use types::*;
pub use catalog::InvisibleCharacterCatalog;
pub use scanner::{detect_invisible_characters, scan, scan_utf16};
pub use reconstructor::{clean, clean_utf16, highlight};
pub use documents::{DocumentAdapter, DocxAdapter};
pub use processor::DocumentProcessor;
pub use config::GhostscanConfig;
pub use error::{DocumentError, DocumentResult};
