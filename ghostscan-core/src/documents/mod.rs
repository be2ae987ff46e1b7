//! Document Adapters
//!
//! Structured documents enter and leave the flat-text pipeline here.
//!
//! ```text
//! DOCX bytes
//!     ↓  flatten
//! FlattenedDocument (text + paragraphs)
//!     ↓  scan / clean
//! cleaned text
//!     ↓  rebuild + package
//! DOCX bytes
//! ```
//!
//! Only paragraph text, alignment, style name and per-run
//! bold/italic/underline/superscript/subscript survive the trip. Tables,
//! images, headers, footers, comments and tracked changes are dropped.

pub mod adapter;
pub mod docx;
pub mod rebuild;

pub use adapter::DocumentAdapter;
pub use docx::DocxAdapter;

/// Separator placed between paragraphs when flattening.
pub const PARAGRAPH_BREAK: &str = "\n\n";

pub const DOCX_MIME_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Accept by `.docx` extension (any case) or by the WordprocessingML MIME type.
pub fn is_valid_docx_file(file_name: &str, mime_type: Option<&str>) -> bool {
    file_name.to_lowercase().ends_with(".docx") || mime_type == Some(DOCX_MIME_TYPE)
}

/// Human-readable size, e.g. `0 Bytes`, `1.5 KB`, `2 MB`.
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut exponent = 0;
    let mut value = bytes as f64;
    while value >= 1024.0 && exponent < UNITS.len() - 1 {
        value /= 1024.0;
        exponent += 1;
    }
    let rounded = (value * 100.0).round() / 100.0;

    format!("{} {}", rounded, UNITS[exponent])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_docx_file_validation() {
        assert!(is_valid_docx_file("Report.DOCX", None));
        assert!(is_valid_docx_file("upload.bin", Some(DOCX_MIME_TYPE)));
        assert!(!is_valid_docx_file("notes.doc", Some("application/msword")));
        assert!(!is_valid_docx_file("notes.txt", None));
    }

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(0), "0 Bytes");
        assert_eq!(format_file_size(512), "512 Bytes");
        assert_eq!(format_file_size(1024), "1 KB");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(5 * 1024 * 1024), "5 MB");
        assert_eq!(format_file_size(3 * 1024 * 1024 * 1024), "3 GB");
    }
}
