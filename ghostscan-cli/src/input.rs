// Input and output path handling for the CLI

use anyhow::{bail, Context, Result};
use ghostscan_core::config::LimitsConfig;
use ghostscan_core::documents::{format_file_size, DocumentAdapter};
use std::io::Read;
use std::path::{Path, PathBuf};

/// Text to scan plus a label for reports: inline text, a file, or stdin.
pub fn read_text_input(text: Option<&str>, path: Option<&str>) -> Result<(String, String)> {
    match (text, path) {
        (Some(text), _) => Ok(("inline".to_string(), text.to_string())),
        (None, Some(path)) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read input file: {path}"))?;
            Ok((path.to_string(), content))
        }
        (None, None) => {
            let mut content = String::new();
            std::io::stdin()
                .read_to_string(&mut content)
                .context("Failed to read text from stdin")?;
            Ok(("stdin".to_string(), content))
        }
    }
}

/// Read a document after checking that `adapter` handles its type and that
/// it fits within `limits`.
pub fn read_document(path: &Path, adapter: &dyn DocumentAdapter, limits: &LimitsConfig) -> Result<Vec<u8>> {
    let name = path.to_string_lossy();
    if !adapter.supports_file_type(path) {
        bail!("Not a {} file: {name}", adapter.name());
    }

    let size = std::fs::metadata(path)
        .with_context(|| format!("Failed to read input file: {name}"))?
        .len();
    if size > limits.max_document_bytes {
        bail!(
            "{name} is {}, larger than the {} limit",
            format_file_size(size),
            format_file_size(limits.max_document_bytes)
        );
    }

    std::fs::read(path).with_context(|| format!("Failed to read input file: {name}"))
}

/// `<dir>/<stem>_<suffix>.<extension>` next to the input.
pub fn default_output_path(input: &Path, suffix: &str, extension: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    input.with_file_name(format!("{stem}_{suffix}.{extension}"))
}
