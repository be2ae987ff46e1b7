use crate::config::GhostscanConfig;
use crate::documents::{DocumentAdapter, DocxAdapter};
use crate::error::DocumentResult;
use crate::reconstructor;
use crate::scanner;
use crate::types::*;
use anyhow::Result;
use std::time::{Duration, Instant};

/// Simple profiler that collects timings for pipeline steps
pub struct StepProfiler {
    enabled: bool,
    timings: Vec<(String, Duration)>,
}

impl StepProfiler {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            timings: Vec::new(),
        }
    }

    pub fn time_step<F, R>(&mut self, step_name: &str, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        if !self.enabled {
            return f();
        }

        let start = Instant::now();
        let result = f();
        let elapsed = start.elapsed();

        tracing::debug!(step = step_name, elapsed_ms = elapsed.as_millis() as u64, "step finished");
        self.timings.push((step_name.to_string(), elapsed));

        result
    }

    pub fn timings(&self) -> &[(String, Duration)] {
        &self.timings
    }

    pub fn log_summary(&self) {
        if !self.enabled || self.timings.is_empty() {
            return;
        }

        let total: Duration = self.timings.iter().map(|(_, d)| *d).sum();
        for (step, duration) in &self.timings {
            let percentage = if total.is_zero() {
                0.0
            } else {
                (duration.as_secs_f64() / total.as_secs_f64()) * 100.0
            };
            tracing::debug!(
                step = step.as_str(),
                elapsed_ms = duration.as_millis() as u64,
                percentage = (percentage * 10.0).round() / 10.0,
                "profile"
            );
        }
        tracing::debug!(total_ms = total.as_millis() as u64, "profile total");
    }
}

/// Runs the text and document pipelines.
///
/// Holds no per-request state; one processor can serve concurrent callers.
pub struct DocumentProcessor {
    adapter: Box<dyn DocumentAdapter + Send + Sync>,
    profiling: bool,
}

impl DocumentProcessor {
    /// Create DocumentProcessor with an explicit adapter
    pub fn new_with_adapter(adapter: Box<dyn DocumentAdapter + Send + Sync>) -> Self {
        Self {
            adapter,
            profiling: false,
        }
    }

    /// DOCX processor configured from `config.rebuild`
    pub fn new(config: &GhostscanConfig) -> Result<Self> {
        let adapter = DocxAdapter::new(&config.rebuild)?;
        Ok(Self::new_with_adapter(Box::new(adapter)))
    }

    pub fn with_profiling(mut self, enabled: bool) -> Self {
        self.profiling = enabled;
        self
    }

    pub fn adapter(&self) -> &dyn DocumentAdapter {
        self.adapter.as_ref()
    }

    /// Scan, clean and highlight a piece of text.
    pub fn analyze_text(&self, text: &str) -> TextAnalysis {
        let mut profiler = StepProfiler::new(self.profiling);

        let characters = profiler.time_step("Scan", || scanner::scan(text));
        let (cleaned_text, highlighted_text) = profiler.time_step("Reconstruct", || {
            (
                reconstructor::clean(text, &characters),
                reconstructor::highlight(text, &characters),
            )
        });
        profiler.log_summary();

        tracing::debug!(detected = characters.len(), "text analyzed");

        TextAnalysis {
            original_text: text.to_string(),
            characters,
            cleaned_text,
            highlighted_text,
        }
    }

    /// Flatten a document, then scan and clean its text.
    ///
    /// Fails with `InvalidStructure` when the container cannot be read.
    pub fn analyze_docx(&self, bytes: &[u8], file_name: &str) -> DocumentResult<DocxAnalysis> {
        let mut profiler = StepProfiler::new(self.profiling);

        let flattened = profiler.time_step("Flatten", || self.adapter.flatten(bytes))?;
        let scan = profiler.time_step("Scan", || scanner::detect_invisible_characters(&flattened.text));
        let detected_characters = profiler.time_step("Aggregate", || scanner::aggregate(&scan.characters));
        profiler.log_summary();

        tracing::debug!(
            file = file_name,
            adapter = self.adapter.name(),
            paragraphs = flattened.paragraphs.len(),
            detected = scan.characters.len(),
            unique = detected_characters.len(),
            "document analyzed"
        );

        Ok(DocxAnalysis {
            file_name: file_name.to_string(),
            original_text: flattened.text,
            cleaned_text: scan.cleaned_text,
            detected_characters,
            paragraphs: flattened.paragraphs,
        })
    }

    /// Rebuild a cleaned document from the original bytes and cleaned text.
    ///
    /// An unreadable original degrades to role-only styling; only writing the
    /// output container can fail.
    pub fn create_cleaned_docx(&self, original_bytes: &[u8], cleaned_text: &str) -> DocumentResult<Vec<u8>> {
        let mut profiler = StepProfiler::new(self.profiling);
        let bytes = profiler.time_step("Rebuild", || {
            self.adapter.rebuild_document(original_bytes, cleaned_text)
        });
        profiler.log_summary();
        bytes
    }
}

impl Default for DocumentProcessor {
    fn default() -> Self {
        Self::new_with_adapter(Box::new(DocxAdapter::default()))
    }
}
