//! Export of rendered documents to files.
//!
//! [`Exporter`] writes standalone or fragment HTML, PDF through a detected
//! [`PdfEngine`], and verbatim markdown copies. Every operation reports an
//! [`ExportResult`] instead of returning an error, so callers only have to
//! check `success` and show `error_message`.

mod pdf;

use std::path::Path;

use chrono::{DateTime, Local};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::Statistics;
use crate::infra::{FsError, write_atomic};
use crate::render::{DocumentTransformer, RenderError};

pub use pdf::{CHROME_BIN_ENV, ChromePdfEngine, PdfEngine, PdfError, PrintCss, inject_print_css};

/// Shown when PDF export is requested but no browser engine is installed.
pub const PDF_UNAVAILABLE_MESSAGE: &str = "PDF export is not available: no Chrome or Chromium browser was found.

PDF output is printed by a headless Chrome/Chromium process. To enable it:
  - install Google Chrome or Chromium, or
  - set MDRENDER_CHROME_BIN to the path of a Chrome/Chromium binary.

Alternatively, export as HTML and print to PDF from a browser.";

/// Errors raised inside an export operation.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Error exporting HTML: {0}")]
    Html(String),

    #[error("Error exporting PDF: {0}")]
    Pdf(String),

    #[error("{}", PDF_UNAVAILABLE_MESSAGE)]
    PdfUnavailable,

    #[error("Error exporting markdown: {0}")]
    Markdown(String),
}

/// Outcome of one export. `error_message` is empty exactly when `success`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportResult {
    pub success: bool,
    pub error_message: String,
}

impl ExportResult {
    pub fn ok() -> Self {
        Self {
            success: true,
            error_message: String::new(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error_message: message.into(),
        }
    }
}

impl From<Result<(), ExportError>> for ExportResult {
    fn from(result: Result<(), ExportError>) -> Self {
        match result {
            Ok(()) => ExportResult::ok(),
            Err(err) => {
                warn!(error = %err, "export failed");
                ExportResult::failed(err.to_string())
            }
        }
    }
}

/// Descriptive data about a document at export time.
#[derive(Debug, Clone, Serialize)]
pub struct ExportMetadata {
    pub timestamp: DateTime<Local>,
    pub statistics: Statistics,
    pub version: String,
}

/// Writes documents produced by a borrowed [`DocumentTransformer`].
pub struct Exporter<'t> {
    transformer: &'t DocumentTransformer,
    pdf_engine: Option<Box<dyn PdfEngine>>,
    print_css: PrintCss,
}

impl<'t> Exporter<'t> {
    /// Exporter using whichever Chrome/Chromium binary can be found.
    pub fn new(transformer: &'t DocumentTransformer) -> Self {
        let pdf_engine = ChromePdfEngine::detect().map(|e| Box::new(e) as Box<dyn PdfEngine>);
        if pdf_engine.is_none() {
            debug!("no PDF engine detected");
        }
        Self::with_pdf_engine(transformer, pdf_engine)
    }

    pub fn with_pdf_engine(
        transformer: &'t DocumentTransformer,
        pdf_engine: Option<Box<dyn PdfEngine>>,
    ) -> Self {
        Self {
            transformer,
            pdf_engine,
            print_css: PrintCss::default(),
        }
    }

    pub fn with_print_css(mut self, print_css: PrintCss) -> Self {
        self.print_css = print_css;
        self
    }

    pub fn pdf_available(&self) -> bool {
        self.pdf_engine.is_some()
    }

    /// Writes HTML to `path`: a full themed document when `standalone`,
    /// otherwise the converted body alone.
    pub fn export_html(
        &self,
        markdown: &str,
        path: &Path,
        theme_css: &str,
        standalone: bool,
    ) -> ExportResult {
        self.write_html(markdown, path, theme_css, standalone).into()
    }

    /// Prints the themed document to a PDF file at `path`.
    pub fn export_pdf(&self, markdown: &str, path: &Path, theme_css: &str) -> ExportResult {
        self.write_pdf(markdown, path, theme_css).into()
    }

    /// Writes the markdown text to `path` unchanged.
    pub fn export_markdown_copy(&self, markdown: &str, path: &Path) -> ExportResult {
        debug!(path = %path.display(), "exporting markdown copy");
        write_atomic(path, markdown.as_bytes())
            .map_err(|e| ExportError::Markdown(e.to_string()))
            .into()
    }

    pub fn get_export_metadata(&self, markdown: &str) -> ExportMetadata {
        ExportMetadata {
            timestamp: Local::now(),
            statistics: self.transformer.get_statistics(markdown),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    fn write_html(
        &self,
        markdown: &str,
        path: &Path,
        theme_css: &str,
        standalone: bool,
    ) -> Result<(), ExportError> {
        debug!(path = %path.display(), standalone, "exporting HTML");
        let html = if standalone {
            self.transformer
                .convert(markdown, theme_css)
                .map_err(|e| ExportError::Html(e.to_string()))?
        } else {
            self.transformer.convert_fragment(markdown)
        };

        write_atomic(path, html.as_bytes()).map_err(|e| ExportError::Html(e.to_string()))
    }

    fn write_pdf(&self, markdown: &str, path: &Path, theme_css: &str) -> Result<(), ExportError> {
        let engine = self.pdf_engine.as_ref().ok_or(ExportError::PdfUnavailable)?;
        debug!(path = %path.display(), engine = engine.name(), "exporting PDF");

        let html = self
            .transformer
            .convert(markdown, theme_css)
            .map_err(|e: RenderError| ExportError::Pdf(e.to_string()))?;
        let html = inject_print_css(&html, &self.print_css);

        let bytes = engine
            .render_pdf(&html)
            .map_err(|e| ExportError::Pdf(e.to_string()))?;

        write_atomic(path, &bytes).map_err(|e: FsError| ExportError::Pdf(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use std::sync::{Arc, Mutex};
    use tempfile::TempDir;

    const SAMPLE: &str = "# Title\n\nSome **bold** text.\n";

    /// Engine that records the HTML it was given and returns fixed bytes.
    #[derive(Default, Clone)]
    struct RecordingEngine {
        seen: Arc<Mutex<Option<String>>>,
    }

    impl PdfEngine for RecordingEngine {
        fn name(&self) -> &str {
            "recording"
        }

        fn render_pdf(&self, html: &str) -> Result<Vec<u8>, PdfError> {
            *self.seen.lock().unwrap() = Some(html.to_string());
            Ok(b"%PDF-1.4 fake".to_vec())
        }
    }

    struct FailingEngine;

    impl PdfEngine for FailingEngine {
        fn name(&self) -> &str {
            "failing"
        }

        fn render_pdf(&self, _html: &str) -> Result<Vec<u8>, PdfError> {
            Err(PdfError::NoOutput {
                binary: "fake-chrome".into(),
            })
        }
    }

    fn exporter_without_pdf(transformer: &DocumentTransformer) -> Exporter<'_> {
        Exporter::with_pdf_engine(transformer, None)
    }

    // ===========================================
    // ExportResult
    // ===========================================

    #[test]
    fn export_result_message_empty_on_success() {
        let result = ExportResult::from(Ok::<(), ExportError>(()));
        assert_eq!(result, ExportResult::ok());
        assert!(result.error_message.is_empty());
    }

    #[test]
    fn export_result_carries_error_text() {
        let result = ExportResult::from(Err(ExportError::Html("disk full".into())));
        assert!(!result.success);
        assert_eq!(result.error_message, "Error exporting HTML: disk full");
    }

    // ===========================================
    // HTML
    // ===========================================

    #[test]
    fn export_html_standalone_writes_full_document() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.html");
        let transformer = DocumentTransformer::new();

        let result = exporter_without_pdf(&transformer).export_html(SAMPLE, &path, "/* T */", true);

        assert!(result.success);
        let html = fs::read_to_string(&path).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("/* T */"));
        assert!(html.contains("<strong>bold</strong>"));
    }

    #[test]
    fn export_html_fragment_has_no_document_wrapper() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("fragment.html");
        let transformer = DocumentTransformer::new();

        let result = exporter_without_pdf(&transformer).export_html(SAMPLE, &path, "/* T */", false);

        assert!(result.success);
        let html = fs::read_to_string(&path).unwrap();
        assert!(!html.contains("<!DOCTYPE"));
        assert!(!html.contains("/* T */"));
        assert!(html.contains("<strong>bold</strong>"));
    }

    #[test]
    fn export_html_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("deeper").join("out.html");
        let transformer = DocumentTransformer::new();

        let result = exporter_without_pdf(&transformer).export_html(SAMPLE, &path, "", true);

        assert!(result.success, "{}", result.error_message);
        assert!(path.exists());
    }

    #[test]
    fn export_html_reports_unwritable_target() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();
        let transformer = DocumentTransformer::new();

        let result =
            exporter_without_pdf(&transformer).export_html(SAMPLE, &blocker.join("out.html"), "", true);

        assert!(!result.success);
        assert!(result.error_message.starts_with("Error exporting HTML: "));
    }

    // ===========================================
    // PDF
    // ===========================================

    #[test]
    fn export_pdf_without_engine_reports_missing_dependency() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.pdf");
        let transformer = DocumentTransformer::new();

        let result = exporter_without_pdf(&transformer).export_pdf(SAMPLE, &path, "");

        assert!(!result.success);
        assert_eq!(result.error_message, PDF_UNAVAILABLE_MESSAGE);
        assert!(result.error_message.contains("Chrome"));
        assert!(result.error_message.contains(CHROME_BIN_ENV));
        assert!(result.error_message.contains("export as HTML"));
        assert!(!path.exists());
    }

    #[test]
    fn export_pdf_writes_engine_output() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.pdf");
        let transformer = DocumentTransformer::new();
        let engine = RecordingEngine::default();
        let exporter = Exporter::with_pdf_engine(&transformer, Some(Box::new(engine.clone())));

        let result = exporter.export_pdf(SAMPLE, &path, "/* THEME */");

        assert!(result.success, "{}", result.error_message);
        assert_eq!(fs::read(&path).unwrap(), b"%PDF-1.4 fake");
        let seen = engine.seen.lock().unwrap().clone().unwrap();
        assert!(seen.contains("/* THEME */"));
    }

    #[test]
    fn export_pdf_print_css_follows_baseline() {
        let dir = TempDir::new().unwrap();
        let transformer = DocumentTransformer::new();
        let engine = RecordingEngine::default();
        let exporter = Exporter::with_pdf_engine(&transformer, Some(Box::new(engine.clone())))
            .with_print_css(PrintCss {
                page_size: "Letter".into(),
                margin: "1in".into(),
            });

        exporter.export_pdf(SAMPLE, &dir.path().join("out.pdf"), "");

        let seen = engine.seen.lock().unwrap().clone().unwrap();
        let baseline_at = seen.find("/* Base styles */").unwrap();
        let print_at = seen.find("/* Print styles */").unwrap();
        let close_at = seen.find("</style>").unwrap();
        assert!(baseline_at < print_at);
        assert!(print_at < close_at);
        assert!(seen.contains("size: Letter;"));
    }

    #[test]
    fn export_pdf_reports_engine_failure() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.pdf");
        let transformer = DocumentTransformer::new();
        let exporter = Exporter::with_pdf_engine(&transformer, Some(Box::new(FailingEngine)));

        let result = exporter.export_pdf(SAMPLE, &path, "");

        assert!(!result.success);
        assert!(result.error_message.starts_with("Error exporting PDF: "));
        assert!(!path.exists());
    }

    // ===========================================
    // Markdown copy and metadata
    // ===========================================

    #[test]
    fn export_markdown_copy_is_verbatim() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("copy.md");
        let transformer = DocumentTransformer::new();
        let markdown = "# Café\r\n\n- [ ] todo\n";

        let result = exporter_without_pdf(&transformer).export_markdown_copy(markdown, &path);

        assert!(result.success);
        assert_eq!(fs::read(&path).unwrap(), markdown.as_bytes());
    }

    #[test]
    fn export_markdown_copy_reports_failure() {
        let dir = TempDir::new().unwrap();
        let transformer = DocumentTransformer::new();

        let result = exporter_without_pdf(&transformer).export_markdown_copy("x", dir.path());

        assert!(!result.success);
        assert!(result.error_message.starts_with("Error exporting markdown: "));
    }

    #[test]
    fn export_metadata_includes_statistics_and_version() {
        let transformer = DocumentTransformer::new();
        let metadata = exporter_without_pdf(&transformer).get_export_metadata(SAMPLE);

        assert_eq!(metadata.statistics, transformer.get_statistics(SAMPLE));
        assert_eq!(metadata.version, env!("CARGO_PKG_VERSION"));

        let json = serde_json::to_value(&metadata).unwrap();
        assert!(json["timestamp"].is_string());
        assert_eq!(json["statistics"]["heading_count"], 1);
    }
}
