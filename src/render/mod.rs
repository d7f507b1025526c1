//! Markdown to styled HTML documents.
//!
//! [`DocumentTransformer`] wraps `pulldown-cmark` with a fixed extension set
//! (see [`ExtensionSet::standard`]) and assembles complete documents with a
//! table of contents, theme CSS and baseline CSS.

mod extensions;
mod highlight;
mod inline;
mod markdown;
mod template;
mod toc;

use thiserror::Error;
use tracing::debug;

use crate::domain::{Statistics, TocEntry, compute_statistics, extract_toc};

pub use extensions::{
    DiagramFenceRenderer, EmojiResolver, ExtensionSet, MERMAID_SCRIPT_URL, MermaidFence,
    PassthroughEmoji,
};
pub use template::{BASELINE_CSS, DOCUMENT_TEMPLATE};

use template::{DocumentParts, build_document};

/// Title used when a document has no headings.
pub const DEFAULT_TITLE: &str = "Markdown Preview";

/// Errors while assembling a document.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),
}

/// Everything produced by one conversion.
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    /// Converted markdown, without any document wrapper.
    pub html_body: String,
    /// Headings in document order, with the ids used in `html_body`.
    pub toc: Vec<TocEntry>,
    /// `<div class="toc">` block, empty when there are no headings.
    pub toc_html: String,
    /// Complete HTML5 document.
    pub full_html: String,
}

/// Converts markdown into HTML documents.
///
/// Holds only immutable configuration. Each call parses with a fresh parser
/// and a fresh heading-id registry, so results never depend on earlier calls
/// and a shared transformer can be used from several threads.
pub struct DocumentTransformer {
    extensions: ExtensionSet,
    diagram: Box<dyn DiagramFenceRenderer>,
    emoji: Box<dyn EmojiResolver>,
}

impl Default for DocumentTransformer {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentTransformer {
    /// Transformer with the standard extension set, Mermaid diagrams and
    /// pass-through emoji shortcodes.
    pub fn new() -> Self {
        Self {
            extensions: ExtensionSet::standard(),
            diagram: Box::new(MermaidFence),
            emoji: Box::new(PassthroughEmoji),
        }
    }

    pub fn with_extensions(mut self, extensions: ExtensionSet) -> Self {
        self.extensions = extensions;
        self
    }

    pub fn with_diagram_renderer(mut self, renderer: impl DiagramFenceRenderer + 'static) -> Self {
        self.diagram = Box::new(renderer);
        self
    }

    pub fn with_emoji_resolver(mut self, resolver: impl EmojiResolver + 'static) -> Self {
        self.emoji = Box::new(resolver);
        self
    }

    pub fn extensions(&self) -> &ExtensionSet {
        &self.extensions
    }

    /// Converts markdown to a complete HTML document styled with `theme_css`.
    ///
    /// # Example
    ///
    /// ```
    /// use mdrender::render::DocumentTransformer;
    ///
    /// let html = DocumentTransformer::new()
    ///     .convert("# Hello World\n\nThis is a test.", "")
    ///     .unwrap();
    /// assert!(html.starts_with("<!DOCTYPE html>"));
    /// assert!(html.contains("<p>This is a test.</p>"));
    /// ```
    pub fn convert(&self, markdown: &str, theme_css: &str) -> Result<String, RenderError> {
        Ok(self.render(markdown, theme_css)?.full_html)
    }

    /// Runs a conversion and returns every artifact it produced.
    pub fn render(&self, markdown: &str, theme_css: &str) -> Result<RenderedDocument, RenderError> {
        let body = markdown::render_body(
            markdown,
            &self.extensions,
            self.diagram.as_ref(),
            self.emoji.as_ref(),
        );
        let toc_html = toc::render_toc_block(&body.headings);

        let title = body
            .headings
            .first()
            .map(|h| h.title.as_str())
            .filter(|t| !t.is_empty())
            .unwrap_or(DEFAULT_TITLE);
        let title = escape_html(title);
        let scripts = self.diagram.script_tags();

        let full_html = build_document(&DocumentParts {
            title: &title,
            theme_css,
            scripts: &scripts,
            toc: &toc_html,
            content: &body.html,
        })?;

        debug!(
            input_bytes = markdown.len(),
            output_bytes = full_html.len(),
            headings = body.headings.len(),
            "converted markdown"
        );

        Ok(RenderedDocument {
            html_body: body.html,
            toc: body.headings,
            toc_html,
            full_html,
        })
    }

    /// Converts markdown to body HTML only: no document wrapper, no CSS, no TOC.
    pub fn convert_fragment(&self, markdown: &str) -> String {
        markdown::render_body(
            markdown,
            &self.extensions,
            self.diagram.as_ref(),
            self.emoji.as_ref(),
        )
        .html
    }

    /// Headings found by scanning the raw text, without converting it.
    pub fn extract_toc(&self, markdown: &str) -> Vec<TocEntry> {
        extract_toc(markdown)
    }

    pub fn get_statistics(&self, markdown: &str) -> Statistics {
        compute_statistics(markdown)
    }
}

/// Escapes text for use in HTML content and double-quoted attributes.
pub(crate) fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
