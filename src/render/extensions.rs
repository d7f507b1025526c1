//! Markdown dialect configuration and pluggable fence/emoji strategies.

use pulldown_cmark::Options;

use super::escape_html;

/// CDN location of the diagram renderer loaded by rendered documents.
pub const MERMAID_SCRIPT_URL: &str = "https://cdn.jsdelivr.net/npm/mermaid/dist/mermaid.min.js";

/// The fixed set of markdown extensions applied on every conversion.
///
/// Constructed once and shared read-only by the transformer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtensionSet {
    /// GitHub-style pipe tables
    pub tables: bool,
    /// `[^1]` footnotes
    pub footnotes: bool,
    /// `~~text~~`
    pub strikethrough: bool,
    /// `- [x] done` checkboxes
    pub task_lists: bool,
    /// `# Heading {#id .class}`
    pub heading_attributes: bool,
    /// Syntax-highlighted fenced code with a line-number gutter
    pub highlight_code: bool,
    /// `id` plus a trailing permalink on every heading
    pub heading_permalinks: bool,
    /// Bare URLs become links
    pub magic_links: bool,
    /// `==text==` becomes `<mark>`
    pub mark: bool,
    /// `++ctrl+c++` becomes `<kbd>` keys
    pub keys: bool,
    /// `:shortcode:` is handed to the emoji resolver
    pub emoji: bool,
    /// Single newlines inside a paragraph become `<br />`
    pub newline_to_break: bool,
}

impl Default for ExtensionSet {
    fn default() -> Self {
        Self::standard()
    }
}

impl ExtensionSet {
    /// Every extension enabled; the dialect used by the preview and all exports.
    pub const fn standard() -> Self {
        Self {
            tables: true,
            footnotes: true,
            strikethrough: true,
            task_lists: true,
            heading_attributes: true,
            highlight_code: true,
            heading_permalinks: true,
            magic_links: true,
            mark: true,
            keys: true,
            emoji: true,
            newline_to_break: true,
        }
    }

    /// Plain CommonMark with no extensions.
    pub const fn commonmark() -> Self {
        Self {
            tables: false,
            footnotes: false,
            strikethrough: false,
            task_lists: false,
            heading_attributes: false,
            highlight_code: false,
            heading_permalinks: false,
            magic_links: false,
            mark: false,
            keys: false,
            emoji: false,
            newline_to_break: false,
        }
    }

    pub(crate) fn parser_options(&self) -> Options {
        let mut options = Options::empty();
        if self.tables {
            options.insert(Options::ENABLE_TABLES);
        }
        if self.footnotes {
            options.insert(Options::ENABLE_FOOTNOTES);
        }
        if self.strikethrough {
            options.insert(Options::ENABLE_STRIKETHROUGH);
        }
        if self.task_lists {
            options.insert(Options::ENABLE_TASKLISTS);
        }
        if self.heading_attributes {
            options.insert(Options::ENABLE_HEADING_ATTRIBUTES);
        }
        options
    }

    pub(crate) fn rewrites_inline_text(&self) -> bool {
        self.magic_links || self.mark || self.keys || self.emoji
    }
}

/// Renders fenced code blocks tagged with a diagram language.
///
/// The diagram itself is drawn by a script in the consuming browser; the
/// renderer only wraps the source and names the scripts to load.
pub trait DiagramFenceRenderer: Send + Sync {
    /// Fence info string that selects this renderer.
    fn language(&self) -> &str;

    /// HTML replacing the fenced block.
    fn render(&self, source: &str) -> String;

    /// `<script>` tags placed in the document head.
    fn script_tags(&self) -> String;
}

/// Mermaid diagrams, drawn client-side by the Mermaid CDN bundle.
#[derive(Debug, Clone, Copy, Default)]
pub struct MermaidFence;

impl DiagramFenceRenderer for MermaidFence {
    fn language(&self) -> &str {
        "mermaid"
    }

    fn render(&self, source: &str) -> String {
        format!("<div class=\"mermaid\">{}</div>\n", escape_html(source))
    }

    fn script_tags(&self) -> String {
        format!(
            "<script src=\"{MERMAID_SCRIPT_URL}\"></script>\n    <script>\n        mermaid.initialize({{ startOnLoad: true, theme: 'default' }});\n    </script>"
        )
    }
}

/// Maps an emoji shortcode (without colons) to replacement HTML.
pub trait EmojiResolver: Send + Sync {
    /// `None` leaves `:shortcode:` in the output unchanged.
    fn resolve(&self, shortcode: &str) -> Option<String>;
}

/// Recognises shortcodes but never substitutes them.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughEmoji;

impl EmojiResolver for PassthroughEmoji {
    fn resolve(&self, _shortcode: &str) -> Option<String> {
        None
    }
}
