//! Table of contents entries and heading anchors.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

static ATX_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^(#{1,6})\s+(.+)$").unwrap());
static ANCHOR_STRIP: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\w\s-]").unwrap());
static ANCHOR_COLLAPSE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[-\s]+").unwrap());

/// A single heading in a document's table of contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TocEntry {
    /// Heading level, 1 through 6.
    pub level: u8,
    /// Heading text as written in the source, trimmed.
    pub title: String,
    /// Fragment identifier derived from the title with [`anchor_for`].
    pub anchor: String,
}

impl TocEntry {
    /// Creates an entry, deriving the anchor from the title.
    pub fn new(level: u8, title: impl Into<String>) -> Self {
        let title = title.into();
        let anchor = anchor_for(&title);
        Self {
            level,
            title,
            anchor,
        }
    }
}

/// Derives a fragment anchor from heading text.
///
/// - Converts to lowercase
/// - Removes everything except word characters, whitespace and hyphens
/// - Collapses each run of hyphens/whitespace into a single hyphen
///
/// Leading and trailing separators are kept, and equal titles give equal
/// anchors (no de-duplication happens here).
///
/// # Examples
///
/// ```
/// use mdrender::domain::anchor_for;
///
/// assert_eq!(anchor_for("Hello World"), "hello-world");
/// assert_eq!(anchor_for("API Reference (v2)"), "api-reference-v2");
/// assert_eq!(anchor_for("a -- b"), "a-b");
/// ```
pub fn anchor_for(title: &str) -> String {
    let lower = title.to_lowercase();
    let stripped = ANCHOR_STRIP.replace_all(&lower, "");
    ANCHOR_COLLAPSE.replace_all(&stripped, "-").into_owned()
}

/// Scans markdown source for ATX headings and returns them in document order.
///
/// This is a line scan over the raw text and does not run the markdown
/// parser, so it is cheap enough for navigation panes that never need HTML.
/// Lines inside fenced code blocks are not special-cased.
pub fn extract_toc(markdown: &str) -> Vec<TocEntry> {
    ATX_HEADING
        .captures_iter(markdown)
        .map(|caps| {
            let level = caps[1].len() as u8;
            TocEntry::new(level, caps[2].trim())
        })
        .collect()
}
