//! Content statistics computed from raw markdown text.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\w+").unwrap());
static HEADING: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^#{1,6}\s+.+$").unwrap());
static FENCED_BLOCK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)```.*?```").unwrap());
static LINK_OR_IMAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(!?)\[[^\]\n]*\]\([^)\n]*\)").unwrap());

/// Structural and content counts for a markdown document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistics {
    /// Newline-delimited segments, including a trailing empty one
    pub line_count: usize,
    /// Maximal runs of word characters
    pub word_count: usize,
    /// Total characters
    pub character_count: usize,
    /// Characters other than `' '` and `'\n'`
    pub character_count_no_spaces: usize,
    /// Lines that look like ATX headings
    pub heading_count: usize,
    /// Triple-backtick fenced regions
    pub code_block_count: usize,
    /// `[text](url)` patterns that are not images
    pub link_count: usize,
    /// `![alt](url)` patterns
    pub image_count: usize,
}

/// Computes statistics by independent pattern scans over the raw text.
///
/// Nothing here looks at rendered HTML, and nothing is cached: two calls on
/// the same input always agree.
///
/// Links and images come from one scan, so every `[text](url)` match is
/// counted exactly once: as an image when it starts with `!`, otherwise as a
/// link. Bracketed text that is not followed by `(url)` never swallows a later
/// image.
///
/// # Example
///
/// ```
/// use mdrender::domain::compute_statistics;
///
/// let stats = compute_statistics("# Title\n\nThis is a test with 10 words in total here.");
/// assert_eq!(stats.line_count, 3);
/// assert_eq!(stats.heading_count, 1);
/// ```
pub fn compute_statistics(markdown: &str) -> Statistics {
    let character_count = markdown.chars().count();
    let spaces_and_newlines = markdown.chars().filter(|&c| c == ' ' || c == '\n').count();

    let (mut link_count, mut image_count) = (0, 0);
    for caps in LINK_OR_IMAGE.captures_iter(markdown) {
        if caps[1].is_empty() {
            link_count += 1;
        } else {
            image_count += 1;
        }
    }

    Statistics {
        line_count: markdown.split('\n').count(),
        word_count: WORD.find_iter(markdown).count(),
        character_count,
        character_count_no_spaces: character_count - spaces_and_newlines,
        heading_count: HEADING.find_iter(markdown).count(),
        code_block_count: FENCED_BLOCK.find_iter(markdown).count(),
        link_count,
        image_count,
    }
}
