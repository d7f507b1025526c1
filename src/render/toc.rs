//! Nested table-of-contents block for rendered documents.

use crate::domain::TocEntry;

use super::escape_html;

/// Renders headings as a `<div class="toc">` of nested lists.
///
/// Deeper headings open a nested list inside the previous item; shallower
/// ones close lists until the level fits. Returns an empty string when
/// there are no headings.
pub(crate) fn render_toc_block(entries: &[TocEntry]) -> String {
    if entries.is_empty() {
        return String::new();
    }

    let mut html = String::from("<div class=\"toc\">\n");
    let mut open_levels: Vec<u8> = Vec::new();

    for entry in entries {
        match open_levels.last() {
            Some(&top) if entry.level <= top => {
                html.push_str("</li>\n");
                while open_levels.len() > 1 && open_levels.last().is_some_and(|&l| entry.level < l) {
                    open_levels.pop();
                    html.push_str("</ul>\n</li>\n");
                }
            }
            _ => {
                html.push_str("<ul>\n");
                open_levels.push(entry.level);
            }
        }
        html.push_str(&format!(
            "<li><a href=\"#{}\">{}</a>",
            escape_html(&entry.anchor),
            escape_html(&entry.title)
        ));
    }

    html.push_str("</li>\n</ul>\n");
    open_levels.pop();
    while open_levels.pop().is_some() {
        html.push_str("</li>\n</ul>\n");
    }
    html.push_str("</div>\n");
    html
}
