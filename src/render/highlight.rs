//! Fenced code block highlighting with a line-number gutter.

use std::sync::LazyLock;

use syntect::html::{ClassStyle, ClassedHTMLGenerator};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;
use tracing::debug;

use super::escape_html;

static SYNTAX_SET: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);

/// First token of a fence info string: "rust,ignore" and "python title=x" name
/// `rust` and `python`.
pub(crate) fn fence_language(info: &str) -> Option<&str> {
    info.split(|c: char| c.is_whitespace() || c == ',' || c == '{')
        .find(|token| !token.is_empty())
}

/// Renders a code block as a two-column table: line numbers, then code
/// tokenised into CSS-classed spans.
pub(crate) fn highlight_block(source: &str, language: Option<&str>) -> String {
    let code = classed_spans(source, language).unwrap_or_else(|| escape_html(source));
    let line_count = source.lines().count().max(1);
    let gutter: Vec<String> = (1..=line_count).map(|n| n.to_string()).collect();
    let code_class = language
        .map(|lang| format!(" class=\"language-{}\"", escape_html(lang)))
        .unwrap_or_default();

    format!(
        "<div class=\"highlight\"><table class=\"highlighttable\"><tr>\
         <td class=\"linenos\"><div class=\"linenodiv\"><pre>{}</pre></div></td>\
         <td class=\"code\"><pre><code{}>{}</code></pre></td>\
         </tr></table></div>\n",
        gutter.join("\n"),
        code_class,
        code
    )
}

/// Plain code block for renderers with highlighting switched off.
pub(crate) fn plain_block(source: &str, language: Option<&str>) -> String {
    let code_class = language
        .map(|lang| format!(" class=\"language-{}\"", escape_html(lang)))
        .unwrap_or_default();
    format!("<pre><code{}>{}</code></pre>\n", code_class, escape_html(source))
}

fn classed_spans(source: &str, language: Option<&str>) -> Option<String> {
    let syntax_set: &SyntaxSet = &SYNTAX_SET;
    let syntax = language
        .and_then(|lang| syntax_set.find_syntax_by_token(lang))
        .unwrap_or_else(|| syntax_set.find_syntax_plain_text());

    let mut generator =
        ClassedHTMLGenerator::new_with_class_style(syntax, syntax_set, ClassStyle::Spaced);
    for line in LinesWithEndings::from(source) {
        if let Err(err) = generator.parse_html_for_line_which_includes_newline(line) {
            debug!(language = ?language, error = %err, "highlighting failed, using plain code");
            return None;
        }
    }
    Some(generator.finalize())
}
