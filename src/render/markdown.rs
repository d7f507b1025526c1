//! Markdown to body HTML with the extension set applied.
//!
//! A single pass over the parser's events rewrites headings (ids and
//! permalinks), fenced code (highlighting and diagram fences), task list
//! items and inline text. Every call builds its own parser and anchor
//! registry, so nothing leaks between documents.

use std::collections::HashSet;

use pulldown_cmark::{CodeBlockKind, CowStr, Event, Parser, Tag};

use crate::domain::{TocEntry, anchor_for};

use super::extensions::{DiagramFenceRenderer, EmojiResolver, ExtensionSet};
use super::highlight::{fence_language, highlight_block, plain_block};
use super::{escape_html, inline};

/// Body HTML plus the headings encountered, with their final ids.
pub(crate) struct RenderedBody {
    pub html: String,
    pub headings: Vec<TocEntry>,
}

/// Hands out heading ids, suffixing `_1`, `_2`, ... on collisions.
#[derive(Default)]
struct AnchorRegistry {
    used: HashSet<String>,
}

impl AnchorRegistry {
    fn claim(&mut self, base: &str) -> String {
        let base = if base.is_empty() { "section" } else { base };
        let mut candidate = base.to_string();
        let mut n = 0;
        while self.used.contains(&candidate) {
            n += 1;
            candidate = format!("{base}_{n}");
        }
        self.used.insert(candidate.clone());
        candidate
    }
}

struct OpenHeading {
    level: u8,
    explicit_id: Option<String>,
    classes: Vec<String>,
    text: String,
    placeholder: usize,
}

struct OpenCode {
    language: Option<String>,
    source: String,
}

struct BodyPass<'r, 'a> {
    extensions: &'r ExtensionSet,
    diagram: &'r dyn DiagramFenceRenderer,
    emoji: &'r dyn EmojiResolver,
    out: Vec<Event<'a>>,
    pending_text: String,
    link_depth: usize,
    image_depth: usize,
    heading: Option<OpenHeading>,
    code: Option<OpenCode>,
    anchors: AnchorRegistry,
    headings: Vec<TocEntry>,
}

pub(crate) fn render_body(
    markdown: &str,
    extensions: &ExtensionSet,
    diagram: &dyn DiagramFenceRenderer,
    emoji: &dyn EmojiResolver,
) -> RenderedBody {
    let parser = Parser::new_ext(markdown, extensions.parser_options());

    let mut pass = BodyPass {
        extensions,
        diagram,
        emoji,
        out: Vec::new(),
        pending_text: String::new(),
        link_depth: 0,
        image_depth: 0,
        heading: None,
        code: None,
        anchors: AnchorRegistry::default(),
        headings: Vec::new(),
    };
    for event in parser {
        pass.push(event);
    }
    pass.flush_text();

    let mut html = String::with_capacity(markdown.len() * 3 / 2);
    pulldown_cmark::html::push_html(&mut html, pass.out.into_iter());

    RenderedBody {
        html,
        headings: pass.headings,
    }
}

impl<'a> BodyPass<'_, 'a> {
    fn push(&mut self, event: Event<'a>) {
        match event {
            Event::Text(text) => match self.code.as_mut() {
                Some(code) => code.source.push_str(&text),
                None => self.pending_text.push_str(&text),
            },
            other => {
                self.flush_text();
                self.handle(other);
            }
        }
    }

    fn handle(&mut self, event: Event<'a>) {
        match event {
            Event::Start(Tag::Heading(level, id, classes)) => {
                self.heading = Some(OpenHeading {
                    level: level as u8,
                    explicit_id: id.map(str::to_string),
                    classes: classes.into_iter().map(str::to_string).collect(),
                    text: String::new(),
                    placeholder: self.out.len(),
                });
                self.out.push(Event::Html(CowStr::Borrowed("")));
            }
            Event::End(Tag::Heading(..)) => self.close_heading(),
            Event::Start(Tag::CodeBlock(kind)) => {
                let language = match kind {
                    CodeBlockKind::Fenced(info) => fence_language(&info).map(str::to_string),
                    CodeBlockKind::Indented => None,
                };
                self.code = Some(OpenCode {
                    language,
                    source: String::new(),
                });
            }
            Event::End(Tag::CodeBlock(_)) => {
                if let Some(code) = self.code.take() {
                    let html = self.render_code(&code);
                    self.out.push(Event::Html(CowStr::from(html)));
                }
            }
            Event::Start(tag @ Tag::Link(..)) => {
                self.link_depth += 1;
                self.out.push(Event::Start(tag));
            }
            Event::End(tag @ Tag::Link(..)) => {
                self.link_depth = self.link_depth.saturating_sub(1);
                self.out.push(Event::End(tag));
            }
            Event::Start(tag @ Tag::Image(..)) => {
                self.image_depth += 1;
                self.out.push(Event::Start(tag));
            }
            Event::End(tag @ Tag::Image(..)) => {
                self.image_depth = self.image_depth.saturating_sub(1);
                self.out.push(Event::End(tag));
            }
            Event::Code(code) => {
                if let Some(heading) = self.heading.as_mut() {
                    heading.text.push_str(&code);
                }
                self.out.push(Event::Code(code));
            }
            Event::TaskListMarker(checked) => {
                self.mark_task_item();
                self.out.push(Event::TaskListMarker(checked));
            }
            Event::SoftBreak if self.extensions.newline_to_break => {
                self.out.push(Event::HardBreak);
            }
            other => self.out.push(other),
        }
    }

    fn flush_text(&mut self) {
        if self.pending_text.is_empty() {
            return;
        }
        let text = std::mem::take(&mut self.pending_text);
        if let Some(heading) = self.heading.as_mut() {
            heading.text.push_str(&text);
        }

        if self.image_depth > 0 {
            self.out.push(Event::Text(CowStr::from(text)));
        } else {
            inline::rewrite_text(
                &text,
                self.extensions,
                self.emoji,
                self.link_depth > 0,
                &mut self.out,
            );
        }
    }

    fn close_heading(&mut self) {
        let Some(heading) = self.heading.take() else {
            return;
        };
        let title = heading.text.trim().to_string();

        if !self.extensions.heading_permalinks {
            let open = format!("<h{}{}>", heading.level, class_attr(&heading.classes));
            self.out[heading.placeholder] = Event::Html(CowStr::from(open));
            self.out
                .push(Event::Html(CowStr::from(format!("</h{}>\n", heading.level))));
            self.headings.push(TocEntry {
                level: heading.level,
                anchor: anchor_for(&title),
                title,
            });
            return;
        }

        let base = heading
            .explicit_id
            .clone()
            .unwrap_or_else(|| anchor_for(&title));
        let anchor = self.anchors.claim(&base);
        let escaped = escape_html(&anchor);

        let open = format!(
            "<h{} id=\"{}\"{}>",
            heading.level,
            escaped,
            class_attr(&heading.classes)
        );
        self.out[heading.placeholder] = Event::Html(CowStr::from(open));
        self.out.push(Event::Html(CowStr::from(format!(
            "<a class=\"headerlink\" href=\"#{}\" title=\"Permanent link\">&para;</a></h{}>\n",
            escaped, heading.level
        ))));

        self.headings.push(TocEntry {
            level: heading.level,
            title,
            anchor,
        });
    }

    fn render_code(&self, code: &OpenCode) -> String {
        let language = code.language.as_deref();
        if language == Some(self.diagram.language()) {
            return self.diagram.render(&code.source);
        }
        if self.extensions.highlight_code {
            highlight_block(&code.source, language)
        } else {
            plain_block(&code.source, language)
        }
    }

    /// Swaps the enclosing `<li>` for one carrying the task-list class.
    fn mark_task_item(&mut self) {
        let item = self
            .out
            .iter()
            .rposition(|event| matches!(event, Event::Start(Tag::Item)));
        if let Some(index) = item {
            self.out[index] = Event::Html(CowStr::Borrowed("<li class=\"task-list-item\">"));
        }
    }
}

fn class_attr(classes: &[String]) -> String {
    if classes.is_empty() {
        String::new()
    } else {
        format!(" class=\"{}\"", escape_html(&classes.join(" ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::extensions::{MermaidFence, PassthroughEmoji};
    use pretty_assertions::assert_eq;

    fn body(markdown: &str) -> RenderedBody {
        render_body(
            markdown,
            &ExtensionSet::standard(),
            &MermaidFence,
            &PassthroughEmoji,
        )
    }

    #[test]
    fn test_heading_gets_id_and_permalink() {
        let html = body("# Hello World").html;
        assert_eq!(
            html,
            "<h1 id=\"hello-world\">Hello World<a class=\"headerlink\" href=\"#hello-world\" title=\"Permanent link\">&para;</a></h1>\n"
        );
    }

    #[test]
    fn test_duplicate_heading_ids_are_suffixed() {
        let rendered = body("## Intro\n\n## Intro\n\n## Intro");
        let anchors: Vec<&str> = rendered.headings.iter().map(|h| h.anchor.as_str()).collect();

        assert_eq!(anchors, vec!["intro", "intro_1", "intro_2"]);
        assert!(rendered.html.contains("id=\"intro_1\""));
    }

    #[test]
    fn test_anchor_state_does_not_leak_between_calls() {
        let first = body("# Intro");
        let second = body("# Intro");

        assert_eq!(first.headings[0].anchor, "intro");
        assert_eq!(second.headings[0].anchor, "intro");
    }

    #[test]
    fn test_heading_text_includes_inline_code() {
        let rendered = body("## Using `cargo test`");
        assert_eq!(rendered.headings[0].title, "Using cargo test");
        assert_eq!(rendered.headings[0].anchor, "using-cargo-test");
    }

    #[test]
    fn test_explicit_heading_id() {
        let rendered = body("# Setup {#install .big}");
        assert!(rendered.html.contains("<h1 id=\"install\" class=\"big\">"));
        assert_eq!(rendered.headings[0].anchor, "install");
    }

    #[test]
    fn test_symbol_only_heading_gets_fallback_id() {
        let rendered = body("# !!!");
        assert_eq!(rendered.headings[0].anchor, "section");
    }

    #[test]
    fn test_fenced_code_is_highlighted() {
        let html = body("```python\nprint('Hello')\n```").html;

        assert!(html.contains("<div class=\"highlight\">"));
        assert!(html.contains("<code class=\"language-python\">"));
        assert!(html.contains("print"));
    }

    #[test]
    fn test_mermaid_fence() {
        let html = body("```mermaid\ngraph TD;\n  A-->B;\n```").html;

        assert!(html.contains("<div class=\"mermaid\">graph TD;\n  A--&gt;B;\n</div>"));
        assert!(!html.contains("highlight"));
    }

    #[test]
    fn test_task_list_items() {
        let html = body("- [x] Done\n- [ ] Todo").html;

        assert_eq!(html.matches("<li class=\"task-list-item\">").count(), 2);
        assert!(html.contains("type=\"checkbox\""));
        assert!(html.contains("checked"));
    }

    #[test]
    fn test_plain_list_items_untouched() {
        let html = body("- Item 1\n- Item 2").html;
        assert!(html.contains("<li>Item 1</li>"));
    }

    #[test]
    fn test_soft_breaks_become_br() {
        let html = body("line one\nline two").html;
        assert!(html.contains("line one<br />"));
    }

    #[test]
    fn test_magic_link_not_applied_inside_links() {
        let html = body("[https://example.com](https://example.com)").html;
        assert_eq!(html.matches("<a ").count(), 1);
    }

    #[test]
    fn test_magic_link_in_paragraph() {
        let html = body("Visit https://example.com now").html;
        assert!(html.contains("<a class=\"magiclink\" href=\"https://example.com\">"));
    }

    #[test]
    fn test_mark_and_keys() {
        let html = body("==note== and ++ctrl+c++").html;

        assert!(html.contains("<mark>note</mark>"));
        assert!(html.contains("<kbd class=\"key-ctrl\">Ctrl</kbd>"));
    }

    #[test]
    fn test_image_alt_is_not_rewritten() {
        let html = body("![see ==this==](pic.png)").html;
        assert!(html.contains("alt=\"see ==this==\""));
    }

    #[test]
    fn test_commonmark_only() {
        let rendered = render_body(
            "# Title\n\n```rust\nfn x() {}\n```",
            &ExtensionSet::commonmark(),
            &MermaidFence,
            &PassthroughEmoji,
        );

        assert!(rendered.html.contains("<h1>Title</h1>"));
        assert!(rendered.html.contains("<pre><code class=\"language-rust\">"));
        assert_eq!(rendered.headings.len(), 1);
    }
}
