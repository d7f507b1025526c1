//! Inline text extensions: highlight marks, keyboard keys, bare URLs and
//! emoji shortcodes.
//!
//! The parser hands us plain text runs; each run is scanned once and split
//! into text and HTML events.

use std::sync::LazyLock;

use pulldown_cmark::{CowStr, Event};
use regex::{Captures, Regex};

use super::escape_html;
use super::extensions::{EmojiResolver, ExtensionSet};

static INLINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"==(?P<mark>[^=\s](?:[^=]*?[^=\s])?)==",
        r"|\+\+(?P<keys>[A-Za-z0-9][\w-]*(?:\+[A-Za-z0-9][\w-]*)*)\+\+",
        r"|(?P<url>\b(?:https?://|www\.)[^\s<>\x22']+)",
        r"|:(?P<emoji>[a-z0-9_+-]+):",
    ))
    .unwrap()
});

const URL_TRAILING: &[char] = &['.', ',', ';', ':', '!', '?', ')'];

/// Rewrites one text run into events.
///
/// `in_link` suppresses bare-URL linking so existing anchors are not nested.
pub(crate) fn rewrite_text<'a>(
    text: &str,
    extensions: &ExtensionSet,
    emoji: &dyn EmojiResolver,
    in_link: bool,
    out: &mut Vec<Event<'a>>,
) {
    if !extensions.rewrites_inline_text() {
        out.push(Event::Text(CowStr::from(text.to_string())));
        return;
    }

    let mut plain = String::new();
    let mut last = 0;
    let mut pos = 0;

    // A rejected match gives up only its first character, so patterns that
    // start inside it are still found.
    while let Some(caps) = INLINE.captures_at(text, pos) {
        let Some(start) = caps.get(0).map(|m| m.start()) else {
            break;
        };
        let Some((html, consumed)) = replacement(&caps, extensions, emoji, in_link) else {
            pos = start + text[start..].chars().next().map_or(1, char::len_utf8);
            continue;
        };

        plain.push_str(&text[last..start]);
        if !plain.is_empty() {
            out.push(Event::Text(CowStr::from(std::mem::take(&mut plain))));
        }
        out.push(Event::Html(CowStr::from(html)));
        last = start + consumed;
        pos = last;
    }

    plain.push_str(&text[last..]);
    if !plain.is_empty() {
        out.push(Event::Text(CowStr::from(plain)));
    }
}

/// HTML for a match and how many bytes of it were consumed, or `None` to
/// leave the match as plain text.
fn replacement(
    caps: &Captures<'_>,
    extensions: &ExtensionSet,
    emoji: &dyn EmojiResolver,
    in_link: bool,
) -> Option<(String, usize)> {
    let whole = caps.get(0)?.as_str();

    if let Some(inner) = caps.name("mark") {
        if !extensions.mark {
            return None;
        }
        return Some((format!("<mark>{}</mark>", escape_html(inner.as_str())), whole.len()));
    }

    if let Some(keys) = caps.name("keys") {
        if !extensions.keys {
            return None;
        }
        return Some((render_keys(keys.as_str()), whole.len()));
    }

    if let Some(url) = caps.name("url") {
        if !extensions.magic_links || in_link {
            return None;
        }
        let url = url.as_str().trim_end_matches(URL_TRAILING);
        if url.ends_with("://") || url == "www." {
            return None;
        }
        let href = if url.starts_with("www.") {
            format!("http://{url}")
        } else {
            url.to_string()
        };
        return Some((
            format!(
                "<a class=\"magiclink\" href=\"{}\">{}</a>",
                escape_html(&href),
                escape_html(url)
            ),
            url.len(),
        ));
    }

    if let Some(code) = caps.name("emoji") {
        if !extensions.emoji {
            return None;
        }
        return emoji.resolve(code.as_str()).map(|html| (html, whole.len()));
    }

    None
}

/// `ctrl+alt+del` → `<span class="keys"><kbd class="key-ctrl">Ctrl</kbd>…</span>`
fn render_keys(combo: &str) -> String {
    let keys: Vec<String> = combo
        .split('+')
        .map(|key| {
            let lower = key.to_ascii_lowercase();
            format!(
                "<kbd class=\"key-{}\">{}</kbd>",
                escape_html(&lower),
                escape_html(&key_label(&lower))
            )
        })
        .collect();
    format!("<span class=\"keys\">{}</span>", keys.join("<span>+</span>"))
}

fn key_label(key: &str) -> String {
    let known = match key {
        "ctrl" | "control" => "Ctrl",
        "alt" => "Alt",
        "shift" => "Shift",
        "cmd" | "command" => "Cmd",
        "meta" | "super" | "win" | "windows" => "Meta",
        "del" | "delete" => "Del",
        "esc" | "escape" => "Esc",
        "enter" | "return" => "Enter",
        "tab" => "Tab",
        "space" => "Space",
        "backspace" => "Backspace",
        "up" => "Up",
        "down" => "Down",
        "left" => "Left",
        "right" => "Right",
        "pgup" | "page-up" => "Page Up",
        "pgdn" | "page-down" => "Page Down",
        "home" => "Home",
        "end" => "End",
        "ins" | "insert" => "Ins",
        _ => {
            let mut chars = key.chars();
            return match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            };
        }
    };
    known.to_string()
}
