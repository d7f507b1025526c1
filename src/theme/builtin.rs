//! Built-in CSS palettes.

/// Light palette modelled on GitHub's markdown styling.
pub const THEME_GITHUB: &str = r#"
body {
    background-color: #ffffff;
    color: #24292e;
}
a { color: #0366d6; }
code {
    background-color: rgba(27, 31, 35, 0.05);
    color: #24292e;
}
.highlight {
    background-color: #f6f8fa;
}
blockquote {
    color: #6a737d;
    border-left-color: #dfe2e5;
}
table th, table td {
    border-color: #dfe2e5;
}
table tr:nth-child(2n) {
    background-color: #f6f8fa;
}
h1, h2 {
    border-bottom-color: #eaecef;
}
hr {
    border-top-color: #e1e4e8;
}
.toc {
    background-color: #f6f8fa;
    border-color: #d0d7de;
}
"#;

/// Dark palette.
pub const THEME_DARK: &str = r#"
body {
    background-color: #0d1117;
    color: #c9d1d9;
}
a { color: #58a6ff; }
code {
    background-color: rgba(110, 118, 129, 0.4);
    color: #c9d1d9;
}
.highlight {
    background-color: #161b22;
}
blockquote {
    color: #8b949e;
    border-left-color: #30363d;
}
table th, table td {
    border-color: #30363d;
}
table tr:nth-child(2n) {
    background-color: #161b22;
}
h1, h2 {
    border-bottom-color: #21262d;
}
hr {
    border-top-color: #30363d;
}
.toc {
    background-color: #161b22;
    border-color: #30363d;
}
"#;

/// Solarized light palette.
pub const THEME_SOLARIZED_LIGHT: &str = r#"
body {
    background-color: #fdf6e3;
    color: #657b83;
}
a { color: #268bd2; }
code {
    background-color: #eee8d5;
    color: #657b83;
}
.highlight {
    background-color: #eee8d5;
}
blockquote {
    color: #93a1a1;
    border-left-color: #eee8d5;
}
table th, table td {
    border-color: #eee8d5;
}
table tr:nth-child(2n) {
    background-color: #eee8d5;
}
h1, h2 {
    color: #586e75;
    border-bottom-color: #eee8d5;
}
hr {
    border-top-color: #eee8d5;
}
.toc {
    background-color: #eee8d5;
    border-color: #93a1a1;
}
"#;

/// Solarized dark palette.
pub const THEME_SOLARIZED_DARK: &str = r#"
body {
    background-color: #002b36;
    color: #839496;
}
a { color: #268bd2; }
code {
    background-color: #073642;
    color: #839496;
}
.highlight {
    background-color: #073642;
}
blockquote {
    color: #586e75;
    border-left-color: #073642;
}
table th, table td {
    border-color: #073642;
}
table tr:nth-child(2n) {
    background-color: #073642;
}
h1, h2 {
    color: #93a1a1;
    border-bottom-color: #073642;
}
hr {
    border-top-color: #073642;
}
.toc {
    background-color: #073642;
    border-color: #586e75;
}
"#;

/// Built-in themes in registration order.
pub(crate) const BUILTIN_THEMES: [(&str, &str); 4] = [
    ("github", THEME_GITHUB),
    ("dark", THEME_DARK),
    ("solarized-light", THEME_SOLARIZED_LIGHT),
    ("solarized-dark", THEME_SOLARIZED_DARK),
];
