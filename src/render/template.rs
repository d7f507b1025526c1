//! Complete HTML document assembly.

use minijinja::{Environment, context};

use super::RenderError;

/// Document shell. Theme CSS is placed before the baseline rules, so on
/// equal specificity the baseline wins.
pub const DOCUMENT_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{{ title }}</title>
    <style>
{{ theme_css }}
{{ baseline_css }}
    </style>
    {{ scripts }}
</head>
<body>
{{ toc }}
{{ content }}
</body>
</html>
"##;

/// Theme-independent rules every rendered document carries.
pub const BASELINE_CSS: &str = r#"
/* Base styles */
body {
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', 'Roboto', 'Helvetica', 'Arial', sans-serif;
    line-height: 1.6;
    padding: 20px;
    max-width: 900px;
    margin: 0 auto;
}

/* Code block styling */
.highlight {
    background-color: #f6f8fa;
    border-radius: 6px;
    padding: 16px;
    overflow-x: auto;
    margin: 1em 0;
}

.highlighttable {
    border: none;
    margin: 0;
    width: auto;
}

.highlighttable td {
    border: none;
    padding: 0;
    vertical-align: top;
}

.highlighttable .linenos {
    padding-right: 12px;
    color: #6e7781;
    text-align: right;
    user-select: none;
}

.highlighttable pre {
    margin: 0;
}

code {
    font-family: 'Consolas', 'Monaco', 'Courier New', monospace;
    font-size: 0.9em;
}

/* Inline code */
p code, li code {
    background-color: rgba(175, 184, 193, 0.2);
    padding: 0.2em 0.4em;
    border-radius: 3px;
}

/* Table styling */
table {
    border-collapse: collapse;
    width: 100%;
    margin: 1em 0;
}

table th, table td {
    border: 1px solid #dfe2e5;
    padding: 6px 13px;
}

table tr:nth-child(2n) {
    background-color: #f6f8fa;
}

/* Task list styling */
.task-list-item {
    list-style-type: none;
}

.task-list-item input[type="checkbox"] {
    margin-right: 0.5em;
}

/* Blockquote styling */
blockquote {
    border-left: 4px solid #dfe2e5;
    color: #6a737d;
    padding-left: 1em;
    margin-left: 0;
}

/* Link styling */
a {
    color: #0366d6;
    text-decoration: none;
}

a:hover {
    text-decoration: underline;
}

/* Headings */
h1, h2, h3, h4, h5, h6 {
    margin-top: 24px;
    margin-bottom: 16px;
    font-weight: 600;
    line-height: 1.25;
}

h1 {
    font-size: 2em;
    border-bottom: 1px solid #eaecef;
    padding-bottom: 0.3em;
}

h2 {
    font-size: 1.5em;
    border-bottom: 1px solid #eaecef;
    padding-bottom: 0.3em;
}

.headerlink {
    margin-left: 0.3em;
    font-size: 0.8em;
    visibility: hidden;
}

h1:hover .headerlink, h2:hover .headerlink, h3:hover .headerlink,
h4:hover .headerlink, h5:hover .headerlink, h6:hover .headerlink {
    visibility: visible;
}

/* TOC styling */
.toc {
    background-color: #f6f8fa;
    border: 1px solid #d0d7de;
    border-radius: 6px;
    padding: 16px;
    margin-bottom: 16px;
}

.toc ul {
    list-style-type: none;
    padding-left: 1em;
}

/* Image styling */
img {
    max-width: 100%;
    height: auto;
}

/* Horizontal rule */
hr {
    border: 0;
    border-top: 1px solid #e1e4e8;
    margin: 24px 0;
}

/* Mark/highlight */
mark {
    background-color: #fff3cd;
    padding: 0.1em 0.2em;
}

/* Keyboard keys */
kbd {
    display: inline-block;
    padding: 3px 5px;
    font-size: 0.85em;
    line-height: 1;
    color: #444d56;
    vertical-align: middle;
    background-color: #fafbfc;
    border: 1px solid #d1d5da;
    border-radius: 3px;
    box-shadow: inset 0 -1px 0 #d1d5da;
}
"#;

/// Parts that go into the document shell.
pub(crate) struct DocumentParts<'a> {
    pub title: &'a str,
    pub theme_css: &'a str,
    pub scripts: &'a str,
    pub toc: &'a str,
    pub content: &'a str,
}

/// Fills [`DOCUMENT_TEMPLATE`]. Values are inserted verbatim; `title` must
/// already be escaped.
pub(crate) fn build_document(parts: &DocumentParts<'_>) -> Result<String, RenderError> {
    let mut env = Environment::new();
    env.add_template("document", DOCUMENT_TEMPLATE)?;
    let tmpl = env.get_template("document")?;

    let html = tmpl.render(context! {
        title => parts.title,
        theme_css => parts.theme_css,
        baseline_css => BASELINE_CSS,
        scripts => parts.scripts,
        toc => parts.toc,
        content => parts.content,
    })?;

    Ok(html)
}
