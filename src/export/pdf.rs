//! PDF rendering through a headless Chrome/Chromium process.
//!
//! The exporter renders a complete HTML document, inserts print rules with
//! [`inject_print_css`], then hands the page to a [`PdfEngine`]. The only
//! engine shipped is [`ChromePdfEngine`], which prints a temporary HTML file
//! with `--headless --print-to-pdf`.

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

use serde::Deserialize;
use tempfile::tempdir;
use thiserror::Error;
use tracing::debug;
use url::Url;
use which::which;

/// Environment variable naming an explicit Chrome/Chromium binary.
pub const CHROME_BIN_ENV: &str = "MDRENDER_CHROME_BIN";

/// Errors from a PDF engine.
#[derive(Debug, Error)]
pub enum PdfError {
    #[error("temporary file error: {0}")]
    Io(#[from] io::Error),

    #[error("failed to construct file:// URL for {path}")]
    Url { path: PathBuf },

    #[error("failed to launch {binary}: {source}")]
    Launch {
        binary: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{binary} exited with {status}")]
    Failed { binary: PathBuf, status: String },

    #[error("{binary} produced no PDF output")]
    NoOutput { binary: PathBuf },
}

/// Converts a complete HTML document to PDF bytes.
pub trait PdfEngine: Send + Sync {
    fn name(&self) -> &str;

    fn render_pdf(&self, html: &str) -> Result<Vec<u8>, PdfError>;
}

/// Page rules added to documents printed to PDF.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PrintCss {
    /// CSS `@page` size, e.g. `A4`, `Letter` or `210mm 297mm`.
    pub page_size: String,
    /// CSS `@page` margin, e.g. `2cm` or `1in`.
    pub margin: String,
}

impl Default for PrintCss {
    fn default() -> Self {
        Self {
            page_size: "A4".to_string(),
            margin: "2cm".to_string(),
        }
    }
}

impl PrintCss {
    pub fn to_css(&self) -> String {
        format!(
            r##"
/* Print styles */
@page {{
    size: {size};
    margin: {margin};
}}

body {{
    max-width: 100%;
}}

h1, h2, h3, h4, h5, h6 {{
    page-break-after: avoid;
}}

pre, blockquote, table {{
    page-break-inside: avoid;
}}

img {{
    max-width: 100%;
    page-break-inside: avoid;
}}

a[href]:after {{
    content: " (" attr(href) ")";
    font-size: 0.8em;
    color: #666;
}}

a[href^="#"]:after {{
    content: "";
}}
"##,
            size = self.page_size,
            margin = self.margin
        )
    }
}

/// Inserts print rules immediately before the first `</style>`, so they follow
/// the theme and baseline rules. Documents without a style block get a new
/// one before `</head>`, or at the start when there is no head either.
pub fn inject_print_css(html: &str, print_css: &PrintCss) -> String {
    let css = print_css.to_css();
    if html.contains("</style>") {
        return html.replacen("</style>", &format!("{css}</style>"), 1);
    }

    let style_tag = format!("<style>{css}</style>");
    match html.find("</head>") {
        Some(idx) => {
            let mut output = String::with_capacity(html.len() + style_tag.len());
            output.push_str(&html[..idx]);
            output.push_str(&style_tag);
            output.push_str(&html[idx..]);
            output
        }
        None => format!("{style_tag}{html}"),
    }
}

/// Prints HTML to PDF with a Chrome or Chromium binary.
#[derive(Debug, Clone)]
pub struct ChromePdfEngine {
    binary: PathBuf,
}

impl ChromePdfEngine {
    pub fn with_binary(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Locates a browser binary, or `None` when none is installed.
    pub fn detect() -> Option<Self> {
        let binary = resolve_chrome_binary()?;
        debug!(binary = %binary.display(), "detected PDF engine");
        Some(Self { binary })
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }
}

impl PdfEngine for ChromePdfEngine {
    fn name(&self) -> &str {
        "chrome"
    }

    fn render_pdf(&self, html: &str) -> Result<Vec<u8>, PdfError> {
        let temp_dir = tempdir()?;
        let html_path = temp_dir.path().join("mdrender-export.html");
        fs::write(&html_path, html)?;

        let pdf_path = temp_dir.path().join("mdrender-export.pdf");
        let file_url = Url::from_file_path(&html_path).map_err(|_| PdfError::Url {
            path: html_path.clone(),
        })?;

        debug!(binary = %self.binary.display(), "printing to PDF");
        let output = Command::new(&self.binary)
            .arg("--headless")
            .arg("--disable-gpu")
            .arg("--no-sandbox")
            .arg("--disable-dev-shm-usage")
            .arg("--no-pdf-header-footer")
            .arg(format!("--print-to-pdf={}", pdf_path.display()))
            .arg(file_url.as_str())
            .output()
            .map_err(|source| PdfError::Launch {
                binary: self.binary.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(PdfError::Failed {
                binary: self.binary.clone(),
                status: output.status.to_string(),
            });
        }

        match fs::read(&pdf_path) {
            Ok(bytes) if !bytes.is_empty() => Ok(bytes),
            Ok(_) => Err(PdfError::NoOutput {
                binary: self.binary.clone(),
            }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(PdfError::NoOutput {
                binary: self.binary.clone(),
            }),
            Err(e) => Err(e.into()),
        }
    }
}

fn resolve_chrome_binary() -> Option<PathBuf> {
    for var in [CHROME_BIN_ENV, "CHROME_BIN", "GOOGLE_CHROME_BIN"] {
        if let Some(path) = env::var_os(var)
            && !path.is_empty()
        {
            return Some(PathBuf::from(path));
        }
    }

    for candidate in [
        "google-chrome",
        "google-chrome-stable",
        "chromium",
        "chromium-browser",
        "chrome",
        "msedge",
    ] {
        if let Ok(path) = which(candidate) {
            return Some(path);
        }
    }

    platform_default_paths()
        .iter()
        .map(PathBuf::from)
        .find(|path| path.exists())
}

#[cfg(target_os = "macos")]
fn platform_default_paths() -> &'static [&'static str] {
    &[
        "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
        "/Applications/Chromium.app/Contents/MacOS/Chromium",
    ]
}

#[cfg(target_os = "windows")]
fn platform_default_paths() -> &'static [&'static str] {
    &[
        r"C:\Program Files\Google\Chrome\Application\chrome.exe",
        r"C:\Program Files (x86)\Google\Chrome\Application\chrome.exe",
    ]
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn platform_default_paths() -> &'static [&'static str] {
    &[
        "/usr/bin/google-chrome",
        "/usr/bin/google-chrome-stable",
        "/usr/bin/chromium-browser",
        "/usr/bin/chromium",
    ]
}
