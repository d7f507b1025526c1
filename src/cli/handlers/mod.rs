//! Command handlers for the CLI.

mod completions;
mod convert;
mod inspect;
mod themes;

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::export::{ChromePdfEngine, Exporter, PdfEngine};
use crate::infra::{is_markdown_file, read_markdown};
use crate::render::DocumentTransformer;
use crate::theme::ThemeStore;

use super::config::Config;

// Re-export public items
pub use completions::handle_completions;
pub use convert::{handle_copy, handle_html, handle_pdf};
pub use inspect::{handle_metadata, handle_stats, handle_toc};
pub use themes::handle_themes;

// ===========================================
// Shared Utilities
// ===========================================

/// Reads a markdown input file. Unknown extensions are converted anyway.
pub(crate) fn load_markdown(path: &Path) -> Result<String> {
    if !is_markdown_file(path) {
        warn!(path = %path.display(), "input does not have a markdown extension");
    }
    Ok(read_markdown(path)?)
}

/// Built-in themes plus any custom themes from the configured directory,
/// with the configured theme selected.
pub(crate) fn load_theme_store(config: &Config) -> Result<ThemeStore> {
    let mut store = ThemeStore::new();

    if let Some(dir) = config.themes_dir() {
        let loaded = store
            .load_themes_from_dir(&dir)
            .with_context(|| format!("failed to load themes from {}", dir.display()))?;
        info!(dir = %dir.display(), loaded, "loaded custom themes");
    }

    if let Some(name) = &config.theme {
        store.set_current_theme(name);
    }
    Ok(store)
}

/// CSS for the theme chosen by `--theme` or the config file.
pub(crate) fn resolve_theme_css(
    store: &ThemeStore,
    config: &Config,
    cli_theme: Option<&str>,
) -> String {
    let name = config.theme_name(cli_theme);
    if !store.list_themes().contains(&name.as_str()) {
        warn!(theme = %name, "unknown theme, using the default");
    }
    store.get_theme_css(Some(&name)).to_string()
}

/// Exporter using the configured Chrome binary, or a detected one.
pub(crate) fn build_exporter<'t>(
    transformer: &'t DocumentTransformer,
    config: &Config,
) -> Exporter<'t> {
    let exporter = match &config.chrome {
        Some(binary) => {
            let engine: Box<dyn PdfEngine> = Box::new(ChromePdfEngine::with_binary(binary));
            Exporter::with_pdf_engine(transformer, Some(engine))
        }
        None => Exporter::new(transformer),
    };
    exporter.with_print_css(config.pdf.clone())
}

/// Exporter for commands that never print PDF. Skips browser detection.
pub(crate) fn document_exporter(transformer: &DocumentTransformer) -> Exporter<'_> {
    Exporter::with_pdf_engine(transformer, None)
}
