//! Handlers that write converted documents (html, pdf, copy).

use anyhow::{Result, bail};
use std::io::Write;

use crate::cli::config::Config;
use crate::cli::{CopyArgs, HtmlArgs, PdfArgs};
use crate::export::ExportResult;
use crate::render::DocumentTransformer;

use super::{build_exporter, document_exporter, load_markdown, load_theme_store, resolve_theme_css};

pub fn handle_html(args: &HtmlArgs, config: &Config) -> Result<()> {
    let markdown = load_markdown(&args.file)?;
    let store = load_theme_store(config)?;
    let theme_css = resolve_theme_css(&store, config, args.theme.as_deref());
    let transformer = DocumentTransformer::new();

    match &args.output {
        Some(path) => {
            let exporter = build_exporter(&transformer, config);
            let result = exporter.export_html(&markdown, path, &theme_css, !args.fragment);
            check(result)?;
            println!("Exported HTML to {}", path.display());
        }
        None => {
            let html = if args.fragment {
                transformer.convert_fragment(&markdown)
            } else {
                transformer.convert(&markdown, &theme_css)?
            };
            std::io::stdout().write_all(html.as_bytes())?;
        }
    }
    Ok(())
}

pub fn handle_pdf(args: &PdfArgs, config: &Config) -> Result<()> {
    let markdown = load_markdown(&args.file)?;
    let store = load_theme_store(config)?;
    let theme_css = resolve_theme_css(&store, config, args.theme.as_deref());
    let transformer = DocumentTransformer::new();
    let exporter = build_exporter(&transformer, config);

    check(exporter.export_pdf(&markdown, &args.output, &theme_css))?;
    println!("Exported PDF to {}", args.output.display());
    Ok(())
}

pub fn handle_copy(args: &CopyArgs) -> Result<()> {
    let markdown = load_markdown(&args.file)?;
    let transformer = DocumentTransformer::new();
    let exporter = document_exporter(&transformer);

    check(exporter.export_markdown_copy(&markdown, &args.output))?;
    println!("Copied markdown to {}", args.output.display());
    Ok(())
}

fn check(result: ExportResult) -> Result<()> {
    if !result.success {
        bail!("{}", result.error_message);
    }
    Ok(())
}
