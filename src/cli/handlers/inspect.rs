//! Handlers that describe a document without writing files (stats, toc, metadata).

use anyhow::Result;

use crate::cli::output::{OutputFormat, print_json};
use crate::cli::{MetadataArgs, StatsArgs, TocArgs};
use crate::domain::{Statistics, TocEntry};
use crate::render::DocumentTransformer;

use super::{document_exporter, load_markdown};

pub fn handle_stats(args: &StatsArgs) -> Result<()> {
    let markdown = load_markdown(&args.file)?;
    let stats = DocumentTransformer::new().get_statistics(&markdown);

    match args.format {
        OutputFormat::Human => print!("{}", format_statistics(&stats)),
        OutputFormat::Json => print_json(stats)?,
    }
    Ok(())
}

pub fn handle_toc(args: &TocArgs) -> Result<()> {
    let markdown = load_markdown(&args.file)?;
    let toc = DocumentTransformer::new().extract_toc(&markdown);

    match args.format {
        OutputFormat::Human => {
            if toc.is_empty() {
                println!("No headings found.");
            } else {
                print!("{}", format_toc(&toc));
            }
        }
        OutputFormat::Json => print_json(&toc)?,
    }
    Ok(())
}

pub fn handle_metadata(args: &MetadataArgs) -> Result<()> {
    let markdown = load_markdown(&args.file)?;
    let transformer = DocumentTransformer::new();
    let metadata = document_exporter(&transformer).get_export_metadata(&markdown);

    print_json(metadata)
}

fn format_statistics(stats: &Statistics) -> String {
    let rows = [
        ("Lines", stats.line_count),
        ("Words", stats.word_count),
        ("Characters", stats.character_count),
        ("Characters (no spaces)", stats.character_count_no_spaces),
        ("Headings", stats.heading_count),
        ("Code blocks", stats.code_block_count),
        ("Links", stats.link_count),
        ("Images", stats.image_count),
    ];
    rows.iter()
        .map(|(label, value)| format!("{:<24}{}\n", format!("{label}:"), value))
        .collect()
}

fn format_toc(toc: &[TocEntry]) -> String {
    toc.iter()
        .map(|entry| {
            let indent = "  ".repeat(usize::from(entry.level.saturating_sub(1)));
            format!("{indent}- {} (#{})\n", entry.title, entry.anchor)
        })
        .collect()
}
