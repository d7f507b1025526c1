//! CLI command definitions and handlers

pub mod config;
pub mod handlers;
pub mod output;

use clap::{ArgAction, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use output::OutputFormat;

/// mdrender - render markdown to themed HTML and PDF documents
#[derive(Parser, Debug)]
#[command(name = "mdrender", version, about, long_about = None)]
pub struct Cli {
    /// Config file (default: ~/.config/mdrender/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Convert a markdown file to HTML
    Html(HtmlArgs),

    /// Export a markdown file to PDF
    Pdf(PdfArgs),

    /// Copy a markdown file verbatim
    Copy(CopyArgs),

    /// Show document statistics
    Stats(StatsArgs),

    /// Show the table of contents
    Toc(TocArgs),

    /// List available themes
    Themes(ThemesArgs),

    /// Show export metadata as JSON
    Metadata(MetadataArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `html` command
#[derive(Parser, Debug)]
pub struct HtmlArgs {
    /// Markdown file to convert
    pub file: PathBuf,

    /// Output file (prints to stdout when omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Theme name (overrides config file)
    #[arg(short, long)]
    pub theme: Option<String>,

    /// Emit body HTML only, without document wrapper, CSS or TOC
    #[arg(long)]
    pub fragment: bool,
}

/// Arguments for the `pdf` command
#[derive(Parser, Debug)]
pub struct PdfArgs {
    /// Markdown file to export
    pub file: PathBuf,

    /// Output PDF file
    #[arg(short, long)]
    pub output: PathBuf,

    /// Theme name (overrides config file)
    #[arg(short, long)]
    pub theme: Option<String>,
}

/// Arguments for the `copy` command
#[derive(Parser, Debug)]
pub struct CopyArgs {
    /// Markdown file to copy
    pub file: PathBuf,

    /// Destination path
    pub output: PathBuf,
}

/// Arguments for the `stats` command
#[derive(Parser, Debug)]
pub struct StatsArgs {
    /// Markdown file to analyse
    pub file: PathBuf,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `toc` command
#[derive(Parser, Debug)]
pub struct TocArgs {
    /// Markdown file to scan
    pub file: PathBuf,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `themes` command
#[derive(Parser, Debug)]
pub struct ThemesArgs {
    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `metadata` command
#[derive(Parser, Debug)]
pub struct MetadataArgs {
    /// Markdown file to describe
    pub file: PathBuf,
}

/// Arguments for the `completions` command
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for (bash, zsh, fish)
    #[arg(value_enum)]
    pub shell: Shell,
}
