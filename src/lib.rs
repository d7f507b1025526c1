//! mdrender - markdown to themed HTML and PDF documents

pub mod cli;
pub mod domain;
pub mod export;
pub mod infra;
pub mod render;
pub mod theme;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{
    Cli, Command,
    config::Config,
    handlers::{
        handle_completions, handle_copy, handle_html, handle_metadata, handle_pdf, handle_stats,
        handle_themes, handle_toc,
    },
};

/// Main entry point for the CLI application.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load(cli.config.as_deref())?;

    match &cli.command {
        Command::Html(args) => handle_html(args, &config),
        Command::Pdf(args) => handle_pdf(args, &config),
        Command::Copy(args) => handle_copy(args),
        Command::Stats(args) => handle_stats(args),
        Command::Toc(args) => handle_toc(args),
        Command::Themes(args) => handle_themes(args, &config),
        Command::Metadata(args) => handle_metadata(args),
        Command::Completions(args) => handle_completions(args),
    }
}

/// Logs go to stderr. `RUST_LOG` wins over the `-v` count.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("mdrender={level}")));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
