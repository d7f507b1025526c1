//! Handler for the `themes` command.

use anyhow::Result;

use crate::cli::ThemesArgs;
use crate::cli::config::Config;
use crate::cli::output::{OutputFormat, ThemeListing, print_json};

use super::load_theme_store;

pub fn handle_themes(args: &ThemesArgs, config: &Config) -> Result<()> {
    let store = load_theme_store(config)?;
    let current = store.current_theme();

    match args.format {
        OutputFormat::Human => {
            for name in store.list_themes() {
                let marker = if name == current { "*" } else { " " };
                println!("{marker} {name}");
            }
        }
        OutputFormat::Json => {
            let listings: Vec<ThemeListing> = store
                .list_themes()
                .into_iter()
                .map(|name| ThemeListing {
                    name: name.to_string(),
                    current: name == current,
                })
                .collect();
            print_json(listings)?;
        }
    }
    Ok(())
}
