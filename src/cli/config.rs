//! Configuration file support.

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::export::PrintCss;
use crate::theme::DEFAULT_THEME;

/// Application configuration loaded from config file.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Default theme name
    pub theme: Option<String>,

    /// Directory of `*.css` files registered as custom themes
    pub themes_dir: Option<PathBuf>,

    /// Chrome/Chromium binary used for PDF export
    pub chrome: Option<PathBuf>,

    /// PDF page settings
    #[serde(default)]
    pub pdf: PrintCss,
}

impl Config {
    /// Load configuration from `path`, or from the default location.
    ///
    /// A missing default config file yields the default config; a missing
    /// explicitly requested file is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) => {
                if !p.exists() {
                    bail!("config file not found: {}", p.display());
                }
                p.to_path_buf()
            }
            None => {
                let default = Self::config_path();
                if !default.exists() {
                    return Ok(Self::default());
                }
                default
            }
        };

        let contents = std::fs::read_to_string(&config_path)
            .with_context(|| format!("failed to read config file: {}", config_path.display()))?;

        Self::parse(&contents)
            .with_context(|| format!("failed to parse config file: {}", config_path.display()))
    }

    fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Returns the path to the config file.
    ///
    /// Default: `~/.config/mdrender/config.toml`
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("mdrender")
            .join("config.toml")
    }

    /// Resolve the theme name, with CLI argument taking precedence.
    ///
    /// Precedence order:
    /// 1. CLI `--theme` argument
    /// 2. Config file `theme` setting
    /// 3. `github`
    pub fn theme_name(&self, cli_theme: Option<&str>) -> String {
        cli_theme
            .map(str::to_string)
            .or_else(|| self.theme.clone())
            .unwrap_or_else(|| DEFAULT_THEME.to_string())
    }

    /// Themes directory with a leading `~` expanded to the home directory.
    pub fn themes_dir(&self) -> Option<PathBuf> {
        self.themes_dir.as_deref().map(expand_home)
    }
}

fn expand_home(path: &Path) -> PathBuf {
    match (path.strip_prefix("~"), dirs::home_dir()) {
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path.to_path_buf(),
    }
}
