//! Named CSS themes for rendered documents.
//!
//! The store is seeded with four built-in palettes and accepts custom
//! themes at runtime. Lookups never fail: an unknown name resolves to the
//! default `github` theme.

mod builtin;

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

pub use builtin::{THEME_DARK, THEME_GITHUB, THEME_SOLARIZED_DARK, THEME_SOLARIZED_LIGHT};

/// Name of the theme used when nothing else matches.
pub const DEFAULT_THEME: &str = "github";

/// A named CSS ruleset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    name: String,
    css: String,
}

impl Theme {
    pub fn new(name: impl Into<String>, css: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            css: css.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn css(&self) -> &str {
        &self.css
    }
}

/// Errors while loading custom themes from disk.
#[derive(Debug, Error)]
pub enum ThemeError {
    #[error("theme directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    #[error("failed to read theme {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Registry of themes keyed by name, in registration order.
#[derive(Debug, Clone)]
pub struct ThemeStore {
    themes: Vec<Theme>,
    current: String,
}

impl Default for ThemeStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ThemeStore {
    /// Creates a store holding the built-in themes, with `github` current.
    pub fn new() -> Self {
        let themes = builtin::BUILTIN_THEMES
            .iter()
            .map(|(name, css)| Theme::new(*name, *css))
            .collect();
        Self {
            themes,
            current: DEFAULT_THEME.to_string(),
        }
    }

    fn find(&self, name: &str) -> Option<&Theme> {
        self.themes.iter().find(|t| t.name == name)
    }

    /// Returns the CSS for `name`, or for the current theme when `None`.
    ///
    /// Unknown names fall back to the default theme.
    pub fn get_theme_css(&self, name: Option<&str>) -> &str {
        let name = name.unwrap_or(&self.current);
        match self.find(name) {
            Some(theme) => theme.css(),
            None => {
                debug!(theme = name, fallback = DEFAULT_THEME, "unknown theme");
                self.find(DEFAULT_THEME).map(Theme::css).unwrap_or(THEME_GITHUB)
            }
        }
    }

    /// Switches the current theme. Unknown names are ignored.
    pub fn set_current_theme(&mut self, name: &str) {
        if self.find(name).is_some() {
            self.current = name.to_string();
        } else {
            debug!(theme = name, "ignoring unknown theme");
        }
    }

    pub fn current_theme(&self) -> &str {
        &self.current
    }

    /// Names of every registered theme, built-ins first.
    pub fn list_themes(&self) -> Vec<&str> {
        self.themes.iter().map(Theme::name).collect()
    }

    /// Registers a theme, replacing any existing theme of the same name in place.
    pub fn load_custom_theme(&mut self, name: &str, css: &str) {
        match self.themes.iter_mut().find(|t| t.name == name) {
            Some(existing) => existing.css = css.to_string(),
            None => self.themes.push(Theme::new(name, css)),
        }
    }

    /// Registers every `*.css` file in `dir` as a theme named after its file stem.
    ///
    /// Files are loaded in file-name order. Returns the number of themes loaded.
    ///
    /// # Errors
    ///
    /// Returns `ThemeError::DirectoryNotFound` if `dir` is not a directory, or
    /// `ThemeError::Io` if a file cannot be read.
    pub fn load_themes_from_dir(&mut self, dir: &Path) -> Result<usize, ThemeError> {
        if !dir.is_dir() {
            return Err(ThemeError::DirectoryNotFound { path: dir.into() });
        }

        let entries = std::fs::read_dir(dir).map_err(|source| ThemeError::Io {
            path: dir.into(),
            source,
        })?;

        let mut paths: Vec<PathBuf> = entries
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file()
                    && path
                        .extension()
                        .is_some_and(|ext| ext.eq_ignore_ascii_case("css"))
            })
            .collect();
        paths.sort();

        let mut loaded = 0;
        for path in paths {
            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let css = std::fs::read_to_string(&path).map_err(|source| ThemeError::Io {
                path: path.clone(),
                source,
            })?;
            debug!(theme = name, path = %path.display(), "loaded custom theme");
            self.load_custom_theme(name, &css);
            loaded += 1;
        }

        Ok(loaded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_builtin_theme_names() {
        let store = ThemeStore::new();
        assert_eq!(
            store.list_themes(),
            vec!["github", "dark", "solarized-light", "solarized-dark"]
        );
    }

    #[test]
    fn test_unknown_theme_falls_back_to_github() {
        let store = ThemeStore::new();
        assert_eq!(
            store.get_theme_css(Some("nonexistent-theme")),
            store.get_theme_css(Some("github"))
        );
    }

    #[test]
    fn test_none_uses_current_theme() {
        let mut store = ThemeStore::new();
        assert_eq!(store.get_theme_css(None), THEME_GITHUB);

        store.set_current_theme("dark");
        assert_eq!(store.get_theme_css(None), THEME_DARK);
        assert!(store.get_theme_css(None).contains("#0d1117"));
    }

    #[test]
    fn test_set_unknown_theme_is_ignored() {
        let mut store = ThemeStore::new();
        store.set_current_theme("solarized-dark");
        store.set_current_theme("does-not-exist");

        assert_eq!(store.current_theme(), "solarized-dark");
    }

    #[test]
    fn test_custom_theme_appends_and_overwrites() {
        let mut store = ThemeStore::new();
        store.load_custom_theme("mine", "body { color: red; }");
        store.load_custom_theme("mine", "body { color: blue; }");

        assert_eq!(store.list_themes().len(), 5);
        assert_eq!(store.list_themes()[4], "mine");
        assert_eq!(store.get_theme_css(Some("mine")), "body { color: blue; }");
    }

    #[test]
    fn test_overwriting_builtin_keeps_position() {
        let mut store = ThemeStore::new();
        store.load_custom_theme("dark", "body { background: black; }");

        assert_eq!(store.list_themes()[1], "dark");
        assert_eq!(store.list_themes().len(), 4);
        assert_eq!(
            store.get_theme_css(Some("dark")),
            "body { background: black; }"
        );
    }

    #[test]
    fn test_builtins_cover_required_selectors() {
        let store = ThemeStore::new();
        for name in store.list_themes() {
            let css = store.get_theme_css(Some(name));
            for selector in ["body", "a {", "code", ".highlight", "blockquote", "nth-child(2n)", "h1, h2", "hr", ".toc"] {
                assert!(css.contains(selector), "{name} is missing {selector}");
            }
        }
    }

    #[test]
    fn test_load_themes_from_dir() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("paper.css"), "body { color: #111; }").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "not a theme").unwrap();

        let mut store = ThemeStore::new();
        let loaded = store.load_themes_from_dir(dir.path()).unwrap();

        assert_eq!(loaded, 1);
        assert_eq!(store.get_theme_css(Some("paper")), "body { color: #111; }");
    }

    #[test]
    fn test_load_themes_from_missing_dir() {
        let mut store = ThemeStore::new();
        let err = store
            .load_themes_from_dir(Path::new("/nonexistent/themes"))
            .unwrap_err();

        assert!(err.to_string().contains("theme directory not found"));
    }
}
