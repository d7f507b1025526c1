//! Fluent wrapper around assert_cmd::Command.

// Test utility: not every helper is used by every test binary
#![allow(dead_code)]

use assert_cmd::Command;
use serde::de::DeserializeOwned;
use std::path::Path;

/// Fluent wrapper around `assert_cmd::Command` for the `mdrender` binary.
pub struct MdrenderCommand {
    args: Vec<String>,
    envs: Vec<(String, String)>,
}

impl MdrenderCommand {
    /// Creates a new command for the `mdrender` binary.
    pub fn new() -> Self {
        Self {
            args: Vec::new(),
            envs: Vec::new(),
        }
    }

    /// Sets the `--config` option.
    pub fn config(mut self, path: &Path) -> Self {
        self.args.push("--config".to_string());
        self.args.push(path.to_string_lossy().to_string());
        self
    }

    /// Adds arguments to the command.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.args
            .extend(args.into_iter().map(|s| s.as_ref().to_string()));
        self
    }

    /// Adds a path argument.
    pub fn path(self, path: &Path) -> Self {
        let arg = path.to_string_lossy().to_string();
        self.args([arg])
    }

    /// Sets an environment variable for the child process.
    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.envs.push((key.to_string(), value.to_string()));
        self
    }

    /// Returns the current arguments (for testing).
    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    /// Runs the command and returns an Assert for making assertions.
    #[allow(deprecated)]
    pub fn assert(self) -> assert_cmd::assert::Assert {
        let mut cmd = Command::cargo_bin("mdrender").expect("Failed to find mdrender binary");
        cmd.env_remove("RUST_LOG");
        for (key, value) in &self.envs {
            cmd.env(key, value);
        }
        cmd.args(&self.args);
        cmd.assert()
    }

    /// Runs the command, expects success, and returns stdout as a string.
    pub fn output_success(self) -> String {
        let output = self.assert().success().get_output().stdout.clone();
        String::from_utf8(output).expect("Output was not valid UTF-8")
    }

    /// Runs the command, expects success, and parses stdout as JSON.
    pub fn output_json<T: DeserializeOwned>(self) -> T {
        let output = self.output_success();
        serde_json::from_str(&output).expect("Failed to parse output as JSON")
    }

    // ===========================================
    // Command Shortcuts
    // ===========================================

    /// Configures for the `html` command on a file.
    pub fn html(self, file: &Path) -> Self {
        self.args(["html"]).path(file)
    }

    /// Configures for the `pdf` command writing to `output`.
    pub fn pdf(self, file: &Path, output: &Path) -> Self {
        self.args(["pdf"]).path(file).args(["-o"]).path(output)
    }

    /// Configures for the `copy` command.
    pub fn copy(self, file: &Path, output: &Path) -> Self {
        self.args(["copy"]).path(file).path(output)
    }

    /// Configures for the `stats` command on a file.
    pub fn stats(self, file: &Path) -> Self {
        self.args(["stats"]).path(file)
    }

    /// Configures for the `toc` command on a file.
    pub fn toc(self, file: &Path) -> Self {
        self.args(["toc"]).path(file)
    }

    /// Configures for the `themes` command.
    pub fn themes(self) -> Self {
        self.args(["themes"])
    }

    /// Configures for the `metadata` command on a file.
    pub fn metadata(self, file: &Path) -> Self {
        self.args(["metadata"]).path(file)
    }

    // ===========================================
    // Options
    // ===========================================

    /// Adds `-o <path>`.
    pub fn output(self, path: &Path) -> Self {
        self.args(["-o"]).path(path)
    }

    /// Adds `--theme <name>`.
    pub fn theme(self, name: &str) -> Self {
        self.args(["--theme", name])
    }

    /// Adds `--format json` to the command.
    pub fn format_json(self) -> Self {
        self.args(["--format", "json"])
    }
}

impl Default for MdrenderCommand {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_command_runs_binary() {
        MdrenderCommand::new().args(["--help"]).assert().success();
    }

    #[test]
    fn test_command_with_config() {
        let cmd = MdrenderCommand::new().config(Path::new("/tmp/c.toml"));
        let args = cmd.get_args();
        assert_eq!(args[0], "--config");
        assert_eq!(args[1], "/tmp/c.toml");
    }

    #[test]
    fn test_command_shortcuts() {
        let cmd = MdrenderCommand::new()
            .html(&PathBuf::from("doc.md"))
            .theme("dark")
            .format_json();
        assert_eq!(
            cmd.get_args(),
            ["html", "doc.md", "--theme", "dark", "--format", "json"]
        );
    }
}
