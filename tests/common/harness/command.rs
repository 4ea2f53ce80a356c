//! Fluent wrapper around assert_cmd::Command.

// Allow dead code since this is a test utility with methods for future tests
#![allow(dead_code)]

use assert_cmd::Command;
use serde::de::DeserializeOwned;
use std::path::Path;

/// Fluent wrapper around `assert_cmd::Command` for the `notecard` binary.
///
/// Provides a builder-style API for constructing and executing CLI commands.
pub struct NotecardCommand {
    args: Vec<String>,
    stdin: Option<String>,
}

impl NotecardCommand {
    /// Creates a new command for the `notecard` binary.
    pub fn new() -> Self {
        Self {
            args: Vec::new(),
            stdin: None,
        }
    }

    /// Sets `--api-url` to point at a note store.
    pub fn api_url(self, url: &str) -> Self {
        self.args(["--api-url", url])
    }

    /// Sets `--user` to bypass the saved session.
    pub fn user(self, user_id: &str) -> Self {
        self.args(["--user", user_id])
    }

    /// Sets `--config` to an isolated config file.
    pub fn config(self, path: &Path) -> Self {
        self.args(["--config".to_string(), path.to_string_lossy().to_string()])
    }

    /// Sets `--session-file` to an isolated session file.
    pub fn session_file(self, path: &Path) -> Self {
        self.args([
            "--session-file".to_string(),
            path.to_string_lossy().to_string(),
        ])
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

    /// Feeds `input` on stdin.
    pub fn stdin(mut self, input: &str) -> Self {
        self.stdin = Some(input.to_string());
        self
    }

    /// Returns the current arguments (for testing).
    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    /// Runs the command and returns an Assert for making assertions.
    #[allow(deprecated)]
    pub fn assert(self) -> assert_cmd::assert::Assert {
        let mut cmd = Command::cargo_bin("notecard").expect("Failed to find notecard binary");
        cmd.args(&self.args);
        cmd.env_remove("EDITOR");
        if let Some(input) = self.stdin {
            cmd.write_stdin(input);
        }
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

    /// Configures for the `ls` command.
    pub fn ls(self) -> Self {
        self.args(["ls"])
    }

    /// Configures for the `tags` command.
    pub fn tags(self) -> Self {
        self.args(["tags"])
    }

    /// Configures for the `show` command with a note identifier.
    pub fn show(self, note: &str) -> Self {
        self.args(["show", note])
    }

    /// Configures for the `new` command with a title.
    pub fn new_note(self, title: &str) -> Self {
        self.args(["new", title])
    }

    /// Configures for the `edit` command with a note identifier.
    pub fn edit(self, note: &str) -> Self {
        self.args(["edit", note])
    }

    /// Configures for the `rm` command with a note identifier.
    pub fn rm(self, note: &str) -> Self {
        self.args(["rm", note])
    }

    // ===========================================
    // Format Options
    // ===========================================

    /// Adds `--format json` to the command.
    pub fn format_json(self) -> Self {
        self.args(["--format", "json"])
    }
}

impl Default for NotecardCommand {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ===========================================
    // Phase 1: NotecardCommand Basics
    // ===========================================

    #[test]
    fn test_command_runs_binary() {
        NotecardCommand::new().args(["--help"]).assert().success();
    }

    #[test]
    fn test_command_with_api_url() {
        let cmd = NotecardCommand::new().api_url("http://127.0.0.1:9");
        let args = cmd.get_args();
        assert_eq!(args[0], "--api-url");
        assert_eq!(args[1], "http://127.0.0.1:9");
    }

    #[test]
    fn test_command_shortcuts() {
        let cmd = NotecardCommand::new().ls().format_json();
        let args = cmd.get_args();
        assert!(args.contains(&"ls".to_string()));
        assert!(args.contains(&"--format".to_string()));
        assert!(args.contains(&"json".to_string()));
    }
}
