//! Isolated test environment with a fake store and temp directory.

#![allow(dead_code)]

use super::{FakeNoteStore, NotecardCommand};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// User id every `TestEnv` command runs as unless told otherwise.
pub const TEST_USER: &str = "google-1234";

/// Isolated test environment.
///
/// Owns a running fake note store and a temp directory holding the
/// config and session files, both cleaned up on drop.
pub struct TestEnv {
    /// The temporary directory (kept for lifetime management)
    temp_dir: TempDir,
    store: FakeNoteStore,
}

impl TestEnv {
    /// Creates a new isolated test environment with an empty store.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("Failed to create temp directory"),
            store: FakeNoteStore::start(),
        }
    }

    /// Returns the fake note store.
    pub fn store(&self) -> &FakeNoteStore {
        &self.store
    }

    /// Seeds a note for `TEST_USER` and returns its id.
    pub fn add_note(&self, title: &str, content: &str, tags: &[&str]) -> String {
        self.store.seed(TEST_USER, title, content, tags)
    }

    /// Path of the isolated config file (absent until written).
    pub fn config_path(&self) -> PathBuf {
        self.temp_dir.path().join("config.toml")
    }

    /// Path of the isolated session file.
    pub fn session_path(&self) -> PathBuf {
        self.temp_dir.path().join("session.toml")
    }

    /// Returns the temporary directory.
    pub fn dir(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Writes the config file and returns its path.
    pub fn write_config(&self, content: &str) -> PathBuf {
        let path = self.config_path();
        std::fs::write(&path, content).expect("Failed to write config");
        path
    }

    /// Command pointed at this environment, without a user.
    pub fn anon_cmd(&self) -> NotecardCommand {
        NotecardCommand::new()
            .api_url(self.store.url())
            .config(&self.config_path())
            .session_file(&self.session_path())
    }

    /// Command pointed at this environment, signed in as `TEST_USER`.
    pub fn cmd(&self) -> NotecardCommand {
        self.anon_cmd().user(TEST_USER)
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}
