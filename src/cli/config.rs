//! Configuration file support.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::store::DEFAULT_TIMEOUT;
use crate::sync::DEFAULT_DEBOUNCE;

/// Store URL used when neither flag nor config file names one.
pub const DEFAULT_API_URL: &str = "http://localhost:3001";

/// Identity provider used for sign-in by default.
pub const DEFAULT_PROVIDER: &str = "google";

/// Application configuration loaded from config file.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Base URL of the note store
    pub api_url: Option<String>,

    /// Identity provider for `login`
    pub provider: Option<String>,

    /// Per-request deadline in seconds
    pub timeout_secs: Option<u64>,

    /// Quiet period for interactive search in milliseconds
    pub debounce_ms: Option<u64>,

    /// Where the signed-in session is stored
    pub session_file: Option<PathBuf>,

    /// Editor command for editing note content
    pub editor: Option<String>,
}

impl Config {
    /// Load configuration from the default config file location.
    ///
    /// Returns default config if the file doesn't exist.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from `path`, defaulting when it doesn't exist.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(config_path)
            .with_context(|| format!("failed to read config file: {}", config_path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", config_path.display()))
    }

    /// Returns the directory holding config and session files.
    ///
    /// Default: `~/.config/notecard`
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("notecard")
    }

    /// Returns the path to the config file.
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Resolve the store URL.
    ///
    /// Precedence order:
    /// 1. CLI `--api-url` argument
    /// 2. Config file `api_url` setting
    /// 3. `http://localhost:3001`
    pub fn api_url(&self, cli_url: Option<&str>) -> String {
        cli_url
            .map(str::to_string)
            .or_else(|| self.api_url.clone())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
    }

    /// Resolve the session file path, with CLI argument taking precedence.
    pub fn session_file(&self, cli_path: Option<&PathBuf>) -> PathBuf {
        cli_path
            .cloned()
            .or_else(|| self.session_file.clone())
            .unwrap_or_else(|| Self::config_dir().join("session.toml"))
    }

    /// Resolve the sign-in provider.
    pub fn provider(&self, cli_provider: Option<&str>) -> String {
        cli_provider
            .map(str::to_string)
            .or_else(|| self.provider.clone())
            .unwrap_or_else(|| DEFAULT_PROVIDER.to_string())
    }

    /// Per-request deadline.
    pub fn timeout(&self) -> Duration {
        self.timeout_secs
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TIMEOUT)
    }

    /// Quiet period before an interactive search term is sent.
    pub fn debounce(&self) -> Duration {
        self.debounce_ms
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_DEBOUNCE)
    }

    /// Resolve the editor command.
    ///
    /// Precedence order:
    /// 1. Config file `editor` setting
    /// 2. $EDITOR environment variable
    /// 3. $VISUAL environment variable
    /// 4. "vi" as fallback
    pub fn editor(&self) -> String {
        self.editor
            .clone()
            .or_else(|| std::env::var("EDITOR").ok())
            .or_else(|| std::env::var("VISUAL").ok())
            .unwrap_or_else(|| "vi".to_string())
    }
}
