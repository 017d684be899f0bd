// src/config/mod.rs
pub mod io;
pub mod types;

pub use self::types::{AnalysisContext, Config, Focus, RuleConfig, UxscanToml, WcagLevel};
use anyhow::Result;
use std::path::Path;

/// File name looked up in the working directory when no path is given.
pub const CONFIG_FILE: &str = "uxscan.toml";

impl Config {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads `uxscan.toml` from the working directory, falling back to
    /// defaults when the file does not exist.
    ///
    /// # Errors
    /// Returns error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        io::load_optional(Path::new(CONFIG_FILE))
    }

    /// Loads an explicit config file.
    ///
    /// # Errors
    /// Returns error if the file is missing or is not valid TOML.
    pub fn load_from(path: &Path) -> Result<Self> {
        io::load_required(path)
    }

    /// Parses TOML text into a config.
    ///
    /// # Errors
    /// Returns error if the TOML is malformed or has wrongly typed values.
    pub fn parse_toml(content: &str) -> Result<Self> {
        io::parse_toml(content)
    }

    /// Writes the current config to `path`.
    ///
    /// # Errors
    /// Returns error if serialization or the write fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        io::save_to_file(self, path)
    }
}
