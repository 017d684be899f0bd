// src/config/io.rs
use super::types::{Config, UxscanToml};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::debug;

pub(super) fn load_optional(path: &Path) -> Result<Config> {
    if !path.exists() {
        debug!("No {} found, using defaults", path.display());
        return Ok(Config::default());
    }
    load_required(path)
}

pub(super) fn load_required(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    parse_toml(&content).with_context(|| format!("Invalid TOML in {}", path.display()))
}

pub(super) fn parse_toml(content: &str) -> Result<Config> {
    let parsed: UxscanToml = toml::from_str(content)?;
    Ok(Config {
        context: parsed.context,
        rules: parsed.rules,
    })
}

pub(super) fn save_to_file(config: &Config, path: &Path) -> Result<()> {
    let doc = UxscanToml {
        context: config.context.clone(),
        rules: config.rules.clone(),
    };
    let text = toml::to_string_pretty(&doc).context("Failed to serialize config")?;
    fs::write(path, text).with_context(|| format!("Failed to write {}", path.display()))
}
