// src/discovery.rs
use anyhow::{bail, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Extensions treated as React components.
pub const COMPONENT_EXTENSIONS: &[&str] = &["tsx", "jsx"];

/// Directory names never descended into.
const PRUNED_DIRS: &[&str] = &[
    "node_modules",
    ".git",
    "dist",
    "build",
    "out",
    "coverage",
    ".next",
    ".turbo",
    ".cache",
    "storybook-static",
    "target",
];

#[must_use]
pub fn should_prune(name: &str) -> bool {
    PRUNED_DIRS.contains(&name)
}

#[must_use]
pub fn is_component(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| COMPONENT_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
}

/// Expands the given files and directories into a sorted list of component
/// files. Files named explicitly are kept whatever their extension.
///
/// # Errors
/// Returns error if a path does not exist.
pub fn discover(roots: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for root in roots {
        if root.is_file() {
            files.push(root.clone());
        } else if root.is_dir() {
            files.extend(walk_dir(root));
        } else {
            bail!("No such file or directory: {}", root.display());
        }
    }
    files.sort();
    files.dedup();
    debug!(count = files.len(), "discovered component files");
    Ok(files)
}

fn walk_dir(root: &Path) -> Vec<PathBuf> {
    let walker = WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !should_prune(&e.file_name().to_string_lossy()));

    let mut paths = Vec::new();
    let mut errors = 0;
    for item in walker {
        match item {
            Ok(entry) if entry.file_type().is_file() && is_component(entry.path()) => {
                paths.push(entry.into_path());
            }
            Ok(_) => {}
            Err(_) => errors += 1,
        }
    }
    if errors > 0 {
        warn!("Encountered {errors} errors during file walk of {}", root.display());
    }
    paths
}

/// Reads one discovered file.
///
/// # Errors
/// Returns error if the file cannot be read as UTF-8.
pub fn read_source(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}
