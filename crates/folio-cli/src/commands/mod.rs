//! CLI command implementations.

pub mod config;
pub mod import;
pub mod scan;

use anyhow::{Context, Result};
use folio_config::{AppPaths, Config};
use std::path::{Path, PathBuf};

/// Location of the config file: the override if given, else the platform default.
pub fn config_file(override_path: Option<&Path>) -> Result<PathBuf> {
    match override_path {
        Some(path) => Ok(path.to_path_buf()),
        None => AppPaths::new()
            .map(|paths| paths.config_file)
            .context("Failed to determine application directories"),
    }
}

/// Load the effective configuration and apply its UI settings.
pub fn load_config(override_path: Option<&Path>) -> Result<Config> {
    let path = config_file(override_path)?;
    let config = Config::load_from(&path)
        .with_context(|| format!("Failed to load config from {}", path.display()))?;

    if !config.ui.color {
        colored::control::set_override(false);
    }

    Ok(config)
}

/// Expand `~` in a user-supplied path.
pub fn expand_path(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).as_ref())
}

/// Format a file size in human-readable form.
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}
