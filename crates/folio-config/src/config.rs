//! Configuration structures and loading.

use crate::error::{ConfigError, ConfigResult};
use crate::paths::AppPaths;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

const MB: u64 = 1024 * 1024;

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub import: ImportConfig,

    #[serde(default)]
    pub filter: FilterConfig,

    #[serde(default)]
    pub ui: UiConfig,
}

impl Config {
    /// Load configuration from the default location.
    pub fn load() -> ConfigResult<Self> {
        let paths = AppPaths::new().ok_or(ConfigError::NoConfigDir)?;
        Self::load_from(&paths.config_file)
    }

    /// Load configuration from a specific path.
    ///
    /// A missing file yields the defaults. The loaded import settings are
    /// validated before returning.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            debug!("No config file at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        debug!("Loading configuration from {:?}", path);
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.import.validate()?;
        Ok(config)
    }

    /// Save configuration to a specific path.
    pub fn save_to(&self, path: &Path) -> ConfigResult<()> {
        let contents = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Create a default config file with comments.
    pub fn create_default_file(path: &Path) -> ConfigResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, Self::default_config_string())?;
        Ok(())
    }

    /// Generate a default config file with helpful comments.
    pub fn default_config_string() -> String {
        r#"# Folio Configuration

[import]
# Files processed per batch before progress is reported
chunk_size = 500

# Reserved; batches are currently processed one at a time
max_concurrent_chunks = 3

# Files larger than this are skipped (bytes, 10 MB)
max_single_file_size = 10485760

# The whole import fails once accepted files exceed this (bytes, 1 GB)
max_total_size = 1073741824

# Leading bytes sampled to decide whether a file is binary
binary_check_sample_size = 8192

# Minimum delay between progress redraws (milliseconds)
debounce_delay_ms = 100

# Files imported first, most important first
priority_files = [
    "package.json",
    "composer.json",
    "requirements.txt",
    "go.mod",
    "Cargo.toml",
]

[filter]
# Include files and directories whose name starts with '.'
include_hidden = false

# Directory names skipped anywhere in the tree
excluded_directories = [
    ".git", ".svn", ".hg", "node_modules", "vendor", "target", "dist", "build",
    "out", ".next", ".nuxt", "__pycache__", ".venv", "venv", ".idea", ".vscode",
    "coverage",
]

# File extensions skipped (without the dot)
excluded_extensions = [
    "png", "jpg", "jpeg", "gif", "bmp", "ico", "webp", "tiff", "psd",
    "zip", "tar", "gz", "bz2", "xz", "rar", "7z",
    "mp3", "mp4", "avi", "mov", "wav", "flac", "mkv", "webm", "ogg",
    "exe", "dll", "so", "dylib", "o", "a", "class", "pyc", "wasm",
    "pdf", "woff", "woff2", "ttf", "eot", "otf", "db", "sqlite", "lock",
]

# Additional glob patterns matched against the relative path
ignore_patterns = [
    "*.min.js",
    "*.map",
]

[ui]
# Enable colored output
color = true
"#
        .to_string()
    }
}

/// Import pipeline settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    pub chunk_size: usize,
    pub max_concurrent_chunks: usize,
    pub max_single_file_size: u64,
    pub max_total_size: u64,
    pub binary_check_sample_size: usize,
    pub debounce_delay_ms: u64,
    pub priority_files: Vec<String>,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            chunk_size: 500,
            max_concurrent_chunks: 3,
            max_single_file_size: 10 * MB,
            max_total_size: 1024 * MB,
            binary_check_sample_size: 8192,
            debounce_delay_ms: 100,
            priority_files: vec![
                "package.json".to_string(),
                "composer.json".to_string(),
                "requirements.txt".to_string(),
                "go.mod".to_string(),
                "Cargo.toml".to_string(),
            ],
        }
    }
}

impl ImportConfig {
    /// Check the settings for values the pipeline cannot run with.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.chunk_size == 0 {
            return Err(ConfigError::Invalid("import.chunk_size must be at least 1".into()));
        }
        if self.max_concurrent_chunks == 0 {
            return Err(ConfigError::Invalid(
                "import.max_concurrent_chunks must be at least 1".into(),
            ));
        }
        if self.binary_check_sample_size == 0 {
            return Err(ConfigError::Invalid(
                "import.binary_check_sample_size must be at least 1".into(),
            ));
        }
        if self.max_single_file_size > self.max_total_size {
            return Err(ConfigError::Invalid(format!(
                "import.max_single_file_size ({}) exceeds import.max_total_size ({})",
                self.max_single_file_size, self.max_total_size
            )));
        }
        Ok(())
    }

    /// Total size budget in megabytes, as shown in error messages.
    pub fn max_total_size_mb(&self) -> f64 {
        self.max_total_size as f64 / MB as f64
    }
}

/// Path-based inclusion rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    pub include_hidden: bool,
    pub excluded_directories: Vec<String>,
    pub excluded_extensions: Vec<String>,
    pub ignore_patterns: Vec<String>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            include_hidden: false,
            excluded_directories: [
                ".git", ".svn", ".hg", "node_modules", "vendor", "target", "dist", "build",
                "out", ".next", ".nuxt", "__pycache__", ".venv", "venv", ".idea", ".vscode",
                "coverage",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            excluded_extensions: [
                "png", "jpg", "jpeg", "gif", "bmp", "ico", "webp", "tiff", "psd",
                "zip", "tar", "gz", "bz2", "xz", "rar", "7z",
                "mp3", "mp4", "avi", "mov", "wav", "flac", "mkv", "webm", "ogg",
                "exe", "dll", "so", "dylib", "o", "a", "class", "pyc", "wasm",
                "pdf", "woff", "woff2", "ttf", "eot", "otf", "db", "sqlite", "lock",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            ignore_patterns: vec!["*.min.js".to_string(), "*.map".to_string()],
        }
    }
}

/// UI/Display settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub color: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self { color: true }
    }
}
