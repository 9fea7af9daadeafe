//! Application paths management.

use directories::ProjectDirs;
use std::path::PathBuf;

/// Platform-specific locations used by Folio.
#[derive(Debug, Clone)]
pub struct AppPaths {
    pub config_dir: PathBuf,
    pub config_file: PathBuf,
}

impl AppPaths {
    /// Create paths using platform-specific directories.
    pub fn new() -> Option<Self> {
        let proj_dirs = ProjectDirs::from("com", "folio", "folio")?;
        let config_dir = proj_dirs.config_dir().to_path_buf();

        Some(Self {
            config_file: config_dir.join("config.toml"),
            config_dir,
        })
    }
}
