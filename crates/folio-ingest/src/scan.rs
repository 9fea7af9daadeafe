//! Building file handles for a folder on disk.

use crate::error::{IngestError, IngestResult};
use crate::source::DiskFile;
use std::path::Path;
use tracing::{debug, warn};

/// Name reported for a folder without a final component (such as `/`).
const UNKNOWN_FOLDER: &str = "Unknown Folder";

/// Display name of an imported folder: its final path component.
pub fn root_name(root: &Path) -> String {
    root.file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(UNKNOWN_FOLDER)
        .to_string()
}

/// Collect every regular file below `root`.
///
/// Each handle's path starts with the folder name followed by the
/// `/`-separated path inside the folder. Entries are visited in file name
/// order, symbolic links are not followed, and unreadable entries are
/// skipped.
pub fn scan_directory(root: &Path) -> IngestResult<Vec<DiskFile>> {
    if !root.exists() {
        return Err(IngestError::FileNotFound(root.to_path_buf()));
    }
    if !root.is_dir() {
        return Err(IngestError::NotADirectory(root.to_path_buf()));
    }

    let root = root.canonicalize()?;
    let name = root_name(&root);
    let mut files = Vec::new();

    for entry in walkdir::WalkDir::new(&root)
        .follow_links(false)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable entry: {}", e);
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let size = match entry.metadata() {
            Ok(metadata) => metadata.len(),
            Err(e) => {
                warn!("Skipping {:?}: {}", entry.path(), e);
                continue;
            }
        };

        let inner = match entry.path().strip_prefix(&root) {
            Ok(inner) => inner,
            Err(_) => continue,
        };
        let segments: Vec<String> = inner
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();

        files.push(DiskFile::new(
            format!("{}/{}", name, segments.join("/")),
            entry.path(),
            size,
        ));
    }

    debug!("Scanned {} files in {:?}", files.len(), root);
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::FileSource;

    #[test]
    fn test_scan_directory() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("project");
        std::fs::create_dir_all(root.join("src")).unwrap();
        std::fs::write(root.join("package.json"), "{}").unwrap();
        std::fs::write(root.join("src").join("index.js"), "let a = 1;").unwrap();

        let files = scan_directory(&root).unwrap();

        let paths: Vec<_> = files.iter().map(|f| f.path()).collect();
        assert_eq!(paths, vec!["project/package.json", "project/src/index.js"]);
        assert_eq!(files[0].size(), 2);
        assert_eq!(files[1].size(), 10);
    }

    #[test]
    fn test_scan_empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert!(scan_directory(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn test_scan_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let err = scan_directory(&dir.path().join("missing")).unwrap_err();
        assert!(matches!(err, IngestError::FileNotFound(_)));
    }

    #[test]
    fn test_scan_rejects_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("notes.txt");
        std::fs::write(&file, "x").unwrap();

        let err = scan_directory(&file).unwrap_err();
        assert!(matches!(err, IngestError::NotADirectory(_)));
    }

    #[test]
    fn test_root_name() {
        assert_eq!(root_name(Path::new("/home/me/project")), "project");
        assert_eq!(root_name(Path::new("/")), "Unknown Folder");
    }
}
