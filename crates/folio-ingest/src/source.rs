//! File handles consumed by the import pipeline.

use async_trait::async_trait;
use std::io;
use std::path::{Path, PathBuf};
use tokio::io::AsyncReadExt;

/// A file selected for import.
///
/// `path` includes the imported folder as its first segment
/// (`project/src/main.rs`), the same shape a directory picker reports.
#[async_trait]
pub trait FileSource: Send + Sync {
    /// Path including the root segment, `/`-separated.
    fn path(&self) -> &str;

    /// Size of the original file in bytes.
    fn size(&self) -> u64;

    /// Read at most `limit` leading bytes.
    async fn read_head(&self, limit: usize) -> io::Result<Vec<u8>>;

    /// Read the whole file as text.
    async fn read_text(&self) -> io::Result<String>;
}

#[async_trait]
impl<T: FileSource + ?Sized> FileSource for Box<T> {
    fn path(&self) -> &str {
        (**self).path()
    }

    fn size(&self) -> u64 {
        (**self).size()
    }

    async fn read_head(&self, limit: usize) -> io::Result<Vec<u8>> {
        (**self).read_head(limit).await
    }

    async fn read_text(&self) -> io::Result<String> {
        (**self).read_text().await
    }
}

/// Strip the root segment from a source path.
///
/// A path without a separator has no relative part and yields `""`.
pub fn relative_path(path: &str) -> &str {
    path.split_once('/').map(|(_, rest)| rest).unwrap_or("")
}

/// A file on the local file system.
#[derive(Debug, Clone)]
pub struct DiskFile {
    path: String,
    location: PathBuf,
    size: u64,
}

impl DiskFile {
    /// Create a handle for `location`, reported under `path`.
    pub fn new(path: impl Into<String>, location: impl Into<PathBuf>, size: u64) -> Self {
        Self {
            path: path.into(),
            location: location.into(),
            size,
        }
    }

    /// Where the file lives on disk.
    pub fn location(&self) -> &Path {
        &self.location
    }
}

#[async_trait]
impl FileSource for DiskFile {
    fn path(&self) -> &str {
        &self.path
    }

    fn size(&self) -> u64 {
        self.size
    }

    async fn read_head(&self, limit: usize) -> io::Result<Vec<u8>> {
        let file = tokio::fs::File::open(&self.location).await?;
        let mut buf = Vec::with_capacity(limit.min(self.size as usize));
        file.take(limit as u64).read_to_end(&mut buf).await?;
        Ok(buf)
    }

    async fn read_text(&self) -> io::Result<String> {
        let bytes = tokio::fs::read(&self.location).await?;
        Ok(decode_text(bytes))
    }
}

/// A file whose bytes are already in memory.
#[derive(Debug, Clone)]
pub struct MemoryFile {
    path: String,
    bytes: Vec<u8>,
}

impl MemoryFile {
    pub fn new(path: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            path: path.into(),
            bytes: bytes.into(),
        }
    }
}

#[async_trait]
impl FileSource for MemoryFile {
    fn path(&self) -> &str {
        &self.path
    }

    fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    async fn read_head(&self, limit: usize) -> io::Result<Vec<u8>> {
        Ok(self.bytes[..self.bytes.len().min(limit)].to_vec())
    }

    async fn read_text(&self) -> io::Result<String> {
        Ok(decode_text(self.bytes.clone()))
    }
}

/// Decode as UTF-8, replacing invalid sequences.
fn decode_text(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_path() {
        assert_eq!(relative_path("project/src/main.rs"), "src/main.rs");
        assert_eq!(relative_path("project/package.json"), "package.json");
        assert_eq!(relative_path("loose.txt"), "");
    }

    #[tokio::test]
    async fn test_memory_file_reads() {
        let file = MemoryFile::new("root/a.txt", "hello world");
        assert_eq!(file.size(), 11);
        assert_eq!(file.read_head(5).await.unwrap(), b"hello");
        assert_eq!(file.read_head(100).await.unwrap().len(), 11);
        assert_eq!(file.read_text().await.unwrap(), "hello world");
    }

    #[tokio::test]
    async fn test_disk_file_reads() {
        let dir = tempfile::tempdir().unwrap();
        let location = dir.path().join("notes.txt");
        std::fs::write(&location, "line one\nline two\n").unwrap();

        let file = DiskFile::new("root/notes.txt", &location, 18);
        assert_eq!(file.read_head(4).await.unwrap(), b"line");
        assert_eq!(file.read_text().await.unwrap(), "line one\nline two\n");
    }

    #[tokio::test]
    async fn test_disk_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let file = DiskFile::new("root/gone.txt", dir.path().join("gone.txt"), 3);
        assert!(file.read_text().await.is_err());
    }

    #[tokio::test]
    async fn test_invalid_utf8_is_replaced() {
        let file = MemoryFile::new("root/latin1.txt", vec![b'a', 0xff, b'b']);
        assert_eq!(file.read_text().await.unwrap(), "a\u{fffd}b");
    }
}
