//! Per-file eligibility checks.
//!
//! Two predicates decide whether a file takes part in an import: an
//! [`InclusionFilter`] looking only at the relative path, and a
//! [`BinaryDetector`] sampling the leading bytes.

use crate::source::FileSource;
use async_trait::async_trait;
use folio_config::FilterConfig;
use glob::Pattern;
use std::collections::HashSet;
use std::path::Path;
use tracing::warn;

/// Decides from a relative path whether a file is eligible for import.
pub trait InclusionFilter: Send + Sync {
    fn is_included(&self, relative_path: &str) -> bool;
}

/// Decides from a file's leading bytes whether it is binary.
#[async_trait]
pub trait BinaryDetector: Send + Sync {
    async fn is_binary(&self, file: &dyn FileSource) -> bool;
}

/// Extension, directory and glob based inclusion rules.
pub struct PathFilter {
    include_hidden: bool,
    excluded_directories: HashSet<String>,
    excluded_extensions: HashSet<String>,
    ignore_patterns: Vec<Pattern>,
}

impl PathFilter {
    /// Build a filter from configuration. Invalid glob patterns are dropped.
    pub fn new(config: &FilterConfig) -> Self {
        let ignore_patterns = config
            .ignore_patterns
            .iter()
            .filter_map(|p| match Pattern::new(p) {
                Ok(pattern) => Some(pattern),
                Err(e) => {
                    warn!("Ignoring invalid pattern {:?}: {}", p, e);
                    None
                }
            })
            .collect();

        Self {
            include_hidden: config.include_hidden,
            excluded_directories: config.excluded_directories.iter().cloned().collect(),
            excluded_extensions: config
                .excluded_extensions
                .iter()
                .map(|e| e.trim_start_matches('.').to_lowercase())
                .collect(),
            ignore_patterns,
        }
    }

    /// A filter with the default rules.
    pub fn with_defaults() -> Self {
        Self::new(&FilterConfig::default())
    }
}

impl InclusionFilter for PathFilter {
    fn is_included(&self, relative_path: &str) -> bool {
        if relative_path.is_empty() {
            return false;
        }

        let segments: Vec<&str> = relative_path.split('/').collect();
        let (file_name, dirs) = match segments.split_last() {
            Some(split) => split,
            None => return false,
        };

        for dir in dirs {
            if self.excluded_directories.contains(*dir) {
                return false;
            }
            if !self.include_hidden && dir.starts_with('.') {
                return false;
            }
        }

        if !self.include_hidden && file_name.starts_with('.') {
            return false;
        }

        if let Some(ext) = Path::new(file_name).extension().and_then(|e| e.to_str()) {
            if self.excluded_extensions.contains(&ext.to_lowercase()) {
                return false;
            }
        }

        !self
            .ignore_patterns
            .iter()
            .any(|p| p.matches(file_name) || p.matches(relative_path))
    }
}

/// Classifies a file as binary from a fixed-size sample of its first bytes.
///
/// A sample is binary when it contains a NUL byte or when more than 10% of
/// its bytes are control characters other than tab, line feed and carriage
/// return. A file whose sample cannot be read is treated as binary.
pub struct SampleBinaryDetector {
    sample_size: usize,
}

impl SampleBinaryDetector {
    pub fn new(sample_size: usize) -> Self {
        Self { sample_size }
    }

    /// Check a sample already in memory.
    pub fn is_binary_sample(sample: &[u8]) -> bool {
        if sample.is_empty() {
            return false;
        }

        if sample.contains(&0) {
            return true;
        }

        let control = sample
            .iter()
            .filter(|&&b| b < 32 && !matches!(b, b'\t' | b'\n' | b'\r'))
            .count();

        control as f64 / sample.len() as f64 > 0.1
    }
}

#[async_trait]
impl BinaryDetector for SampleBinaryDetector {
    async fn is_binary(&self, file: &dyn FileSource) -> bool {
        match file.read_head(self.sample_size).await {
            Ok(sample) => Self::is_binary_sample(&sample),
            Err(e) => {
                warn!("Could not sample {}: {}", file.path(), e);
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MemoryFile;

    #[test]
    fn test_excluded_directories() {
        let filter = PathFilter::with_defaults();

        assert!(!filter.is_included("node_modules/foo/bar.js"));
        assert!(!filter.is_included("src/target/debug/out.txt"));
        assert!(!filter.is_included(".git/config"));
    }

    #[test]
    fn test_excluded_extensions() {
        let filter = PathFilter::with_defaults();

        assert!(!filter.is_included("image.png"));
        assert!(!filter.is_included("assets/LOGO.PNG"));
        assert!(!filter.is_included("Cargo.lock"));
    }

    #[test]
    fn test_allowed_files() {
        let filter = PathFilter::with_defaults();

        assert!(filter.is_included("src/main.rs"));
        assert!(filter.is_included("package.json"));
        assert!(filter.is_included("docs/guide/intro.md"));
    }

    #[test]
    fn test_hidden_files() {
        let filter = PathFilter::with_defaults();
        assert!(!filter.is_included(".env"));
        assert!(!filter.is_included(".github/workflows/ci.yml"));

        let config = FilterConfig {
            include_hidden: true,
            ..FilterConfig::default()
        };
        let filter = PathFilter::new(&config);
        assert!(filter.is_included(".env"));
        assert!(filter.is_included(".github/workflows/ci.yml"));
        // Excluded directories still apply
        assert!(!filter.is_included(".git/HEAD"));
    }

    #[test]
    fn test_ignore_patterns() {
        let config = FilterConfig {
            ignore_patterns: vec!["*.min.js".to_string(), "fixtures/*".to_string()],
            ..FilterConfig::default()
        };
        let filter = PathFilter::new(&config);

        assert!(!filter.is_included("static/app.min.js"));
        assert!(!filter.is_included("fixtures/data.json"));
        assert!(filter.is_included("static/app.js"));
    }

    #[test]
    fn test_empty_path_is_excluded() {
        assert!(!PathFilter::with_defaults().is_included(""));
    }

    #[test]
    fn test_binary_sample() {
        assert!(!SampleBinaryDetector::is_binary_sample(b"Hello, world!\n"));
        assert!(!SampleBinaryDetector::is_binary_sample(b""));
        assert!(SampleBinaryDetector::is_binary_sample(b"PNG\x00\x01\x02"));
        assert!(SampleBinaryDetector::is_binary_sample(b"\x01\x02\x03abc"));
    }

    #[tokio::test]
    async fn test_detector_samples_leading_bytes() {
        let detector = SampleBinaryDetector::new(4);

        // The NUL byte lies past the sample window
        let file = MemoryFile::new("root/late.bin", b"text\x00".to_vec());
        assert!(!detector.is_binary(&file).await);

        let file = MemoryFile::new("root/early.bin", b"\x00text".to_vec());
        assert!(detector.is_binary(&file).await);
    }
}
