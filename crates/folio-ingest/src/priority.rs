//! Import ordering by well-known project files.

/// Scores file paths against an ordered list of important file names.
///
/// A name at index `i` of a list of length `L` scores `L - i`; any other
/// name scores 0. Matching is on the lowercased final path segment.
#[derive(Debug, Clone)]
pub struct PriorityScorer {
    names: Vec<String>,
}

impl PriorityScorer {
    pub fn new<S: AsRef<str>>(names: &[S]) -> Self {
        Self {
            names: names.iter().map(|n| n.as_ref().to_lowercase()).collect(),
        }
    }

    pub fn score(&self, path: &str) -> u32 {
        let file_name = path.rsplit('/').next().unwrap_or("").to_lowercase();

        self.names
            .iter()
            .position(|n| *n == file_name)
            .map(|i| (self.names.len() - i) as u32)
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scorer() -> PriorityScorer {
        PriorityScorer::new(&[
            "package.json",
            "composer.json",
            "requirements.txt",
            "go.mod",
            "Cargo.toml",
        ])
    }

    #[test]
    fn test_listed_names_score_by_position() {
        let scorer = scorer();
        assert_eq!(scorer.score("package.json"), 5);
        assert_eq!(scorer.score("api/go.mod"), 2);
        assert_eq!(scorer.score("crates/core/Cargo.toml"), 1);
    }

    #[test]
    fn test_unlisted_names_score_zero() {
        let scorer = scorer();
        assert_eq!(scorer.score("src/main.rs"), 0);
        assert_eq!(scorer.score("package.json.bak"), 0);
        assert_eq!(scorer.score(""), 0);
    }

    #[test]
    fn test_matching_ignores_case() {
        let scorer = scorer();
        assert_eq!(scorer.score("PACKAGE.JSON"), 5);
        assert_eq!(scorer.score("cargo.toml"), 1);
    }

    #[test]
    fn test_earlier_entries_outrank_later_ones() {
        let scorer = scorer();
        assert!(scorer.score("composer.json") > scorer.score("requirements.txt"));
        assert!(scorer.score("Cargo.toml") > scorer.score("README.md"));
    }
}
