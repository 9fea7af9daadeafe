//! Scan command - preview an import without reading file contents.

use super::{expand_path, format_size, load_config};
use anyhow::{Context, Result};
use colored::Colorize;
use folio_ingest::{
    relative_path, scan_directory, FileSource, InclusionFilter, PathFilter, PriorityScorer,
};
use std::cmp::Reverse;
use std::path::Path;

pub fn run(path: &str, config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path)?;
    let root = expand_path(path);

    println!("{} {}", "Scanning:".cyan(), root.display());

    let files =
        scan_directory(&root).with_context(|| format!("Failed to scan {}", root.display()))?;

    if files.is_empty() {
        println!("{}", "No files found.".yellow());
        return Ok(());
    }

    let scorer = PriorityScorer::new(&config.import.priority_files);
    let filter = PathFilter::new(&config.filter);

    let mut entries: Vec<_> = files.iter().map(|f| (scorer.score(f.path()), f)).collect();
    entries.sort_by_key(|(score, _)| Reverse(*score));

    let mut candidates = 0;
    for (score, file) in &entries {
        let rel = relative_path(file.path());
        let status = if file.size() > config.import.max_single_file_size {
            "too large".red()
        } else if !filter.is_included(rel) {
            "excluded".yellow()
        } else {
            candidates += 1;
            "ok".green()
        };

        println!("  [{}] {} ({}) {}", score, rel, format_size(file.size()), status);
    }

    println!(
        "\nFound {} files, {} candidates for import (binary detection runs during import)",
        entries.len(),
        candidates.to_string().green()
    );

    Ok(())
}
