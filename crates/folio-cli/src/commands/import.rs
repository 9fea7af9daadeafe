//! Import command implementation.

use super::{expand_path, format_size, load_config};
use anyhow::{Context, Result};
use colored::Colorize;
use folio_core::{messages_to_json, ImportProgress, ImportStage};
use folio_ingest::{
    build_context_from_files, root_name, scan_directory, ImportProcessor, PathFilter,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio::runtime::Runtime;
use tokio::sync::mpsc;
use tracing::debug;

/// Import a folder and emit the resulting conversation.
pub fn run(
    path: &str,
    output: Option<PathBuf>,
    chunk_size: Option<usize>,
    config_path: Option<&Path>,
) -> Result<()> {
    let mut config = load_config(config_path)?;
    if let Some(size) = chunk_size {
        config.import.chunk_size = size;
    }
    debug!(import = ?config.import, "Import settings");

    let root = expand_path(path);
    let files =
        scan_directory(&root).with_context(|| format!("Failed to scan {}", root.display()))?;

    if files.is_empty() {
        anyhow::bail!("No files selected");
    }

    let folder_name = root_name(&root.canonicalize()?);
    eprintln!("{} {}...", "Analyzing".cyan(), folder_name);

    let rt = Runtime::new().context("Failed to create async runtime")?;
    let (tx, rx) = mpsc::unbounded_channel();
    let debounce = Duration::from_millis(config.import.debounce_delay_ms);
    let processor = ImportProcessor::new(config.import)?
        .with_filter(PathFilter::new(&config.filter))
        .with_progress(tx);

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
            )?
            .progress_chars("#>-"),
    );

    let bar = &pb;
    let result = rt.block_on(async move {
        // The processor owns the only sender; dropping it ends the render loop
        let import = async move { processor.process_files_with_summary(files).await };
        let (result, ()) = tokio::join!(import, render_progress(rx, bar, debounce));
        result
    });
    pb.finish_and_clear();

    let (processed, summary) = result?;

    let count = processed.len();
    eprintln!(
        "{}",
        ImportProgress::new(ImportStage::Creating, count, count, "Creating conversation...")
    );
    let messages = build_context_from_files(&processed, &summary.binary_paths, &folder_name);
    let json = messages_to_json(&messages)?;

    match output {
        Some(ref file) => {
            std::fs::write(file, json)
                .with_context(|| format!("Failed to write {}", file.display()))?;
            eprintln!("  Conversation written to {}", file.display());
        }
        None => println!("{}", json),
    }

    eprintln!(
        "{} Imported {} files successfully ({}, {:.2}s)",
        "✓".green(),
        count.to_string().green(),
        format_size(summary.total_size),
        summary.duration.as_secs_f64()
    );

    let skipped = summary.skipped;
    if skipped.total() > 0 {
        eprintln!(
            "{} {} files ({} binary, {} excluded, {} too large, {} unreadable)",
            "Skipped:".yellow().bold(),
            skipped.total(),
            skipped.binary,
            skipped.excluded,
            skipped.oversized,
            skipped.unreadable
        );
    }

    Ok(())
}

/// Mirror progress events onto the bar until the sender goes away.
async fn render_progress(
    mut rx: mpsc::UnboundedReceiver<ImportProgress>,
    pb: &ProgressBar,
    debounce: Duration,
) {
    let mut last_message: Option<Instant> = None;

    while let Some(progress) = rx.recv().await {
        pb.set_length(progress.total as u64);
        pb.set_position(progress.processed as u64);

        let due = last_message.map_or(true, |t| t.elapsed() >= debounce);
        if due || progress.processed == progress.total {
            pb.set_message(progress.to_string());
            last_message = Some(Instant::now());
        }
    }
}
