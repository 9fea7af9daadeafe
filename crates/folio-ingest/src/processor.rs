//! The import pipeline.
//!
//! Files are ordered by priority, processed in fixed-size chunks, and every
//! chunk boundary reports progress and yields to the runtime. Problems with a
//! single file only skip that file; exceeding the total size budget fails
//! the whole import.

use crate::error::{IngestError, IngestResult};
use crate::filter::{BinaryDetector, InclusionFilter, PathFilter, SampleBinaryDetector};
use crate::priority::PriorityScorer;
use crate::progress::{NoProgress, ProgressSink};
use crate::source::{relative_path, FileSource};
use folio_config::ImportConfig;
use folio_core::{ImportProgress, ImportStage, ProcessedFile};
use std::cmp::Reverse;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

/// Why a file was left out of an import.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    Oversized,
    Excluded,
    Binary,
    Unreadable,
}

/// Number of skipped files per reason.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SkipCounts {
    pub oversized: usize,
    pub excluded: usize,
    pub binary: usize,
    pub unreadable: usize,
}

impl SkipCounts {
    fn record(&mut self, reason: SkipReason) {
        match reason {
            SkipReason::Oversized => self.oversized += 1,
            SkipReason::Excluded => self.excluded += 1,
            SkipReason::Binary => self.binary += 1,
            SkipReason::Unreadable => self.unreadable += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.oversized + self.excluded + self.binary + self.unreadable
    }
}

/// Outcome of a completed import.
#[derive(Debug, Clone)]
pub struct ImportSummary {
    pub file_count: usize,
    /// Bytes of accepted files.
    pub total_size: u64,
    pub duration: Duration,
    pub skipped: SkipCounts,
    /// Relative paths of files classified as binary.
    pub binary_paths: Vec<String>,
}

/// State of one import. Each run owns a fresh one.
struct RunState {
    processed_files: Vec<ProcessedFile>,
    total_size: u64,
    skipped: SkipCounts,
    binary_paths: Vec<String>,
    started: Instant,
}

impl RunState {
    fn new() -> Self {
        Self {
            processed_files: Vec::new(),
            total_size: 0,
            skipped: SkipCounts::default(),
            binary_paths: Vec::new(),
            started: Instant::now(),
        }
    }
}

/// Imports a selected folder's files as prioritised text.
///
/// The processor itself is never mutated by a run, so it can be shared and
/// reused; runs on the same instance do not observe each other.
pub struct ImportProcessor {
    config: ImportConfig,
    scorer: PriorityScorer,
    filter: Box<dyn InclusionFilter>,
    detector: Box<dyn BinaryDetector>,
    progress: Box<dyn ProgressSink>,
}

impl ImportProcessor {
    /// Create a processor with the default path filter and binary detector.
    pub fn new(config: ImportConfig) -> IngestResult<Self> {
        config.validate()?;

        Ok(Self {
            scorer: PriorityScorer::new(&config.priority_files),
            filter: Box::new(PathFilter::with_defaults()),
            detector: Box::new(SampleBinaryDetector::new(config.binary_check_sample_size)),
            progress: Box::new(NoProgress),
            config,
        })
    }

    /// Replace the inclusion filter.
    pub fn with_filter(mut self, filter: impl InclusionFilter + 'static) -> Self {
        self.filter = Box::new(filter);
        self
    }

    /// Replace the binary detector.
    pub fn with_detector(mut self, detector: impl BinaryDetector + 'static) -> Self {
        self.detector = Box::new(detector);
        self
    }

    /// Send progress events to `sink`.
    pub fn with_progress(mut self, sink: impl ProgressSink + 'static) -> Self {
        self.progress = Box::new(sink);
        self
    }

    pub fn config(&self) -> &ImportConfig {
        &self.config
    }

    /// Import `files`, returning the accepted files in priority order.
    pub async fn process_files<F: FileSource>(
        &self,
        files: Vec<F>,
    ) -> IngestResult<Vec<ProcessedFile>> {
        let (files, _) = self.process_files_with_summary(files).await?;
        Ok(files)
    }

    /// Import `files`, also returning counters about the run.
    pub async fn process_files_with_summary<F: FileSource>(
        &self,
        files: Vec<F>,
    ) -> IngestResult<(Vec<ProcessedFile>, ImportSummary)> {
        if files.is_empty() {
            return Err(IngestError::NoFiles);
        }

        let mut state = RunState::new();
        match self.run(files, &mut state).await {
            Ok(()) => {
                let summary = ImportSummary {
                    file_count: state.processed_files.len(),
                    total_size: state.total_size,
                    duration: state.started.elapsed(),
                    skipped: state.skipped,
                    binary_paths: std::mem::take(&mut state.binary_paths),
                };
                info!(
                    file_count = summary.file_count,
                    total_size = summary.total_size,
                    skipped = summary.skipped.total(),
                    duration = summary.duration.as_secs_f64(),
                    "Import completed"
                );
                Ok((state.processed_files, summary))
            }
            Err(e) => {
                error!(error = %e, accepted = state.processed_files.len(), "Import failed");
                Err(e)
            }
        }
    }

    async fn run<F: FileSource>(&self, files: Vec<F>, state: &mut RunState) -> IngestResult<()> {
        let total = files.len();
        self.report(ImportStage::Scanning, 0, total, "Scanning repository...");

        // sort_by_key is stable, so equal scores keep their input order
        let mut sorted: Vec<(u32, F)> = files
            .into_iter()
            .map(|f| (self.scorer.score(f.path()), f))
            .collect();
        sorted.sort_by_key(|(score, _)| Reverse(*score));

        let chunk_size = self.config.chunk_size;
        debug!(total, chunk_size, "Processing files in chunks");

        for start in (0..total).step_by(chunk_size) {
            let chunk = self.process_chunk(&sorted, start, chunk_size, state).await?;
            state.processed_files.extend(chunk);

            self.report(
                ImportStage::Processing,
                (start + chunk_size).min(total),
                total,
                format!("Processed {} files...", state.processed_files.len()),
            );

            tokio::task::yield_now().await;
        }

        Ok(())
    }

    /// Process `files[start_index..start_index + chunk_size]`.
    ///
    /// Skips are absorbed here; only the size budget error escapes.
    async fn process_chunk<F: FileSource>(
        &self,
        files: &[(u32, F)],
        start_index: usize,
        chunk_size: usize,
        state: &mut RunState,
    ) -> IngestResult<Vec<ProcessedFile>> {
        let end = (start_index + chunk_size).min(files.len());
        let mut processed = Vec::with_capacity(end - start_index);

        for (priority, file) in &files[start_index..end] {
            let size = file.size();

            if size > self.config.max_single_file_size {
                warn!(path = file.path(), size, "Skipping large file");
                state.skipped.record(SkipReason::Oversized);
                continue;
            }

            let path = relative_path(file.path());
            if !self.filter.is_included(path) {
                debug!(path, "Skipping excluded file");
                state.skipped.record(SkipReason::Excluded);
                continue;
            }

            if self.detector.is_binary(file).await {
                debug!(path, "Skipping binary file");
                state.skipped.record(SkipReason::Binary);
                state.binary_paths.push(path.to_string());
                continue;
            }

            let content = match file.read_text().await {
                Ok(content) => content,
                Err(e) => {
                    warn!(path = file.path(), error = %e, "Error processing file");
                    state.skipped.record(SkipReason::Unreadable);
                    continue;
                }
            };

            // Only readable files count, and none is accepted past the budget
            let attempted = state.total_size + size;
            if attempted > self.config.max_total_size {
                return Err(IngestError::SizeLimitExceeded {
                    limit_mb: self.config.max_total_size_mb(),
                    attempted,
                });
            }

            state.total_size = attempted;
            processed.push(ProcessedFile {
                path: path.to_string(),
                content,
                size,
                priority: *priority,
            });
        }

        Ok(processed)
    }

    fn report(
        &self,
        stage: ImportStage,
        processed: usize,
        total: usize,
        details: impl Into<String>,
    ) {
        self.progress.report(ImportProgress::new(stage, processed, total, details));
    }
}
