//! Folio Ingest - Folder import pipeline.
//!
//! This crate provides:
//! - File handles over disk or in-memory content
//! - Path inclusion rules and binary content detection
//! - Priority ordering of important project files
//! - Chunked, size-bounded import with progress reporting
//! - Conversation building from the imported files

mod context;
mod error;
mod filter;
mod priority;
mod processor;
mod progress;
mod scan;
mod source;

pub use context::build_context_from_files;
pub use error::{IngestError, IngestResult};
pub use filter::{BinaryDetector, InclusionFilter, PathFilter, SampleBinaryDetector};
pub use priority::PriorityScorer;
pub use processor::{ImportProcessor, ImportSummary, SkipCounts, SkipReason};
pub use progress::{NoProgress, ProgressSink};
pub use scan::{root_name, scan_directory};
pub use source::{relative_path, DiskFile, FileSource, MemoryFile};
