//! Core domain types for Folio.

use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

/// Unique identifier for conversation messages.
pub type MessageId = String;

/// Generate a new unique ID.
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Lifecycle marker carried by every progress event.
///
/// The stages are ordered but not strictly sequential: `Processing` is
/// re-emitted once per chunk, and `Creating` belongs to whoever turns the
/// import result into conversation messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportStage {
    Scanning,
    Filtering,
    Processing,
    Creating,
}

impl ImportStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImportStage::Scanning => "scanning",
            ImportStage::Filtering => "filtering",
            ImportStage::Processing => "processing",
            ImportStage::Creating => "creating",
        }
    }
}

impl FromStr for ImportStage {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "scanning" => Ok(ImportStage::Scanning),
            "filtering" => Ok(ImportStage::Filtering),
            "processing" => Ok(ImportStage::Processing),
            "creating" => Ok(ImportStage::Creating),
            other => Err(Error::InvalidInput(format!("unknown import stage: {}", other))),
        }
    }
}

impl std::fmt::Display for ImportStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A progress snapshot emitted while an import runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportProgress {
    pub stage: ImportStage,
    /// Input files considered so far. Never decreases within a run.
    pub processed: usize,
    /// Input file count for the run.
    pub total: usize,
    pub details: String,
}

impl ImportProgress {
    pub fn new(
        stage: ImportStage,
        processed: usize,
        total: usize,
        details: impl Into<String>,
    ) -> Self {
        Self {
            stage,
            processed: processed.min(total),
            total,
            details: details.into(),
        }
    }

    /// Completion percentage, rounded to the nearest integer.
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        ((self.processed as f64 / self.total as f64) * 100.0).round() as u8
    }
}

impl std::fmt::Display for ImportProgress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}%: {}", self.stage, self.percent(), self.details)
    }
}

/// A file that passed every filter and was read as text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessedFile {
    /// Path relative to the imported root, `/`-separated.
    pub path: String,
    pub content: String,
    /// Byte size of the original file.
    pub size: u64,
    pub priority: u32,
}

/// Author of a conversation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

impl MessageRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
        }
    }
}

impl std::fmt::Display for MessageRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One message of the conversation built from an imported folder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationMessage {
    pub id: MessageId,
    pub role: MessageRole,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl ConversationMessage {
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            role,
            content: content.into(),
            created_at: Utc::now(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, content)
    }
}

/// Render a conversation as pretty-printed JSON.
pub fn messages_to_json(messages: &[ConversationMessage]) -> Result<String> {
    Ok(serde_json::to_string_pretty(messages)?)
}
