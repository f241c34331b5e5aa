//! Generation history for a single session.
//!
//! Entries are kept newest-first. The collection lives only as long as the
//! session that owns it; nothing here touches the filesystem.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Length of the prompt preview shown in the compact history view
pub const PREVIEW_CHARS: usize = 50;

/// One completed generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// When the generation finished
    pub timestamp: DateTime<Local>,
    /// What the user typed
    pub original_request: String,
    /// The synthesized expert prompt
    pub refined_prompt: String,
    /// Free-text model recommendation from the generator
    pub recommendation: String,
    /// Backend model that produced the prompt
    pub engine_used: String,
}

impl HistoryEntry {
    pub fn new(
        original_request: impl Into<String>,
        refined_prompt: impl Into<String>,
        recommendation: impl Into<String>,
        engine_used: impl Into<String>,
    ) -> Self {
        Self::at(
            Local::now(),
            original_request,
            refined_prompt,
            recommendation,
            engine_used,
        )
    }

    /// Create an entry with an explicit timestamp
    pub fn at(
        timestamp: DateTime<Local>,
        original_request: impl Into<String>,
        refined_prompt: impl Into<String>,
        recommendation: impl Into<String>,
        engine_used: impl Into<String>,
    ) -> Self {
        Self {
            timestamp,
            original_request: original_request.into(),
            refined_prompt: refined_prompt.into(),
            recommendation: recommendation.into(),
            engine_used: engine_used.into(),
        }
    }

    /// Minute-precision time for display ("14:05")
    pub fn formatted_time(&self) -> String {
        self.timestamp.format("%H:%M").to_string()
    }

    /// First few characters of the prompt, always followed by "..."
    pub fn prompt_preview(&self) -> String {
        let head: String = self.refined_prompt.chars().take(PREVIEW_CHARS).collect();
        format!("{}...", head)
    }
}

/// Ordered, append-only record of generations (most recent first)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct History {
    entries: Vec<HistoryEntry>,
    /// Optional cap; the oldest entries are dropped once exceeded
    limit: Option<usize>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// History that keeps at most `limit` entries
    pub fn with_limit(limit: usize) -> Self {
        Self {
            entries: Vec::new(),
            limit: Some(limit.max(1)),
        }
    }

    /// Prepend a new entry
    pub fn record(&mut self, entry: HistoryEntry) {
        self.entries.insert(0, entry);
        if let Some(limit) = self.limit {
            self.entries.truncate(limit);
        }
    }

    /// All entries, newest first
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// The most recent `count` entries
    pub fn latest(&self, count: usize) -> &[HistoryEntry] {
        let end = count.min(self.entries.len());
        &self.entries[..end]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }
}
