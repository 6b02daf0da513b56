//! Append-only race event log.
//!
//! Backed by `im::Vector` so snapshots share structure with the live log
//! instead of copying it.

use chrono::{DateTime, Utc};
use im::Vector;
use serde::{Deserialize, Serialize};

/// Category of a log entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogCategory {
    /// Race lifecycle, round headers, boost grants.
    System,
    /// A participant's turn.
    Action,
    /// Final ranking lines.
    Result,
}

/// One entry in the race log.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub round: u32,
    pub timestamp: DateTime<Utc>,
    pub message: String,
    pub category: LogCategory,
}

/// Ordered, append-only sequence of log entries.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventLog {
    entries: Vector<LogEntry>,
}

impl EventLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry stamped with the current time.
    pub fn append(&mut self, round: u32, message: impl Into<String>, category: LogCategory) {
        self.entries.push_back(LogEntry {
            round,
            timestamp: Utc::now(),
            message: message.into(),
            category,
        });
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    #[must_use]
    pub fn last(&self) -> Option<&LogEntry> {
        self.entries.last()
    }

    /// The last `count` entries, oldest first.
    pub fn tail(&self, count: usize) -> impl Iterator<Item = &LogEntry> {
        let skip = self.entries.len().saturating_sub(count);
        self.entries.iter().skip(skip)
    }

    /// Entries recorded during `round`.
    pub fn for_round(&self, round: u32) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter().filter(move |e| e.round == round)
    }
}
