//! Bounded, newest-first activity feed.

use std::collections::VecDeque;

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::types::{LogEntry, LogEntryInput};

// ─── Constants ──────────────────────────────────────────────────────

/// Default feed capacity.
pub const MAX_LOGS: usize = 12;

/// Placeholder the renderer shows instead of an empty feed.
pub const WAITING_PLACEHOLDER: &str = "Waiting for activity\u{2026}";

// ─── FeedView ───────────────────────────────────────────────────────

/// What the renderer receives for the activity feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "entries", rename_all = "snake_case")]
pub enum FeedView {
    /// Nothing ingested yet.
    Waiting,
    /// Newest first, never empty.
    Entries(Vec<LogEntry>),
}

impl FeedView {
    pub fn entries(&self) -> &[LogEntry] {
        match self {
            Self::Waiting => &[],
            Self::Entries(entries) => entries,
        }
    }
}

// ─── LogAggregator ──────────────────────────────────────────────────

/// Owns the feed. Entries are stamped on ingestion and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogAggregator {
    /// Newest at the front.
    entries: VecDeque<LogEntry>,
    capacity: usize,
    /// Entries ever pushed; the next entry's `seq`.
    pushed: u64,
}

impl LogAggregator {
    pub fn new() -> Self {
        Self::with_capacity(MAX_LOGS)
    }

    /// Capacity is clamped to at least one entry.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity + 1),
            capacity,
            pushed: 0,
        }
    }

    /// Stamp each input with `now` and insert it at the front, in input
    /// order, then drop the oldest entries beyond capacity.
    ///
    /// Sequential front insertion reverses a batch: `[A, B]` lands as
    /// `[B, A, ..]`.
    pub fn push<I>(&mut self, inputs: I, now: DateTime<Local>)
    where
        I: IntoIterator<Item = LogEntryInput>,
    {
        for input in inputs {
            self.entries.push_front(LogEntry::stamp(self.pushed, input, now));
            self.pushed += 1;
        }
        self.entries.truncate(self.capacity);
    }

    pub fn snapshot(&self) -> Vec<LogEntry> {
        self.entries.iter().cloned().collect()
    }

    pub fn feed(&self) -> FeedView {
        if self.entries.is_empty() {
            FeedView::Waiting
        } else {
            FeedView::Entries(self.snapshot())
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for LogAggregator {
    fn default() -> Self {
        Self::new()
    }
}
