//! History browsing
//!
//! A read-only projection of the stored practice history. Display order is
//! newest first, a pure reversal of the append-order list; the stored order
//! itself is never mutated. Display indices map back to storage through
//! `original_index = len - 1 - display_index`, which is how detail lookups
//! and retries find their entry.

use anyhow::Result;

use crate::store::model::{HistoryEntry, RetryRequest};
use crate::store::{PersistentStore, StoreKey};

/// Snapshot of the stored history for browsing
#[derive(Debug, Clone, Default)]
pub struct HistoryBrowser {
    entries: Vec<HistoryEntry>,
}

impl HistoryBrowser {
    /// Load a snapshot from the store
    pub fn load(store: &PersistentStore) -> Self {
        Self { entries: store.history() }
    }

    /// Build a browser over an in-memory history (tests, previews)
    pub fn from_entries(entries: Vec<HistoryEntry>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in display order, newest first
    pub fn newest_first(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter().rev()
    }

    /// Map a display index (0 = newest) back to the storage index
    pub fn original_index(&self, display_index: usize) -> Option<usize> {
        self.entries.len().checked_sub(1)?.checked_sub(display_index)
    }

    /// Full entry for a display index, for the detail view
    pub fn entry_at(&self, display_index: usize) -> Option<&HistoryEntry> {
        self.entries.get(self.original_index(display_index)?)
    }

    /// Queue the entry at `display_index` for retry
    ///
    /// Writes a retry request from the entry's question and topic; the next
    /// practice session start consumes it.
    pub fn retry(&self, store: &PersistentStore, display_index: usize) -> Result<RetryRequest> {
        let entry = self
            .entry_at(display_index)
            .ok_or_else(|| anyhow::anyhow!("No history entry at display index {display_index}"))?;

        let request = RetryRequest {
            question: entry.question.clone(),
            topic: entry.topic_or_default().to_string(),
        };
        store.save(StoreKey::RetryRequest, &request)?;
        Ok(request)
    }
}
