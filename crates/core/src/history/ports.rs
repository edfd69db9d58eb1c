//! Port interface for recording audit history

use resplan_domain::{HistoryEntry, HistoryFilter, Result};

/// Append-only sink for history entries
pub trait HistoryRecorder: Send + Sync {
    /// Record one entry
    fn record(&self, entry: HistoryEntry) -> Result<()>;

    /// Entries matching `filter`, oldest first
    fn entries(&self, filter: &HistoryFilter) -> Result<Vec<HistoryEntry>>;
}
