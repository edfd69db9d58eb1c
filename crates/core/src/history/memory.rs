//! In-process history recorder

use parking_lot::RwLock;
use resplan_domain::{HistoryEntry, HistoryFilter, Result};

use super::ports::HistoryRecorder;

/// Keeps history entries in memory for the life of the process.
#[derive(Debug, Default)]
pub struct InMemoryHistory {
    entries: RwLock<Vec<HistoryEntry>>,
}

impl InMemoryHistory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl HistoryRecorder for InMemoryHistory {
    fn record(&self, entry: HistoryEntry) -> Result<()> {
        self.entries.write().push(entry);
        Ok(())
    }

    fn entries(&self, filter: &HistoryFilter) -> Result<Vec<HistoryEntry>> {
        Ok(self.entries.read().iter().filter(|e| filter.matches(e)).cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use resplan_domain::{Collection, HistoryAction};

    use super::*;
    use crate::history::new_entry;

    #[test]
    fn records_and_filters() {
        let history = InMemoryHistory::new();
        let early = Utc.with_ymd_and_hms(2025, 10, 1, 12, 0, 0).unwrap();
        let late = Utc.with_ymd_and_hms(2025, 12, 1, 12, 0, 0).unwrap();

        history
            .record(new_entry(Collection::Projects, HistoryAction::Create, "p1", "A", "me", early))
            .unwrap();
        history
            .record(new_entry(Collection::Members, HistoryAction::Delete, "m1", "B", "me", late))
            .unwrap();

        assert_eq!(history.len(), 2);

        let november_on = HistoryFilter::between(Some(late.date_naive()), None);
        let found = history.entries(&november_on).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].record_id, "m1");
    }
}
