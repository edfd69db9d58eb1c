//! Audit history of plan mutations

pub mod diff;
pub mod memory;
pub mod ports;

use chrono::{DateTime, Utc};
use resplan_domain::{Collection, HistoryAction, HistoryEntry};
use uuid::Uuid;

pub use diff::calculate_diff;
pub use memory::InMemoryHistory;
pub use ports::HistoryRecorder;

/// A history entry with a fresh id and no changes or snapshot yet.
#[must_use]
pub fn new_entry(
    collection: Collection,
    action: HistoryAction,
    record_id: &str,
    target_name: &str,
    actor: &str,
    created: DateTime<Utc>,
) -> HistoryEntry {
    HistoryEntry {
        id: format!("log-{}", Uuid::now_v7()),
        collection,
        record_id: record_id.to_string(),
        action,
        actor: actor.to_string(),
        changes: Vec::new(),
        snapshot: None,
        target_name: target_name.to_string(),
        created,
    }
}
