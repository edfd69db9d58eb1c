//! Planning store and its persistence port

pub mod ports;
pub mod store;

use uuid::Uuid;

pub use ports::{PlanSnapshot, SnapshotStore};
pub use store::PlanningStore;

/// A fresh, time-ordered record id such as `alloc-0192...`.
#[must_use]
pub fn new_record_id(prefix: &str) -> String {
    format!("{prefix}-{}", Uuid::now_v7().simple())
}
