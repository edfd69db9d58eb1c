//! File-backed implementations of the persistence ports

pub mod history_log;
pub mod json_snapshot;

pub use history_log::JsonlHistoryLog;
pub use json_snapshot::JsonSnapshotStore;
