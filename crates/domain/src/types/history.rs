//! Audit history types
//!
//! Every mutation of the planning store produces one [`HistoryEntry`]. Keys
//! are snake_case on the wire so entries can be appended to a JSON-lines log
//! and read back by other tools unchanged.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::impl_domain_status_conversions;

/// Collection a history entry refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    Projects,
    Members,
    Allocations,
}

impl_domain_status_conversions!(Collection {
    Projects => "projects",
    Members => "members",
    Allocations => "allocations",
});

/// Kind of mutation recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryAction {
    Create,
    Update,
    Delete,
    Convert,
}

impl_domain_status_conversions!(HistoryAction {
    Create => "create",
    Update => "update",
    Delete => "delete",
    Convert => "convert",
});

/// A single field that differs between two versions of a record.
///
/// `None` means the field was absent on that side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldChange {
    pub field: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new: Option<Value>,
}

/// An audit record of one mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: String,
    pub collection: Collection,
    pub record_id: String,
    pub action: HistoryAction,
    pub actor: String,
    #[serde(default)]
    pub changes: Vec<FieldChange>,
    /// Full record as it was, kept for deletes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snapshot: Option<Value>,
    #[serde(default)]
    pub target_name: String,
    pub created: DateTime<Utc>,
}

/// Selects history entries by day range and, optionally, by record.
///
/// Both bounds are inclusive whole days in UTC.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection: Option<Collection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_id: Option<String>,
}

impl HistoryFilter {
    #[must_use]
    pub const fn between(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        Self { from, to, collection: None, record_id: None }
    }

    #[must_use]
    pub fn for_record(mut self, collection: Collection, record_id: impl Into<String>) -> Self {
        self.collection = Some(collection);
        self.record_id = Some(record_id.into());
        self
    }

    #[must_use]
    pub fn matches(&self, entry: &HistoryEntry) -> bool {
        let day = entry.created.date_naive();
        if self.from.is_some_and(|from| day < from) {
            return false;
        }
        if self.to.is_some_and(|to| day > to) {
            return false;
        }
        if self.collection.is_some_and(|c| c != entry.collection) {
            return false;
        }
        self.record_id.as_deref().map_or(true, |id| id == entry.record_id)
    }
}
