//! Snapshot and history files driven through the planning store

mod support;

use std::sync::Arc;

use chrono::NaiveDate;
use resplan_core::{FixedClock, HistoryRecorder, PlanningStore, SnapshotStore};
use resplan_domain::{Collection, HistoryAction, HistoryFilter};
use resplan_infra::{JsonSnapshotStore, JsonlHistoryLog};
use tempfile::TempDir;

fn clock() -> Arc<FixedClock> {
    Arc::new(FixedClock::at_date(NaiveDate::from_ymd_opt(2026, 1, 15).expect("valid date")))
}

#[test]
fn plan_survives_a_restart() {
    let dir = TempDir::new().expect("temp dir");
    let snapshots = JsonSnapshotStore::new(dir.path().join("plan.json"));
    let history = Arc::new(JsonlHistoryLog::new(dir.path().join("history.jsonl")));

    let snapshot = support::sample_snapshot();
    let mut store = PlanningStore::from_snapshot(snapshot, history.clone(), clock())
        .expect("sample snapshot is consistent");
    store.delete_member("m2").expect("member exists");
    snapshots.save(&store.snapshot()).expect("snapshot saved");
    assert_eq!(store.flush_history(), 2);

    let reloaded = snapshots.load().expect("snapshot readable").expect("snapshot present");
    let restored =
        PlanningStore::from_snapshot(reloaded, history.clone(), clock()).expect("restored");

    assert_eq!(restored.members().len(), 1);
    assert!(restored.allocations_for_member("m2").is_empty());
    assert_eq!(restored.allocations().len(), 1);

    let deletes = history
        .entries(&HistoryFilter::default())
        .expect("history readable")
        .into_iter()
        .filter(|e| e.action == HistoryAction::Delete)
        .count();
    // The member plus its single allocation.
    assert_eq!(deletes, 2);
}

#[test]
fn converting_a_lead_is_logged_to_disk() {
    let dir = TempDir::new().expect("temp dir");
    let history = Arc::new(JsonlHistoryLog::new(dir.path().join("history.jsonl")));
    let mut store =
        PlanningStore::from_snapshot(support::sample_snapshot(), history.clone(), clock())
            .expect("sample snapshot is consistent");

    store.convert_lead("l1", Some(38_000_000)).expect("lead converts");
    assert!(!history.path().exists());
    store.flush_history();

    let reader = JsonlHistoryLog::new(history.path());
    let entries = reader
        .entries(&HistoryFilter::default().for_record(Collection::Projects, "l1"))
        .expect("history readable");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].action, HistoryAction::Convert);
    assert!(!entries[0].changes.is_empty());
}
