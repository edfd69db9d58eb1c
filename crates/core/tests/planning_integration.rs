//! End-to-end behaviour of the planning store over a realistic plan.

mod support;

use std::sync::Arc;

use resplan_core::{
    AdviceService, FixedClock, HistoryRecorder, InMemoryHistory, PlanSnapshot, PlanningStore,
};
use resplan_domain::{
    AllocationKind, CalcMode, Collection, HistoryAction, HistoryFilter, ProbabilityWeights,
    ProjectStatus, ResplanError, UtilizationBand,
};
use support::fixtures::{allocation, date, month, sample_members, sample_projects};
use support::recorders::{EchoAdvice, FailingHistory};

// ============================================================================
// Helpers
// ============================================================================

fn seeded_store() -> (PlanningStore, Arc<InMemoryHistory>) {
    let snapshot = PlanSnapshot {
        projects: sample_projects(),
        members: sample_members(),
        allocations: vec![
            allocation("a1", "m1", "p1", "2026-01", 50, AllocationKind::Committed),
            allocation("a2", "m1", "l1", "2026-01", 40, AllocationKind::Prospective),
            allocation("a3", "m1", "p1", "2026-01", 30, AllocationKind::Committed),
            allocation("a4", "m2", "l1", "2025-08", 20, AllocationKind::PreSales),
        ],
        weights: ProbabilityWeights::default(),
    };
    let history = Arc::new(InMemoryHistory::new());
    let clock = Arc::new(FixedClock::at_date(date(2026, 1, 15)));
    let store = PlanningStore::from_snapshot(snapshot, history.clone(), clock)
        .unwrap()
        .with_actor("planner");
    (store, history)
}

// ============================================================================
// Derived views
// ============================================================================

#[test]
fn dashboard_numbers_for_seeded_plan() {
    let (store, _) = seeded_store();

    let stats = store.pipeline_stats();
    assert_eq!(stats.lead_count, 1);
    assert_eq!(stats.total_lead_value, 40_000_000);
    assert_eq!(stats.weighted_pipeline, 28_000_000);
    assert_eq!(stats.expected_pipeline, 30_000_000);
    assert_eq!(stats.active_count, 1);
    assert_eq!(stats.active_revenue, 25_000_000);
    assert_eq!(stats.member_count, 2);

    let summary = store.sales_summary(2025, CalcMode::Revenue).unwrap();
    assert_eq!(summary.total_confirmed, 25_000_000);
    assert_eq!(summary.total_forecast, 28_000_000);
    assert_eq!(summary.total_combined, 53_000_000);

    let orders = store.sales_summary(2025, CalcMode::Order).unwrap();
    let november = orders.months.iter().find(|m| m.sales.month == month("2025-11")).unwrap();
    assert_eq!(november.sales.confirmed, 25_000_000);
}

#[test]
fn resource_matrix_flags_over_allocation() {
    let (store, _) = seeded_store();
    let window = store.matrix_window(2, 6);
    let matrix = store.resource_matrix(&window);

    let sato = matrix.iter().find(|row| row.member.id == "m1").unwrap();
    let january = sato.monthly.iter().find(|cell| cell.month == month("2026-01")).unwrap();
    assert_eq!(january.total_percentage, 120);
    assert_eq!(january.band, UtilizationBand::Over);
    assert_eq!(january.project_breakdown.len(), 3);
    assert!(january.project_breakdown.iter().any(|b| b.is_prospect && b.project_id == "l1"));

    let december = sato.monthly.iter().find(|cell| cell.month == month("2025-12")).unwrap();
    assert_eq!(december.band, UtilizationBand::Empty);
}

// ============================================================================
// Lead conversion
// ============================================================================

#[test]
fn winning_a_lead_moves_value_from_forecast_to_confirmed() {
    let (mut store, history) = seeded_store();

    let outcome = store.convert_lead("l1", None).unwrap();
    assert_eq!(outcome.removed.len(), 1);
    assert_eq!(outcome.removed[0].id, "a4");
    assert_eq!(outcome.promoted, ["a2"]);

    assert_eq!(store.project("l1").unwrap().status(), ProjectStatus::Active);
    assert!(store.allocations().iter().all(|a| a.kind == AllocationKind::Committed));

    let summary = store.sales_summary(2025, CalcMode::Revenue).unwrap();
    assert_eq!(summary.total_confirmed, 65_000_000);
    assert_eq!(summary.total_forecast, 0);

    store.flush_history();
    let project_log = store
        .history(&HistoryFilter::default().for_record(Collection::Projects, "l1"))
        .unwrap();
    assert_eq!(project_log.len(), 1);
    assert_eq!(project_log[0].action, HistoryAction::Convert);
    assert_eq!(project_log[0].actor, "planner");

    let deletes = history
        .entries(&HistoryFilter::default().for_record(Collection::Allocations, "a4"))
        .unwrap();
    assert_eq!(deletes.len(), 1);
    assert!(deletes[0].snapshot.is_some());
}

#[test]
fn converting_twice_fails_without_side_effects() {
    let (mut store, _) = seeded_store();
    store.convert_lead("l1", Some(38_000_000)).unwrap();
    let before = store.snapshot();

    let err = store.convert_lead("l1", None).unwrap_err();
    assert!(matches!(err, ResplanError::InvalidInput(_)));
    assert_eq!(store.snapshot(), before);
}

// ============================================================================
// History failures
// ============================================================================

#[test]
fn failing_history_does_not_block_mutations() {
    let clock = Arc::new(FixedClock::at_date(date(2026, 1, 15)));
    let mut store = PlanningStore::new(Arc::new(FailingHistory), clock);

    for member in sample_members() {
        store.add_member(member).unwrap();
    }
    for project in sample_projects() {
        store.add_project(project).unwrap();
    }
    store.delete_project("h1").unwrap();

    assert!(store.flush_history() > 0);
    assert!(store.pending_history().is_empty());
    assert_eq!(store.projects().len(), 2);
    assert!(store.history(&HistoryFilter::default()).unwrap().is_empty());
}

// ============================================================================
// Advice
// ============================================================================

#[tokio::test]
async fn advice_uses_project_from_store() {
    let (store, _) = seeded_store();
    let provider = Arc::new(EchoAdvice::default());
    let service = AdviceService::new(provider.clone());

    let advice = service.advise(store.project("l1").unwrap()).await.unwrap();

    assert_eq!(advice, "Review the schedule risk weekly.");
    let prompts = provider.prompts.lock();
    assert!(prompts[0].contains("Lead l1"));
    assert!(prompts[0].contains("確度: 75%"));
}
