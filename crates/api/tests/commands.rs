//! Command functions against a file-backed context

mod support;

use std::sync::Arc;

use resplan_core::{AdviceProvider, HistoryRecorder};
use resplan_domain::{
    Allocation, AllocationKind, CalcMode, HistoryAction, HistoryFilter, Member,
    ProbabilityBracket, ProbabilityWeights, Project, ProjectStatus, ResplanError, Role,
};
use resplan_lib::commands;
use support::{month, seed_plan, CannedAdvice, TestContext};

#[test]
fn sales_summary_defaults_to_current_fiscal_year_and_revenue_mode() {
    let t = TestContext::new(Some(seed_plan()));

    let summary = commands::sales_summary(&t.ctx, None, None).unwrap();

    assert_eq!(summary.fiscal_year, 2025);
    assert_eq!(summary.mode, CalcMode::Revenue);
    assert_eq!(summary.months.len(), 12);
    // p1 ends in March 2026; the lead ends after the fiscal year.
    assert_eq!(summary.total_confirmed, 25_000_000);
    assert_eq!(summary.total_forecast, 0);
}

#[test]
fn order_mode_picks_up_the_lead_start_month() {
    let t = TestContext::new(Some(seed_plan()));

    let summary = commands::sales_summary(&t.ctx, Some(2025), Some(CalcMode::Order)).unwrap();

    // 75% is the MEDIUM bracket, weighted at 70%.
    assert_eq!(summary.total_forecast, 28_000_000);
    assert_eq!(summary.total_combined, 53_000_000);
}

#[test]
fn pipeline_stats_use_configured_weights() {
    let t = TestContext::new(Some(seed_plan()));

    let stats = commands::pipeline_stats(&t.ctx).unwrap();

    assert_eq!(stats.lead_count, 1);
    assert_eq!(stats.total_lead_value, 40_000_000);
    assert_eq!(stats.weighted_pipeline, 28_000_000);
    assert_eq!(stats.expected_pipeline, 30_000_000);
    assert_eq!(stats.active_count, 1);
    assert_eq!(stats.active_revenue, 25_000_000);
    assert_eq!(stats.member_count, 2);
}

#[test]
fn resource_matrix_spans_the_configured_window() {
    let t = TestContext::new(Some(seed_plan()));

    let matrix = commands::resource_matrix(&t.ctx).unwrap();

    assert_eq!(matrix.months.len(), 9);
    assert_eq!(matrix.months[0], month(2025, 11));
    assert_eq!(matrix.members.len(), 2);

    let january = &matrix.members[0].monthly[2];
    assert_eq!(january.month, month(2026, 1));
    assert_eq!(january.total_percentage, 110);
    assert!(january.band.is_over_allocated());
}

#[test]
fn explicit_matrix_requires_months() {
    let t = TestContext::new(Some(seed_plan()));
    let err = commands::resource_matrix_for(&t.ctx, Vec::new()).unwrap_err();
    assert!(matches!(err, ResplanError::InvalidInput(_)));
}

#[test]
fn utilization_of_unknown_member_is_not_found() {
    let t = TestContext::new(Some(seed_plan()));

    assert_eq!(commands::member_utilization(&t.ctx, "m2", month(2026, 1)).unwrap(), 20);
    let err = commands::member_utilization(&t.ctx, "ghost", month(2026, 1)).unwrap_err();
    assert!(matches!(err, ResplanError::NotFound(_)));
}

#[test]
fn convert_lead_rewrites_allocations_and_saves() {
    let t = TestContext::new(Some(seed_plan()));

    let report = commands::convert_lead(&t.ctx, "l1", Some(38_000_000)).unwrap();

    assert_eq!(report.project.status(), ProjectStatus::Active);
    assert_eq!(report.project.value(), 38_000_000);
    assert_eq!(report.removed_allocations, ["a3"]);
    assert_eq!(report.promoted_allocations, ["a2"]);

    let saved = t.reload();
    assert!(saved.allocations.iter().all(|a| a.id != "a3"));
    let promoted = saved.allocations.iter().find(|a| a.id == "a2").unwrap();
    assert_eq!(promoted.kind, AllocationKind::Committed);

    let converts = t
        .history
        .entries(&HistoryFilter::default())
        .unwrap()
        .into_iter()
        .filter(|e| e.action == HistoryAction::Convert)
        .count();
    assert_eq!(converts, 1);
}

#[test]
fn converting_a_contract_is_rejected_and_nothing_is_saved() {
    let t = TestContext::new(Some(seed_plan()));
    let before = t.reload();

    let err = commands::convert_lead(&t.ctx, "p1", None).unwrap_err();

    assert!(matches!(err, ResplanError::InvalidInput(_)));
    assert_eq!(t.reload(), before);
}

#[test]
fn deleting_a_project_cascades_and_persists() {
    let t = TestContext::new(Some(seed_plan()));

    let deleted = commands::delete_project(&t.ctx, "l1").unwrap();
    assert_eq!(deleted.id(), "l1");

    let saved = t.reload();
    assert_eq!(saved.projects.len(), 1);
    assert_eq!(saved.allocations.len(), 1);
    assert_eq!(saved.allocations[0].id, "a1");
}

#[test]
fn allocations_against_a_lead_are_saved_as_prospects() {
    let t = TestContext::new(Some(seed_plan()));

    let allocation = Allocation::new("a9", "m2", "l1", "developer", month(2026, 3), 50);
    commands::add_allocation(&t.ctx, allocation).unwrap();

    let saved = t.reload();
    let stored = saved.allocations.iter().find(|a| a.id == "a9").unwrap();
    assert_eq!(stored.kind, AllocationKind::Prospective);
}

#[test]
fn members_can_be_added_and_removed() {
    let t = TestContext::new(Some(seed_plan()));

    commands::add_member(&t.ctx, Member::new("m3", "Kato", Role::Designer)).unwrap();
    let err = commands::add_member(&t.ctx, Member::new("m3", "Kato", Role::Designer)).unwrap_err();
    assert!(matches!(err, ResplanError::InvalidInput(_)));

    let removed = commands::delete_member(&t.ctx, "m1").unwrap();
    assert_eq!(removed.name, "Sato");

    let saved = t.reload();
    assert_eq!(saved.members.len(), 2);
    assert!(saved.allocations.iter().all(|a| a.member_id != "m1"));
}

#[test]
fn members_and_allocations_can_be_updated() {
    let t = TestContext::new(Some(seed_plan()));

    let renamed = Member::new("m2", "Ito Kenji", Role::TechLead);
    commands::update_member(&t.ctx, renamed.clone()).unwrap();

    let allocation = Allocation::new("a1", "m1", "p1", "pm", month(2026, 1), 50);
    commands::update_allocation(&t.ctx, allocation).unwrap();

    let saved = t.reload();
    assert_eq!(saved.members.iter().find(|m| m.id == "m2"), Some(&renamed));
    let stored = saved.allocations.iter().find(|a| a.id == "a1").unwrap();
    assert_eq!(stored.percentage, 50);
    assert_eq!(commands::member_utilization(&t.ctx, "m1", month(2026, 1)).unwrap(), 90);

    let ghost = Member::new("ghost", "Nobody", Role::Analyst);
    assert!(matches!(commands::update_member(&t.ctx, ghost), Err(ResplanError::NotFound(_))));
    let dangling = Allocation::new("a1", "m1", "zz", "pm", month(2026, 1), 10);
    assert!(matches!(
        commands::update_allocation(&t.ctx, dangling),
        Err(ResplanError::NotFound(_))
    ));
}

#[test]
fn weights_are_validated_persisted_and_reset() {
    let t = TestContext::new(Some(seed_plan()));

    let err = commands::set_weights(&t.ctx, ProbabilityWeights::new(101, 70, 40, 10)).unwrap_err();
    assert!(matches!(err, ResplanError::InvalidInput(_)));

    let partial = ProbabilityWeights::empty().with(ProbabilityBracket::Medium, Some(50));
    commands::set_weights(&t.ctx, partial).unwrap();
    assert_eq!(t.reload().weights, partial);
    // HIGH has no weight now but the lead is MEDIUM.
    assert_eq!(commands::pipeline_stats(&t.ctx).unwrap().weighted_pipeline, 20_000_000);

    let restored = commands::reset_weights(&t.ctx).unwrap();
    assert_eq!(restored, ProbabilityWeights::default());
    assert_eq!(commands::get_weights(&t.ctx).unwrap(), ProbabilityWeights::default());
}

#[test]
fn listing_filters_by_status() {
    let t = TestContext::new(Some(seed_plan()));

    let leads = commands::list_projects(&t.ctx, Some(ProjectStatus::Lead)).unwrap();
    assert_eq!(leads.len(), 1);
    assert!(leads.iter().all(Project::is_lead));
    assert_eq!(commands::list_projects(&t.ctx, None).unwrap().len(), 2);
}

#[tokio::test]
async fn advice_uses_the_configured_provider() {
    let advice = CannedAdvice::new("Staff the data team early.");
    let provider: Arc<dyn AdviceProvider> = Arc::clone(&advice) as Arc<dyn AdviceProvider>;
    let t = TestContext::with_advice(Some(seed_plan()), Some(provider));

    let reply = commands::project_advice(&t.ctx, "l1", false).await.unwrap();

    assert_eq!(reply, "Staff the data team early.");
    let prompts = advice.prompts.lock();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("Project l1"));
}

#[tokio::test]
async fn saved_advice_is_kept_on_the_project() {
    let advice = CannedAdvice::new("Lock the scope before kickoff.");
    let provider: Arc<dyn AdviceProvider> = Arc::clone(&advice) as Arc<dyn AdviceProvider>;
    let t = TestContext::with_advice(Some(seed_plan()), Some(provider));

    commands::project_advice(&t.ctx, "l1", true).await.unwrap();

    let saved = t.reload();
    let lead = saved.projects.iter().find(|p| p.id() == "l1").unwrap();
    let advices = &lead.details().ai_advices;
    assert_eq!(advices.len(), 1);
    assert_eq!(advices[0].content, "Lock the scope before kickoff.");
    assert!(advices[0].id.starts_with("ai-advice-"));
    assert_eq!(advices[0].generated_at.date_naive(), support::date(2026, 1, 15));
    assert_eq!(t.history.len(), 1);
}

#[tokio::test]
async fn advice_without_provider_is_a_config_error() {
    let t = TestContext::new(Some(seed_plan()));

    let err = commands::project_advice(&t.ctx, "l1", false).await.unwrap_err();
    assert!(matches!(err, ResplanError::Config(_)));
}
