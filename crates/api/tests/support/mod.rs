//! Shared helpers for app integration tests

#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use resplan_core::{
    AdviceProvider, FixedClock, HistoryRecorder, InMemoryHistory, PlanSnapshot, SnapshotStore,
};
use resplan_domain::{
    Allocation, AllocationKind, Config, ContractProject, ContractStatus, LeadProject, Member,
    MonthKey, Probability, ProbabilityWeights, Project, ProjectDetails, Result, Role,
};
use resplan_infra::JsonSnapshotStore;
use resplan_lib::AppContext;
use tempfile::TempDir;

/// Context over a temp-dir snapshot, in-memory history and a fixed clock.
pub struct TestContext {
    pub ctx: AppContext,
    pub snapshots: Arc<JsonSnapshotStore>,
    pub history: Arc<InMemoryHistory>,
    _dir: TempDir,
}

impl TestContext {
    pub fn new(seed: Option<PlanSnapshot>) -> Self {
        Self::with_advice(seed, None)
    }

    pub fn with_advice(
        seed: Option<PlanSnapshot>,
        advice: Option<Arc<dyn AdviceProvider>>,
    ) -> Self {
        let dir = TempDir::new().expect("temp dir should be created");
        let path = dir.path().join("plan.json");
        let snapshots = Arc::new(JsonSnapshotStore::new(&path));
        if let Some(seed) = seed {
            snapshots.save(&seed).expect("seed snapshot should be written");
        }
        let history = Arc::new(InMemoryHistory::new());
        let clock = Arc::new(FixedClock::at_date(date(2026, 1, 15)));

        let ctx = AppContext::with_parts(
            Config::with_snapshot_path(path),
            Arc::clone(&snapshots) as Arc<dyn SnapshotStore>,
            Arc::clone(&history) as Arc<dyn HistoryRecorder>,
            clock,
            advice,
        )
        .expect("context should build");

        Self { ctx, snapshots, history, _dir: dir }
    }

    /// What a restarted process would see.
    pub fn reload(&self) -> PlanSnapshot {
        self.snapshots.load().expect("snapshot readable").expect("snapshot saved")
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

pub fn month(y: i32, m: u32) -> MonthKey {
    MonthKey::new(y, m).expect("valid month")
}

fn details(id: &str, start: NaiveDate, end: NaiveDate, budget: u64) -> ProjectDetails {
    ProjectDetails::new(id, format!("Project {id}"), "Acme", start, end, budget)
        .expect("valid project details")
}

/// p1 active (ends 2026-03), l1 lead at 75% (ends 2026-06), m1 and m2.
pub fn seed_plan() -> PlanSnapshot {
    PlanSnapshot {
        projects: vec![
            Project::Contract(ContractProject::new(
                details("p1", date(2025, 11, 1), date(2026, 3, 31), 25_000_000),
                ContractStatus::Active,
            )),
            Project::Lead(LeadProject::new(
                details("l1", date(2026, 2, 1), date(2026, 6, 30), 40_000_000),
                Some(Probability::new(75).expect("valid probability")),
            )),
        ],
        members: vec![
            Member::new("m1", "Sato", Role::ProjectManager),
            Member::new("m2", "Ito", Role::Developer),
        ],
        allocations: vec![
            Allocation::new("a1", "m1", "p1", "pm", month(2026, 1), 70),
            Allocation::new("a2", "m1", "l1", "pm", month(2026, 1), 40)
                .with_kind(AllocationKind::Prospective),
            Allocation::new("a3", "m2", "l1", "developer", month(2026, 1), 20)
                .with_kind(AllocationKind::PreSales),
        ],
        weights: ProbabilityWeights::default(),
    }
}

/// Advice provider that returns a fixed reply and counts calls.
pub struct CannedAdvice {
    pub reply: String,
    pub prompts: parking_lot::Mutex<Vec<String>>,
}

impl CannedAdvice {
    pub fn new(reply: &str) -> Arc<Self> {
        Arc::new(Self { reply: reply.to_string(), prompts: parking_lot::Mutex::new(Vec::new()) })
    }
}

#[async_trait]
impl AdviceProvider for CannedAdvice {
    async fn advise(&self, prompt: &str) -> Result<String> {
        self.prompts.lock().push(prompt.to_string());
        Ok(self.reply.clone())
    }
}
