//! Shared helpers for infra integration tests

#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

use chrono::NaiveDate;
use resplan_core::PlanSnapshot;
use resplan_domain::{
    Allocation, ContractProject, ContractStatus, LeadProject, Member, MonthKey, Probability,
    ProbabilityWeights, Project, ProjectDetails, Role,
};
use tempfile::TempDir;

/// Write `contents` to `name` inside `dir` and return the path.
pub fn write_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("fixture file should be written");
    path
}

type Ymd = (i32, u32, u32);

fn details(id: &str, name: &str, start: Ymd, end: Ymd, budget: u64) -> ProjectDetails {
    let date = |(y, m, d): (i32, u32, u32)| NaiveDate::from_ymd_opt(y, m, d).expect("valid date");
    ProjectDetails::new(id, name, "Acme", date(start), date(end), budget)
        .expect("valid project details")
}

/// One active contract, one lead and two members with allocations.
pub fn sample_snapshot() -> PlanSnapshot {
    let contract = Project::Contract(ContractProject::new(
        details("p1", "Billing revamp", (2025, 11, 1), (2026, 3, 31), 25_000_000),
        ContractStatus::Active,
    ));
    let lead = Project::Lead(LeadProject::new(
        details("l1", "Data platform", (2026, 2, 1), (2026, 6, 30), 40_000_000),
        Some(Probability::new(75).expect("valid probability")),
    ));
    let month = MonthKey::new(2026, 2).expect("valid month");

    PlanSnapshot {
        projects: vec![contract, lead],
        members: vec![
            Member::new("m1", "Sato", Role::ProjectManager),
            Member::new("m2", "Ito", Role::Developer),
        ],
        allocations: vec![
            Allocation::new("a1", "m1", "p1", "pm", month, 60),
            Allocation::new("a2", "m2", "l1", "developer", month, 50),
        ],
        weights: ProbabilityWeights::default(),
    }
}
