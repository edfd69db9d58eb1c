//! Plan fixtures shaped like the seeded demo data.

use chrono::NaiveDate;
use resplan_domain::{
    Allocation, AllocationKind, ContractProject, ContractStatus, LeadProject, Member, MonthKey,
    Probability, Project, ProjectDetails, Role,
};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn month(raw: &str) -> MonthKey {
    raw.parse().unwrap()
}

pub fn contract(
    id: &str,
    start: NaiveDate,
    end: NaiveDate,
    budget: u64,
    status: ContractStatus,
) -> Project {
    let details = ProjectDetails::new(id, format!("Project {id}"), "Client", start, end, budget)
        .unwrap();
    Project::Contract(ContractProject::new(details, status))
}

pub fn lead(
    id: &str,
    start: NaiveDate,
    end: NaiveDate,
    budget: u64,
    probability: Option<u8>,
) -> Project {
    let details =
        ProjectDetails::new(id, format!("Lead {id}"), "Prospect", start, end, budget).unwrap();
    Project::Lead(LeadProject::new(details, probability.map(|p| Probability::new(p).unwrap())))
}

/// Two members, one active project, one lead, one on-hold project.
pub fn sample_projects() -> Vec<Project> {
    vec![
        contract("p1", date(2025, 11, 1), date(2026, 3, 31), 25_000_000, ContractStatus::Active),
        lead("l1", date(2025, 6, 1), date(2025, 9, 30), 40_000_000, Some(75)),
        contract("h1", date(2025, 5, 1), date(2025, 8, 31), 9_000_000, ContractStatus::OnHold),
    ]
}

pub fn sample_members() -> Vec<Member> {
    vec![
        Member::new("m1", "Sato", Role::ProjectManager).with_skills(["PMO", "Banking"]),
        Member::new("m2", "Ito", Role::Developer).with_skills(["Rust", "React"]),
    ]
}

pub fn allocation(
    id: &str,
    member: &str,
    project: &str,
    month_key: &str,
    percentage: u32,
    kind: AllocationKind,
) -> Allocation {
    Allocation::new(id, member, project, "Engineer", month(month_key), percentage).with_kind(kind)
}
