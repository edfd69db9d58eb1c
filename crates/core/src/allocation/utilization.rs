//! Member utilization and the resource matrix
//!
//! Utilization is the plain sum of a member's allocation percentages in a
//! month. It is never clamped: over-allocation is reported, not rejected.

use std::collections::HashMap;

use resplan_domain::constants::UNKNOWN_PROJECT_NAME;
use resplan_domain::{
    Allocation, Member, MemberUtilization, MonthKey, MonthlyUtilization, Project,
    ProjectBreakdown, UtilizationBand,
};
use tracing::debug;

/// Total percentage allocated to `member_id` in `month`.
#[must_use]
pub fn utilization_by_member_month(
    allocations: &[Allocation],
    member_id: &str,
    month: MonthKey,
) -> u32 {
    allocations
        .iter()
        .filter(|a| a.member_id == member_id && a.month == month)
        .fold(0u32, |sum, a| sum.saturating_add(a.percentage))
}

/// Per-member, per-month utilization with an itemised project breakdown.
///
/// One row per member in input order, one cell per requested month in input
/// order, one breakdown line per allocation (never merged). Allocations for
/// projects that no longer exist are labelled `"Unknown"`.
#[must_use]
pub fn member_matrix(
    members: &[Member],
    allocations: &[Allocation],
    projects: &[Project],
    months: &[MonthKey],
) -> Vec<MemberUtilization> {
    let project_names: HashMap<&str, &str> =
        projects.iter().map(|p| (p.id(), p.name())).collect();

    let mut by_cell: HashMap<(&str, MonthKey), Vec<&Allocation>> = HashMap::new();
    for allocation in allocations {
        by_cell
            .entry((allocation.member_id.as_str(), allocation.month))
            .or_default()
            .push(allocation);
    }

    members
        .iter()
        .map(|member| {
            let monthly = months
                .iter()
                .map(|month| {
                    let cell = by_cell.get(&(member.id.as_str(), *month));
                    let project_breakdown: Vec<ProjectBreakdown> = cell
                        .into_iter()
                        .flatten()
                        .map(|allocation| breakdown_line(allocation, &project_names))
                        .collect();
                    let total_percentage = project_breakdown
                        .iter()
                        .fold(0u32, |sum, line| sum.saturating_add(line.percentage));
                    let band = UtilizationBand::from_percentage(total_percentage);

                    if band.is_over_allocated() {
                        debug!(
                            member_id = %member.id,
                            month = %month,
                            total_percentage,
                            "member over-allocated"
                        );
                    }

                    MonthlyUtilization { month: *month, total_percentage, band, project_breakdown }
                })
                .collect();

            MemberUtilization { member: member.clone(), monthly }
        })
        .collect()
}

fn breakdown_line(allocation: &Allocation, project_names: &HashMap<&str, &str>) -> ProjectBreakdown {
    let project_name = project_names
        .get(allocation.project_id.as_str())
        .copied()
        .unwrap_or(UNKNOWN_PROJECT_NAME);

    ProjectBreakdown {
        project_id: allocation.project_id.clone(),
        project_name: project_name.to_string(),
        role: allocation.role.clone(),
        percentage: allocation.percentage,
        is_prospect: allocation.is_prospect(),
        is_pre_sales: allocation.is_pre_sales(),
    }
}
