//! Dashboard pipeline statistics

use resplan_domain::{ContractStatus, PipelineStats, ProbabilityWeights, Project};

use super::weighting::{expected_value, weighted_value};

/// Headline counts and sums over the current project list.
#[must_use]
pub fn pipeline_stats(
    projects: &[Project],
    member_count: usize,
    weights: &ProbabilityWeights,
) -> PipelineStats {
    let mut stats = PipelineStats { member_count, ..PipelineStats::default() };

    for project in projects {
        match project {
            Project::Lead(lead) => {
                let budget = lead.value();
                let probability = lead.effective_probability();
                stats.lead_count += 1;
                stats.total_lead_value = stats.total_lead_value.saturating_add(budget);
                stats.weighted_pipeline = stats
                    .weighted_pipeline
                    .saturating_add(weighted_value(budget, probability, weights));
                stats.expected_pipeline =
                    stats.expected_pipeline.saturating_add(expected_value(budget, probability));
            }
            Project::Contract(contract) if contract.status == ContractStatus::Active => {
                stats.active_count += 1;
                stats.active_revenue = stats.active_revenue.saturating_add(contract.value());
            }
            Project::Contract(_) => {}
        }
    }

    stats
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use resplan_domain::{ContractProject, LeadProject, Probability, ProjectDetails};

    use super::*;

    fn details(id: &str, budget: u64) -> ProjectDetails {
        let start = NaiveDate::from_ymd_opt(2025, 4, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 9, 30).unwrap();
        ProjectDetails::new(id, id, "Client", start, end, budget).unwrap()
    }

    #[test]
    fn counts_leads_and_active_projects() {
        let mut active = ContractProject::new(details("p1", 10_000_000), ContractStatus::Active);
        active.actual_revenue = Some(12_000_000);
        let projects = vec![
            Project::Lead(LeadProject::new(details("l1", 40_000_000), Some(Probability::new(75).unwrap()))),
            Project::Lead(LeadProject::new(details("l2", 10_000_000), None)),
            Project::Contract(active),
            Project::Contract(ContractProject::new(details("p2", 5), ContractStatus::Completed)),
        ];

        let stats = pipeline_stats(&projects, 6, &ProbabilityWeights::default());

        assert_eq!(stats.lead_count, 2);
        assert_eq!(stats.total_lead_value, 50_000_000);
        assert_eq!(stats.weighted_pipeline, 28_000_000 + 1_000_000);
        assert_eq!(stats.expected_pipeline, 30_000_000);
        assert_eq!(stats.active_count, 1);
        assert_eq!(stats.active_revenue, 12_000_000);
        assert_eq!(stats.member_count, 6);
    }

    #[test]
    fn empty_pipeline_is_zero() {
        let stats = pipeline_stats(&[], 0, &ProbabilityWeights::default());
        assert_eq!(stats, PipelineStats::default());
    }
}
