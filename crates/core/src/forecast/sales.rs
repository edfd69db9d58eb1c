//! Monthly and cumulative sales
//!
//! Each project's value lands entirely in one recognition month: its start
//! month when counting orders, its end month when counting revenue.
//! Active and completed projects are confirmed; leads are forecast at their
//! weighted value; projects on hold contribute nothing.

use std::collections::HashMap;

use resplan_domain::utils::calendar::{fiscal_year_months, fiscal_year_of};
use resplan_domain::{
    CalcMode, CumulativeSales, FiscalYearSummary, MonthKey, MonthlySales, ProbabilityWeights,
    Project, ProjectStatus, Result,
};
use tracing::debug;

use super::weighting::weighted_value;
use crate::clock::Clock;

/// Month a project's value is attributed to under `mode`.
#[must_use]
pub fn recognition_month(project: &Project, mode: CalcMode) -> MonthKey {
    let details = project.details();
    match mode {
        CalcMode::Order => MonthKey::from_date(details.start_date),
        CalcMode::Revenue => MonthKey::from_date(details.end_date),
    }
}

/// One bucket per requested month, in the order given.
///
/// Projects recognised outside every requested month are left out.
#[must_use]
pub fn monthly_sales(
    projects: &[Project],
    months: &[MonthKey],
    weights: &ProbabilityWeights,
    mode: CalcMode,
) -> Vec<MonthlySales> {
    let mut buckets: HashMap<MonthKey, MonthlySales> =
        months.iter().map(|month| (*month, MonthlySales::empty(*month))).collect();

    for project in projects {
        let month = recognition_month(project, mode);
        let Some(bucket) = buckets.get_mut(&month) else {
            continue;
        };

        match project {
            Project::Lead(lead) => {
                let value = lead.value();
                let weighted = weighted_value(value, lead.effective_probability(), weights);
                bucket.forecast_raw = bucket.forecast_raw.saturating_add(value);
                bucket.forecast = bucket.forecast.saturating_add(weighted);
            }
            Project::Contract(contract) if ProjectStatus::from(contract.status).is_confirmed() => {
                bucket.confirmed = bucket.confirmed.saturating_add(contract.value());
            }
            Project::Contract(_) => {}
        }
    }

    months
        .iter()
        .map(|month| {
            let mut bucket =
                buckets.get(month).cloned().unwrap_or_else(|| MonthlySales::empty(*month));
            bucket.total = bucket.confirmed.saturating_add(bucket.forecast);
            bucket
        })
        .collect()
}

/// Running totals over `monthly`, in the same order.
#[must_use]
pub fn cumulative_sales(monthly: &[MonthlySales]) -> Vec<CumulativeSales> {
    let mut confirmed = 0u64;
    let mut forecast = 0u64;
    let mut total = 0u64;

    monthly
        .iter()
        .map(|sales| {
            confirmed = confirmed.saturating_add(sales.confirmed);
            forecast = forecast.saturating_add(sales.forecast);
            total = total.saturating_add(sales.total);
            CumulativeSales {
                sales: sales.clone(),
                cumulative_confirmed: confirmed,
                cumulative_forecast: forecast,
                cumulative_total: total,
            }
        })
        .collect()
}

/// Cumulative sales over fiscal year `fiscal_year` with final totals.
///
/// # Errors
/// Returns `ResplanError::InvalidDate` if the fiscal year is outside the
/// representable range.
pub fn fiscal_year_summary(
    projects: &[Project],
    fiscal_year: i32,
    weights: &ProbabilityWeights,
    mode: CalcMode,
) -> Result<FiscalYearSummary> {
    let months = fiscal_year_months(fiscal_year)?;
    let cumulative = cumulative_sales(&monthly_sales(projects, &months, weights, mode));

    let (total_confirmed, total_forecast, total_combined) = cumulative
        .last()
        .map_or((0, 0, 0), |last| {
            (last.cumulative_confirmed, last.cumulative_forecast, last.cumulative_total)
        });

    debug!(fiscal_year, %mode, total_combined, "fiscal year summary computed");

    Ok(FiscalYearSummary {
        fiscal_year,
        mode,
        months: cumulative,
        total_confirmed,
        total_forecast,
        total_combined,
    })
}

/// Fiscal year containing the clock's current date.
#[must_use]
pub fn current_fiscal_year(clock: &dyn Clock) -> i32 {
    fiscal_year_of(clock.today())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use resplan_domain::{
        ContractProject, ContractStatus, LeadProject, Probability, ProjectDetails,
    };

    use super::*;
    use crate::clock::FixedClock;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn month(raw: &str) -> MonthKey {
        raw.parse().unwrap()
    }

    fn contract(id: &str, start: NaiveDate, end: NaiveDate, budget: u64, status: ContractStatus) -> Project {
        let details = ProjectDetails::new(id, id, "Client", start, end, budget).unwrap();
        Project::Contract(ContractProject::new(details, status))
    }

    fn lead(id: &str, start: NaiveDate, end: NaiveDate, budget: u64, probability: Option<u8>) -> Project {
        let details = ProjectDetails::new(id, id, "Client", start, end, budget).unwrap();
        let probability = probability.map(|p| Probability::new(p).unwrap());
        Project::Lead(LeadProject::new(details, probability))
    }

    #[test]
    fn recognition_month_follows_mode() {
        let project =
            contract("p1", date(2025, 11, 1), date(2026, 3, 31), 25_000_000, ContractStatus::Active);

        assert_eq!(recognition_month(&project, CalcMode::Revenue), month("2026-03"));
        assert_eq!(recognition_month(&project, CalcMode::Order), month("2025-11"));
    }

    #[test]
    fn active_project_lands_in_revenue_month() {
        let projects =
            [contract("p1", date(2025, 11, 1), date(2026, 3, 31), 25_000_000, ContractStatus::Active)];
        let months = fiscal_year_months(2025).unwrap();

        let sales = monthly_sales(&projects, &months, &ProbabilityWeights::default(), CalcMode::Revenue);

        assert_eq!(sales.len(), 12);
        let march = sales.iter().find(|s| s.month == month("2026-03")).unwrap();
        assert_eq!(march.confirmed, 25_000_000);
        assert_eq!(march.total, 25_000_000);
        assert_eq!(sales.iter().map(|s| s.confirmed).sum::<u64>(), 25_000_000);
    }

    #[test]
    fn lead_is_weighted_in_forecast() {
        let projects = [lead("l1", date(2025, 6, 1), date(2025, 9, 30), 40_000_000, Some(75))];
        let months = [month("2025-09")];

        let sales = monthly_sales(&projects, &months, &ProbabilityWeights::default(), CalcMode::Revenue);

        assert_eq!(sales[0].forecast, 28_000_000);
        assert_eq!(sales[0].forecast_raw, 40_000_000);
        assert_eq!(sales[0].confirmed, 0);
        assert_eq!(sales[0].total, 28_000_000);
    }

    #[test]
    fn lead_without_probability_uses_uncertain_weight() {
        let projects = [lead("l2", date(2025, 6, 1), date(2025, 9, 30), 1_000_000, None)];
        let sales = monthly_sales(
            &projects,
            &[month("2025-09")],
            &ProbabilityWeights::default(),
            CalcMode::Revenue,
        );
        assert_eq!(sales[0].forecast, 100_000);
    }

    #[test]
    fn on_hold_contributes_nothing() {
        let projects =
            [contract("h1", date(2025, 5, 1), date(2025, 7, 31), 9_000_000, ContractStatus::OnHold)];
        let sales = monthly_sales(
            &projects,
            &[month("2025-07")],
            &ProbabilityWeights::default(),
            CalcMode::Revenue,
        );
        assert_eq!(sales[0], MonthlySales::empty(month("2025-07")));
    }

    #[test]
    fn completed_counts_as_confirmed_with_actual_revenue() {
        let mut project =
            contract("c1", date(2025, 4, 1), date(2025, 5, 31), 10, ContractStatus::Completed);
        if let Project::Contract(contract) = &mut project {
            contract.actual_revenue = Some(12);
        }
        let sales = monthly_sales(
            &[project],
            &[month("2025-04")],
            &ProbabilityWeights::default(),
            CalcMode::Order,
        );
        assert_eq!(sales[0].confirmed, 12);
    }

    #[test]
    fn output_follows_input_month_order() {
        let months = [month("2026-02"), month("2025-04"), month("2025-12")];
        let sales = monthly_sales(&[], &months, &ProbabilityWeights::default(), CalcMode::Revenue);
        let order: Vec<MonthKey> = sales.iter().map(|s| s.month).collect();
        assert_eq!(order, months);
    }

    #[test]
    fn empty_inputs_produce_zero_buckets() {
        let months = fiscal_year_months(2025).unwrap();
        let sales = monthly_sales(&[], &months, &ProbabilityWeights::default(), CalcMode::Order);
        assert!(sales.iter().zip(&months).all(|(s, m)| *s == MonthlySales::empty(*m)));

        assert!(monthly_sales(&[], &[], &ProbabilityWeights::default(), CalcMode::Order).is_empty());
        assert!(cumulative_sales(&[]).is_empty());
    }

    #[test]
    fn cumulative_is_prefix_sum() {
        let months = [month("2025-04"), month("2025-05"), month("2025-06")];
        let monthly: Vec<MonthlySales> = months
            .iter()
            .zip([(10, 5), (0, 0), (7, 3)])
            .map(|(m, (confirmed, forecast))| MonthlySales {
                month: *m,
                confirmed,
                forecast,
                forecast_raw: forecast * 2,
                total: confirmed + forecast,
            })
            .collect();

        let cumulative = cumulative_sales(&monthly);
        let totals: Vec<u64> = cumulative.iter().map(|c| c.cumulative_total).collect();
        assert_eq!(totals, [15, 15, 25]);
        assert_eq!(cumulative[2].cumulative_confirmed, 17);
        assert_eq!(cumulative[2].cumulative_forecast, 8);
        assert_eq!(cumulative[1].sales, monthly[1]);
    }

    #[test]
    fn summary_totals_match_last_bucket() {
        let projects = [
            contract("p1", date(2025, 11, 1), date(2026, 3, 31), 25_000_000, ContractStatus::Active),
            lead("l1", date(2025, 6, 1), date(2025, 9, 30), 40_000_000, Some(75)),
            // Outside the fiscal year
            contract("p2", date(2024, 4, 1), date(2025, 3, 31), 99, ContractStatus::Completed),
        ];

        let summary =
            fiscal_year_summary(&projects, 2025, &ProbabilityWeights::default(), CalcMode::Revenue)
                .unwrap();

        assert_eq!(summary.fiscal_year, 2025);
        assert_eq!(summary.months.len(), 12);
        assert_eq!(summary.total_confirmed, 25_000_000);
        assert_eq!(summary.total_forecast, 28_000_000);
        assert_eq!(summary.total_combined, 53_000_000);
        assert_eq!(summary.months.last().unwrap().cumulative_total, summary.total_combined);
    }

    #[test]
    fn current_fiscal_year_reads_clock() {
        assert_eq!(current_fiscal_year(&FixedClock::at_date(date(2026, 3, 31))), 2025);
        assert_eq!(current_fiscal_year(&FixedClock::at_date(date(2026, 4, 1))), 2026);
    }
}
