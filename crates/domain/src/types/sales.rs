//! Sales forecast types
//!
//! All amounts are whole currency units. Forecast values are already
//! weighted; `forecast_raw` keeps the unweighted lead value alongside.

use serde::{Deserialize, Serialize};
#[cfg(feature = "ts-gen")]
use ts_rs::TS;

use super::month::MonthKey;
use crate::impl_domain_status_conversions;

/// Which project date decides the month a value is recognised in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
#[serde(rename_all = "lowercase")]
pub enum CalcMode {
    /// End month (revenue recognition).
    #[default]
    Revenue,
    /// Start month (order booking).
    Order,
}

impl_domain_status_conversions!(CalcMode {
    Revenue => "revenue",
    Order => "order",
});

/* -------------------------------------------------------------------------- */
/* Monthly Buckets */
/* -------------------------------------------------------------------------- */

/// Sales attributed to one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct MonthlySales {
    #[cfg_attr(feature = "ts-gen", ts(type = "string"))]
    pub month: MonthKey,

    /// Value of active and completed projects
    #[cfg_attr(feature = "ts-gen", ts(type = "number"))]
    pub confirmed: u64,

    /// Probability-weighted value of leads
    #[cfg_attr(feature = "ts-gen", ts(type = "number"))]
    pub forecast: u64,

    /// Unweighted value of leads
    #[cfg_attr(feature = "ts-gen", ts(type = "number"))]
    pub forecast_raw: u64,

    /// `confirmed + forecast`
    #[cfg_attr(feature = "ts-gen", ts(type = "number"))]
    pub total: u64,
}

impl MonthlySales {
    /// A bucket with nothing in it.
    #[must_use]
    pub const fn empty(month: MonthKey) -> Self {
        Self { month, confirmed: 0, forecast: 0, forecast_raw: 0, total: 0 }
    }
}

/// A monthly bucket plus running totals up to and including it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct CumulativeSales {
    #[serde(flatten)]
    pub sales: MonthlySales,

    #[cfg_attr(feature = "ts-gen", ts(type = "number"))]
    pub cumulative_confirmed: u64,

    #[cfg_attr(feature = "ts-gen", ts(type = "number"))]
    pub cumulative_forecast: u64,

    #[cfg_attr(feature = "ts-gen", ts(type = "number"))]
    pub cumulative_total: u64,
}

/* -------------------------------------------------------------------------- */
/* Fiscal Year Summary */
/* -------------------------------------------------------------------------- */

/// Twelve cumulative buckets for a fiscal year and their final totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct FiscalYearSummary {
    pub fiscal_year: i32,
    pub mode: CalcMode,
    pub months: Vec<CumulativeSales>,

    #[cfg_attr(feature = "ts-gen", ts(type = "number"))]
    pub total_confirmed: u64,

    #[cfg_attr(feature = "ts-gen", ts(type = "number"))]
    pub total_forecast: u64,

    #[cfg_attr(feature = "ts-gen", ts(type = "number"))]
    pub total_combined: u64,
}

/* -------------------------------------------------------------------------- */
/* Pipeline Statistics */
/* -------------------------------------------------------------------------- */

/// Headline numbers for the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct PipelineStats {
    pub lead_count: usize,

    /// Unweighted sum of lead budgets
    #[cfg_attr(feature = "ts-gen", ts(type = "number"))]
    pub total_lead_value: u64,

    /// Sum of lead budgets weighted by bracket
    #[cfg_attr(feature = "ts-gen", ts(type = "number"))]
    pub weighted_pipeline: u64,

    /// Sum of lead budgets times their raw probability
    #[cfg_attr(feature = "ts-gen", ts(type = "number"))]
    pub expected_pipeline: u64,

    pub active_count: usize,

    /// Recognised value of active projects
    #[cfg_attr(feature = "ts-gen", ts(type = "number"))]
    pub active_revenue: u64,

    pub member_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cumulative_flattens_monthly_fields() {
        let month = MonthKey::new(2025, 4).unwrap();
        let row = CumulativeSales {
            sales: MonthlySales { month, confirmed: 10, forecast: 5, forecast_raw: 8, total: 15 },
            cumulative_confirmed: 10,
            cumulative_forecast: 5,
            cumulative_total: 15,
        };

        let value = serde_json::to_value(&row).unwrap();
        assert_eq!(value["month"], "2025-04");
        assert_eq!(value["forecastRaw"], 8);
        assert_eq!(value["cumulativeTotal"], 15);
    }

    #[test]
    fn calc_mode_defaults_to_revenue() {
        assert_eq!(CalcMode::default(), CalcMode::Revenue);
        assert_eq!("ORDER".parse::<CalcMode>().unwrap(), CalcMode::Order);
        assert_eq!(serde_json::to_string(&CalcMode::Order).unwrap(), "\"order\"");
    }
}
