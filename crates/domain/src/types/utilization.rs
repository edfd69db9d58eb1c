//! Utilization types for the resource matrix

use serde::{Deserialize, Serialize};
#[cfg(feature = "ts-gen")]
use ts_rs::TS;

use super::member::Member;
use super::month::MonthKey;
use crate::constants::{UTILIZATION_HIGH_MAX, UTILIZATION_LOW_MAX, UTILIZATION_MEDIUM_MAX};
use crate::impl_domain_status_conversions;

/// Display band for a member's monthly utilization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
#[serde(rename_all = "lowercase")]
pub enum UtilizationBand {
    Empty,
    Low,
    Medium,
    High,
    Over,
}

impl_domain_status_conversions!(UtilizationBand {
    Empty => "empty",
    Low => "low",
    Medium => "medium",
    High => "high",
    Over => "over",
});

impl UtilizationBand {
    /// 0 empty, 1-49 low, 50-80 medium, 81-100 high, above 100 over.
    #[must_use]
    pub const fn from_percentage(percentage: u32) -> Self {
        if percentage == 0 {
            Self::Empty
        } else if percentage <= UTILIZATION_LOW_MAX {
            Self::Low
        } else if percentage <= UTILIZATION_MEDIUM_MAX {
            Self::Medium
        } else if percentage <= UTILIZATION_HIGH_MAX {
            Self::High
        } else {
            Self::Over
        }
    }

    #[must_use]
    pub const fn is_over_allocated(self) -> bool {
        matches!(self, Self::Over)
    }
}

/// One allocation as it appears in a matrix cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct ProjectBreakdown {
    pub project_id: String,
    pub project_name: String,
    pub role: String,
    pub percentage: u32,
    pub is_prospect: bool,
    pub is_pre_sales: bool,
}

/// A member's load in one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct MonthlyUtilization {
    #[cfg_attr(feature = "ts-gen", ts(type = "string"))]
    pub month: MonthKey,
    pub total_percentage: u32,
    pub band: UtilizationBand,
    pub project_breakdown: Vec<ProjectBreakdown>,
}

/// One row of the resource matrix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct MemberUtilization {
    pub member: Member,
    pub monthly: Vec<MonthlyUtilization>,
}
