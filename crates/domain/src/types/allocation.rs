//! Allocation types
//!
//! An allocation commits a share of one member's monthly capacity to one
//! project. Its kind tells committed delivery work apart from tentative
//! capacity held against a lead and from bid-support effort.

use serde::{Deserialize, Serialize};
#[cfg(feature = "ts-gen")]
use ts_rs::TS;

use super::month::MonthKey;
use crate::impl_domain_status_conversions;

/// What an allocation represents.
///
/// On the wire this is the `isProspect` / `isPreSales` flag pair;
/// `isPreSales` wins when both are set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
#[serde(rename_all = "snake_case")]
pub enum AllocationKind {
    #[default]
    Committed,
    Prospective,
    PreSales,
}

impl_domain_status_conversions!(AllocationKind {
    Committed => "committed",
    Prospective => "prospective",
    PreSales => "pre_sales",
});

impl AllocationKind {
    /// Decode the legacy flag pair.
    #[must_use]
    pub const fn from_flags(is_prospect: bool, is_pre_sales: bool) -> Self {
        if is_pre_sales {
            Self::PreSales
        } else if is_prospect {
            Self::Prospective
        } else {
            Self::Committed
        }
    }
}

/// One member's share of capacity on one project for one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "AllocationRecord", into = "AllocationRecord")]
pub struct Allocation {
    pub id: String,
    pub member_id: String,
    pub project_id: String,
    /// Free text; may differ from the member's primary role.
    pub role: String,
    pub month: MonthKey,
    /// Percent of monthly capacity. Values above 100 are kept as-is.
    pub percentage: u32,
    pub kind: AllocationKind,
}

impl Allocation {
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        member_id: impl Into<String>,
        project_id: impl Into<String>,
        role: impl Into<String>,
        month: MonthKey,
        percentage: u32,
    ) -> Self {
        Self {
            id: id.into(),
            member_id: member_id.into(),
            project_id: project_id.into(),
            role: role.into(),
            month,
            percentage,
            kind: AllocationKind::Committed,
        }
    }

    #[must_use]
    pub const fn with_kind(mut self, kind: AllocationKind) -> Self {
        self.kind = kind;
        self
    }

    #[must_use]
    pub const fn is_prospect(&self) -> bool {
        matches!(self.kind, AllocationKind::Prospective)
    }

    #[must_use]
    pub const fn is_pre_sales(&self) -> bool {
        matches!(self.kind, AllocationKind::PreSales)
    }
}

/// Flat wire shape of an allocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationRecord {
    pub id: String,
    pub member_id: String,
    pub project_id: String,
    #[serde(default)]
    pub role: String,
    pub month: MonthKey,
    pub percentage: u32,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_prospect: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_pre_sales: bool,
}

impl From<AllocationRecord> for Allocation {
    fn from(record: AllocationRecord) -> Self {
        Self {
            kind: AllocationKind::from_flags(record.is_prospect, record.is_pre_sales),
            id: record.id,
            member_id: record.member_id,
            project_id: record.project_id,
            role: record.role,
            month: record.month,
            percentage: record.percentage,
        }
    }
}

impl From<Allocation> for AllocationRecord {
    fn from(allocation: Allocation) -> Self {
        Self {
            is_prospect: allocation.is_prospect(),
            is_pre_sales: allocation.is_pre_sales(),
            id: allocation.id,
            member_id: allocation.member_id,
            project_id: allocation.project_id,
            role: allocation.role,
            month: allocation.month,
            percentage: allocation.percentage,
        }
    }
}
