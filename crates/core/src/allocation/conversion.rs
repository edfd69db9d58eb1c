//! Allocation rewrite when a lead is won
//!
//! Pre-sales effort against the lead is dropped, tentative capacity becomes
//! committed, committed allocations stay as they are.

use resplan_domain::{Allocation, AllocationKind};
use tracing::debug;

/// Result of rewriting allocations for a converted lead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionOutcome {
    /// The full allocation collection after the rewrite.
    pub allocations: Vec<Allocation>,
    /// Pre-sales allocations that were deleted.
    pub removed: Vec<Allocation>,
    /// Ids of allocations promoted from prospective to committed.
    pub promoted: Vec<String>,
}

/// Rewrite `allocations` for the conversion of `project_id`.
///
/// Allocations of other projects pass through untouched and in order.
#[must_use]
pub fn convert_lead_allocations(allocations: &[Allocation], project_id: &str) -> ConversionOutcome {
    let mut kept = Vec::with_capacity(allocations.len());
    let mut removed = Vec::new();
    let mut promoted = Vec::new();

    for allocation in allocations {
        if allocation.project_id != project_id {
            kept.push(allocation.clone());
            continue;
        }
        match allocation.kind {
            AllocationKind::PreSales => removed.push(allocation.clone()),
            AllocationKind::Prospective => {
                promoted.push(allocation.id.clone());
                kept.push(allocation.clone().with_kind(AllocationKind::Committed));
            }
            AllocationKind::Committed => kept.push(allocation.clone()),
        }
    }

    debug!(
        project_id,
        removed = removed.len(),
        promoted = promoted.len(),
        "lead allocations converted"
    );

    ConversionOutcome { allocations: kept, removed, promoted }
}
