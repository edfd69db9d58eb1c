//! Allocation aggregation engine

pub mod conversion;
pub mod utilization;

pub use conversion::{convert_lead_allocations, ConversionOutcome};
pub use utilization::{member_matrix, utilization_by_member_month};
