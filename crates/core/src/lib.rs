//! # Resplan Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - Forecasting and allocation engines (pure functions)
//! - The planning store and its derived views
//! - Port interfaces (traits) for persistence, history and advice
//!
//! ## Architecture Principles
//! - Only depends on `resplan-domain`
//! - No filesystem, HTTP, or platform code
//! - All external dependencies via traits
//! - "Now" comes from an injected [`clock::Clock`]

pub mod advice;
pub mod allocation;
pub mod clock;
pub mod forecast;
pub mod history;
pub mod planning;

pub use advice::{build_advice_prompt, AdviceProvider, AdviceService};
pub use allocation::{
    convert_lead_allocations, member_matrix, utilization_by_member_month, ConversionOutcome,
};
pub use clock::{Clock, FixedClock, SystemClock};
pub use forecast::{
    cumulative_sales, current_fiscal_year, fiscal_year_summary, monthly_sales, pipeline_stats,
    weighted_value,
};
pub use history::{calculate_diff, HistoryRecorder, InMemoryHistory};
pub use planning::{new_record_id, PlanSnapshot, PlanningStore, SnapshotStore};
