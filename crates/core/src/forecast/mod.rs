//! Sales forecasting engine
//!
//! Pure functions over caller-owned project collections. Nothing here holds
//! state or performs I/O.

pub mod pipeline;
pub mod sales;
pub mod weighting;

pub use pipeline::pipeline_stats;
pub use sales::{
    cumulative_sales, current_fiscal_year, fiscal_year_summary, monthly_sales, recognition_month,
};
pub use weighting::{bracket_of, expected_value, weighted_value};
