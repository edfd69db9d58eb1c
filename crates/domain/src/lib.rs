//! # Resplan Domain
//!
//! Business domain types and models for Resplan.
//!
//! This crate contains:
//! - Entities (Project, Member, Allocation) and their wire formats
//! - Derived view types (monthly sales, utilization matrix, history)
//! - Domain error types and Result definitions
//! - Configuration structures
//! - Domain constants and calendar/money helpers
//!
//! ## Architecture
//! - No dependencies on other Resplan crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;
pub mod utils;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
pub use utils::calendar::{fiscal_year_months, fiscal_year_of, month_key, month_range};
