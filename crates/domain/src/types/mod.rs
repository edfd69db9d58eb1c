//! Domain types and models
//!
//! Entities (projects, members, allocations), the month key used as the
//! only cross-component date format, and the derived views the forecasting
//! and allocation engines produce.

pub mod allocation;
pub mod history;
pub mod member;
pub mod month;
pub mod project;
pub mod sales;
pub mod utilization;
pub mod weights;

pub use allocation::{Allocation, AllocationKind, AllocationRecord};
pub use history::{Collection, FieldChange, HistoryAction, HistoryEntry, HistoryFilter};
pub use member::{Member, Role};
pub use month::MonthKey;
pub use project::{
    AiAdvice, ContractProject, ContractStatus, ConversationLog, LeadProject, Project,
    ProjectDetails, ProjectRecord, ProjectStatus,
};
pub use sales::{CalcMode, CumulativeSales, FiscalYearSummary, MonthlySales, PipelineStats};
pub use utilization::{MemberUtilization, MonthlyUtilization, ProjectBreakdown, UtilizationBand};
pub use weights::{Probability, ProbabilityBracket, ProbabilityWeights};
