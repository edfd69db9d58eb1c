//! Command functions invoked by the CLI
//!
//! Every command times itself and logs its outcome; mutating commands save
//! the plan before returning.

pub mod advice;
pub mod forecast;
pub mod projects;
pub mod resources;
pub mod settings;

pub use advice::project_advice;
pub use forecast::{pipeline_stats, sales_summary};
pub use projects::{
    add_project, convert_lead, delete_project, get_project, list_projects, update_project,
    ConversionReport,
};
pub use resources::{
    add_allocation, add_member, delete_allocation, delete_member, member_utilization,
    resource_matrix, resource_matrix_for, update_allocation, update_member, ResourceMatrix,
};
pub use settings::{get_weights, history, reset_weights, set_weights};
