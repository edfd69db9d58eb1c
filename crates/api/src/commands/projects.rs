//! Project management commands

use resplan_domain::{Project, ProjectStatus, ResplanError, Result};
use serde::Serialize;
use tracing::info;

use crate::context::AppContext;
use crate::utils::command_helpers::execute_logged;

/// What a lead conversion changed.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionReport {
    pub project: Project,
    /// Pre-sales allocations that were deleted
    pub removed_allocations: Vec<String>,
    /// Prospect allocations that became committed
    pub promoted_allocations: Vec<String>,
}

/// Projects, optionally restricted to one status
///
/// # Errors
/// Never fails today; the signature matches the other commands.
pub fn list_projects(ctx: &AppContext, status: Option<ProjectStatus>) -> Result<Vec<Project>> {
    execute_logged("projects::list_projects", || {
        let store = ctx.store.read();
        Ok(store
            .projects()
            .iter()
            .filter(|project| status.map_or(true, |wanted| project.status() == wanted))
            .cloned()
            .collect())
    })
}

/// # Errors
/// `NotFound` for an unknown id.
pub fn get_project(ctx: &AppContext, project_id: &str) -> Result<Project> {
    execute_logged("projects::get_project", || {
        ctx.store
            .read()
            .project(project_id)
            .cloned()
            .ok_or_else(|| ResplanError::NotFound(format!("project {project_id}")))
    })
}

/// # Errors
/// `InvalidInput` for a duplicate id; persistence errors from saving.
pub fn add_project(ctx: &AppContext, project: Project) -> Result<()> {
    execute_logged("projects::add_project", || {
        ctx.store.write().add_project(project)?;
        ctx.save()
    })
}

/// Replace a project's fields; the lead/contract kind cannot change here.
///
/// # Errors
/// `NotFound` for an unknown id, `InvalidInput` for a kind change.
pub fn update_project(ctx: &AppContext, project: Project) -> Result<()> {
    execute_logged("projects::update_project", || {
        ctx.store.write().update_project(project)?;
        ctx.save()
    })
}

/// Delete a project together with its allocations
///
/// # Errors
/// `NotFound` for an unknown id; persistence errors from saving.
pub fn delete_project(ctx: &AppContext, project_id: &str) -> Result<Project> {
    execute_logged("projects::delete_project", || {
        let project = ctx.store.write().delete_project(project_id)?;
        ctx.save()?;
        Ok(project)
    })
}

/// Convert a won lead into an active project
///
/// # Errors
/// `NotFound` for an unknown id, `InvalidInput` if the project is not a
/// lead, or persistence errors from saving.
pub fn convert_lead(
    ctx: &AppContext,
    project_id: &str,
    actual_revenue: Option<u64>,
) -> Result<ConversionReport> {
    execute_logged("projects::convert_lead", || {
        let report = {
            let mut store = ctx.store.write();
            let outcome = store.convert_lead(project_id, actual_revenue)?;
            let project = store
                .project(project_id)
                .cloned()
                .ok_or_else(|| ResplanError::Internal(format!("project {project_id} vanished")))?;
            ConversionReport {
                project,
                removed_allocations: outcome.removed.into_iter().map(|a| a.id).collect(),
                promoted_allocations: outcome.promoted,
            }
        };
        ctx.save()?;

        info!(
            project_id,
            removed = report.removed_allocations.len(),
            promoted = report.promoted_allocations.len(),
            "lead conversion saved"
        );
        Ok(report)
    })
}
