//! Project advice command

use resplan_core::new_record_id;
use resplan_domain::{AiAdvice, ResplanError, Result};
use tracing::info;

use crate::context::AppContext;
use crate::utils::command_helpers::execute_logged_async;

/// Ask the configured language model for advice on one project
///
/// With `save` the reply is also kept on the project and the plan is saved.
///
/// # Errors
/// `Config` when no advice provider is configured, `NotFound` for an
/// unknown project, the provider's error, or persistence errors from saving.
pub async fn project_advice(ctx: &AppContext, project_id: &str, save: bool) -> Result<String> {
    execute_logged_async("advice::project_advice", || async {
        let service = ctx
            .advice
            .as_ref()
            .ok_or_else(|| ResplanError::Config("advice is not configured".into()))?;

        // Clone so the lock is not held across the request.
        let project = ctx
            .store
            .read()
            .project(project_id)
            .cloned()
            .ok_or_else(|| ResplanError::NotFound(format!("project {project_id}")))?;

        let content = service.advise(&project).await?;
        if save {
            let advice = AiAdvice {
                id: new_record_id("ai-advice"),
                content: content.clone(),
                generated_at: ctx.clock.now(),
                provider: ctx
                    .config
                    .advice
                    .as_ref()
                    .map_or_else(|| "unknown".to_string(), |advice| advice.provider.to_string()),
            };
            let advice_id = advice.id.clone();
            ctx.store.write().add_advice(project_id, advice)?;
            ctx.save()?;
            info!(project_id, advice_id = %advice_id, "advice saved to project");
        }
        Ok(content)
    })
    .await
}
