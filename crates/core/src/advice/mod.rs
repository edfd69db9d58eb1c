//! Project advice from a language model

pub mod ports;
pub mod prompt;

use std::sync::Arc;
use std::time::Instant;

use resplan_domain::{Project, ResplanError, Result};
use tracing::{info, warn};

pub use ports::AdviceProvider;
pub use prompt::build_advice_prompt;

/// Advice service
pub struct AdviceService {
    provider: Arc<dyn AdviceProvider>,
}

impl AdviceService {
    pub fn new(provider: Arc<dyn AdviceProvider>) -> Self {
        Self { provider }
    }

    /// Ask for advice on `project`.
    ///
    /// # Errors
    /// Propagates the provider's error; an empty reply is `Internal`.
    pub async fn advise(&self, project: &Project) -> Result<String> {
        let prompt = build_advice_prompt(project);
        let started = Instant::now();

        let advice = match self.provider.advise(&prompt).await {
            Ok(advice) => advice,
            Err(error) => {
                warn!(project_id = %project.id(), %error, "advice request failed");
                return Err(error);
            }
        };

        if advice.trim().is_empty() {
            return Err(ResplanError::Internal("advice provider returned no text".into()));
        }

        info!(
            project_id = %project.id(),
            elapsed_ms = started.elapsed().as_millis(),
            chars = advice.chars().count(),
            "advice received"
        );
        Ok(advice)
    }
}

impl std::fmt::Debug for AdviceService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdviceService").finish_non_exhaustive()
    }
}
