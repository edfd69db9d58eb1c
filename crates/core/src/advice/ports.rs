//! Port interfaces for project advice

use async_trait::async_trait;
use resplan_domain::Result;

/// Trait for turning an advice prompt into free-text advice
///
/// Implementations make one remote call and do not retry.
#[async_trait]
pub trait AdviceProvider: Send + Sync {
    /// Send `prompt` and return the advice text
    async fn advise(&self, prompt: &str) -> Result<String>;
}
