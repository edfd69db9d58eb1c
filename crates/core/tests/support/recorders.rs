//! Recorder and provider doubles.

use async_trait::async_trait;
use parking_lot::Mutex;
use resplan_core::{AdviceProvider, HistoryRecorder};
use resplan_domain::{HistoryEntry, HistoryFilter, ResplanError, Result};

/// History recorder whose writes always fail.
#[derive(Debug, Default)]
pub struct FailingHistory;

impl HistoryRecorder for FailingHistory {
    fn record(&self, _entry: HistoryEntry) -> Result<()> {
        Err(ResplanError::Persistence("disk full".into()))
    }

    fn entries(&self, _filter: &HistoryFilter) -> Result<Vec<HistoryEntry>> {
        Ok(Vec::new())
    }
}

/// Advice provider that echoes a canned reply and keeps every prompt.
#[derive(Debug, Default)]
pub struct EchoAdvice {
    pub prompts: Mutex<Vec<String>>,
}

#[async_trait]
impl AdviceProvider for EchoAdvice {
    async fn advise(&self, prompt: &str) -> Result<String> {
        self.prompts.lock().push(prompt.to_string());
        Ok("Review the schedule risk weekly.".to_string())
    }
}
