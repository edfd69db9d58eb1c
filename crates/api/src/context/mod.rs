//! Application context - dependency injection container

use std::sync::Arc;

use parking_lot::RwLock;
use resplan_core::{
    AdviceProvider, AdviceService, Clock, HistoryRecorder, InMemoryHistory, PlanSnapshot,
    PlanningStore, SnapshotStore, SystemClock,
};
use resplan_domain::{Config, Result};
use resplan_infra::{HttpClient, JsonSnapshotStore, JsonlHistoryLog, LlmAdviceClient};
use tracing::{info, warn};

/// Application context - holds the plan and the adapters around it
pub struct AppContext {
    pub config: Config,
    pub store: RwLock<PlanningStore>,
    pub snapshots: Arc<dyn SnapshotStore>,
    pub history: Arc<dyn HistoryRecorder>,
    pub clock: Arc<dyn Clock>,
    pub advice: Option<AdviceService>,
}

impl AppContext {
    /// Create a context from configuration found in the environment or on
    /// disk.
    ///
    /// # Errors
    /// Returns `ResplanError::Config` when no usable configuration is found,
    /// or any error raised while loading the saved plan.
    pub fn new() -> Result<Self> {
        let config = resplan_infra::config::load()?;
        Self::new_with_config(config)
    }

    /// Wire file-backed adapters for `config`
    ///
    /// # Errors
    /// Propagates snapshot load failures and advice client setup errors.
    pub fn new_with_config(config: Config) -> Result<Self> {
        let snapshots: Arc<dyn SnapshotStore> =
            Arc::new(JsonSnapshotStore::new(config.storage.snapshot_path.clone()));

        let history: Arc<dyn HistoryRecorder> = match &config.storage.history_path {
            Some(path) => Arc::new(JsonlHistoryLog::new(path.clone())),
            None => {
                info!("no history path configured; history is kept in memory");
                Arc::new(InMemoryHistory::new())
            }
        };

        let advice: Option<Arc<dyn AdviceProvider>> = match &config.advice {
            Some(advice_config) => {
                let client = LlmAdviceClient::new(advice_config, HttpClient::new()?)?;
                info!(provider = %advice_config.provider, "advice provider configured");
                Some(Arc::new(client))
            }
            None => None,
        };

        Self::with_parts(config, snapshots, history, Arc::new(SystemClock), advice)
    }

    /// Assemble a context from explicit adapters.
    ///
    /// The saved plan is loaded from `snapshots`; a fresh plan starts with
    /// the configured weights.
    ///
    /// # Errors
    /// Propagates snapshot load and validation failures.
    pub fn with_parts(
        config: Config,
        snapshots: Arc<dyn SnapshotStore>,
        history: Arc<dyn HistoryRecorder>,
        clock: Arc<dyn Clock>,
        advice: Option<Arc<dyn AdviceProvider>>,
    ) -> Result<Self> {
        let snapshot = match snapshots.load()? {
            Some(snapshot) => snapshot,
            None => {
                info!("starting with an empty plan");
                PlanSnapshot { weights: config.planning.weights, ..PlanSnapshot::default() }
            }
        };

        let store =
            PlanningStore::from_snapshot(snapshot, Arc::clone(&history), Arc::clone(&clock))?
                .with_actor(config.planning.actor.clone());

        Ok(Self {
            config,
            store: RwLock::new(store),
            snapshots,
            history,
            clock,
            advice: advice.map(AdviceService::new),
        })
    }

    /// Persist the current plan, then record the history of the changes
    /// it contains.
    ///
    /// History stays queued when the snapshot cannot be written and goes out
    /// with the next successful save.
    ///
    /// # Errors
    /// Propagates the snapshot store's write error.
    pub fn save(&self) -> Result<()> {
        let store = self.store.write();
        self.snapshots.save(&store.snapshot()).inspect_err(|error| {
            warn!(%error, queued = store.pending_history().len(), "failed to save plan snapshot");
        })?;
        store.flush_history();
        Ok(())
    }
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("config", &self.config)
            .field("store", &*self.store.read())
            .field("advice", &self.advice.is_some())
            .finish_non_exhaustive()
    }
}
