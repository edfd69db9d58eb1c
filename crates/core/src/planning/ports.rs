//! Port interfaces for plan persistence

use resplan_domain::{Allocation, Member, ProbabilityWeights, Project, Result};
use serde::{Deserialize, Serialize};

/// Everything the planning store owns, as persisted between runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanSnapshot {
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub members: Vec<Member>,
    #[serde(default)]
    pub allocations: Vec<Allocation>,
    #[serde(default)]
    pub weights: ProbabilityWeights,
}

/// Loads and saves the whole plan at once
///
/// Called at startup and shutdown only; the store itself never touches I/O.
pub trait SnapshotStore: Send + Sync {
    /// Load the last saved plan, or `None` if nothing has been saved yet
    fn load(&self) -> Result<Option<PlanSnapshot>>;

    /// Replace the saved plan
    fn save(&self, snapshot: &PlanSnapshot) -> Result<()>;
}
