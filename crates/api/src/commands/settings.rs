//! Probability weights and audit history

use chrono::NaiveDate;
use resplan_domain::{HistoryEntry, HistoryFilter, ProbabilityWeights, Result};

use crate::context::AppContext;
use crate::utils::command_helpers::execute_logged;

/// # Errors
/// Never fails today; the signature matches the other commands.
pub fn get_weights(ctx: &AppContext) -> Result<ProbabilityWeights> {
    execute_logged("settings::get_weights", || Ok(*ctx.store.read().weights()))
}

/// # Errors
/// `InvalidInput` for a weight above 100; persistence errors from saving.
pub fn set_weights(ctx: &AppContext, weights: ProbabilityWeights) -> Result<ProbabilityWeights> {
    execute_logged("settings::set_weights", || {
        ctx.store.write().set_weights(weights)?;
        ctx.save()?;
        Ok(weights)
    })
}

/// Restore the default weights
///
/// # Errors
/// Persistence errors from saving.
pub fn reset_weights(ctx: &AppContext) -> Result<ProbabilityWeights> {
    execute_logged("settings::reset_weights", || {
        let weights = {
            let mut store = ctx.store.write();
            store.reset_weights();
            *store.weights()
        };
        ctx.save()?;
        Ok(weights)
    })
}

/// History entries within an inclusive day range, oldest first
///
/// # Errors
/// Propagates failures of the history recorder.
pub fn history(
    ctx: &AppContext,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Result<Vec<HistoryEntry>> {
    execute_logged("settings::history", || {
        ctx.store.read().history(&HistoryFilter::between(from, to))
    })
}
