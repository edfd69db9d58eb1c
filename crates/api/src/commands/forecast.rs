//! Sales forecast and pipeline commands

use resplan_domain::{CalcMode, FiscalYearSummary, PipelineStats, Result};
use tracing::info;

use crate::context::AppContext;
use crate::utils::command_helpers::execute_logged;

/// Cumulative sales for a fiscal year
///
/// Defaults to the current fiscal year and the configured calculation mode.
///
/// # Errors
/// `InvalidDate` for a fiscal year outside the calendar range.
pub fn sales_summary(
    ctx: &AppContext,
    fiscal_year: Option<i32>,
    mode: Option<CalcMode>,
) -> Result<FiscalYearSummary> {
    execute_logged("forecast::sales_summary", || {
        let store = ctx.store.read();
        let fiscal_year = fiscal_year.unwrap_or_else(|| store.current_fiscal_year());
        let mode = mode.unwrap_or(ctx.config.planning.default_mode);

        info!(fiscal_year, %mode, "computing sales summary");
        store.sales_summary(fiscal_year, mode)
    })
}

/// Dashboard headline numbers
///
/// # Errors
/// Never fails today; the signature matches the other commands.
pub fn pipeline_stats(ctx: &AppContext) -> Result<PipelineStats> {
    execute_logged("forecast::pipeline_stats", || Ok(ctx.store.read().pipeline_stats()))
}
