//! Command execution helpers
//!
//! Time a command, log the outcome, and hand the result back unchanged.

use std::future::Future;
use std::time::Instant;

use resplan_core::new_record_id;
use resplan_domain::{ResplanError, Result as DomainResult};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::utils::logging::{error_label, log_command_execution};

/// Run a synchronous command with timing and outcome logging
pub fn execute_logged<T>(
    command_name: &str,
    command_fn: impl FnOnce() -> DomainResult<T>,
) -> DomainResult<T> {
    let start = Instant::now();
    let result = command_fn();
    finish(command_name, start, &result);
    result
}

/// Async counterpart of [`execute_logged`]
pub async fn execute_logged_async<F, Fut, T>(command_name: &str, command_fn: F) -> DomainResult<T>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = DomainResult<T>>,
{
    let start = Instant::now();
    let result = command_fn().await;
    finish(command_name, start, &result);
    result
}

/// Decode a JSON record, giving it a fresh `{prefix}-...` id when the
/// `id` field is missing or blank.
///
/// # Errors
/// `InvalidInput` when `raw` is not a JSON object or does not decode as `T`.
pub fn parse_record<T: DeserializeOwned>(raw: &str, prefix: &str) -> DomainResult<T> {
    let mut value: Value = serde_json::from_str(raw)
        .map_err(|e| ResplanError::InvalidInput(format!("invalid JSON record: {e}")))?;
    let Value::Object(fields) = &mut value else {
        return Err(ResplanError::InvalidInput("record must be a JSON object".into()));
    };

    let has_id = fields.get("id").and_then(Value::as_str).is_some_and(|id| !id.trim().is_empty());
    if !has_id {
        let id = new_record_id(prefix);
        debug!(%id, "assigned record id");
        fields.insert("id".to_string(), Value::String(id));
    }

    serde_json::from_value(value)
        .map_err(|e| ResplanError::InvalidInput(format!("invalid {prefix} record: {e}")))
}

fn finish<T>(command_name: &str, start: Instant, result: &DomainResult<T>) {
    log_command_execution(command_name, start.elapsed(), result.is_ok());
    if let Err(error) = result {
        debug!(command = command_name, error_type = error_label(error), %error, "command failed");
    }
}
