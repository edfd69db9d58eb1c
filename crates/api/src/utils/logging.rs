use std::time::Duration;

use resplan_domain::ResplanError;
use tracing::{info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Filter directive variable, e.g. `RESPLAN_LOG=resplan_core=debug`.
pub const LOG_FILTER_ENV: &str = "RESPLAN_LOG";
/// Set to `1`/`true` for JSON log lines.
pub const LOG_JSON_ENV: &str = "RESPLAN_LOG_JSON";

const DEFAULT_FILTER: &str = "info";

/// Install the global tracing subscriber.
///
/// Logs go to stderr so command output on stdout stays machine readable.
/// Calling this twice is harmless; the second call is ignored.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_FILTER_ENV)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let result = if json_logs_enabled() {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init()
    };

    if result.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}

fn json_logs_enabled() -> bool {
    std::env::var(LOG_JSON_ENV)
        .map(|value| matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Log the outcome of a command execution with structured fields.
///
/// `command` is a stable identifier such as `"forecast::sales_summary"`;
/// never pass user data through it.
#[inline]
pub fn log_command_execution(command: &str, elapsed: Duration, success: bool) {
    let duration_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);

    if success {
        info!(command, duration_ms, "command_execution_success");
    } else {
        warn!(command, duration_ms, "command_execution_failure");
    }
}

/// Convert a `ResplanError` into a stable label suitable for logging.
#[inline]
#[must_use]
pub const fn error_label(error: &ResplanError) -> &'static str {
    match error {
        ResplanError::InvalidDate(_) => "invalid_date",
        ResplanError::InvalidInput(_) => "invalid_input",
        ResplanError::NotFound(_) => "not_found",
        ResplanError::Config(_) => "config",
        ResplanError::Persistence(_) => "persistence",
        ResplanError::Network(_) => "network",
        ResplanError::Auth(_) => "auth",
        ResplanError::Internal(_) => "internal",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_are_stable() {
        assert_eq!(error_label(&ResplanError::NotFound("p1".into())), "not_found");
        assert_eq!(error_label(&ResplanError::Persistence("disk".into())), "persistence");
        assert_eq!(error_label(&ResplanError::InvalidDate("2025-13".into())), "invalid_date");
    }

    #[test]
    fn init_twice_does_not_panic() {
        init_tracing();
        init_tracing();
    }
}
