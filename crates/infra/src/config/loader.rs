//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If incomplete, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `RESPLAN_SNAPSHOT_PATH`: Plan snapshot file (required)
//! - `RESPLAN_HISTORY_PATH`: JSON-lines history log
//! - `RESPLAN_WEIGHT_HIGH`, `RESPLAN_WEIGHT_MEDIUM`, `RESPLAN_WEIGHT_LOW`,
//!   `RESPLAN_WEIGHT_UNCERTAIN`: Bracket weights in percent
//! - `RESPLAN_DEFAULT_MODE`: `revenue` or `order`
//! - `RESPLAN_MATRIX_MONTHS_BEFORE`, `RESPLAN_MATRIX_MONTHS_AFTER`: Resource
//!   matrix window
//! - `RESPLAN_ACTOR`: Name recorded on history entries
//! - `RESPLAN_ADVICE_ENABLED`: Set to false to ignore advice settings
//! - `RESPLAN_ADVICE_PROVIDER`: `openai` (default) or `azure`
//! - `RESPLAN_ADVICE_API_KEY`: Enables advice when set
//! - `RESPLAN_ADVICE_ENDPOINT`, `RESPLAN_ADVICE_MODEL`,
//!   `RESPLAN_AZURE_DEPLOYMENT`, `RESPLAN_AZURE_API_VERSION`
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./config.json` or `./config.toml` (current working directory)
//! 2. `./resplan.json` or `./resplan.toml` (current working directory)
//! 3. `../config.json` or `../config.toml` (parent directory)
//! 4. `../../config.json` or `../../config.toml` (grandparent directory)
//! 5. Relative to executable location

use std::path::{Path, PathBuf};
use std::str::FromStr;

use resplan_domain::{
    AdviceConfig, AdviceProviderKind, CalcMode, Config, PlanningConfig, ProbabilityBracket,
    ResplanError, Result, StorageConfig,
};

/// Load configuration with automatic fallback strategy
///
/// Environment variables win when `RESPLAN_SNAPSHOT_PATH` is set; any
/// invalid value is then reported as is. Without it, falls back to loading
/// from a config file.
///
/// # Errors
/// Returns `ResplanError::Config` if:
/// - Configuration cannot be loaded from either source
/// - File format is invalid
/// - Required fields are missing
pub fn load() -> Result<Config> {
    if env_opt("RESPLAN_SNAPSHOT_PATH").is_none() {
        tracing::debug!("RESPLAN_SNAPSHOT_PATH not set, trying file");
        return load_from_file(None);
    }

    let config = load_from_env()?;
    tracing::info!("Configuration loaded from environment variables");
    Ok(config)
}

/// Load configuration from environment variables
///
/// Only `RESPLAN_SNAPSHOT_PATH` is required; everything else falls back to
/// the defaults in [`PlanningConfig`].
///
/// # Errors
/// Returns `ResplanError::Config` if required variables are missing
/// or have invalid values.
pub fn load_from_env() -> Result<Config> {
    let snapshot_path = PathBuf::from(env_var("RESPLAN_SNAPSHOT_PATH")?);
    let history_path = env_opt("RESPLAN_HISTORY_PATH").map(PathBuf::from);

    let mut planning = PlanningConfig::default();
    for (key, bracket) in [
        ("RESPLAN_WEIGHT_HIGH", ProbabilityBracket::High),
        ("RESPLAN_WEIGHT_MEDIUM", ProbabilityBracket::Medium),
        ("RESPLAN_WEIGHT_LOW", ProbabilityBracket::Low),
        ("RESPLAN_WEIGHT_UNCERTAIN", ProbabilityBracket::Uncertain),
    ] {
        if let Some(weight) = env_parse::<u8>(key)? {
            planning.weights = planning.weights.with(bracket, Some(weight));
        }
    }
    if let Some(mode) = env_parse::<CalcMode>("RESPLAN_DEFAULT_MODE")? {
        planning.default_mode = mode;
    }
    if let Some(before) = env_parse::<u32>("RESPLAN_MATRIX_MONTHS_BEFORE")? {
        planning.matrix_months_before = before;
    }
    if let Some(after) = env_parse::<u32>("RESPLAN_MATRIX_MONTHS_AFTER")? {
        planning.matrix_months_after = after;
    }
    if let Some(actor) = env_opt("RESPLAN_ACTOR") {
        planning.actor = actor;
    }

    let config = Config {
        planning,
        storage: StorageConfig { snapshot_path, history_path },
        advice: advice_from_env()?,
    };
    config.validate()?;
    Ok(config)
}

fn advice_from_env() -> Result<Option<AdviceConfig>> {
    if !env_bool("RESPLAN_ADVICE_ENABLED", true) {
        return Ok(None);
    }
    let Some(api_key) = env_opt("RESPLAN_ADVICE_API_KEY") else {
        return Ok(None);
    };

    Ok(Some(AdviceConfig {
        provider: env_parse::<AdviceProviderKind>("RESPLAN_ADVICE_PROVIDER")?
            .unwrap_or(AdviceProviderKind::OpenAi),
        api_key,
        endpoint: env_opt("RESPLAN_ADVICE_ENDPOINT"),
        model: env_opt("RESPLAN_ADVICE_MODEL"),
        azure_deployment: env_opt("RESPLAN_AZURE_DEPLOYMENT"),
        azure_api_version: env_opt("RESPLAN_AZURE_API_VERSION"),
    }))
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Arguments
/// * `path` - Optional path to config file. If `None`, uses
///   [`probe_config_paths`].
///
/// # Errors
/// Returns `ResplanError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
/// - Required fields are missing
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(ResplanError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            ResplanError::Config("No config file found in any of the standard locations".to_string())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| ResplanError::Config(format!("Failed to read config file: {e}")))?;

    let config = parse_config(&contents, &config_path)?;
    config.validate()?;
    Ok(config)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
///
/// # Errors
/// Returns `ResplanError::Config` if format is invalid or parsing fails.
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| ResplanError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| ResplanError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(ResplanError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// Probe multiple paths for configuration files
///
/// Searches for config files in the following locations (in order):
/// 1. Current working directory (`./config.{json,toml}`,
///    `./resplan.{json,toml}`)
/// 2. Parent directories (up to 2 levels)
/// 3. Relative to executable location
///
/// # Returns
/// The first config file found, or `None` if no file exists.
#[must_use]
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(candidates_in(&cwd));
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend(candidates_in(exe_dir));
        }
    }

    candidates.into_iter().find(|path| path.exists())
}

fn candidates_in(dir: &Path) -> [PathBuf; 8] {
    [
        dir.join("config.json"),
        dir.join("config.toml"),
        dir.join("resplan.json"),
        dir.join("resplan.toml"),
        dir.join("../config.json"),
        dir.join("../config.toml"),
        dir.join("../../config.json"),
        dir.join("../../config.toml"),
    ]
}

/// Get required environment variable
///
/// # Errors
/// Returns `ResplanError::Config` if the variable is not set.
fn env_var(key: &str) -> Result<String> {
    env_opt(key).ok_or_else(|| {
        ResplanError::Config(format!("Missing required environment variable: {key}"))
    })
}

/// Optional environment variable; blank values count as unset.
fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}

/// Parse an optional environment variable.
///
/// # Errors
/// Returns `ResplanError::Config` if the variable is set but unparsable.
fn env_parse<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    env_opt(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|e| ResplanError::Config(format!("Invalid value for {key}: {e}")))
        })
        .transpose()
}

/// Parse boolean from environment variable
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
///
/// # Returns
/// The parsed boolean value, or `default` if not set.
fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map_or(default, |s| {
            matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
        })
}
