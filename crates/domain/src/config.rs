//! Application configuration structures
//!
//! Loaded by `resplan-infra::config::loader` from environment variables or a
//! JSON/TOML file. Everything except the snapshot path has a default.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_ACTOR, DEFAULT_MATRIX_MONTHS_AFTER, DEFAULT_MATRIX_MONTHS_BEFORE};
use crate::errors::{ResplanError, Result};
use crate::impl_domain_status_conversions;
use crate::types::{CalcMode, ProbabilityWeights};

/// Top-level application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub planning: PlanningConfig,
    pub storage: StorageConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advice: Option<AdviceConfig>,
}

impl Config {
    /// Configuration with defaults and the given snapshot location.
    #[must_use]
    pub fn with_snapshot_path(snapshot_path: impl Into<PathBuf>) -> Self {
        Self {
            planning: PlanningConfig::default(),
            storage: StorageConfig { snapshot_path: snapshot_path.into(), history_path: None },
            advice: None,
        }
    }

    /// # Errors
    /// Returns `ResplanError::Config` if the weights are out of range or the
    /// advice section is incomplete for its provider.
    pub fn validate(&self) -> Result<()> {
        self.planning
            .weights
            .validate()
            .map_err(|e| ResplanError::Config(format!("planning.weights: {e}")))?;
        if let Some(advice) = &self.advice {
            advice.validate()?;
        }
        Ok(())
    }
}

/// Forecasting and matrix settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanningConfig {
    #[serde(default)]
    pub weights: ProbabilityWeights,
    #[serde(default)]
    pub default_mode: CalcMode,
    #[serde(default = "default_months_before")]
    pub matrix_months_before: u32,
    #[serde(default = "default_months_after")]
    pub matrix_months_after: u32,
    /// Actor recorded on history entries
    #[serde(default = "default_actor")]
    pub actor: String,
}

impl Default for PlanningConfig {
    fn default() -> Self {
        Self {
            weights: ProbabilityWeights::default(),
            default_mode: CalcMode::default(),
            matrix_months_before: DEFAULT_MATRIX_MONTHS_BEFORE,
            matrix_months_after: DEFAULT_MATRIX_MONTHS_AFTER,
            actor: default_actor(),
        }
    }
}

const fn default_months_before() -> u32 {
    DEFAULT_MATRIX_MONTHS_BEFORE
}

const fn default_months_after() -> u32 {
    DEFAULT_MATRIX_MONTHS_AFTER
}

fn default_actor() -> String {
    DEFAULT_ACTOR.to_string()
}

/// Where plan state and history live on disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// JSON snapshot of projects, members, allocations and weights
    pub snapshot_path: PathBuf,
    /// JSON-lines audit log; history is kept in memory when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history_path: Option<PathBuf>,
}

/// LLM vendor used for project advice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdviceProviderKind {
    OpenAi,
    Azure,
}

impl_domain_status_conversions!(AdviceProviderKind {
    OpenAi => "openai",
    Azure => "azure",
});

/// LLM advice settings
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdviceConfig {
    pub provider: AdviceProviderKind,
    pub api_key: String,
    /// Base URL; OpenAI falls back to its public endpoint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub azure_deployment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub azure_api_version: Option<String>,
}

impl AdviceConfig {
    /// # Errors
    /// Returns `ResplanError::Config` for an empty API key, or for Azure
    /// without an endpoint and deployment.
    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(ResplanError::Config("advice.api_key must not be empty".into()));
        }
        if self.provider == AdviceProviderKind::Azure
            && (self.endpoint.is_none() || self.azure_deployment.is_none())
        {
            return Err(ResplanError::Config(
                "azure advice requires endpoint and azure_deployment".into(),
            ));
        }
        Ok(())
    }
}

// Keeps the API key out of logs.
impl std::fmt::Debug for AdviceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdviceConfig")
            .field("provider", &self.provider)
            .field("api_key", &"<redacted>")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("azure_deployment", &self.azure_deployment)
            .field("azure_api_version", &self.azure_api_version)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn advice(provider: AdviceProviderKind) -> AdviceConfig {
        AdviceConfig {
            provider,
            api_key: "sk-test".into(),
            endpoint: None,
            model: None,
            azure_deployment: None,
            azure_api_version: None,
        }
    }

    #[test]
    fn minimal_json_fills_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"storage": {"snapshot_path": "plan.json"}}"#).unwrap();

        assert_eq!(config.planning, PlanningConfig::default());
        assert_eq!(config.planning.actor, "current_user");
        assert_eq!(config.storage.history_path, None);
        assert!(config.advice.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn azure_requires_endpoint_and_deployment() {
        let mut azure = advice(AdviceProviderKind::Azure);
        assert!(matches!(azure.validate(), Err(ResplanError::Config(_))));

        azure.endpoint = Some("https://example.openai.azure.com".into());
        azure.azure_deployment = Some("gpt-4o".into());
        assert!(azure.validate().is_ok());
    }

    #[test]
    fn debug_redacts_api_key() {
        let rendered = format!("{:?}", advice(AdviceProviderKind::OpenAi));
        assert!(!rendered.contains("sk-test"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn invalid_weights_fail_validation() {
        let mut config = Config::with_snapshot_path("plan.json");
        config.planning.weights = ProbabilityWeights::new(150, 70, 40, 10);
        assert!(matches!(config.validate(), Err(ResplanError::Config(_))));
    }
}
