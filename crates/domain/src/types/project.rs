//! Project types
//!
//! A project is either a lead (pre-contract, carries a win probability) or a
//! contract (active, completed or on hold). The two
//! shapes are separate variants so that a probability can never sit on a
//! contract; [`LeadProject::convert`] is the only way from one to the other.
//!
//! On the wire a project is a flat camelCase record with a `status` field.
//! Decoding validates dates and the probability invariant.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "ts-gen")]
use ts_rs::TS;

use super::weights::Probability;
use crate::constants::DATE_FORMAT;
use crate::errors::{ResplanError, Result};
use crate::impl_domain_status_conversions;
use crate::utils::calendar::parse_date;

/// Lifecycle status of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    Lead,
    Active,
    Completed,
    OnHold,
}

impl_domain_status_conversions!(ProjectStatus {
    Lead => "lead",
    Active => "active",
    Completed => "completed",
    OnHold => "on_hold",
});

impl ProjectStatus {
    /// Whether revenue from this status counts as confirmed.
    #[must_use]
    pub const fn is_confirmed(self) -> bool {
        matches!(self, Self::Active | Self::Completed)
    }
}

/// Status of a signed engagement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ContractStatus {
    #[default]
    Active,
    Completed,
    OnHold,
}

impl From<ContractStatus> for ProjectStatus {
    fn from(value: ContractStatus) -> Self {
        match value {
            ContractStatus::Active => Self::Active,
            ContractStatus::Completed => Self::Completed,
            ContractStatus::OnHold => Self::OnHold,
        }
    }
}

/// Timestamped conversation note attached to a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationLog {
    pub id: String,
    /// ISO date or timestamp as entered.
    pub date: String,
    pub summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Saved reply from the advice provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiAdvice {
    pub id: String,
    pub content: String,
    pub generated_at: DateTime<Utc>,
    /// Provider name, `unknown` when it was not recorded.
    #[serde(default = "unknown_provider")]
    pub provider: String,
}

fn unknown_provider() -> String {
    "unknown".to_string()
}

/// Fields shared by leads and contracts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDetails {
    pub id: String,
    /// Human-facing code such as `PRJ-2025-001`.
    pub project_code: Option<String>,
    pub name: String,
    pub client_name: String,
    pub description: Option<String>,
    pub needs: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Estimated budget in whole currency units.
    pub estimated_budget: u64,
    pub planned_cost: Option<u64>,
    pub actual_cost: Option<u64>,
    pub risks: Vec<String>,
    pub issues: Vec<String>,
    pub logs: Vec<ConversationLog>,
    /// Oldest first.
    pub ai_advices: Vec<AiAdvice>,
}

impl ProjectDetails {
    /// Minimal project details with empty free-text fields.
    ///
    /// # Errors
    /// Returns `ResplanError::InvalidInput` if `end_date` precedes
    /// `start_date`.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        client_name: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
        estimated_budget: u64,
    ) -> Result<Self> {
        let details = Self {
            id: id.into(),
            project_code: None,
            name: name.into(),
            client_name: client_name.into(),
            description: None,
            needs: None,
            start_date,
            end_date,
            estimated_budget,
            planned_cost: None,
            actual_cost: None,
            risks: Vec::new(),
            issues: Vec::new(),
            logs: Vec::new(),
            ai_advices: Vec::new(),
        };
        details.validate()?;
        Ok(details)
    }

    /// # Errors
    /// Returns `ResplanError::InvalidInput` for an empty id or an end date
    /// before the start date.
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(ResplanError::InvalidInput("project id must not be empty".into()));
        }
        if self.end_date < self.start_date {
            return Err(ResplanError::InvalidInput(format!(
                "project {} ends ({}) before it starts ({})",
                self.id, self.end_date, self.start_date
            )));
        }
        Ok(())
    }
}

/// A sales opportunity that has not been signed yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeadProject {
    pub details: ProjectDetails,
    /// Win probability; absent is read as 0.
    pub probability: Option<Probability>,
    /// Revenue already agreed while still a lead.
    pub actual_revenue: Option<u64>,
}

impl LeadProject {
    #[must_use]
    pub const fn new(details: ProjectDetails, probability: Option<Probability>) -> Self {
        Self { details, probability, actual_revenue: None }
    }

    /// Unweighted value: actual revenue when present, else the estimate.
    #[must_use]
    pub fn value(&self) -> u64 {
        self.actual_revenue.unwrap_or(self.details.estimated_budget)
    }

    /// Probability used for weighting; a missing value counts as 0.
    #[must_use]
    pub fn effective_probability(&self) -> Probability {
        self.probability.unwrap_or(Probability::ZERO)
    }

    /// Convert the lead into an active contract, dropping its probability.
    ///
    /// `actual_revenue` replaces any revenue the lead already carried.
    /// Consumes the lead: there is no way back.
    #[must_use]
    pub fn convert(self, actual_revenue: Option<u64>) -> ContractProject {
        ContractProject {
            details: self.details,
            status: ContractStatus::Active,
            actual_revenue: actual_revenue.or(self.actual_revenue),
        }
    }
}

/// A signed engagement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractProject {
    pub details: ProjectDetails,
    pub status: ContractStatus,
    pub actual_revenue: Option<u64>,
}

impl ContractProject {
    #[must_use]
    pub const fn new(details: ProjectDetails, status: ContractStatus) -> Self {
        Self { details, status, actual_revenue: None }
    }

    /// Recognised value: actual revenue when present, else the estimate.
    #[must_use]
    pub fn value(&self) -> u64 {
        self.actual_revenue.unwrap_or(self.details.estimated_budget)
    }
}

/// A lead or a contracted engagement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ProjectRecord", into = "ProjectRecord")]
pub enum Project {
    Lead(LeadProject),
    Contract(ContractProject),
}

impl Project {
    #[must_use]
    pub const fn details(&self) -> &ProjectDetails {
        match self {
            Self::Lead(lead) => &lead.details,
            Self::Contract(contract) => &contract.details,
        }
    }

    pub fn details_mut(&mut self) -> &mut ProjectDetails {
        match self {
            Self::Lead(lead) => &mut lead.details,
            Self::Contract(contract) => &mut contract.details,
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.details().id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.details().name
    }

    #[must_use]
    pub fn status(&self) -> ProjectStatus {
        match self {
            Self::Lead(_) => ProjectStatus::Lead,
            Self::Contract(contract) => contract.status.into(),
        }
    }

    #[must_use]
    pub const fn is_lead(&self) -> bool {
        matches!(self, Self::Lead(_))
    }

    #[must_use]
    pub const fn as_lead(&self) -> Option<&LeadProject> {
        match self {
            Self::Lead(lead) => Some(lead),
            Self::Contract(_) => None,
        }
    }

    /// Probability, only ever present on leads.
    #[must_use]
    pub fn probability(&self) -> Option<Probability> {
        self.as_lead().and_then(|lead| lead.probability)
    }

    /// Monetary value attributed to the project's recognition month.
    #[must_use]
    pub fn value(&self) -> u64 {
        match self {
            Self::Lead(lead) => lead.value(),
            Self::Contract(contract) => contract.value(),
        }
    }

    /// # Errors
    /// See [`ProjectDetails::validate`].
    pub fn validate(&self) -> Result<()> {
        self.details().validate()
    }
}

impl From<LeadProject> for Project {
    fn from(value: LeadProject) -> Self {
        Self::Lead(value)
    }
}

impl From<ContractProject> for Project {
    fn from(value: ContractProject) -> Self {
        Self::Contract(value)
    }
}

/// Flat wire shape of a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRecord {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_code: Option<String>,
    pub name: String,
    #[serde(default)]
    pub client_name: String,
    pub status: ProjectStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub needs: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub probability: Option<i64>,
    #[serde(default)]
    pub estimated_budget: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_revenue: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub planned_cost: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_cost: Option<u64>,
    pub start_date: String,
    pub end_date: String,
    #[serde(default)]
    pub logs: Vec<ConversationLog>,
    #[serde(default)]
    pub risks: Vec<String>,
    #[serde(default)]
    pub issues: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ai_advices: Vec<AiAdvice>,
}

impl TryFrom<ProjectRecord> for Project {
    type Error = ResplanError;

    fn try_from(record: ProjectRecord) -> Result<Self> {
        let details = ProjectDetails {
            start_date: parse_date(&record.start_date)?,
            end_date: parse_date(&record.end_date)?,
            id: record.id,
            project_code: record.project_code,
            name: record.name,
            client_name: record.client_name,
            description: record.description,
            needs: record.needs,
            estimated_budget: record.estimated_budget,
            planned_cost: record.planned_cost,
            actual_cost: record.actual_cost,
            risks: record.risks,
            issues: record.issues,
            logs: record.logs,
            ai_advices: record.ai_advices,
        };
        details.validate()?;

        let contract = |status| {
            Self::Contract(ContractProject {
                details: details.clone(),
                status,
                actual_revenue: record.actual_revenue,
            })
        };

        // Probability outside a lead is ignored rather than rejected.
        Ok(match record.status {
            ProjectStatus::Lead => Self::Lead(LeadProject {
                probability: record.probability.map(Probability::try_from).transpose()?,
                actual_revenue: record.actual_revenue,
                details,
            }),
            ProjectStatus::Active => contract(ContractStatus::Active),
            ProjectStatus::Completed => contract(ContractStatus::Completed),
            ProjectStatus::OnHold => contract(ContractStatus::OnHold),
        })
    }
}

impl From<Project> for ProjectRecord {
    fn from(project: Project) -> Self {
        let status = project.status();
        let (details, probability, actual_revenue) = match project {
            Project::Lead(lead) => (
                lead.details,
                lead.probability.map(|p| i64::from(p.percent())),
                lead.actual_revenue,
            ),
            Project::Contract(contract) => (contract.details, None, contract.actual_revenue),
        };

        Self {
            id: details.id,
            project_code: details.project_code,
            name: details.name,
            client_name: details.client_name,
            status,
            description: details.description,
            needs: details.needs,
            probability,
            estimated_budget: details.estimated_budget,
            actual_revenue,
            planned_cost: details.planned_cost,
            actual_cost: details.actual_cost,
            start_date: details.start_date.format(DATE_FORMAT).to_string(),
            end_date: details.end_date.format(DATE_FORMAT).to_string(),
            logs: details.logs,
            risks: details.risks,
            issues: details.issues,
            ai_advices: details.ai_advices,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn decodes_lead_with_probability() {
        let json = r#"{
            "id": "lead-1",
            "name": "ERP Renewal",
            "clientName": "Acme",
            "status": "lead",
            "probability": 75,
            "estimatedBudget": 40000000,
            "startDate": "2025-06-01",
            "endDate": "2025-12-31"
        }"#;

        let project: Project = serde_json::from_str(json).unwrap();
        assert!(project.is_lead());
        assert_eq!(project.probability().map(Probability::percent), Some(75));
        assert_eq!(project.value(), 40_000_000);
        assert_eq!(project.details().start_date, date(2025, 6, 1));
    }

    #[test]
    fn probability_on_contract_is_dropped() {
        let json = r#"{
            "id": "p-1",
            "name": "Portal",
            "status": "active",
            "probability": 90,
            "estimatedBudget": 1000,
            "startDate": "2025-01-01",
            "endDate": "2025-03-31"
        }"#;

        let project: Project = serde_json::from_str(json).unwrap();
        assert_eq!(project.status(), ProjectStatus::Active);
        assert_eq!(project.probability(), None);

        let value = serde_json::to_value(&project).unwrap();
        assert!(value.get("probability").is_none());
    }

    #[test]
    fn malformed_date_is_rejected() {
        let json = r#"{
            "id": "p-2",
            "name": "Broken",
            "status": "active",
            "estimatedBudget": 1,
            "startDate": "2025-02-30",
            "endDate": "2025-03-31"
        }"#;

        let err = serde_json::from_str::<Project>(json).unwrap_err();
        assert!(err.to_string().contains("Invalid date"), "{err}");
    }

    #[test]
    fn end_before_start_is_rejected() {
        let result =
            ProjectDetails::new("p-3", "Backwards", "Acme", date(2025, 5, 1), date(2025, 4, 1), 0);
        assert!(matches!(result, Err(ResplanError::InvalidInput(_))));
    }

    #[test]
    fn actual_revenue_overrides_estimate_when_present() {
        let details =
            ProjectDetails::new("p-4", "Migration", "Acme", date(2025, 4, 1), date(2025, 9, 30), 100)
                .unwrap();
        let mut contract = ContractProject::new(details, ContractStatus::Completed);
        assert_eq!(contract.value(), 100);

        contract.actual_revenue = Some(0);
        assert_eq!(contract.value(), 0);
    }

    #[test]
    fn convert_strips_probability_and_activates() {
        let details =
            ProjectDetails::new("lead-2", "Data Lake", "Globex", date(2025, 7, 1), date(2026, 1, 31), 5)
                .unwrap();
        let lead = LeadProject::new(details.clone(), Some(Probability::new(80).unwrap()));

        let contract = lead.convert(Some(7));
        let project = Project::from(contract);

        assert_eq!(project.status(), ProjectStatus::Active);
        assert_eq!(project.probability(), None);
        assert_eq!(project.value(), 7);
        assert_eq!(project.details(), &details);
    }

    #[test]
    fn record_round_trip_keeps_wire_shape() {
        let json = serde_json::json!({
            "id": "lead-3",
            "name": "CRM",
            "clientName": "Initech",
            "status": "lead",
            "needs": "Consolidate customer data",
            "probability": 30,
            "estimatedBudget": 12000000,
            "startDate": "2025-10-01",
            "endDate": "2026-02-28",
            "logs": [],
            "risks": ["Budget freeze"],
            "issues": []
        });

        let project: Project = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(serde_json::to_value(&project).unwrap(), json);
    }

    #[test]
    fn project_code_and_saved_advice_survive_round_trip() {
        let json = serde_json::json!({
            "id": "p-5",
            "projectCode": "PRJ-2025-001",
            "name": "Portal",
            "clientName": "Acme",
            "status": "active",
            "estimatedBudget": 1000,
            "startDate": "2025-04-01",
            "endDate": "2025-09-30",
            "logs": [],
            "risks": [],
            "issues": [],
            "aiAdvices": [{
                "id": "ai-advice-1",
                "content": "Fix the scope first.",
                "generatedAt": "2025-05-01T09:30:00Z",
                "provider": "openai"
            }]
        });

        let project: Project = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(project.details().project_code.as_deref(), Some("PRJ-2025-001"));
        assert_eq!(project.details().ai_advices.len(), 1);
        assert_eq!(project.details().ai_advices[0].provider, "openai");
        assert_eq!(serde_json::to_value(&project).unwrap(), json);
    }

    #[test]
    fn lead_keeps_actual_revenue_and_uses_it_as_value() {
        let json = serde_json::json!({
            "id": "lead-4",
            "name": "Upsell",
            "clientName": "Acme",
            "status": "lead",
            "probability": 50,
            "estimatedBudget": 1000,
            "actualRevenue": 800,
            "startDate": "2025-04-01",
            "endDate": "2025-09-30",
            "logs": [],
            "risks": [],
            "issues": []
        });

        let project: Project = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(project.value(), 800);
        assert_eq!(serde_json::to_value(&project).unwrap(), json);

        let Project::Lead(lead) = project else { panic!("expected a lead") };
        assert_eq!(lead.clone().convert(None).value(), 800);
        assert_eq!(lead.convert(Some(900)).value(), 900);
    }
}
