//! Team member types

use serde::{Deserialize, Serialize};
#[cfg(feature = "ts-gen")]
use ts_rs::TS;

use crate::impl_domain_status_conversions;

/// Primary role of a team member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[serde(rename = "pm")]
    ProjectManager,
    TechLead,
    Developer,
    Designer,
    Analyst,
    Consultant,
}

impl_domain_status_conversions!(Role {
    ProjectManager => "pm",
    TechLead => "tech_lead",
    Developer => "developer",
    Designer => "designer",
    Analyst => "analyst",
    Consultant => "consultant",
});

impl Role {
    pub const ALL: [Self; 6] = [
        Self::ProjectManager,
        Self::TechLead,
        Self::Developer,
        Self::Designer,
        Self::Analyst,
        Self::Consultant,
    ];

    /// Human-readable label, also the default allocation role text.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::ProjectManager => "Project Manager",
            Self::TechLead => "Tech Lead",
            Self::Developer => "Developer",
            Self::Designer => "Designer",
            Self::Analyst => "Analyst",
            Self::Consultant => "Consultant",
        }
    }
}

/// A team resource that can be allocated to projects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: String,
    pub name: String,
    pub role: Role,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "ts-gen", ts(optional))]
    pub avatar: Option<String>,
}

impl Member {
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, role: Role) -> Self {
        Self { id: id.into(), name: name.into(), role, skills: Vec::new(), avatar: None }
    }

    #[must_use]
    pub fn with_skills<I, S>(mut self, skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skills = skills.into_iter().map(Into::into).collect();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_parses_from_wire_string() {
        assert_eq!("tech_lead".parse::<Role>().unwrap(), Role::TechLead);
        assert_eq!(Role::ProjectManager.to_string(), "pm");
        assert_eq!(serde_json::to_string(&Role::ProjectManager).unwrap(), "\"pm\"");
        assert!("intern".parse::<Role>().is_err());
    }

    #[test]
    fn member_defaults_skills() {
        let member: Member =
            serde_json::from_str(r#"{"id":"m-1","name":"Sato","role":"developer"}"#).unwrap();
        assert!(member.skills.is_empty());
        assert_eq!(member.avatar, None);
    }

    #[test]
    fn builder_collects_skills() {
        let member = Member::new("m-2", "Suzuki", Role::Designer).with_skills(["Figma", "UX"]);
        assert_eq!(member.skills, vec!["Figma".to_string(), "UX".to_string()]);
    }
}
