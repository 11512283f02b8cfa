use serde::{Deserialize, Serialize};

use crate::models::non_blank;

pub const UNSPECIFIED_TECHNOLOGIES: &str = "Not specified";
pub const DEFAULT_COMPLIANCE: &str = "Standard compliance";

/// Requirements captured by the first wizard step.
///
/// Field validation belongs to the form layer. Only the two optional fields may be
/// absent; generators read them through [`Requirement::technologies`] and
/// [`Requirement::compliance`] so an absent or blank value never reaches a template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Requirement {
    pub name: String,
    pub company: String,
    pub industry: String,
    pub contact_email: String,
    pub problem_statement: String,
    pub objective: String,
    pub solution_description: String,
    pub target_users: String,
    pub key_features: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_technologies: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compliance_requirements: Option<String>,
    pub budget_range: String,
    pub timeline: String,
}

impl Requirement {
    pub fn technologies(&self) -> &str {
        self.preferred_technologies
            .as_deref()
            .map(|t| non_blank(t, UNSPECIFIED_TECHNOLOGIES))
            .unwrap_or(UNSPECIFIED_TECHNOLOGIES)
    }

    pub fn compliance(&self) -> &str {
        self.compliance_requirements
            .as_deref()
            .map(|c| non_blank(c, DEFAULT_COMPLIANCE))
            .unwrap_or(DEFAULT_COMPLIANCE)
    }
}
