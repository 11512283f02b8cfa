use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    #[serde(alias = "low", alias = "LOW")]
    Low,
    #[serde(alias = "medium", alias = "MEDIUM")]
    Medium,
    #[serde(alias = "high", alias = "HIGH")]
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    pub name: String,
    pub description: String,
    pub target_date: String,
    pub progress: u32, // 0 – 100
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceRole {
    pub role: String,
    /// Descriptive text such as "15%".
    pub allocation: String,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskItem {
    pub category: String,
    pub probability: RiskLevel,
    pub impact: RiskLevel,
    pub mitigation_strategy: String,
}

/// Project plan produced by the second wizard step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    pub project_name: String,
    pub project_type: String,
    pub industry: String,
    pub duration: String,
    /// `YYYY-MM-DD` on the local path; free text when produced remotely.
    pub start_date: String,
    pub estimated_cost: String,
    pub milestones: Vec<Milestone>,
    pub resource_allocation: Vec<ResourceRole>,
    pub risk_assessment: Vec<RiskItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_level_accepts_any_case() {
        let levels: Vec<RiskLevel> = serde_json::from_str(r#"["low", "Medium", "HIGH"]"#).unwrap();
        assert_eq!(levels, vec![RiskLevel::Low, RiskLevel::Medium, RiskLevel::High]);
    }

    #[test]
    fn test_risk_level_serializes_capitalized() {
        assert_eq!(serde_json::to_string(&RiskLevel::High).unwrap(), r#""High""#);
    }

    #[test]
    fn test_unknown_risk_level_is_rejected() {
        let result: Result<RiskLevel, _> = serde_json::from_str(r#""Catastrophic""#);
        assert!(result.is_err());
    }

    #[test]
    fn test_plan_deserializes_from_client_payload() {
        let json = r#"{
            "projectName": "Portal",
            "projectType": "Web",
            "industry": "Retail",
            "duration": "6 months",
            "startDate": "2025-07-01",
            "estimatedCost": "R400,000 - R500,000",
            "milestones": [
                {"name": "Kickoff", "description": "Start", "targetDate": "2025-07-15", "progress": 10}
            ],
            "resourceAllocation": [
                {"role": "Project Manager", "allocation": "20%", "notes": "Coordination"}
            ],
            "riskAssessment": [
                {"category": "Schedule", "probability": "High", "impact": "Low", "mitigationStrategy": "Buffer"}
            ]
        }"#;
        let plan: Plan = serde_json::from_str(json).unwrap();
        assert_eq!(plan.milestones[0].target_date, "2025-07-15");
        assert_eq!(plan.milestones[0].progress, 10);
        assert_eq!(plan.risk_assessment[0].probability, RiskLevel::High);
        assert_eq!(plan.risk_assessment[0].mitigation_strategy, "Buffer");
    }
}
