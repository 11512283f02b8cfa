use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeasibilityFactor {
    pub factor: String,
    pub score: u32, // 0 – 100
    pub analysis: String,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialData {
    pub estimated_cost: String,
    pub projected_roi: String,
    pub payback_period: String,
}

/// Three-dimensional feasibility assessment produced by the third wizard step.
///
/// On the local path each category score is the rounded mean of its factors and the
/// overall score is the weighted combination from `generation::scoring`. Remote results
/// are passed through as returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeasibilityStudy {
    pub overall_score: u32,
    pub technical_score: u32,
    pub financial_score: u32,
    pub operational_score: u32,
    pub recommendation: String,
    pub next_steps: Vec<String>,
    pub technical_factors: Vec<FeasibilityFactor>,
    pub financial_factors: Vec<FeasibilityFactor>,
    pub financial_data: FinancialData,
    pub operational_factors: Vec<FeasibilityFactor>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_financial_data_field_names() {
        let data = FinancialData {
            estimated_cost: "R1".to_string(),
            projected_roi: "10%".to_string(),
            payback_period: "12 months".to_string(),
        };
        let value = serde_json::to_value(&data).unwrap();
        assert_eq!(value["projectedRoi"], "10%");
        assert_eq!(value["paybackPeriod"], "12 months");
        assert_eq!(value["estimatedCost"], "R1");
    }

    #[test]
    fn test_study_missing_scores_fails_deserialization() {
        let json = r#"{"overallScore": 70, "recommendation": "ok"}"#;
        let result: Result<FeasibilityStudy, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }
}
