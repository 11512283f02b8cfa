pub mod feasibility;
pub mod plan;
pub mod requirement;
pub mod rfp;

pub use feasibility::{FeasibilityFactor, FeasibilityStudy, FinancialData};
pub use plan::{Milestone, Plan, ResourceRole, RiskItem, RiskLevel};
pub use requirement::Requirement;
pub use rfp::{DocumentType, RfpDocument, RfpSection, RfpSubsection};

/// Returns `value` unless it is empty or whitespace, in which case `fallback` is returned.
pub fn non_blank<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.trim().is_empty() {
        fallback
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_blank_keeps_value() {
        assert_eq!(non_blank("Acme", "[company]"), "Acme");
    }

    #[test]
    fn test_non_blank_replaces_whitespace() {
        assert_eq!(non_blank("   ", "[company]"), "[company]");
        assert_eq!(non_blank("", "[company]"), "[company]");
    }
}
