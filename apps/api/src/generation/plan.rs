//! Plan synthesis: remote generation with a deterministic local fallback.
//!
//! The local plan is built from fixed catalogs. Four milestones land 2, 4, 6 and 8
//! months after today; eight staffing roles split 100% of effort; five canned risks.

use chrono::{Local, Months, NaiveDate};

use crate::generation::dispatcher::{dispatch, Generated, RemoteRequest};
use crate::generation::prompts::{plan_prompt, plan_schema, PLAN_FUNCTION};
use crate::llm_client::RemoteGenerator;
use crate::models::{non_blank, Milestone, Plan, Requirement, ResourceRole, RiskItem, RiskLevel};

const DEFAULT_PROJECT_NAME: &str = "Software Development Project";
const DEFAULT_INDUSTRY: &str = "Technology";
const PROJECT_TYPE: &str = "Custom Software Development";

/// Presentation values the local plan cannot derive. Overridable through config.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanDefaults {
    pub duration: String,
    pub estimated_cost: String,
}

impl Default for PlanDefaults {
    fn default() -> Self {
        Self {
            duration: "8 months".to_string(),
            estimated_cost: "R750,000 - R850,000".to_string(),
        }
    }
}

/// (name, description, months after start)
const MILESTONES: [(&str, &str, u32); 4] = [
    (
        "Planning and Analysis",
        "Requirements gathering, system architecture design, and project planning",
        2,
    ),
    (
        "Development",
        "Core functionality implementation, database setup, and API development",
        4,
    ),
    (
        "Testing and QA",
        "Functional testing, performance testing, and bug fixing",
        6,
    ),
    (
        "Deployment and Handover",
        "Production deployment, user training, and documentation",
        8,
    ),
];

/// (role, percent of effort, notes). Percentages sum to 100.
const RESOURCES: [(&str, u32, &str); 8] = [
    (
        "Project Manager",
        15,
        "Responsible for overall project coordination and stakeholder communication",
    ),
    ("Business Analyst", 10, "Requirements analysis and documentation"),
    (
        "UI/UX Designer",
        10,
        "User interface design and user experience optimization",
    ),
    (
        "Frontend Developer",
        20,
        "Implementation of user interfaces and client-side functionality",
    ),
    ("Backend Developer", 25, "Server-side logic and API development"),
    ("QA Engineer", 10, "Quality assurance and testing"),
    (
        "DevOps Engineer",
        5,
        "Deployment pipeline and infrastructure management",
    ),
    (
        "Security Specialist",
        5,
        "Security assessment and implementation of security measures",
    ),
];

const RISKS: [(&str, RiskLevel, RiskLevel, &str); 5] = [
    (
        "Technical",
        RiskLevel::Medium,
        RiskLevel::High,
        "Regular technical reviews and continuous integration",
    ),
    (
        "Resource",
        RiskLevel::Medium,
        RiskLevel::Medium,
        "Cross-training team members and maintaining a resource buffer",
    ),
    (
        "Schedule",
        RiskLevel::High,
        RiskLevel::Medium,
        "Regular progress tracking and adjustment of timelines as needed",
    ),
    (
        "Budget",
        RiskLevel::Medium,
        RiskLevel::High,
        "Regular budget reviews and maintaining a contingency fund",
    ),
    (
        "Scope",
        RiskLevel::High,
        RiskLevel::Medium,
        "Clear requirements documentation and change control process",
    ),
];

/// Generates a plan remotely, falling back to [`synthesize_plan`].
pub async fn generate_plan(
    remote: &dyn RemoteGenerator,
    requirement: &Requirement,
    defaults: &PlanDefaults,
) -> Generated<Plan> {
    let request = RemoteRequest {
        prompt: plan_prompt(requirement),
        schema: plan_schema(),
        operation: PLAN_FUNCTION,
    };
    dispatch(remote, request, || synthesize_plan(requirement, defaults)).await
}

/// Local plan starting today.
pub fn synthesize_plan(requirement: &Requirement, defaults: &PlanDefaults) -> Plan {
    synthesize_plan_from(requirement, defaults, Local::now().date_naive())
}

/// Local plan starting on `start`.
pub fn synthesize_plan_from(
    requirement: &Requirement,
    defaults: &PlanDefaults,
    start: NaiveDate,
) -> Plan {
    let milestones = MILESTONES
        .iter()
        .map(|&(name, description, months)| Milestone {
            name: name.to_string(),
            description: description.to_string(),
            target_date: format_date(add_months(start, months)),
            progress: 0,
        })
        .collect();

    let resource_allocation = RESOURCES
        .iter()
        .map(|&(role, percent, notes)| ResourceRole {
            role: role.to_string(),
            allocation: format!("{percent}%"),
            notes: notes.to_string(),
        })
        .collect();

    let risk_assessment = RISKS
        .iter()
        .map(|&(category, probability, impact, mitigation)| RiskItem {
            category: category.to_string(),
            probability,
            impact,
            mitigation_strategy: mitigation.to_string(),
        })
        .collect();

    Plan {
        project_name: non_blank(&requirement.name, DEFAULT_PROJECT_NAME).to_string(),
        project_type: PROJECT_TYPE.to_string(),
        industry: non_blank(&requirement.industry, DEFAULT_INDUSTRY).to_string(),
        duration: defaults.duration.clone(),
        start_date: format_date(start),
        estimated_cost: defaults.estimated_cost.clone(),
        milestones,
        resource_allocation,
        risk_assessment,
    }
}

/// Calendar-month addition, clamped to the last day of the target month
/// (Jan 31 + 1 month = Feb 28/29).
fn add_months(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_add_months(Months::new(months))
        .unwrap_or(NaiveDate::MAX)
}

fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::dispatcher::stubs::{FailingRemote, FixedRemote};
    use crate::models::requirement::fixtures::{bare_requirement, requirement};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn target_dates(plan: &Plan) -> Vec<NaiveDate> {
        plan.milestones
            .iter()
            .map(|m| NaiveDate::parse_from_str(&m.target_date, "%Y-%m-%d").unwrap())
            .collect()
    }

    #[test]
    fn test_milestones_at_fixed_month_offsets() {
        let plan = synthesize_plan_from(&requirement(), &PlanDefaults::default(), date(2025, 3, 15));
        assert_eq!(plan.start_date, "2025-03-15");
        let targets: Vec<&str> = plan.milestones.iter().map(|m| m.target_date.as_str()).collect();
        assert_eq!(
            targets,
            vec!["2025-05-15", "2025-07-15", "2025-09-15", "2025-11-15"]
        );
    }

    #[test]
    fn test_milestones_cross_year_boundary() {
        let plan = synthesize_plan_from(&requirement(), &PlanDefaults::default(), date(2025, 11, 1));
        assert_eq!(
            target_dates(&plan),
            vec![
                date(2026, 1, 1),
                date(2026, 3, 1),
                date(2026, 5, 1),
                date(2026, 7, 1)
            ]
        );
    }

    #[test]
    fn test_month_end_start_clamps_and_stays_increasing() {
        let start = date(2023, 12, 31);
        let plan = synthesize_plan_from(&requirement(), &PlanDefaults::default(), start);
        let targets = target_dates(&plan);
        assert_eq!(
            targets,
            vec![
                date(2024, 2, 29),
                date(2024, 4, 30),
                date(2024, 6, 30),
                date(2024, 8, 31)
            ]
        );
        assert!(start < targets[0]);
        assert!(targets.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_milestone_order_and_progress() {
        let plan = synthesize_plan_from(&requirement(), &PlanDefaults::default(), date(2025, 1, 10));
        let names: Vec<&str> = plan.milestones.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Planning and Analysis",
                "Development",
                "Testing and QA",
                "Deployment and Handover"
            ]
        );
        assert!(plan.milestones.iter().all(|m| m.progress == 0));
    }

    #[test]
    fn test_resource_allocation_sums_to_100() {
        let plan = synthesize_plan(&requirement(), &PlanDefaults::default());
        assert_eq!(plan.resource_allocation.len(), 8);
        let total: u32 = plan
            .resource_allocation
            .iter()
            .map(|r| r.allocation.trim_end_matches('%').parse::<u32>().unwrap())
            .sum();
        assert_eq!(total, 100);
    }

    #[test]
    fn test_risk_register_catalog() {
        let plan = synthesize_plan(&requirement(), &PlanDefaults::default());
        let categories: Vec<&str> = plan
            .risk_assessment
            .iter()
            .map(|r| r.category.as_str())
            .collect();
        assert_eq!(
            categories,
            vec!["Technical", "Resource", "Schedule", "Budget", "Scope"]
        );
        assert_eq!(plan.risk_assessment[0].impact, RiskLevel::High);
        assert_eq!(plan.risk_assessment[2].probability, RiskLevel::High);
    }

    #[test]
    fn test_catalog_text_is_stable() {
        let plan = synthesize_plan(&requirement(), &PlanDefaults::default());
        assert_eq!(
            plan.milestones[0].description,
            "Requirements gathering, system architecture design, and project planning"
        );
        assert_eq!(
            plan.milestones[3].description,
            "Production deployment, user training, and documentation"
        );
        assert_eq!(
            plan.resource_allocation[0].notes,
            "Responsible for overall project coordination and stakeholder communication"
        );
        assert_eq!(
            plan.resource_allocation[7].notes,
            "Security assessment and implementation of security measures"
        );
        assert_eq!(
            plan.risk_assessment[1].mitigation_strategy,
            "Cross-training team members and maintaining a resource buffer"
        );
        assert_eq!(
            plan.risk_assessment[2].mitigation_strategy,
            "Regular progress tracking and adjustment of timelines as needed"
        );
    }

    #[test]
    fn test_start_date_is_today() {
        let today = Local::now().date_naive();
        let plan = synthesize_plan(&requirement(), &PlanDefaults::default());
        // Tolerate the test straddling midnight.
        let start = NaiveDate::parse_from_str(&plan.start_date, "%Y-%m-%d").unwrap();
        assert!(start == today || start == today.succ_opt().unwrap());
    }

    #[test]
    fn test_defaults_and_blank_fields() {
        let req = Requirement {
            name: "  ".to_string(),
            industry: String::new(),
            ..bare_requirement()
        };
        let plan = synthesize_plan(&req, &PlanDefaults::default());
        assert_eq!(plan.project_name, "Software Development Project");
        assert_eq!(plan.industry, "Technology");
        assert_eq!(plan.project_type, "Custom Software Development");
        assert_eq!(plan.duration, "8 months");
        assert_eq!(plan.estimated_cost, "R750,000 - R850,000");
    }

    #[test]
    fn test_configured_defaults_are_used() {
        let defaults = PlanDefaults {
            duration: "32 weeks".to_string(),
            estimated_cost: "$40,000 - $45,000".to_string(),
        };
        let plan = synthesize_plan(&requirement(), &defaults);
        assert_eq!(plan.duration, "32 weeks");
        assert_eq!(plan.estimated_cost, "$40,000 - $45,000");
    }

    #[tokio::test]
    async fn test_generate_plan_falls_back_to_local_plan() {
        let req = bare_requirement();
        let defaults = PlanDefaults::default();
        let result = generate_plan(&FailingRemote, &req, &defaults).await;
        assert!(result.used_fallback);
        assert_eq!(result.data.milestones.len(), 4);
        assert_eq!(result.data.project_name, req.name);
    }

    #[tokio::test]
    async fn test_generate_plan_passes_remote_plan_through() {
        let remote_plan = synthesize_plan_from(
            &requirement(),
            &PlanDefaults {
                duration: "5 months".to_string(),
                estimated_cost: "R1".to_string(),
            },
            date(2030, 1, 1),
        );
        let remote = FixedRemote(serde_json::to_value(&remote_plan).unwrap());
        let result = generate_plan(&remote, &requirement(), &PlanDefaults::default()).await;
        assert!(!result.used_fallback);
        assert_eq!(result.data, remote_plan);
    }
}
