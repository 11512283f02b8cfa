//! Feasibility scoring: remote generation with a deterministic local fallback.
//!
//! Local algorithm:
//! 1. Four canned factors per category (technical, financial, operational), each scored
//!    in [60, 85] with analysis text drawn from the requirement.
//! 2. Category score = rounded mean of its factor scores.
//! 3. Overall score = 35/40/25 weighted combination of the category scores.
//! 4. Recommendation picked from the overall score's tier.

use crate::generation::dispatcher::{dispatch, Generated, RemoteRequest};
use crate::generation::prompts::{feasibility_prompt, feasibility_schema, FEASIBILITY_FUNCTION};
use crate::generation::scoring::{category_score, RecommendationTier, ScoringWeights};
use crate::llm_client::RemoteGenerator;
use crate::models::{non_blank, FeasibilityFactor, FeasibilityStudy, FinancialData, Plan, Requirement};

const PROJECTED_ROI: &str = "135% over 3 years";
const PAYBACK_PERIOD: &str = "18 months";

const NEXT_STEPS: [&str; 4] = [
    "Secure stakeholder sign-off on scope and budget",
    "Issue the RFP to shortlisted vendors",
    "Set up project governance and a risk register owner",
    "Schedule a technical discovery workshop with the selected vendor",
];

/// Generates a feasibility study remotely, falling back to [`score_feasibility`].
pub async fn generate_feasibility(
    remote: &dyn RemoteGenerator,
    requirement: &Requirement,
    plan: &Plan,
) -> Generated<FeasibilityStudy> {
    let request = RemoteRequest {
        prompt: feasibility_prompt(requirement, plan),
        schema: feasibility_schema(),
        operation: FEASIBILITY_FUNCTION,
    };
    dispatch(remote, request, || score_feasibility(requirement, plan)).await
}

/// Local feasibility study. Total over every `Requirement`/`Plan` value.
pub fn score_feasibility(requirement: &Requirement, plan: &Plan) -> FeasibilityStudy {
    let technical_factors = technical_factors(requirement);
    let financial_factors = financial_factors(requirement, plan);
    let operational_factors = operational_factors(requirement, plan);

    let technical_score = category_score(&technical_factors);
    let financial_score = category_score(&financial_factors);
    let operational_score = category_score(&operational_factors);
    let overall_score =
        ScoringWeights::default().overall_score(technical_score, financial_score, operational_score);

    FeasibilityStudy {
        overall_score,
        technical_score,
        financial_score,
        operational_score,
        recommendation: RecommendationTier::from_score(overall_score)
            .message()
            .to_string(),
        next_steps: NEXT_STEPS.iter().map(|s| s.to_string()).collect(),
        technical_factors,
        financial_factors,
        financial_data: FinancialData {
            estimated_cost: plan.estimated_cost.clone(),
            projected_roi: PROJECTED_ROI.to_string(),
            payback_period: PAYBACK_PERIOD.to_string(),
        },
        operational_factors,
    }
}

fn factor(name: &str, score: u32, analysis: String, recommendations: [&str; 2]) -> FeasibilityFactor {
    FeasibilityFactor {
        factor: name.to_string(),
        score,
        analysis,
        recommendations: recommendations.iter().map(|r| r.to_string()).collect(),
    }
}

fn technical_factors(requirement: &Requirement) -> Vec<FeasibilityFactor> {
    let features = non_blank(&requirement.key_features, "the requested features");
    vec![
        factor(
            "Technology Stack Complexity",
            75,
            format!(
                "Preferred technologies: {}. A mainstream, well-supported stack keeps delivery risk moderate.",
                requirement.technologies()
            ),
            [
                "Confirm the stack with the development team before contracting",
                "Favour mature frameworks with long-term support",
            ],
        ),
        factor(
            "Integration Complexity",
            65,
            format!(
                "Delivering {features} is likely to need integration with existing systems, which adds coordination effort."
            ),
            [
                "Inventory every system the solution must connect to",
                "Prototype the riskiest integration early",
            ],
        ),
        factor(
            "Scalability Requirements",
            80,
            format!(
                "Expected load from {} can be served by a horizontally scalable architecture.",
                non_blank(&requirement.target_users, "the target users")
            ),
            [
                "Define expected peak usage in the RFP",
                "Include load testing in the QA phase",
            ],
        ),
        factor(
            "Security Considerations",
            70,
            format!(
                "Compliance obligations ({}) require security controls from the first sprint.",
                requirement.compliance()
            ),
            [
                "Run a threat-modelling session during design",
                "Budget for an independent security assessment before go-live",
            ],
        ),
    ]
}

fn financial_factors(requirement: &Requirement, plan: &Plan) -> Vec<FeasibilityFactor> {
    vec![
        factor(
            "Budget Adequacy",
            70,
            format!(
                "The stated budget of {} is compared with an estimated cost of {}.",
                non_blank(&requirement.budget_range, "[budget range]"),
                non_blank(&plan.estimated_cost, "[estimated cost]")
            ),
            [
                "Hold a 10-15% contingency reserve",
                "Tie vendor payments to milestone acceptance",
            ],
        ),
        factor(
            "ROI Potential",
            85,
            format!(
                "Meeting the objective ({}) should produce measurable operational savings.",
                non_blank(&requirement.objective, "[objective]")
            ),
            [
                "Agree baseline metrics before development starts",
                "Track benefits realisation after launch",
            ],
        ),
        factor(
            "Cost Risk",
            65,
            "Custom development carries a risk of overruns from scope growth and estimation error."
                .to_string(),
            [
                "Prefer fixed-price phases where scope is stable",
                "Enforce change control on every scope addition",
            ],
        ),
        factor(
            "Market Timing",
            80,
            format!(
                "Demand for digital solutions in the {} sector supports starting now.",
                non_blank(&requirement.industry, "target")
            ),
            [
                "Plan a phased release to capture value early",
                "Monitor competitor offerings during development",
            ],
        ),
    ]
}

fn operational_factors(requirement: &Requirement, plan: &Plan) -> Vec<FeasibilityFactor> {
    vec![
        factor(
            "Resource Availability",
            70,
            format!(
                "The plan calls for {} roles; specialist skills may need to be sourced externally.",
                plan.resource_allocation.len()
            ),
            [
                "Confirm vendor staffing commitments in the proposal",
                "Name an internal product owner early",
            ],
        ),
        factor(
            "Organizational Readiness",
            65,
            format!(
                "{} will need to adapt existing workflows to the new solution.",
                non_blank(&requirement.company, "The organisation")
            ),
            [
                "Appoint change champions in affected teams",
                "Communicate the roadmap to staff before launch",
            ],
        ),
        factor(
            "Process Impact",
            75,
            format!(
                "Addressing the problem ({}) changes day-to-day processes for end users.",
                non_blank(&requirement.problem_statement, "[problem statement]")
            ),
            [
                "Map current and future processes before design",
                "Schedule user training ahead of deployment",
            ],
        ),
        factor(
            "Regulatory Compliance",
            80,
            format!(
                "Applicable requirements: {}. These are achievable with standard controls.",
                requirement.compliance()
            ),
            [
                "Involve legal review in requirements sign-off",
                "Keep compliance evidence throughout delivery",
            ],
        ),
    ]
}
