// Prompt templates and JSON schemas for the remote generation path.
// Builders fill `{placeholder}` slots in a single pass; the shared system prompt lives in llm_client::prompts.

use serde_json::{json, Value};

use crate::models::{DocumentType, FeasibilityStudy, Plan, Requirement};

pub const PLAN_FUNCTION: &str = "generate_project_plan";
pub const FEASIBILITY_FUNCTION: &str = "generate_feasibility_study";
pub const RFP_FUNCTION: &str = "generate_rfp_document";

/// Requirement block shared by all three prompts.
const REQUIREMENT_BLOCK: &str = r#"PROJECT REQUIREMENTS:
- Project Name: {name}
- Company: {company}
- Industry: {industry}
- Problem Statement: {problem_statement}
- Objective: {objective}
- Solution Description: {solution_description}
- Target Users: {target_users}
- Key Features: {key_features}
- Preferred Technologies: {technologies}
- Compliance Requirements: {compliance}
- Budget Range: {budget_range}
- Timeline: {timeline}"#;

const PLAN_PROMPT_TEMPLATE: &str = r#"Create a detailed project plan for the software project below, covering milestones, resource allocation and risk assessment.

{requirements}

Milestones must cover kickoff, requirements gathering, design, development, testing, deployment and project closure, with realistic target dates for the stated timeline.
Resource roles must include at least a Project Manager and a Business Analyst.
Risk categories should include Schedule, Budget, Technical, Resources and Compliance, each with probability and impact of Low, Medium or High.
Projects in finance and healthcare usually cost more because of compliance work; reflect that in the estimated cost."#;

const FEASIBILITY_PROMPT_TEMPLATE: &str = r#"Produce a feasibility study (technical, financial and operational) for the software project below.

{requirements}

PROJECT PLAN:
- Project Type: {project_type}
- Estimated Duration: {duration}
- Estimated Cost: {estimated_cost}
- Number of Milestones: {milestone_count}
- Number of Resources: {resource_count}
- Identified Risks: {risk_categories}

Technical factors: Technology Stack, Integration Complexity, Technical Expertise Required, Scalability, Security Requirements.
Financial factors: Budget Adequacy, Return on Investment, Cost Certainty, Funding Availability, Financial Risk.
Operational factors: Timeline Feasibility, Resource Availability, Organizational Readiness, Change Management, Operational Risk.

Scores are 0-100:
- 0-50: critical issues, very high risk
- 51-65: significant issues, high risk
- 66-75: moderate issues, medium risk
- 76-85: minor issues, low risk
- 86-100: no significant issues

Each category score is the average of its factor scores. The overall score weights technical 35%, financial 40% and operational 25%.
Set financialData.estimatedCost to "{estimated_cost}". Consider the specific challenges of the {industry} industry."#;

const RFP_PROMPT_TEMPLATE: &str = r#"Write a Request for Proposal for the software project below, following local procurement practice.

{requirements}

PROJECT PLAN:
- Project Type: {project_type}
- Estimated Duration: {duration}
- Estimated Cost: {estimated_cost}

FEASIBILITY STUDY:
- Overall Score: {overall_score}%
- Technical Score: {technical_score}%
- Financial Score: {financial_score}%
- Operational Score: {operational_score}%
- Recommendation: {recommendation}

Document type: {document_type_upper}. Set documentType to "{document_type}".

Include these sections, in order:
{section_list}

Subsections may be used inside a section but must not nest further. Include compliance requirements relevant to the {industry} industry."#;

const STANDARD_SECTIONS: &[&str] = &[
    "Introduction and Background",
    "Project Objectives",
    "Scope of Work",
    "Requirements Specification",
    "Evaluation Criteria",
    "Submission Guidelines",
    "Timeline and Milestones",
    "Terms and Conditions",
    "Appendices",
];

const GOVERNMENT_SECTIONS: &[&str] = &[
    "Official Tender Notice",
    "Background and Purpose",
    "Scope of Work",
    "Technical Requirements",
    "BBBEE and Transformation Requirements",
    "Evaluation Process and Criteria",
    "Mandatory Compliance Requirements",
    "Submission Instructions",
    "General Conditions of Contract",
    "Special Conditions of Contract",
];

const SIMPLIFIED_SECTIONS: &[&str] = &[
    "Project Overview",
    "Requirements",
    "Deliverables",
    "Evaluation Criteria",
    "Timeline",
    "How to Submit",
];

// ────────────────────────────────────────────────────────────────────────────
// Prompt builders
// ────────────────────────────────────────────────────────────────────────────

/// Fills `{slot}` markers in one left-to-right pass. Substituted text is never rescanned,
/// so user input containing braces stays as typed. Unknown slots are left in place.
fn fill_slots(template: &str, slots: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open..];
        let filled = tail.find('}').and_then(|close| {
            let key = &tail[1..close];
            slots
                .iter()
                .find(|(slot, _)| *slot == key)
                .map(|(_, value)| (*value, close))
        });
        match filled {
            Some((value, close)) => {
                out.push_str(value);
                rest = &tail[close + 1..];
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

fn requirement_block(requirement: &Requirement) -> String {
    fill_slots(
        REQUIREMENT_BLOCK,
        &[
            ("name", requirement.name.as_str()),
            ("company", requirement.company.as_str()),
            ("industry", requirement.industry.as_str()),
            ("problem_statement", requirement.problem_statement.as_str()),
            ("objective", requirement.objective.as_str()),
            ("solution_description", requirement.solution_description.as_str()),
            ("target_users", requirement.target_users.as_str()),
            ("key_features", requirement.key_features.as_str()),
            ("technologies", requirement.technologies()),
            ("compliance", requirement.compliance()),
            ("budget_range", requirement.budget_range.as_str()),
            ("timeline", requirement.timeline.as_str()),
        ],
    )
}

pub fn plan_prompt(requirement: &Requirement) -> String {
    fill_slots(
        PLAN_PROMPT_TEMPLATE,
        &[("requirements", requirement_block(requirement).as_str())],
    )
}

pub fn feasibility_prompt(requirement: &Requirement, plan: &Plan) -> String {
    let risk_categories = plan
        .risk_assessment
        .iter()
        .map(|r| r.category.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    let milestone_count = plan.milestones.len().to_string();
    let resource_count = plan.resource_allocation.len().to_string();

    fill_slots(
        FEASIBILITY_PROMPT_TEMPLATE,
        &[
            ("requirements", requirement_block(requirement).as_str()),
            ("project_type", plan.project_type.as_str()),
            ("duration", plan.duration.as_str()),
            ("estimated_cost", plan.estimated_cost.as_str()),
            ("milestone_count", milestone_count.as_str()),
            ("resource_count", resource_count.as_str()),
            ("risk_categories", risk_categories.as_str()),
            ("industry", requirement.industry.as_str()),
        ],
    )
}

/// Section titles requested from the model for each document type.
/// Unknown types get the standard list.
pub fn section_titles(document_type: &DocumentType) -> &'static [&'static str] {
    match document_type {
        DocumentType::Government => GOVERNMENT_SECTIONS,
        DocumentType::Simplified => SIMPLIFIED_SECTIONS,
        DocumentType::Standard | DocumentType::Other(_) => STANDARD_SECTIONS,
    }
}

pub fn rfp_prompt(
    requirement: &Requirement,
    plan: &Plan,
    study: &FeasibilityStudy,
    document_type: &DocumentType,
) -> String {
    let section_list = section_titles(document_type)
        .iter()
        .enumerate()
        .map(|(i, title)| format!("{}. {title}", i + 1))
        .collect::<Vec<_>>()
        .join("\n");
    let scores = [
        study.overall_score,
        study.technical_score,
        study.financial_score,
        study.operational_score,
    ]
    .map(|score| score.to_string());
    let document_type_upper = document_type.as_str().to_uppercase();

    fill_slots(
        RFP_PROMPT_TEMPLATE,
        &[
            ("requirements", requirement_block(requirement).as_str()),
            ("project_type", plan.project_type.as_str()),
            ("duration", plan.duration.as_str()),
            ("estimated_cost", plan.estimated_cost.as_str()),
            ("overall_score", scores[0].as_str()),
            ("technical_score", scores[1].as_str()),
            ("financial_score", scores[2].as_str()),
            ("operational_score", scores[3].as_str()),
            ("recommendation", study.recommendation.as_str()),
            ("document_type_upper", document_type_upper.as_str()),
            ("document_type", document_type.as_str()),
            ("section_list", section_list.as_str()),
            ("industry", requirement.industry.as_str()),
        ],
    )
}

// ────────────────────────────────────────────────────────────────────────────
// Function-calling schemas
// ────────────────────────────────────────────────────────────────────────────

fn string_list() -> Value {
    json!({"type": "array", "items": {"type": "string"}})
}

fn factor_list() -> Value {
    json!({
        "type": "array",
        "items": {
            "type": "object",
            "properties": {
                "factor": {"type": "string"},
                "score": {"type": "integer", "minimum": 0, "maximum": 100},
                "analysis": {"type": "string"},
                "recommendations": string_list()
            },
            "required": ["factor", "score", "analysis", "recommendations"]
        }
    })
}

pub fn plan_schema() -> Value {
    let level = json!({"type": "string", "enum": ["Low", "Medium", "High"]});
    json!({
        "type": "object",
        "properties": {
            "projectName": {"type": "string"},
            "projectType": {"type": "string"},
            "industry": {"type": "string"},
            "duration": {"type": "string"},
            "startDate": {"type": "string"},
            "estimatedCost": {"type": "string"},
            "milestones": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "name": {"type": "string"},
                        "description": {"type": "string"},
                        "targetDate": {"type": "string"},
                        "progress": {"type": "integer", "minimum": 0, "maximum": 100}
                    },
                    "required": ["name", "description", "targetDate", "progress"]
                }
            },
            "resourceAllocation": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "role": {"type": "string"},
                        "allocation": {"type": "string"},
                        "notes": {"type": "string"}
                    },
                    "required": ["role", "allocation", "notes"]
                }
            },
            "riskAssessment": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "category": {"type": "string"},
                        "probability": level,
                        "impact": level,
                        "mitigationStrategy": {"type": "string"}
                    },
                    "required": ["category", "probability", "impact", "mitigationStrategy"]
                }
            }
        },
        "required": [
            "projectName", "projectType", "industry", "duration", "startDate",
            "estimatedCost", "milestones", "resourceAllocation", "riskAssessment"
        ]
    })
}

pub fn feasibility_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "overallScore": {"type": "integer", "minimum": 0, "maximum": 100},
            "technicalScore": {"type": "integer", "minimum": 0, "maximum": 100},
            "financialScore": {"type": "integer", "minimum": 0, "maximum": 100},
            "operationalScore": {"type": "integer", "minimum": 0, "maximum": 100},
            "recommendation": {"type": "string"},
            "nextSteps": string_list(),
            "technicalFactors": factor_list(),
            "financialFactors": factor_list(),
            "financialData": {
                "type": "object",
                "properties": {
                    "estimatedCost": {"type": "string"},
                    "projectedRoi": {"type": "string"},
                    "paybackPeriod": {"type": "string"}
                },
                "required": ["estimatedCost", "projectedRoi", "paybackPeriod"]
            },
            "operationalFactors": factor_list()
        },
        "required": [
            "overallScore", "technicalScore", "financialScore", "operationalScore",
            "recommendation", "nextSteps", "technicalFactors", "financialFactors",
            "financialData", "operationalFactors"
        ]
    })
}

pub fn rfp_schema() -> Value {
    let text_block = json!({
        "type": "object",
        "properties": {
            "title": {"type": "string"},
            "content": {"type": "string"}
        },
        "required": ["title", "content"]
    });
    json!({
        "type": "object",
        "properties": {
            "documentType": {"type": "string"},
            "sections": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "title": {"type": "string"},
                        "content": {"type": "string"},
                        "subsections": {"type": "array", "items": text_block}
                    },
                    "required": ["title", "content"]
                }
            }
        },
        "required": ["documentType", "sections"]
    })
}
