//! RFP assembly: remote generation with a deterministic local fallback.
//!
//! The local document always uses the seven-section standard template. The requested
//! document type is recorded on the result unchanged; only the remote path varies the
//! section set by type.

use crate::generation::dispatcher::{dispatch, Generated, RemoteRequest};
use crate::generation::prompts::{rfp_prompt, rfp_schema, RFP_FUNCTION};
use crate::llm_client::RemoteGenerator;
use crate::models::{
    non_blank, DocumentType, FeasibilityStudy, Plan, Requirement, RfpDocument, RfpSection,
    RfpSubsection,
};

/// Generates an RFP remotely, falling back to [`assemble_rfp`].
pub async fn generate_rfp(
    remote: &dyn RemoteGenerator,
    requirement: &Requirement,
    plan: &Plan,
    study: &FeasibilityStudy,
    document_type: DocumentType,
) -> Generated<RfpDocument> {
    let request = RemoteRequest {
        prompt: rfp_prompt(requirement, plan, study, &document_type),
        schema: rfp_schema(),
        operation: RFP_FUNCTION,
    };
    dispatch(remote, request, || {
        assemble_rfp(requirement, plan, study, document_type)
    })
    .await
}

/// Local RFP document. Blank inputs become bracketed placeholders.
pub fn assemble_rfp(
    requirement: &Requirement,
    plan: &Plan,
    study: &FeasibilityStudy,
    document_type: DocumentType,
) -> RfpDocument {
    let project = non_blank(&requirement.name, "[project name]");
    let company = non_blank(&requirement.company, "[company name]");

    let sections = vec![
        section(
            "Introduction",
            format!(
                "{company} invites qualified vendors to submit proposals for the {project} project. \
                This document describes the requirements, scope and evaluation process."
            ),
            vec![
                subsection(
                    "Company Background",
                    format!(
                        "{company} operates in the {} industry.",
                        non_blank(&requirement.industry, "[industry]")
                    ),
                ),
                subsection(
                    "Problem Statement",
                    non_blank(&requirement.problem_statement, "[problem statement]").to_string(),
                ),
                subsection(
                    "Project Objective",
                    non_blank(&requirement.objective, "[objective]").to_string(),
                ),
            ],
        ),
        section(
            "Requirements Specification",
            "Proposals must address every requirement listed below.".to_string(),
            vec![
                subsection(
                    "Functional Requirements",
                    format!(
                        "Key features: {}",
                        non_blank(&requirement.key_features, "[key features]")
                    ),
                ),
                subsection(
                    "Technical Requirements",
                    format!("Preferred technologies: {}", requirement.technologies()),
                ),
                subsection(
                    "Compliance Requirements",
                    format!(
                        "The solution must comply with: {}",
                        requirement.compliance()
                    ),
                ),
            ],
        ),
        section(
            "Project Scope",
            format!(
                "The selected vendor will deliver {}.",
                non_blank(&requirement.solution_description, "[solution description]")
            ),
            vec![
                subsection(
                    "Target Users",
                    non_blank(&requirement.target_users, "[target users]").to_string(),
                ),
                subsection("Milestones", milestone_lines(plan)),
            ],
        ),
        section(
            "Budget and Timeline",
            format!(
                "The project is expected to run for {} starting {}.",
                non_blank(&plan.duration, "[duration]"),
                non_blank(&plan.start_date, "[start date]")
            ),
            vec![
                subsection(
                    "Budget",
                    format!(
                        "Budget range: {}. Internal cost estimate: {}.",
                        non_blank(&requirement.budget_range, "[budget range]"),
                        non_blank(&plan.estimated_cost, "[estimated cost]")
                    ),
                ),
                subsection(
                    "Timeline",
                    format!(
                        "Requested timeline: {}.",
                        non_blank(&requirement.timeline, "[timeline]")
                    ),
                ),
            ],
        ),
        section(
            "Proposal Requirements",
            "Each proposal must contain the following parts.".to_string(),
            vec![
                subsection(
                    "Technical Proposal",
                    "Solution architecture, technology choices, delivery methodology and \
                    a project plan aligned with the milestones above."
                        .to_string(),
                ),
                subsection(
                    "Financial Proposal",
                    "A fixed price per milestone with rates for change requests, in the \
                    same currency as the budget range."
                        .to_string(),
                ),
                subsection(
                    "Company Profile",
                    "Relevant experience, team CVs and at least three client references."
                        .to_string(),
                ),
            ],
        ),
        section(
            "Evaluation Criteria",
            format!(
                "Our feasibility assessment scored this project {}/100 (technical {}, \
                financial {}, operational {}). {}",
                study.overall_score,
                study.technical_score,
                study.financial_score,
                study.operational_score,
                non_blank(&study.recommendation, "[recommendation]")
            ),
            vec![
                subsection(
                    "Technical Evaluation",
                    "Solution fit, architecture quality and delivery approach: 50%.".to_string(),
                ),
                subsection(
                    "Financial Evaluation",
                    "Total cost of ownership and pricing clarity: 30%.".to_string(),
                ),
                subsection(
                    "Vendor Capability",
                    "Experience, references and team composition: 20%.".to_string(),
                ),
            ],
        ),
        section(
            "Submission Process",
            "Proposals must be submitted electronically by [submission deadline].".to_string(),
            vec![
                subsection(
                    "Contact Information",
                    format!(
                        "Direct all questions and submissions to {}.",
                        non_blank(&requirement.contact_email, "[contact email]")
                    ),
                ),
                subsection(
                    "Submission Format",
                    "A single PDF for the technical proposal and a separate PDF for the \
                    financial proposal."
                        .to_string(),
                ),
            ],
        ),
    ];

    RfpDocument {
        document_type,
        sections,
    }
}

/// One line per milestone, in plan order.
fn milestone_lines(plan: &Plan) -> String {
    if plan.milestones.is_empty() {
        return "[milestones to be confirmed]".to_string();
    }
    plan.milestones
        .iter()
        .enumerate()
        .map(|(i, m)| format!("- Milestone {}: {} ({})", i + 1, m.name, m.description))
        .collect::<Vec<_>>()
        .join("\n")
}

fn section(title: &str, content: String, subsections: Vec<RfpSubsection>) -> RfpSection {
    RfpSection {
        title: title.to_string(),
        content,
        subsections,
    }
}

fn subsection(title: &str, content: String) -> RfpSubsection {
    RfpSubsection {
        title: title.to_string(),
        content,
    }
}
