//! Axum route handlers for the Generation API.
//!
//! Every handler answers 200 with `{data, usedFallback}`. Only unreadable request
//! bodies are rejected, by the `AppError` conversion from `JsonRejection`.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::Deserialize;

use crate::errors::AppError;
use crate::generation::dispatcher::Generated;
use crate::generation::feasibility::generate_feasibility;
use crate::generation::plan::generate_plan;
use crate::generation::rfp::generate_rfp;
use crate::models::{DocumentType, FeasibilityStudy, Plan, Requirement, RfpDocument};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeasibilityRequest {
    pub project_requirement: Requirement,
    pub project_plan: Plan,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RfpRequest {
    pub project_requirement: Requirement,
    pub project_plan: Plan,
    pub feasibility_study: FeasibilityStudy,
    #[serde(default)]
    pub document_type: Option<DocumentType>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/project-plan/generate
pub async fn handle_generate_plan(
    State(state): State<AppState>,
    payload: Result<Json<Requirement>, JsonRejection>,
) -> Result<Json<Generated<Plan>>, AppError> {
    let Json(requirement) = payload?;
    tracing::info!("Generating project plan for {:?}", requirement.name);

    let result = generate_plan(
        state.remote.as_ref(),
        &requirement,
        &state.config.plan_defaults,
    )
    .await;

    Ok(Json(result))
}

/// POST /api/feasibility/generate
pub async fn handle_generate_feasibility(
    State(state): State<AppState>,
    payload: Result<Json<FeasibilityRequest>, JsonRejection>,
) -> Result<Json<Generated<FeasibilityStudy>>, AppError> {
    let Json(request) = payload?;
    tracing::info!(
        "Generating feasibility study for {:?}",
        request.project_requirement.name
    );

    let result = generate_feasibility(
        state.remote.as_ref(),
        &request.project_requirement,
        &request.project_plan,
    )
    .await;

    Ok(Json(result))
}

/// POST /api/rfp/generate
///
/// `documentType` defaults to "standard" when absent.
pub async fn handle_generate_rfp(
    State(state): State<AppState>,
    payload: Result<Json<RfpRequest>, JsonRejection>,
) -> Result<Json<Generated<RfpDocument>>, AppError> {
    let Json(request) = payload?;
    let document_type = request.document_type.unwrap_or_default();
    tracing::info!(
        "Generating {} RFP for {:?}",
        document_type,
        request.project_requirement.name
    );

    let result = generate_rfp(
        state.remote.as_ref(),
        &request.project_requirement,
        &request.project_plan,
        &request.feasibility_study,
        document_type,
    )
    .await;

    Ok(Json(result))
}
