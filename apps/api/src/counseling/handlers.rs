//! Axum route handlers for the Counseling API.

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::counseling::intake::IntakeForm;
use crate::counseling::pipeline::{CounselingReport, StageOutcome};
use crate::errors::AppError;
use crate::models::lenient;
use crate::models::{ActionPlan, StudentProfile, UniversityRecommendationSet};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

/// Accepts a profile in any shape, including a failure object from an
/// earlier call; whatever does not decode is treated as an empty profile.
#[derive(Debug, Deserialize)]
pub struct RecommendRequest {
    #[serde(default, deserialize_with = "lenient::record")]
    pub profile: Option<StudentProfile>,
}

#[derive(Debug, Deserialize)]
pub struct PlanRequest {
    #[serde(default, deserialize_with = "lenient::record")]
    pub profile: Option<StudentProfile>,
    #[serde(default, deserialize_with = "lenient::record")]
    pub recommendations: Option<UniversityRecommendationSet>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/counsel
///
/// Full pipeline: profile → universities → plan. Stage failures are reported
/// inside the body; the response is 200 whenever the form is valid.
pub async fn handle_counsel(
    State(state): State<AppState>,
    Json(form): Json<IntakeForm>,
) -> Result<Json<CounselingReport>, AppError> {
    form.validate()?;
    let report = state.counselor.run(&form.compose_brief()).await;
    Ok(Json(report))
}

/// POST /api/v1/counsel/profile
pub async fn handle_profile(
    State(state): State<AppState>,
    Json(form): Json<IntakeForm>,
) -> Result<Json<StageOutcome<StudentProfile>>, AppError> {
    form.validate()?;
    let profile = state
        .counselor
        .profile_stage()
        .analyze(&form.compose_brief())
        .await;
    Ok(Json(profile.into()))
}

/// POST /api/v1/counsel/universities
pub async fn handle_universities(
    State(state): State<AppState>,
    Json(request): Json<RecommendRequest>,
) -> Json<StageOutcome<UniversityRecommendationSet>> {
    let profile = request.profile.unwrap_or_default();
    let set = state.counselor.university_stage().recommend(&profile).await;
    Json(set.into())
}

/// POST /api/v1/counsel/plan
pub async fn handle_plan(
    State(state): State<AppState>,
    Json(request): Json<PlanRequest>,
) -> Json<StageOutcome<ActionPlan>> {
    let profile = request.profile.unwrap_or_default();
    let recommendations = request.recommendations.unwrap_or_default();
    let plan = state
        .counselor
        .plan_stage()
        .generate_plan(&profile, &recommendations)
        .await;
    Json(plan.into())
}
