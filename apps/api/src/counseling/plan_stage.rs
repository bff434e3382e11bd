//! Plan Stage — profile + recommendations → `ActionPlan`.
//!
//! The only branching in the pipeline lives here: the time horizon is derived
//! from the numeric grade before the prompt is built.

use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use crate::counseling::prompts::{fill_template, PLAN_PROMPT_TEMPLATE};
use crate::counseling::university_stage::profile_json;
use crate::counseling::{complete_json, StageResult};
use crate::llm_client::prompts::JSON_ONLY_INSTRUCTION;
use crate::llm_client::TextGenerator;
use crate::models::{ActionPlan, Grade, StudentProfile, UniversityRecommendationSet};

/// Grade assumed when the profile has none or it is not numeric.
pub const DEFAULT_GRADE: i64 = 11;
/// Final-year grade: at or above this, less than one academic year remains.
pub const FINAL_YEAR_GRADE: i64 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeHorizon {
    Urgent,
    Strategic,
}

impl TimeHorizon {
    pub fn from_grade(grade: Option<&Grade>) -> Self {
        let grade = grade.and_then(Grade::as_number).unwrap_or(DEFAULT_GRADE);
        if grade >= FINAL_YEAR_GRADE {
            TimeHorizon::Urgent
        } else {
            TimeHorizon::Strategic
        }
    }

    pub fn describe(self) -> &'static str {
        match self {
            TimeHorizon::Urgent => "Urgent (less than 1 academic year remaining)",
            TimeHorizon::Strategic => "Strategic (1-2 years remaining)",
        }
    }
}

pub struct PlanStage {
    generator: Arc<dyn TextGenerator>,
}

impl PlanStage {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Builds the action plan against the reach bucket only. Every reach entry
    /// is used, however many the previous stage returned.
    pub async fn generate_plan(
        &self,
        profile: &StudentProfile,
        recommendations: &UniversityRecommendationSet,
    ) -> StageResult<ActionPlan> {
        let horizon = TimeHorizon::from_grade(profile.grade());
        let prompt = build_plan_prompt(profile, recommendations, horizon);
        let plan: ActionPlan = complete_json(self.generator.as_ref(), "plan", &prompt).await?;

        info!(
            "Action plan built: horizon={:?}, {} timeline periods",
            horizon,
            plan.timeline().len()
        );
        Ok(plan)
    }
}

fn build_plan_prompt(
    profile: &StudentProfile,
    recommendations: &UniversityRecommendationSet,
    horizon: TimeHorizon,
) -> String {
    let reach = recommendations.reach_names();
    let reach_universities = if reach.is_empty() {
        "None identified yet; aim at the most selective fit for this profile.".to_string()
    } else {
        reach.join(", ")
    };

    fill_template(
        PLAN_PROMPT_TEMPLATE,
        &[
            ("profile_json", profile_json(profile).as_str()),
            ("reach_universities", reach_universities.as_str()),
            ("time_horizon", horizon.describe()),
            ("json_only", JSON_ONLY_INSTRUCTION),
        ],
    )
}
