//! Counseling pipeline — runs the three stages in strict sequence.
//!
//! Flow: brief → ProfileStage → UniversityStage → PlanStage → report.
//!
//! A failed stage never halts the run. Its sentinel is kept in the report and
//! the next stage receives an empty record instead.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::counseling::plan_stage::{PlanStage, TimeHorizon};
use crate::counseling::profile_stage::ProfileStage;
use crate::counseling::summary::render_markdown;
use crate::counseling::university_stage::UniversityStage;
use crate::counseling::StageResult;
use crate::extraction::ExtractionFailure;
use crate::llm_client::TextGenerator;
use crate::models::{ActionPlan, StudentProfile, UniversityRecommendationSet};

/// Wire form of a stage result: the record itself, or the failure object
/// (`{"error": "...", "detail": "...", "raw_text": "..."}`).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StageOutcome<T> {
    Ready(T),
    Failed(ExtractionFailure),
}

impl<T> From<StageResult<T>> for StageOutcome<T> {
    fn from(result: StageResult<T>) -> Self {
        match result {
            Ok(value) => StageOutcome::Ready(value),
            Err(failure) => StageOutcome::Failed(failure),
        }
    }
}

impl<T> StageOutcome<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            StageOutcome::Ready(value) => Some(value),
            StageOutcome::Failed(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&ExtractionFailure> {
        match self {
            StageOutcome::Ready(_) => None,
            StageOutcome::Failed(failure) => Some(failure),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CounselingReport {
    pub request_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub time_horizon: TimeHorizon,
    pub profile: StageOutcome<StudentProfile>,
    pub universities: StageOutcome<UniversityRecommendationSet>,
    pub plan: StageOutcome<ActionPlan>,
    /// Markdown rendering with placeholders for anything missing.
    pub summary: String,
}

/// The three stages, each owning a handle to the same generator.
pub struct Counselor {
    profile: ProfileStage,
    universities: UniversityStage,
    plan: PlanStage,
}

impl Counselor {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            profile: ProfileStage::new(generator.clone()),
            universities: UniversityStage::new(generator.clone()),
            plan: PlanStage::new(generator),
        }
    }

    pub fn profile_stage(&self) -> &ProfileStage {
        &self.profile
    }

    pub fn university_stage(&self) -> &UniversityStage {
        &self.universities
    }

    pub fn plan_stage(&self) -> &PlanStage {
        &self.plan
    }

    /// Runs profile → universities → plan for one student brief.
    pub async fn run(&self, brief: &str) -> CounselingReport {
        let request_id = Uuid::new_v4();
        let span = info_span!("counsel", %request_id);
        self.run_stages(request_id, brief).instrument(span).await
    }

    async fn run_stages(&self, request_id: Uuid, brief: &str) -> CounselingReport {
        info!("Counseling run started ({} chars of input)", brief.len());

        let profile = self.profile.analyze(brief).await;
        let profile_input = degrade("profile", &profile);

        let universities = self.universities.recommend(&profile_input).await;
        let universities_input = degrade("universities", &universities);

        let plan = self
            .plan
            .generate_plan(&profile_input, &universities_input)
            .await;
        if let Err(failure) = &plan {
            warn!("plan stage failed: {:?}", failure.error);
        }

        let time_horizon = TimeHorizon::from_grade(profile_input.grade());
        let summary = render_markdown(
            &profile_input,
            &universities_input,
            plan.as_ref().ok(),
            time_horizon,
        );

        let report = CounselingReport {
            request_id,
            generated_at: Utc::now(),
            time_horizon,
            profile: profile.into(),
            universities: universities.into(),
            plan: plan.into(),
            summary,
        };

        info!(
            "Counseling run finished: profile_ok={} universities_ok={} plan_ok={}",
            report.profile.ready().is_some(),
            report.universities.ready().is_some(),
            report.plan.ready().is_some()
        );
        report
    }
}

/// The record a later stage should consume: the real one, or an empty default.
fn degrade<T: Clone + Default>(stage: &str, result: &StageResult<T>) -> T {
    match result {
        Ok(value) => value.clone(),
        Err(failure) => {
            warn!(
                "{stage} stage failed ({:?}); continuing with an empty record",
                failure.error
            );
            T::default()
        }
    }
}
