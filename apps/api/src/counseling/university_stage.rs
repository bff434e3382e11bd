//! University Stage — `StudentProfile` → reach / target / safe recommendations.

use std::sync::Arc;

use tracing::info;

use crate::counseling::catalog::UNIVERSITY_CATALOG;
use crate::counseling::prompts::{fill_template, UNIVERSITY_PROMPT_TEMPLATE};
use crate::counseling::{complete_json, StageResult};
use crate::llm_client::prompts::JSON_ONLY_INSTRUCTION;
use crate::llm_client::TextGenerator;
use crate::models::{StudentProfile, UniversityRecommendationSet};

pub struct UniversityStage {
    generator: Arc<dyn TextGenerator>,
}

impl UniversityStage {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Recommends universities from the reference catalog. An empty profile is
    /// still sent; the model decides what to do with it. Bucket sizes are
    /// returned as-is.
    pub async fn recommend(&self, profile: &StudentProfile) -> StageResult<UniversityRecommendationSet> {
        let prompt = build_university_prompt(profile);
        let set: UniversityRecommendationSet =
            complete_json(self.generator.as_ref(), "universities", &prompt).await?;

        info!(
            "Recommendations: {} total (reach={} target={} safe={})",
            set.total(),
            set.reach.len(),
            set.target.len(),
            set.safe.len()
        );
        Ok(set)
    }
}

fn build_university_prompt(profile: &StudentProfile) -> String {
    fill_template(
        UNIVERSITY_PROMPT_TEMPLATE,
        &[
            ("catalog", UNIVERSITY_CATALOG),
            ("profile_json", profile_json(profile).as_str()),
            ("json_only", JSON_ONLY_INSTRUCTION),
        ],
    )
}

/// Pretty JSON of the profile for embedding in prompts.
pub(crate) fn profile_json(profile: &StudentProfile) -> String {
    // Plain strings, vectors and numbers only; serialization cannot fail.
    serde_json::to_string_pretty(profile).unwrap_or_else(|_| "{}".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::{extract, FailureKind};
    use crate::llm_client::testing::ScriptedGenerator;

    #[test]
    fn test_prompt_embeds_catalog_profile_and_tier_definitions() {
        let profile = StudentProfile {
            name: Some("Ravi".to_string()),
            interests: vec!["Robotics".to_string()],
            ..Default::default()
        };
        let prompt = build_university_prompt(&profile);

        assert!(prompt.contains("KAIST (South Korea)"));
        assert!(prompt.contains("\"name\": \"Ravi\""));
        assert!(prompt.contains("REACH: admission is unlikely"));
        assert!(prompt.contains("TARGET: a good fit"));
        assert!(prompt.contains("SAFE: admission is likely"));
        assert!(prompt.contains("exactly 3 universities"));
    }

    #[test]
    fn test_prompt_tolerates_empty_profile() {
        let prompt = build_university_prompt(&StudentProfile::default());
        assert!(prompt.contains("STUDENT PROFILE:"));
        assert!(!prompt.contains("{profile_json}"));
    }

    #[tokio::test]
    async fn test_recommend_parses_fenced_reply() {
        let generator = Arc::new(ScriptedGenerator::replying(&[
            "Here is the result:\n```json\n{\"reach\": [{\"name\": \"MIT\", \"reason\": \"Elite\"}], \"target\": [], \"safe\": []}\n```\nHope that helps!",
        ]));
        let set = UniversityStage::new(generator)
            .recommend(&StudentProfile::default())
            .await
            .unwrap();

        assert_eq!(set.reach_names(), vec!["MIT"]);
        assert!(set.target.is_empty());
        assert!(set.safe.is_empty());
    }

    #[tokio::test]
    async fn test_recommend_does_not_truncate_extra_entries() {
        let generator = Arc::new(ScriptedGenerator::replying(&[r#"{
            "reach": [{"name": "MIT"}, {"name": "Stanford"}],
            "target": [{"name": "Georgia Tech"}, {"name": "University of Toronto"}],
            "safe": [{"name": "KTH"}]
        }"#]));
        let set = UniversityStage::new(generator)
            .recommend(&StudentProfile::default())
            .await
            .unwrap();
        assert_eq!(set.total(), 5);
    }

    #[tokio::test]
    async fn test_recommend_passes_sentinel_through_without_panicking() {
        let raw = "I could not process this request.";
        let generator = Arc::new(ScriptedGenerator::replying(&[raw]));
        let failure = UniversityStage::new(generator)
            .recommend(&StudentProfile::default())
            .await
            .unwrap_err();

        assert_eq!(failure.error, FailureKind::JsonParseFailed);
        assert_eq!(Err(failure), extract(raw));
    }
}
