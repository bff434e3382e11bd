//! Profile Stage — free-text self-description → `StudentProfile`.

use std::sync::Arc;

use tracing::info;

use crate::counseling::prompts::{fill_template, PROFILE_PROMPT_TEMPLATE};
use crate::counseling::{complete_json, StageResult};
use crate::llm_client::prompts::JSON_ONLY_INSTRUCTION;
use crate::llm_client::TextGenerator;
use crate::models::StudentProfile;

pub struct ProfileStage {
    generator: Arc<dyn TextGenerator>,
}

impl ProfileStage {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Extracts a structured profile. The input is embedded verbatim; section
    /// labels in it are interpreted by the model, not parsed here.
    pub async fn analyze(&self, user_input: &str) -> StageResult<StudentProfile> {
        let prompt = build_profile_prompt(user_input);
        let profile: StudentProfile =
            complete_json(self.generator.as_ref(), "profile", &prompt).await?;

        info!(
            "Profile extracted: {} interests, budget={:?}",
            profile.interests().len(),
            profile.budget_tier()
        );
        Ok(profile)
    }
}

fn build_profile_prompt(user_input: &str) -> String {
    fill_template(
        PROFILE_PROMPT_TEMPLATE,
        &[
            ("user_input", user_input.trim()),
            ("json_only", JSON_ONLY_INSTRUCTION),
        ],
    )
}
