// Counseling pipeline: profile → universities → action plan.
// Each stage issues exactly one generation call through llm_client::TextGenerator
// and normalizes the response with extraction::extract_record.

pub mod catalog;
pub mod handlers;
pub mod intake;
pub mod pipeline;
pub mod plan_stage;
pub mod profile_stage;
pub mod prompts;
pub mod summary;
pub mod university_stage;

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::extraction::{extract_record, ExtractionFailure};
use crate::llm_client::TextGenerator;

/// A stage either yields its record or the sentinel describing why it could not.
pub type StageResult<T> = Result<T, ExtractionFailure>;

/// Sends one prompt and decodes the reply. Provider errors and unparseable
/// replies come back as the same `ExtractionFailure` shape.
async fn complete_json<T>(generator: &dyn TextGenerator, stage: &str, prompt: &str) -> StageResult<T>
where
    T: DeserializeOwned + Default,
{
    debug!("{stage} prompt: {} chars", prompt.len());

    let raw = generator.generate(prompt).await.map_err(|e| {
        warn!("{stage} generation call failed: {e}");
        ExtractionFailure::provider(&e)
    })?;

    extract_record::<T>(&raw).inspect_err(|failure| {
        warn!("{stage} response was not JSON: {}", failure.detail);
    })
}
