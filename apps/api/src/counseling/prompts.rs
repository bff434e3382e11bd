// All LLM prompt templates for the counseling pipeline.
// Placeholders are `{name}` tokens replaced by the stage that owns the template.
// Reuses cross-cutting fragments from llm_client::prompts.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{([a-z_]+)\}").expect("valid placeholder regex"));

/// Fills every `{name}` token in one pass. Substituted values are never
/// rescanned, so user or model text that looks like a token stays literal.
/// Unknown tokens are left as they are.
pub fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures| {
            values
                .iter()
                .find(|(key, _)| *key == &caps[1])
                .map(|(_, value)| Cow::Borrowed(*value))
                .unwrap_or_else(|| Cow::Owned(caps[0].to_string()))
        })
        .into_owned()
}

/// Profile Stage. Replace: {user_input}, {json_only}
pub const PROFILE_PROMPT_TEMPLATE: &str = r#"You are an expert academic counselor.
Analyze the following student description and extract a structured profile.
The description may contain labeled sections (ACADEMICS, INTERESTS, BUDGET CONSTRAINT, PREFERENCES); use them to infer each field.

STUDENT DESCRIPTION:
"{user_input}"

Return a JSON object with this EXACT structure:
{
  "name": "Student name (or \"Student\" if not found)",
  "grade": 11,
  "interests": ["list", "of", "interests"],
  "academic_strengths": ["list", "of", "strengths"],
  "constraints": {
    "budget": "low" | "medium" | "high",
    "location_preference": ["country1", "country2"]
  }
}

RULES:
1. "grade" is the current school grade level as an integer (e.g. 10, 11, 12)
2. Keep interests short ("CS", "Robotics"), most important first
3. If the student says money is not a concern, budget is "high"

{json_only}"#;

/// University Stage. Replace: {catalog}, {profile_json}, {json_only}
pub const UNIVERSITY_PROMPT_TEMPLATE: &str = r#"You are a university admissions consultant.
Based on the database below and the student profile, suggest exactly 3 universities.
Classify each one as:
- REACH: admission is unlikely given this profile
- TARGET: a good fit for this profile
- SAFE: admission is likely

DATABASE:
{catalog}

STUDENT PROFILE:
{profile_json}

Return a JSON object with this EXACT structure:
{
  "reach": [{"name": "University name", "reason": "Why it is a reach"}],
  "target": [{"name": "University name", "reason": "Why it fits"}],
  "safe": [{"name": "University name", "reason": "Why it is safe"}]
}

Respect the student's budget and location preferences when choosing.

{json_only}"#;

/// Plan Stage. Replace: {profile_json}, {reach_universities}, {time_horizon}, {json_only}
pub const PLAN_PROMPT_TEMPLATE: &str = r#"You are a strategic admissions coach.
Build a personalized action plan that moves this student toward their aspirational universities.

STUDENT PROFILE:
{profile_json}

TARGET (REACH) UNIVERSITIES:
{reach_universities}

TIME HORIZON:
{time_horizon}

Produce:
1. A gap analysis: what separates the current profile from admission at the reach universities.
2. ONE "spike" project: a single distinguishing project built on the student's stated interests. It must be specific to this student, NOT generic advice like "join a club" or "do volunteering".
3. An optional exam strategy: standardized tests to take and when.
4. A period-by-period timeline of concrete action items that fits the time horizon.

Return a JSON object with this EXACT structure:
{
  "gap_analysis": "string",
  "the_spike": {"title": "string", "description": "string"},
  "exam_strategy": ["string"],
  "timeline": [
    {"period": "e.g. Summer 2025", "focus": "string", "action_items": ["string"]}
  ]
}

{json_only}"#;
