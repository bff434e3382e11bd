// Shared prompt constants and prompt-building utilities.
// Each stage defines its own templates in counseling/prompts.rs.
// This file contains cross-cutting prompt fragments.

/// System prompt that enforces JSON-only output. Sent with every generation call.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Closing instruction appended to every stage prompt.
pub const JSON_ONLY_INSTRUCTION: &str = "\
    Return ONLY the JSON object described above. \
    No markdown, no ```json tags, no commentary before or after it.";
