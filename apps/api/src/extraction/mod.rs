//! JSON extraction — turns raw model output into a `serde_json::Value`.
//!
//! Models asked for "JSON only" still wrap it in fences, prepend a sentence,
//! or trail off with commentary. `extract` tries an ordered list of
//! candidate substrings and returns the first one that parses:
//!
//! 1. the interior of a ```` ```json ```` fenced block
//! 2. the interior of a generic ```` ``` ```` fenced block (closing fence is
//!    searched for, never assumed to sit at a fixed offset)
//! 3. the slice from the first `{` to the last `}`, inclusive
//! 4. the whole trimmed text
//!
//! Nothing here panics or returns an `Err` through `?` chains upstream: a
//! failure is an `ExtractionFailure` value the caller stores and renders.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::llm_client::LlmError;

static JSON_FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)```json[ \t]*\r?\n?(.*?)```").expect("valid json fence regex"));

const FENCE: &str = "```";

/// Why a stage produced no usable record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// No candidate substring of the response parsed as JSON.
    JsonParseFailed,
    /// The generation call itself failed (network, auth, quota, empty body).
    ProviderError,
}

/// Sentinel returned in place of a stage record. Serializes as
/// `{"error": "json_parse_failed", "detail": "...", "raw_text": "..."}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionFailure {
    pub error: FailureKind,
    pub detail: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_text: Option<String>,
}

impl ExtractionFailure {
    pub fn parse_failed(detail: impl Into<String>, raw_text: &str) -> Self {
        Self {
            error: FailureKind::JsonParseFailed,
            detail: detail.into(),
            raw_text: Some(raw_text.to_string()),
        }
    }

    pub fn provider(err: &LlmError) -> Self {
        Self {
            error: FailureKind::ProviderError,
            detail: err.to_string(),
            raw_text: None,
        }
    }
}

/// Best-effort JSON extraction from free-form model output.
pub fn extract(raw_text: &str) -> Result<Value, ExtractionFailure> {
    let mut last_error: Option<serde_json::Error> = None;

    for candidate in candidates(raw_text) {
        match serde_json::from_str::<Value>(candidate) {
            Ok(value) => return Ok(value),
            Err(e) => {
                debug!("JSON candidate rejected: {e}");
                last_error = Some(e);
            }
        }
    }

    let detail = match last_error {
        Some(e) => format!("no candidate parsed as JSON: {e}"),
        None => "response contained no JSON candidate".to_string(),
    };
    Err(ExtractionFailure::parse_failed(detail, raw_text))
}

/// Extracts JSON and decodes it into a stage record.
///
/// Shape mismatches are schema drift, not failure: a value that does not fit
/// `T` at all (an array where an object was asked for) decodes to `T::default()`.
pub fn extract_record<T>(raw_text: &str) -> Result<T, ExtractionFailure>
where
    T: DeserializeOwned + Default,
{
    let value = extract(raw_text)?;
    Ok(serde_json::from_value::<T>(value).unwrap_or_else(|e| {
        warn!(
            "Parsed JSON did not match {}: {e}; using defaults",
            std::any::type_name::<T>()
        );
        T::default()
    }))
}

/// Candidate substrings in fallback order. Empty candidates are skipped.
fn candidates(raw_text: &str) -> Vec<&str> {
    let mut out = Vec::with_capacity(4);

    if let Some(inner) = JSON_FENCE.captures(raw_text).and_then(|c| c.get(1)) {
        out.push(inner.as_str().trim());
    }
    if let Some(inner) = generic_fence_interior(raw_text) {
        out.push(inner);
    }
    if let Some(slice) = brace_slice(raw_text) {
        out.push(slice);
    }
    out.push(raw_text.trim());

    out.retain(|c| !c.is_empty());
    out
}

/// Interior of the first ```` ``` ```` … ```` ``` ```` pair. A leading info string
/// (`javascript`, `JSON`, …) on the opening line is dropped.
fn generic_fence_interior(text: &str) -> Option<&str> {
    let open = text.find(FENCE)?;
    let after_open = &text[open + FENCE.len()..];
    let close = after_open.find(FENCE)?;
    let inner = &after_open[..close];

    let inner = match inner.split_once('\n') {
        Some((first_line, rest)) if is_info_string(first_line) => rest,
        _ => inner,
    };
    Some(inner.trim())
}

fn is_info_string(line: &str) -> bool {
    let line = line.trim();
    !line.is_empty() && line.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// First `{` through last `}`, inclusive.
fn brace_slice(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}
