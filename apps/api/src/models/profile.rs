use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Number, Value};

use crate::models::lenient;

/// Placeholder used when the model could not find a name in the input.
pub const DEFAULT_STUDENT_NAME: &str = "Student";

/// Structured profile produced by the Profile Stage.
///
/// Every field is optional. Read through the accessors, which supply defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StudentProfile {
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "Grade::lenient", skip_serializing_if = "Option::is_none")]
    pub grade: Option<Grade>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub interests: Vec<String>,
    #[serde(
        default,
        alias = "academicStrengths",
        deserialize_with = "lenient::string_list"
    )]
    pub academic_strengths: Vec<String>,
    #[serde(default, deserialize_with = "lenient::record", skip_serializing_if = "Option::is_none")]
    pub constraints: Option<Constraints>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Constraints {
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub budget: Option<String>,
    #[serde(
        default,
        alias = "locationPreference",
        deserialize_with = "lenient::string_list"
    )]
    pub location_preference: Vec<String>,
}

impl StudentProfile {
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or(DEFAULT_STUDENT_NAME)
    }

    pub fn grade(&self) -> Option<&Grade> {
        self.grade.as_ref()
    }

    pub fn interests(&self) -> &[String] {
        &self.interests
    }

    pub fn academic_strengths(&self) -> &[String] {
        &self.academic_strengths
    }

    /// Raw budget text as the model wrote it.
    pub fn budget(&self) -> Option<&str> {
        self.constraints.as_ref().and_then(|c| c.budget.as_deref())
    }

    pub fn budget_tier(&self) -> Option<BudgetTier> {
        self.budget().and_then(BudgetTier::parse)
    }

    pub fn location_preference(&self) -> &[String] {
        self.constraints
            .as_ref()
            .map(|c| c.location_preference.as_slice())
            .unwrap_or(&[])
    }
}

/// `"11"`, `"12.0"`, `"Grade 12"`, `"12th"`, `"12th grade"`, `"Year 11"`. Years
/// such as `"Class of 2026"` do not match.
static GRADE_TEXT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s*(?:(?:grade|year|class)\s*)?(\d{1,2})(?:\.\d+|st|nd|rd|th)?(?:\s*grade)?\s*$")
        .expect("grade pattern is valid")
});

/// Grade level as emitted by the model: `11`, `"11"`, `"Grade 12"`, `12.0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Grade {
    Number(Number),
    Text(String),
}

impl Grade {
    /// Numeric grade level. Text is coerced only when it reads as a grade
    /// level; fractional numbers are truncated. `None` otherwise.
    pub fn as_number(&self) -> Option<i64> {
        match self {
            Grade::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
            Grade::Text(s) => GRADE_TEXT
                .captures(s)
                .and_then(|caps| caps.get(1))
                .and_then(|level| level.as_str().parse().ok()),
        }
    }

    fn lenient<'de, D>(deserializer: D) -> Result<Option<Grade>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::Number(n) => Some(Grade::Number(n)),
            Value::String(s) if !s.trim().is_empty() => Some(Grade::Text(s)),
            _ => None,
        })
    }
}

/// Normalized tuition budget tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetTier {
    Low,
    Medium,
    High,
}

impl BudgetTier {
    /// Case-insensitive parse of free-text budget. "Scholarship required"
    /// counts as low.
    pub fn parse(raw: &str) -> Option<Self> {
        let lowered = raw.trim().to_lowercase();
        match lowered.as_str() {
            "low" => return Some(BudgetTier::Low),
            "medium" => return Some(BudgetTier::Medium),
            "high" => return Some(BudgetTier::High),
            _ => {}
        }

        if lowered.contains("high") {
            Some(BudgetTier::High)
        } else if lowered.contains("medium") || lowered.contains("mid") {
            Some(BudgetTier::Medium)
        } else if lowered.contains("low") || lowered.contains("scholarship") {
            Some(BudgetTier::Low)
        } else {
            None
        }
    }
}
