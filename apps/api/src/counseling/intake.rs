//! Intake form — the raw fields a student fills in, glued into one labeled brief.

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Yearly tuition budget selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetOption {
    #[default]
    Low,
    Medium,
    High,
    ScholarshipRequired,
}

impl BudgetOption {
    pub fn label(self) -> &'static str {
        match self {
            BudgetOption::Low => "Low (< $10k)",
            BudgetOption::Medium => "Medium ($10k - $40k)",
            BudgetOption::High => "High (> $40k)",
            BudgetOption::ScholarshipRequired => "Scholarship Required",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct IntakeForm {
    // Absent and blank are the same to `validate`.
    #[serde(default)]
    pub academics: String,
    #[serde(default)]
    pub interests: String,
    #[serde(default)]
    pub budget: BudgetOption,
    #[serde(default)]
    pub preferences: String,
}

impl IntakeForm {
    /// Academics and interests carry the signal; the rest may be blank.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.academics.trim().is_empty() {
            return Err(AppError::Validation("academics cannot be empty".to_string()));
        }
        if self.interests.trim().is_empty() {
            return Err(AppError::Validation("interests cannot be empty".to_string()));
        }
        Ok(())
    }

    /// Labeled brief handed verbatim to the Profile Stage.
    pub fn compose_brief(&self) -> String {
        format!(
            "ACADEMICS: {}\nINTERESTS: {}\nBUDGET CONSTRAINT: {}\nPREFERENCES: {}",
            self.academics.trim(),
            self.interests.trim(),
            self.budget.label(),
            self.preferences.trim(),
        )
    }
}
