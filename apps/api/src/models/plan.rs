use serde::{Deserialize, Serialize};

use crate::models::lenient;

/// Terminal output of the pipeline: gap analysis, spike project, timeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionPlan {
    #[serde(
        default,
        alias = "gapAnalysis",
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub gap_analysis: Option<String>,
    #[serde(
        default,
        alias = "theSpike",
        deserialize_with = "lenient::record",
        skip_serializing_if = "Option::is_none"
    )]
    pub the_spike: Option<Spike>,
    #[serde(
        default,
        alias = "examStrategy",
        deserialize_with = "lenient::string_list",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub exam_strategy: Vec<String>,
    #[serde(default, deserialize_with = "lenient::record_list")]
    pub timeline: Vec<TimelinePeriod>,
}

/// The one distinguishing project the student should build.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Spike {
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimelinePeriod {
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub period: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub focus: Option<String>,
    #[serde(
        default,
        alias = "actionItems",
        deserialize_with = "lenient::string_list"
    )]
    pub action_items: Vec<String>,
}

impl ActionPlan {
    pub fn gap_analysis(&self) -> &str {
        self.gap_analysis.as_deref().unwrap_or("No analysis available")
    }

    pub fn spike_title(&self) -> &str {
        self.the_spike
            .as_ref()
            .and_then(|s| s.title.as_deref())
            .unwrap_or("Project")
    }

    pub fn spike_description(&self) -> &str {
        self.the_spike
            .as_ref()
            .and_then(|s| s.description.as_deref())
            .unwrap_or("No description")
    }

    pub fn exam_strategy(&self) -> &[String] {
        &self.exam_strategy
    }

    pub fn timeline(&self) -> &[TimelinePeriod] {
        &self.timeline
    }
}

impl TimelinePeriod {
    pub fn period(&self) -> &str {
        self.period.as_deref().unwrap_or("Time")
    }

    pub fn focus(&self) -> Option<&str> {
        self.focus.as_deref()
    }

    pub fn action_items(&self) -> &[String] {
        &self.action_items
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_full_plan_deserializes() {
        let plan: ActionPlan = serde_json::from_value(json!({
            "gap_analysis": "Needs research exposure.",
            "the_spike": {"title": "Chess engine", "description": "Open-source a bitboard engine."},
            "exam_strategy": ["SAT in March"],
            "timeline": [
                {"period": "Summer", "focus": "Build", "action_items": ["Ship v1", "Write blog"]},
                {"period": "Fall", "action_items": ["Apply"]}
            ]
        }))
        .unwrap();

        assert_eq!(plan.gap_analysis(), "Needs research exposure.");
        assert_eq!(plan.spike_title(), "Chess engine");
        assert_eq!(plan.exam_strategy(), ["SAT in March"]);
        assert_eq!(plan.timeline().len(), 2);
        assert_eq!(plan.timeline()[0].action_items(), ["Ship v1", "Write blog"]);
        assert!(plan.timeline()[1].focus().is_none());
    }

    #[test]
    fn test_camel_case_plan_deserializes() {
        let plan: ActionPlan = serde_json::from_value(json!({
            "gapAnalysis": "Gap",
            "theSpike": {"title": "T"},
            "timeline": [{"period": "Q1", "actionItems": ["A"]}]
        }))
        .unwrap();

        assert_eq!(plan.gap_analysis(), "Gap");
        assert_eq!(plan.spike_title(), "T");
        assert_eq!(plan.timeline()[0].action_items(), ["A"]);
    }

    #[test]
    fn test_empty_plan_reads_placeholders() {
        let plan = ActionPlan::default();
        assert_eq!(plan.gap_analysis(), "No analysis available");
        assert_eq!(plan.spike_title(), "Project");
        assert_eq!(plan.spike_description(), "No description");
        assert!(plan.timeline().is_empty());
        assert!(plan.exam_strategy().is_empty());
    }

    #[test]
    fn test_spike_as_string_is_dropped() {
        let plan: ActionPlan =
            serde_json::from_value(json!({"the_spike": "Build something"})).unwrap();
        assert!(plan.the_spike.is_none());
        assert_eq!(plan.spike_title(), "Project");
    }

    #[test]
    fn test_timeline_period_defaults() {
        let period = TimelinePeriod::default();
        assert_eq!(period.period(), "Time");
        assert!(period.action_items().is_empty());
    }
}
