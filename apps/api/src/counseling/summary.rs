//! Markdown rendering of a counseling run, laid out like the result page:
//! profile, Target / Reach / Safe columns, then the action plan.
//!
//! Reads only through the record accessors, so absent fields show placeholder
//! text and empty buckets show `_None_`.

use crate::counseling::plan_stage::TimeHorizon;
use crate::models::{ActionPlan, Grade, StudentProfile, UniversityPick, UniversityRecommendationSet};

const NOT_AVAILABLE: &str = "Not available";

pub fn render_markdown(
    profile: &StudentProfile,
    universities: &UniversityRecommendationSet,
    plan: Option<&ActionPlan>,
    horizon: TimeHorizon,
) -> String {
    let mut lines = Vec::new();

    lines.push(format!("## 1. Profile: {}", profile.name()));
    lines.push(format!("- Grade: {}", grade_label(profile.grade())));
    lines.push(format!("- Interests: {}", list_or_placeholder(profile.interests())));
    lines.push(format!(
        "- Academic strengths: {}",
        list_or_placeholder(profile.academic_strengths())
    ));
    lines.push(format!("- Budget: {}", profile.budget().unwrap_or(NOT_AVAILABLE)));
    lines.push(format!(
        "- Location preference: {}",
        list_or_placeholder(profile.location_preference())
    ));
    lines.push(String::new());

    lines.push("## 2. University Recommendations".to_string());
    push_bucket(&mut lines, "Target", &universities.target);
    push_bucket(&mut lines, "Reach", &universities.reach);
    push_bucket(&mut lines, "Safe", &universities.safe);

    lines.push("## 3. Strategic Action Plan".to_string());
    lines.push(format!("_Time horizon: {}_", horizon.describe()));
    lines.push(String::new());

    let empty = ActionPlan::default();
    let plan = plan.unwrap_or(&empty);

    lines.push(format!("**Gap Analysis:** {}", plan.gap_analysis()));
    lines.push(String::new());
    lines.push(format!("### Recommended 'Spike' Project: {}", plan.spike_title()));
    lines.push(format!("> {}", plan.spike_description()));

    if !plan.exam_strategy().is_empty() {
        lines.push(String::new());
        lines.push("### Exam Strategy".to_string());
        lines.extend(plan.exam_strategy().iter().map(|item| format!("- {item}")));
    }

    lines.push(String::new());
    lines.push("### Execution Timeline".to_string());
    if plan.timeline().is_empty() {
        lines.push("_No timeline available_".to_string());
    }
    for period in plan.timeline() {
        lines.push(format!(
            "**{}** - *{}*",
            period.period(),
            period.focus().unwrap_or("Focus")
        ));
        lines.extend(period.action_items().iter().map(|item| format!("- {item}")));
    }

    lines.join("\n")
}

fn push_bucket(lines: &mut Vec<String>, title: &str, picks: &[UniversityPick]) {
    lines.push(format!("### {title}"));
    if picks.is_empty() {
        lines.push("_None_".to_string());
    }
    for pick in picks {
        lines.push(format!("- **{}**: *{}*", pick.name(), pick.reason()));
    }
    lines.push(String::new());
}

fn grade_label(grade: Option<&Grade>) -> String {
    match grade {
        Some(Grade::Number(n)) => n.to_string(),
        Some(Grade::Text(s)) => s.clone(),
        None => NOT_AVAILABLE.to_string(),
    }
}

fn list_or_placeholder(items: &[String]) -> String {
    if items.is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        items.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_inputs_render_placeholders() {
        let out = render_markdown(
            &StudentProfile::default(),
            &UniversityRecommendationSet::default(),
            None,
            TimeHorizon::Strategic,
        );

        assert!(out.contains("## 1. Profile: Student"));
        assert!(out.contains("- Interests: Not available"));
        assert!(out.contains("### Target\n_None_"));
        assert!(out.contains("### Reach\n_None_"));
        assert!(out.contains("### Safe\n_None_"));
        assert!(out.contains("**Gap Analysis:** No analysis available"));
        assert!(out.contains("### Recommended 'Spike' Project: Project"));
        assert!(out.contains("> No description"));
        assert!(out.contains("_No timeline available_"));
        assert!(!out.contains("### Exam Strategy"));
    }

    #[test]
    fn test_full_report_renders_every_section() {
        let profile: StudentProfile = serde_json::from_value(json!({
            "name": "Ana",
            "grade": 12,
            "interests": ["Robotics", "AI"],
            "constraints": {"budget": "low", "location_preference": ["Germany"]}
        }))
        .unwrap();
        let universities: UniversityRecommendationSet = serde_json::from_value(json!({
            "reach": [{"name": "ETH Zurich", "reason": "Very competitive"}],
            "target": [{"name": "TUM Munich", "reason": "Low tuition, robotics"}],
            "safe": []
        }))
        .unwrap();
        let plan: ActionPlan = serde_json::from_value(json!({
            "gap_analysis": "Needs German B2.",
            "the_spike": {"title": "Swarm robots", "description": "Build three cooperating bots."},
            "exam_strategy": ["Goethe B2 in May"],
            "timeline": [{"period": "Spring", "action_items": ["Enroll in German course"]}]
        }))
        .unwrap();

        let out = render_markdown(&profile, &universities, Some(&plan), TimeHorizon::Urgent);

        assert!(out.contains("- Grade: 12"));
        assert!(out.contains("- Interests: Robotics, AI"));
        assert!(out.contains("- Budget: low"));
        assert!(out.contains("### Reach\n- **ETH Zurich**: *Very competitive*"));
        assert!(out.contains("### Safe\n_None_"));
        assert!(out.contains("_Time horizon: Urgent (less than 1 academic year remaining)_"));
        assert!(out.contains("### Exam Strategy\n- Goethe B2 in May"));
        assert!(out.contains("**Spring** - *Focus*\n- Enroll in German course"));
    }
}
