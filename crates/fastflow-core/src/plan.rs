//! Fasting plan types and lenient response parsing.
//!
//! Plans are produced only by the coach adapter; the session state machine
//! treats them as opaque data. Model output is parsed leniently (the
//! outermost JSON object is extracted, markdown fences tolerated) and then
//! schema-validated -- any mismatch falls back rather than trusting the
//! generator.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// Named fasting pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlanType {
    #[serde(rename = "16:8")]
    SixteenEight,
    #[serde(rename = "14:10")]
    FourteenTen,
    #[serde(rename = "18:6")]
    EighteenSix,
    #[serde(rename = "OMAD")]
    Omad,
}

impl std::fmt::Display for PlanType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PlanType::SixteenEight => "16:8",
            PlanType::FourteenTen => "14:10",
            PlanType::EighteenSix => "18:6",
            PlanType::Omad => "OMAD",
        };
        f.write_str(name)
    }
}

/// A structured fasting schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FastingPlan {
    /// Daily fasting window, 12-24 hours.
    pub fasting_hours: u8,
    /// Daily eating window, 8-12 hours.
    pub eating_hours: u8,
    /// Eating window opens (HH:MM).
    pub start_time: String,
    /// Eating window closes (HH:MM).
    pub end_time: String,
    pub plan_type: PlanType,
    #[serde(default)]
    pub reasoning: String,
}

impl FastingPlan {
    /// The deterministic fallback plan returned whenever generation fails.
    pub fn fallback() -> Self {
        Self {
            fasting_hours: 16,
            eating_hours: 8,
            start_time: "12:00".into(),
            end_time: "20:00".into(),
            plan_type: PlanType::SixteenEight,
            reasoning: "Standard 16:8 plan - great for beginners".into(),
        }
    }

    /// Whether the plan satisfies the schema's numeric ranges and time
    /// formats.
    pub fn is_valid(&self) -> bool {
        (12..=24).contains(&self.fasting_hours)
            && (8..=12).contains(&self.eating_hours)
            && is_hhmm(&self.start_time)
            && is_hhmm(&self.end_time)
    }

    /// Extract and validate a plan from raw model output.
    ///
    /// Returns `None` on any shape mismatch; callers substitute
    /// [`FastingPlan::fallback`].
    pub fn parse_lenient(text: &str) -> Option<Self> {
        let start = text.find('{')?;
        let end = text.rfind('}')?;
        if end < start {
            return None;
        }
        let plan: FastingPlan = serde_json::from_str(&text[start..=end]).ok()?;
        plan.is_valid().then_some(plan)
    }
}

pub(crate) fn is_hhmm(value: &str) -> bool {
    NaiveTime::parse_from_str(value, "%H:%M").is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_matches_contract() {
        let plan = FastingPlan::fallback();
        assert_eq!(plan.fasting_hours, 16);
        assert_eq!(plan.eating_hours, 8);
        assert_eq!(plan.start_time, "12:00");
        assert_eq!(plan.end_time, "20:00");
        assert_eq!(plan.plan_type, PlanType::SixteenEight);
        assert!(plan.is_valid());
    }

    #[test]
    fn parses_bare_json_object() {
        let text = r#"{"fastingHours":18,"eatingHours":8,"startTime":"11:00","endTime":"19:00","planType":"18:6","reasoning":"ok"}"#;
        let plan = FastingPlan::parse_lenient(text).unwrap();
        assert_eq!(plan.plan_type, PlanType::EighteenSix);
        assert_eq!(plan.fasting_hours, 18);
    }

    #[test]
    fn parses_fenced_json() {
        let text = "Here is your plan:\n```json\n{\"fastingHours\":14,\"eatingHours\":10,\"startTime\":\"10:00\",\"endTime\":\"20:00\",\"planType\":\"14:10\",\"reasoning\":\"gentle start\"}\n```";
        let plan = FastingPlan::parse_lenient(text).unwrap();
        assert_eq!(plan.plan_type, PlanType::FourteenTen);
    }

    #[test]
    fn rejects_out_of_range_hours() {
        let text = r#"{"fastingHours":30,"eatingHours":8,"startTime":"12:00","endTime":"20:00","planType":"16:8"}"#;
        assert!(FastingPlan::parse_lenient(text).is_none());
    }

    #[test]
    fn rejects_unknown_plan_type() {
        let text = r#"{"fastingHours":16,"eatingHours":8,"startTime":"12:00","endTime":"20:00","planType":"20:4"}"#;
        assert!(FastingPlan::parse_lenient(text).is_none());
    }

    #[test]
    fn rejects_bad_time_format() {
        let text = r#"{"fastingHours":16,"eatingHours":8,"startTime":"noon","endTime":"20:00","planType":"16:8"}"#;
        assert!(FastingPlan::parse_lenient(text).is_none());
    }

    #[test]
    fn rejects_non_json() {
        assert!(FastingPlan::parse_lenient("I cannot help with that.").is_none());
    }

    #[test]
    fn plan_type_serializes_to_display_name() {
        assert_eq!(serde_json::to_string(&PlanType::Omad).unwrap(), "\"OMAD\"");
        assert_eq!(PlanType::SixteenEight.to_string(), "16:8");
    }
}
