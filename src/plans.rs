//! Personalized study-plan generation.
//!
//! Same remote seam and decode discipline as question generation: one
//! prompt per request, strict schema validation on the way back.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::source::decode::parse_json;
use crate::source::{RemoteGenerator, SourceUnavailable};

/// One scheduled day of the plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudyPlanDay {
    pub day: String,
    pub focus: String,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub activities: Vec<String>,
}

/// Five-day plan tailored to an exam and preparation level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudyPlan {
    pub exam: String,
    pub duration: String,
    pub schedule: Vec<StudyPlanDay>,
}

/// Builds the plan-generation prompt for an exam, preparation level, and
/// daily study budget.
pub fn build_plan_prompt(exam: &str, level: &str, hours_per_day: u32) -> String {
    format!(
        "Create a 5-day personalized study plan for a student preparing for \"{exam}\" \
         (specifically focusing on Odisha exams if applicable). The student is at a \
         \"{level}\" level and has {hours_per_day} hours per day.\n\
         Include a mix of static GK, Current Affairs, and Aptitude; explicitly schedule \
         MCQ practice every day; for OSSC/UPSC/IBPS exams include pattern-specific \
         practice.\n\n\
         OUTPUT FORMAT: return one strict JSON object with fields \"exam\" (string), \
         \"duration\" (string), and \"schedule\" (array of objects with \"day\", \
         \"focus\", \"topics\" (string array), \"activities\" (string array)). \
         No markdown, no surrounding text."
    )
}

/// Requests and decodes a study plan. Remote failure or an undecodable
/// payload surfaces as `SourceUnavailable`, same as question resolution.
pub fn generate_study_plan(
    generator: &dyn RemoteGenerator,
    exam: &str,
    level: &str,
    hours_per_day: u32,
) -> Result<StudyPlan, SourceUnavailable> {
    let prompt = build_plan_prompt(exam, level, hours_per_day);
    let payload = generator.generate_json(&prompt).map_err(SourceUnavailable)?;
    parse_json(&payload).map_err(|err| SourceUnavailable(err.into()))
}
