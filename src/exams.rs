//! Catalog of supported target exams and their syllabus patterns.
//!
//! Used by prompt construction and exposed to the presentation layer for
//! the exam picker.

/// Exams the product is tuned for.
pub const SUPPORTED_EXAMS: &[&str] = &[
    "OPSC Civil Services",
    "OSSSC Combined Recruitment",
    "Odisha Police",
    "OSSC CGL",
    "UPSC",
    "Banking (IBPS PO)",
    "Banking (SBI PO)",
];

/// Broad exam families that share a paper pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExamFamily {
    /// OPSC/UPSC civil-services General Studies pattern.
    CivilServices,
    /// IBPS/SBI banking prelims pattern.
    Banking,
    /// OSSC/OSSSC/Police state recruitment pattern.
    StateRecruitment,
    Other,
}

/// Classifies an exam name into its pattern family by the same keyword
/// rules the product applies to free-form exam strings.
pub fn exam_family(exam: &str) -> ExamFamily {
    if exam.contains("OPSC") || exam.contains("UPSC") {
        ExamFamily::CivilServices
    } else if exam.contains("Banking") || exam.contains("IBPS") || exam.contains("SBI") {
        ExamFamily::Banking
    } else if exam.contains("OSSC") || exam.contains("OSSSC") || exam.contains("Police") {
        ExamFamily::StateRecruitment
    } else {
        ExamFamily::Other
    }
}

/// One-line syllabus description shown on the configuration screen.
pub fn pattern_description(exam: &str) -> &'static str {
    match exam_family(exam) {
        ExamFamily::CivilServices => {
            "General Studies (History, Geography, Polity, Economy, Science)"
        }
        ExamFamily::Banking => "Reasoning Ability, Quantitative Aptitude, English Language",
        ExamFamily::StateRecruitment => "Odisha GK, Reasoning, Arithmetic, Computer Awareness",
        ExamFamily::Other => "General Exam Syllabus",
    }
}

/// Detailed pattern brief injected into full-mock generation prompts.
pub fn pattern_brief(exam: &str) -> String {
    match exam_family(exam) {
        ExamFamily::CivilServices => format!(
            "Strictly follow the General Studies Paper 1 pattern for {exam}: \
             History (Ancient/Medieval/Modern India plus Odisha History for OPSC), \
             Geography (Physical/Economic plus Odisha Geography for OPSC), \
             Indian Polity & Governance, Economic & Social Development, \
             General Science & Environment."
        ),
        ExamFamily::Banking => format!(
            "Strictly follow the IBPS/SBI Prelims pattern for {exam}: \
             Quantitative Aptitude (Data Interpretation, Arithmetic, Series), \
             Reasoning Ability (Puzzles, Syllogism, Blood Relations), \
             English Language (Error Spotting, Fillers, Para Jumbles)."
        ),
        ExamFamily::StateRecruitment => format!(
            "Strictly follow the OSSC/State Exam pattern for {exam}: \
             General Knowledge (Current Affairs, Odisha GK), \
             Reasoning & Mental Ability, Mathematics / Numerical Ability, \
             Computer Awareness."
        ),
        ExamFamily::Other => format!("Cover all major syllabus topics for {exam}."),
    }
}
