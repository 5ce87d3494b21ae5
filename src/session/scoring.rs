//! Scoring & review builder: derives the immutable result record from a
//! session.

use serde::{Deserialize, Serialize};

use super::Session;

/// Per-question line of the detailed analysis view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionOutcome {
    pub index: usize,
    pub question: String,
    /// The option the candidate selected; `None` means skipped.
    #[serde(default)]
    pub selected: Option<String>,
    pub correct_answer: String,
    pub explanation: String,
    pub is_correct: bool,
}

/// Immutable scored outcome of a completed session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestResult {
    pub correct_count: usize,
    pub total: usize,
    /// Display percentage, rounded; 0 when the session had no questions.
    pub percentage: u32,
    pub elapsed_secs: u32,
    pub breakdown: Vec<QuestionOutcome>,
}

/// Pure derivation of a result from session state: no side effects, and
/// value-equal across repeated calls on the same frozen session. A
/// skipped question is never correct; correctness is exact text equality
/// with the question's correct option.
pub fn build_result(session: &Session) -> TestResult {
    let breakdown: Vec<QuestionOutcome> = session
        .questions
        .iter()
        .enumerate()
        .map(|(index, question)| {
            let selected = session.answers.get(&index).cloned();
            let is_correct = selected.as_deref() == Some(question.correct_answer.as_str());
            QuestionOutcome {
                index,
                question: question.question.clone(),
                selected,
                correct_answer: question.correct_answer.clone(),
                explanation: question.explanation.clone(),
                is_correct,
            }
        })
        .collect();

    let total = breakdown.len();
    let correct_count = breakdown.iter().filter(|o| o.is_correct).count();
    let percentage = if total == 0 {
        0
    } else {
        (100.0 * correct_count as f64 / total as f64).round() as u32
    };

    TestResult {
        correct_count,
        total,
        percentage,
        elapsed_secs: session.elapsed_secs,
        breakdown,
    }
}
