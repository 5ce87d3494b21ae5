//! Strict decode boundary in front of the remote generator.
//!
//! The generator returns raw JSON text; nothing downstream touches it
//! until it has been deserialized into typed wire records and every
//! domain invariant has been checked. Invalid payloads never become
//! `Question`s.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;
use uuid::Uuid;

use crate::questions::Question;

/// Why a generator payload was rejected.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("generator payload is not valid JSON: {0}")]
    MalformedJson(#[source] serde_json::Error),
    #[error("generator payload does not match the expected schema: {0}")]
    UnexpectedShape(#[source] serde_json::Error),
    #[error("generated question {index} has empty question text")]
    EmptyQuestion { index: usize },
    #[error("generated question {index} has no options")]
    NoOptions { index: usize },
    #[error("generated question {index} has a blank option")]
    BlankOption { index: usize },
    #[error("generated question {index}: correct answer {answer:?} is not one of its options")]
    AnswerNotInOptions { index: usize, answer: String },
}

/// Wire shape of one generated question, mirroring the remote schema.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedQuestionRecord {
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: String,
    pub explanation: String,
    #[serde(default)]
    pub subject: Option<String>,
}

/// Deserializes a JSON payload, separating syntax failures from schema
/// mismatches so callers can report them distinctly.
pub fn parse_json<T: DeserializeOwned>(payload: &str) -> Result<T, DecodeError> {
    serde_json::from_str(payload).map_err(|err| match err.classify() {
        serde_json::error::Category::Data => DecodeError::UnexpectedShape(err),
        _ => DecodeError::MalformedJson(err),
    })
}

/// Decodes and validates a generator payload into domain questions.
pub fn decode_questions(payload: &str) -> Result<Vec<Question>, DecodeError> {
    let records: Vec<GeneratedQuestionRecord> = parse_json(payload)?;
    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| validate_record(index, record))
        .collect()
}

fn validate_record(index: usize, record: GeneratedQuestionRecord) -> Result<Question, DecodeError> {
    if record.question.trim().is_empty() {
        return Err(DecodeError::EmptyQuestion { index });
    }
    if record.options.is_empty() {
        return Err(DecodeError::NoOptions { index });
    }
    if record.options.iter().any(|o| o.trim().is_empty()) {
        return Err(DecodeError::BlankOption { index });
    }
    if !record.options.contains(&record.correct_answer) {
        return Err(DecodeError::AnswerNotInOptions {
            index,
            answer: record.correct_answer,
        });
    }
    Ok(Question {
        id: Uuid::new_v4().to_string(),
        question: record.question,
        options: record.options,
        correct_answer: record.correct_answer,
        explanation: record.explanation,
        subject: record.subject,
    })
}
