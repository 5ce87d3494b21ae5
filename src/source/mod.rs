//! Question Source Adapter: local PYQ bank first, remote generation second.

pub mod decode;

pub use decode::{decode_questions, DecodeError, GeneratedQuestionRecord};

use std::sync::Arc;

use anyhow::{anyhow, Result};
use thiserror::Error;

use crate::config::SourceSettings;
use crate::exams::pattern_brief;
use crate::questions::bank::{lookup_pyqs, GENERAL_STUDIES};
use crate::questions::{Question, TestConfiguration, TestKind};

/// Minimum number of bank hits that satisfies a request without any
/// remote call.
pub const DEFAULT_LOCAL_FAST_PATH: usize = 3;

/// Seam for the remote generation service: one prompt in, one raw JSON
/// payload out. The service may fail or time out; it never retries here.
pub trait RemoteGenerator: Send + Sync {
    fn generate_json(&self, prompt: &str) -> Result<String>;
}

/// The question source could not produce questions: the remote call
/// failed or its payload did not survive the decode boundary.
#[derive(Debug, Error)]
#[error("question source unavailable: {0}")]
pub struct SourceUnavailable(#[source] pub anyhow::Error);

/// Resolves questions for a test configuration.
pub struct QuestionSource {
    generator: Arc<dyn RemoteGenerator>,
    local_fast_path: usize,
    remote_allowed: bool,
}

impl QuestionSource {
    pub fn new(generator: Arc<dyn RemoteGenerator>) -> Self {
        Self {
            generator,
            local_fast_path: DEFAULT_LOCAL_FAST_PATH,
            remote_allowed: true,
        }
    }

    /// Applies the per-install source settings.
    pub fn from_settings(generator: Arc<dyn RemoteGenerator>, settings: &SourceSettings) -> Self {
        Self {
            generator,
            local_fast_path: settings.local_fast_path as usize,
            remote_allowed: settings.remote_allowed,
        }
    }

    pub fn with_local_fast_path(mut self, threshold: usize) -> Self {
        self.local_fast_path = threshold;
        self
    }

    pub fn with_remote_allowed(mut self, allowed: bool) -> Self {
        self.remote_allowed = allowed;
        self
    }

    /// The generator seam, shared with other generation paths (study
    /// plans) so one client serves the whole engine.
    pub fn generator(&self) -> Arc<dyn RemoteGenerator> {
        Arc::clone(&self.generator)
    }

    /// Resolves a question list: bank hits alone when there are enough of
    /// them, otherwise bank hits followed by one round of generated items.
    ///
    /// An empty successful response is an empty list, not an error.
    pub fn resolve(&self, config: &TestConfiguration) -> Result<Vec<Question>, SourceUnavailable> {
        let subject = config.subject.as_deref().unwrap_or(GENERAL_STUDIES);
        let mut questions: Vec<Question> = lookup_pyqs(&config.exam, subject, None)
            .iter()
            .map(|item| item.to_question())
            .collect();
        if questions.len() >= self.local_fast_path {
            return Ok(questions);
        }
        if !self.remote_allowed {
            return Err(SourceUnavailable(anyhow!(
                "remote generation is disabled by configuration and the bank has only {} matching items",
                questions.len()
            )));
        }

        let prompt = build_quiz_prompt(config);
        let payload = self
            .generator
            .generate_json(&prompt)
            .map_err(SourceUnavailable)?;
        let generated =
            decode_questions(&payload).map_err(|err| SourceUnavailable(err.into()))?;
        questions.extend(generated);
        Ok(questions)
    }

    /// Whether a configuration would be served entirely from the bank.
    pub fn is_local_only(&self, config: &TestConfiguration) -> bool {
        let subject = config.subject.as_deref().unwrap_or(GENERAL_STUDIES);
        lookup_pyqs(&config.exam, subject, None).len() >= self.local_fast_path
    }
}

/// Builds the kind-specific generation prompt. The payload contract
/// (question/options/correctAnswer/explanation/subject) is stated in the
/// prompt; the decode boundary enforces it.
pub fn build_quiz_prompt(config: &TestConfiguration) -> String {
    let scope = match config.kind {
        TestKind::FullMock => format!(
            "Create a full-length mock test of {count} questions for the \"{exam}\" exam. {brief} \
             Ensure the difficulty matches the real exam level.",
            count = config.question_count,
            exam = config.exam,
            brief = pattern_brief(&config.exam),
        ),
        TestKind::SubjectFocused => format!(
            "Create {count} questions specifically for the subject \"{subject}\" relevant to \
             \"{exam}\". Ensure questions vary in difficulty (Easy, Medium, Hard).",
            count = config.question_count,
            subject = config.subject.as_deref().unwrap_or_default(),
            exam = config.exam,
        ),
        TestKind::ChapterFocused => format!(
            "Create {count} questions deeply focused on the chapter/topic \"{topic}\" within the \
             subject \"{subject}\" for \"{exam}\".",
            count = config.question_count,
            topic = config.topic.as_deref().unwrap_or_default(),
            subject = config.subject.as_deref().unwrap_or_default(),
            exam = config.exam,
        ),
    };
    format!(
        "{scope}\n\nOUTPUT FORMAT: return a strict JSON array of objects with fields \
         \"question\" (string), \"options\" (array of 4 strings), \"correctAnswer\" \
         (the correct option text exactly as it appears in options), \"explanation\" \
         (string), and \"subject\" (string). No markdown, no surrounding text."
    )
}
