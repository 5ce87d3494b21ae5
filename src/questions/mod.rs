//! Question and test-configuration models shared by the bank, the source
//! adapter, and the session engine.

pub mod bank;

pub use bank::{lookup_pyqs, PyqItem};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Kind of test a session runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestKind {
    /// Full mock following the target exam's paper pattern.
    FullMock,
    /// Questions drawn from a single subject.
    SubjectFocused,
    /// Questions drawn from a single chapter/topic within a subject.
    ChapterFocused,
}

/// Immutable parameters of one test attempt, fixed before the session starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestConfiguration {
    pub kind: TestKind,
    /// Target exam identifier, e.g. "OPSC Civil Services".
    pub exam: String,
    pub question_count: u32,
    /// 0 means untimed.
    pub duration_minutes: u32,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub topic: Option<String>,
}

impl TestConfiguration {
    pub fn full_mock(exam: impl Into<String>, question_count: u32, duration_minutes: u32) -> Self {
        Self {
            kind: TestKind::FullMock,
            exam: exam.into(),
            question_count,
            duration_minutes,
            subject: None,
            topic: None,
        }
    }

    pub fn subject_focused(
        exam: impl Into<String>,
        subject: impl Into<String>,
        question_count: u32,
        duration_minutes: u32,
    ) -> Self {
        Self {
            kind: TestKind::SubjectFocused,
            exam: exam.into(),
            question_count,
            duration_minutes,
            subject: Some(subject.into()),
            topic: None,
        }
    }

    pub fn chapter_focused(
        exam: impl Into<String>,
        subject: impl Into<String>,
        topic: impl Into<String>,
        question_count: u32,
        duration_minutes: u32,
    ) -> Self {
        Self {
            kind: TestKind::ChapterFocused,
            exam: exam.into(),
            question_count,
            duration_minutes,
            subject: Some(subject.into()),
            topic: Some(topic.into()),
        }
    }

    /// Checks the cross-field invariants before a session may start.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.exam.trim().is_empty() {
            return Err(ConfigurationError::MissingExam);
        }
        if self.question_count == 0 {
            return Err(ConfigurationError::ZeroQuestionCount);
        }
        let has_subject = self
            .subject
            .as_deref()
            .map(|s| !s.trim().is_empty())
            .unwrap_or(false);
        let has_topic = self
            .topic
            .as_deref()
            .map(|t| !t.trim().is_empty())
            .unwrap_or(false);
        match self.kind {
            TestKind::FullMock => Ok(()),
            TestKind::SubjectFocused => {
                if has_subject {
                    Ok(())
                } else {
                    Err(ConfigurationError::MissingSubject)
                }
            }
            TestKind::ChapterFocused => {
                if !has_subject {
                    Err(ConfigurationError::MissingSubject)
                } else if !has_topic {
                    Err(ConfigurationError::MissingTopic)
                } else {
                    Ok(())
                }
            }
        }
    }
}

/// Violation of a `TestConfiguration` invariant, raised before any
/// question resolution is attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("target exam must not be empty")]
    MissingExam,
    #[error("question count must be at least 1")]
    ZeroQuestionCount,
    #[error("subject-focused and chapter-focused tests require a subject")]
    MissingSubject,
    #[error("chapter-focused tests require a topic")]
    MissingTopic,
}

/// One multiple-choice item, immutable for the lifetime of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub question: String,
    pub options: Vec<String>,
    /// Exact text of the correct option; always a member of `options`.
    pub correct_answer: String,
    pub explanation: String,
    #[serde(default)]
    pub subject: Option<String>,
}

impl Question {
    pub fn new(
        question: impl Into<String>,
        options: Vec<String>,
        correct_answer: impl Into<String>,
        explanation: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            question: question.into(),
            options,
            correct_answer: correct_answer.into(),
            explanation: explanation.into(),
            subject: None,
        }
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }
}
