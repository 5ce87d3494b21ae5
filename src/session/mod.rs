//! Test session state machine.
//!
//! A `Session` moves through `Selecting → Configuring → Loading →
//! InProgress → Completed` and never regresses; a fresh session is the
//! only way to run another test. Every mutation goes through the named
//! operations below, and each operation is guarded by the phase it is
//! legal in.

pub mod scoring;
pub mod timer;

pub use scoring::{build_result, QuestionOutcome, TestResult};
pub use timer::SessionTimer;

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::questions::{ConfigurationError, Question, TestConfiguration, TestKind};

/// Lifecycle phase of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Selecting,
    Configuring,
    Loading,
    InProgress,
    Completed,
}

/// Contract violation by a session caller.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("{operation} is not valid while the session is {phase:?}")]
    InvalidTransition {
        operation: &'static str,
        phase: Phase,
    },
    #[error("question index {index} is out of range for {len} questions")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("invalid test configuration: {0}")]
    ConfigurationInvalid(#[from] ConfigurationError),
}

/// What a clock tick did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Session is still running; remaining seconds after the tick
    /// (always 0 for untimed sessions, which only accumulate elapsed time).
    Running { remaining_secs: u32 },
    /// The countdown hit zero and the session submitted itself.
    Expired,
}

/// One test-taking attempt. Owned exclusively by the flow that created
/// it; discarded, never persisted.
#[derive(Debug)]
pub struct Session {
    id: Uuid,
    phase: Phase,
    kind: Option<TestKind>,
    config: Option<TestConfiguration>,
    questions: Vec<Question>,
    current: usize,
    answers: BTreeMap<usize, String>,
    review: BTreeSet<usize>,
    remaining_secs: u32,
    elapsed_secs: u32,
    started_at: Option<DateTime<Utc>>,
    result: Option<TestResult>,
}

impl Session {
    /// A fresh session on the kind-selection screen.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            phase: Phase::Selecting,
            kind: None,
            config: None,
            questions: Vec::new(),
            current: 0,
            answers: BTreeMap::new(),
            review: BTreeSet::new(),
            remaining_secs: 0,
            elapsed_secs: 0,
            started_at: None,
            result: None,
        }
    }

    fn guard(&self, operation: &'static str, allowed: Phase) -> Result<(), SessionError> {
        if self.phase == allowed {
            Ok(())
        } else {
            Err(SessionError::InvalidTransition {
                operation,
                phase: self.phase,
            })
        }
    }

    /// `Selecting → Configuring`. Records the chosen test kind.
    pub fn select_kind(&mut self, kind: TestKind) -> Result<(), SessionError> {
        self.guard("select_kind", Phase::Selecting)?;
        self.kind = Some(kind);
        self.phase = Phase::Configuring;
        Ok(())
    }

    /// `Configuring → Loading`. Validates the configuration and freezes
    /// it; the caller resolves questions (without holding this session)
    /// and then calls `complete_loading` or `abort_loading`.
    pub fn begin_loading(&mut self, config: TestConfiguration) -> Result<(), SessionError> {
        self.guard("start_test", Phase::Configuring)?;
        config.validate()?;
        self.config = Some(config);
        self.phase = Phase::Loading;
        Ok(())
    }

    /// `Loading → InProgress` with the resolved question list. An empty
    /// list still starts; index 0 then means "no current question".
    pub fn complete_loading(&mut self, questions: Vec<Question>) -> Result<(), SessionError> {
        self.guard("complete_loading", Phase::Loading)?;
        let duration_minutes = self
            .config
            .as_ref()
            .map(|c| c.duration_minutes)
            .unwrap_or(0);
        self.questions = questions;
        self.current = 0;
        self.answers.clear();
        self.review.clear();
        self.remaining_secs = duration_minutes.saturating_mul(60);
        self.elapsed_secs = 0;
        self.started_at = Some(Utc::now());
        self.phase = Phase::InProgress;
        Ok(())
    }

    /// `Loading → Configuring` after the source failed. The configuration
    /// is kept so the caller can re-attempt without re-entering it.
    pub fn abort_loading(&mut self) -> Result<(), SessionError> {
        self.guard("abort_loading", Phase::Loading)?;
        self.phase = Phase::Configuring;
        Ok(())
    }

    /// Records an answer for the current question. Answers are write-once
    /// (exam-integrity rule): returns `true` if this call recorded the
    /// answer, `false` if the question was already answered or there is
    /// no current question.
    pub fn answer(&mut self, option: impl Into<String>) -> Result<bool, SessionError> {
        self.guard("answer", Phase::InProgress)?;
        if self.questions.is_empty() || self.answers.contains_key(&self.current) {
            return Ok(false);
        }
        self.answers.insert(self.current, option.into());
        Ok(true)
    }

    /// Flips the review flag on the current question; returns the new
    /// membership, `false` when there is no current question.
    pub fn toggle_review(&mut self) -> Result<bool, SessionError> {
        self.guard("toggle_review", Phase::InProgress)?;
        if self.questions.is_empty() {
            return Ok(false);
        }
        if self.review.remove(&self.current) {
            Ok(false)
        } else {
            self.review.insert(self.current);
            Ok(true)
        }
    }

    /// Moves the current index. No side effects on answers or flags.
    pub fn go_to(&mut self, index: usize) -> Result<(), SessionError> {
        self.guard("go_to", Phase::InProgress)?;
        if index >= self.questions.len() {
            return Err(SessionError::IndexOutOfRange {
                index,
                len: self.questions.len(),
            });
        }
        self.current = index;
        Ok(())
    }

    /// Advances the clock by exactly one second. On a timed session the
    /// tick that reaches zero submits the session in the same call; an
    /// untimed session only accumulates elapsed time and never expires.
    pub fn tick(&mut self) -> Result<Tick, SessionError> {
        self.guard("tick", Phase::InProgress)?;
        self.elapsed_secs += 1;
        let timed = self
            .config
            .as_ref()
            .map(|c| c.duration_minutes > 0)
            .unwrap_or(false);
        if !timed {
            return Ok(Tick::Running { remaining_secs: 0 });
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            self.submit()?;
            Ok(Tick::Expired)
        } else {
            Ok(Tick::Running {
                remaining_secs: self.remaining_secs,
            })
        }
    }

    /// `InProgress → Completed`. Freezes the session and builds its
    /// result exactly once. Idempotent while completed: repeat calls
    /// return the same result.
    pub fn submit(&mut self) -> Result<TestResult, SessionError> {
        if self.phase == Phase::Completed {
            // Result is always present once Completed.
            return Ok(self.result.clone().unwrap_or_else(|| build_result(self)));
        }
        self.guard("submit", Phase::InProgress)?;
        self.phase = Phase::Completed;
        let result = build_result(self);
        self.result = Some(result.clone());
        Ok(result)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn kind(&self) -> Option<TestKind> {
        self.kind
    }

    pub fn config(&self) -> Option<&TestConfiguration> {
        self.config.as_ref()
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current)
    }

    pub fn selected_answer(&self, index: usize) -> Option<&str> {
        self.answers.get(&index).map(String::as_str)
    }

    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    pub fn is_marked_for_review(&self, index: usize) -> bool {
        self.review.contains(&index)
    }

    pub fn review_marks(&self) -> impl Iterator<Item = usize> + '_ {
        self.review.iter().copied()
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.elapsed_secs
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    /// The frozen result, present once the session is completed.
    pub fn result(&self) -> Option<&TestResult> {
        self.result.as_ref()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
