//! Composition root for one test-taking flow.
//!
//! `TestEngine` owns the mutex-guarded session, the question source, the
//! countdown timer, and the event log, and exposes exactly the operations
//! the presentation layer may dispatch. The presentation layer reads
//! state through `snapshot()` and never touches session fields directly.

use std::sync::{Arc, Mutex};

use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

use crate::chat::StudyChat;
use crate::config::AppConfig;
use crate::events::{EventType, SessionEventLog};
use crate::plans::{self, StudyPlan};
use crate::questions::{Question, TestConfiguration, TestKind};
use crate::session::{Phase, Session, SessionError, SessionTimer, TestResult};
use crate::source::{QuestionSource, RemoteGenerator, SourceUnavailable};

/// Why `start_test` did not reach `InProgress`.
#[derive(Debug, Error)]
pub enum StartTestError {
    /// Wrong phase or invalid configuration; the session is unchanged
    /// (or back in `Configuring` with its configuration kept).
    #[error(transparent)]
    Session(#[from] SessionError),
    /// The question source failed; the session is back in `Configuring`
    /// and `start_test` may be re-attempted.
    #[error(transparent)]
    Source(#[from] SourceUnavailable),
}

/// Read model handed to the presentation layer.
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub session_id: Uuid,
    pub phase: Phase,
    pub kind: Option<TestKind>,
    pub current_index: usize,
    pub total_questions: usize,
    pub current_question: Option<Question>,
    pub current_selection: Option<String>,
    pub answered: Vec<usize>,
    pub review_marked: Vec<usize>,
    pub remaining_secs: u32,
    pub elapsed_secs: u32,
}

/// Facade over one session lifecycle. Dropping the engine discards the
/// session and stops its timer; nothing survives except the event log.
pub struct TestEngine {
    session: Arc<Mutex<Session>>,
    source: QuestionSource,
    timer: Option<SessionTimer>,
    log: Option<Arc<SessionEventLog>>,
}

impl TestEngine {
    pub fn new(source: QuestionSource) -> Self {
        Self {
            session: Arc::new(Mutex::new(Session::new())),
            source,
            timer: None,
            log: None,
        }
    }

    /// Wires up the engine from the per-install configuration.
    pub fn from_config(generator: Arc<dyn RemoteGenerator>, config: &AppConfig) -> Self {
        Self::new(QuestionSource::from_settings(generator, &config.source))
    }

    pub fn with_event_log(mut self, log: SessionEventLog) -> Self {
        self.log = Some(Arc::new(log));
        self
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Session> {
        // A panicked tick must not cascade into every later operation;
        // the session data itself is still coherent.
        self.session
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn log_event(&self, session_id: Uuid, event_type: EventType, details: serde_json::Value) {
        // Best effort: a logging failure never fails a user operation.
        if let Some(log) = &self.log {
            let _ = log.append(session_id, event_type, details);
        }
    }

    pub fn select_kind(&self, kind: TestKind) -> Result<(), SessionError> {
        self.lock().select_kind(kind)
    }

    /// Runs the full `Configuring → Loading → InProgress` transition.
    ///
    /// The session lock is released while the question source resolves;
    /// the `Loading` phase guard keeps user operations (including a
    /// second `start_test`) out in the meantime. On source failure the
    /// session returns to `Configuring` for a re-attempt.
    pub fn start_test(&mut self, config: TestConfiguration) -> Result<(), StartTestError> {
        let session_id = {
            let mut session = self.lock();
            session.begin_loading(config.clone())?;
            session.id()
        };

        let questions = match self.source.resolve(&config) {
            Ok(questions) => questions,
            Err(err) => {
                self.lock().abort_loading()?;
                return Err(err.into());
            }
        };

        let local_only = self.source.is_local_only(&config);
        let total = questions.len();
        self.lock().complete_loading(questions)?;

        self.log_event(
            session_id,
            EventType::SourceResolved,
            json!({
                "exam": config.exam,
                "provenance": if local_only { "bank" } else { "bank+generated" },
                "questions": total,
            }),
        );
        self.log_event(
            session_id,
            EventType::SessionStarted,
            json!({
                "kind": config.kind,
                "exam": config.exam,
                "duration_minutes": config.duration_minutes,
            }),
        );

        if config.duration_minutes > 0 {
            let log = self.log.clone();
            self.timer = Some(SessionTimer::spawn_with(
                Arc::clone(&self.session),
                move |result| {
                    if let Some(log) = log {
                        let _ = log.append(
                            session_id,
                            EventType::TestExpired,
                            json!({
                                "correct": result.correct_count,
                                "total": result.total,
                                "percentage": result.percentage,
                            }),
                        );
                    }
                },
            ));
        }
        Ok(())
    }

    /// Records an answer for the current question (write-once).
    pub fn answer(&self, option: impl Into<String>) -> Result<bool, SessionError> {
        self.lock().answer(option)
    }

    pub fn toggle_review(&self) -> Result<bool, SessionError> {
        self.lock().toggle_review()
    }

    pub fn go_to(&self, index: usize) -> Result<(), SessionError> {
        self.lock().go_to(index)
    }

    /// Submits the test. Idempotent once completed.
    pub fn submit(&mut self) -> Result<TestResult, SessionError> {
        let (session_id, result, already_completed) = {
            let mut session = self.lock();
            let already_completed = session.phase() == Phase::Completed;
            let result = session.submit()?;
            (session.id(), result, already_completed)
        };
        // Stop the cadence after releasing the lock; joining while the
        // timer thread waits on the session would deadlock.
        if let Some(mut timer) = self.timer.take() {
            timer.stop();
        }
        if !already_completed {
            self.log_event(
                session_id,
                EventType::TestSubmitted,
                json!({
                    "correct": result.correct_count,
                    "total": result.total,
                    "percentage": result.percentage,
                    "elapsed_secs": result.elapsed_secs,
                }),
            );
        }
        Ok(result)
    }

    /// Abandons the current session (navigation away). Nothing is
    /// persisted and no background work continues.
    pub fn discard(&mut self) {
        if let Some(mut timer) = self.timer.take() {
            timer.stop();
        }
        let (session_id, phase) = {
            let session = self.lock();
            (session.id(), session.phase())
        };
        if phase == Phase::InProgress {
            self.log_event(session_id, EventType::SessionDiscarded, json!({}));
        }
        *self.lock() = Session::new();
    }

    /// Starts a fresh `Selecting` session; the only way to run another
    /// test after completion.
    pub fn reset(&mut self) {
        self.discard();
    }

    /// Immutable read model for rendering.
    pub fn snapshot(&self) -> SessionView {
        let session = self.lock();
        SessionView {
            session_id: session.id(),
            phase: session.phase(),
            kind: session.kind(),
            current_index: session.current_index(),
            total_questions: session.questions().len(),
            current_question: session.current_question().cloned(),
            current_selection: session
                .selected_answer(session.current_index())
                .map(str::to_string),
            answered: (0..session.questions().len())
                .filter(|&i| session.selected_answer(i).is_some())
                .collect(),
            review_marked: session.review_marks().collect(),
            remaining_secs: session.remaining_secs(),
            elapsed_secs: session.elapsed_secs(),
        }
    }

    /// The frozen result, once the session is completed.
    pub fn result(&self) -> Option<TestResult> {
        self.lock().result().cloned()
    }

    /// Opens a tutoring chat over the same generator seam as question
    /// resolution. The chat owns its transcript independently of the
    /// session lifecycle.
    pub fn study_chat(&self) -> StudyChat {
        StudyChat::new(self.source.generator())
    }

    /// Generates a study plan through the same generator seam as question
    /// resolution.
    pub fn study_plan(
        &self,
        exam: &str,
        level: &str,
        hours_per_day: u32,
    ) -> Result<StudyPlan, SourceUnavailable> {
        let generator = self.source.generator();
        let plan = plans::generate_study_plan(generator.as_ref(), exam, level, hours_per_day)?;
        let session_id = self.lock().id();
        self.log_event(
            session_id,
            EventType::PlanGenerated,
            json!({"exam": exam, "level": level, "hours_per_day": hours_per_day}),
        );
        Ok(plan)
    }
}

impl Drop for TestEngine {
    fn drop(&mut self) {
        if let Some(mut timer) = self.timer.take() {
            timer.stop();
        }
    }
}
