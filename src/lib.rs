pub mod chat;
pub mod config;
pub mod engine;
pub mod events;
pub mod exams;
pub mod feeds;
pub mod plans;
pub mod profile;
pub mod questions;
pub mod session;
pub mod source;

// Re-export commonly used types for convenience.
pub use engine::{SessionView, StartTestError, TestEngine};
pub use questions::{ConfigurationError, Question, TestConfiguration, TestKind};
pub use session::{build_result, Phase, Session, SessionError, TestResult, Tick};
pub use source::{QuestionSource, RemoteGenerator, SourceUnavailable};
