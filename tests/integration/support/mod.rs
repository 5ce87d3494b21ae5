use std::env;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use anyhow::{bail, Result};
use prepbase::RemoteGenerator;
use tempfile::TempDir;

/// Temp workspace pointed at by `PREPBASE_HOME` so nothing touches the
/// real data directory.
pub struct IntegrationHarness {
    workspace: TempDir,
}

impl IntegrationHarness {
    pub fn new() -> Self {
        let workspace = TempDir::new().expect("failed to create temp workspace");
        env::set_var("PREPBASE_HOME", workspace.path());
        Self { workspace }
    }

    pub fn workspace_path(&self) -> &Path {
        self.workspace.path()
    }
}

/// Generator that returns a fixed payload and counts its invocations.
pub struct CountingGenerator {
    payload: String,
    pub calls: Arc<AtomicUsize>,
}

impl CountingGenerator {
    pub fn new(payload: impl Into<String>) -> Self {
        Self {
            payload: payload.into(),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn call_handle(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

impl RemoteGenerator for CountingGenerator {
    fn generate_json(&self, _prompt: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.payload.clone())
    }
}

/// Generator that always fails, standing in for a down service.
pub struct FailingGenerator;

impl RemoteGenerator for FailingGenerator {
    fn generate_json(&self, _prompt: &str) -> Result<String> {
        bail!("generation service unreachable")
    }
}

/// Generator that fails the first `failures` calls and succeeds after,
/// for re-attempt flows.
pub struct FlakyGenerator {
    payload: String,
    failures: usize,
    calls: AtomicUsize,
}

impl FlakyGenerator {
    pub fn new(payload: impl Into<String>, failures: usize) -> Self {
        Self {
            payload: payload.into(),
            failures,
            calls: AtomicUsize::new(0),
        }
    }
}

impl RemoteGenerator for FlakyGenerator {
    fn generate_json(&self, _prompt: &str) -> Result<String> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if call < self.failures {
            bail!("generation service unreachable (attempt {})", call + 1);
        }
        Ok(self.payload.clone())
    }
}

/// JSON payload with `count` well-formed generated questions.
pub fn question_payload(count: usize) -> String {
    let items: Vec<String> = (0..count)
        .map(|i| {
            format!(
                r#"{{
                    "question": "Sample question {i}?",
                    "options": ["Option A{i}", "Option B{i}", "Option C{i}", "Option D{i}"],
                    "correctAnswer": "Option A{i}",
                    "explanation": "Option A{i} is correct.",
                    "subject": "Indian Polity"
                }}"#
            )
        })
        .collect();
    format!("[{}]", items.join(","))
}
