//! Append-only JSONL log of engine activity.
//!
//! One line per event under the workspace; loadable for audit and for
//! the dashboard's recent-activity strip. Best-effort from the engine's
//! point of view: a logging failure never fails a user operation.

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::workspace_root;

/// Engine activity worth a log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    SessionStarted,
    SourceResolved,
    TestSubmitted,
    TestExpired,
    SessionDiscarded,
    PlanGenerated,
    ProfileUpdated,
    ProfileCleared,
}

/// Envelope stored as one JSONL line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionEvent {
    pub event_id: Uuid,
    pub session_id: Uuid,
    pub event_type: EventType,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub details: serde_json::Value,
}

/// Wraps the events file path for the workspace.
pub struct SessionEventLog {
    events_path: PathBuf,
}

impl SessionEventLog {
    pub fn open_default() -> Result<Self> {
        Ok(Self {
            events_path: workspace_root()?.join("events.jsonl"),
        })
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            events_path: path.into(),
        }
    }

    pub fn append(
        &self,
        session_id: Uuid,
        event_type: EventType,
        details: serde_json::Value,
    ) -> Result<Uuid> {
        let event = SessionEvent {
            event_id: Uuid::new_v4(),
            session_id,
            event_type,
            timestamp: Utc::now(),
            details,
        };
        self.append_event(&event)?;
        Ok(event.event_id)
    }

    pub fn append_event(&self, event: &SessionEvent) -> Result<()> {
        if let Some(parent) = self.events_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.events_path)?;
        file.write_all(serde_json::to_string(event)?.as_bytes())?;
        file.write_all(b"\n")?;
        Ok(())
    }

    /// Loads every decodable event. A line that fails to decode (a
    /// partial write, truncation) is skipped rather than failing the
    /// whole load; the log stays readable for audit either way.
    pub fn load_events(&self) -> Result<Vec<SessionEvent>> {
        if !self.events_path.exists() {
            return Ok(Vec::new());
        }
        let data = fs::read_to_string(&self.events_path)?;
        Ok(data
            .lines()
            .filter(|l| !l.trim().is_empty())
            .filter_map(|line| serde_json::from_str(line).ok())
            .collect())
    }

    pub fn load_events_since(&self, cutoff: DateTime<Utc>) -> Result<Vec<SessionEvent>> {
        Ok(self
            .load_events()?
            .into_iter()
            .filter(|event| event.timestamp >= cutoff)
            .collect())
    }
}
