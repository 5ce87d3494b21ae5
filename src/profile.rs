//! User profile context.
//!
//! The logged-in user's details are hydrated once by the composition root
//! and passed explicitly to whatever needs them; nothing in the engine
//! reaches for global state. `clear` is the teardown half: it removes the
//! persisted file so the next hydrate starts empty.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::config::workspace_root;

pub const PROFILE_FILE_NAME: &str = "profile.toml";

/// The aspirant using this install.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct UserProfile {
    pub name: String,
    pub email: String,
    /// Exam the aspirant is primarily preparing for.
    #[serde(default)]
    pub target_exam: Option<String>,
    #[serde(default)]
    pub is_pro: bool,
}

impl UserProfile {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            target_exam: None,
            is_pro: false,
        }
    }
}

fn profile_path() -> Result<PathBuf> {
    Ok(workspace_root()?.join(PROFILE_FILE_NAME))
}

/// Hydrates the profile from the persisted store; `None` when no one has
/// signed in on this install.
pub fn load() -> Result<Option<UserProfile>> {
    let path = profile_path()?;
    if !path.exists() {
        return Ok(None);
    }
    let data =
        fs::read_to_string(&path).with_context(|| format!("Failed to read profile {:?}", path))?;
    let profile = toml::from_str(&data)
        .with_context(|| format!("Failed to parse profile {:?}", path))?;
    Ok(Some(profile))
}

pub fn save(profile: &UserProfile) -> Result<()> {
    let path = profile_path()?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, toml::to_string_pretty(profile)?)?;
    Ok(())
}

/// Removes the persisted profile (sign-out teardown).
pub fn clear() -> Result<()> {
    let path = profile_path()?;
    if path.exists() {
        fs::remove_file(&path)?;
    }
    Ok(())
}
