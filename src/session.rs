//! Session persistence for the list view location.
//!
//! Remembers the last location (path plus filter query) per account and
//! direction so filters survive restarts.

use crate::contributions::Direction;
use crate::filters::Location;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Persisted session state.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Session {
    /// Map of `slug:DIRECTION` to the last location string
    #[serde(default)]
    locations: HashMap<String, String>,
}

impl Session {
    /// Load the session from file.
    ///
    /// # Arguments
    /// * `path` - Path to session JSON file
    ///
    /// # Returns
    /// * `Result<Session>` - Loaded session or error
    ///
    /// # Details
    /// If the file doesn't exist, returns an empty session.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read session file: {}", path.display()))?;

        let session: Session =
            serde_json::from_str(&content).with_context(|| "Failed to parse session file")?;

        Ok(session)
    }

    /// Save the session to file, creating the parent directory if needed.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create session directory: {}", parent.display())
            })?;
        }

        let json = serde_json::to_string_pretty(self).context("Failed to serialize session")?;

        fs::write(path, json)
            .with_context(|| format!("Failed to write session file: {}", path.display()))?;

        tracing::debug!(path = %path.display(), "session saved");
        Ok(())
    }

    /// Last location for an account, or the section root if none was stored.
    pub fn location_for(&self, slug: &str, direction: Direction) -> Location {
        match self.locations.get(&session_key(slug, direction)) {
            Some(raw) => Location::parse(raw),
            None => Location::new(default_path(slug, direction)),
        }
    }

    /// Remember the current location for an account.
    pub fn remember(&mut self, slug: &str, direction: Direction, location: &Location) {
        self.locations
            .insert(session_key(slug, direction), location.to_string());
    }

    /// Forget the stored location for an account.
    pub fn forget(&mut self, slug: &str, direction: Direction) {
        self.locations.remove(&session_key(slug, direction));
    }
}

fn session_key(slug: &str, direction: Direction) -> String {
    format!("{}:{}", slug, direction)
}

/// Dashboard path for an account's contributions section.
pub fn default_path(slug: &str, direction: Direction) -> String {
    format!("/{}/admin/{}", slug, direction.section())
}
