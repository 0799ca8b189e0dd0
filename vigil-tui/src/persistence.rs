//! Persistence for lightweight UI state.

use crate::nav::View;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedState {
    pub active_view: View,
    #[serde(default)]
    pub entities_query: String,
    #[serde(default)]
    pub events_query: String,
    #[serde(default)]
    pub silences_query: String,
}

impl Default for PersistedState {
    fn default() -> Self {
        Self {
            active_view: View::Entities,
            entities_query: String::new(),
            events_query: String::new(),
            silences_query: String::new(),
        }
    }
}

impl PersistedState {
    /// Saved filter text for a list view.
    pub fn query(&self, view: View) -> &str {
        match view {
            View::Entities => &self.entities_query,
            View::Events | View::EventDetail => &self.events_query,
            View::Silences => &self.silences_query,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub fn load(path: &Path) -> Result<Option<PersistedState>, PersistenceError> {
    if !path.exists() {
        return Ok(None);
    }
    let contents = std::fs::read_to_string(path)?;
    let state = serde_json::from_str::<PersistedState>(&contents)?;
    Ok(Some(state))
}

pub fn save(path: &Path, state: &PersistedState) -> Result<(), PersistenceError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let contents = serde_json::to_string_pretty(state)?;
    std::fs::write(path, contents)?;
    Ok(())
}
