//! Event types for the TUI event loop.

use crate::commands::Command;
use crate::nav::View;
use crate::source::Mutation;
use crossterm::event::KeyEvent;
use vigil_core::{Entity, Event, ResourceId, Silence};

#[derive(Debug)]
pub enum TuiEvent {
    Input(KeyEvent),
    Tick,
    Resize { width: u16, height: u16 },
    /// Raised by toolbar and row callbacks.
    Command(Command),
    Loaded(Loaded),
    Completed(Completion),
    SourceError(String),
}

/// A finished fetch, tagged with the query it was issued for.
#[derive(Debug)]
pub enum Loaded {
    Entities { query: String, records: Vec<Entity> },
    Events { query: String, records: Vec<Event> },
    Silences { query: String, records: Vec<Silence> },
}

impl Loaded {
    pub fn view(&self) -> View {
        match self {
            Loaded::Entities { .. } => View::Entities,
            Loaded::Events { .. } => View::Events,
            Loaded::Silences { .. } => View::Silences,
        }
    }

    pub fn query(&self) -> &str {
        match self {
            Loaded::Entities { query, .. }
            | Loaded::Events { query, .. }
            | Loaded::Silences { query, .. } => query,
        }
    }
}

/// A mutation the data source accepted.
#[derive(Debug, Clone)]
pub struct Completion {
    pub view: View,
    pub op: Mutation,
    pub ids: Vec<ResourceId>,
    pub bulk: bool,
}
