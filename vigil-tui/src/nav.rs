//! Navigation and view switching utilities.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum View {
    Entities,
    Events,
    Silences,
    /// Drill-down from the events list; not part of the tab cycle.
    EventDetail,
}

impl View {
    pub fn title(&self) -> &'static str {
        match self {
            View::Entities => "Entities",
            View::Events => "Events",
            View::Silences => "Silences",
            View::EventDetail => "Event",
        }
    }

    /// Views reachable with Tab and the digit keys.
    pub fn all() -> &'static [View] {
        &[View::Entities, View::Events, View::Silences]
    }

    pub fn is_list(&self) -> bool {
        !matches!(self, View::EventDetail)
    }

    /// The tab a view belongs to. Event details live under Events.
    pub fn tab(&self) -> View {
        match self {
            View::EventDetail => View::Events,
            other => *other,
        }
    }

    pub fn index(&self) -> usize {
        let tab = self.tab();
        Self::all().iter().position(|v| *v == tab).unwrap_or(0)
    }

    pub fn from_index(index: usize) -> Option<View> {
        Self::all().get(index).copied()
    }

    pub fn next(&self) -> View {
        let all = Self::all();
        all[(self.index() + 1) % all.len()]
    }

    pub fn previous(&self) -> View {
        let idx = self.index();
        let all = Self::all();
        let prev = if idx == 0 { all.len() - 1 } else { idx - 1 };
        all[prev]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tab_cycle_wraps() {
        assert_eq!(View::Silences.next(), View::Entities);
        assert_eq!(View::Entities.previous(), View::Silences);
    }

    #[test]
    fn detail_cycles_from_events() {
        assert_eq!(View::EventDetail.index(), View::Events.index());
        assert_eq!(View::EventDetail.next(), View::Silences);
        assert!(!View::EventDetail.is_list());
    }
}
