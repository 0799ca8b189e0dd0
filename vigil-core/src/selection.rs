//! Row selection for one list view.
//!
//! A list view owns the only `SelectionSet`; rows and toolbars read it
//! through `SelectionView` and report changes through callbacks.

use crate::resource::ResourceId;
use std::collections::BTreeSet;

/// Selected identifiers, in a stable order for bulk actions.
pub type SelectedIds = BTreeSet<ResourceId>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    ids: SelectedIds,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip membership of `id`; returns the new membership. Ids that are not
    /// in the backing list are accepted.
    pub fn toggle(&mut self, id: &ResourceId) -> bool {
        if self.ids.remove(id) {
            false
        } else {
            self.ids.insert(id.clone());
            true
        }
    }

    pub fn set_selected(&mut self, id: &ResourceId, selected: bool) {
        if selected {
            self.ids.insert(id.clone());
        } else {
            self.ids.remove(id);
        }
    }

    pub fn is_selected(&self, id: &ResourceId) -> bool {
        self.ids.contains(id)
    }

    pub fn selected_ids(&self) -> &SelectedIds {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Selected ids that are still present in `current`.
    pub fn intersect<'a>(&self, current: impl IntoIterator<Item = &'a ResourceId>) -> SelectedIds {
        current
            .into_iter()
            .filter(|id| self.ids.contains(*id))
            .cloned()
            .collect()
    }

    /// Drop every id not present in `current`; returns how many were dropped.
    pub fn retain_present<'a>(&mut self, current: impl IntoIterator<Item = &'a ResourceId>) -> usize {
        let kept = self.intersect(current);
        let dropped = self.ids.len() - kept.len();
        self.ids = kept;
        dropped
    }

    pub fn view(&self) -> SelectionView<'_> {
        SelectionView { set: self }
    }
}

/// Read-only access handed to rows and bulk toolbars.
#[derive(Debug, Clone, Copy)]
pub struct SelectionView<'a> {
    set: &'a SelectionSet,
}

impl<'a> SelectionView<'a> {
    pub fn is_selected(&self, id: &ResourceId) -> bool {
        self.set.is_selected(id)
    }

    pub fn selected_ids(&self) -> &'a SelectedIds {
        self.set.selected_ids()
    }

    pub fn len(&self) -> usize {
        self.set.len()
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    /// Tri-state of the bulk header checkbox over the given rows.
    pub fn header_state<'b>(&self, rows: impl IntoIterator<Item = &'b ResourceId>) -> HeaderState {
        let mut total = 0usize;
        let mut checked = 0usize;
        for id in rows {
            total += 1;
            if self.set.is_selected(id) {
                checked += 1;
            }
        }
        if checked == 0 {
            HeaderState::Unchecked
        } else if checked == total {
            HeaderState::Checked
        } else {
            HeaderState::Indeterminate
        }
    }
}

/// Bulk header checkbox state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderState {
    Unchecked,
    Indeterminate,
    Checked,
}
