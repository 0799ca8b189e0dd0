//! A list view: records, their rows, the selection and the list toolbar.
//!
//! The list view is the single writer of its `SelectionSet`. Rows only get a
//! `SelectionView` and report changes with `SelectionChange`, which the
//! owner applies through `apply_selection`.

use crate::action::{ActionItem, VisibilityPolicy};
use crate::callback::Callback;
use crate::layout::ToolbarMetrics;
use crate::list_toolbar::ListToolbar;
use crate::resource::{Resource, ResourceId};
use crate::row::{RowCallbacks, SelectableRow, SelectionChange};
use crate::selection::{HeaderState, SelectedIds, SelectionSet, SelectionView};
use std::collections::HashMap;

pub const SILENCE_SELECTED: &str = "silence-selected";
pub const CLEAR_SELECTED: &str = "clear-selected";
pub const DELETE_SELECTED: &str = "delete-selected";

/// Handlers for actions over the current selection.
pub struct BulkCallbacks {
    pub on_silence_selected: Callback<SelectedIds>,
    pub on_clear_selected: Callback<SelectedIds>,
    pub on_delete_selected: Callback<SelectedIds>,
}

impl Default for BulkCallbacks {
    fn default() -> Self {
        Self {
            on_silence_selected: Callback::noop(),
            on_clear_selected: Callback::noop(),
            on_delete_selected: Callback::noop(),
        }
    }
}

/// Bulk actions shown while at least one row is selected.
///
/// Silence/clear actions are only offered when `silenceable` is true.
/// Unset callbacks are skipped, so a list only gets the bulk actions its
/// owner wires up.
pub fn bulk_actions(
    selected: usize,
    silenceable: bool,
    callbacks: &BulkCallbacks,
) -> Vec<ActionItem<SelectedIds>> {
    if selected == 0 {
        return Vec::new();
    }
    let mut actions = Vec::new();
    if silenceable && callbacks.on_silence_selected.is_set() {
        actions.push(
            ActionItem::new(SILENCE_SELECTED, "Silence selected")
                .visibility(VisibilityPolicy::IfRoom)
                .shortcut('S')
                .on_activate(callbacks.on_silence_selected.clone()),
        );
    }
    if silenceable && callbacks.on_clear_selected.is_set() {
        actions.push(
            ActionItem::new(CLEAR_SELECTED, "Clear silences")
                .visibility(VisibilityPolicy::IfRoom)
                .shortcut('U')
                .on_activate(callbacks.on_clear_selected.clone()),
        );
    }
    if callbacks.on_delete_selected.is_set() {
        actions.push(
            ActionItem::new(DELETE_SELECTED, format!("Delete {} selected…", selected))
                .visibility(VisibilityPolicy::Always)
                .shortcut('D')
                .destructive()
                .confirm_message(format!(
                    "Delete {} selected item{}? This cannot be undone.",
                    selected,
                    if selected == 1 { "" } else { "s" }
                ))
                .on_activate(callbacks.on_delete_selected.clone()),
        );
    }
    actions
}

#[derive(Debug)]
pub struct ListView<R> {
    records: Vec<R>,
    rows: Vec<SelectableRow<R>>,
    selection: SelectionSet,
    focused: Option<ResourceId>,
    toolbar: ListToolbar<SelectedIds>,
    metrics: ToolbarMetrics,
    row_width: u16,
}

impl<R: Resource + Clone> ListView<R> {
    pub fn new(metrics: ToolbarMetrics, collapse_below: u16) -> Self {
        Self {
            records: Vec::new(),
            rows: Vec::new(),
            selection: SelectionSet::new(),
            focused: None,
            toolbar: ListToolbar::new(metrics, collapse_below),
            metrics,
            row_width: 0,
        }
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn record(&self, id: &ResourceId) -> Option<&R> {
        self.records.iter().find(|record| &record.id() == id)
    }

    pub fn rows(&self) -> &[SelectableRow<R>] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &ResourceId> + '_ {
        self.rows.iter().map(SelectableRow::id)
    }

    /// Replace the records after a refetch.
    ///
    /// Rows whose id survives keep their toolbar state; rows that vanished
    /// are torn down. Selection is reconciled against the new ids so stale
    /// identifiers never linger.
    pub fn replace(&mut self, records: Vec<R>) {
        let mut previous: HashMap<ResourceId, SelectableRow<R>> = self
            .rows
            .drain(..)
            .map(|row| (row.id().clone(), row))
            .collect();
        let metrics = self.metrics;
        let row_width = self.row_width;
        self.rows = records
            .iter()
            .map(|record| {
                let id = record.id();
                previous.remove(&id).unwrap_or_else(|| {
                    let mut row = SelectableRow::new(id, metrics);
                    row.resize(row_width);
                    row
                })
            })
            .collect();
        self.records = records;
        self.reconcile();
    }

    /// Insert or update one record in place.
    pub fn upsert(&mut self, record: R) {
        let id = record.id();
        if let Some(index) = self.records.iter().position(|r| r.id() == id) {
            self.records[index] = record;
        } else {
            let mut row = SelectableRow::new(id, self.metrics);
            row.resize(self.row_width);
            self.rows.push(row);
            self.records.push(record);
            self.reconcile();
        }
    }

    /// Remove a record, its row state and its selection entry.
    pub fn remove(&mut self, id: &ResourceId) -> Option<R> {
        let index = self.records.iter().position(|r| &r.id() == id)?;
        let record = self.records.remove(index);
        self.rows.retain(|row| row.id() != id);
        self.reconcile();
        Some(record)
    }

    fn reconcile(&mut self) {
        let ids: Vec<ResourceId> = self.rows.iter().map(|row| row.id().clone()).collect();
        let dropped = self.selection.retain_present(ids.iter());
        if dropped > 0 {
            tracing::debug!(dropped, "dropped stale selection entries");
        }
        let focus_valid = self
            .focused
            .as_ref()
            .is_some_and(|focused| ids.contains(focused));
        if !focus_valid {
            self.focused = ids.first().cloned();
        }
    }

    pub fn selection(&self) -> SelectionView<'_> {
        self.selection.view()
    }

    /// Apply a row's selection change. This is the only selection writer.
    pub fn apply_selection(&mut self, change: &SelectionChange) {
        self.selection.set_selected(&change.id, change.selected);
    }

    /// Selected ids still present in the list.
    pub fn selected_ids(&self) -> SelectedIds {
        self.selection.intersect(self.ids())
    }

    pub fn selected_records(&self) -> Vec<&R> {
        self.records
            .iter()
            .filter(|record| self.selection.is_selected(&record.id()))
            .collect()
    }

    pub fn header_state(&self) -> HeaderState {
        self.selection.view().header_state(self.ids())
    }

    /// Header checkbox: select every row unless all are selected already.
    pub fn toggle_all(&mut self) {
        if self.header_state() == HeaderState::Checked {
            self.selection.clear();
        } else {
            let ids: Vec<ResourceId> = self.ids().cloned().collect();
            for id in &ids {
                self.selection.set_selected(id, true);
            }
        }
    }

    /// Called after a bulk action completed successfully.
    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn focused(&self) -> Option<&ResourceId> {
        self.focused.as_ref()
    }

    pub fn focused_index(&self) -> Option<usize> {
        let focused = self.focused.as_ref()?;
        self.rows.iter().position(|row| row.id() == focused)
    }

    pub fn focused_record(&self) -> Option<&R> {
        self.focused_index().and_then(|index| self.records.get(index))
    }

    pub fn focus_next(&mut self) {
        self.move_focus(1);
    }

    pub fn focus_previous(&mut self) {
        self.move_focus(-1);
    }

    fn move_focus(&mut self, step: isize) {
        if self.rows.is_empty() {
            self.focused = None;
            return;
        }
        let len = self.rows.len() as isize;
        let next = match self.focused_index() {
            Some(index) => (index as isize + step).rem_euclid(len),
            None => 0,
        };
        if let Some(index) = self.focused_index() {
            self.rows[index].toolbar_mut().outside_interaction();
        }
        self.focused = Some(self.rows[next as usize].id().clone());
    }

    /// Focused row together with its record, for activating row actions.
    pub fn focused_row_mut(&mut self) -> Option<(&mut SelectableRow<R>, &R)> {
        let index = self.focused_index()?;
        let record = self.records.get(index)?;
        let row = self.rows.get_mut(index)?;
        Some((row, record))
    }

    pub fn focused_row(&self) -> Option<&SelectableRow<R>> {
        self.focused_index().and_then(|index| self.rows.get(index))
    }

    /// Row whose confirmation prompt is open, if any.
    pub fn confirming_row_mut(&mut self) -> Option<&mut SelectableRow<R>> {
        self.rows.iter_mut().find(|row| row.toolbar().is_confirming())
    }

    pub fn confirming_row(&self) -> Option<&SelectableRow<R>> {
        self.rows.iter().find(|row| row.toolbar().is_confirming())
    }

    /// Rebuild every row's action descriptors for this render pass.
    pub fn sync_rows(&mut self, callbacks: &RowCallbacks<R>) {
        for (row, record) in self.rows.iter_mut().zip(self.records.iter()) {
            row.sync(record, callbacks);
        }
    }

    /// Rebuild the list toolbar: the caller's actions plus bulk actions.
    pub fn sync_toolbar(&mut self, mut items: Vec<ActionItem<SelectedIds>>, bulk: &BulkCallbacks) {
        let silenceable = self.records.first().map_or(true, Resource::silenceable);
        items.extend(bulk_actions(self.selected_ids().len(), silenceable, bulk));
        self.toolbar.update(items);
    }

    pub fn resize_rows(&mut self, width: u16) {
        self.row_width = width;
        for row in &mut self.rows {
            row.resize(width);
        }
    }

    pub fn toolbar(&self) -> &ListToolbar<SelectedIds> {
        &self.toolbar
    }

    pub fn toolbar_mut(&mut self) -> &mut ListToolbar<SelectedIds> {
        &mut self.toolbar
    }

    /// Interaction outside every menu in this list (e.g. switching views).
    pub fn close_menus(&mut self) {
        self.toolbar.toolbar_mut().outside_interaction();
        for row in &mut self.rows {
            row.toolbar_mut().outside_interaction();
        }
    }

    pub fn is_confirming(&self) -> bool {
        self.toolbar.toolbar().is_confirming() || self.confirming_row().is_some()
    }
}
