//! Per-list UI state: a core `ListView` plus the callbacks wired into it.
//!
//! `ListPane` erases the record type so the app can route keys to
//! whichever list is active without matching on it everywhere.

use crate::commands::{bulk_callbacks, list_actions, query_callback, row_callbacks, CommandSender};
use crate::config::ToolbarConfig;
use crate::geometry::ToolbarWidths;
use crate::nav::View;
use vigil_core::{
    ActionItem, Activation, BulkCallbacks, ConfirmPrompt, ListView, Resource, ResourceId,
    RowCallbacks, SelectedIds, SelectionChange,
};

/// Which of a list's menus is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOwner {
    Row,
    List,
}

pub struct ResourceListState<R> {
    view: View,
    pub list: ListView<R>,
    loading: bool,
    row_callbacks: RowCallbacks<R>,
    bulk_callbacks: BulkCallbacks,
    list_actions: Vec<ActionItem<SelectedIds>>,
}

impl<R: Resource + Clone + 'static> ResourceListState<R> {
    pub fn new(view: View, toolbar: &ToolbarConfig, sender: &CommandSender) -> Self {
        let mut list = ListView::new(toolbar.metrics(), toolbar.collapse_below);
        list.toolbar_mut()
            .set_on_change_query(query_callback(view, sender));
        let mut state = Self {
            view,
            list,
            loading: false,
            row_callbacks: row_callbacks(view, sender),
            bulk_callbacks: bulk_callbacks(view, sender),
            list_actions: list_actions(view, sender),
        };
        state.sync();
        state
    }

    pub fn replace(&mut self, records: Vec<R>) {
        self.list.replace(records);
        self.loading = false;
        self.sync();
    }

    pub fn menu_owner(&self) -> Option<MenuOwner> {
        if self.list.toolbar().toolbar().is_menu_open() {
            Some(MenuOwner::List)
        } else if self
            .list
            .focused_row()
            .is_some_and(|row| row.toolbar().is_menu_open())
        {
            Some(MenuOwner::Row)
        } else {
            None
        }
    }
}

/// Operations the app performs on the active list.
pub trait ListPane {
    fn view(&self) -> View;
    fn query(&self) -> &str;
    /// Store and forward a new filter value.
    fn set_query(&mut self, query: &str);
    /// Store a filter value without triggering a fetch.
    fn restore_query(&mut self, query: &str);
    fn is_loading(&self) -> bool;
    fn set_loading(&mut self, loading: bool);
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
    fn selected_count(&self) -> usize;

    fn apply_selection(&mut self, change: &SelectionChange);
    fn toggle_focused(&mut self);
    fn toggle_all(&mut self);
    fn clear_selection(&mut self);
    fn remove(&mut self, ids: &[ResourceId]);

    fn focus_next(&mut self);
    fn focus_previous(&mut self);

    fn open_row_menu(&mut self) -> bool;
    fn open_list_menu(&mut self) -> bool;
    fn is_menu_open(&self) -> bool;
    fn close_menus(&mut self);
    fn highlight_next(&mut self);
    fn highlight_previous(&mut self);
    fn activate_highlighted(&mut self) -> Activation;
    /// Row shortcuts take precedence over list shortcuts; with a menu open
    /// only that menu's toolbar is searched.
    fn activate_shortcut(&mut self, key: char) -> Activation;

    fn is_confirming(&self) -> bool;
    fn prompt(&self) -> Option<&ConfirmPrompt>;
    fn confirm(&mut self) -> bool;
    fn cancel(&mut self) -> bool;

    fn resize(&mut self, widths: ToolbarWidths);
    fn sync(&mut self);
}

impl<R: Resource + Clone + 'static> ListPane for ResourceListState<R> {
    fn view(&self) -> View {
        self.view
    }

    fn query(&self) -> &str {
        self.list.toolbar().query()
    }

    fn set_query(&mut self, query: &str) {
        self.list.toolbar_mut().set_query(query);
    }

    fn restore_query(&mut self, query: &str) {
        self.list.toolbar_mut().restore_query(query);
    }

    fn is_loading(&self) -> bool {
        self.loading
    }

    fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    fn len(&self) -> usize {
        self.list.records().len()
    }

    fn selected_count(&self) -> usize {
        self.list.selected_ids().len()
    }

    fn apply_selection(&mut self, change: &SelectionChange) {
        self.list.apply_selection(change);
    }

    fn toggle_focused(&mut self) {
        if let Some(row) = self.list.focused_row() {
            row.toggle(self.list.selection(), &self.row_callbacks);
        }
    }

    fn toggle_all(&mut self) {
        self.list.toggle_all();
    }

    fn clear_selection(&mut self) {
        self.list.clear_selection();
    }

    fn remove(&mut self, ids: &[ResourceId]) {
        for id in ids {
            self.list.remove(id);
        }
    }

    fn focus_next(&mut self) {
        self.list.focus_next();
    }

    fn focus_previous(&mut self) {
        self.list.focus_previous();
    }

    fn open_row_menu(&mut self) -> bool {
        self.list.toolbar_mut().toolbar_mut().close_menu();
        match self.list.focused_row_mut() {
            Some((row, _)) => row.toolbar_mut().toggle_menu(),
            None => false,
        }
    }

    fn open_list_menu(&mut self) -> bool {
        if let Some((row, _)) = self.list.focused_row_mut() {
            row.toolbar_mut().close_menu();
        }
        self.list.toolbar_mut().toolbar_mut().toggle_menu()
    }

    fn is_menu_open(&self) -> bool {
        self.menu_owner().is_some()
    }

    fn close_menus(&mut self) {
        self.list.close_menus();
    }

    fn highlight_next(&mut self) {
        match self.menu_owner() {
            Some(MenuOwner::List) => self.list.toolbar_mut().toolbar_mut().highlight_next(),
            Some(MenuOwner::Row) => {
                if let Some((row, _)) = self.list.focused_row_mut() {
                    row.toolbar_mut().highlight_next();
                }
            }
            None => {}
        }
    }

    fn highlight_previous(&mut self) {
        match self.menu_owner() {
            Some(MenuOwner::List) => self.list.toolbar_mut().toolbar_mut().highlight_previous(),
            Some(MenuOwner::Row) => {
                if let Some((row, _)) = self.list.focused_row_mut() {
                    row.toolbar_mut().highlight_previous();
                }
            }
            None => {}
        }
    }

    fn activate_highlighted(&mut self) -> Activation {
        match self.menu_owner() {
            Some(MenuOwner::List) => {
                let selected = self.list.selected_ids();
                self.list
                    .toolbar_mut()
                    .toolbar_mut()
                    .activate_highlighted(selected)
            }
            Some(MenuOwner::Row) => match self.list.focused_row_mut() {
                Some((row, record)) => {
                    let record = record.clone();
                    row.toolbar_mut().activate_highlighted(record)
                }
                None => Activation::Unknown,
            },
            None => Activation::Unknown,
        }
    }

    fn activate_shortcut(&mut self, key: char) -> Activation {
        let owner = self.menu_owner();
        if owner != Some(MenuOwner::List) {
            let outcome = match self.list.focused_row_mut() {
                Some((row, record)) => {
                    let record = record.clone();
                    row.toolbar_mut().activate_shortcut(key, record)
                }
                None => Activation::Unknown,
            };
            if outcome != Activation::Unknown || owner == Some(MenuOwner::Row) {
                return outcome;
            }
        }
        let selected = self.list.selected_ids();
        self.list
            .toolbar_mut()
            .toolbar_mut()
            .activate_shortcut(key, selected)
    }

    fn is_confirming(&self) -> bool {
        self.list.is_confirming()
    }

    fn prompt(&self) -> Option<&ConfirmPrompt> {
        self.list
            .toolbar()
            .toolbar()
            .prompt()
            .or_else(|| self.list.confirming_row().and_then(|row| row.toolbar().prompt()))
    }

    fn confirm(&mut self) -> bool {
        if self.list.toolbar().toolbar().is_confirming() {
            return self.list.toolbar_mut().toolbar_mut().confirm();
        }
        match self.list.confirming_row_mut() {
            Some(row) => row.toolbar_mut().confirm(),
            None => false,
        }
    }

    fn cancel(&mut self) -> bool {
        if self.list.toolbar().toolbar().is_confirming() {
            return self.list.toolbar_mut().toolbar_mut().cancel();
        }
        match self.list.confirming_row_mut() {
            Some(row) => row.toolbar_mut().cancel(),
            None => false,
        }
    }

    fn resize(&mut self, widths: ToolbarWidths) {
        self.list.resize_rows(widths.row);
        self.list.toolbar_mut().resize(widths.list);
    }

    fn sync(&mut self) {
        self.list.sync_rows(&self.row_callbacks);
        self.list
            .sync_toolbar(self.list_actions.clone(), &self.bulk_callbacks);
    }
}
