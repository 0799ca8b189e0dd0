//! Selectable list rows and their per-row action toolbars.

use crate::action::{ActionItem, VisibilityPolicy};
use crate::callback::Callback;
use crate::layout::ToolbarMetrics;
use crate::resource::{Resource, ResourceId};
use crate::selection::SelectionView;
use crate::toolbar::{Activation, AdaptiveToolbar};

pub const SILENCE: &str = "silence";
pub const CLEAR_SILENCE: &str = "clear-silence";
pub const DELETE: &str = "delete";

/// A request to change one row's selection, sent to the owning list view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionChange {
    pub id: ResourceId,
    pub selected: bool,
}

/// Callbacks supplied by the owning list view. Unset callbacks are no-ops.
pub struct RowCallbacks<R> {
    pub on_click_silence: Callback<R>,
    pub on_click_clear_silence: Callback<R>,
    pub on_click_delete: Callback<R>,
    pub on_change_selected: Callback<SelectionChange>,
}

impl<R> Default for RowCallbacks<R> {
    fn default() -> Self {
        Self {
            on_click_silence: Callback::noop(),
            on_click_clear_silence: Callback::noop(),
            on_click_delete: Callback::noop(),
            on_change_selected: Callback::noop(),
        }
    }
}

impl<R> Clone for RowCallbacks<R> {
    fn clone(&self) -> Self {
        Self {
            on_click_silence: self.on_click_silence.clone(),
            on_click_clear_silence: self.on_click_clear_silence.clone(),
            on_click_delete: self.on_click_delete.clone(),
            on_change_selected: self.on_change_selected.clone(),
        }
    }
}

/// Build the row's action descriptors from its current data.
///
/// Silence and clear-silence have mutually exclusive enabled states driven
/// by `is_silenced`. Delete is destructive, so it always goes through the
/// row's confirmation gate.
pub fn row_actions<R: Resource>(record: &R, callbacks: &RowCallbacks<R>) -> Vec<ActionItem<R>> {
    let mut actions = Vec::with_capacity(3);
    if record.silenceable() {
        let silenced = record.is_silenced();
        actions.push(
            ActionItem::new(SILENCE, "Silence")
                .visibility(VisibilityPolicy::Never)
                .shortcut('s')
                .disabled(silenced)
                .on_activate(callbacks.on_click_silence.clone()),
        );
        actions.push(
            ActionItem::new(CLEAR_SILENCE, "Clear silence")
                .visibility(VisibilityPolicy::Never)
                .shortcut('u')
                .disabled(!silenced)
                .on_activate(callbacks.on_click_clear_silence.clone()),
        );
    }
    actions.push(
        ActionItem::new(DELETE, "Delete…")
            .visibility(VisibilityPolicy::Never)
            .shortcut('d')
            .destructive()
            .confirm_message(format!(
                "Delete {} \"{}\"? This cannot be undone.",
                record.kind(),
                record.name()
            ))
            .on_activate(callbacks.on_click_delete.clone()),
    );
    actions
}

/// Per-row state that outlives a single render pass: the row's toolbar,
/// with its overflow menu and confirmation gate.
#[derive(Debug)]
pub struct SelectableRow<R> {
    id: ResourceId,
    toolbar: AdaptiveToolbar<R>,
}

impl<R: Resource + Clone> SelectableRow<R> {
    pub fn new(id: ResourceId, metrics: ToolbarMetrics) -> Self {
        Self {
            id,
            toolbar: AdaptiveToolbar::new(metrics),
        }
    }

    pub fn id(&self) -> &ResourceId {
        &self.id
    }

    pub fn checked(&self, selection: SelectionView<'_>) -> bool {
        selection.is_selected(&self.id)
    }

    /// Report the user's checkbox interaction. The row never writes the
    /// selection itself.
    pub fn toggle(&self, selection: SelectionView<'_>, callbacks: &RowCallbacks<R>) {
        callbacks.on_change_selected.call(&SelectionChange {
            id: self.id.clone(),
            selected: !self.checked(selection),
        });
    }

    /// Rebuild the action descriptors for this render pass.
    pub fn sync(&mut self, record: &R, callbacks: &RowCallbacks<R>) {
        self.toolbar.update(row_actions(record, callbacks));
    }

    pub fn resize(&mut self, width: u16) {
        self.toolbar.resize(width);
    }

    pub fn toolbar(&self) -> &AdaptiveToolbar<R> {
        &self.toolbar
    }

    pub fn toolbar_mut(&mut self) -> &mut AdaptiveToolbar<R> {
        &mut self.toolbar
    }

    pub fn activate(&mut self, action_id: &str, record: &R) -> Activation {
        self.toolbar.activate(action_id, record.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::{CheckStatus, Entity, EntitySystem, Silence};
    use crate::selection::SelectionSet;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn entity(name: &str, silenced: bool) -> Entity {
        Entity {
            name: name.to_string(),
            namespace: "default".to_string(),
            class: "agent".to_string(),
            status: CheckStatus::OK,
            is_silenced: silenced,
            last_seen: None,
            system: EntitySystem::default(),
            subscriptions: Vec::new(),
        }
    }

    #[test]
    fn silence_actions_are_mutually_exclusive() {
        let callbacks = RowCallbacks::default();
        for silenced in [false, true] {
            let actions = row_actions(&entity("r1", silenced), &callbacks);
            let silence = actions.iter().find(|a| a.id() == SILENCE).unwrap();
            let clear = actions.iter().find(|a| a.id() == CLEAR_SILENCE).unwrap();
            assert_eq!(silence.is_disabled(), silenced);
            assert_eq!(clear.is_disabled(), !silenced);
        }
    }

    #[test]
    fn silences_only_offer_delete() {
        let silence = Silence {
            name: "entity:web-01:*".to_string(),
            namespace: "default".to_string(),
            subscription: Some("entity:web-01".to_string()),
            check: None,
            creator: "admin".to_string(),
            reason: None,
            begin: None,
            expire_on_resolve: false,
        };
        let actions = row_actions(&silence, &RowCallbacks::default());
        assert_eq!(actions.len(), 1);
        assert!(actions[0].is_destructive());
    }

    #[test]
    fn delete_is_gated_and_fires_once_on_confirm() {
        let deleted = Rc::new(RefCell::new(Vec::new()));
        let sink = deleted.clone();
        let callbacks = RowCallbacks {
            on_click_delete: Callback::new(move |e: &Entity| sink.borrow_mut().push(e.name.clone())),
            ..RowCallbacks::default()
        };
        let record = entity("r5", false);
        let mut row = SelectableRow::new(ResourceId::from("r5"), ToolbarMetrics::default());
        row.sync(&record, &callbacks);
        row.resize(20);

        assert_eq!(row.activate(DELETE, &record), Activation::Confirming);
        assert!(deleted.borrow().is_empty());
        assert!(row.toolbar_mut().confirm());
        assert_eq!(*deleted.borrow(), vec!["r5".to_string()]);

        assert_eq!(row.activate(DELETE, &record), Activation::Confirming);
        assert!(row.toolbar_mut().cancel());
        assert!(!row.toolbar().is_confirming());
        assert_eq!(deleted.borrow().len(), 1);
    }

    #[test]
    fn toggle_reports_instead_of_mutating() {
        let changes = Rc::new(RefCell::new(Vec::new()));
        let sink = changes.clone();
        let callbacks: RowCallbacks<Entity> = RowCallbacks {
            on_change_selected: Callback::new(move |c: &SelectionChange| sink.borrow_mut().push(c.clone())),
            ..RowCallbacks::default()
        };
        let selection = SelectionSet::new();
        let row: SelectableRow<Entity> = SelectableRow::new(ResourceId::from("r1"), ToolbarMetrics::default());
        row.toggle(selection.view(), &callbacks);
        assert!(selection.is_empty());
        assert_eq!(
            *changes.borrow(),
            vec![SelectionChange {
                id: ResourceId::from("r1"),
                selected: true
            }]
        );
    }
}
