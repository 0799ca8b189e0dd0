//! Adaptive toolbar: layout, overflow menu and confirmation in one place.

use crate::action::ActionItem;
use crate::gate::{ConfirmGate, ConfirmPrompt};
use crate::layout::{compute_layout, ToolbarLayout, ToolbarMetrics};
use crate::menu::{MenuHandle, OverflowMenu};

/// Outcome of activating an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    /// The handler ran.
    Fired,
    /// The action is destructive; a confirmation prompt is now open.
    Confirming,
    /// The action is disabled.
    Disabled,
    /// A confirmation prompt is open; the rest of the toolbar is inert.
    Blocked,
    /// No action with that id or shortcut.
    Unknown,
}

/// One toolbar instance: the current action descriptors, the last measured
/// width, and the transient menu/gate state that lives as long as it does.
#[derive(Debug)]
pub struct AdaptiveToolbar<P> {
    items: Vec<ActionItem<P>>,
    available_width: u16,
    metrics: ToolbarMetrics,
    layout: ToolbarLayout,
    menu: OverflowMenu,
    gate: ConfirmGate<P>,
}

impl<P> AdaptiveToolbar<P> {
    pub fn new(metrics: ToolbarMetrics) -> Self {
        Self {
            items: Vec::new(),
            available_width: 0,
            metrics,
            layout: ToolbarLayout::default(),
            menu: OverflowMenu::default(),
            gate: ConfirmGate::new(),
        }
    }

    /// Replace the descriptors for this render pass and recompute the layout.
    pub fn update(&mut self, items: Vec<ActionItem<P>>) {
        self.items = items;
        self.relayout();
    }

    /// Record a new width measurement and recompute the layout.
    pub fn resize(&mut self, available_width: u16) {
        if self.available_width != available_width {
            self.available_width = available_width;
            self.relayout();
        }
    }

    fn relayout(&mut self) {
        self.layout = compute_layout(&self.items, self.available_width, &self.metrics);
        if self.menu.is_open() {
            self.menu.clamp(self.layout.overflow.len());
        }
    }

    pub fn items(&self) -> &[ActionItem<P>] {
        &self.items
    }

    pub fn item(&self, id: &str) -> Option<&ActionItem<P>> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn available_width(&self) -> u16 {
        self.available_width
    }

    pub fn layout(&self) -> &ToolbarLayout {
        &self.layout
    }

    pub fn inline_items(&self) -> impl Iterator<Item = &ActionItem<P>> + '_ {
        self.layout.inline_items(&self.items)
    }

    pub fn overflow_items(&self) -> impl Iterator<Item = &ActionItem<P>> + '_ {
        self.layout.overflow_items(&self.items)
    }

    pub fn has_overflow(&self) -> bool {
        self.layout.has_overflow()
    }

    pub fn menu(&self) -> &OverflowMenu {
        &self.menu
    }

    pub fn is_menu_open(&self) -> bool {
        self.menu.is_open()
    }

    /// Open the overflow menu. Does nothing when there is no overflow or a
    /// confirmation is pending.
    pub fn open_menu(&mut self) -> bool {
        if self.gate.is_open() || !self.layout.has_overflow() {
            return false;
        }
        self.menu.open();
        true
    }

    pub fn close_menu(&mut self) {
        self.menu.close();
    }

    pub fn toggle_menu(&mut self) -> bool {
        if self.menu.is_open() {
            self.menu.close();
            false
        } else {
            self.open_menu()
        }
    }

    /// Interaction outside the toolbar: the overflow menu closes.
    pub fn outside_interaction(&mut self) {
        self.menu.close();
    }

    /// Close capability for content rendered inside the open menu.
    pub fn menu_handle(&mut self) -> Option<MenuHandle<'_>> {
        if self.menu.is_open() {
            Some(MenuHandle::new(&mut self.menu))
        } else {
            None
        }
    }

    pub fn highlight_next(&mut self) {
        let len = self.layout.overflow.len();
        if let Some(mut handle) = self.menu_handle() {
            handle.highlight_next(len);
        }
    }

    pub fn highlight_previous(&mut self) {
        let len = self.layout.overflow.len();
        if let Some(mut handle) = self.menu_handle() {
            handle.highlight_previous(len);
        }
    }

    pub fn highlighted_item(&self) -> Option<&ActionItem<P>> {
        if !self.menu.is_open() {
            return None;
        }
        self.layout
            .overflow
            .get(self.menu.highlighted())
            .and_then(|&idx| self.items.get(idx))
    }

    pub fn gate(&self) -> &ConfirmGate<P> {
        &self.gate
    }

    pub fn is_confirming(&self) -> bool {
        self.gate.is_open()
    }

    pub fn prompt(&self) -> Option<&ConfirmPrompt> {
        self.gate.prompt()
    }

    /// Activate the action with `id`.
    ///
    /// Destructive actions open the confirmation gate instead of firing.
    /// Activating an overflow item closes the menu.
    pub fn activate(&mut self, id: &str, payload: P) -> Activation {
        if self.gate.is_open() {
            return Activation::Blocked;
        }
        let Some(index) = self.items.iter().position(|item| item.id() == id) else {
            return Activation::Unknown;
        };
        if self.items[index].is_disabled() {
            return Activation::Disabled;
        }
        if !self.layout.is_inline(index) {
            self.menu.close();
        }

        let item = &self.items[index];
        if item.is_destructive() {
            self.gate.request(item.clone(), payload);
            Activation::Confirming
        } else {
            item.handler().call(&payload);
            Activation::Fired
        }
    }

    /// Activate the highlighted entry of the open overflow menu.
    pub fn activate_highlighted(&mut self, payload: P) -> Activation {
        let Some(id) = self.highlighted_item().map(|item| item.id().to_string()) else {
            return Activation::Unknown;
        };
        self.activate(&id, payload)
    }

    /// Activate the action bound to a shortcut key.
    pub fn activate_shortcut(&mut self, key: char, payload: P) -> Activation {
        let Some(id) = self
            .items
            .iter()
            .find(|item| item.shortcut_key() == Some(key))
            .map(|item| item.id().to_string())
        else {
            return Activation::Unknown;
        };
        self.activate(&id, payload)
    }

    pub fn confirm(&mut self) -> bool {
        self.gate.confirm()
    }

    pub fn cancel(&mut self) -> bool {
        self.gate.cancel()
    }
}
