//! List-level toolbar: filter input plus an adaptive action toolbar.

use crate::action::{ActionItem, VisibilityPolicy};
use crate::callback::Callback;
use crate::layout::ToolbarMetrics;
use crate::toolbar::AdaptiveToolbar;

/// The filter text is handed through untouched; what a query means is up
/// to whoever receives `on_change_query`. Below `collapse_below` cells every
/// action is forced into the overflow menu.
#[derive(Debug)]
pub struct ListToolbar<P> {
    query: String,
    on_change_query: Callback<String>,
    collapse_below: u16,
    source_items: Vec<ActionItem<P>>,
    toolbar: AdaptiveToolbar<P>,
}

impl<P> ListToolbar<P> {
    pub fn new(metrics: ToolbarMetrics, collapse_below: u16) -> Self {
        Self {
            query: String::new(),
            on_change_query: Callback::noop(),
            collapse_below,
            source_items: Vec::new(),
            toolbar: AdaptiveToolbar::new(metrics),
        }
    }

    pub fn set_on_change_query(&mut self, callback: Callback<String>) {
        self.on_change_query = callback;
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Store the filter value and forward it.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.on_change_query.call(&self.query);
    }

    /// Restore a filter value without notifying anyone.
    pub fn restore_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn is_collapsed(&self) -> bool {
        self.toolbar.available_width() < self.collapse_below
    }

    /// Replace the descriptors for this render pass.
    pub fn update(&mut self, items: Vec<ActionItem<P>>) {
        self.source_items = items;
        self.apply();
    }

    pub fn resize(&mut self, width: u16) {
        let was_collapsed = self.is_collapsed();
        self.toolbar.resize(width);
        if was_collapsed != self.is_collapsed() {
            self.apply();
        }
    }

    fn apply(&mut self) {
        let items = if self.is_collapsed() {
            self.source_items
                .iter()
                .map(|item| item.clone().visibility(VisibilityPolicy::Never))
                .collect()
        } else {
            self.source_items.clone()
        };
        self.toolbar.update(items);
    }

    pub fn toolbar(&self) -> &AdaptiveToolbar<P> {
        &self.toolbar
    }

    pub fn toolbar_mut(&mut self) -> &mut AdaptiveToolbar<P> {
        &mut self.toolbar
    }
}
