//! Contextual action descriptors.

use crate::callback::Callback;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Placement rule for one action in an adaptive toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VisibilityPolicy {
    /// Always inline, even when that overflows the available width.
    Always,
    /// Only ever shown inside the overflow menu.
    Never,
    /// Inline when there is room; the first to collapse otherwise.
    #[default]
    IfRoom,
}

/// One contextual action.
///
/// Descriptors are rebuilt on every render pass and never mutated in place;
/// `id` is the only identity they carry.
pub struct ActionItem<P> {
    id: String,
    label: String,
    handler: Callback<P>,
    disabled: bool,
    destructive: bool,
    visibility: VisibilityPolicy,
    shortcut: Option<char>,
    confirm_message: Option<String>,
}

impl<P> ActionItem<P> {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            handler: Callback::noop(),
            disabled: false,
            destructive: false,
            visibility: VisibilityPolicy::default(),
            shortcut: None,
            confirm_message: None,
        }
    }

    #[must_use]
    pub fn on_activate(mut self, handler: Callback<P>) -> Self {
        self.handler = handler;
        self
    }

    #[must_use]
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Mark as destructive: activation goes through a confirmation gate.
    #[must_use]
    pub fn destructive(mut self) -> Self {
        self.destructive = true;
        self
    }

    #[must_use]
    pub fn visibility(mut self, visibility: VisibilityPolicy) -> Self {
        self.visibility = visibility;
        self
    }

    #[must_use]
    pub fn shortcut(mut self, key: char) -> Self {
        self.shortcut = Some(key);
        self
    }

    /// Message shown by the confirmation prompt for destructive actions.
    #[must_use]
    pub fn confirm_message(mut self, message: impl Into<String>) -> Self {
        self.confirm_message = Some(message.into());
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn handler(&self) -> &Callback<P> {
        &self.handler
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn is_destructive(&self) -> bool {
        self.destructive
    }

    pub fn policy(&self) -> VisibilityPolicy {
        self.visibility
    }

    pub fn shortcut_key(&self) -> Option<char> {
        self.shortcut
    }

    pub fn prompt_message(&self) -> Option<&str> {
        self.confirm_message.as_deref()
    }
}

impl<P> Clone for ActionItem<P> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            label: self.label.clone(),
            handler: self.handler.clone(),
            disabled: self.disabled,
            destructive: self.destructive,
            visibility: self.visibility,
            shortcut: self.shortcut,
            confirm_message: self.confirm_message.clone(),
        }
    }
}

impl<P> fmt::Debug for ActionItem<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionItem")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("disabled", &self.disabled)
            .field("destructive", &self.destructive)
            .field("visibility", &self.visibility)
            .finish()
    }
}
