//! Two-phase confirmation for destructive actions.

use crate::action::ActionItem;
use std::fmt;

/// Text shown while a destructive action waits for confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmPrompt {
    pub title: String,
    pub message: String,
    pub confirm_label: String,
}

impl ConfirmPrompt {
    fn for_action<P>(action: &ActionItem<P>) -> Self {
        let title = action.label().trim_end_matches('…').to_string();
        let message = action
            .prompt_message()
            .map(str::to_string)
            .unwrap_or_else(|| format!("{}? This cannot be undone.", title));
        Self {
            confirm_label: title.clone(),
            title,
            message,
        }
    }
}

/// An action captured by `request`, together with the payload it will fire with.
pub struct PendingAction<P> {
    action: ActionItem<P>,
    payload: P,
    prompt: ConfirmPrompt,
}

impl<P> PendingAction<P> {
    pub fn action(&self) -> &ActionItem<P> {
        &self.action
    }

    pub fn payload(&self) -> &P {
        &self.payload
    }

    pub fn prompt(&self) -> &ConfirmPrompt {
        &self.prompt
    }
}

impl<P: fmt::Debug> fmt::Debug for PendingAction<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingAction")
            .field("action", &self.action.id())
            .field("payload", &self.payload)
            .finish()
    }
}

#[derive(Debug)]
pub enum GateState<P> {
    Idle,
    Open(PendingAction<P>),
}

/// Holds back a destructive handler until the user confirms.
///
/// The handler fires at most once per `request`, and only from `confirm`.
/// `confirm` and `cancel` while idle are no-ops so duplicate key delivery is
/// harmless.
#[derive(Debug)]
pub struct ConfirmGate<P> {
    state: GateState<P>,
}

impl<P> Default for ConfirmGate<P> {
    fn default() -> Self {
        Self {
            state: GateState::Idle,
        }
    }
}

impl<P> ConfirmGate<P> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &GateState<P> {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, GateState::Open(_))
    }

    pub fn pending(&self) -> Option<&PendingAction<P>> {
        match &self.state {
            GateState::Open(pending) => Some(pending),
            GateState::Idle => None,
        }
    }

    pub fn prompt(&self) -> Option<&ConfirmPrompt> {
        self.pending().map(PendingAction::prompt)
    }

    /// Open the prompt for `action`. Ignored while another prompt is open.
    pub fn request(&mut self, action: ActionItem<P>, payload: P) -> bool {
        if self.is_open() {
            tracing::debug!(action = action.id(), "confirmation already pending, request ignored");
            return false;
        }
        tracing::debug!(action = action.id(), "confirmation requested");
        let prompt = ConfirmPrompt::for_action(&action);
        self.state = GateState::Open(PendingAction {
            action,
            payload,
            prompt,
        });
        true
    }

    /// Fire the pending handler and return to idle.
    pub fn confirm(&mut self) -> bool {
        match std::mem::replace(&mut self.state, GateState::Idle) {
            GateState::Open(pending) => {
                tracing::debug!(action = pending.action.id(), "confirmation accepted");
                pending.action.handler().call(&pending.payload);
                true
            }
            GateState::Idle => false,
        }
    }

    /// Drop the pending action without firing it.
    pub fn cancel(&mut self) -> bool {
        match std::mem::replace(&mut self.state, GateState::Idle) {
            GateState::Open(pending) => {
                tracing::debug!(action = pending.action.id(), "confirmation cancelled");
                true
            }
            GateState::Idle => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::callback::Callback;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn delete_action(log: Rc<RefCell<Vec<String>>>) -> ActionItem<String> {
        ActionItem::new("delete", "Delete…")
            .destructive()
            .on_activate(Callback::new(move |row: &String| log.borrow_mut().push(row.clone())))
    }

    #[test]
    fn confirm_fires_once_with_captured_payload() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut gate = ConfirmGate::new();
        assert!(gate.request(delete_action(log.clone()), "r5".to_string()));
        assert!(gate.is_open());
        assert!(gate.confirm());
        assert!(!gate.confirm());
        assert_eq!(*log.borrow(), vec!["r5".to_string()]);
        assert!(matches!(gate.state(), GateState::Idle));
    }

    #[test]
    fn cancel_never_fires() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut gate = ConfirmGate::new();
        gate.request(delete_action(log.clone()), "r5".to_string());
        assert!(gate.cancel());
        assert!(!gate.is_open());
        assert!(!gate.confirm());
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn idle_misuse_is_a_noop() {
        let mut gate: ConfirmGate<()> = ConfirmGate::new();
        assert!(!gate.confirm());
        assert!(!gate.cancel());
        assert!(gate.prompt().is_none());
    }

    #[test]
    fn second_request_keeps_first_pending() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut gate = ConfirmGate::new();
        gate.request(delete_action(log.clone()), "first".to_string());
        assert!(!gate.request(delete_action(log.clone()), "second".to_string()));
        gate.confirm();
        assert_eq!(*log.borrow(), vec!["first".to_string()]);
    }

    #[test]
    fn prompt_defaults_from_label() {
        let mut gate = ConfirmGate::new();
        gate.request(ActionItem::<()>::new("delete", "Delete…").destructive(), ());
        let prompt = gate.prompt().unwrap();
        assert_eq!(prompt.title, "Delete");
        assert_eq!(prompt.message, "Delete? This cannot be undone.");
    }
}
