//! Callbacks wired into core toolbars and rows.
//!
//! Every callback only posts a [`Command`] to the event loop; the state
//! change happens when the loop applies it, so one keypress is always
//! observed as a whole before the next draw.

use crate::events::TuiEvent;
use crate::nav::View;
use crate::source::Mutation;
use tokio::sync::mpsc;
use vigil_core::{
    poller_action, row_actions, ActionItem, BulkCallbacks, Callback, Event, Resource, ResourceId,
    RowCallbacks, SelectedIds, SelectionChange, VisibilityPolicy,
};

pub const RESET: &str = "reset";
pub const NEW_SILENCE: &str = "new-silence";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Select { view: View, change: SelectionChange },
    Query { view: View, query: String },
    Mutate {
        view: View,
        op: Mutation,
        ids: Vec<ResourceId>,
        bulk: bool,
    },
    Reset(View),
    NewSilence,
    TogglePoller,
}

/// Handle callbacks use to reach the event loop. The channel is unbounded,
/// so a command is only lost once the loop has shut down.
#[derive(Debug, Clone)]
pub struct CommandSender {
    sender: mpsc::UnboundedSender<TuiEvent>,
}

impl CommandSender {
    pub fn new(sender: mpsc::UnboundedSender<TuiEvent>) -> Self {
        Self { sender }
    }

    pub fn send(&self, command: Command) {
        if self.sender.send(TuiEvent::Command(command)).is_err() {
            tracing::debug!("event loop closed, dropped toolbar command");
        }
    }

    fn callback<A: ?Sized + 'static>(&self, build: impl Fn(&A) -> Command + 'static) -> Callback<A> {
        let sender = self.clone();
        Callback::new(move |arg: &A| sender.send(build(arg)))
    }
}

pub fn row_callbacks<R: Resource + 'static>(view: View, sender: &CommandSender) -> RowCallbacks<R> {
    let single = move |op: Mutation| {
        move |record: &R| Command::Mutate {
            view,
            op,
            ids: vec![record.id()],
            bulk: false,
        }
    };
    RowCallbacks {
        on_click_silence: sender.callback(single(Mutation::Silence)),
        on_click_clear_silence: sender.callback(single(Mutation::ClearSilence)),
        on_click_delete: sender.callback(single(Mutation::Delete)),
        on_change_selected: sender.callback(move |change: &SelectionChange| Command::Select {
            view,
            change: change.clone(),
        }),
    }
}

pub fn bulk_callbacks(view: View, sender: &CommandSender) -> BulkCallbacks {
    let bulk = move |op: Mutation| {
        move |ids: &SelectedIds| Command::Mutate {
            view,
            op,
            ids: ids.iter().cloned().collect(),
            bulk: true,
        }
    };
    BulkCallbacks {
        on_silence_selected: sender.callback(bulk(Mutation::Silence)),
        on_clear_selected: sender.callback(bulk(Mutation::ClearSilence)),
        on_delete_selected: sender.callback(bulk(Mutation::Delete)),
    }
}

pub fn query_callback(view: View, sender: &CommandSender) -> Callback<String> {
    sender.callback(move |query: &String| Command::Query {
        view,
        query: query.clone(),
    })
}

/// Actions the list toolbar shows regardless of selection.
pub fn list_actions(view: View, sender: &CommandSender) -> Vec<ActionItem<SelectedIds>> {
    let mut actions = Vec::with_capacity(2);
    if view == View::Silences {
        actions.push(
            ActionItem::new(NEW_SILENCE, "New Silence…")
                .visibility(VisibilityPolicy::Always)
                .shortcut('n')
                .on_activate(sender.callback(|_: &SelectedIds| Command::NewSilence)),
        );
    }
    actions.push(
        ActionItem::new(RESET, "Reset")
            .visibility(VisibilityPolicy::IfRoom)
            .shortcut('r')
            .on_activate(sender.callback(move |_: &SelectedIds| Command::Reset(view))),
    );
    actions
}

/// Event details toolbar: the live-refresh toggle followed by the event's
/// own row actions.
pub fn detail_actions(event: &Event, polling: bool, sender: &CommandSender) -> Vec<ActionItem<Event>> {
    let mut actions = vec![poller_action(
        polling,
        sender.callback(|_: &Event| Command::TogglePoller),
    )];
    actions.extend(row_actions(event, &row_callbacks(View::EventDetail, sender)));
    actions
}

#[cfg(test)]
mod tests {
    use super::*;
    use vigil_core::{CheckStatus, Entity, EntitySystem};

    fn entity(name: &str) -> Entity {
        Entity {
            name: name.to_string(),
            namespace: "default".to_string(),
            class: "agent".to_string(),
            status: CheckStatus::OK,
            is_silenced: false,
            last_seen: None,
            system: EntitySystem::default(),
            subscriptions: Vec::new(),
        }
    }

    fn command(event: Option<TuiEvent>) -> Option<Command> {
        match event {
            Some(TuiEvent::Command(command)) => Some(command),
            _ => None,
        }
    }

    #[test]
    fn row_callbacks_post_commands() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let sender = CommandSender::new(tx);
        let callbacks = row_callbacks::<Entity>(View::Entities, &sender);
        callbacks.on_click_delete.call(&entity("web-01"));
        assert_eq!(
            command(rx.try_recv().ok()),
            Some(Command::Mutate {
                view: View::Entities,
                op: Mutation::Delete,
                ids: vec![ResourceId::from("web-01")],
                bulk: false,
            })
        );
    }

    #[test]
    fn silences_list_offers_new_silence_first() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let sender = CommandSender::new(tx);
        let actions = list_actions(View::Silences, &sender);
        let ids: Vec<&str> = actions.iter().map(|a| a.id()).collect();
        assert_eq!(ids, [NEW_SILENCE, RESET]);
        assert_eq!(actions[0].policy(), VisibilityPolicy::Always);
        assert_eq!(list_actions(View::Entities, &sender).len(), 1);
    }

    #[test]
    fn burst_of_commands_is_delivered_in_order() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let sender = CommandSender::new(tx);
        for _ in 0..500 {
            sender.send(Command::TogglePoller);
        }
        let callbacks = row_callbacks::<Entity>(View::Entities, &sender);
        callbacks.on_click_delete.call(&entity("web-01"));

        for _ in 0..500 {
            assert_eq!(command(rx.try_recv().ok()), Some(Command::TogglePoller));
        }
        assert!(matches!(
            command(rx.try_recv().ok()),
            Some(Command::Mutate {
                op: Mutation::Delete,
                ..
            })
        ));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn closed_loop_drops_silently() {
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        CommandSender::new(tx).send(Command::NewSilence);
    }
}
