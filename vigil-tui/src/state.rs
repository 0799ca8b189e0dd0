//! Application state and event handling.
//!
//! `App` is driven entirely by [`App::handle_event`]. Work that needs the
//! data source is queued as [`Request`]s and picked up by the event loop
//! with [`App::take_requests`].

use crate::commands::{detail_actions, Command, CommandSender};
use crate::config::TuiConfig;
use crate::events::{Completion, Loaded, TuiEvent};
use crate::geometry::{toolbar_widths, ToolbarWidths};
use crate::keys::{map_key, Action, InputMode};
use crate::nav::View;
use crate::notifications::{Notification, NotificationLevel, Notifications};
use crate::pane::{ListPane, ResourceListState};
use crate::persistence::PersistedState;
use crate::poller::LivePoller;
use crate::source::{Mutation, NewSilence, Request, Target};
use crate::theme::Theme;
use chrono::Utc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use vigil_core::{
    Activation, AdaptiveToolbar, ConfirmPrompt, Entity, Event, Poller, Resource, ResourceId,
    Silence,
};

const NOTIFICATION_TTL_SECS: i64 = 6;

/// Filter text being edited for one list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterEdit {
    pub view: View,
    pub buffer: String,
}

/// The "New Silence…" form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SilenceForm {
    pub subscription: String,
    pub check: String,
    pub reason: String,
    pub expire_on_resolve: bool,
    pub focus: usize,
}

impl SilenceForm {
    pub const FIELDS: [&'static str; 4] = ["Subscription", "Check", "Reason", "Expire on resolve"];

    fn field_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            0 => Some(&mut self.subscription),
            1 => Some(&mut self.check),
            2 => Some(&mut self.reason),
            _ => None,
        }
    }

    pub fn input(&mut self, c: char) {
        match self.field_mut() {
            Some(field) => field.push(c),
            None if c == ' ' => self.expire_on_resolve = !self.expire_on_resolve,
            None => {}
        }
    }

    pub fn backspace(&mut self) {
        if let Some(field) = self.field_mut() {
            field.pop();
        }
    }

    pub fn next_field(&mut self) {
        self.focus = (self.focus + 1) % Self::FIELDS.len();
    }

    pub fn to_new_silence(&self) -> NewSilence {
        fn non_empty(value: &str) -> Option<String> {
            let value = value.trim();
            (!value.is_empty()).then(|| value.to_string())
        }
        NewSilence {
            subscription: non_empty(&self.subscription),
            check: non_empty(&self.check),
            reason: non_empty(&self.reason),
            expire_on_resolve: self.expire_on_resolve,
        }
    }
}

/// The event shown in the details view and its toolbar.
pub struct EventDetailState {
    pub event: Option<Event>,
    pub toolbar: AdaptiveToolbar<Event>,
}

pub struct App {
    pub config: TuiConfig,
    pub theme: Theme,
    pub active_view: View,
    pub entities: ResourceListState<Entity>,
    pub events: ResourceListState<Event>,
    pub silences: ResourceListState<Silence>,
    pub detail: EventDetailState,
    pub filter_edit: Option<FilterEdit>,
    pub silence_form: Option<SilenceForm>,
    pub help_visible: bool,
    pub notifications: Notifications,
    pub poller: LivePoller,
    pub widths: ToolbarWidths,
    sender: CommandSender,
    requests: Vec<Request>,
}

impl App {
    pub fn new(config: TuiConfig, sender: mpsc::UnboundedSender<TuiEvent>) -> Self {
        let sender = CommandSender::new(sender);
        let toolbar = config.toolbar.clone();
        let poller = LivePoller::new(Duration::from_millis(config.refresh_interval_ms));
        Self {
            theme: Theme::default_theme(),
            active_view: View::Entities,
            entities: ResourceListState::new(View::Entities, &toolbar, &sender),
            events: ResourceListState::new(View::Events, &toolbar, &sender),
            silences: ResourceListState::new(View::Silences, &toolbar, &sender),
            detail: EventDetailState {
                event: None,
                toolbar: AdaptiveToolbar::new(toolbar.metrics()),
            },
            filter_edit: None,
            silence_form: None,
            help_visible: false,
            notifications: Notifications::default(),
            poller,
            widths: ToolbarWidths::default(),
            config,
            sender,
            requests: Vec::new(),
        }
    }

    pub fn notify(&mut self, level: NotificationLevel, message: impl Into<String>) {
        self.notifications.push(Notification::new(level, message));
    }

    // ========================================================================
    // Lists
    // ========================================================================

    pub fn pane(&self, view: View) -> Option<&dyn ListPane> {
        match view {
            View::Entities => Some(&self.entities),
            View::Events => Some(&self.events),
            View::Silences => Some(&self.silences),
            View::EventDetail => None,
        }
    }

    pub fn pane_mut(&mut self, view: View) -> Option<&mut dyn ListPane> {
        match view {
            View::Entities => Some(&mut self.entities),
            View::Events => Some(&mut self.events),
            View::Silences => Some(&mut self.silences),
            View::EventDetail => None,
        }
    }

    fn panes_mut(&mut self) -> [&mut dyn ListPane; 3] {
        [&mut self.entities, &mut self.events, &mut self.silences]
    }

    pub fn restore(&mut self, state: &PersistedState) {
        self.active_view = state.active_view.tab();
        for pane in self.panes_mut() {
            let query = state.query(pane.view()).to_string();
            pane.restore_query(&query);
        }
    }

    pub fn persisted_state(&self) -> PersistedState {
        PersistedState {
            active_view: self.active_view.tab(),
            entities_query: self.entities.query().to_string(),
            events_query: self.events.query().to_string(),
            silences_query: self.silences.query().to_string(),
        }
    }

    /// Hand queued data-source work to the caller.
    pub fn take_requests(&mut self) -> Vec<Request> {
        std::mem::take(&mut self.requests)
    }

    pub fn request_fetch(&mut self, view: View) {
        let view = view.tab();
        if let Some(pane) = self.pane_mut(view) {
            pane.set_loading(true);
            let query = pane.query().to_string();
            self.requests.push(Request::Fetch { view, query });
        }
    }

    pub fn request_all(&mut self) {
        for view in View::all() {
            self.request_fetch(*view);
        }
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.widths = toolbar_widths(width, height);
        let widths = self.widths;
        for pane in self.panes_mut() {
            pane.resize(widths);
        }
        self.detail.toolbar.resize(widths.detail);
    }

    /// Rebuild every toolbar's descriptors from current data.
    pub fn sync(&mut self) {
        for pane in self.panes_mut() {
            pane.sync();
        }
        match &self.detail.event {
            Some(event) => {
                let actions = detail_actions(event, self.poller.running(), &self.sender);
                self.detail.toolbar.update(actions);
            }
            None => self.detail.toolbar.update(Vec::new()),
        }
    }

    // ========================================================================
    // Modes
    // ========================================================================

    pub fn is_confirming(&self) -> bool {
        match self.active_view {
            View::EventDetail => self.detail.toolbar.is_confirming(),
            view => self.pane(view).is_some_and(|pane| pane.is_confirming()),
        }
    }

    pub fn prompt(&self) -> Option<&ConfirmPrompt> {
        match self.active_view {
            View::EventDetail => self.detail.toolbar.prompt(),
            view => self.pane(view).and_then(|pane| pane.prompt()),
        }
    }

    pub fn is_menu_open(&self) -> bool {
        match self.active_view {
            View::EventDetail => self.detail.toolbar.is_menu_open(),
            view => self.pane(view).is_some_and(|pane| pane.is_menu_open()),
        }
    }

    pub fn input_mode(&self) -> InputMode {
        if self.is_confirming() {
            InputMode::Confirm
        } else if self.filter_edit.is_some() || self.silence_form.is_some() {
            InputMode::Text
        } else if self.is_menu_open() {
            InputMode::Menu
        } else {
            InputMode::Normal
        }
    }

    // ========================================================================
    // Events
    // ========================================================================

    /// Apply one event. Returns true when the app should quit.
    pub fn handle_event(&mut self, event: TuiEvent) -> bool {
        let quit = match event {
            TuiEvent::Input(key) => match map_key(key, self.input_mode()) {
                Some(action) => self.handle_action(action),
                None => false,
            },
            TuiEvent::Tick => {
                self.tick(Instant::now());
                false
            }
            TuiEvent::Resize { width, height } => {
                self.resize(width, height);
                false
            }
            TuiEvent::Command(command) => {
                self.apply_command(command);
                false
            }
            TuiEvent::Loaded(loaded) => {
                self.apply_loaded(loaded);
                false
            }
            TuiEvent::Completed(completion) => {
                self.apply_completion(completion);
                false
            }
            TuiEvent::SourceError(message) => {
                for pane in self.panes_mut() {
                    pane.set_loading(false);
                }
                self.notify(NotificationLevel::Error, message);
                false
            }
        };
        self.sync();
        quit
    }

    fn tick(&mut self, now: Instant) {
        self.notifications.expire(
            Utc::now(),
            chrono::Duration::seconds(NOTIFICATION_TTL_SECS),
        );
        if self.poller.due(now) {
            self.poller.mark_refreshed(now);
            self.request_fetch(self.active_view);
        }
    }

    pub fn handle_action(&mut self, action: Action) -> bool {
        if action == Action::Quit {
            return true;
        }
        match self.input_mode() {
            InputMode::Confirm => self.handle_confirm(action),
            InputMode::Text => self.handle_text(action),
            InputMode::Menu => self.handle_menu(action),
            InputMode::Normal => self.handle_normal(action),
        }
        false
    }

    fn handle_confirm(&mut self, action: Action) {
        let view = self.active_view;
        match (action, view) {
            (Action::Confirm, View::EventDetail) => {
                self.detail.toolbar.confirm();
            }
            (Action::Cancel, View::EventDetail) => {
                self.detail.toolbar.cancel();
            }
            (Action::Confirm, _) => {
                if let Some(pane) = self.pane_mut(view) {
                    pane.confirm();
                }
            }
            (Action::Cancel, _) => {
                if let Some(pane) = self.pane_mut(view) {
                    pane.cancel();
                }
            }
            _ => {}
        }
    }

    fn handle_text(&mut self, action: Action) {
        if let Some(form) = self.silence_form.as_mut() {
            match action {
                Action::Input(c) => form.input(c),
                Action::Backspace => form.backspace(),
                Action::NextField => form.next_field(),
                Action::Cancel => self.silence_form = None,
                Action::Confirm => self.submit_silence_form(),
                _ => {}
            }
            return;
        }
        let Some(edit) = self.filter_edit.as_mut() else {
            return;
        };
        match action {
            Action::Input(c) => edit.buffer.push(c),
            Action::Backspace => {
                edit.buffer.pop();
            }
            Action::Cancel => self.filter_edit = None,
            Action::Confirm => {
                if let Some(edit) = self.filter_edit.take() {
                    if let Some(pane) = self.pane_mut(edit.view) {
                        pane.set_query(&edit.buffer);
                    }
                }
            }
            _ => {}
        }
    }

    fn submit_silence_form(&mut self) {
        let Some(form) = self.silence_form.as_ref() else {
            return;
        };
        let silence = form.to_new_silence();
        if !silence.is_valid() {
            self.notify(
                NotificationLevel::Warning,
                "A silence needs a subscription or a check.",
            );
            return;
        }
        self.silence_form = None;
        self.requests.push(Request::CreateSilence(silence));
    }

    fn handle_menu(&mut self, action: Action) {
        let view = self.active_view;
        if view == View::EventDetail {
            let toolbar = &mut self.detail.toolbar;
            match action {
                Action::MoveDown => toolbar.highlight_next(),
                Action::MoveUp => toolbar.highlight_previous(),
                Action::Cancel => toolbar.close_menu(),
                Action::Activate => {
                    if let Some(event) = self.detail.event.clone() {
                        toolbar.activate_highlighted(event);
                    }
                }
                Action::Shortcut(c) => {
                    if let Some(event) = self.detail.event.clone() {
                        toolbar.activate_shortcut(c, event);
                    }
                }
                _ => {}
            }
            return;
        }
        let Some(pane) = self.pane_mut(view) else {
            return;
        };
        match action {
            Action::MoveDown => pane.highlight_next(),
            Action::MoveUp => pane.highlight_previous(),
            Action::Cancel => pane.close_menus(),
            Action::Activate => {
                pane.activate_highlighted();
            }
            Action::Shortcut(c) => {
                pane.activate_shortcut(c);
            }
            _ => {}
        }
    }

    fn handle_normal(&mut self, action: Action) {
        if self.help_visible {
            self.help_visible = false;
            return;
        }
        let view = self.active_view;
        match action {
            Action::NextView => self.switch_view(view.next()),
            Action::PrevView => self.switch_view(view.previous()),
            Action::SwitchView(index) => {
                if let Some(next) = View::from_index(index) {
                    self.switch_view(next);
                }
            }
            Action::OpenHelp => self.help_visible = true,
            Action::TogglePoller => self.toggle_poller(),
            Action::Refresh => self.request_fetch(view),
            Action::Cancel if view == View::EventDetail => self.switch_view(View::Events),
            Action::Cancel => {
                self.notifications.dismiss_latest();
            }
            Action::Activate if view == View::Events => self.open_event_detail(),
            Action::OpenRowMenu if view == View::EventDetail => {
                self.detail.toolbar.toggle_menu();
            }
            Action::Shortcut(c) if view == View::EventDetail => {
                if let Some(event) = self.detail.event.clone() {
                    let outcome = self.detail.toolbar.activate_shortcut(c, event);
                    self.report_activation(outcome);
                }
            }
            Action::EditFilter if view.is_list() => {
                let buffer = self.pane(view).map(|pane| pane.query().to_string());
                if let Some(buffer) = buffer {
                    self.filter_edit = Some(FilterEdit { view, buffer });
                }
            }
            other => {
                let Some(pane) = self.pane_mut(view) else {
                    return;
                };
                let outcome = match other {
                    Action::MoveDown => {
                        pane.focus_next();
                        None
                    }
                    Action::MoveUp => {
                        pane.focus_previous();
                        None
                    }
                    Action::ToggleSelect => {
                        pane.toggle_focused();
                        None
                    }
                    Action::ToggleAll => {
                        pane.toggle_all();
                        None
                    }
                    Action::OpenRowMenu => {
                        pane.open_row_menu();
                        None
                    }
                    Action::OpenListMenu => {
                        pane.open_list_menu();
                        None
                    }
                    Action::Shortcut(c) => Some(pane.activate_shortcut(c)),
                    _ => None,
                };
                if let Some(outcome) = outcome {
                    self.report_activation(outcome);
                }
            }
        }
    }

    fn report_activation(&mut self, outcome: Activation) {
        if outcome == Activation::Disabled {
            self.notify(NotificationLevel::Info, "That action is not available here.");
        }
    }

    pub fn switch_view(&mut self, view: View) {
        if let Some(pane) = self.pane_mut(self.active_view) {
            pane.close_menus();
        }
        self.detail.toolbar.outside_interaction();
        self.filter_edit = None;
        self.active_view = view;
    }

    fn open_event_detail(&mut self) {
        let Some(event) = self.events.list.focused_record().cloned() else {
            return;
        };
        self.events.close_menus();
        self.detail.event = Some(event);
        self.active_view = View::EventDetail;
    }

    fn toggle_poller(&mut self) {
        self.poller.toggle();
        if self.poller.running() {
            self.notify(NotificationLevel::Info, "Live updates resumed.");
        } else {
            self.notify(NotificationLevel::Info, "Live updates paused.");
        }
    }

    // ========================================================================
    // Commands and data-source results
    // ========================================================================

    pub fn apply_command(&mut self, command: Command) {
        match command {
            Command::Select { view, change } => {
                if let Some(pane) = self.pane_mut(view) {
                    pane.apply_selection(&change);
                }
            }
            Command::Query { view, .. } => self.request_fetch(view),
            Command::Mutate {
                view,
                op,
                ids,
                bulk,
            } => {
                let targets = self.resolve_targets(view, &ids);
                if targets.is_empty() {
                    tracing::debug!(view = view.title(), "mutation targets vanished");
                    return;
                }
                self.requests.push(Request::Mutate {
                    view,
                    op,
                    ids,
                    targets,
                    bulk,
                });
            }
            Command::Reset(view) => {
                if let Some(pane) = self.pane_mut(view) {
                    pane.set_query("");
                }
            }
            Command::NewSilence => self.silence_form = Some(SilenceForm::default()),
            Command::TogglePoller => self.toggle_poller(),
        }
    }

    fn resolve_targets(&self, view: View, ids: &[ResourceId]) -> Vec<Target> {
        match view {
            View::Entities => ids
                .iter()
                .filter_map(|id| self.entities.list.record(id))
                .map(Target::entity)
                .collect(),
            View::Events | View::EventDetail => ids
                .iter()
                .filter_map(|id| {
                    self.events.list.record(id).or_else(|| {
                        self.detail
                            .event
                            .as_ref()
                            .filter(|event| &event.id() == id)
                    })
                })
                .map(Target::event)
                .collect(),
            View::Silences => ids
                .iter()
                .filter_map(|id| self.silences.list.record(id))
                .map(Target::silence)
                .collect(),
        }
    }

    pub fn apply_loaded(&mut self, loaded: Loaded) {
        let view = loaded.view();
        let current = self.pane(view).map(|pane| pane.query().to_string());
        if current.as_deref() != Some(loaded.query()) {
            tracing::debug!(view = view.title(), "dropping stale listing");
            return;
        }
        match loaded {
            Loaded::Entities { records, .. } => self.entities.replace(records),
            Loaded::Events { records, .. } => {
                self.events.replace(records);
                self.refresh_detail();
            }
            Loaded::Silences { records, .. } => self.silences.replace(records),
        }
    }

    fn refresh_detail(&mut self) {
        let Some(id) = self.detail.event.as_ref().map(Resource::id) else {
            return;
        };
        match self.events.list.record(&id) {
            Some(event) => self.detail.event = Some(event.clone()),
            None if self.events.query().is_empty() => self.close_detail("The event no longer exists."),
            None => {}
        }
    }

    fn close_detail(&mut self, reason: &str) {
        self.detail.event = None;
        if self.active_view == View::EventDetail {
            self.active_view = View::Events;
            self.notify(NotificationLevel::Warning, reason);
        }
    }

    pub fn apply_completion(&mut self, completion: Completion) {
        let Completion { view, op, ids, bulk } = completion;
        let noun = match (view, ids.len()) {
            (View::Entities, 1) => "entity",
            (View::Entities, _) => "entities",
            (View::Silences, 1) => "silence",
            (View::Silences, _) => "silences",
            (_, 1) => "event",
            (_, _) => "events",
        };
        let message = if view == View::Silences && op == Mutation::Silence {
            "Created silence.".to_string()
        } else {
            format!("{} {} {}.", op.past_tense(), ids.len(), noun)
        };
        self.notify(NotificationLevel::Success, message);

        if op == Mutation::Delete {
            if let Some(pane) = self.pane_mut(view.tab()) {
                pane.remove(&ids);
            }
            let detail_deleted = self
                .detail
                .event
                .as_ref()
                .is_some_and(|event| ids.contains(&event.id()));
            if detail_deleted {
                self.detail.event = None;
                if self.active_view == View::EventDetail {
                    self.active_view = View::Events;
                }
            }
        }
        if bulk {
            if let Some(pane) = self.pane_mut(view.tab()) {
                pane.clear_selection();
            }
        }
        self.request_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AuthConfig, ThemeConfig, ToolbarConfig};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use vigil_core::{CheckStatus, EntitySystem, HeaderState};

    fn config() -> TuiConfig {
        TuiConfig {
            api_base_url: "http://localhost:8080".to_string(),
            namespace: "default".to_string(),
            auth: AuthConfig {
                api_key: Some("key".to_string()),
                access_token: None,
            },
            request_timeout_ms: 5_000,
            refresh_interval_ms: 2_000,
            persistence_path: "tmp/state.json".into(),
            log_path: "tmp/vigil.log".into(),
            fixture_path: None,
            toolbar: ToolbarConfig {
                overflow_width: 3,
                item_padding: 3,
                collapse_below: 20,
            },
            theme: ThemeConfig {
                name: "default".to_string(),
            },
        }
    }

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

    fn app() -> (App, mpsc::UnboundedReceiver<TuiEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut app = App::new(config(), tx);
        app.resize(160, 40);
        app.handle_event(TuiEvent::Loaded(Loaded::Entities {
            query: String::new(),
            records: vec![entity("web-01"), entity("web-02"), entity("db-01")],
        }));
        (app, rx)
    }

    fn press(app: &mut App, rx: &mut mpsc::UnboundedReceiver<TuiEvent>, code: KeyCode) {
        app.handle_event(TuiEvent::Input(KeyEvent::new(code, KeyModifiers::NONE)));
        while let Ok(event) = rx.try_recv() {
            app.handle_event(event);
        }
    }

    #[test]
    fn space_selects_through_the_owner() {
        let (mut app, mut rx) = app();
        press(&mut app, &mut rx, KeyCode::Char(' '));
        assert_eq!(app.entities.selected_count(), 1);
        assert_eq!(app.entities.list.header_state(), HeaderState::Indeterminate);
        press(&mut app, &mut rx, KeyCode::Char(' '));
        assert_eq!(app.entities.selected_count(), 0);
    }

    #[test]
    fn bulk_delete_waits_for_confirmation() {
        let (mut app, mut rx) = app();
        press(&mut app, &mut rx, KeyCode::Char('a'));
        assert_eq!(app.entities.selected_count(), 3);

        press(&mut app, &mut rx, KeyCode::Char('D'));
        assert_eq!(app.input_mode(), InputMode::Confirm);
        assert!(app.take_requests().is_empty());

        press(&mut app, &mut rx, KeyCode::Enter);
        let requests = app.take_requests();
        assert_eq!(requests.len(), 1);
        match &requests[0] {
            Request::Mutate {
                op, targets, bulk, ..
            } => {
                assert_eq!(*op, Mutation::Delete);
                assert_eq!(targets.len(), 3);
                assert!(*bulk);
            }
            other => panic!("unexpected request {:?}", other),
        }
    }

    #[test]
    fn cancelled_row_delete_sends_nothing() {
        let (mut app, mut rx) = app();
        press(&mut app, &mut rx, KeyCode::Char('.'));
        assert_eq!(app.input_mode(), InputMode::Menu);
        press(&mut app, &mut rx, KeyCode::Char('d'));
        assert_eq!(app.input_mode(), InputMode::Confirm);
        assert!(app.prompt().is_some_and(|p| p.message.contains("web-01")));
        press(&mut app, &mut rx, KeyCode::Esc);
        assert_eq!(app.input_mode(), InputMode::Normal);
        assert!(app.take_requests().is_empty());
    }

    #[test]
    fn completed_bulk_action_clears_selection_and_refetches() {
        let (mut app, mut rx) = app();
        press(&mut app, &mut rx, KeyCode::Char('a'));
        app.take_requests();
        app.handle_event(TuiEvent::Completed(Completion {
            view: View::Entities,
            op: Mutation::Delete,
            ids: vec![ResourceId::from("web-01")],
            bulk: true,
        }));
        assert_eq!(app.entities.selected_count(), 0);
        assert_eq!(app.entities.len(), 2);
        assert_eq!(app.take_requests().len(), View::all().len());
    }

    #[test]
    fn filter_edit_forwards_query() {
        let (mut app, mut rx) = app();
        app.take_requests();
        press(&mut app, &mut rx, KeyCode::Char('/'));
        for c in "web".chars() {
            press(&mut app, &mut rx, KeyCode::Char(c));
        }
        press(&mut app, &mut rx, KeyCode::Enter);
        assert_eq!(app.entities.query(), "web");
        let requests = app.take_requests();
        assert!(requests.iter().any(|r| matches!(
            r,
            Request::Fetch { view: View::Entities, query } if query == "web"
        )));
    }

    #[test]
    fn stale_listing_is_dropped() {
        let (mut app, _rx) = app();
        app.entities.restore_query("db");
        app.handle_event(TuiEvent::Loaded(Loaded::Entities {
            query: String::new(),
            records: vec![entity("web-01")],
        }));
        assert_eq!(app.entities.len(), 3);
    }

    #[test]
    fn selection_survives_refetch_only_for_present_rows() {
        let (mut app, mut rx) = app();
        press(&mut app, &mut rx, KeyCode::Char('a'));
        app.handle_event(TuiEvent::Loaded(Loaded::Entities {
            query: String::new(),
            records: vec![entity("web-02")],
        }));
        assert_eq!(app.entities.selected_count(), 1);
        assert_eq!(app.entities.list.header_state(), HeaderState::Checked);
    }

    #[test]
    fn persisted_state_round_trips_queries() {
        let (mut app, _rx) = app();
        app.entities.restore_query("web");
        app.active_view = View::EventDetail;
        let state = app.persisted_state();
        assert_eq!(state.active_view, View::Events);

        let (tx, _rx2) = mpsc::unbounded_channel();
        let mut restored = App::new(config(), tx);
        restored.restore(&state);
        assert_eq!(restored.entities.query(), "web");
        assert_eq!(restored.active_view, View::Events);
    }
}
