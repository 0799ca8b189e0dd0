//! Silences list view.

use super::helpers::{muted, render_list, Column};
use crate::format::{relative_time, truncate};
use crate::state::App;
use chrono::Utc;
use ratatui::{
    layout::{Constraint, Rect},
    widgets::Cell,
    Frame,
};
use vigil_core::Silence;

fn name(silence: &Silence, _: &App) -> Cell<'static> {
    Cell::from(silence.name.clone())
}

fn creator(silence: &Silence, app: &App) -> Cell<'static> {
    if silence.creator.is_empty() {
        muted("unknown", app)
    } else {
        Cell::from(silence.creator.clone())
    }
}

fn reason(silence: &Silence, app: &App) -> Cell<'static> {
    match &silence.reason {
        Some(reason) => Cell::from(truncate(reason, 48)),
        None => muted("no reason given", app),
    }
}

fn begins(silence: &Silence, app: &App) -> Cell<'static> {
    match silence.begin {
        Some(begin) => Cell::from(relative_time(begin, Utc::now())),
        None => muted("immediately", app),
    }
}

fn expiry(silence: &Silence, app: &App) -> Cell<'static> {
    if silence.expire_on_resolve {
        Cell::from("on resolve")
    } else {
        muted("never", app)
    }
}

pub fn render(f: &mut Frame<'_>, app: &App, area: Rect) {
    let columns = [
        Column {
            title: "Name",
            width: Constraint::Percentage(25),
            cell: name,
        },
        Column {
            title: "Creator",
            width: Constraint::Length(12),
            cell: creator,
        },
        Column {
            title: "Reason",
            width: Constraint::Min(10),
            cell: reason,
        },
        Column {
            title: "Begins",
            width: Constraint::Length(16),
            cell: begins,
        },
        Column {
            title: "Expires",
            width: Constraint::Length(11),
            cell: expiry,
        },
    ];
    render_list(f, app, &app.silences, &columns, area);
}
