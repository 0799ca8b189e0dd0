//! Events list view.

use super::helpers::{render_list, Column};
use crate::format::{relative_time, truncate};
use crate::state::App;
use crate::widgets::status_span;
use chrono::Utc;
use ratatui::{
    layout::{Constraint, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Cell,
    Frame,
};
use vigil_core::Event;

fn status(event: &Event, app: &App) -> Cell<'static> {
    Cell::from(Line::from(status_span(event.check.status, &app.theme)))
}

fn entity(event: &Event, _: &App) -> Cell<'static> {
    Cell::from(event.entity.name.clone())
}

fn check(event: &Event, app: &App) -> Cell<'static> {
    let mut spans = vec![Span::raw(event.check.name.clone())];
    if event.is_silenced {
        spans.push(Span::styled(
            " (silenced)",
            Style::default().fg(app.theme.text_muted),
        ));
    }
    Cell::from(Line::from(spans))
}

fn output(event: &Event, app: &App) -> Cell<'static> {
    let first = event.check.output.lines().next().unwrap_or_default();
    Cell::from(Line::styled(
        truncate(first, 60),
        Style::default().fg(app.theme.text_dim),
    ))
}

fn executed(event: &Event, app: &App) -> Cell<'static> {
    Cell::from(Line::styled(
        relative_time(event.timestamp, Utc::now()),
        Style::default().fg(app.theme.text_dim),
    ))
}

pub fn render(f: &mut Frame<'_>, app: &App, area: Rect) {
    let columns = [
        Column {
            title: "Status",
            width: Constraint::Length(9),
            cell: status,
        },
        Column {
            title: "Entity",
            width: Constraint::Percentage(20),
            cell: entity,
        },
        Column {
            title: "Check",
            width: Constraint::Percentage(20),
            cell: check,
        },
        Column {
            title: "Output",
            width: Constraint::Min(10),
            cell: output,
        },
        Column {
            title: "Executed",
            width: Constraint::Length(16),
            cell: executed,
        },
    ];
    render_list(f, app, &app.events, &columns, area);
}
