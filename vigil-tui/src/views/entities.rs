//! Entities list view.

use super::helpers::{render_list, Column};
use crate::format::{entity_description, truncate};
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
use vigil_core::Entity;

fn status(entity: &Entity, app: &App) -> Cell<'static> {
    Cell::from(Line::from(status_span(entity.status, &app.theme)))
}

fn name(entity: &Entity, app: &App) -> Cell<'static> {
    let mut line = Line::from(entity.name.clone());
    if entity.is_silenced {
        line.spans.push(Span::styled(
            " (silenced)",
            Style::default().fg(app.theme.text_muted),
        ));
    }
    Cell::from(line)
}

fn class(entity: &Entity, _: &App) -> Cell<'static> {
    Cell::from(entity.class.clone())
}

fn platform(entity: &Entity, _: &App) -> Cell<'static> {
    let system = &entity.system;
    let text = format!("{} {}", system.platform, system.platform_version);
    Cell::from(truncate(text.trim(), 24))
}

fn last_seen(entity: &Entity, app: &App) -> Cell<'static> {
    Cell::from(Line::styled(
        entity_description(entity, Utc::now()),
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
            title: "Name",
            width: Constraint::Percentage(30),
            cell: name,
        },
        Column {
            title: "Class",
            width: Constraint::Length(8),
            cell: class,
        },
        Column {
            title: "Platform",
            width: Constraint::Length(24),
            cell: platform,
        },
        Column {
            title: "Last seen",
            width: Constraint::Min(12),
            cell: last_seen,
        },
    ];
    render_list(f, app, &app.entities, &columns, area);
}
