//! Event details: the event's toolbar over its fields and check output.

use crate::format::{relative_time, timestamp};
use crate::geometry;
use crate::state::App;
use crate::widgets::{status_span, DetailPanel, ToolbarStrip};
use chrono::Utc;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::Span,
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn render(f: &mut Frame<'_>, app: &App, area: Rect) {
    let areas = geometry::detail(area);
    let Some(event) = app.detail.event.as_ref() else {
        let empty = Paragraph::new("No event selected.")
            .style(Style::default().fg(app.theme.text_muted))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(empty, area);
        return;
    };

    ToolbarStrip {
        toolbar: &app.detail.toolbar,
        metrics: app.config.toolbar.metrics(),
        theme: &app.theme,
        title: Some(&format!("{} on {}", event.check.name, event.entity.name)),
        focused: app.detail.toolbar.is_menu_open(),
    }
    .render(f, areas.toolbar);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(10), Constraint::Min(0)])
        .split(areas.content);

    let now = Utc::now();
    let silenced = if event.check.silenced_by.is_empty() {
        "no".to_string()
    } else {
        event.check.silenced_by.join(", ")
    };
    let last_seen = event
        .entity
        .last_seen
        .map(|ts| relative_time(ts, now))
        .unwrap_or_else(|| "never".to_string());
    let fields = vec![
        ("Status", status_span(event.check.status, &app.theme)),
        ("Check", Span::raw(event.check.name.clone())),
        ("Entity", Span::raw(event.entity.name.clone())),
        ("Class", Span::raw(event.entity.class.clone())),
        ("Namespace", Span::raw(event.namespace.clone())),
        ("Executed", Span::raw(timestamp(event.timestamp))),
        ("Last seen", Span::raw(last_seen)),
        ("Silenced by", Span::raw(silenced)),
    ];
    DetailPanel {
        title: "Event",
        fields,
        style: Style::default().fg(app.theme.secondary),
    }
    .render(f, chunks[0]);

    let output = Paragraph::new(event.check.output.clone())
        .block(Block::default().title("Output").borders(Borders::ALL))
        .wrap(Wrap { trim: false });
    f.render_widget(output, chunks[1]);
}
