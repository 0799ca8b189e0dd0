//! "New Silence…" form overlay.

use crate::geometry;
use crate::state::{App, SilenceForm};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame<'_>, app: &App, form: &SilenceForm, area: Rect) {
    let theme = &app.theme;
    let values = [
        form.subscription.clone(),
        form.check.clone(),
        form.reason.clone(),
        if form.expire_on_resolve { "[x]" } else { "[ ]" }.to_string(),
    ];
    let mut lines: Vec<Line> = SilenceForm::FIELDS
        .iter()
        .zip(values)
        .enumerate()
        .map(|(index, (label, value))| {
            let focused = index == form.focus;
            let label_style = if focused {
                Style::default().fg(theme.primary).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.text_dim)
            };
            let mut spans = vec![
                Span::styled(format!("{:<18}", label), label_style),
                Span::styled(value, Style::default().fg(theme.text)),
            ];
            if focused && index < 3 {
                spans.push(Span::styled("▏", Style::default().fg(theme.primary)));
            }
            Line::from(spans)
        })
        .collect();
    lines.push(Line::from(""));
    lines.push(Line::styled(
        "Tab next field • Space toggles expiry • Enter create • Esc cancel",
        Style::default().fg(theme.text_muted),
    ));

    let popup = geometry::centered(area, 64, 9);
    let widget = Paragraph::new(Text::from(lines)).block(
        Block::default()
            .title("New Silence")
            .borders(Borders::ALL)
            .border_style(theme.border_style(true))
            .style(Style::default().bg(theme.bg)),
    );
    f.render_widget(Clear, popup);
    f.render_widget(widget, popup);
}
