//! Filter input for a list toolbar.

use crate::theme::Theme;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub struct FilterBar<'a> {
    pub query: &'a str,
    pub editing: bool,
    pub loading: bool,
    pub theme: &'a Theme,
}

impl<'a> FilterBar<'a> {
    pub fn render(&self, f: &mut Frame<'_>, area: Rect) {
        let line = if self.query.is_empty() && !self.editing {
            Line::from(Span::styled(
                "/ to filter by name",
                Style::default().fg(self.theme.text_muted),
            ))
        } else {
            let mut spans = vec![Span::styled(
                self.query.to_string(),
                Style::default().fg(self.theme.text),
            )];
            if self.editing {
                spans.push(Span::styled("▏", Style::default().fg(self.theme.primary)));
            }
            Line::from(spans)
        };
        let title = if self.loading { "Filter (loading…)" } else { "Filter" };
        let paragraph = Paragraph::new(line).block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(self.theme.border_style(self.editing)),
        );
        f.render_widget(paragraph, area);
    }
}
