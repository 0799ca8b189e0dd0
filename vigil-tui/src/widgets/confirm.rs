//! Confirmation dialog for destructive actions.

use crate::theme::Theme;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use vigil_core::ConfirmPrompt;

pub struct ConfirmDialog<'a> {
    pub prompt: &'a ConfirmPrompt,
    pub theme: &'a Theme,
}

impl<'a> ConfirmDialog<'a> {
    pub const WIDTH: u16 = 52;
    pub const HEIGHT: u16 = 7;

    pub fn render(&self, f: &mut Frame<'_>, area: Rect) {
        let text = Text::from(vec![
            Line::from(self.prompt.message.clone()),
            Line::from(""),
            Line::from(vec![
                Span::styled(
                    format!(" {} ", self.prompt.confirm_label),
                    Style::default()
                        .fg(self.theme.error)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" [Enter/y]   ", Style::default().fg(self.theme.text_dim)),
                Span::styled("Cancel", Style::default().fg(self.theme.text)),
                Span::styled(" [Esc/n]", Style::default().fg(self.theme.text_dim)),
            ]),
        ]);
        let dialog = Paragraph::new(text)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .title(self.prompt.title.as_str())
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(self.theme.error))
                    .style(Style::default().bg(self.theme.bg)),
            );
        f.render_widget(Clear, area);
        f.render_widget(dialog, area);
    }
}
