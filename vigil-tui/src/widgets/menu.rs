//! Overflow menu popup.

use crate::theme::Theme;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState},
    Frame,
};
use vigil_core::AdaptiveToolbar;

pub struct OverflowPanel<'a, P> {
    pub toolbar: &'a AdaptiveToolbar<P>,
    pub theme: &'a Theme,
}

impl<'a, P> OverflowPanel<'a, P> {
    /// Cells needed to show every entry: label, shortcut hint, border.
    pub fn size(&self) -> (u16, u16) {
        let widest = self
            .toolbar
            .overflow_items()
            .map(|item| item.label().chars().count() + 4)
            .max()
            .unwrap_or(0);
        let rows = self.toolbar.overflow_items().count();
        let width = u16::try_from(widest + 4).unwrap_or(u16::MAX).max(16);
        let height = u16::try_from(rows + 2).unwrap_or(u16::MAX);
        (width, height)
    }

    pub fn render(&self, f: &mut Frame<'_>, area: Rect) {
        let items: Vec<ListItem> = self
            .toolbar
            .overflow_items()
            .map(|item| {
                let style = self
                    .theme
                    .action_style(item.is_disabled(), item.is_destructive());
                let mut spans = vec![Span::styled(item.label().to_string(), style)];
                if let Some(key) = item.shortcut_key() {
                    spans.push(Span::styled(
                        format!("  {}", key),
                        Style::default().fg(self.theme.text_muted),
                    ));
                }
                ListItem::new(Line::from(spans))
            })
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(self.theme.border_style(true))
                    .style(Style::default().bg(self.theme.bg)),
            )
            .highlight_style(self.theme.highlight_style());

        let mut state = ListState::default();
        state.select(Some(self.toolbar.menu().highlighted()));
        f.render_widget(Clear, area);
        f.render_stateful_widget(list, area, &mut state);
    }
}
