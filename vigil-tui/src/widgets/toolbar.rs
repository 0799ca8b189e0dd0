//! Inline strip of a toolbar's actions.
//!
//! Cell accounting matches `ToolbarMetrics`: each inline action takes its
//! label plus `item_padding` cells and the affordance takes
//! `overflow_width` cells, so the strip never paints past the width the
//! layout was computed for.

use crate::theme::Theme;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use vigil_core::{AdaptiveToolbar, ToolbarMetrics};

pub const OVERFLOW_AFFORDANCE: &str = "[…]";

pub struct ToolbarStrip<'a, P> {
    pub toolbar: &'a AdaptiveToolbar<P>,
    pub metrics: ToolbarMetrics,
    pub theme: &'a Theme,
    pub title: Option<&'a str>,
    pub focused: bool,
}

impl<'a, P> ToolbarStrip<'a, P> {
    pub fn line(&self) -> Line<'static> {
        let padding = usize::from(self.metrics.item_padding);
        let left = padding.saturating_sub(1) / 2;
        let right = padding.saturating_sub(left);
        let mut spans = Vec::new();
        for item in self.toolbar.inline_items() {
            let style = self
                .theme
                .action_style(item.is_disabled(), item.is_destructive());
            spans.push(Span::styled(
                format!(
                    "{}{}{}",
                    " ".repeat(left),
                    item.label(),
                    " ".repeat(right)
                ),
                style,
            ));
        }
        if self.toolbar.has_overflow() {
            let mut style = Style::default().fg(self.theme.text_dim);
            if self.toolbar.is_menu_open() {
                style = style.fg(self.theme.primary).add_modifier(Modifier::BOLD);
            }
            let width = usize::from(self.metrics.overflow_width);
            let affordance: String = OVERFLOW_AFFORDANCE.chars().take(width).collect();
            spans.push(Span::styled(format!("{:<width$}", affordance), style));
        }
        Line::from(spans)
    }

    /// Strip without a border, for table cells.
    pub fn render_bare(&self, f: &mut Frame<'_>, area: Rect) {
        f.render_widget(Paragraph::new(self.line()), area);
    }

    pub fn render(&self, f: &mut Frame<'_>, area: Rect) {
        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border_style(self.focused));
        if let Some(title) = self.title {
            block = block.title(title);
        }
        f.render_widget(Paragraph::new(self.line()).block(block), area);
    }
}
