//! Small inline indicators shared by the list views.

use crate::theme::{status_color, Theme};
use ratatui::{
    style::{Modifier, Style},
    text::Span,
};
use vigil_core::{CheckStatus, HeaderState};

/// Checkbox glyph for a row or the header's aggregate state.
pub fn checkbox(state: HeaderState) -> &'static str {
    match state {
        HeaderState::Unchecked => "[ ]",
        HeaderState::Indeterminate => "[-]",
        HeaderState::Checked => "[x]",
    }
}

pub fn status_span(status: CheckStatus, theme: &Theme) -> Span<'static> {
    let style = Style::default().fg(status_color(status, theme));
    let style = if status.is_ok() {
        style
    } else {
        style.add_modifier(Modifier::BOLD)
    };
    Span::styled(status.label(), style)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checkbox_glyphs_differ() {
        assert_ne!(checkbox(HeaderState::Unchecked), checkbox(HeaderState::Checked));
        assert_eq!(checkbox(HeaderState::Indeterminate), "[-]");
    }
}
