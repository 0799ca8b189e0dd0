//! Default theme and color utilities.

use crate::notifications::NotificationLevel;
use ratatui::style::{Color, Modifier, Style};
use vigil_core::CheckStatus;

#[derive(Debug, Clone)]
pub struct Theme {
    pub bg: Color,
    pub bg_highlight: Color,
    pub primary: Color,
    pub primary_dim: Color,
    pub secondary: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub info: Color,
    pub text: Color,
    pub text_dim: Color,
    pub text_muted: Color,
    pub border: Color,
    pub border_focus: Color,
}

impl Theme {
    pub fn default_theme() -> Self {
        Self {
            bg: Color::Rgb(18, 18, 24),
            bg_highlight: Color::Rgb(44, 46, 60),
            primary: Color::Rgb(118, 184, 255),
            primary_dim: Color::Rgb(64, 104, 150),
            secondary: Color::Rgb(190, 150, 255),
            success: Color::Rgb(96, 200, 120),
            warning: Color::Rgb(240, 190, 80),
            error: Color::Rgb(235, 90, 90),
            info: Color::Rgb(118, 184, 255),
            text: Color::Rgb(230, 230, 235),
            text_dim: Color::Rgb(150, 150, 160),
            text_muted: Color::Rgb(90, 90, 100),
            border: Color::Rgb(70, 72, 88),
            border_focus: Color::Rgb(118, 184, 255),
        }
    }

    pub fn border_style(&self, focused: bool) -> Style {
        Style::default().fg(if focused { self.border_focus } else { self.border })
    }

    pub fn highlight_style(&self) -> Style {
        Style::default()
            .bg(self.bg_highlight)
            .add_modifier(Modifier::BOLD)
    }

    /// Inline toolbar entry: destructive in red, disabled dimmed.
    pub fn action_style(&self, disabled: bool, destructive: bool) -> Style {
        if disabled {
            Style::default().fg(self.text_muted)
        } else if destructive {
            Style::default().fg(self.error)
        } else {
            Style::default().fg(self.primary)
        }
    }
}

pub fn status_color(status: CheckStatus, theme: &Theme) -> Color {
    match status {
        CheckStatus::OK => theme.success,
        CheckStatus::WARNING => theme.warning,
        CheckStatus::CRITICAL => theme.error,
        _ => theme.text_dim,
    }
}

pub fn notification_color(level: NotificationLevel, theme: &Theme) -> Color {
    match level {
        NotificationLevel::Info => theme.info,
        NotificationLevel::Warning => theme.warning,
        NotificationLevel::Error => theme.error,
        NotificationLevel::Success => theme.success,
    }
}
