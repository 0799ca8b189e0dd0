//! View rendering dispatch.

pub mod entities;
pub mod event_detail;
pub mod events;
pub mod helpers;
pub mod silence_form;
pub mod silences;

use crate::geometry::{self, ScreenAreas};
use crate::keys::InputMode;
use crate::nav::View;
use crate::pane::{MenuOwner, ResourceListState};
use crate::state::App;
use crate::theme::notification_color;
use crate::widgets::{ConfirmDialog, OverflowPanel};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs},
    Frame,
};
use vigil_core::{AdaptiveToolbar, Poller, Resource};

const HELP: &[(&str, &str)] = &[
    ("Tab / 1-3", "switch list"),
    ("j / k", "move focus"),
    ("Space", "select row"),
    ("a", "select all / none"),
    (".", "row actions menu"),
    ("m", "list actions menu"),
    ("Enter", "open event / activate"),
    ("/", "filter by name"),
    ("p", "pause or resume live updates"),
    ("Ctrl-r", "refresh now"),
    ("Esc", "back / cancel"),
    ("q", "quit"),
];

pub fn render_view(f: &mut Frame<'_>, app: &App) {
    let screen = geometry::screen(f.size());

    render_header(f, app, screen.header);

    match app.active_view {
        View::Entities => entities::render(f, app, screen.body),
        View::Events => events::render(f, app, screen.body),
        View::Silences => silences::render(f, app, screen.body),
        View::EventDetail => event_detail::render(f, app, screen.body),
    }

    render_footer(f, app, screen.footer);
    render_overlays(f, app, &screen);
}

fn render_header(f: &mut Frame<'_>, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(34)])
        .split(area);

    let titles: Vec<Line> = View::all()
        .iter()
        .map(|view| {
            let count = app.pane(*view).map_or(0, |pane| pane.len());
            Line::from(format!("{} {} ({})", view.index() + 1, view.title(), count))
        })
        .collect();
    let tabs = Tabs::new(titles)
        .select(app.active_view.tab().index())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(
                    format!("VIGIL | {}", app.config.namespace),
                    Style::default().fg(app.theme.primary),
                )),
        )
        .style(Style::default().fg(app.theme.text_dim))
        .highlight_style(
            Style::default()
                .fg(app.theme.primary)
                .add_modifier(Modifier::BOLD),
        );
    f.render_widget(tabs, chunks[0]);

    let (label, color) = if app.poller.running() {
        ("Live", app.theme.success)
    } else {
        ("Paused", app.theme.warning)
    };
    let status = Paragraph::new(Line::from(vec![
        Span::styled(label, Style::default().fg(color).add_modifier(Modifier::BOLD)),
        Span::styled(
            format!(" every {}s", app.poller.interval().as_secs().max(1)),
            Style::default().fg(app.theme.text_dim),
        ),
    ]))
    .block(Block::default().borders(Borders::ALL).title("Updates"));
    f.render_widget(status, chunks[1]);
}

fn hint(app: &App) -> &'static str {
    match app.input_mode() {
        InputMode::Confirm => "Enter/y confirm • Esc/n cancel",
        InputMode::Menu => "j/k move • Enter run • letter shortcut • Esc close",
        InputMode::Text => "type to edit • Enter apply • Esc cancel",
        InputMode::Normal if app.active_view == View::EventDetail => {
            ". actions • letter shortcut • Esc back • q quit"
        }
        InputMode::Normal => "Space select • . row menu • m list menu • / filter • ? help • q quit",
    }
}

fn render_footer(f: &mut Frame<'_>, app: &App, area: Rect) {
    let (text, style) = match app.notifications.latest() {
        Some(note) => (
            format!("{}: {}", note.level.label(), note.message),
            Style::default().fg(notification_color(note.level, &app.theme)),
        ),
        None => (
            hint(app).to_string(),
            Style::default().fg(app.theme.text_dim),
        ),
    };
    let footer = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL))
        .style(style);
    f.render_widget(footer, area);
}

fn render_overlays(f: &mut Frame<'_>, app: &App, screen: &ScreenAreas) {
    let full = f.size();

    match app.active_view {
        View::EventDetail if app.detail.toolbar.is_menu_open() => {
            let anchor = geometry::detail(screen.body).toolbar;
            render_panel(f, app, &app.detail.toolbar, anchor, full);
        }
        View::EventDetail => {}
        view => render_list_menu(f, app, view, screen.body, full),
    }

    if let Some(form) = app.silence_form.as_ref() {
        silence_form::render(f, app, form, full);
    }

    if let Some(prompt) = app.prompt() {
        let area = geometry::centered(full, ConfirmDialog::WIDTH, ConfirmDialog::HEIGHT);
        ConfirmDialog {
            prompt,
            theme: &app.theme,
        }
        .render(f, area);
    }

    if app.help_visible {
        render_help(f, app, full);
    }
}

fn render_list_menu(f: &mut Frame<'_>, app: &App, view: View, body: Rect, full: Rect) {
    let areas = geometry::list(body);
    match view {
        View::Entities => list_menu(f, app, &app.entities, &areas, full),
        View::Events => list_menu(f, app, &app.events, &areas, full),
        View::Silences => list_menu(f, app, &app.silences, &areas, full),
        View::EventDetail => {}
    }
}

fn list_menu<R>(
    f: &mut Frame<'_>,
    app: &App,
    pane: &ResourceListState<R>,
    areas: &geometry::ListAreas,
    full: Rect,
) where
    R: Resource + Clone + 'static,
{
    let Some(anchor) = helpers::menu_anchor(pane, areas) else {
        return;
    };
    match pane.menu_owner() {
        Some(MenuOwner::List) => render_panel(f, app, pane.list.toolbar().toolbar(), anchor, full),
        Some(MenuOwner::Row) => {
            if let Some(row) = pane.list.focused_row() {
                render_panel(f, app, row.toolbar(), anchor, full);
            }
        }
        None => {}
    }
}

/// Overflow popup below `anchor`, kept inside the screen.
fn render_panel<P>(f: &mut Frame<'_>, app: &App, toolbar: &AdaptiveToolbar<P>, anchor: Rect, full: Rect) {
    let panel = OverflowPanel {
        toolbar,
        theme: &app.theme,
    };
    let (width, height) = panel.size();
    panel.render(f, geometry::dropdown(anchor, full, width, height));
}

fn render_help(f: &mut Frame<'_>, app: &App, full: Rect) {
    let lines: Vec<Line> = HELP
        .iter()
        .map(|(keys, description)| {
            Line::from(vec![
                Span::styled(
                    format!("{:<12}", keys),
                    Style::default().fg(app.theme.primary),
                ),
                Span::styled(*description, Style::default().fg(app.theme.text)),
            ])
        })
        .collect();
    let height = u16::try_from(lines.len() + 2).unwrap_or(u16::MAX);
    let area = geometry::centered(full, 48, height);
    let help = Paragraph::new(lines).block(
        Block::default()
            .title("Keys (any key closes)")
            .borders(Borders::ALL)
            .border_style(app.theme.border_style(true))
            .style(Style::default().bg(app.theme.bg)),
    );
    f.render_widget(Clear, area);
    f.render_widget(help, area);
}
