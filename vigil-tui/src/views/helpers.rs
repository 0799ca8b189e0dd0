//! Shared list rendering: filter, list toolbar and a checkbox table.

use crate::geometry::{self, ListAreas};
use crate::pane::{ListPane, MenuOwner, ResourceListState};
use crate::state::App;
use crate::widgets::{checkbox, FilterBar, ToolbarStrip};
use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};
use vigil_core::{HeaderState, Resource};

/// One data column of a list table.
pub struct Column<'a, R> {
    pub title: &'a str,
    pub width: Constraint,
    pub cell: fn(&R, &App) -> Cell<'static>,
}

/// Where a list's open menu should hang from.
pub fn menu_anchor<R>(pane: &ResourceListState<R>, areas: &ListAreas) -> Option<Rect>
where
    R: Resource + Clone + 'static,
{
    match pane.menu_owner()? {
        MenuOwner::List => Some(areas.actions),
        MenuOwner::Row => {
            let table = areas.table;
            let visible = table.height.saturating_sub(3);
            let index = pane
                .list
                .focused_index()
                .and_then(|index| u16::try_from(index).ok())
                .unwrap_or(0)
                .min(visible.saturating_sub(1));
            let width = geometry::row_toolbar_width(table);
            Some(Rect::new(
                (table.x + table.width).saturating_sub(width + 1),
                table.y + 2 + index,
                width,
                1,
            ))
        }
    }
}

pub fn render_list<R>(
    f: &mut Frame<'_>,
    app: &App,
    pane: &ResourceListState<R>,
    columns: &[Column<'_, R>],
    area: Rect,
) where
    R: Resource + Clone + 'static,
{
    let areas = geometry::list(area);
    let theme = &app.theme;
    let metrics = app.config.toolbar.metrics();

    let editing = app
        .filter_edit
        .as_ref()
        .filter(|edit| edit.view == pane.view());
    FilterBar {
        query: editing.map_or(pane.query(), |edit| edit.buffer.as_str()),
        editing: editing.is_some(),
        loading: pane.is_loading(),
        theme,
    }
    .render(f, areas.filter);

    let selected = pane.selected_count();
    let title = if selected > 0 {
        format!("{} selected", selected)
    } else {
        "Actions".to_string()
    };
    ToolbarStrip {
        toolbar: pane.list.toolbar().toolbar(),
        metrics,
        theme,
        title: Some(&title),
        focused: pane.menu_owner() == Some(MenuOwner::List),
    }
    .render(f, areas.actions);

    let block = Block::default()
        .title(format!("{} ({})", pane.view().title(), pane.len()))
        .borders(Borders::ALL)
        .border_style(theme.border_style(true));

    if pane.is_empty() {
        let message = if pane.is_loading() {
            "Loading…"
        } else if pane.query().is_empty() {
            "Nothing to show."
        } else {
            "No results match the filter."
        };
        let empty = Paragraph::new(message)
            .style(Style::default().fg(theme.text_muted))
            .block(block);
        f.render_widget(empty, areas.table);
        return;
    }

    let header_state = pane.list.header_state();
    let header_style = Style::default()
        .fg(theme.text_dim)
        .add_modifier(Modifier::BOLD);
    let mut header = vec![Cell::from(checkbox(header_state))];
    header.extend(columns.iter().map(|column| Cell::from(column.title)));
    header.push(Cell::from(""));

    let selection = pane.list.selection();
    let rows: Vec<Row> = pane
        .list
        .rows()
        .iter()
        .zip(pane.list.records())
        .map(|(row, record)| {
            let state = if row.checked(selection) {
                HeaderState::Checked
            } else {
                HeaderState::Unchecked
            };
            let mut cells = vec![Cell::from(checkbox(state))];
            cells.extend(columns.iter().map(|column| (column.cell)(record, app)));
            let strip = ToolbarStrip {
                toolbar: row.toolbar(),
                metrics,
                theme,
                title: None,
                focused: false,
            };
            cells.push(Cell::from(strip.line()));
            Row::new(cells)
        })
        .collect();

    let mut widths = vec![Constraint::Length(3)];
    widths.extend(columns.iter().map(|column| column.width));
    widths.push(Constraint::Length(geometry::row_toolbar_width(areas.table)));

    let table = Table::new(rows, widths)
        .header(Row::new(header).style(header_style))
        .block(block)
        .highlight_style(theme.highlight_style());

    let mut state = TableState::default();
    state.select(pane.list.focused_index());
    f.render_stateful_widget(table, areas.table, &mut state);
}

/// A dimmed placeholder cell.
pub fn muted(text: impl Into<String>, app: &App) -> Cell<'static> {
    Cell::from(Line::styled(
        text.into(),
        Style::default().fg(app.theme.text_muted),
    ))
}
