//! Screen layout shared by rendering and toolbar measurement.
//!
//! Toolbars are measured from the same splits the views draw with, so the
//! width a toolbar lays out against is exactly the width it is painted in.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Cells reserved for each row's action column.
pub const ROW_ACTIONS_WIDTH: u16 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenAreas {
    pub header: Rect,
    pub body: Rect,
    pub footer: Rect,
}

pub fn screen(area: Rect) -> ScreenAreas {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(area);
    ScreenAreas {
        header: chunks[0],
        body: chunks[1],
        footer: chunks[2],
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListAreas {
    pub filter: Rect,
    pub actions: Rect,
    pub table: Rect,
}

pub fn list(body: Rect) -> ListAreas {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(body);
    let toolbar = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(rows[0]);
    ListAreas {
        filter: toolbar[0],
        actions: toolbar[1],
        table: rows[1],
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetailAreas {
    pub toolbar: Rect,
    pub content: Rect,
}

pub fn detail(body: Rect) -> DetailAreas {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(body);
    DetailAreas {
        toolbar: rows[0],
        content: rows[1],
    }
}

/// Width inside a bordered block.
pub fn inner_width(area: Rect) -> u16 {
    area.width.saturating_sub(2)
}

pub fn row_toolbar_width(table: Rect) -> u16 {
    ROW_ACTIONS_WIDTH.min(inner_width(table) / 4)
}

/// Available width for every kind of toolbar at a given terminal size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ToolbarWidths {
    pub list: u16,
    pub row: u16,
    pub detail: u16,
}

pub fn toolbar_widths(width: u16, height: u16) -> ToolbarWidths {
    let areas = screen(Rect::new(0, 0, width, height));
    let list_areas = list(areas.body);
    let detail_areas = detail(areas.body);
    ToolbarWidths {
        list: inner_width(list_areas.actions),
        row: row_toolbar_width(list_areas.table),
        detail: inner_width(detail_areas.toolbar),
    }
}

/// A rectangle of `width` x `height` centred in `area`, clipped to it.
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

/// A popup hanging below `anchor`, right-aligned to it and kept on screen.
pub fn dropdown(anchor: Rect, screen: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(screen.width);
    let height = height.min(screen.height);
    let right = anchor.x.saturating_add(anchor.width);
    let x = right.saturating_sub(width).max(screen.x);
    let below = anchor.y.saturating_add(anchor.height);
    let bottom = screen.y.saturating_add(screen.height);
    let y = if below.saturating_add(height) <= bottom {
        below
    } else {
        bottom.saturating_sub(height)
    };
    Rect::new(x, y, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widths_follow_terminal_size() {
        let narrow = toolbar_widths(40, 20);
        let wide = toolbar_widths(200, 50);
        assert!(narrow.list < wide.list);
        assert!(wide.row <= ROW_ACTIONS_WIDTH);
        assert_eq!(wide.detail, 198);
    }

    #[test]
    fn degenerate_terminal_has_zero_widths() {
        assert_eq!(toolbar_widths(0, 0), ToolbarWidths::default());
    }

    #[test]
    fn dropdown_stays_on_screen() {
        let screen = Rect::new(0, 0, 80, 24);
        let anchor = Rect::new(60, 20, 20, 3);
        let popup = dropdown(anchor, screen, 30, 6);
        assert!(popup.x + popup.width <= 80);
        assert!(popup.y + popup.height <= 24);
    }
}
