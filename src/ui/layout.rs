//! Layout helpers: split the terminal area into regions.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Columns of blank margin either side of the page content.
pub const PAGE_PADDING: u16 = 2;

/// Screen layout: nav bar on top, scrolling page, status bar at the bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppLayout {
    pub nav_area: Rect,
    pub page_area: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    pub fn from_area(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // nav bar
                Constraint::Min(3),    // page (takes all remaining space)
                Constraint::Length(1), // status bar
            ])
            .split(area);

        Self {
            nav_area: chunks[0],
            page_area: chunks[1],
            status_area: chunks[2],
        }
    }

    /// Page content rectangle inside the side margins.
    pub fn content_area(&self) -> Rect {
        let pad = PAGE_PADDING.min(self.page_area.width / 4);
        Rect::new(
            self.page_area.x + pad,
            self.page_area.y,
            self.page_area.width.saturating_sub(pad * 2),
            self.page_area.height,
        )
    }
}

/// `true` if the cell `(col, row)` lies inside `rect`.
pub fn point_in_rect(rect: Rect, col: u16, row: u16) -> bool {
    col >= rect.x && col < rect.right() && row >= rect.y && row < rect.bottom()
}
