//! Top navigation bar and its collapsed dropdown menu.
//!
//! Geometry is computed by free functions so the input handler can hit-test
//! clicks against exactly what was drawn.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget},
};

use crate::core::nav::{MobileMenu, NavLink, MENU_BREAKPOINT};

use super::theme::Theme;

/// Columns between adjacent links.
const LINK_GAP: u16 = 1;

fn text_width(s: &str) -> u16 {
    u16::try_from(s.chars().count()).unwrap_or(u16::MAX)
}

// ───────────────────────────────────────── geometry ──────────

/// Where each nav bar element sits on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavGeometry {
    /// Links hidden behind the toggle.
    pub collapsed: bool,
    pub brand: Rect,
    /// One rect per link; empty when collapsed.
    pub links: Vec<Rect>,
    /// Menu toggle; only present when collapsed.
    pub toggle: Option<Rect>,
}

pub fn nav_geometry(area: Rect, brand: &str, links: &[NavLink]) -> NavGeometry {
    let brand_rect = Rect::new(
        area.x.saturating_add(1),
        area.y,
        text_width(brand).min(area.width.saturating_sub(1)),
        area.height.min(1),
    );

    let mut x = brand_rect.right().saturating_add(3);
    let mut rects = Vec::with_capacity(links.len());
    for link in links {
        let w = text_width(&link.label).saturating_add(2);
        rects.push(Rect::new(x, area.y, w, 1));
        x = x.saturating_add(w + LINK_GAP);
    }

    let overflows = rects.last().is_some_and(|r| r.right() > area.right());
    if area.width < MENU_BREAKPOINT || overflows {
        let toggle = Rect::new(area.right().saturating_sub(4), area.y, 3, area.height.min(1));
        return NavGeometry {
            collapsed: true,
            brand: brand_rect,
            links: Vec::new(),
            toggle: Some(toggle),
        };
    }

    NavGeometry {
        collapsed: false,
        brand: brand_rect,
        links: rects,
        toggle: None,
    }
}

/// Dropdown box under the nav bar, right-aligned in `page_area`, and the
/// row rect of each link inside it.
pub fn menu_geometry(page_area: Rect, links: &[NavLink]) -> (Rect, Vec<Rect>) {
    let widest = links.iter().map(|l| text_width(&l.label)).max().unwrap_or(0);
    let w = (widest + 6).min(page_area.width);
    let rows = u16::try_from(links.len()).unwrap_or(u16::MAX);
    let h = rows.saturating_add(2).min(page_area.height);
    let rect = Rect::new(page_area.right().saturating_sub(w), page_area.y, w, h);

    let rows = (0..h.saturating_sub(2))
        .map(|i| Rect::new(rect.x + 1, rect.y + 1 + i, w.saturating_sub(2), 1))
        .collect();
    (rect, rows)
}

// ───────────────────────────────────────── widgets ───────────

/// The one-row bar: brand, then links (or the menu toggle).
pub struct NavBar<'a> {
    pub brand: &'a str,
    pub links: &'a [NavLink],
    pub active: Option<usize>,
    pub menu: MobileMenu,
}

impl Widget for NavBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }
        let geo = nav_geometry(area, self.brand, self.links);
        buf.set_stringn(
            geo.brand.x,
            geo.brand.y,
            self.brand,
            usize::from(geo.brand.width),
            Theme::brand_style(),
        );

        if let Some(toggle) = geo.toggle {
            buf.set_string(
                toggle.x,
                toggle.y,
                format!(" {} ", self.menu.icon()),
                Theme::nav_link_style(self.menu.is_open()),
            );
            return;
        }

        for (i, (link, rect)) in self.links.iter().zip(&geo.links).enumerate() {
            buf.set_string(
                rect.x,
                rect.y,
                format!(" {} ", link.label),
                Theme::nav_link_style(self.active == Some(i)),
            );
        }
    }
}

/// The dropdown list shown while the collapsed menu is open.
pub struct MenuPopup<'a> {
    pub links: &'a [NavLink],
    pub active: Option<usize>,
    pub selected: usize,
}

impl Widget for MenuPopup<'_> {
    fn render(self, page_area: Rect, buf: &mut Buffer) {
        let (rect, _) = menu_geometry(page_area, self.links);
        Clear.render(rect, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Theme::border_style());
        let inner = block.inner(rect);
        block.render(rect, buf);

        let lines: Vec<Line> = self
            .links
            .iter()
            .enumerate()
            .map(|(i, link)| {
                let marker = if i == self.selected { "▸ " } else { "  " };
                let mut style = Theme::nav_link_style(self.active == Some(i));
                if i == self.selected {
                    style = style.patch(Theme::menu_selected_style());
                }
                Line::from(Span::styled(format!("{marker}{}", link.label), style))
            })
            .collect();
        Paragraph::new(lines).render(inner, buf);
    }
}
