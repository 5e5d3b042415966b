//! Navigation behaviour: collapsible menu, anchor resolution and scroll spy.

use super::page::{Page, PageLayout};

/// Rows above a section's top at which it already counts as current (~150 px).
pub const SPY_OFFSET: u32 = 3;

/// Below this terminal width the nav links collapse behind a toggle.
pub const MENU_BREAKPOINT: u16 = 72;

/// Hamburger glyph shown while the menu is closed.
pub const ICON_CLOSED: &str = "☰";
/// Close glyph shown while the menu is open.
pub const ICON_OPEN: &str = "✕";

// ───────────────────────────────────────── links ─────────────

/// A link in the navigation bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub href: String,
    pub label: String,
}

/// One link per section, in page order.
pub fn nav_links(page: &Page) -> Vec<NavLink> {
    page.sections
        .iter()
        .map(|s| NavLink {
            href: s.href(),
            label: s.title.clone(),
        })
        .collect()
}

// ───────────────────────────────────────── menu ──────────────

/// Open/closed state of the collapsed navigation menu.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MobileMenu {
    open: bool,
}

impl MobileMenu {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn icon(&self) -> &'static str {
        if self.open { ICON_OPEN } else { ICON_CLOSED }
    }

    /// A click landed somewhere.  Closes the menu when the click was outside
    /// both the menu and its toggle.  Returns `true` if the menu closed.
    pub fn click(&mut self, inside_menu: bool, on_toggle: bool) -> bool {
        if self.open && !inside_menu && !on_toggle {
            self.open = false;
            return true;
        }
        false
    }
}

// ───────────────────────────────────────── anchors ───────────

/// What following an in-page link does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorJump {
    /// A bare `#`: swallowed, the page stays put.
    Stay,
    /// Smooth-scroll so that this row is at the top.
    ScrollTo(u32),
}

/// Resolve `href` against the laid-out page.  `None` means the link is not
/// an in-page anchor or names no section, and is left alone.
pub fn resolve_anchor(layout: &PageLayout, href: &str) -> Option<AnchorJump> {
    let id = href.strip_prefix('#')?;
    if id.is_empty() {
        return Some(AnchorJump::Stay);
    }
    layout.section_top(id).map(AnchorJump::ScrollTo)
}

// ───────────────────────────────────────── scroll spy ────────

/// Id of the section the reader is in at scroll position `scroll`: the last
/// section whose top, less [`SPY_OFFSET`], has been scrolled past.
pub fn active_section(layout: &PageLayout, scroll: u32) -> Option<&str> {
    layout
        .sections
        .iter()
        .rev()
        .find(|s| scroll.saturating_add(SPY_OFFSET) >= s.bounds.top)
        .map(|s| s.id.as_str())
}

/// Index of the link whose href is `#<active>`.
pub fn active_link(links: &[NavLink], active: Option<&str>) -> Option<usize> {
    let active = active?;
    links
        .iter()
        .position(|l| l.href.strip_prefix('#') == Some(active))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (Page, PageLayout) {
        let page = Page::parse(
            "section id=home\ntext hi\nsection id=work\ntext a\ntext b\nsection id=contact\nform",
            false,
        )
        .unwrap();
        let layout = PageLayout::compute(&page, 80);
        (page, layout)
    }

    #[test]
    fn menu_toggles_icon() {
        let mut menu = MobileMenu::default();
        assert_eq!(menu.icon(), ICON_CLOSED);
        menu.toggle();
        assert!(menu.is_open());
        assert_eq!(menu.icon(), ICON_OPEN);
        menu.toggle();
        assert_eq!(menu.icon(), ICON_CLOSED);
    }

    #[test]
    fn outside_click_closes_open_menu_only() {
        let mut menu = MobileMenu::default();
        assert!(!menu.click(false, false));

        menu.toggle();
        assert!(!menu.click(true, false));
        assert!(!menu.click(false, true));
        assert!(menu.is_open());
        assert!(menu.click(false, false));
        assert!(!menu.is_open());
    }

    #[test]
    fn anchors_resolve_to_section_tops() {
        let (_, layout) = sample();
        assert_eq!(resolve_anchor(&layout, "#"), Some(AnchorJump::Stay));
        assert_eq!(resolve_anchor(&layout, "#home"), Some(AnchorJump::ScrollTo(0)));
        assert_eq!(
            resolve_anchor(&layout, "#work"),
            layout.section_top("work").map(AnchorJump::ScrollTo)
        );
        assert_eq!(resolve_anchor(&layout, "#missing"), None);
        assert_eq!(resolve_anchor(&layout, "https://example.com"), None);
    }

    #[test]
    fn spy_picks_last_section_passed() {
        let (page, layout) = sample();
        let links = nav_links(&page);
        let work = layout.section_top("work").unwrap();

        assert_eq!(active_section(&layout, 0), Some("home"));
        assert_eq!(active_section(&layout, work - SPY_OFFSET - 1), Some("home"));
        assert_eq!(active_section(&layout, work - SPY_OFFSET), Some("work"));
        assert_eq!(active_link(&links, active_section(&layout, work)), Some(1));
        assert_eq!(active_section(&layout, layout.height), Some("contact"));
    }

    #[test]
    fn no_section_means_no_active_link() {
        let layout = PageLayout::default();
        assert_eq!(active_section(&layout, 10), None);
        assert_eq!(active_link(&[], None), None);
    }
}
