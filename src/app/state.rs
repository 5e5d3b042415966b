//! Central application state and the per-frame update.
//!
//! All mutable state lives here so that the rest of the app can be pure
//! functions over `&AppState` (rendering) or `&mut AppState` (event handling).

use std::time::Duration;

use ratatui::layout::Rect;

use crate::config::AppConfig;
use crate::core::{
    counter::CounterAnimator,
    fade::FadeIn,
    form::{ContactForm, Field},
    nav::{self, AnchorJump, MobileMenu, NavLink},
    page::{Block, ElementKind, Page, PageLayout},
    viewport::{
        IntersectionObserver, Viewport, ViewportObserver, COUNTER_POLICY, FADE_IN_POLICY,
    },
};
use crate::ui::{layout::AppLayout, nav_bar::nav_geometry, smooth_scroll::SmoothScroll};

/// What receives typed keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Page,
    /// Collapsed menu is open and takes arrow keys.
    Menu,
    Form(Field),
}

/// A message box waiting to be dismissed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub message: String,
    pub success: bool,
}

/// Top-level application state.
pub struct AppState {
    pub page: Page,
    pub brand: String,
    pub links: Vec<NavLink>,
    /// Row layout for the current terminal width.
    pub layout: PageLayout,
    pub counters: CounterAnimator,
    counter_observer: IntersectionObserver<usize>,
    pub fades: Vec<FadeIn>,
    fade_observer: IntersectionObserver<usize>,
    pub scroll: SmoothScroll,
    pub menu: MobileMenu,
    /// Highlighted row in the open menu.
    pub menu_selected: usize,
    pub form: ContactForm,
    pub focus: Focus,
    pub alert: Option<Alert>,
    /// Section id picked by the scroll spy.
    pub active_section: Option<String>,
    pub config: AppConfig,
    pub should_quit: bool,
    pub status_message: Option<String>,
    /// Full terminal area from the last resize.
    pub terminal_area: Rect,
    /// Timestamp of the latest frame.
    pub now: Duration,
}

impl AppState {
    pub fn new(page: Page, config: AppConfig, terminal_area: Rect) -> Self {
        let links = nav::nav_links(&page);
        let counters = CounterAnimator::new(page.counter_specs().cloned());
        let card_count = page
            .sections
            .iter()
            .flat_map(|s| &s.blocks)
            .filter(|b| matches!(b, Block::Card { .. }))
            .count();
        let brand = page
            .brand
            .clone()
            .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_string());

        let mut state = Self {
            brand,
            links,
            layout: PageLayout::default(),
            counters,
            counter_observer: IntersectionObserver::new(COUNTER_POLICY),
            fades: vec![FadeIn::default(); card_count],
            fade_observer: IntersectionObserver::new(FADE_IN_POLICY),
            scroll: SmoothScroll::new(config.scroll_speed),
            menu: MobileMenu::default(),
            menu_selected: 0,
            form: ContactForm::default(),
            focus: Focus::default(),
            alert: None,
            active_section: None,
            config,
            should_quit: false,
            status_message: None,
            terminal_area,
            now: Duration::ZERO,
            page,
        };
        state.resize(terminal_area);
        state
    }

    /// Re-lay the page out for a new terminal size and re-register element
    /// bounds with the observers.
    pub fn resize(&mut self, area: Rect) {
        self.terminal_area = area;
        let screen = AppLayout::from_area(area);
        let content = screen.content_area();
        self.layout = PageLayout::compute(&self.page, content.width);
        self.scroll.set_max(self.layout.max_scroll(u32::from(content.height)));
        // A widened bar shows every link, so the dropdown has nothing left to do.
        if !nav_geometry(screen.nav_area, &self.brand, &self.links).collapsed {
            self.close_menu();
        }

        for el in &self.layout.elements {
            match el.kind {
                ElementKind::Counter(i) => self.counter_observer.subscribe(i, el.bounds),
                ElementKind::Card(i) => self.fade_observer.subscribe(i, el.bounds),
                _ => {}
            }
        }
        tracing::debug!(width = content.width, rows = self.layout.height, "page laid out");
    }

    pub fn viewport(&self) -> Viewport {
        let content = AppLayout::from_area(self.terminal_area).content_area();
        Viewport {
            top: self.scroll.row(),
            height: u32::from(content.height),
        }
    }

    /// Rows moved by one page-up / page-down.
    pub fn page_step(&self) -> u32 {
        self.viewport().height.saturating_sub(2).max(1)
    }

    /// Advance everything to the frame at `now`.
    ///
    /// Counters triggered during this frame get their first update on the
    /// next one, the same way a freshly requested animation frame would.
    pub fn on_frame(&mut self, now: Duration) {
        self.now = now;
        self.scroll.tick();
        self.counters.run_frame(now);

        let viewport = self.viewport();
        for ev in self.counter_observer.poll(viewport) {
            if ev.visible {
                self.counters.trigger(ev.element, now);
            }
        }
        for ev in self.fade_observer.poll(viewport) {
            if ev.visible {
                if let Some(fade) = self.fades.get_mut(ev.element) {
                    fade.reveal(now);
                }
            }
        }

        self.active_section =
            nav::active_section(&self.layout, self.scroll.row()).map(str::to_string);
    }

    /// `true` while anything on screen is still moving.
    pub fn is_animating(&self) -> bool {
        self.scroll.is_animating()
            || self.counters.is_animating()
            || self.fades.iter().any(|f| f.is_fading(self.now))
    }

    pub fn active_link(&self) -> Option<usize> {
        nav::active_link(&self.links, self.active_section.as_deref())
    }

    /// Follow an in-page link.  Returns `false` if the link is not handled.
    pub fn follow_href(&mut self, href: &str) -> bool {
        match nav::resolve_anchor(&self.layout, href) {
            Some(AnchorJump::Stay) => true,
            Some(AnchorJump::ScrollTo(row)) => {
                tracing::debug!(href, row, "anchor jump");
                self.scroll.scroll_to(row);
                true
            }
            None => false,
        }
    }

    /// Activate nav link `index`: closes the menu, then scrolls.
    pub fn follow_link(&mut self, index: usize) {
        self.menu.close();
        if self.focus == Focus::Menu {
            self.focus = Focus::Page;
        }
        if let Some(href) = self.links.get(index).map(|l| l.href.clone()) {
            self.follow_href(&href);
        }
    }

    pub fn toggle_menu(&mut self) {
        self.menu.toggle();
        if self.menu.is_open() {
            self.focus = Focus::Menu;
            self.menu_selected = self.active_link().unwrap_or(0);
        } else if self.focus == Focus::Menu {
            self.focus = Focus::Page;
        }
    }

    pub fn close_menu(&mut self) {
        self.menu.close();
        if self.focus == Focus::Menu {
            self.focus = Focus::Page;
        }
    }

    /// Scroll to the next (`forward`) or previous section relative to where
    /// the page is heading.
    pub fn jump_section(&mut self, forward: bool) {
        let at = self.scroll.target_row();
        let target = if forward {
            self.layout.sections.iter().find(|s| s.bounds.top > at)
        } else {
            self.layout.sections.iter().rev().find(|s| s.bounds.top < at)
        };
        if let Some(section) = target {
            let href = format!("#{}", section.id);
            self.follow_href(&href);
        }
    }

    /// Scroll the form into view and focus its first field.
    pub fn focus_form(&mut self) {
        let Some(form) = self.layout.find(ElementKind::Form) else {
            self.status_message = Some("This page has no contact form".into());
            return;
        };
        self.scroll.scroll_to(form.bounds.top.saturating_sub(2));
        self.focus = Focus::Form(Field::Name);
    }

    /// Validate and submit the contact form, raising an alert either way.
    pub fn submit_form(&mut self) {
        let alert = match self.form.submit() {
            Ok(notice) => {
                self.focus = Focus::Page;
                Alert {
                    message: notice.to_string(),
                    success: true,
                }
            }
            Err(err) => Alert {
                message: err.to_string(),
                success: false,
            },
        };
        self.alert = Some(alert);
    }
}
