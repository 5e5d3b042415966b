//! Input handling: maps key and mouse events to state mutations.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use crate::config::Action;
use crate::core::form::Field;
use crate::core::page::ElementKind;
use crate::ui::layout::{point_in_rect, AppLayout};
use crate::ui::nav_bar::{menu_geometry, nav_geometry};
use crate::ui::page_widget::{element_rect, form_geometry};

use super::state::{AppState, Focus};

/// Rows moved per mouse wheel notch.
const WHEEL_ROWS: i64 = 3;

/// Process a key event, dispatching on what currently has focus.
pub fn handle_key(state: &mut AppState, key: KeyEvent) {
    // Ctrl+c always quits, regardless of focus.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }

    if state.alert.is_some() {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
            state.alert = None;
        }
        return;
    }

    state.status_message = None;
    match state.focus {
        Focus::Page => handle_page_key(state, key),
        Focus::Menu => handle_menu_key(state, key),
        Focus::Form(field) => handle_form_key(state, field, key),
    }
}

// ── Page view (configurable bindings) ───────────────────────────

fn handle_page_key(state: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Home => {
            state.scroll.scroll_to(0);
            return;
        }
        KeyCode::End => {
            state.scroll.scroll_to(u32::MAX);
            return;
        }
        _ => {}
    }

    let Some(action) = state.config.match_key(key) else {
        return;
    };

    match action {
        Action::Quit => state.should_quit = true,
        Action::ScrollUp => state.scroll.scroll_by(-1),
        Action::ScrollDown => state.scroll.scroll_by(1),
        Action::PageUp => state.scroll.scroll_by(-i64::from(state.page_step())),
        Action::PageDown => state.scroll.scroll_by(i64::from(state.page_step())),
        Action::NextSection => state.jump_section(true),
        Action::PrevSection => state.jump_section(false),
        Action::ToggleMenu => {
            if nav_is_collapsed(state) {
                state.toggle_menu();
            } else {
                state.status_message = Some("All links are already shown in the bar".into());
            }
        }
        Action::FocusForm => state.focus_form(),
    }
}

// ── Open menu ───────────────────────────────────────────────────

fn handle_menu_key(state: &mut AppState, key: KeyEvent) {
    let count = state.links.len();
    match key.code {
        KeyCode::Esc => state.close_menu(),
        KeyCode::Up | KeyCode::Char('k') => {
            state.menu_selected = state.menu_selected.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if state.menu_selected + 1 < count {
                state.menu_selected += 1;
            }
        }
        KeyCode::Enter => {
            let selected = state.menu_selected;
            state.follow_link(selected);
        }
        _ => match state.config.match_key(key) {
            Some(Action::ToggleMenu) => state.toggle_menu(),
            Some(Action::Quit) => state.should_quit = true,
            _ => {}
        },
    }
}

// ── Contact form (raw text entry) ───────────────────────────────

fn handle_form_key(state: &mut AppState, field: Field, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => state.focus = Focus::Page,
        KeyCode::Tab => state.focus = Focus::Form(field.next()),
        KeyCode::BackTab => state.focus = Focus::Form(field.prev()),
        KeyCode::Enter => state.submit_form(),
        KeyCode::Backspace => {
            state.form.value_mut(field).pop();
        }
        KeyCode::Char(c)
            if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            state.form.value_mut(field).push(c);
        }
        _ => {}
    }
}

// ── Mouse ───────────────────────────────────────────────────────

pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent) {
    if state.alert.is_some() {
        if matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left)) {
            state.alert = None;
        }
        return;
    }

    match mouse.kind {
        MouseEventKind::ScrollDown => state.scroll.scroll_by(WHEEL_ROWS),
        MouseEventKind::ScrollUp => state.scroll.scroll_by(-WHEEL_ROWS),
        MouseEventKind::Down(MouseButton::Left) => handle_click(state, mouse.column, mouse.row),
        _ => {}
    }
}

fn handle_click(state: &mut AppState, col: u16, row: u16) {
    let screen = AppLayout::from_area(state.terminal_area);
    let nav = nav_geometry(screen.nav_area, &state.brand, &state.links);

    let on_toggle = nav.toggle.is_some_and(|r| point_in_rect(r, col, row));
    if on_toggle {
        state.toggle_menu();
        return;
    }

    if state.menu.is_open() {
        let (menu_rect, rows) = menu_geometry(screen.page_area, &state.links);
        if let Some(i) = rows.iter().position(|r| point_in_rect(*r, col, row)) {
            state.follow_link(i);
            return;
        }
        let inside_menu = point_in_rect(menu_rect, col, row);
        if !state.menu.click(inside_menu, on_toggle) {
            return;
        }
        // Closed by an outside click; the click still lands on what it hit.
        state.close_menu();
    }

    if let Some(i) = nav.links.iter().position(|r| point_in_rect(*r, col, row)) {
        state.follow_link(i);
        return;
    }

    click_form(state, screen, col, row);
}

/// Focus a form field or press the submit button under the cursor.
fn click_form(state: &mut AppState, screen: AppLayout, col: u16, row: u16) {
    let content = screen.content_area();
    if !point_in_rect(content, col, row) {
        return;
    }
    let Some(form_rect) = state
        .layout
        .find(ElementKind::Form)
        .and_then(|el| element_rect(el, content.width))
    else {
        return;
    };

    // Translate the click into page coordinates.
    let page_row = state.scroll.row().saturating_add(u32::from(row - content.y));
    let Ok(page_row) = u16::try_from(page_row) else {
        return;
    };
    let page_col = col - content.x;

    let geo = form_geometry(form_rect);
    if let Some((field, _)) = geo
        .fields
        .iter()
        .find(|(_, r)| point_in_rect(*r, page_col, page_row))
    {
        state.focus = Focus::Form(*field);
    } else if point_in_rect(geo.submit, page_col, page_row) {
        state.submit_form();
    } else if matches!(state.focus, Focus::Form(_)) {
        state.focus = Focus::Page;
    }
}

fn nav_is_collapsed(state: &AppState) -> bool {
    let screen = AppLayout::from_area(state.terminal_area);
    nav_geometry(screen.nav_area, &state.brand, &state.links).collapsed
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::layout::Rect;

    use crate::config::AppConfig;
    use crate::core::page::Page;

    const PAGE: &str = "\
brand Acme
section id=home title=Home
text hi
section id=work title=Work
card title=Plan body=\"We plan.\"
section id=contact title=Contact
form
";

    fn state(width: u16, height: u16) -> AppState {
        let page = Page::parse(PAGE, false).unwrap();
        AppState::new(page, AppConfig::default(), Rect::new(0, 0, width, height))
    }

    fn press(state: &mut AppState, code: KeyCode) {
        handle_key(state, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn click(state: &mut AppState, col: u16, row: u16) {
        handle_mouse(
            state,
            MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column: col,
                row,
                modifiers: KeyModifiers::NONE,
            },
        );
    }

    #[test]
    fn ctrl_c_quits_from_the_form() {
        let mut s = state(100, 30);
        s.focus = Focus::Form(Field::Email);
        handle_key(&mut s, KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(s.should_quit);
    }

    #[test]
    fn typing_fills_the_focused_field() {
        let mut s = state(100, 30);
        press(&mut s, KeyCode::Char('f'));
        assert_eq!(s.focus, Focus::Form(Field::Name));
        for c in "Ana".chars() {
            press(&mut s, KeyCode::Char(c));
        }
        press(&mut s, KeyCode::Backspace);
        press(&mut s, KeyCode::Tab);
        press(&mut s, KeyCode::Char('q'));
        assert_eq!(s.form.name, "An");
        assert_eq!(s.form.email, "q");
        assert!(!s.should_quit);

        press(&mut s, KeyCode::Enter);
        assert_eq!(
            s.alert.as_ref().map(|a| a.message.as_str()),
            Some("Please fill in all fields.")
        );
        // Any other key is swallowed while the alert is up.
        press(&mut s, KeyCode::Char('x'));
        assert_eq!(s.form.email, "q");
        press(&mut s, KeyCode::Esc);
        assert!(s.alert.is_none());
    }

    #[test]
    fn menu_toggle_only_when_collapsed() {
        let mut wide = state(100, 10);
        press(&mut wide, KeyCode::Char('m'));
        assert!(!wide.menu.is_open());
        assert!(wide.status_message.is_some());

        let mut narrow = state(40, 10);
        press(&mut narrow, KeyCode::Char('m'));
        assert!(narrow.menu.is_open());
        press(&mut narrow, KeyCode::Down);
        press(&mut narrow, KeyCode::Enter);
        assert!(!narrow.menu.is_open());
        assert_eq!(Some(narrow.scroll.target_row()), narrow.layout.section_top("work"));
    }

    #[test]
    fn clicks_drive_the_collapsed_menu() {
        let mut s = state(40, 10);
        // Toggle sits at the right end of the nav row.
        click(&mut s, 37, 0);
        assert!(s.menu.is_open());
        assert_eq!(s.focus, Focus::Menu);
        // Click outside both menu and toggle closes it.
        click(&mut s, 1, 5);
        assert!(!s.menu.is_open());

        click(&mut s, 37, 0);
        let screen = AppLayout::from_area(s.terminal_area);
        let (_, rows) = menu_geometry(screen.page_area, &s.links);
        let contact = rows[2];
        click(&mut s, contact.x, contact.y);
        assert!(!s.menu.is_open());
        assert_eq!(s.focus, Focus::Page);
        assert_eq!(Some(s.scroll.target_row()), s.layout.section_top("contact"));
    }

    #[test]
    fn widening_the_terminal_releases_menu_focus() {
        let mut s = state(40, 10);
        press(&mut s, KeyCode::Char('m'));
        assert_eq!(s.focus, Focus::Menu);

        s.resize(Rect::new(0, 0, 160, 10));
        assert!(!s.menu.is_open());
        assert_eq!(s.focus, Focus::Page);
        press(&mut s, KeyCode::Char('j'));
        assert_eq!(s.scroll.target_row(), 1);
    }

    #[test]
    fn outside_click_closes_menu_and_reaches_the_form() {
        let mut s = state(40, 60);
        click(&mut s, 37, 0);
        assert!(s.menu.is_open());

        let content = AppLayout::from_area(s.terminal_area).content_area();
        let form_top = s.layout.find(ElementKind::Form).unwrap().bounds.top as u16;
        click(&mut s, content.x + 2, content.y + form_top + 4);
        assert!(!s.menu.is_open());
        assert_eq!(s.focus, Focus::Form(Field::Email));
    }

    #[test]
    fn clicking_a_wide_nav_link_scrolls() {
        let mut s = state(100, 10);
        let screen = AppLayout::from_area(s.terminal_area);
        let nav = nav_geometry(screen.nav_area, &s.brand, &s.links);
        click(&mut s, nav.links[1].x, 0);
        assert_eq!(Some(s.scroll.target_row()), s.layout.section_top("work"));
    }

    #[test]
    fn wheel_scrolls_by_three() {
        let mut s = state(100, 10);
        handle_mouse(
            &mut s,
            MouseEvent {
                kind: MouseEventKind::ScrollDown,
                column: 0,
                row: 5,
                modifiers: KeyModifiers::NONE,
            },
        );
        assert_eq!(s.scroll.target_row(), 3);
    }

    #[test]
    fn clicking_a_field_focuses_it() {
        // Tall enough that the whole page, form included, is on screen.
        let mut s = state(100, 60);
        let screen = AppLayout::from_area(s.terminal_area);
        let content = screen.content_area();
        let form_top = s.layout.find(ElementKind::Form).unwrap().bounds.top as u16;
        // Email box starts 3 rows into the form.
        click(&mut s, content.x + 2, content.y + form_top + 4);
        assert_eq!(s.focus, Focus::Form(Field::Email));
    }
}
