//! Colour palette and text styles used across the UI.

use ratatui::style::{Color, Modifier, Style};

use crate::core::color::Rgb;

/// Colour faded cards blend from; close to a dark terminal background.
pub const BACKDROP: Rgb = Rgb::new(24, 24, 27);
/// Body text colour of a fully shown card.
pub const CARD_TEXT: Rgb = Rgb::new(228, 228, 231);
/// Card title / border accent when fully shown.
pub const CARD_ACCENT: Rgb = Rgb::new(56, 189, 248);

/// Central theme.  Change colours here and they propagate everywhere.
pub struct Theme;

impl Theme {
    pub fn rgb(c: Rgb) -> Color {
        Color::Rgb(c.r, c.g, c.b)
    }

    // ── page ───────────────────────────────────────────────────
    pub fn heading_style() -> Style {
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    }

    pub fn rule_style() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    pub fn text_style() -> Style {
        Style::default().fg(Color::Gray)
    }

    /// Card body at `opacity` (0 hidden … 1 shown).
    pub fn card_text_style(opacity: f64) -> Style {
        Style::default().fg(Self::rgb(BACKDROP.lerp(CARD_TEXT, opacity)))
    }

    pub fn card_accent_style(opacity: f64) -> Style {
        Style::default().fg(Self::rgb(BACKDROP.lerp(CARD_ACCENT, opacity)))
    }

    pub fn counter_style(color: Rgb) -> Style {
        Style::default()
            .fg(Self::rgb(color))
            .add_modifier(Modifier::BOLD)
    }

    pub fn label_style() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    // ── form ───────────────────────────────────────────────────
    pub fn input_border_style(focused: bool) -> Style {
        if focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        }
    }

    pub fn button_style(focused: bool) -> Style {
        let base = Style::default().fg(Color::Black).bg(Color::Green);
        if focused { base.add_modifier(Modifier::BOLD) } else { base }
    }

    // ── chrome ─────────────────────────────────────────────────
    pub fn brand_style() -> Style {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    }

    pub fn nav_link_style(active: bool) -> Style {
        if active {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::White)
        }
    }

    pub fn menu_selected_style() -> Style {
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD)
    }

    pub fn border_style() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn status_bar_style() -> Style {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    }

    pub fn alert_style(success: bool) -> Style {
        let fg = if success { Color::Green } else { Color::Yellow };
        Style::default().fg(fg).add_modifier(Modifier::BOLD)
    }
}
