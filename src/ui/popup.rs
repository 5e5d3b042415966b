//! Modal alert shown after a contact-form submit.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget, Wrap},
};

use crate::core::page::wrap_text;

use super::theme::Theme;

/// A dismissable message box centred on screen.
pub struct AlertPopup<'a> {
    pub message: &'a str,
    /// Success notices and validation errors are styled differently.
    pub success: bool,
}

impl Widget for AlertPopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let width = 48.min(area.width);
        let text_width = usize::from(width.saturating_sub(4).max(1));
        let text_rows = wrap_text(self.message, text_width).len() as u16;
        // borders + blank + text + blank + hint
        let popup = centered_fixed(width, text_rows + 5, area);
        Clear.render(popup, buf);

        let block = Block::default()
            .title(if self.success { " Sent " } else { " Check the form " })
            .title_style(Theme::alert_style(self.success))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Theme::border_style());
        let inner = block.inner(popup);
        block.render(popup, buf);

        let mut lines = vec![Line::raw("")];
        lines.push(Line::from(Span::styled(self.message, Style::default())));
        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled("Enter/Esc: close", Theme::label_style())));

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(inner, buf);
    }
}

/// Create a centred rectangle with fixed dimensions, clamped to the available area.
pub fn centered_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w)) / 2;
    let y = area.y + (area.height.saturating_sub(h)) / 2;
    Rect::new(x, y, w, h)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::form::FormError;

    #[test]
    fn centred_rect_is_clamped() {
        assert_eq!(centered_fixed(10, 4, Rect::new(0, 0, 30, 10)), Rect::new(10, 3, 10, 4));
        assert_eq!(centered_fixed(50, 40, Rect::new(0, 0, 30, 10)), Rect::new(0, 0, 30, 10));
    }

    #[test]
    fn alert_renders_message() {
        let area = Rect::new(0, 0, 60, 12);
        let mut buf = Buffer::empty(area);
        let message = FormError::MissingFields.to_string();
        AlertPopup {
            message: &message,
            success: false,
        }
        .render(area, &mut buf);

        let row: String = (0..area.height)
            .map(|y| (0..area.width).map(|x| buf[(x, y)].symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n");
        assert!(row.contains("Please fill in all fields."));
        assert!(row.contains("Check the form"));
    }
}
