//! Renders the laid-out page at the current scroll position.
//!
//! The whole page is drawn into an off-screen buffer in page-row
//! coordinates, then the visible window is copied into the frame.  This
//! keeps partially scrolled boxes correct without clipping every widget.

use std::time::Duration;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    text::Line,
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};

use crate::core::{
    counter::CounterAnimator,
    fade::FadeIn,
    form::{ContactForm, Field},
    page::{wrap_text, Block as PageBlock, ElementKind, Page, PageLayout, PlacedElement},
};

use super::theme::Theme;

const SUBMIT_LABEL: &str = " Send Message ";
const CURSOR: &str = "▏";

// ───────────────────────────────────────── form geometry ─────

/// Rects of the contact form parts relative to `origin` (the form element).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormGeometry {
    pub fields: [(Field, Rect); 3],
    pub submit: Rect,
}

pub fn form_geometry(origin: Rect) -> FormGeometry {
    let Rect { x, y, width, .. } = origin;
    FormGeometry {
        fields: [
            (Field::Name, Rect::new(x, y, width, 3)),
            (Field::Email, Rect::new(x, y + 3, width, 3)),
            (Field::Message, Rect::new(x, y + 6, width, 5)),
        ],
        submit: Rect::new(x, y + 11, (SUBMIT_LABEL.len() as u16).min(width), 1),
    }
}

/// Element rect in page coordinates, or `None` if it lies past the last
/// addressable buffer row.
pub fn element_rect(el: &PlacedElement, width: u16) -> Option<Rect> {
    let top = u16::try_from(el.bounds.top).ok()?;
    let height = u16::try_from(el.bounds.height).ok()?;
    Some(Rect::new(0, top, width, height.min(u16::MAX - top)))
}

// ───────────────────────────────────────── widget ────────────

/// The scrolling page body, created fresh each frame.
pub struct PageView<'a> {
    pub page: &'a Page,
    pub layout: &'a PageLayout,
    pub counters: &'a CounterAnimator,
    pub fades: &'a [FadeIn],
    pub form: &'a ContactForm,
    /// Focused form field, if the form has focus.
    pub focus: Option<Field>,
    /// First visible page row.
    pub scroll: u32,
    pub now: Duration,
}

impl Widget for PageView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let height = u16::try_from(self.layout.height).unwrap_or(u16::MAX);
        let mut canvas = Buffer::empty(Rect::new(0, 0, area.width, height));

        for el in &self.layout.elements {
            // Skip anything that cannot reach the viewport.
            let visible_end = self.scroll.saturating_add(u32::from(area.height));
            if el.bounds.bottom() <= self.scroll || el.bounds.top >= visible_end {
                continue;
            }
            if let Some(rect) = element_rect(el, area.width) {
                self.render_element(el, rect, &mut canvas);
            }
        }

        blit(&canvas, self.scroll, area, buf);
    }
}

impl PageView<'_> {
    fn render_element(&self, el: &PlacedElement, rect: Rect, buf: &mut Buffer) {
        let Some(section) = self.page.sections.get(el.section) else {
            return;
        };

        match el.kind {
            ElementKind::Heading => {
                buf.set_stringn(
                    rect.x,
                    rect.y,
                    &section.title,
                    usize::from(rect.width),
                    Theme::heading_style(),
                );
                let rule_len = (section.title.chars().count() + 4).min(usize::from(rect.width));
                if rect.height > 1 {
                    buf.set_string(rect.x, rect.y + 1, "─".repeat(rule_len), Theme::rule_style());
                }
            }
            ElementKind::Text => {
                let lines: Vec<Line> = el
                    .lines
                    .iter()
                    .map(|l| Line::styled(l.as_str(), Theme::text_style()))
                    .collect();
                Paragraph::new(lines).render(rect, buf);
            }
            ElementKind::Card(n) => {
                let opacity = match self.fades.get(n) {
                    Some(fade) if !fade.is_revealed() => return,
                    Some(fade) => fade.opacity(self.now),
                    None => 1.0,
                };
                let title = match section.blocks.get(el.block) {
                    Some(PageBlock::Card { title, .. }) => title.as_str(),
                    _ => "",
                };
                let block = Block::default()
                    .title(Line::styled(format!(" {title} "), Theme::card_accent_style(opacity)))
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Theme::card_accent_style(opacity));
                let inner = block.inner(rect);
                block.render(rect, buf);
                // One blank row of top padding inside the card.
                let body = Rect::new(
                    inner.x + 1,
                    inner.y + 1,
                    inner.width.saturating_sub(2),
                    inner.height.saturating_sub(1),
                );
                let lines: Vec<Line> = el
                    .lines
                    .iter()
                    .map(|l| Line::styled(l.as_str(), Theme::card_text_style(opacity)))
                    .collect();
                Paragraph::new(lines).render(body, buf);
            }
            ElementKind::Counter(n) => {
                let Some(counter) = self.counters.get(n) else {
                    return;
                };
                let label = match section.blocks.get(el.block) {
                    Some(PageBlock::Counter { label, .. }) => label.as_str(),
                    _ => "",
                };
                let block = Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Theme::rule_style());
                let inner = block.inner(rect);
                block.render(rect, buf);
                Paragraph::new(vec![
                    Line::styled(counter.text(), Theme::counter_style(counter.color())),
                    Line::styled(label, Theme::label_style()),
                ])
                .alignment(Alignment::Center)
                .render(inner, buf);
            }
            ElementKind::Form => self.render_form(rect, buf),
        }
    }

    fn render_form(&self, rect: Rect, buf: &mut Buffer) {
        let geo = form_geometry(rect);
        for (field, area) in geo.fields {
            let focused = self.focus == Some(field);
            let block = Block::default()
                .title(format!(" {} ", field.label()))
                .borders(Borders::ALL)
                .border_style(Theme::input_border_style(focused));
            let inner = block.inner(area);
            block.render(area, buf);

            let value = self.form.value(field);
            let cursor = if focused { CURSOR } else { "" };
            let width = usize::from(inner.width.max(1));
            let lines: Vec<Line> = if field == Field::Message {
                let mut wrapped = wrap_text(&format!("{value}{cursor}"), width);
                let keep = usize::from(inner.height);
                if wrapped.len() > keep {
                    wrapped.drain(..wrapped.len() - keep);
                }
                wrapped.into_iter().map(Line::raw).collect()
            } else {
                vec![Line::raw(tail(&format!("{value}{cursor}"), width))]
            };
            Paragraph::new(lines).style(Theme::text_style()).render(inner, buf);
        }

        buf.set_stringn(
            geo.submit.x,
            geo.submit.y,
            SUBMIT_LABEL,
            usize::from(geo.submit.width),
            Theme::button_style(self.focus.is_some()),
        );
    }
}

/// Last `width` characters of `s`, so the caret stays in view while typing.
fn tail(s: &str, width: usize) -> String {
    let count = s.chars().count();
    s.chars().skip(count.saturating_sub(width)).collect()
}

/// Copy rows `scroll..scroll + area.height` of `canvas` into `area` of `buf`.
fn blit(canvas: &Buffer, scroll: u32, area: Rect, buf: &mut Buffer) {
    for dy in 0..area.height {
        let Ok(src_y) = u16::try_from(scroll.saturating_add(u32::from(dy))) else {
            break;
        };
        if src_y >= canvas.area.height {
            break;
        }
        for dx in 0..area.width.min(canvas.area.width) {
            if let (Some(src), Some(dst)) = (
                canvas.cell((dx, src_y)),
                buf.cell_mut((area.x + dx, area.y + dy)),
            ) {
                *dst = src.clone();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::counter::CounterSpec;

    fn screen_text(buf: &Buffer) -> String {
        let area = buf.area;
        let mut out = String::new();
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                out.push_str(buf[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    fn page() -> Page {
        Page::parse(
            "section id=stats title=Stats\n\
             counter data-target=1000000 data-prefix=$ label=Spend\n\
             card title=Plan body=\"We plan.\"\n\
             form",
            false,
        )
        .unwrap()
    }

    #[test]
    fn finished_counter_shows_final_text() {
        let page = page();
        let layout = PageLayout::compute(&page, 40);
        let mut counters = CounterAnimator::new(page.counter_specs().cloned());
        counters.trigger(0, Duration::ZERO);
        counters.run_frame(Duration::from_secs(3));
        let form = ContactForm::default();

        let area = Rect::new(0, 0, 40, 12);
        let mut buf = Buffer::empty(area);
        PageView {
            page: &page,
            layout: &layout,
            counters: &counters,
            fades: &[FadeIn::default()],
            form: &form,
            focus: None,
            scroll: 0,
            now: Duration::from_secs(3),
        }
        .render(area, &mut buf);

        let text = screen_text(&buf);
        assert!(text.contains("Stats"));
        assert!(text.contains("$1.0M"));
        assert!(text.contains("Spend"));
        // Card not revealed yet, so nothing is drawn.
        assert!(!text.contains("Plan"));
    }

    #[test]
    fn scrolling_shifts_content_up() {
        let page = page();
        let layout = PageLayout::compute(&page, 40);
        let counters = CounterAnimator::new([CounterSpec::new(5.0, "", "")]);
        let form = ContactForm {
            name: "Ana".into(),
            ..ContactForm::default()
        };
        let form_top = layout.find(ElementKind::Form).unwrap().bounds.top;

        let area = Rect::new(0, 0, 40, 6);
        let mut buf = Buffer::empty(area);
        PageView {
            page: &page,
            layout: &layout,
            counters: &counters,
            fades: &[],
            form: &form,
            focus: Some(Field::Name),
            scroll: form_top,
            now: Duration::ZERO,
        }
        .render(area, &mut buf);

        let text = screen_text(&buf);
        let first_line = text.lines().next().unwrap();
        assert!(first_line.contains("Name"));
        assert!(text.contains("Ana▏"));
        assert!(!text.contains("Stats"));
    }

    #[test]
    fn form_parts_stack_vertically() {
        let geo = form_geometry(Rect::new(0, 30, 50, 12));
        assert_eq!(geo.fields[1], (Field::Email, Rect::new(0, 33, 50, 3)));
        assert_eq!(geo.fields[2].1.height, 5);
        assert_eq!(geo.submit.y, 41);
    }

    #[test]
    fn tail_keeps_the_end() {
        assert_eq!(tail("abcdef", 3), "def");
        assert_eq!(tail("ab", 3), "ab");
    }
}
