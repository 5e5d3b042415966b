//! Page model, page-file parser and row layout.
//!
//! A page file is line based.  Each line is one directive followed by
//! shell-quoted tokens.  `text` and `brand` take their tokens verbatim; for
//! other directives `key=value` tokens are attributes:
//!
//! ```text
//! brand "Acme Social"
//! section id=results title="Results"
//! text "Numbers from last year."
//! counter data-target=4200 data-suffix=+ label="Posts published"
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::counter::{parse_float, CounterSpec};
use super::viewport::Bounds;

/// The page shipped with the binary.
pub const BUILTIN_PAGE: &str = include_str!("../../assets/landing.page");

// ───────────────────────────────────────── errors ────────────

/// Errors while loading or parsing a page file.
#[derive(Debug, Error)]
pub enum PageError {
    #[error("failed to read page file {path}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line}: invalid quoting")]
    Quoting { line: usize },

    #[error("line {line}: unknown directive `{directive}`")]
    UnknownDirective { line: usize, directive: String },

    #[error("line {line}: `{directive}` must follow a `section` line")]
    OrphanBlock { line: usize, directive: String },

    #[error("line {line}: section is missing an `id`")]
    MissingId { line: usize },

    #[error("line {line}: duplicate section id `{id}`")]
    DuplicateId { line: usize, id: String },

    #[error("line {line}: only one contact form is allowed per page")]
    DuplicateForm { line: usize },

    #[error("line {line}: counter target {value:?} is not a number")]
    InvalidTarget { line: usize, value: Option<String> },
}

// ───────────────────────────────────────── model ─────────────

/// One content block inside a section.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Text(String),
    /// Fades in the first time it scrolls into view.
    Card { title: String, body: String },
    Counter { spec: CounterSpec, label: String },
    /// The contact form.
    Form,
}

/// An anchor target with its blocks.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub id: String,
    pub title: String,
    pub blocks: Vec<Block>,
}

impl Section {
    /// In-page link to this section, e.g. `#services`.
    pub fn href(&self) -> String {
        format!("#{}", self.id)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Page {
    /// Name shown at the left of the nav bar.
    pub brand: Option<String>,
    pub sections: Vec<Section>,
}

impl Page {
    /// Parse the embedded default page.
    pub fn builtin(strict: bool) -> Result<Self, PageError> {
        Self::parse(BUILTIN_PAGE, strict)
    }

    pub fn load(path: &Path, strict: bool) -> Result<Self, PageError> {
        let src = std::fs::read_to_string(path).map_err(|source| PageError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&src, strict)
    }

    /// Parse page source.  With `strict`, counters whose `data-target` is
    /// missing or non-numeric are rejected; otherwise they render `NaN`.
    pub fn parse(src: &str, strict: bool) -> Result<Self, PageError> {
        let mut page = Page::default();
        let mut has_form = false;

        for (idx, raw) in src.lines().enumerate() {
            let line = idx + 1;
            let trimmed = raw.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let tokens = shlex::split(trimmed).ok_or(PageError::Quoting { line })?;
            let Some((directive, rest)) = tokens.split_first() else {
                continue;
            };
            let (attrs, words) = split_attrs(rest);

            if directive == "brand" {
                page.brand = Some(rest.join(" "));
                continue;
            }
            if directive == "section" {
                let id = attrs
                    .get("id")
                    .filter(|id| !id.is_empty())
                    .ok_or(PageError::MissingId { line })?
                    .to_string();
                if page.sections.iter().any(|s| s.id == id) {
                    return Err(PageError::DuplicateId { line, id });
                }
                let title = attrs.get("title").map_or_else(|| id.clone(), |t| t.to_string());
                page.sections.push(Section {
                    id,
                    title,
                    blocks: Vec::new(),
                });
                continue;
            }

            let block = match directive.as_str() {
                "text" => Block::Text(rest.join(" ")),
                "card" => Block::Card {
                    title: attrs.get("title").unwrap_or(&"").to_string(),
                    body: attrs
                        .get("body")
                        .map_or_else(|| words.join(" "), |b| b.to_string()),
                },
                "counter" => {
                    let target = attrs.get("data-target").copied();
                    if strict && !target.is_some_and(|t| parse_float(t).is_finite()) {
                        return Err(PageError::InvalidTarget {
                            line,
                            value: target.map(str::to_string),
                        });
                    }
                    Block::Counter {
                        spec: CounterSpec::from_attrs(
                            target,
                            attrs.get("data-prefix").copied(),
                            attrs.get("data-suffix").copied(),
                        ),
                        label: attrs.get("label").unwrap_or(&"").to_string(),
                    }
                }
                "form" => {
                    if has_form {
                        return Err(PageError::DuplicateForm { line });
                    }
                    has_form = true;
                    Block::Form
                }
                other => {
                    return Err(PageError::UnknownDirective {
                        line,
                        directive: other.to_string(),
                    })
                }
            };

            let Some(section) = page.sections.last_mut() else {
                return Err(PageError::OrphanBlock {
                    line,
                    directive: directive.clone(),
                });
            };
            section.blocks.push(block);
        }

        Ok(page)
    }

    /// Counter specs in page order (the order used for counter indices).
    pub fn counter_specs(&self) -> impl Iterator<Item = &CounterSpec> {
        self.blocks().filter_map(|b| match b {
            Block::Counter { spec, .. } => Some(spec),
            _ => None,
        })
    }

    fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.sections.iter().flat_map(|s| s.blocks.iter())
    }
}

/// Split tokens into `key=value` attributes and positional words.
fn split_attrs(tokens: &[String]) -> (HashMap<&str, &str>, Vec<&str>) {
    let mut attrs = HashMap::new();
    let mut words = Vec::new();
    for tok in tokens {
        match tok.split_once('=') {
            Some((k, v)) if !k.is_empty() && !k.contains(char::is_whitespace) => {
                attrs.insert(k, v);
            }
            _ => words.push(tok.as_str()),
        }
    }
    (attrs, words)
}

// ───────────────────────────────────────── layout ────────────

/// Rows taken by a section heading (title + rule).
pub const HEADING_ROWS: u32 = 2;
/// Rows taken by a counter box (border, value, label, border).
pub const COUNTER_ROWS: u32 = 4;
/// Rows taken by the contact form: three bordered inputs + submit line.
pub const FORM_ROWS: u32 = 3 + 3 + 5 + 1;
/// Blank rows after each block and after each section.
const BLOCK_GAP: u32 = 1;

/// What a placed element is, with indices into the page-order lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Heading,
    Text,
    /// n-th card on the page.
    Card(usize),
    /// n-th counter on the page.
    Counter(usize),
    Form,
}

/// A block placed on the page at a row range.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedElement {
    pub section: usize,
    /// Index into the section's `blocks` (unused for headings).
    pub block: usize,
    pub kind: ElementKind,
    pub bounds: Bounds,
    /// Pre-wrapped text lines: the body for text and cards.
    pub lines: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SectionLayout {
    pub id: String,
    pub bounds: Bounds,
}

/// Row positions of every element for one terminal width.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PageLayout {
    pub width: u16,
    pub height: u32,
    pub sections: Vec<SectionLayout>,
    pub elements: Vec<PlacedElement>,
}

impl PageLayout {
    pub fn compute(page: &Page, width: u16) -> Self {
        let text_width = usize::from(width.max(8));
        let mut row = 0u32;
        let mut cards = 0;
        let mut counters = 0;
        let mut sections = Vec::with_capacity(page.sections.len());
        let mut elements = Vec::new();

        for (si, section) in page.sections.iter().enumerate() {
            let section_top = row;
            elements.push(PlacedElement {
                section: si,
                block: 0,
                kind: ElementKind::Heading,
                bounds: Bounds::new(row, HEADING_ROWS),
                lines: Vec::new(),
            });
            row += HEADING_ROWS;

            for (bi, block) in section.blocks.iter().enumerate() {
                let (kind, lines, height) = match block {
                    Block::Text(text) => {
                        let lines = wrap_text(text, text_width);
                        let h = lines.len() as u32;
                        (ElementKind::Text, lines, h)
                    }
                    Block::Card { body, .. } => {
                        let lines = wrap_text(body, text_width.saturating_sub(4).max(4));
                        let h = lines.len() as u32 + 3;
                        cards += 1;
                        (ElementKind::Card(cards - 1), lines, h)
                    }
                    Block::Counter { .. } => {
                        counters += 1;
                        (ElementKind::Counter(counters - 1), Vec::new(), COUNTER_ROWS)
                    }
                    Block::Form => (ElementKind::Form, Vec::new(), FORM_ROWS),
                };
                elements.push(PlacedElement {
                    section: si,
                    block: bi,
                    kind,
                    bounds: Bounds::new(row, height),
                    lines,
                });
                row += height + BLOCK_GAP;
            }

            row += BLOCK_GAP;
            sections.push(SectionLayout {
                id: section.id.clone(),
                bounds: Bounds::new(section_top, row - section_top),
            });
        }

        Self {
            width,
            height: row,
            sections,
            elements,
        }
    }

    /// Largest scroll position that still fills a viewport of `viewport_rows`.
    pub fn max_scroll(&self, viewport_rows: u32) -> u32 {
        self.height.saturating_sub(viewport_rows)
    }

    pub fn section_top(&self, id: &str) -> Option<u32> {
        self.sections.iter().find(|s| s.id == id).map(|s| s.bounds.top)
    }

    pub fn find(&self, kind: ElementKind) -> Option<&PlacedElement> {
        self.elements.iter().find(|e| e.kind == kind)
    }
}

/// Greedy word wrap on character counts.  Over-long words are split hard.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > width {
            if current_len > 0 {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let rest = word.split_off(width);
            lines.push(word.into_iter().collect());
            word = rest;
        }
        let needed = if current_len == 0 { word.len() } else { current_len + 1 + word.len() };
        if needed > width {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current.extend(word.iter());
        current_len += word.len();
    }

    if current_len > 0 || lines.is_empty() {
        lines.push(current);
    }
    lines
}
