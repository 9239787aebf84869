// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Yonkoma and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Paints the page's element tree into styled terminal lines.
//!
//! Block elements start a new line, inline elements flow into the current one, and every line is
//! wrapped by display width so wide characters take two cells.

use ratatui::{
    style::Style,
    text::{Line, Span},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::theme::Theme;
use crate::page::{Document, Extent, MountPoint};
use crate::render::{Element, Node};

const BLOCK_TAGS: &[&str] = &[
    "article", "div", "p", "ul", "li", "h2", "header", "main", "nav", "section",
];
/// Block-level tags laid out inline, the way the stylesheet flexes them.
const INLINE_CLASSES: &[&str] = &[
    "panel-image-wrap",
    "panel-caption",
    "placeholder",
    "term-title-group",
    "sources-header",
];
const NESTING_CLASSES: &[&str] = &["panels-grid", "sources-list"];
const NESTING_INDENT: usize = 2;
const LIST_BULLET: &str = "• ";
const CARD_RULE: char = '─';

#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct Painted {
    pub(crate) lines: Vec<Line<'static>>,
    /// Row extents of each card, in document order.
    pub(crate) cards: Vec<Extent>,
}

impl Painted {
    pub(crate) fn height(&self) -> usize {
        self.lines.len()
    }
}

/// Paints `document` at `width` columns, with `lead` blank rows above the first card.
pub(crate) fn paint(document: &Document, width: u16, theme: &Theme, lead: usize) -> Painted {
    let mut painter = Painter::new(theme, usize::from(width));

    for mount in [MountPoint::Loading, MountPoint::ErrorMessage] {
        if let Ok(element) = document.mount(mount) {
            painter.element(element, Style::default());
            painter.flush();
        }
    }

    let mut elements = document.cards().peekable();
    if elements.peek().is_some() {
        painter.lines.resize(painter.lines.len() + lead, Line::default());
    }

    let mut cards = Vec::new();
    for card in elements {
        let top = painter.lines.len();
        painter.rule();
        painter.element(card, Style::default());
        painter.flush();
        painter.lines.push(Line::default());
        cards.push(Extent {
            top: top as f64,
            height: (painter.lines.len() - top) as f64,
        });
    }

    Painted {
        lines: painter.lines,
        cards,
    }
}

struct Painter<'a> {
    theme: &'a Theme,
    width: usize,
    indent: usize,
    lines: Vec<Line<'static>>,
    current: Vec<Span<'static>>,
}

impl<'a> Painter<'a> {
    fn new(theme: &'a Theme, width: usize) -> Self {
        Self {
            theme,
            width,
            indent: 0,
            lines: Vec::new(),
            current: Vec::new(),
        }
    }

    fn element(&mut self, element: &Element, inherited: Style) {
        if element.is_hidden() {
            return;
        }

        let mut style = inherited;
        if let Some(tag_style) = self.theme.for_tag(element.tag()) {
            style = style.patch(tag_style);
        }
        for class in element.classes() {
            if let Some(class_style) = self.theme.for_class(class) {
                style = style.patch(class_style);
            }
        }

        let block = is_block(element);
        if block {
            self.flush();
        } else {
            self.separate();
        }

        let nesting = NESTING_CLASSES
            .iter()
            .any(|class| element.has_class(class));
        if nesting {
            self.indent += NESTING_INDENT;
        }
        if element.tag() == "li" {
            self.current.push(Span::raw(LIST_BULLET));
        }

        if element.tag() == "img" {
            let alt = element.attr("alt").unwrap_or_default();
            let src = element.attr("src").unwrap_or_default();
            self.text(&format!("▣ {alt} <{src}>"), style);
        }

        for child in element.children() {
            match child {
                Node::Element(child) => self.element(child, style),
                Node::Text(text) => self.text(text, style),
                Node::Number(n) => self.text(itoa::Buffer::new().format(*n), style),
            }
        }

        if block {
            self.flush();
        }
        if nesting {
            self.indent -= NESTING_INDENT;
        }
    }

    fn text(&mut self, text: &str, style: Style) {
        if !text.is_empty() {
            self.current.push(Span::styled(text.to_owned(), style));
        }
    }

    /// Keeps adjacent inline runs apart by one space.
    fn separate(&mut self) {
        let spaced = match self.current.last() {
            Some(span) => span.content.ends_with(char::is_whitespace),
            None => true,
        };
        if !spaced {
            self.current.push(Span::raw(" "));
        }
    }

    fn rule(&mut self) {
        let rule: String = std::iter::repeat(CARD_RULE).take(self.width).collect();
        self.lines.push(Line::styled(rule, self.theme.border(false)));
    }

    fn flush(&mut self) {
        if self.current.is_empty() {
            return;
        }
        let spans = std::mem::take(&mut self.current);
        self.lines.extend(wrap(spans, self.width, self.indent));
    }
}

fn is_block(element: &Element) -> bool {
    BLOCK_TAGS.contains(&element.tag())
        && !INLINE_CLASSES
            .iter()
            .any(|class| element.has_class(class))
}

/// Breaks `spans` into lines of at most `width` cells, each prefixed with `indent` spaces.
/// Embedded newlines force a break.
pub(crate) fn wrap(spans: Vec<Span<'static>>, width: usize, indent: usize) -> Vec<Line<'static>> {
    let available = width.saturating_sub(indent).max(1);
    let mut lines = Vec::new();
    let mut line: Vec<Span<'static>> = Vec::new();
    let mut used = 0;

    for span in spans {
        let mut chunk = String::new();
        for ch in span.content.chars() {
            if ch == '\n' {
                if !chunk.is_empty() {
                    line.push(Span::styled(std::mem::take(&mut chunk), span.style));
                }
                lines.push(indented(std::mem::take(&mut line), indent));
                used = 0;
                continue;
            }
            let cells = ch.width().unwrap_or(0);
            if used + cells > available && used > 0 {
                if !chunk.is_empty() {
                    line.push(Span::styled(std::mem::take(&mut chunk), span.style));
                }
                lines.push(indented(std::mem::take(&mut line), indent));
                used = 0;
            }
            chunk.push(ch);
            used += cells;
        }
        if !chunk.is_empty() {
            line.push(Span::styled(chunk, span.style));
        }
    }
    if !line.is_empty() {
        lines.push(indented(line, indent));
    }
    lines
}

fn indented(mut spans: Vec<Span<'static>>, indent: usize) -> Line<'static> {
    if indent > 0 {
        spans.insert(0, Span::raw(" ".repeat(indent)));
    }
    Line::from(spans)
}

/// Display width of the widest nav label.
pub(crate) fn widest_label(document: &Document) -> usize {
    document
        .nav_controls()
        .map(|control| control.text_content().width())
        .max()
        .unwrap_or(0)
}
