// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Yonkoma and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Terminal reader.
//!
//! Hosts a loaded [`Page`]: paints its document, reports the viewport back to it after every frame
//! and carries out the effects it returns. Background events (image outcomes, the deep-link
//! timer) are drained from the page's channel between input events.

use std::{
    error::Error,
    io,
    time::{Duration, Instant},
};

use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use tracing::debug;

use crate::page::{
    EventReceiver, Extent, FocalBand, Page, PageEffect, PageEvent, PageStatus, Viewport,
    ViewportSnapshot,
};
use crate::render::nav::ACTIVE_CLASS;

mod paint;
mod theme;

pub use theme::ThemeError;

use paint::{paint, widest_label, Painted};
use theme::Theme;

const NAV_TITLE: &str = "用語";
const NAV_MIN_WIDTH: u16 = 12;
const NAV_MAX_WIDTH: u16 = 28;
const IDLE_POLL: Duration = Duration::from_millis(250);
const FRAME: Duration = Duration::from_millis(16);
const SMOOTH_SCROLL: Duration = Duration::from_millis(240);
const WHEEL_STEP: usize = 3;
/// Largest offset the content paragraph can scroll to.
const MAX_SCROLL: usize = u16::MAX as usize;
const FOOTER_HINTS: &[(&str, &str)] = &[
    ("j/k", "scroll"),
    ("[/]", "term"),
    ("⏎", "jump"),
    ("g/G", "top/bottom"),
    ("q", "quit"),
];

/// Runs the reader until the user quits, then tears the page down.
pub fn run(page: Page, events: EventReceiver) -> Result<(), Box<dyn Error>> {
    let theme = Theme::from_env()?;
    let mut terminal = TerminalSession::new()?;
    let mut app = App::new(page, events, theme);

    while !app.should_quit {
        app.drain_events();
        app.tick(Instant::now());
        terminal.draw(|frame| draw(frame, &mut app))?;
        app.report_viewport();

        let timeout = if app.is_animating() { FRAME } else { IDLE_POLL };
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
                Event::Mouse(mouse) => app.handle_mouse(mouse),
                _ => {}
            }
        }
    }

    app.page.teardown();
    Ok(())
}

fn draw(frame: &mut Frame<'_>, app: &mut App) {
    let area = frame.size();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);
    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(app.nav_width()), Constraint::Min(0)])
        .split(rows[0]);

    let nav_block = Block::default()
        .borders(Borders::ALL)
        .title(NAV_TITLE)
        .border_style(app.theme.border(false));
    let content_block = Block::default()
        .borders(Borders::ALL)
        .title(app.content_title())
        .border_style(app.theme.border(true));
    let nav_inner = nav_block.inner(panes[0]);
    let content_inner = content_block.inner(panes[1]);

    app.layout(nav_inner, content_inner, Instant::now());

    let items: Vec<ListItem<'static>> = app
        .page
        .document()
        .nav_controls()
        .map(|control| {
            ListItem::new(control.text_content())
                .style(app.theme.nav(control.has_class(ACTIVE_CLASS)))
        })
        .collect();
    app.nav_state.select(app.page.active_position());
    frame.render_stateful_widget(List::new(items).block(nav_block), panes[0], &mut app.nav_state);

    let content = Paragraph::new(app.painted.lines.clone())
        .block(content_block)
        .scroll((u16::try_from(app.scroll).unwrap_or(u16::MAX), 0));
    frame.render_widget(content, panes[1]);

    frame.render_widget(Paragraph::new(footer_line(app)), rows[1]);
}

fn footer_line(app: &App) -> Line<'static> {
    let mut spans = Vec::new();
    for (key, label) in FOOTER_HINTS {
        spans.push(Span::styled(*key, Style::default().fg(app.theme.accent())));
        spans.push(Span::styled(
            format!(" {label}  "),
            Style::default().fg(Color::Gray),
        ));
    }
    let count = app.page.anchors().len();
    if let Some(position) = app.page.active_position() {
        spans.push(Span::raw(format!("{}/{count}", position + 1)));
    }
    Line::from(spans)
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct ScrollAnimation {
    from: usize,
    to: usize,
    started: Instant,
}

impl ScrollAnimation {
    /// Row at `now` on an ease-out curve, and whether the animation has finished.
    fn position(&self, now: Instant) -> (usize, bool) {
        let elapsed = now.saturating_duration_since(self.started);
        let t = (elapsed.as_secs_f64() / SMOOTH_SCROLL.as_secs_f64()).min(1.0);
        let eased = 1.0 - (1.0 - t).powi(3);
        let from = self.from as f64;
        let row = from + (self.to as f64 - from) * eased;
        (row.round().max(0.0) as usize, t >= 1.0)
    }
}

/// Blank rows above the first card, so it sits in the focal band at the top of the document.
fn band_lead(band: FocalBand, viewport_height: usize) -> usize {
    (viewport_height as f64 * band.top_inset).floor() as usize
}

/// Scroll row that settles `extent` in the focal band without reaching into the next card.
fn settle_row(extent: Extent, band: FocalBand, viewport_height: usize) -> usize {
    let height = viewport_height as f64;
    let band_top = (height * band.top_inset).floor();
    let band_bottom = height * (1.0 - band.bottom_inset);
    let end = extent.top + extent.height;

    let mut row = extent.top - band_top;
    if row + band_bottom > end {
        // Shorter than the band: end the band on the card's last row.
        row = (end - band_bottom).floor();
    }
    row.max(0.0) as usize
}

struct App {
    page: Page,
    events: EventReceiver,
    theme: Theme,
    painted: Painted,
    scroll: usize,
    viewport_height: usize,
    nav_area: Rect,
    nav_state: ListState,
    animation: Option<ScrollAnimation>,
    pending_scroll: Option<usize>,
    should_quit: bool,
}

impl App {
    fn new(page: Page, events: EventReceiver, theme: Theme) -> Self {
        Self {
            page,
            events,
            theme,
            painted: Painted::default(),
            scroll: 0,
            viewport_height: 0,
            nav_area: Rect::default(),
            nav_state: ListState::default(),
            animation: None,
            pending_scroll: None,
            should_quit: false,
        }
    }

    fn drain_events(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            let effects = self.page.handle(event);
            self.apply(effects);
        }
    }

    fn dispatch(&mut self, event: PageEvent) {
        let effects = self.page.handle(event);
        self.apply(effects);
    }

    fn apply(&mut self, effects: Vec<PageEffect>) {
        for effect in effects {
            match effect {
                PageEffect::ScrollIntoView { card } => self.pending_scroll = Some(card),
            }
        }
    }

    /// Repaints for the current areas and resolves a pending scroll against the new extents.
    fn layout(&mut self, nav: Rect, content: Rect, now: Instant) {
        self.nav_area = nav;
        self.viewport_height = usize::from(content.height);
        let lead = band_lead(self.band(), self.viewport_height);
        self.painted = paint(self.page.document(), content.width, &self.theme, lead);
        self.scroll = self.scroll.min(self.max_scroll());

        let Some(card) = self.pending_scroll.take() else {
            return;
        };
        let Some(target) = self.settle_row_for(card) else {
            debug!(card, "scroll target not painted");
            return;
        };
        self.animation = Some(ScrollAnimation {
            from: self.scroll,
            to: target.min(self.max_scroll()),
            started: now,
        });
    }

    fn band(&self) -> FocalBand {
        self.page.scroll().band()
    }

    fn settle_row_for(&self, card: usize) -> Option<usize> {
        let extent = self.painted.cards.get(card)?;
        Some(settle_row(*extent, self.band(), self.viewport_height))
    }

    /// The last card may always scroll into the focal band, even when it is shorter than the
    /// viewport.
    fn max_scroll(&self) -> usize {
        let overflow = self.painted.height().saturating_sub(self.viewport_height);
        let last_settle = self
            .painted
            .cards
            .len()
            .checked_sub(1)
            .and_then(|last| self.settle_row_for(last))
            .unwrap_or(0);
        overflow.max(last_settle).min(MAX_SCROLL)
    }

    fn tick(&mut self, now: Instant) {
        let Some(animation) = self.animation else {
            return;
        };
        let (row, finished) = animation.position(now);
        self.scroll = row.min(self.max_scroll());
        if finished {
            self.animation = None;
        }
    }

    fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    fn viewport_snapshot(&self) -> ViewportSnapshot {
        ViewportSnapshot {
            viewport: Viewport {
                top: self.scroll as f64,
                height: self.viewport_height as f64,
            },
            cards: self.painted.cards.clone(),
        }
    }

    fn report_viewport(&mut self) {
        if self.page.status() != PageStatus::Ready {
            return;
        }
        let snapshot = self.viewport_snapshot();
        self.dispatch(PageEvent::Viewport(snapshot));
    }

    fn nav_width(&self) -> u16 {
        let widest = u16::try_from(widest_label(self.page.document())).unwrap_or(u16::MAX);
        widest.saturating_add(4).clamp(NAV_MIN_WIDTH, NAV_MAX_WIDTH)
    }

    fn content_title(&self) -> String {
        match self.page.active_position().and_then(|position| self.page.card(position)) {
            Some(card) => card
                .find_by_class("term-badge")
                .map(|badge| badge.text_content())
                .unwrap_or_default(),
            None => String::new(),
        }
    }

    fn scroll_by(&mut self, delta: isize) {
        self.animation = None;
        let row = self.scroll.saturating_add_signed(delta);
        self.scroll = row.min(self.max_scroll());
    }

    fn page_step(&self) -> isize {
        isize::try_from(self.viewport_height.saturating_sub(2).max(1)).unwrap_or(1)
    }

    /// Activates the control `offset` positions away from the active one.
    fn activate_relative(&mut self, offset: isize) {
        let count = self.page.anchors().len();
        if count == 0 {
            return;
        }
        let target = match self.page.active_position() {
            Some(position) => position
                .saturating_add_signed(offset)
                .min(count - 1),
            None => 0,
        };
        self.activate_position(target);
    }

    fn activate_position(&mut self, position: usize) {
        let Some(id) = self.page.anchors().id(position).cloned() else {
            return;
        };
        self.dispatch(PageEvent::NavActivated(id));
    }

    /// Control index under a terminal cell in the nav pane.
    fn nav_index_at(&self, column: u16, row: u16) -> Option<usize> {
        let area = self.nav_area;
        let inside = column >= area.x
            && column < area.x.saturating_add(area.width)
            && row >= area.y
            && row < area.y.saturating_add(area.height);
        if !inside {
            return None;
        }
        let index = usize::from(row - area.y) + self.nav_state.offset();
        (index < self.page.anchors().len()).then_some(index)
    }

    fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('j') | KeyCode::Down => self.scroll_by(1),
            KeyCode::Char('k') | KeyCode::Up => self.scroll_by(-1),
            KeyCode::PageDown | KeyCode::Char(' ') => self.scroll_by(self.page_step()),
            KeyCode::PageUp => self.scroll_by(-self.page_step()),
            KeyCode::Char('g') | KeyCode::Home => {
                self.animation = None;
                self.scroll = 0;
            }
            KeyCode::Char('G') | KeyCode::End => {
                self.animation = None;
                self.scroll = self.max_scroll();
            }
            KeyCode::Char(']') | KeyCode::Tab => self.activate_relative(1),
            KeyCode::Char('[') | KeyCode::BackTab => self.activate_relative(-1),
            KeyCode::Enter => {
                if let Some(position) = self.page.active_position() {
                    self.activate_position(position);
                }
            }
            _ => {}
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::ScrollDown => self.scroll_by(WHEEL_STEP as isize),
            MouseEventKind::ScrollUp => self.scroll_by(-(WHEEL_STEP as isize)),
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(index) = self.nav_index_at(mouse.column, mouse.row) {
                    self.activate_position(index);
                }
            }
            _ => {}
        }
    }
}

struct TerminalSession {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalSession {
    fn new() -> Result<Self, Box<dyn Error>> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture).map_err(|err| {
            teardown_terminal();
            err
        })?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).map_err(|err| {
            teardown_terminal();
            err
        })?;
        terminal.clear().map_err(|err| {
            teardown_terminal();
            err
        })?;

        Ok(Self { terminal })
    }

    fn draw(&mut self, draw_fn: impl FnOnce(&mut Frame<'_>)) -> io::Result<()> {
        self.terminal.draw(draw_fn)?;
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = self.terminal.show_cursor();
        teardown_terminal();
    }
}

fn teardown_terminal() {
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    let _ = execute!(stdout, DisableMouseCapture, LeaveAlternateScreen);
}
