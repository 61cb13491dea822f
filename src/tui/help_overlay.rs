//! Help overlay widget showing all keyboard shortcuts organized by screen.
//!
//! This module provides a scrollable help overlay accessible via '?' key.
//! The content is built from the embedded help registry so the overlay and
//! the status bar hints can never drift apart.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, Wrap},
    Frame,
};

use super::help_registry::{contexts, HelpRegistry};
use super::{Component, Theme};

/// Lines jumped by PgUp/PgDn.
const PAGE_JUMP: usize = 10;

/// Contexts in the order they appear in the overlay.
const SECTION_ORDER: &[&str] = &[
    contexts::DASHBOARD,
    contexts::AUTH,
    contexts::BUILDER_TEMPLATE,
    contexts::BUILDER_FORM,
    contexts::BUILDER_EDITING,
    contexts::BUILDER_SKILLS,
    contexts::BUILDER_PREVIEW,
    contexts::JOBS,
    contexts::JOBS_SEARCH,
    contexts::PLANS,
    contexts::CHAT,
    contexts::HELP,
];

/// Events emitted by the help overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelpOverlayEvent {
    /// User dismissed the overlay
    Closed,
}

/// Scrollable help overlay backed by the help registry.
#[derive(Debug, Clone)]
pub struct HelpOverlay {
    /// Keybinding definitions the content is built from
    registry: HelpRegistry,
    /// Current scroll offset (line number)
    scroll_offset: usize,
    /// Total number of content lines
    total_lines: usize,
}

impl HelpOverlay {
    /// Creates a new help overlay.
    #[must_use]
    pub fn new() -> Self {
        let registry = HelpRegistry::default();
        // Line count does not depend on the theme, only the styling does
        let total_lines = build_content(&registry, &Theme::dark()).len();
        Self {
            registry,
            scroll_offset: 0,
            total_lines,
        }
    }

    /// Current scroll offset.
    #[must_use]
    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    /// Scroll up by one line.
    pub fn scroll_up(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(1);
    }

    /// Scroll down by one line.
    pub fn scroll_down(&mut self) {
        if self.scroll_offset + 1 < self.total_lines {
            self.scroll_offset += 1;
        }
    }

    /// Scroll to the top.
    pub fn scroll_to_top(&mut self) {
        self.scroll_offset = 0;
    }

    /// Scroll to the bottom.
    pub fn scroll_to_bottom(&mut self) {
        self.scroll_offset = self.total_lines.saturating_sub(1);
    }

    /// Scroll down by a page.
    pub fn page_down(&mut self) {
        self.scroll_offset =
            (self.scroll_offset + PAGE_JUMP).min(self.total_lines.saturating_sub(1));
    }

    /// Scroll up by a page.
    pub fn page_up(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(PAGE_JUMP);
    }
}

impl Component for HelpOverlay {
    type Event = HelpOverlayEvent;

    fn handle_input(&mut self, key: KeyEvent) -> Option<Self::Event> {
        match key.code {
            KeyCode::Char('?') | KeyCode::Esc => return Some(HelpOverlayEvent::Closed),
            KeyCode::Up => self.scroll_up(),
            KeyCode::Down => self.scroll_down(),
            KeyCode::PageUp => self.page_up(),
            KeyCode::PageDown => self.page_down(),
            KeyCode::Home => self.scroll_to_top(),
            KeyCode::End => self.scroll_to_bottom(),
            _ => {}
        }
        None
    }

    fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        // Calculate centered modal size (60% width, 80% height)
        let width = (area.width * 60) / 100;
        let height = (area.height * 80) / 100;
        let x = (area.width.saturating_sub(width)) / 2;
        let y = (area.height.saturating_sub(height)) / 2;

        let modal_area = Rect {
            x: x + area.x,
            y: y + area.y,
            width,
            height,
        };

        // Create layout for content area and scrollbar
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(modal_area);

        let content_area = chunks[0];
        let scrollbar_area = chunks[1];

        let content = build_content(&self.registry, theme);

        // Create paragraph with scrolling
        let visible_height = content_area.height.saturating_sub(2) as usize; // Account for borders
        let paragraph = Paragraph::new(content)
            .block(
                Block::default()
                    .title(" Help - Keyboard Shortcuts ")
                    .title_alignment(Alignment::Center)
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(theme.primary))
                    .style(Style::default().bg(theme.background)),
            )
            .style(Style::default().fg(theme.text))
            .wrap(Wrap { trim: false })
            .scroll((self.scroll_offset as u16, 0));

        frame.render_widget(ratatui::widgets::Clear, modal_area);
        frame.render_widget(paragraph, content_area);

        // Render scrollbar
        let scrollbar = Scrollbar::default()
            .orientation(ScrollbarOrientation::VerticalRight)
            .begin_symbol(Some("↑"))
            .end_symbol(Some("↓"))
            .track_symbol(Some("│"))
            .thumb_symbol("█")
            .style(Style::default().fg(theme.primary));

        let mut scrollbar_state =
            ScrollbarState::new(self.total_lines.saturating_sub(visible_height))
                .position(self.scroll_offset);

        frame.render_stateful_widget(scrollbar, scrollbar_area, &mut scrollbar_state);
    }
}

impl Default for HelpOverlay {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the full overlay content from the registry, one section per context.
fn build_content(registry: &HelpRegistry, theme: &Theme) -> Vec<Line<'static>> {
    let rule = "═══════════════════════════════════════════════════════════════";
    let mut lines: Vec<Line<'static>> = vec![
        Line::from(Span::styled(
            rule.to_string(),
            Style::default().fg(theme.primary),
        )),
        Line::from(Span::styled(
            format!("{:^63}", format!("{} - Help", registry.app_name())),
            Style::default()
                .fg(theme.primary)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            rule.to_string(),
            Style::default().fg(theme.primary),
        )),
        Line::from(""),
    ];

    for context_name in SECTION_ORDER {
        let Some(context) = registry.context(context_name) else {
            continue;
        };

        lines.push(Line::from(Span::styled(
            format!("═══ {} ═══", context.name.to_uppercase()),
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(Span::styled(
            format!("  {}", context.description),
            Style::default().fg(theme.text_muted),
        )));
        lines.push(Line::from(""));

        for binding in registry.bindings_by_priority(context_name) {
            let keys = HelpRegistry::key_label(binding);
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(format!("{keys:<22}"), Style::default().fg(theme.success)),
                Span::styled(binding.action.clone(), Style::default().fg(theme.text)),
            ]));
        }

        lines.push(Line::from(""));
    }

    lines.push(Line::from(Span::styled(
        rule.to_string(),
        Style::default().fg(theme.primary),
    )));
    lines.push(Line::from(Span::styled(
        format!("{:^63}", "Press '?' to close help • Press ↑↓ to scroll"),
        Style::default().fg(theme.text_muted),
    )));
    lines.push(Line::from(Span::styled(
        rule.to_string(),
        Style::default().fg(theme.primary),
    )));

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_content_covers_every_section() {
        let overlay = HelpOverlay::new();
        let content = build_content(&overlay.registry, &Theme::dark());
        let text: Vec<String> = content
            .iter()
            .map(|line| {
                line.spans
                    .iter()
                    .map(|span| span.content.as_ref())
                    .collect::<String>()
            })
            .collect();
        let joined = text.join("\n");

        assert!(joined.contains("DASHBOARD"));
        assert!(joined.contains("JOB SEARCH"));
        assert!(joined.contains("PREMIUM PLANS"));
        assert!(joined.contains("ASSISTANT CHAT"));
    }

    #[test]
    fn test_scroll_clamps_at_edges() {
        let mut overlay = HelpOverlay::new();
        overlay.scroll_up();
        assert_eq!(overlay.scroll_offset(), 0);

        overlay.scroll_to_bottom();
        let bottom = overlay.scroll_offset();
        overlay.scroll_down();
        assert_eq!(overlay.scroll_offset(), bottom);
    }

    #[test]
    fn test_page_navigation() {
        let mut overlay = HelpOverlay::new();
        overlay.handle_input(key(KeyCode::PageDown));
        assert_eq!(overlay.scroll_offset(), PAGE_JUMP);
        overlay.handle_input(key(KeyCode::PageUp));
        assert_eq!(overlay.scroll_offset(), 0);
        overlay.handle_input(key(KeyCode::End));
        assert!(overlay.scroll_offset() > 0);
        overlay.handle_input(key(KeyCode::Home));
        assert_eq!(overlay.scroll_offset(), 0);
    }

    #[test]
    fn test_question_mark_and_esc_close() {
        let mut overlay = HelpOverlay::new();
        assert_eq!(
            overlay.handle_input(key(KeyCode::Char('?'))),
            Some(HelpOverlayEvent::Closed)
        );
        assert_eq!(
            overlay.handle_input(key(KeyCode::Esc)),
            Some(HelpOverlayEvent::Closed)
        );
    }
}
