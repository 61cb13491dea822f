//! Assistant chat popup anchored to the bottom-right corner.
//!
//! Wraps the conversation state from [`crate::assistant`] in a TUI component.
//! The panel can be closed and reopened without losing the conversation, and
//! replies that are still pending keep arriving while it is closed.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::assistant::{ChatSender, ChatState};
use crate::constants::CHAT_INPUT_LIMIT;
use crate::inference::InferenceClient;

use super::{Component, Theme};

/// Events emitted by the chat panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatPanelEvent {
    /// User dismissed the panel
    Closed,
}

/// Chat popup wrapping the assistant conversation.
pub struct ChatPanel {
    /// Conversation state, kept alive across open/close
    chat: ChatState,
}

impl ChatPanel {
    /// Creates a chat panel. With no client the assistant answers from its
    /// built-in rules.
    #[must_use]
    pub fn new(client: Option<InferenceClient>) -> Self {
        Self {
            chat: ChatState::new(client),
        }
    }

    /// Read access to the conversation.
    #[must_use]
    pub fn chat(&self) -> &ChatState {
        &self.chat
    }

    /// Advances pending replies. Returns true when a new message arrived.
    pub fn poll(&mut self) -> bool {
        self.chat.poll()
    }

    #[cfg(test)]
    pub(crate) fn chat_mut(&mut self) -> &mut ChatState {
        &mut self.chat
    }
}

impl Component for ChatPanel {
    type Event = ChatPanelEvent;

    fn handle_input(&mut self, key: KeyEvent) -> Option<Self::Event> {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            if key.code == KeyCode::Char('l') {
                self.chat.clear();
            }
            return None;
        }

        match key.code {
            KeyCode::Esc => return Some(ChatPanelEvent::Closed),
            KeyCode::Enter => self.chat.send(),
            KeyCode::Backspace => self.chat.backspace(),
            KeyCode::Char(c) => self.chat.push_char(c),
            _ => {}
        }
        None
    }

    fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let panel_area = anchored_rect(area);

        frame.render_widget(Clear, panel_area);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Thynk Assistant ")
            .border_style(Style::default().fg(theme.primary))
            .style(Style::default().bg(theme.surface));
        let inner = block.inner(panel_area);
        frame.render_widget(block, panel_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),    // Conversation
                Constraint::Length(1), // Typing indicator
                Constraint::Length(3), // Input
                Constraint::Length(1), // Help
            ])
            .split(inner);

        self.render_messages(frame, chunks[0], theme);

        let typing = if self.chat.is_typing() {
            Line::from(Span::styled(
                "Assistant is typing...",
                Style::default()
                    .fg(theme.text_muted)
                    .add_modifier(Modifier::ITALIC),
            ))
        } else {
            Line::from("")
        };
        frame.render_widget(Paragraph::new(typing), chunks[1]);

        self.render_input(frame, chunks[2], theme);

        let help = Line::from(vec![
            Span::styled("Enter", Style::default().fg(theme.accent)),
            Span::styled(" Send  ", Style::default().fg(theme.text_muted)),
            Span::styled("Ctrl+L", Style::default().fg(theme.accent)),
            Span::styled(" Clear  ", Style::default().fg(theme.text_muted)),
            Span::styled("Esc", Style::default().fg(theme.accent)),
            Span::styled(" Close", Style::default().fg(theme.text_muted)),
        ]);
        frame.render_widget(Paragraph::new(help), chunks[3]);
    }
}

impl ChatPanel {
    /// Render the conversation tail, newest message at the bottom.
    fn render_messages(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let width = area.width.saturating_sub(1) as usize;
        if width == 0 {
            return;
        }

        let mut lines: Vec<Line> = Vec::new();
        for message in self.chat.messages() {
            let (label, color) = match message.sender {
                ChatSender::User => ("You", theme.accent),
                ChatSender::Bot => ("Thynk", theme.primary),
            };
            let stamp = message.timestamp.format("%H:%M");
            lines.push(Line::from(vec![
                Span::styled(
                    format!("{label} "),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
                Span::styled(format!("[{stamp}]"), Style::default().fg(theme.text_muted)),
            ]));
            for chunk in wrap_text(&message.text, width) {
                lines.push(Line::from(Span::styled(
                    chunk,
                    Style::default().fg(theme.text),
                )));
            }
        }

        // Keep the tail of the conversation in view
        let visible = area.height as usize;
        let skip = lines.len().saturating_sub(visible);
        let tail: Vec<Line> = lines.into_iter().skip(skip).collect();
        frame.render_widget(Paragraph::new(tail), area);
    }

    fn render_input(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let input = self.chat.input();
        let content = if self.chat.is_typing() {
            Line::from(Span::styled(
                input.to_string(),
                Style::default().fg(theme.text_muted),
            ))
        } else if input.is_empty() {
            Line::from(Span::styled(
                "Type your message... (max 250 characters)",
                Style::default().fg(theme.text_muted),
            ))
        } else {
            Line::from(Span::styled(
                format!("{input}█"),
                Style::default().fg(theme.text),
            ))
        };

        let count = input.chars().count();
        let widget = Paragraph::new(content).block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" Message ({count}/{CHAT_INPUT_LIMIT}) "))
                .style(Style::default().bg(theme.surface)),
        );
        frame.render_widget(widget, area);
    }
}

/// Compute the bottom-right anchored panel area.
fn anchored_rect(area: Rect) -> Rect {
    let width = area.width.saturating_sub(4).min(48);
    let height = area.height.saturating_sub(4).min(22);
    let x = area.x + area.width.saturating_sub(width + 2);
    let y = area.y + area.height.saturating_sub(height + 1);
    Rect {
        x,
        y,
        width,
        height,
    }
}

/// Greedy character wrap that never exceeds `width` characters per line.
fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut out = Vec::new();
    let mut current = String::new();
    let mut count = 0;
    for c in text.chars() {
        if count == width {
            out.push(std::mem::take(&mut current));
            count = 0;
        }
        current.push(c);
        count += 1;
    }
    if !current.is_empty() || out.is_empty() {
        out.push(current);
    }
    out
}
