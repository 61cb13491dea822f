//! Sign in / register form.
//!
//! Mirrors the mocked auth flow: the form only collects credentials and
//! reports them to the parent, which starts the session request and flips
//! the form into its pending state until the session resolves.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::{Component, Theme};

/// Whether the form is signing in to an existing account or creating one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    /// Sign in to an existing account
    Login,
    /// Create a new account
    Register,
}

impl AuthMode {
    /// The other mode.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Login => Self::Register,
            Self::Register => Self::Login,
        }
    }

    /// Tab label shown above the form.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Login => "Sign In",
            Self::Register => "Register",
        }
    }
}

/// Form fields in display order. Name only exists in register mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthField {
    Name,
    Email,
    Password,
}

impl AuthField {
    const fn next(self, mode: AuthMode) -> Self {
        match (self, mode) {
            (Self::Name, _) => Self::Email,
            (Self::Email, _) => Self::Password,
            (Self::Password, AuthMode::Login) => Self::Email,
            (Self::Password, AuthMode::Register) => Self::Name,
        }
    }

    const fn previous(self, mode: AuthMode) -> Self {
        match (self, mode) {
            (Self::Name, _) => Self::Password,
            (Self::Email, AuthMode::Login) => Self::Password,
            (Self::Email, AuthMode::Register) => Self::Name,
            (Self::Password, _) => Self::Email,
        }
    }

    const fn label(self) -> &'static str {
        match self {
            Self::Name => " Full Name ",
            Self::Email => " Email ",
            Self::Password => " Password ",
        }
    }
}

/// Events emitted by the auth form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthFormEvent {
    /// User submitted valid credentials
    Submitted {
        mode: AuthMode,
        name: String,
        email: String,
        password: String,
    },
    /// User left the form
    Cancelled,
}

/// Sign in / register form state.
pub struct AuthForm {
    mode: AuthMode,
    active_field: AuthField,
    name: String,
    email: String,
    password: String,
    /// True while the session request is in flight
    pending: bool,
    error: Option<String>,
}

impl AuthForm {
    /// Creates the form in sign-in mode.
    #[must_use]
    pub fn new() -> Self {
        Self {
            mode: AuthMode::Login,
            active_field: AuthField::Email,
            name: String::new(),
            email: String::new(),
            password: String::new(),
            pending: false,
            error: None,
        }
    }

    /// Current mode.
    #[must_use]
    pub fn mode(&self) -> AuthMode {
        self.mode
    }

    /// Currently focused field.
    #[must_use]
    pub fn active_field(&self) -> AuthField {
        self.active_field
    }

    /// Whether the form is waiting on the session.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Flip the pending indicator. Input is ignored while pending.
    pub fn set_pending(&mut self, pending: bool) {
        self.pending = pending;
    }

    /// Clear the form, called once the session resolved.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    fn toggle_mode(&mut self) {
        self.mode = self.mode.toggled();
        self.error = None;
        if self.mode == AuthMode::Login && self.active_field == AuthField::Name {
            self.active_field = AuthField::Email;
        }
    }

    fn active_value_mut(&mut self) -> &mut String {
        match self.active_field {
            AuthField::Name => &mut self.name,
            AuthField::Email => &mut self.email,
            AuthField::Password => &mut self.password,
        }
    }

    fn validate(&self) -> Result<(), String> {
        if self.mode == AuthMode::Register && self.name.trim().is_empty() {
            return Err("Name is required".to_string());
        }
        if self.email.trim().is_empty() || !self.email.contains('@') {
            return Err("Enter a valid email address".to_string());
        }
        if self.password.is_empty() {
            return Err("Password is required".to_string());
        }
        Ok(())
    }

    fn render_field(
        &self,
        frame: &mut Frame,
        area: Rect,
        theme: &Theme,
        field: AuthField,
        value: String,
    ) {
        let is_active = self.active_field == field && !self.pending;
        let display = if is_active {
            format!("{value}_")
        } else {
            value
        };

        let style = if is_active {
            Style::default()
                .fg(theme.active)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.text)
        };

        let widget = Paragraph::new(display).style(style).block(
            Block::default()
                .borders(Borders::ALL)
                .title(field.label())
                .style(Style::default().bg(theme.background)),
        );
        frame.render_widget(widget, area);
    }
}

impl Default for AuthForm {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for AuthForm {
    type Event = AuthFormEvent;

    fn handle_input(&mut self, key: KeyEvent) -> Option<Self::Event> {
        if self.pending {
            if key.code == KeyCode::Esc {
                return Some(AuthFormEvent::Cancelled);
            }
            return None;
        }

        match key.code {
            KeyCode::Tab | KeyCode::Down => {
                self.active_field = self.active_field.next(self.mode);
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.active_field = self.active_field.previous(self.mode);
            }
            KeyCode::Left | KeyCode::Right => self.toggle_mode(),
            KeyCode::Enter => match self.validate() {
                Ok(()) => {
                    self.error = None;
                    return Some(AuthFormEvent::Submitted {
                        mode: self.mode,
                        name: self.name.trim().to_string(),
                        email: self.email.trim().to_string(),
                        password: self.password.clone(),
                    });
                }
                Err(e) => self.error = Some(e),
            },
            KeyCode::Esc => return Some(AuthFormEvent::Cancelled),
            KeyCode::Backspace => {
                self.active_value_mut().pop();
                self.error = None;
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.active_value_mut().push(c);
                self.error = None;
            }
            _ => {}
        }
        None
    }

    fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let card = centered_rect(60, 70, area);
        frame.render_widget(Clear, card);
        frame.render_widget(
            Block::default().style(Style::default().bg(theme.background)),
            card,
        );

        let mut constraints = vec![
            Constraint::Length(3), // Mode tabs
            Constraint::Length(1), // Subtitle
        ];
        if self.mode == AuthMode::Register {
            constraints.push(Constraint::Length(3)); // Name
        }
        constraints.push(Constraint::Length(3)); // Email
        constraints.push(Constraint::Length(3)); // Password
        constraints.push(Constraint::Length(2)); // Error / pending
        constraints.push(Constraint::Min(0));
        constraints.push(Constraint::Length(2)); // Help

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(card);

        // Mode tabs
        let tabs = Line::from(vec![
            Span::styled(
                AuthMode::Login.label(),
                if self.mode == AuthMode::Login {
                    Style::default()
                        .fg(theme.active)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(theme.inactive)
                },
            ),
            Span::styled("  |  ", Style::default().fg(theme.text_muted)),
            Span::styled(
                AuthMode::Register.label(),
                if self.mode == AuthMode::Register {
                    Style::default()
                        .fg(theme.active)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(theme.inactive)
                },
            ),
        ]);
        let tabs_widget = Paragraph::new(tabs).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .style(Style::default().bg(theme.background)),
        );
        frame.render_widget(tabs_widget, chunks[0]);

        let subtitle = match self.mode {
            AuthMode::Login => "Sign in to continue to Thynk",
            AuthMode::Register => "Create an account to get started",
        };
        frame.render_widget(
            Paragraph::new(subtitle)
                .style(Style::default().fg(theme.text_secondary))
                .alignment(Alignment::Center),
            chunks[1],
        );

        let mut next = 2;
        if self.mode == AuthMode::Register {
            self.render_field(frame, chunks[next], theme, AuthField::Name, self.name.clone());
            next += 1;
        }
        self.render_field(
            frame,
            chunks[next],
            theme,
            AuthField::Email,
            self.email.clone(),
        );
        next += 1;
        self.render_field(
            frame,
            chunks[next],
            theme,
            AuthField::Password,
            "•".repeat(self.password.chars().count()),
        );
        next += 1;

        // Error line, or the pending indicator while the session resolves
        if self.pending {
            let label = match self.mode {
                AuthMode::Login => "Signing in...",
                AuthMode::Register => "Creating your account...",
            };
            frame.render_widget(
                Paragraph::new(label)
                    .style(Style::default().fg(theme.warning))
                    .alignment(Alignment::Center),
                chunks[next],
            );
        } else if let Some(error) = &self.error {
            frame.render_widget(
                Paragraph::new(error.as_str())
                    .style(Style::default().fg(theme.error))
                    .alignment(Alignment::Center),
                chunks[next],
            );
        }

        let help = Line::from(vec![
            Span::styled("Enter", Style::default().fg(theme.accent)),
            Span::raw(" Submit  "),
            Span::styled("Tab", Style::default().fg(theme.accent)),
            Span::raw(" Fields  "),
            Span::styled("←/→", Style::default().fg(theme.accent)),
            Span::raw(" Mode  "),
            Span::styled("Esc", Style::default().fg(theme.accent)),
            Span::raw(" Back"),
        ]);
        frame.render_widget(
            Paragraph::new(help)
                .style(Style::default().fg(theme.text))
                .alignment(Alignment::Center),
            chunks[chunks.len() - 1],
        );
    }
}

/// Helper to create a centered rectangle
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
