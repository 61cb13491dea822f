//! Personal info step of the CV builder.
//!
//! A field list over [`crate::models::PersonalInfo`]. Every keystroke in
//! editing mode goes through the wizard so the document is persisted as the
//! user types, the same way the web form saved on each change.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::models::{CVSection, PersonalInfo};

use super::{AppState, Screen};
use crate::builder::WizardStep;

/// Fields of the personal info step, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersonalField {
    FirstName,
    LastName,
    Email,
    Phone,
    Address,
    Title,
    Summary,
    Linkedin,
    Website,
}

impl PersonalField {
    /// All fields in display order.
    pub const ALL: [Self; 9] = [
        Self::FirstName,
        Self::LastName,
        Self::Email,
        Self::Phone,
        Self::Address,
        Self::Title,
        Self::Summary,
        Self::Linkedin,
        Self::Website,
    ];

    const fn next(self) -> Self {
        match self {
            Self::FirstName => Self::LastName,
            Self::LastName => Self::Email,
            Self::Email => Self::Phone,
            Self::Phone => Self::Address,
            Self::Address => Self::Title,
            Self::Title => Self::Summary,
            Self::Summary => Self::Linkedin,
            Self::Linkedin => Self::Website,
            Self::Website => Self::FirstName,
        }
    }

    const fn previous(self) -> Self {
        match self {
            Self::FirstName => Self::Website,
            Self::LastName => Self::FirstName,
            Self::Email => Self::LastName,
            Self::Phone => Self::Email,
            Self::Address => Self::Phone,
            Self::Title => Self::Address,
            Self::Summary => Self::Title,
            Self::Linkedin => Self::Summary,
            Self::Website => Self::Linkedin,
        }
    }

    /// Form label, asterisks marking required fields.
    const fn label(self) -> &'static str {
        match self {
            Self::FirstName => "First Name *",
            Self::LastName => "Last Name *",
            Self::Email => "Email *",
            Self::Phone => "Phone",
            Self::Address => "Address",
            Self::Title => "Professional Title *",
            Self::Summary => "Professional Summary",
            Self::Linkedin => "LinkedIn Profile",
            Self::Website => "Website / Portfolio",
        }
    }

    /// Placeholder shown while the field is empty.
    const fn placeholder(self) -> &'static str {
        match self {
            Self::FirstName => "John",
            Self::LastName => "Doe",
            Self::Email => "john.doe@example.com",
            Self::Phone => "+1 234 567 890",
            Self::Address => "City, Country",
            Self::Title => "e.g. Frontend Developer",
            Self::Summary => {
                "Write a short summary about yourself and your professional background..."
            }
            Self::Linkedin => "https://linkedin.com/in/your-profile",
            Self::Website => "https://yourwebsite.com",
        }
    }

    fn value(self, info: &PersonalInfo) -> &str {
        match self {
            Self::FirstName => &info.first_name,
            Self::LastName => &info.last_name,
            Self::Email => &info.email,
            Self::Phone => &info.phone,
            Self::Address => &info.address,
            Self::Title => &info.title,
            Self::Summary => &info.summary,
            Self::Linkedin => &info.linkedin,
            Self::Website => &info.website,
        }
    }

    fn value_mut(self, info: &mut PersonalInfo) -> &mut String {
        match self {
            Self::FirstName => &mut info.first_name,
            Self::LastName => &mut info.last_name,
            Self::Email => &mut info.email,
            Self::Phone => &mut info.phone,
            Self::Address => &mut info.address,
            Self::Title => &mut info.title,
            Self::Summary => &mut info.summary,
            Self::Linkedin => &mut info.linkedin,
            Self::Website => &mut info.website,
        }
    }
}

/// UI state of the personal info step.
#[derive(Debug, Clone)]
pub struct PersonalFormState {
    /// Field the cursor is on
    pub active_field: PersonalField,
    /// True while keystrokes edit the active field
    pub editing: bool,
}

impl PersonalFormState {
    #[must_use]
    pub fn new() -> Self {
        Self {
            active_field: PersonalField::FirstName,
            editing: false,
        }
    }
}

impl Default for PersonalFormState {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle personal info keys. Returns true when the key was consumed.
pub fn handle_input(state: &mut AppState, key: KeyEvent) -> bool {
    if state.personal_form.editing {
        handle_editing(state, key);
        return true;
    }

    match key.code {
        KeyCode::Up => {
            state.personal_form.active_field = state.personal_form.active_field.previous();
            true
        }
        KeyCode::Down => {
            state.personal_form.active_field = state.personal_form.active_field.next();
            true
        }
        KeyCode::Enter => {
            state.personal_form.editing = true;
            true
        }
        KeyCode::Char('n') | KeyCode::PageDown => {
            state.wizard.go_next();
            true
        }
        KeyCode::Char('p') | KeyCode::PageUp => {
            state.wizard.go_previous();
            true
        }
        KeyCode::Char(c @ '1'..='6') => {
            let index = c as usize - '1' as usize;
            state.wizard.select_step(WizardStep::ALL[index]);
            true
        }
        KeyCode::Esc => {
            state.screen = Screen::Dashboard;
            true
        }
        _ => false,
    }
}

fn handle_editing(state: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Enter | KeyCode::Esc => state.personal_form.editing = false,
        KeyCode::Backspace => {
            let mut info = state.wizard.document().personal.clone();
            state.personal_form.active_field.value_mut(&mut info).pop();
            state
                .wizard
                .update_section(CVSection::Personal(info), &mut *state.storage);
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            let mut info = state.wizard.document().personal.clone();
            state
                .personal_form
                .active_field
                .value_mut(&mut info)
                .push(c);
            state
                .wizard
                .update_section(CVSection::Personal(info), &mut *state.storage);
        }
        _ => {}
    }
}

/// Render the personal info step into `area`.
pub fn render(f: &mut Frame, area: Rect, state: &AppState) {
    let theme = &state.theme;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(9), Constraint::Length(1)])
        .split(area);

    let info = &state.wizard.document().personal;
    let mut lines: Vec<Line> = Vec::new();

    for field in PersonalField::ALL {
        let is_active = field == state.personal_form.active_field;
        let value = field.value(info);

        let marker = if is_active { "> " } else { "  " };
        let label_style = if is_active {
            Style::default()
                .fg(theme.active)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.text_secondary)
        };

        let value_span = if value.is_empty() && !(is_active && state.personal_form.editing) {
            Span::styled(
                field.placeholder().to_string(),
                Style::default().fg(theme.text_muted),
            )
        } else if is_active && state.personal_form.editing {
            Span::styled(
                format!("{value}_"),
                Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled(value.to_string(), Style::default().fg(theme.text))
        };

        let marker_style = if is_active {
            label_style.bg(theme.highlight_bg)
        } else {
            label_style
        };
        lines.push(Line::from(vec![
            Span::styled(marker.to_string(), marker_style),
            Span::styled(format!("{:<24}", field.label()), label_style),
            value_span,
        ]));
    }

    let form = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Personal Information ")
            .style(Style::default().bg(theme.background)),
    );
    f.render_widget(form, chunks[0]);

    let instructions = if state.personal_form.editing {
        "Type to edit  |  Enter/Esc: Done"
    } else {
        "Enter: Edit field  |  ↑/↓: Fields  |  n: Next step  |  p: Previous step"
    };
    f.render_widget(
        Paragraph::new(Span::styled(
            instructions,
            Style::default().fg(theme.text_muted),
        )),
        chunks[1],
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::STORAGE_KEY_CV_DATA;
    use crate::tui::test_state;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(state: &mut AppState, text: &str) {
        for c in text.chars() {
            handle_input(state, key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_typing_updates_and_persists_document() {
        let mut state = test_state();
        state.screen = Screen::Builder;
        state.wizard.select_step(WizardStep::Personal);

        handle_input(&mut state, key(KeyCode::Enter));
        assert!(state.personal_form.editing);
        type_text(&mut state, "Ada");
        handle_input(&mut state, key(KeyCode::Enter));

        assert!(!state.personal_form.editing);
        assert_eq!(state.wizard.document().personal.first_name, "Ada");

        let stored = state.storage.get(STORAGE_KEY_CV_DATA).unwrap();
        assert!(stored.contains("\"firstName\":\"Ada\""));
    }

    #[test]
    fn test_backspace_edits_active_field() {
        let mut state = test_state();
        handle_input(&mut state, key(KeyCode::Enter));
        type_text(&mut state, "Adaa");
        handle_input(&mut state, key(KeyCode::Backspace));
        assert_eq!(state.wizard.document().personal.first_name, "Ada");
    }

    #[test]
    fn test_field_navigation_wraps() {
        let mut state = test_state();
        handle_input(&mut state, key(KeyCode::Up));
        assert_eq!(state.personal_form.active_field, PersonalField::Website);
        handle_input(&mut state, key(KeyCode::Down));
        assert_eq!(state.personal_form.active_field, PersonalField::FirstName);
    }

    #[test]
    fn test_step_navigation_keys() {
        let mut state = test_state();
        state.wizard.select_step(WizardStep::Personal);

        handle_input(&mut state, key(KeyCode::Char('n')));
        assert_eq!(state.wizard.step(), WizardStep::Experience);

        state.wizard.select_step(WizardStep::Personal);
        handle_input(&mut state, key(KeyCode::Char('p')));
        assert_eq!(state.wizard.step(), WizardStep::Template);

        handle_input(&mut state, key(KeyCode::Char('6')));
        assert_eq!(state.wizard.step(), WizardStep::Preview);
    }

    #[test]
    fn test_esc_returns_to_dashboard() {
        let mut state = test_state();
        state.screen = Screen::Builder;
        handle_input(&mut state, key(KeyCode::Esc));
        assert_eq!(state.screen, Screen::Dashboard);
    }
}
