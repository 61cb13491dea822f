//! Education step of the CV builder.
//!
//! Same shape as the experience step: one entry at a time, Left/Right to
//! move between entries, `a`/`d` to add and remove.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::builder::WizardStep;
use crate::models::{CVSection, EducationEntry};

use super::{AppState, Screen};

/// Fields of one education entry, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EducationField {
    Institution,
    Degree,
    Field,
    StartDate,
    EndDate,
    Description,
}

impl EducationField {
    /// All fields in display order.
    pub const ALL: [Self; 6] = [
        Self::Institution,
        Self::Degree,
        Self::Field,
        Self::StartDate,
        Self::EndDate,
        Self::Description,
    ];

    const fn next(self) -> Self {
        match self {
            Self::Institution => Self::Degree,
            Self::Degree => Self::Field,
            Self::Field => Self::StartDate,
            Self::StartDate => Self::EndDate,
            Self::EndDate => Self::Description,
            Self::Description => Self::Institution,
        }
    }

    const fn previous(self) -> Self {
        match self {
            Self::Institution => Self::Description,
            Self::Degree => Self::Institution,
            Self::Field => Self::Degree,
            Self::StartDate => Self::Field,
            Self::EndDate => Self::StartDate,
            Self::Description => Self::EndDate,
        }
    }

    const fn label(self) -> &'static str {
        match self {
            Self::Institution => "Institution Name *",
            Self::Degree => "Degree *",
            Self::Field => "Field of Study *",
            Self::StartDate => "Start Date *",
            Self::EndDate => "End Date *",
            Self::Description => "Description",
        }
    }

    const fn placeholder(self) -> &'static str {
        match self {
            Self::Institution => "University of...",
            Self::Degree => "e.g. Bachelor of Science",
            Self::Field => "e.g. Computer Science",
            Self::StartDate | Self::EndDate => "YYYY-MM",
            Self::Description => "Notable achievements or coursework...",
        }
    }

    fn value(self, entry: &EducationEntry) -> &str {
        match self {
            Self::Institution => &entry.institution,
            Self::Degree => &entry.degree,
            Self::Field => &entry.field,
            Self::StartDate => &entry.start_date,
            Self::EndDate => &entry.end_date,
            Self::Description => &entry.description,
        }
    }

    fn value_mut(self, entry: &mut EducationEntry) -> &mut String {
        match self {
            Self::Institution => &mut entry.institution,
            Self::Degree => &mut entry.degree,
            Self::Field => &mut entry.field,
            Self::StartDate => &mut entry.start_date,
            Self::EndDate => &mut entry.end_date,
            Self::Description => &mut entry.description,
        }
    }
}

/// UI state of the education step.
#[derive(Debug, Clone)]
pub struct EducationFormState {
    /// Entry the form is showing
    pub entry_index: usize,
    /// Field the cursor is on
    pub active_field: EducationField,
    /// True while keystrokes edit the active field
    pub editing: bool,
}

impl EducationFormState {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entry_index: 0,
            active_field: EducationField::Institution,
            editing: false,
        }
    }
}

impl Default for EducationFormState {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle education step keys. Returns true when the key was consumed.
pub fn handle_input(state: &mut AppState, key: KeyEvent) -> bool {
    if state.education_form.editing {
        handle_editing(state, key);
        return true;
    }

    let count = state.wizard.document().education.len();
    match key.code {
        KeyCode::Up => {
            state.education_form.active_field = state.education_form.active_field.previous();
            true
        }
        KeyCode::Down => {
            state.education_form.active_field = state.education_form.active_field.next();
            true
        }
        KeyCode::Left => {
            state.education_form.entry_index = state.education_form.entry_index.saturating_sub(1);
            true
        }
        KeyCode::Right => {
            if state.education_form.entry_index + 1 < count {
                state.education_form.entry_index += 1;
            }
            true
        }
        KeyCode::Enter => {
            state.education_form.editing = true;
            true
        }
        KeyCode::Char('a') => {
            state.wizard.add_education(&mut *state.storage);
            state.education_form.entry_index = state.wizard.document().education.len() - 1;
            state.education_form.active_field = EducationField::Institution;
            true
        }
        KeyCode::Char('d') => {
            remove_entry(state);
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

fn entry_index(state: &AppState) -> usize {
    state
        .education_form
        .entry_index
        .min(state.wizard.document().education.len().saturating_sub(1))
}

fn remove_entry(state: &mut AppState) {
    let index = entry_index(state);
    let id = state.wizard.document().education[index].id.clone();
    if state.wizard.remove_education(&id, &mut *state.storage) {
        state.education_form.entry_index = entry_index(state);
    } else {
        let color = state.theme.warning;
        state.set_status_colored("Cannot remove the last entry".to_string(), color);
    }
}

fn handle_editing(state: &mut AppState, key: KeyEvent) {
    let index = entry_index(state);
    match key.code {
        KeyCode::Enter | KeyCode::Esc => state.education_form.editing = false,
        KeyCode::Backspace => {
            let mut entries = state.wizard.document().education.clone();
            state
                .education_form
                .active_field
                .value_mut(&mut entries[index])
                .pop();
            state
                .wizard
                .update_section(CVSection::Education(entries), &mut *state.storage);
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            let mut entries = state.wizard.document().education.clone();
            state
                .education_form
                .active_field
                .value_mut(&mut entries[index])
                .push(c);
            state
                .wizard
                .update_section(CVSection::Education(entries), &mut *state.storage);
        }
        _ => {}
    }
}

/// Render the education step into `area`.
pub fn render(f: &mut Frame, area: Rect, state: &AppState) {
    let theme = &state.theme;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Heading
            Constraint::Min(7),    // Entry form
            Constraint::Length(1), // Instructions
        ])
        .split(area);

    let entries = &state.wizard.document().education;
    let index = entry_index(state);
    let entry = &entries[index];

    f.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(
                "Education",
                Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("   Education #{} of {}", index + 1, entries.len()),
                Style::default().fg(theme.text_secondary),
            ),
        ])),
        chunks[0],
    );

    let mut lines: Vec<Line> = Vec::new();
    for field in EducationField::ALL {
        let is_active = field == state.education_form.active_field;
        let marker = if is_active { "> " } else { "  " };
        let label_style = if is_active {
            Style::default()
                .fg(theme.active)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.text_secondary)
        };

        let value = field.value(entry);
        let editing_here = is_active && state.education_form.editing;
        let value_span = if value.is_empty() && !editing_here {
            Span::styled(
                field.placeholder().to_string(),
                Style::default().fg(theme.text_muted),
            )
        } else if editing_here {
            Span::styled(
                format!("{value}_"),
                Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled(value.to_string(), Style::default().fg(theme.text))
        };

        lines.push(Line::from(vec![
            Span::styled(marker.to_string(), label_style),
            Span::styled(format!("{:<20}", field.label()), label_style),
            value_span,
        ]));
    }

    let form = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" Education #{} ", index + 1))
            .style(Style::default().bg(theme.background)),
    );
    f.render_widget(form, chunks[1]);

    let instructions = if state.education_form.editing {
        "Type to edit  |  Enter/Esc: Done"
    } else {
        "Enter: Edit  |  ←/→: Entries  |  a: Add Another Education  |  d: Remove  |  n/p: Steps"
    };
    f.render_widget(
        Paragraph::new(Span::styled(
            instructions,
            Style::default().fg(theme.text_muted),
        )),
        chunks[2],
    );
}
