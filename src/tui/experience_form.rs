//! Work experience step of the CV builder.
//!
//! One entry is shown at a time; Left/Right move between entries, `a` and
//! `d` add and remove them. The last entry can never be removed.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::builder::WizardStep;
use crate::models::{CVSection, ExperienceEntry};

use super::{AppState, Screen};

/// Fields of one experience entry, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExperienceField {
    Company,
    Position,
    StartDate,
    EndDate,
    Current,
    Description,
}

impl ExperienceField {
    /// All fields in display order.
    pub const ALL: [Self; 6] = [
        Self::Company,
        Self::Position,
        Self::StartDate,
        Self::EndDate,
        Self::Current,
        Self::Description,
    ];

    const fn next(self) -> Self {
        match self {
            Self::Company => Self::Position,
            Self::Position => Self::StartDate,
            Self::StartDate => Self::EndDate,
            Self::EndDate => Self::Current,
            Self::Current => Self::Description,
            Self::Description => Self::Company,
        }
    }

    const fn previous(self) -> Self {
        match self {
            Self::Company => Self::Description,
            Self::Position => Self::Company,
            Self::StartDate => Self::Position,
            Self::EndDate => Self::StartDate,
            Self::Current => Self::EndDate,
            Self::Description => Self::Current,
        }
    }

    const fn placeholder(self) -> &'static str {
        match self {
            Self::Company => "Acme Inc.",
            Self::Position => "e.g. Frontend Developer",
            Self::StartDate | Self::EndDate => "YYYY-MM",
            Self::Current => "",
            Self::Description => "Describe your responsibilities and achievements...",
        }
    }

    fn value(self, entry: &ExperienceEntry) -> &str {
        match self {
            Self::Company => &entry.company,
            Self::Position => &entry.position,
            Self::StartDate => &entry.start_date,
            Self::EndDate => &entry.end_date,
            Self::Current => "",
            Self::Description => &entry.description,
        }
    }

    /// Mutable slot for text fields; `None` for the checkbox.
    fn value_mut(self, entry: &mut ExperienceEntry) -> Option<&mut String> {
        match self {
            Self::Company => Some(&mut entry.company),
            Self::Position => Some(&mut entry.position),
            Self::StartDate => Some(&mut entry.start_date),
            Self::EndDate => Some(&mut entry.end_date),
            Self::Current => None,
            Self::Description => Some(&mut entry.description),
        }
    }
}

/// UI state of the experience step.
#[derive(Debug, Clone)]
pub struct ExperienceFormState {
    /// Entry the form is showing
    pub entry_index: usize,
    /// Field the cursor is on
    pub active_field: ExperienceField,
    /// True while keystrokes edit the active field
    pub editing: bool,
}

impl ExperienceFormState {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entry_index: 0,
            active_field: ExperienceField::Company,
            editing: false,
        }
    }
}

impl Default for ExperienceFormState {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle experience step keys. Returns true when the key was consumed.
pub fn handle_input(state: &mut AppState, key: KeyEvent) -> bool {
    if state.experience_form.editing {
        handle_editing(state, key);
        return true;
    }

    let count = state.wizard.document().experience.len();
    match key.code {
        KeyCode::Up => {
            state.experience_form.active_field = state.experience_form.active_field.previous();
            true
        }
        KeyCode::Down => {
            state.experience_form.active_field = state.experience_form.active_field.next();
            true
        }
        KeyCode::Left => {
            state.experience_form.entry_index = state.experience_form.entry_index.saturating_sub(1);
            true
        }
        KeyCode::Right => {
            if state.experience_form.entry_index + 1 < count {
                state.experience_form.entry_index += 1;
            }
            true
        }
        KeyCode::Enter | KeyCode::Char(' ')
            if state.experience_form.active_field == ExperienceField::Current =>
        {
            toggle_current(state);
            true
        }
        KeyCode::Enter => {
            state.experience_form.editing = true;
            true
        }
        KeyCode::Char('a') => {
            state.wizard.add_experience(&mut *state.storage);
            state.experience_form.entry_index = state.wizard.document().experience.len() - 1;
            state.experience_form.active_field = ExperienceField::Company;
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
        .experience_form
        .entry_index
        .min(state.wizard.document().experience.len().saturating_sub(1))
}

fn toggle_current(state: &mut AppState) {
    let index = entry_index(state);
    let mut entries = state.wizard.document().experience.clone();
    entries[index].current = !entries[index].current;
    state
        .wizard
        .update_section(CVSection::Experience(entries), &mut *state.storage);
}

fn remove_entry(state: &mut AppState) {
    let index = entry_index(state);
    let id = state.wizard.document().experience[index].id.clone();
    if state.wizard.remove_experience(&id, &mut *state.storage) {
        state.experience_form.entry_index = entry_index(state);
    } else {
        let color = state.theme.warning;
        state.set_status_colored("Cannot remove the last entry".to_string(), color);
    }
}

fn handle_editing(state: &mut AppState, key: KeyEvent) {
    let index = entry_index(state);
    match key.code {
        KeyCode::Enter | KeyCode::Esc => state.experience_form.editing = false,
        KeyCode::Backspace => {
            let mut entries = state.wizard.document().experience.clone();
            if let Some(slot) = state.experience_form.active_field.value_mut(&mut entries[index]) {
                slot.pop();
                state
                    .wizard
                    .update_section(CVSection::Experience(entries), &mut *state.storage);
            }
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            let mut entries = state.wizard.document().experience.clone();
            if let Some(slot) = state.experience_form.active_field.value_mut(&mut entries[index]) {
                slot.push(c);
                state
                    .wizard
                    .update_section(CVSection::Experience(entries), &mut *state.storage);
            }
        }
        _ => {}
    }
}

/// Render the experience step into `area`.
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

    let entries = &state.wizard.document().experience;
    let index = entry_index(state);
    let entry = &entries[index];

    f.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(
                "Work Experience",
                Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("   Experience #{} of {}", index + 1, entries.len()),
                Style::default().fg(theme.text_secondary),
            ),
        ])),
        chunks[0],
    );

    let mut lines: Vec<Line> = Vec::new();
    for field in ExperienceField::ALL {
        let is_active = field == state.experience_form.active_field;
        let marker = if is_active { "> " } else { "  " };
        let label_style = if is_active {
            Style::default()
                .fg(theme.active)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.text_secondary)
        };

        if field == ExperienceField::Current {
            let checkbox = if entry.current { "[x]" } else { "[ ]" };
            lines.push(Line::from(vec![
                Span::styled(marker.to_string(), label_style),
                Span::styled(
                    format!("{checkbox} I currently work here"),
                    if is_active {
                        label_style
                    } else {
                        Style::default().fg(theme.text)
                    },
                ),
            ]));
            continue;
        }

        let label = match field {
            ExperienceField::Company => "Company Name *".to_string(),
            ExperienceField::Position => "Job Title *".to_string(),
            ExperienceField::StartDate => "Start Date *".to_string(),
            ExperienceField::EndDate => {
                if entry.current {
                    "End Date (Current)".to_string()
                } else {
                    "End Date *".to_string()
                }
            }
            ExperienceField::Description => "Job Description".to_string(),
            ExperienceField::Current => String::new(),
        };

        let value = field.value(entry);
        let editing_here = is_active && state.experience_form.editing;
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
            Span::styled(format!("{label:<22}"), label_style),
            value_span,
        ]));
    }

    let form = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" Experience #{} ", index + 1))
            .style(Style::default().bg(theme.background)),
    );
    f.render_widget(form, chunks[1]);

    let instructions = if state.experience_form.editing {
        "Type to edit  |  Enter/Esc: Done"
    } else {
        "Enter: Edit  |  ←/→: Entries  |  a: Add Another Experience  |  d: Remove  |  n/p: Steps"
    };
    f.render_widget(
        Paragraph::new(Span::styled(
            instructions,
            Style::default().fg(theme.text_muted),
        )),
        chunks[2],
    );
}
