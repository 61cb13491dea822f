//! Skills step of the CV builder.
//!
//! Two side-by-side lists: professional skills and languages. Each entry
//! has a name and a 1-5 level shown as a dot bar.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::models::{CVSection, SkillEntry, SkillKind, Skills};

use super::{AppState, Screen};

/// UI state of the skills step.
#[derive(Debug, Clone)]
pub struct SkillsFormState {
    /// List the cursor is in
    pub kind: SkillKind,
    /// Selected entry within the active list
    pub index: usize,
    /// True while keystrokes rename the selected skill
    pub editing: bool,
}

impl SkillsFormState {
    #[must_use]
    pub fn new() -> Self {
        Self {
            kind: SkillKind::Professional,
            index: 0,
            editing: false,
        }
    }
}

impl Default for SkillsFormState {
    fn default() -> Self {
        Self::new()
    }
}

fn list(skills: &Skills, kind: SkillKind) -> &[SkillEntry] {
    match kind {
        SkillKind::Professional => &skills.professional,
        SkillKind::Languages => &skills.languages,
    }
}

fn list_mut(skills: &mut Skills, kind: SkillKind) -> &mut Vec<SkillEntry> {
    match kind {
        SkillKind::Professional => &mut skills.professional,
        SkillKind::Languages => &mut skills.languages,
    }
}

fn skill_index(state: &AppState) -> usize {
    let skills = &state.wizard.document().skills;
    state
        .skills_form
        .index
        .min(list(skills, state.skills_form.kind).len().saturating_sub(1))
}

/// Handle skills step keys. Returns true when the key was consumed.
pub fn handle_input(state: &mut AppState, key: KeyEvent) -> bool {
    if state.skills_form.editing {
        handle_editing(state, key);
        return true;
    }

    let kind = state.skills_form.kind;
    let count = list(&state.wizard.document().skills, kind).len();

    match key.code {
        KeyCode::Tab => {
            state.skills_form.kind = match kind {
                SkillKind::Professional => SkillKind::Languages,
                SkillKind::Languages => SkillKind::Professional,
            };
            state.skills_form.index = skill_index(state);
            true
        }
        KeyCode::Up => {
            state.skills_form.index = skill_index(state).saturating_sub(1);
            true
        }
        KeyCode::Down => {
            if skill_index(state) + 1 < count {
                state.skills_form.index = skill_index(state) + 1;
            }
            true
        }
        KeyCode::Left => {
            adjust_level(state, -1);
            true
        }
        KeyCode::Right => {
            adjust_level(state, 1);
            true
        }
        KeyCode::Char(c @ '1'..='5') => {
            set_level(state, c as u8 - b'0');
            true
        }
        KeyCode::Enter => {
            state.skills_form.editing = true;
            true
        }
        KeyCode::Char('a') => {
            state.wizard.add_skill(kind, &mut *state.storage);
            let skills = &state.wizard.document().skills;
            state.skills_form.index = list(skills, kind).len() - 1;
            state.skills_form.editing = true;
            true
        }
        KeyCode::Char('d') => {
            remove_skill(state);
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
        KeyCode::Esc => {
            state.screen = Screen::Dashboard;
            true
        }
        _ => false,
    }
}

fn adjust_level(state: &mut AppState, delta: i8) {
    let index = skill_index(state);
    let kind = state.skills_form.kind;
    let mut skills = state.wizard.document().skills.clone();
    let entry = &mut list_mut(&mut skills, kind)[index];
    let level = entry.level.saturating_add_signed(delta);
    entry.set_level(level);
    state
        .wizard
        .update_section(CVSection::Skills(skills), &mut *state.storage);
}

fn set_level(state: &mut AppState, level: u8) {
    let index = skill_index(state);
    let kind = state.skills_form.kind;
    let mut skills = state.wizard.document().skills.clone();
    list_mut(&mut skills, kind)[index].set_level(level);
    state
        .wizard
        .update_section(CVSection::Skills(skills), &mut *state.storage);
}

fn remove_skill(state: &mut AppState) {
    let index = skill_index(state);
    let kind = state.skills_form.kind;
    let id = list(&state.wizard.document().skills, kind)[index].id.clone();
    if state.wizard.remove_skill(kind, &id, &mut *state.storage) {
        state.skills_form.index = skill_index(state);
    } else {
        let color = state.theme.warning;
        state.set_status_colored("Cannot remove the last entry".to_string(), color);
    }
}

fn handle_editing(state: &mut AppState, key: KeyEvent) {
    let index = skill_index(state);
    let kind = state.skills_form.kind;
    match key.code {
        KeyCode::Enter | KeyCode::Esc => state.skills_form.editing = false,
        KeyCode::Backspace => {
            let mut skills = state.wizard.document().skills.clone();
            list_mut(&mut skills, kind)[index].name.pop();
            state
                .wizard
                .update_section(CVSection::Skills(skills), &mut *state.storage);
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            let mut skills = state.wizard.document().skills.clone();
            list_mut(&mut skills, kind)[index].name.push(c);
            state
                .wizard
                .update_section(CVSection::Skills(skills), &mut *state.storage);
        }
        _ => {}
    }
}

/// Render the skills step into `area`.
pub fn render(f: &mut Frame, area: Rect, state: &AppState) {
    let theme = &state.theme;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(6), Constraint::Length(1)])
        .split(area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[0]);

    render_list(
        f,
        columns[0],
        state,
        SkillKind::Professional,
        " Professional Skills ",
    );
    render_list(f, columns[1], state, SkillKind::Languages, " Languages ");

    let instructions = if state.skills_form.editing {
        "Type to rename  |  Enter/Esc: Done"
    } else {
        "Tab: Lists  |  ↑/↓: Select  |  ←/→ or 1-5: Level  |  Enter: Rename  |  a: Add  |  d: Remove"
    };
    f.render_widget(
        Paragraph::new(Span::styled(
            instructions,
            Style::default().fg(theme.text_muted),
        )),
        chunks[1],
    );
}

fn render_list(f: &mut Frame, area: Rect, state: &AppState, kind: SkillKind, title: &str) {
    let theme = &state.theme;
    let is_active_list = state.skills_form.kind == kind;
    let entries = list(&state.wizard.document().skills, kind);
    let selected = skill_index(state);

    let mut lines: Vec<Line> = Vec::new();
    for (i, entry) in entries.iter().enumerate() {
        let is_selected = is_active_list && i == selected;
        let marker = if is_selected { "> " } else { "  " };

        let name = if entry.name.is_empty() && !(is_selected && state.skills_form.editing) {
            Span::styled("(unnamed)", Style::default().fg(theme.text_muted))
        } else if is_selected && state.skills_form.editing {
            Span::styled(
                format!("{}_", entry.name),
                Style::default()
                    .fg(theme.active)
                    .add_modifier(Modifier::BOLD),
            )
        } else if is_selected {
            Span::styled(
                entry.name.clone(),
                Style::default()
                    .fg(theme.active)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled(entry.name.clone(), Style::default().fg(theme.text))
        };

        let filled = usize::from(entry.level);
        let bar = format!(" {}{}", "●".repeat(filled), "○".repeat(5 - filled));
        lines.push(Line::from(vec![
            Span::styled(marker.to_string(), Style::default().fg(theme.active)),
            name,
            Span::styled(bar, Style::default().fg(theme.primary)),
        ]));
    }

    let border_style = if is_active_list {
        Style::default().fg(theme.active)
    } else {
        Style::default().fg(theme.inactive)
    };
    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title.to_string())
            .border_style(border_style)
            .style(Style::default().bg(theme.background)),
    );
    f.render_widget(widget, area);
}
