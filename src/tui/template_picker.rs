//! Template gallery, the first builder step.
//!
//! Shows the catalog as a row of cards. Premium templates carry a badge and
//! are refused for free accounts with the upgrade pitch in the status bar.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::builder::{TemplateSelection, WizardStep};

use super::{AppState, Screen};

/// Shown when a free account picks a premium template.
const PREMIUM_UPSELL: &str =
    "Upgrade to Premium to access all CV templates and get more job opportunities.";

/// Handle template gallery keys. Returns true when the key was consumed.
pub fn handle_input(state: &mut AppState, key: KeyEvent) -> bool {
    let count = state.wizard.catalog().all().len();
    match key.code {
        KeyCode::Left => {
            state.template_cursor = state.template_cursor.saturating_sub(1);
            true
        }
        KeyCode::Right => {
            if state.template_cursor + 1 < count {
                state.template_cursor += 1;
            }
            true
        }
        KeyCode::Enter => {
            apply_selection(state);
            true
        }
        KeyCode::Char('n') | KeyCode::PageDown => {
            state.wizard.go_next();
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

fn apply_selection(state: &mut AppState) {
    let Some(template) = state
        .wizard
        .catalog()
        .all()
        .get(state.template_cursor)
        .cloned()
    else {
        return;
    };

    let is_premium = state.session.is_premium();
    match state
        .wizard
        .select_template(&template.id, is_premium, &mut *state.storage)
    {
        TemplateSelection::Applied => {
            let color = state.theme.success;
            state.set_status_colored(format!("Template '{}' selected", template.name), color);
        }
        TemplateSelection::DeniedPremium => {
            let color = state.theme.warning;
            state.set_status_colored(PREMIUM_UPSELL.to_string(), color);
        }
        TemplateSelection::UnknownTemplate => {}
    }
}

/// Render the gallery into `area`.
pub fn render(f: &mut Frame, area: Rect, state: &AppState) {
    let theme = &state.theme;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Heading
            Constraint::Min(7),    // Cards
            Constraint::Length(1), // Selected template
        ])
        .split(area);

    f.render_widget(
        Paragraph::new(Span::styled(
            "Choose a Template",
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        )),
        chunks[0],
    );

    let templates = state.wizard.catalog().all();
    if templates.is_empty() {
        return;
    }

    let card_constraints: Vec<Constraint> = templates
        .iter()
        .map(|_| Constraint::Ratio(1, templates.len() as u32))
        .collect();
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(card_constraints)
        .split(chunks[1]);

    for (i, template) in templates.iter().enumerate() {
        let is_cursor = i == state.template_cursor;
        let is_selected = template.id == state.wizard.selected_template_id();

        let border_style = if is_cursor {
            Style::default()
                .fg(theme.active)
                .add_modifier(Modifier::BOLD)
        } else if is_selected {
            Style::default().fg(theme.primary)
        } else {
            Style::default().fg(theme.inactive)
        };

        let mut lines = vec![
            Line::from(Span::styled(
                format!("{:?} layout", template.layout_kind()),
                Style::default().fg(theme.text_secondary),
            )),
            Line::from(""),
        ];
        if template.is_premium {
            lines.push(Line::from(Span::styled(
                "Premium",
                Style::default()
                    .fg(theme.warning)
                    .add_modifier(Modifier::BOLD),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                "Free",
                Style::default().fg(theme.success),
            )));
        }
        if is_selected {
            lines.push(Line::from(Span::styled(
                "Selected ✓",
                Style::default().fg(theme.success),
            )));
        }

        let card = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", template.name))
                .border_style(border_style)
                .style(Style::default().bg(theme.background)),
        );
        f.render_widget(card, cards[i]);
    }

    let selected = state.wizard.selected_template();
    f.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("Current template: ", Style::default().fg(theme.text_muted)),
            Span::styled(selected.name.clone(), Style::default().fg(theme.text)),
        ])),
        chunks[2],
    );
}
