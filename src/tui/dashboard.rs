//! Dashboard screen.
//!
//! Signed in, it mirrors the job-seeker landing view: a welcome banner, the
//! CV completion gauge, a profile summary and quick actions. Signed out it
//! shows the hero pitch with a sign-in prompt.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::models::User;

use super::{AppState, Screen};

/// Handle dashboard keys. Returns true when the key was consumed.
pub fn handle_input(state: &mut AppState, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('u') => {
            state.screen = Screen::Builder;
            true
        }
        KeyCode::Char('s') => {
            state.screen = Screen::Jobs;
            true
        }
        KeyCode::Char('g') => {
            state.screen = Screen::Plans;
            true
        }
        _ => false,
    }
}

/// Render the dashboard into `area`.
pub fn render(f: &mut Frame, area: Rect, state: &AppState) {
    match state.session.user() {
        Some(user) => render_signed_in(f, area, state, user),
        None => render_signed_out(f, area, state),
    }
}

fn render_signed_in(f: &mut Frame, area: Rect, state: &AppState, user: &User) {
    let theme = &state.theme;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Welcome banner
            Constraint::Length(4), // CV completion
            Constraint::Min(7),    // Profile completeness
            Constraint::Length(5), // Quick actions
        ])
        .split(area);

    let document = state.wizard.document();

    // The CV first name wins over the account name, like the web dashboard
    let first_name = document.personal.first_name.trim();
    let display_name = if first_name.is_empty() {
        user.name.as_str()
    } else {
        first_name
    };

    let welcome = vec![
        Line::from(Span::styled(
            format!("Welcome, {display_name}"),
            Style::default()
                .fg(theme.primary)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Let's find your dream job today!",
            Style::default().fg(theme.text_secondary),
        )),
    ];
    f.render_widget(Paragraph::new(welcome), chunks[0]);

    // CV completion gauge
    let percent = document.completeness_percent();
    let gauge_color = if percent == 100 {
        theme.success
    } else {
        theme.accent
    };
    let bar_width = chunks[1].width.saturating_sub(8) as usize;
    let filled = bar_width * usize::from(percent) / 100;
    let bar = format!(
        "{}{} {percent}%",
        "█".repeat(filled),
        "░".repeat(bar_width.saturating_sub(filled))
    );
    let gauge = Paragraph::new(Line::from(Span::styled(
        bar,
        Style::default().fg(gauge_color),
    )))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(" CV Completion ")
            .style(Style::default().bg(theme.background)),
    );
    f.render_widget(gauge, chunks[1]);

    // Profile completeness summary
    let position = document.personal.title.trim();
    let position = if position.is_empty() {
        "Not specified"
    } else {
        position
    };
    let summary = vec![
        Line::from(vec![
            Span::styled("Current Position: ", Style::default().fg(theme.text_secondary)),
            Span::styled(position.to_string(), Style::default().fg(theme.text)),
        ]),
        Line::from(vec![
            Span::styled("Experience: ", Style::default().fg(theme.text_secondary)),
            Span::styled(
                format!("{} positions listed", document.experience.len()),
                Style::default().fg(theme.text),
            ),
        ]),
        Line::from(vec![
            Span::styled("Education: ", Style::default().fg(theme.text_secondary)),
            Span::styled(
                format!("{} qualifications listed", document.education.len()),
                Style::default().fg(theme.text),
            ),
        ]),
        Line::from(vec![
            Span::styled("Skills: ", Style::default().fg(theme.text_secondary)),
            Span::styled(
                format!(
                    "{} professional skills listed",
                    document.skills.professional.len()
                ),
                Style::default().fg(theme.text),
            ),
        ]),
        Line::from(vec![
            Span::styled("Template: ", Style::default().fg(theme.text_secondary)),
            Span::styled(
                state.wizard.selected_template().name.clone(),
                Style::default().fg(theme.text),
            ),
        ]),
        Line::from(vec![
            Span::styled("Applications: ", Style::default().fg(theme.text_secondary)),
            Span::styled(
                format!("{} jobs applied to", state.board.applied_count()),
                Style::default().fg(theme.text),
            ),
        ]),
    ];
    let summary_widget = Paragraph::new(summary).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Profile Completeness ")
            .style(Style::default().bg(theme.background)),
    );
    f.render_widget(summary_widget, chunks[2]);

    // Quick actions
    let mut actions = vec![
        Line::from(vec![
            Span::styled("u", Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)),
            Span::styled("  Update CV", Style::default().fg(theme.text)),
        ]),
        Line::from(vec![
            Span::styled("s", Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)),
            Span::styled("  Search Jobs", Style::default().fg(theme.text)),
        ]),
    ];
    if user.is_premium {
        actions.push(Line::from(Span::styled(
            "Premium active",
            Style::default().fg(theme.success),
        )));
    } else {
        actions.push(Line::from(vec![
            Span::styled("g", Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)),
            Span::styled("  Upgrade to Premium", Style::default().fg(theme.text)),
        ]));
    }
    let actions_widget = Paragraph::new(actions).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Quick Actions ")
            .style(Style::default().bg(theme.background)),
    );
    f.render_widget(actions_widget, chunks[3]);
}

fn render_signed_out(f: &mut Frame, area: Rect, state: &AppState) {
    let theme = &state.theme;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(2),
            Constraint::Length(2),
            Constraint::Length(3),
            Constraint::Length(2),
            Constraint::Length(3),
            Constraint::Min(2),
        ])
        .split(area);

    let title = Paragraph::new(Line::from(Span::styled(
        "Find Your Dream Job",
        Style::default()
            .fg(theme.primary)
            .add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center);
    f.render_widget(title, chunks[1]);

    let pitch = Paragraph::new(
        "Connect job seekers with employers through our advanced platform \
         with premium features and beautiful CV templates.",
    )
    .style(Style::default().fg(theme.text_secondary))
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true });
    f.render_widget(pitch, chunks[2]);

    let prompt = Paragraph::new(Line::from(vec![
        Span::styled("Press ", Style::default().fg(theme.text)),
        Span::styled(
            "l",
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" to sign in or register", Style::default().fg(theme.text)),
    ]))
    .alignment(Alignment::Center);
    f.render_widget(prompt, chunks[3]);

    let actions = Paragraph::new(Line::from(vec![
        Span::styled(
            "b",
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" Create Your CV    ", Style::default().fg(theme.text)),
        Span::styled(
            "j",
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" Find Jobs", Style::default().fg(theme.text)),
    ]))
    .alignment(Alignment::Center);
    f.render_widget(actions, chunks[4]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    fn signed_in_state() -> AppState {
        let mut state = crate::tui::test_state();
        state.session.begin_login("ada@example.com", "pw");
        state.session.force_pending_due();
        let _ = state.session.poll(&mut *state.storage);
        state
    }

    fn rendered_text(state: &AppState) -> String {
        let backend = TestBackend::new(80, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| render(f, f.area(), state))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect()
    }

    #[test]
    fn test_signed_in_view_shows_selected_template() {
        let state = signed_in_state();
        let template_name = state.wizard.selected_template().name.clone();

        let text = rendered_text(&state);
        assert!(text.contains("Template: "));
        assert!(text.contains(&template_name));
    }

    #[test]
    fn test_signed_in_view_shows_application_count() {
        let mut state = signed_in_state();
        let first_id = state.board.listings[0].id.clone();
        assert!(state.board.apply(&first_id));

        let text = rendered_text(&state);
        assert!(text.contains("Applications: 1 jobs applied to"));
    }

    #[test]
    fn test_signed_out_view_prompts_for_sign_in() {
        let state = crate::tui::test_state();
        let text = rendered_text(&state);
        assert!(text.contains("Find Your Dream Job"));
        assert!(text.contains("to sign in or register"));
    }
}
