//! Bottom status panel: messages, progress counters, and key hints.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::builder::WizardStep;

use super::help_registry::{self, HelpRegistry};
use super::{AppState, PopupType, Screen, Theme};

/// Lines available above the pinned help line (6 rows minus borders minus help).
const MAX_CONTENT_LINES: usize = 3;

pub struct StatusBar;

impl StatusBar {
    /// Renders the status panel. Layout, top to bottom: message or hints,
    /// optional progress counters, then the key-hint line pinned to the
    /// bottom edge.
    pub fn render(f: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
        let mut lines: Vec<Line> = Vec::new();

        if let Some(error) = &state.error_message {
            lines.push(Line::from(vec![
                Span::styled("ERROR: ", Style::default().fg(theme.error)),
                Span::raw(error),
            ]));
        } else if !state.status_message.is_empty() {
            lines.push(match state.status_color_override {
                Some(color) => Line::from(Span::styled(
                    state.status_message.as_str(),
                    Style::default().fg(color),
                )),
                None => Line::from(state.status_message.as_str()),
            });
        } else if state.active_popup.is_none() {
            lines.push(Self::hints_line(state, theme));
        }

        if let Some(line) = Self::progress_line(state, theme) {
            lines.push(line);
        }

        lines.truncate(MAX_CONTENT_LINES);
        while lines.len() < MAX_CONTENT_LINES {
            lines.push(Line::from(""));
        }
        lines.push(Self::help_line(state, theme));

        let panel = Paragraph::new(lines)
            .style(Style::default().bg(theme.background))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Status ")
                    .style(Style::default().bg(theme.background)),
            );
        f.render_widget(panel, area);
    }

    /// Screen-specific counter: CV completion in the builder, submitted
    /// application count in the job browser.
    fn progress_line(state: &AppState, theme: &Theme) -> Option<Line<'static>> {
        if state.active_popup.is_some() {
            return None;
        }
        match state.screen {
            Screen::Builder => {
                let percent = state.wizard.document().completeness_percent();
                let color = if percent == 100 {
                    theme.success
                } else {
                    theme.warning
                };
                Some(Line::from(vec![
                    Span::styled("CV Completion: ", Style::default().fg(theme.primary)),
                    Span::styled(format!("{percent}%"), Style::default().fg(color)),
                ]))
            }
            Screen::Jobs => {
                let applied = state.board.applied_count();
                (applied > 0).then(|| {
                    Line::from(vec![
                        Span::styled("Applications: ", Style::default().fg(theme.primary)),
                        Span::styled(applied.to_string(), Style::default().fg(theme.success)),
                    ])
                })
            }
            _ => None,
        }
    }

    /// Top hints line, shown when no message is pending.
    fn hints_line(state: &AppState, theme: &Theme) -> Line<'static> {
        let registry = HelpRegistry::default();
        let pairs = registry.hint_pairs(Self::active_context(state), 5);

        let mut spans: Vec<Span<'static>> = Vec::new();
        for (key, hint) in pairs {
            if !spans.is_empty() {
                spans.push(Span::raw("  "));
            }
            spans.push(Span::styled(
                key,
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::raw(" "));
            spans.push(Span::styled(hint, Style::default().fg(theme.text_muted)));
        }
        Line::from(spans)
    }

    /// Maps the current UI state to a help-registry context key.
    fn active_context(state: &AppState) -> &'static str {
        use help_registry::contexts;

        match &state.active_popup {
            Some(PopupType::Chat) => return contexts::CHAT,
            Some(PopupType::Help) => return contexts::HELP,
            None => {}
        }
        match state.screen {
            Screen::Dashboard => contexts::DASHBOARD,
            Screen::Auth => contexts::AUTH,
            Screen::Plans => contexts::PLANS,
            Screen::Jobs => {
                if state.browser.search_editing {
                    contexts::JOBS_SEARCH
                } else {
                    contexts::JOBS
                }
            }
            Screen::Builder => {
                let editing = match state.wizard.step() {
                    WizardStep::Personal => state.personal_form.editing,
                    WizardStep::Experience => state.experience_form.editing,
                    WizardStep::Education => state.education_form.editing,
                    WizardStep::Skills => state.skills_form.editing,
                    WizardStep::Template | WizardStep::Preview => false,
                };
                if editing {
                    return contexts::BUILDER_EDITING;
                }
                match state.wizard.step() {
                    WizardStep::Template => contexts::BUILDER_TEMPLATE,
                    WizardStep::Skills => contexts::BUILDER_SKILLS,
                    WizardStep::Preview => contexts::BUILDER_PREVIEW,
                    _ => contexts::BUILDER_FORM,
                }
            }
        }
    }

    /// Bottom help line, always visible. The dashboard reserves the last
    /// slot for the `?` binding so help stays discoverable.
    fn help_line(state: &AppState, theme: &Theme) -> Line<'static> {
        let context = Self::active_context(state);
        let registry = HelpRegistry::default();
        let on_dashboard = context == help_registry::contexts::DASHBOARD;
        let max = if on_dashboard { 4 } else { 5 };

        let mut spans: Vec<Span<'static>> =
            vec![Span::styled("Help: ", Style::default().fg(theme.primary))];

        let hints = registry.status_hints(context);
        if hints.is_empty() {
            spans.push(Span::raw("Press ? for help"));
            return Line::from(spans);
        }

        for (i, binding) in hints.iter().take(max).enumerate() {
            if i > 0 {
                spans.push(Span::raw(" | "));
            }
            let keys = if binding.alt_keys.is_empty() {
                binding.keys.join(",")
            } else {
                format!("{}/{}", binding.keys.join(","), binding.alt_keys.join(","))
            };
            let label = binding.hint.as_ref().unwrap_or(&binding.action);
            spans.push(Span::styled(keys, Style::default().fg(theme.accent)));
            spans.push(Span::raw(": "));
            spans.push(Span::raw(label.clone()));
        }

        if on_dashboard {
            spans.push(Span::raw(" | "));
            spans.push(Span::styled("?", Style::default().fg(theme.accent)));
            spans.push(Span::raw(": Help"));
        }

        Line::from(spans)
    }
}
