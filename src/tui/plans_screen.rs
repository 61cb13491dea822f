//! Premium plan comparison and upgrade screen.
//!
//! Two plan cards over a billing toggle, the feature matrix for the chosen
//! audience and the FAQ. The upgrade itself is the mocked session call; this
//! screen only tracks its phase for display.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::plans::{
    features, BillingCycle, PlanAudience, ANNUAL_SAVINGS_LABEL, FAQ, FREE_PLAN_NAME,
    FREE_PLAN_TAGLINE, PREMIUM_PLAN_NAME, PREMIUM_PLAN_TAGLINE,
};

use super::{AppState, Screen};

/// Where the mocked upgrade currently stands, for display only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpgradePhase {
    /// No upgrade in flight
    Idle,
    /// Waiting on the session call
    Processing,
    /// Upgrade resolved this visit
    Success,
}

/// UI state of the plans screen.
#[derive(Debug, Clone)]
pub struct PlansScreenState {
    /// Selected billing cycle
    pub billing: BillingCycle,
    /// Feature matrix being displayed
    pub audience: PlanAudience,
    /// FAQ scroll offset in rows
    pub faq_scroll: u16,
    /// Upgrade display phase
    pub phase: UpgradePhase,
}

impl PlansScreenState {
    #[must_use]
    pub fn new() -> Self {
        Self {
            billing: BillingCycle::default(),
            audience: PlanAudience::JobSeeker,
            faq_scroll: 0,
            phase: UpgradePhase::Idle,
        }
    }

    /// Marks the in-flight upgrade as resolved.
    pub fn complete_upgrade(&mut self) {
        self.phase = UpgradePhase::Success;
    }
}

impl Default for PlansScreenState {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle plans screen keys. Returns true when the key was consumed.
pub fn handle_input(state: &mut AppState, key: KeyEvent) -> bool {
    if state.plans.phase == UpgradePhase::Processing {
        // Let the mocked payment resolve before accepting more input
        if key.code == KeyCode::Esc {
            state.screen = Screen::Dashboard;
            return true;
        }
        return matches!(key.code, KeyCode::Char(_) | KeyCode::Up | KeyCode::Down);
    }

    match key.code {
        KeyCode::Char('t') | KeyCode::Left | KeyCode::Right => {
            state.plans.billing = state.plans.billing.toggled();
            true
        }
        KeyCode::Tab => {
            state.plans.audience = match state.plans.audience {
                PlanAudience::JobSeeker => PlanAudience::Employer,
                PlanAudience::Employer => PlanAudience::JobSeeker,
            };
            true
        }
        KeyCode::Char('u') => {
            begin_upgrade(state);
            true
        }
        KeyCode::Up => {
            state.plans.faq_scroll = state.plans.faq_scroll.saturating_sub(1);
            true
        }
        KeyCode::Down => {
            state.plans.faq_scroll = state.plans.faq_scroll.saturating_add(1);
            true
        }
        KeyCode::Esc => {
            state.plans.phase = UpgradePhase::Idle;
            state.screen = Screen::Dashboard;
            true
        }
        _ => false,
    }
}

fn begin_upgrade(state: &mut AppState) {
    if state.session.user().is_none() {
        state.auth_form.reset();
        state.screen = Screen::Auth;
        state.set_status("Sign in to upgrade to Premium");
        return;
    }
    if state.session.is_premium() {
        let color = state.theme.warning;
        state.set_status_colored("Premium is already your current plan".to_string(), color);
        return;
    }
    state.session.begin_upgrade();
    state.plans.phase = UpgradePhase::Processing;
}

/// Render the plans screen into `area`.
pub fn render(f: &mut Frame, area: Rect, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Billing toggle
            Constraint::Min(12),    // Plan cards
            Constraint::Length(7),  // FAQ
            Constraint::Length(1),  // Instructions
        ])
        .split(area);

    render_billing_toggle(f, chunks[0], state);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);
    render_free_card(f, columns[0], state);
    render_premium_card(f, columns[1], state);

    render_faq(f, chunks[2], state);

    let instructions =
        "t: Billing  |  Tab: Audience  |  u: Upgrade  |  ↑/↓: FAQ  |  Esc: Back";
    f.render_widget(
        Paragraph::new(Span::styled(
            instructions,
            Style::default().fg(state.theme.text_muted),
        )),
        chunks[3],
    );
}

fn render_billing_toggle(f: &mut Frame, area: Rect, state: &AppState) {
    let theme = &state.theme;
    let billing = state.plans.billing;

    let style_for = |cycle: BillingCycle| {
        if billing == cycle {
            Style::default()
                .fg(theme.active)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.inactive)
        }
    };

    let line = Line::from(vec![
        Span::styled(BillingCycle::Monthly.label(), style_for(BillingCycle::Monthly)),
        Span::styled("  |  ", Style::default().fg(theme.text_muted)),
        Span::styled(BillingCycle::Annual.label(), style_for(BillingCycle::Annual)),
        Span::styled(
            format!("  {ANNUAL_SAVINGS_LABEL}"),
            Style::default().fg(theme.success),
        ),
    ]);

    let widget = Paragraph::new(line).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Choose Your Plan ")
            .style(Style::default().bg(theme.background)),
    );
    f.render_widget(widget, area);
}

fn feature_lines(state: &AppState, premium: bool) -> Vec<Line<'static>> {
    let theme = &state.theme;
    features(state.plans.audience)
        .iter()
        .map(|feature| {
            let included = premium || feature.included_free;
            let (mark, style) = if included {
                ("✓", Style::default().fg(theme.success))
            } else {
                ("–", Style::default().fg(theme.text_muted))
            };
            let name_style = if included {
                Style::default().fg(theme.text)
            } else {
                Style::default().fg(theme.text_muted)
            };
            Line::from(vec![
                Span::styled(format!(" {mark} "), style),
                Span::styled(feature.name, name_style),
            ])
        })
        .collect()
}

fn render_free_card(f: &mut Frame, area: Rect, state: &AppState) {
    let theme = &state.theme;
    let mut lines = vec![
        Line::from(Span::styled(
            "$0 / month",
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            FREE_PLAN_TAGLINE,
            Style::default().fg(theme.text_secondary),
        )),
        Line::from(""),
    ];
    lines.extend(feature_lines(state, false));

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" {FREE_PLAN_NAME} "))
            .style(Style::default().bg(theme.background)),
    );
    f.render_widget(widget, area);
}

fn render_premium_card(f: &mut Frame, area: Rect, state: &AppState) {
    let theme = &state.theme;
    let billing = state.plans.billing;

    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                format!("${} / month", billing.premium_price()),
                Style::default()
                    .fg(theme.primary)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  billed {}", billing.label().to_lowercase()),
                Style::default().fg(theme.text_muted),
            ),
        ]),
        Line::from(Span::styled(
            PREMIUM_PLAN_TAGLINE,
            Style::default().fg(theme.text_secondary),
        )),
        Line::from(""),
    ];
    lines.extend(feature_lines(state, true));
    lines.push(Line::from(""));

    let footer = match state.plans.phase {
        UpgradePhase::Processing => Span::styled(
            "Processing your upgrade...",
            Style::default().fg(theme.warning),
        ),
        UpgradePhase::Success => Span::styled(
            "Welcome to Premium!",
            Style::default()
                .fg(theme.success)
                .add_modifier(Modifier::BOLD),
        ),
        UpgradePhase::Idle if state.session.is_premium() => {
            Span::styled("✓ Your current plan", Style::default().fg(theme.success))
        }
        UpgradePhase::Idle => Span::styled(
            "Press u to upgrade",
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
        ),
    };
    lines.push(Line::from(footer));

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" {PREMIUM_PLAN_NAME} "))
            .border_style(Style::default().fg(theme.primary))
            .style(Style::default().bg(theme.background)),
    );
    f.render_widget(widget, area);
}

fn render_faq(f: &mut Frame, area: Rect, state: &AppState) {
    let theme = &state.theme;
    let mut lines: Vec<Line> = Vec::new();
    for entry in &FAQ {
        lines.push(Line::from(Span::styled(
            entry.question,
            Style::default()
                .fg(theme.text_secondary)
                .add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(Span::styled(
            entry.answer,
            Style::default().fg(theme.text),
        )));
        lines.push(Line::from(""));
    }

    let widget = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .scroll((state.plans.faq_scroll, 0))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Frequently Asked Questions ")
                .style(Style::default().bg(theme.background)),
        );
    f.render_widget(widget, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::test_state;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn signed_in_state() -> AppState {
        let mut state = test_state();
        state.session.begin_login("ada@example.com", "pw");
        state.session.force_pending_due();
        state.session.poll(&mut *state.storage);
        state
    }

    #[test]
    fn test_billing_toggle() {
        let mut state = test_state();
        assert_eq!(state.plans.billing, BillingCycle::Monthly);
        handle_input(&mut state, key(KeyCode::Char('t')));
        assert_eq!(state.plans.billing, BillingCycle::Annual);
        handle_input(&mut state, key(KeyCode::Left));
        assert_eq!(state.plans.billing, BillingCycle::Monthly);
    }

    #[test]
    fn test_audience_toggle() {
        let mut state = test_state();
        assert_eq!(state.plans.audience, PlanAudience::JobSeeker);
        handle_input(&mut state, key(KeyCode::Tab));
        assert_eq!(state.plans.audience, PlanAudience::Employer);
        handle_input(&mut state, key(KeyCode::Tab));
        assert_eq!(state.plans.audience, PlanAudience::JobSeeker);
    }

    #[test]
    fn test_upgrade_signed_out_redirects_to_auth() {
        let mut state = test_state();
        state.screen = Screen::Plans;
        handle_input(&mut state, key(KeyCode::Char('u')));

        assert_eq!(state.screen, Screen::Auth);
        assert_eq!(state.plans.phase, UpgradePhase::Idle);
        assert_eq!(state.status_message, "Sign in to upgrade to Premium");
    }

    #[test]
    fn test_upgrade_flow_resolves_to_premium() {
        let mut state = signed_in_state();
        handle_input(&mut state, key(KeyCode::Char('u')));
        assert_eq!(state.plans.phase, UpgradePhase::Processing);
        assert!(state.session.is_pending());

        state.session.force_pending_due();
        let event = state.session.poll(&mut *state.storage);
        assert!(event.is_some());
        state.plans.complete_upgrade();

        assert!(state.session.is_premium());
        assert_eq!(state.plans.phase, UpgradePhase::Success);
    }

    #[test]
    fn test_upgrade_when_already_premium() {
        let mut state = signed_in_state();
        handle_input(&mut state, key(KeyCode::Char('u')));
        state.session.force_pending_due();
        state.session.poll(&mut *state.storage);
        state.plans.complete_upgrade();
        state.plans.phase = UpgradePhase::Idle;

        handle_input(&mut state, key(KeyCode::Char('u')));
        assert_eq!(state.plans.phase, UpgradePhase::Idle);
        assert_eq!(state.status_message, "Premium is already your current plan");
    }

    #[test]
    fn test_processing_blocks_other_keys() {
        let mut state = signed_in_state();
        handle_input(&mut state, key(KeyCode::Char('u')));
        assert_eq!(state.plans.phase, UpgradePhase::Processing);

        handle_input(&mut state, key(KeyCode::Char('t')));
        assert_eq!(state.plans.billing, BillingCycle::Monthly);
    }

    #[test]
    fn test_faq_scroll_saturates_at_zero() {
        let mut state = test_state();
        handle_input(&mut state, key(KeyCode::Up));
        assert_eq!(state.plans.faq_scroll, 0);
        handle_input(&mut state, key(KeyCode::Down));
        handle_input(&mut state, key(KeyCode::Down));
        assert_eq!(state.plans.faq_scroll, 2);
    }
}
