//! Terminal user interface components and state management.
//!
//! This module contains the main TUI loop, `AppState`, event handling,
//! and all UI widgets using Ratatui.

// Allow clone assignment patterns - common in UI state management
#![allow(clippy::assigning_clones)]
// Allow intentional type casts for terminal coordinates
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]

pub mod auth_form;
pub mod chat_panel;
pub mod component;
pub mod dashboard;
pub mod education_form;
pub mod experience_form;
pub mod help_overlay;
pub mod help_registry;
pub mod job_browser;
pub mod personal_form;
pub mod plans_screen;
pub mod preview_pane;
pub mod skills_form;
pub mod status_bar;
pub mod template_picker;
pub mod theme;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout as RatatuiLayout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame, Terminal,
};
use std::io;
use std::time::Duration;

use crate::builder::{CVWizard, WizardStep};
use crate::config::Config;
use crate::constants::APP_NAME;
use crate::inference::InferenceClient;
use crate::jobs::JobBoard;
use crate::session::{AuthEvent, Session};
use crate::storage::Storage;
use crate::templates::TemplateCatalog;

// Re-export TUI components
pub use auth_form::{AuthForm, AuthFormEvent, AuthMode};
pub use chat_panel::{ChatPanel, ChatPanelEvent};
pub use component::Component;
pub use help_overlay::{HelpOverlay, HelpOverlayEvent};
pub use status_bar::StatusBar;
pub use theme::Theme;

/// Top-level screens, mirroring the pages of the original product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Landing view: CV progress and quick actions (hero pitch signed out)
    Dashboard,
    /// Sign in / register form
    Auth,
    /// The CV builder wizard
    Builder,
    /// Job listings browser
    Jobs,
    /// Premium plan comparison and upgrade
    Plans,
}

impl Screen {
    /// Title shown in the title bar.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Auth => "Account",
            Self::Builder => "CV Builder",
            Self::Jobs => "Job Search",
            Self::Plans => "Premium Plans",
        }
    }
}

/// Popups displayed over the current screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupType {
    /// Assistant chat panel
    Chat,
    /// Help overlay listing every keybinding
    Help,
}

/// Application state - single source of truth
///
/// All UI components read from this state immutably.
/// Only event handlers modify state explicitly.
pub struct AppState {
    // Core data
    /// Wizard controller: document, step, template choice
    pub wizard: CVWizard,
    /// Sign-in state plus any in-flight mock auth call
    pub session: Session,
    /// Job listings and session-local application marks
    pub board: JobBoard,
    /// Durable key-value store behind the persistence port
    pub storage: Box<dyn Storage>,
    /// Application configuration
    pub config: Config,

    // UI state
    /// Current UI theme
    pub theme: Theme,
    /// Currently displayed screen
    pub screen: Screen,
    /// Currently active popup (if any)
    pub active_popup: Option<PopupType>,
    /// Status bar message
    pub status_message: String,
    /// Optional color override for status message (warnings rendered via status)
    pub status_color_override: Option<Color>,
    /// Current error message (if any)
    pub error_message: Option<String>,

    // Per-screen component state
    /// Sign in / register form
    pub auth_form: AuthForm,
    /// Assistant chat panel (conversation survives close/reopen)
    pub chat_panel: ChatPanel,
    /// Help overlay scroll state
    pub help_overlay: HelpOverlay,
    /// Job browser cursor, search box and filters
    pub browser: job_browser::JobBrowserState,
    /// Plans screen billing toggle and upgrade phase
    pub plans: plans_screen::PlansScreenState,
    /// Template gallery cursor
    pub template_cursor: usize,
    /// Personal info step state
    pub personal_form: personal_form::PersonalFormState,
    /// Experience step state
    pub experience_form: experience_form::ExperienceFormState,
    /// Education step state
    pub education_form: education_form::EducationFormState,
    /// Skills step state
    pub skills_form: skills_form::SkillsFormState,
    /// Preview canvas scroll offset in rows
    pub preview_scroll: u16,

    // Control flags
    /// Whether application should exit
    pub should_quit: bool,
}

impl AppState {
    /// Creates the application state, restoring the persisted document,
    /// template choice and session from `storage`.
    pub fn new(config: Config, storage: Box<dyn Storage>) -> Result<Self> {
        let catalog = TemplateCatalog::load().context("Failed to load template catalog")?;
        let wizard = CVWizard::restore(catalog, storage.as_ref());
        let session = Session::restore(storage.as_ref());
        let board = JobBoard::load().context("Failed to load job listings")?;

        // No API key means the assistant answers from its built-in rules
        let client = InferenceClient::from_config(&config.inference).ok();

        let theme = Theme::from_mode(config.ui.theme_mode);

        Ok(Self {
            wizard,
            session,
            board,
            storage,
            config,
            theme,
            screen: Screen::Dashboard,
            active_popup: None,
            status_message: "Press ? for help".to_string(),
            status_color_override: None,
            error_message: None,
            auth_form: AuthForm::new(),
            chat_panel: ChatPanel::new(client),
            help_overlay: HelpOverlay::new(),
            browser: job_browser::JobBrowserState::new(),
            plans: plans_screen::PlansScreenState::new(),
            template_cursor: 0,
            personal_form: personal_form::PersonalFormState::new(),
            experience_form: experience_form::ExperienceFormState::new(),
            education_form: education_form::EducationFormState::new(),
            skills_form: skills_form::SkillsFormState::new(),
            preview_scroll: 0,
            should_quit: false,
        })
    }

    /// Set status message
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = message.into();
        self.error_message = None;
        self.status_color_override = None;
    }

    /// Set status message with custom foreground color (used for warnings)
    pub fn set_status_colored(&mut self, message: impl Into<String>, color: Color) {
        self.status_message = message.into();
        self.error_message = None;
        self.status_color_override = Some(color);
    }

    /// Set error message
    pub fn set_error(&mut self, error: impl Into<String>) {
        self.error_message = Some(error.into());
    }

    /// Clear error message
    pub fn clear_error(&mut self) {
        self.error_message = None;
    }
}

/// Fresh state over in-memory storage for component tests.
#[cfg(test)]
pub(crate) fn test_state() -> AppState {
    use crate::storage::MemoryStorage;
    AppState::new(Config::default(), Box::new(MemoryStorage::new()))
        .expect("test state construction")
}

/// Initialize terminal for TUI
pub fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;
    Ok(terminal)
}

/// Restore terminal to normal state
pub fn restore_terminal(mut terminal: Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;
    Ok(())
}

/// Main event loop
pub fn run_tui(
    state: &mut AppState,
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
) -> Result<()> {
    loop {
        // Apply theme based on user preference (Auto detects OS, Dark/Light are explicit)
        state.theme = Theme::from_mode(state.config.ui.theme_mode);

        // Render current state
        terminal.draw(|f| render(f, state))?;

        // Poll for events with 100ms timeout
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                handle_key_event(state, key);
            }
        }

        poll_timers(state);

        if state.should_quit {
            break;
        }
    }

    Ok(())
}

/// Advance everything driven by deadlines: the mock auth latency, the
/// assistant's typing delay and the job-apply flash.
fn poll_timers(state: &mut AppState) {
    if let Some(auth_event) = state.session.poll(&mut *state.storage) {
        let success = state.theme.success;
        match auth_event {
            AuthEvent::LoggedIn(user) | AuthEvent::Registered(user) => {
                state.auth_form.reset();
                state.screen = Screen::Dashboard;
                state.set_status_colored(format!("Signed in as {}", user.name), success);
            }
            AuthEvent::Upgraded(_) => {
                state.plans.complete_upgrade();
                state.set_status_colored("Welcome to Premium!", success);
            }
        }
    }

    state.chat_panel.poll();
    state.browser.poll();
}

/// Render the UI from current state
fn render(f: &mut Frame, state: &AppState) {
    // Fill entire screen with theme background color first
    let full_bg = Block::default().style(Style::default().bg(state.theme.background));
    f.render_widget(full_bg, f.area());

    let chunks = RatatuiLayout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Min(10),   // Main content
            Constraint::Length(6), // Status bar
        ])
        .split(f.area());

    render_title_bar(f, chunks[0], state);
    render_main_content(f, chunks[1], state);
    StatusBar::render(f, chunks[2], state, &state.theme);

    match state.active_popup {
        Some(PopupType::Chat) => state.chat_panel.render(f, f.area(), &state.theme),
        Some(PopupType::Help) => state.help_overlay.render(f, f.area(), &state.theme),
        None => {}
    }

    // Render error overlay on top of everything if error is present
    if let Some(ref error) = state.error_message {
        render_error_overlay(f, error, &state.theme);
    }
}

/// Render title bar with screen name and account status
fn render_title_bar(f: &mut Frame, area: Rect, state: &AppState) {
    let account = match state.session.user() {
        Some(user) if user.is_premium => format!("{} (Premium)", user.email),
        Some(user) => user.email.clone(),
        None => "Not signed in".to_string(),
    };

    let title = Line::from(vec![
        Span::styled(
            format!(" {APP_NAME} "),
            Style::default()
                .fg(state.theme.primary)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("- {} ", state.screen.title()),
            Style::default().fg(state.theme.text),
        ),
        Span::styled(
            format!("| {account}"),
            Style::default().fg(state.theme.text_muted),
        ),
    ]);

    let title_widget = Paragraph::new(title)
        .style(Style::default().bg(state.theme.background))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .style(Style::default().bg(state.theme.background)),
        );

    f.render_widget(title_widget, area);
}

/// Render the active screen
fn render_main_content(f: &mut Frame, area: Rect, state: &AppState) {
    match state.screen {
        Screen::Dashboard => dashboard::render(f, area, state),
        Screen::Auth => state.auth_form.render(f, area, &state.theme),
        Screen::Builder => render_builder(f, area, state),
        Screen::Jobs => job_browser::render(f, area, state),
        Screen::Plans => plans_screen::render(f, area, state),
    }
}

/// Render the wizard: progress indicator over the current step's content.
fn render_builder(f: &mut Frame, area: Rect, state: &AppState) {
    let chunks = RatatuiLayout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Progress indicator
            Constraint::Min(8),    // Step content
        ])
        .split(area);

    render_progress(f, chunks[0], state);

    match state.wizard.step() {
        WizardStep::Template => template_picker::render(f, chunks[1], state),
        WizardStep::Personal => personal_form::render(f, chunks[1], state),
        WizardStep::Experience => experience_form::render(f, chunks[1], state),
        WizardStep::Education => education_form::render(f, chunks[1], state),
        WizardStep::Skills => skills_form::render(f, chunks[1], state),
        WizardStep::Preview => preview_pane::render(f, chunks[1], state),
    }
}

/// Render the clickable-progress equivalent: numbered step titles, the
/// current one highlighted. Number keys jump to the matching step.
fn render_progress(f: &mut Frame, area: Rect, state: &AppState) {
    let theme = &state.theme;
    let current = state.wizard.step();

    let mut spans: Vec<Span> = Vec::new();
    for (i, step) in WizardStep::ALL.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" > ", Style::default().fg(theme.inactive)));
        }
        let style = if *step == current {
            Style::default()
                .fg(theme.active)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.text_muted)
        };
        spans.push(Span::styled(format!("{} {}", i + 1, step.title()), style));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Render error overlay on top of all other UI elements
fn render_error_overlay(f: &mut Frame, error: &str, theme: &Theme) {
    let area = centered_rect(70, 40, f.area());

    f.render_widget(Clear, area);
    let background = Block::default().style(Style::default().bg(theme.background));
    f.render_widget(background, area);

    let chunks = RatatuiLayout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(3),    // Error message
            Constraint::Length(2), // Help text
        ])
        .split(area);

    let title = Paragraph::new("ERROR")
        .style(
            Style::default()
                .fg(theme.error)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .style(Style::default().fg(theme.error).bg(theme.background)),
        );
    f.render_widget(title, chunks[0]);

    let error_text = Paragraph::new(error)
        .style(Style::default().fg(theme.text))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Details ")
                .style(Style::default().bg(theme.background)),
        )
        .wrap(Wrap { trim: true });
    f.render_widget(error_text, chunks[1]);

    let help = Paragraph::new(Line::from(vec![
        Span::styled(
            "Enter/Esc",
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" Dismiss"),
    ]))
    .style(Style::default().fg(theme.text).bg(theme.background));
    f.render_widget(help, chunks[2]);
}

/// Helper to create a centered rectangle
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = RatatuiLayout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    RatatuiLayout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Handle keyboard input events
fn handle_key_event(state: &mut AppState, key: KeyEvent) {
    // If error overlay is shown, allow dismissing with Enter or Esc
    if state.error_message.is_some() {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
            state.clear_error();
        }
        // Block all other input while error is shown
        return;
    }

    // Route to the popup first
    match state.active_popup {
        Some(PopupType::Chat) => {
            if let Some(ChatPanelEvent::Closed) = state.chat_panel.handle_input(key) {
                state.active_popup = None;
            }
            return;
        }
        Some(PopupType::Help) => {
            if let Some(HelpOverlayEvent::Closed) = state.help_overlay.handle_input(key) {
                state.active_popup = None;
            }
            return;
        }
        None => {}
    }

    // Screen-specific handling; the auth form consumes everything so
    // typed credentials never trigger global shortcuts
    let consumed = match state.screen {
        Screen::Auth => {
            handle_auth_input(state, key);
            true
        }
        Screen::Dashboard => dashboard::handle_input(state, key),
        Screen::Jobs => job_browser::handle_input(state, key),
        Screen::Plans => plans_screen::handle_input(state, key),
        Screen::Builder => match state.wizard.step() {
            WizardStep::Template => template_picker::handle_input(state, key),
            WizardStep::Personal => personal_form::handle_input(state, key),
            WizardStep::Experience => experience_form::handle_input(state, key),
            WizardStep::Education => education_form::handle_input(state, key),
            WizardStep::Skills => skills_form::handle_input(state, key),
            WizardStep::Preview => preview_pane::handle_input(state, key),
        },
    };

    if !consumed {
        handle_global_input(state, key);
    }
}

fn handle_auth_input(state: &mut AppState, key: KeyEvent) {
    match state.auth_form.handle_input(key) {
        Some(AuthFormEvent::Submitted {
            mode, name, email, password,
        }) => {
            match mode {
                AuthMode::Login => state.session.begin_login(email, &password),
                AuthMode::Register => state.session.begin_register(name, email, &password),
            }
            state.auth_form.set_pending(true);
        }
        Some(AuthFormEvent::Cancelled) => {
            state.auth_form.reset();
            state.screen = Screen::Dashboard;
        }
        None => {}
    }
}

/// Shortcuts available from any screen that did not consume the key.
fn handle_global_input(state: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => state.should_quit = true,
        KeyCode::Char('?') => {
            state.help_overlay = HelpOverlay::new();
            state.active_popup = Some(PopupType::Help);
        }
        KeyCode::Char('c') => state.active_popup = Some(PopupType::Chat),
        KeyCode::Char('l') => {
            if state.session.user().is_some() {
                state.session.logout(&mut *state.storage);
                state.set_status("Signed out");
            } else {
                state.auth_form.reset();
                state.screen = Screen::Auth;
            }
        }
        KeyCode::Char('b' | '2') => state.screen = Screen::Builder,
        KeyCode::Char('j' | '3') => state.screen = Screen::Jobs,
        KeyCode::Char('p' | '4') => state.screen = Screen::Plans,
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::STORAGE_KEY_USER;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_initial_state() {
        let state = test_state();
        assert_eq!(state.screen, Screen::Dashboard);
        assert!(state.active_popup.is_none());
        assert!(state.session.user().is_none());
        assert_eq!(state.wizard.step(), WizardStep::Template);
        assert!(!state.should_quit);
    }

    #[test]
    fn test_global_navigation_keys() {
        let mut state = test_state();

        handle_key_event(&mut state, key(KeyCode::Char('b')));
        assert_eq!(state.screen, Screen::Builder);

        handle_key_event(&mut state, key(KeyCode::Char('j')));
        assert_eq!(state.screen, Screen::Jobs);

        handle_key_event(&mut state, key(KeyCode::Char('p')));
        assert_eq!(state.screen, Screen::Plans);
    }

    #[test]
    fn test_quit_key() {
        let mut state = test_state();
        handle_key_event(&mut state, key(KeyCode::Char('q')));
        assert!(state.should_quit);
    }

    #[test]
    fn test_help_and_chat_popups_open_and_close() {
        let mut state = test_state();

        handle_key_event(&mut state, key(KeyCode::Char('?')));
        assert_eq!(state.active_popup, Some(PopupType::Help));
        handle_key_event(&mut state, key(KeyCode::Esc));
        assert!(state.active_popup.is_none());

        handle_key_event(&mut state, key(KeyCode::Char('c')));
        assert_eq!(state.active_popup, Some(PopupType::Chat));
        handle_key_event(&mut state, key(KeyCode::Esc));
        assert!(state.active_popup.is_none());
    }

    #[test]
    fn test_chat_popup_consumes_global_keys() {
        let mut state = test_state();
        handle_key_event(&mut state, key(KeyCode::Char('c')));

        // 'q' is typed into the chat, not treated as quit
        handle_key_event(&mut state, key(KeyCode::Char('q')));
        assert!(!state.should_quit);
        assert_eq!(state.chat_panel.chat().input(), "q");
    }

    #[test]
    fn test_login_flow_through_auth_screen() {
        let mut state = test_state();

        handle_key_event(&mut state, key(KeyCode::Char('l')));
        assert_eq!(state.screen, Screen::Auth);

        for c in "ada@example.com".chars() {
            handle_key_event(&mut state, key(KeyCode::Char(c)));
        }
        handle_key_event(&mut state, key(KeyCode::Tab));
        for c in "pw".chars() {
            handle_key_event(&mut state, key(KeyCode::Char(c)));
        }
        handle_key_event(&mut state, key(KeyCode::Enter));
        assert!(state.session.is_pending());
        assert!(state.auth_form.is_pending());

        state.session.force_pending_due();
        poll_timers(&mut state);
        assert_eq!(state.screen, Screen::Dashboard);
        assert_eq!(state.session.user().unwrap().name, "ada");
        assert!(state.storage.get(STORAGE_KEY_USER).is_some());
    }

    #[test]
    fn test_logout_from_dashboard() {
        let mut state = test_state();
        state.session.begin_login("ada@example.com", "pw");
        state.session.force_pending_due();
        poll_timers(&mut state);
        assert!(state.session.user().is_some());

        handle_key_event(&mut state, key(KeyCode::Char('l')));
        assert!(state.session.user().is_none());
        assert_eq!(state.screen, Screen::Dashboard);
    }

    #[test]
    fn test_error_overlay_blocks_input() {
        let mut state = test_state();
        state.set_error("boom");

        handle_key_event(&mut state, key(KeyCode::Char('q')));
        assert!(!state.should_quit);
        assert!(state.error_message.is_some());

        handle_key_event(&mut state, key(KeyCode::Enter));
        assert!(state.error_message.is_none());
    }

    #[test]
    fn test_typing_in_auth_never_triggers_shortcuts() {
        let mut state = test_state();
        state.screen = Screen::Auth;

        // 'q' and 'j' are form input, not quit/navigate
        handle_key_event(&mut state, key(KeyCode::Char('q')));
        handle_key_event(&mut state, key(KeyCode::Char('j')));
        assert!(!state.should_quit);
        assert_eq!(state.screen, Screen::Auth);
    }
}
