//! Job listings browser.
//!
//! Search box plus three cycling filters over the embedded catalog, a result
//! list and a detail pane. Applying marks the listing for this run and shows
//! a confirmation that fades after a few seconds.

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::constants::APPLY_FLASH_MS;
use crate::jobs::{JobFilters, JobListing, JOB_TYPES, LOCATIONS, SALARY_RANGES};

use super::{AppState, Screen};

/// UI state of the job browser.
#[derive(Debug, Clone)]
pub struct JobBrowserState {
    /// Cursor into the filtered result list
    pub cursor: usize,
    /// True while keystrokes edit the search text
    pub search_editing: bool,
    /// Active search and filter selections
    pub filters: JobFilters,
    /// Confirmation message with its expiry deadline
    pub flash: Option<(String, Instant)>,
}

impl JobBrowserState {
    #[must_use]
    pub fn new() -> Self {
        Self {
            cursor: 0,
            search_editing: false,
            filters: JobFilters::default(),
            flash: None,
        }
    }

    /// Drops the confirmation message once its deadline has passed.
    pub fn poll(&mut self) {
        if self
            .flash
            .as_ref()
            .is_some_and(|(_, at)| Instant::now() >= *at)
        {
            self.flash = None;
        }
    }

    fn show_flash(&mut self, message: impl Into<String>) {
        self.flash = Some((
            message.into(),
            Instant::now() + Duration::from_millis(APPLY_FLASH_MS),
        ));
    }

    /// Expires the confirmation immediately.
    #[cfg(test)]
    pub(crate) fn force_flash_due(&mut self) {
        if let Some((_, at)) = &mut self.flash {
            *at = Instant::now();
        }
    }
}

impl Default for JobBrowserState {
    fn default() -> Self {
        Self::new()
    }
}

/// Advances a filter to the next option in its list, wrapping around.
fn cycle(options: &[&str], current: &str) -> String {
    let index = options.iter().position(|o| *o == current).unwrap_or(0);
    options[(index + 1) % options.len()].to_string()
}

/// Handle job browser keys. Returns true when the key was consumed.
pub fn handle_input(state: &mut AppState, key: KeyEvent) -> bool {
    if state.browser.search_editing {
        handle_search_editing(state, key);
        return true;
    }

    let matches = state.board.matching_indices(&state.browser.filters);

    match key.code {
        KeyCode::Up => {
            state.browser.cursor = state.browser.cursor.saturating_sub(1);
            true
        }
        KeyCode::Down => {
            if state.browser.cursor + 1 < matches.len() {
                state.browser.cursor += 1;
            }
            true
        }
        KeyCode::Enter => {
            apply_selected(state, &matches);
            true
        }
        KeyCode::Char('/') => {
            state.browser.search_editing = true;
            true
        }
        KeyCode::Char('l') => {
            state.browser.filters.location = cycle(&LOCATIONS, &state.browser.filters.location);
            state.browser.cursor = 0;
            true
        }
        KeyCode::Char('t') => {
            state.browser.filters.job_type = cycle(&JOB_TYPES, &state.browser.filters.job_type);
            state.browser.cursor = 0;
            true
        }
        KeyCode::Char('s') => {
            state.browser.filters.salary = cycle(&SALARY_RANGES, &state.browser.filters.salary);
            state.browser.cursor = 0;
            true
        }
        KeyCode::Char('x') => {
            state.browser.filters.clear();
            state.browser.cursor = 0;
            true
        }
        KeyCode::Esc => {
            state.screen = Screen::Dashboard;
            true
        }
        _ => false,
    }
}

fn handle_search_editing(state: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Enter | KeyCode::Esc => state.browser.search_editing = false,
        KeyCode::Backspace => {
            state.browser.filters.search.pop();
            state.browser.cursor = 0;
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            state.browser.filters.search.push(c);
            state.browser.cursor = 0;
        }
        _ => {}
    }
}

fn apply_selected(state: &mut AppState, matches: &[usize]) {
    let Some(&index) = matches.get(state.browser.cursor) else {
        return;
    };
    let id = state.board.listings[index].id.clone();
    if state.board.apply(&id) {
        state
            .browser
            .show_flash("Application submitted successfully!");
    } else {
        let color = state.theme.warning;
        state.set_status_colored("You have already applied to this job".to_string(), color);
    }
}

/// Render the job browser into `area`.
pub fn render(f: &mut Frame, area: Rect, state: &AppState) {
    let matches = state.board.matching_indices(&state.browser.filters);
    let cursor = state.browser.cursor.min(matches.len().saturating_sub(1));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Search and filters
            Constraint::Min(8),    // List and detail
            Constraint::Length(1), // Instructions
        ])
        .split(area);

    render_filters(f, chunks[0], state, matches.len());

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(chunks[1]);

    render_list(f, columns[0], state, &matches, cursor);
    match matches.get(cursor) {
        Some(&index) => render_detail(f, columns[1], state, &state.board.listings[index]),
        None => render_no_results(f, columns[1], state),
    }

    let instructions =
        "↑/↓: Select  |  Enter: Apply  |  /: Search  |  l/t/s: Filters  |  x: Clear  |  Esc: Back";
    f.render_widget(
        Paragraph::new(Span::styled(
            instructions,
            Style::default().fg(state.theme.text_muted),
        )),
        chunks[2],
    );
}

fn render_filters(f: &mut Frame, area: Rect, state: &AppState, match_count: usize) {
    let theme = &state.theme;
    let filters = &state.browser.filters;

    let search = if state.browser.search_editing {
        Span::styled(
            format!("{}_", filters.search),
            Style::default()
                .fg(theme.active)
                .add_modifier(Modifier::BOLD),
        )
    } else if filters.search.is_empty() {
        Span::styled(
            "Search job title, company or keywords...",
            Style::default().fg(theme.text_muted),
        )
    } else {
        Span::styled(filters.search.clone(), Style::default().fg(theme.text))
    };

    let filter_line = Line::from(vec![
        Span::styled("Location: ", Style::default().fg(theme.text_secondary)),
        Span::styled(filters.location.clone(), Style::default().fg(theme.text)),
        Span::styled("  Type: ", Style::default().fg(theme.text_secondary)),
        Span::styled(filters.job_type.clone(), Style::default().fg(theme.text)),
        Span::styled("  Salary: ", Style::default().fg(theme.text_secondary)),
        Span::styled(filters.salary.clone(), Style::default().fg(theme.text)),
        Span::styled(
            format!("  ({match_count} jobs)"),
            Style::default().fg(theme.text_muted),
        ),
    ]);

    let widget = Paragraph::new(vec![Line::from(search), filter_line]).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Find Your Dream Job ")
            .style(Style::default().bg(theme.background)),
    );
    f.render_widget(widget, area);
}

fn render_list(f: &mut Frame, area: Rect, state: &AppState, matches: &[usize], cursor: usize) {
    let theme = &state.theme;
    let mut lines: Vec<Line> = Vec::new();

    for (row, &index) in matches.iter().enumerate() {
        let listing = &state.board.listings[index];
        let is_selected = row == cursor;
        let marker = if is_selected { "> " } else { "  " };

        let mut spans = vec![Span::styled(
            marker.to_string(),
            Style::default().fg(theme.active),
        )];
        if listing.featured {
            spans.push(Span::styled("★ ", Style::default().fg(theme.warning)));
        }
        let title_style = if is_selected {
            Style::default()
                .fg(theme.active)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.text)
        };
        spans.push(Span::styled(listing.title.clone(), title_style));
        if listing.applied {
            spans.push(Span::styled(" ✓", Style::default().fg(theme.success)));
        }
        lines.push(Line::from(spans));
        lines.push(Line::from(Span::styled(
            format!("    {} · {}", listing.company, listing.location),
            Style::default().fg(theme.text_muted),
        )));
    }

    if lines.is_empty() {
        lines.push(Line::from(Span::styled(
            "No jobs match your filters",
            Style::default().fg(theme.text_muted),
        )));
    }

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Listings ")
            .style(Style::default().bg(theme.background)),
    );
    f.render_widget(widget, area);
}

fn render_detail(f: &mut Frame, area: Rect, state: &AppState, listing: &JobListing) {
    let theme = &state.theme;
    let mut lines: Vec<Line> = vec![
        Line::from(Span::styled(
            listing.title.clone(),
            Style::default()
                .fg(theme.primary)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("{} · {}", listing.company, listing.location),
            Style::default().fg(theme.text_secondary),
        )),
        Line::from(vec![
            Span::styled(listing.job_type.clone(), Style::default().fg(theme.accent)),
            Span::styled(
                format!("  {}  ·  {}", listing.salary, listing.posted),
                Style::default().fg(theme.text_muted),
            ),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            listing.description.clone(),
            Style::default().fg(theme.text),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Requirements",
            Style::default()
                .fg(theme.text_secondary)
                .add_modifier(Modifier::BOLD),
        )),
    ];
    for requirement in &listing.requirements {
        lines.push(Line::from(Span::styled(
            format!("  • {requirement}"),
            Style::default().fg(theme.text),
        )));
    }
    lines.push(Line::from(""));

    if let Some((message, _)) = &state.browser.flash {
        lines.push(Line::from(Span::styled(
            message.clone(),
            Style::default()
                .fg(theme.success)
                .add_modifier(Modifier::BOLD),
        )));
    } else if listing.applied {
        lines.push(Line::from(Span::styled(
            "✓ Applied",
            Style::default().fg(theme.success),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            "Press Enter to apply",
            Style::default().fg(theme.text_muted),
        )));
    }

    let widget = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Details ")
            .style(Style::default().bg(theme.background)),
    );
    f.render_widget(widget, area);
}

fn render_no_results(f: &mut Frame, area: Rect, state: &AppState) {
    let theme = &state.theme;
    let widget = Paragraph::new(Span::styled(
        "Try adjusting the search or clearing filters with x",
        Style::default().fg(theme.text_muted),
    ))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Details ")
            .style(Style::default().bg(theme.background)),
    );
    f.render_widget(widget, area);
}

#[cfg(test)]
mod tests {
    use super::*;
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
    fn test_search_narrows_results() {
        let mut state = test_state();
        let all = state.board.matching_indices(&state.browser.filters).len();

        handle_input(&mut state, key(KeyCode::Char('/')));
        assert!(state.browser.search_editing);
        type_text(&mut state, "frontend");
        handle_input(&mut state, key(KeyCode::Enter));
        assert!(!state.browser.search_editing);

        let narrowed = state.board.matching_indices(&state.browser.filters).len();
        assert!(narrowed < all);
        assert!(narrowed >= 1);
    }

    #[test]
    fn test_filter_cycling_wraps() {
        let mut state = test_state();
        for _ in 0..LOCATIONS.len() {
            handle_input(&mut state, key(KeyCode::Char('l')));
        }
        assert_eq!(state.browser.filters.location, LOCATIONS[0]);

        handle_input(&mut state, key(KeyCode::Char('t')));
        assert_eq!(state.browser.filters.job_type, JOB_TYPES[1]);
    }

    #[test]
    fn test_clear_resets_filters() {
        let mut state = test_state();
        handle_input(&mut state, key(KeyCode::Char('l')));
        handle_input(&mut state, key(KeyCode::Char('s')));
        assert!(!state.browser.filters.is_neutral());

        handle_input(&mut state, key(KeyCode::Char('x')));
        assert!(state.browser.filters.is_neutral());
    }

    #[test]
    fn test_apply_marks_listing_and_flashes() {
        let mut state = test_state();
        handle_input(&mut state, key(KeyCode::Enter));

        assert!(state.board.listings[0].applied);
        assert_eq!(state.board.applied_count(), 1);
        assert!(state.browser.flash.is_some());

        state.browser.force_flash_due();
        state.browser.poll();
        assert!(state.browser.flash.is_none());
    }

    #[test]
    fn test_second_apply_reports_duplicate() {
        let mut state = test_state();
        handle_input(&mut state, key(KeyCode::Enter));
        state.browser.flash = None;

        handle_input(&mut state, key(KeyCode::Enter));
        assert!(state.browser.flash.is_none());
        assert_eq!(state.status_message, "You have already applied to this job");
        assert_eq!(state.board.applied_count(), 1);
    }

    #[test]
    fn test_cursor_stays_in_bounds() {
        let mut state = test_state();
        let count = state.board.matching_indices(&state.browser.filters).len();
        for _ in 0..count + 3 {
            handle_input(&mut state, key(KeyCode::Down));
        }
        assert_eq!(state.browser.cursor, count - 1);
    }

    #[test]
    fn test_esc_returns_to_dashboard() {
        let mut state = test_state();
        state.screen = Screen::Jobs;
        handle_input(&mut state, key(KeyCode::Esc));
        assert_eq!(state.screen, Screen::Dashboard);
    }
}
