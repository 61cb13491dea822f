//! Preview step of the CV builder.
//!
//! Draws the band/column layout tree from [`crate::preview`] onto a white
//! "paper" canvas with the template's accent colors, scrollable when the CV
//! is taller than the viewport. `e` exports the same document to PDF.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::builder::WizardStep;
use crate::export::{default_file_name, export_to_pdf};
use crate::preview::{self, Band, BandStyle, PreviewLayout, Section};

use super::{AppState, Screen};

/// Width assumed when the key handler estimates the scroll range.
const NOMINAL_WIDTH: u16 = 100;

/// Fixed paper palette; the CV page stays white in both app themes.
const PAPER_TEXT: Color = Color::Black;
const PAPER_MUTED: Color = Color::Rgb(107, 114, 128);
const PAPER_TINT: Color = Color::Rgb(243, 244, 246);
const PAPER_DARK_BAND: Color = Color::Rgb(31, 41, 55);

/// Handle preview step keys. Returns true when the key was consumed.
pub fn handle_input(state: &mut AppState, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Up => {
            state.preview_scroll = state.preview_scroll.saturating_sub(1);
            true
        }
        KeyCode::Down => {
            let max = virtual_height(state, NOMINAL_WIDTH).saturating_sub(1);
            state.preview_scroll = state.preview_scroll.saturating_add(1).min(max);
            true
        }
        KeyCode::PageUp => {
            state.preview_scroll = state.preview_scroll.saturating_sub(10);
            true
        }
        KeyCode::PageDown => {
            let max = virtual_height(state, NOMINAL_WIDTH).saturating_sub(1);
            state.preview_scroll = state.preview_scroll.saturating_add(10).min(max);
            true
        }
        KeyCode::Home => {
            state.preview_scroll = 0;
            true
        }
        KeyCode::Char('e') => {
            export(state);
            true
        }
        KeyCode::Char('p') => {
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

fn export(state: &mut AppState) {
    let template = state.wizard.selected_template().clone();
    let document = state.wizard.document().clone();
    let file_name = default_file_name(&document);
    let path = match std::env::current_dir() {
        Ok(dir) => dir.join(&file_name),
        Err(_) => std::path::PathBuf::from(&file_name),
    };

    match export_to_pdf(&template, &document, &path) {
        Ok(()) => {
            let color = state.theme.success;
            state.set_status_colored(format!("Saved {}", path.display()), color);
        }
        Err(e) => {
            tracing::error!("PDF export failed: {e:#}");
            state.set_error(format!("Export failed: {e}"));
        }
    }
}

/// Total canvas height in rows at the given width.
fn virtual_height(state: &AppState, width: u16) -> u16 {
    let layout = preview::render(state.wizard.selected_template(), state.wizard.document());
    let inner = width.saturating_sub(2);
    rendered_bands(&layout, inner)
        .iter()
        .map(|band| band.height)
        .sum()
}

/// Render the preview step into `area`.
pub fn render(f: &mut Frame, area: Rect, state: &AppState) {
    let theme = &state.theme;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Heading
            Constraint::Min(6),    // Canvas
            Constraint::Length(1), // Instructions
        ])
        .split(area);

    let template = state.wizard.selected_template();
    f.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(
                "Preview Your CV",
                Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("   Template: {}", template.name),
                Style::default().fg(theme.text_secondary),
            ),
        ])),
        chunks[0],
    );

    let canvas = Block::default()
        .borders(Borders::ALL)
        .title(" Preview ")
        .style(Style::default().bg(Color::White));
    let inner = canvas.inner(chunks[1]);
    f.render_widget(canvas, chunks[1]);

    let layout = preview::render(template, state.wizard.document());
    let bands = rendered_bands(&layout, inner.width);
    let total: u16 = bands.iter().map(|band| band.height).sum();
    let scroll = state.preview_scroll.min(total.saturating_sub(1));

    draw_bands(f, inner, &bands, scroll);

    f.render_widget(
        Paragraph::new(Span::styled(
            "↑/↓: Scroll  |  e: Download PDF  |  p: Previous step",
            Style::default().fg(theme.text_muted),
        )),
        chunks[2],
    );
}

/// One band laid out for a fixed width.
struct RenderedBand {
    height: u16,
    background: Option<Color>,
    columns: Vec<RenderedColumn>,
}

struct RenderedColumn {
    weight: u32,
    background: Option<Color>,
    lines: Vec<Line<'static>>,
}

/// Lay out every band of the preview at `width` columns.
fn rendered_bands(layout: &PreviewLayout, width: u16) -> Vec<RenderedBand> {
    let primary = hex_color(&layout.primary_color).unwrap_or(Color::Blue);
    let secondary = hex_color(&layout.secondary_color).unwrap_or(PAPER_MUTED);

    let mut out = Vec::with_capacity(layout.bands.len());
    for band in &layout.bands {
        out.push(render_band(band, width, primary, secondary));
    }
    out
}

fn render_band(band: &Band, width: u16, primary: Color, secondary: Color) -> RenderedBand {
    // Accent and dark bands swap to light-on-color text
    let (background, text, muted, heading) = match band.style {
        BandStyle::Accent => (Some(primary), Color::White, Color::White, Color::White),
        BandStyle::Dark => (Some(PAPER_DARK_BAND), Color::White, PAPER_MUTED, Color::White),
        BandStyle::Plain | BandStyle::Underlined => (None, PAPER_TEXT, PAPER_MUTED, primary),
    };

    let total_weight: u32 = band.columns.iter().map(|c| u32::from(c.weight)).sum();
    let total_weight = total_weight.max(1);

    let mut columns = Vec::with_capacity(band.columns.len());
    for column in &band.columns {
        let col_width = width * u16::try_from(column.weight).unwrap_or(1)
            / u16::try_from(total_weight).unwrap_or(1);
        let wrap_width = usize::from(col_width.saturating_sub(2)).max(8);

        let mut lines: Vec<Line<'static>> = Vec::new();
        for section in &column.sections {
            section_lines(section, wrap_width, text, muted, heading, primary, secondary, &mut lines);
            lines.push(Line::from(""));
        }

        let column_bg = if column.tinted && background.is_none() {
            Some(PAPER_TINT)
        } else {
            None
        };
        columns.push(RenderedColumn {
            weight: u32::from(column.weight),
            background: column_bg,
            lines,
        });
    }

    // Underlined bands close with a rule across the full width
    if band.style == BandStyle::Underlined {
        if let Some(first) = columns.first_mut() {
            first.lines.push(Line::from(Span::styled(
                "─".repeat(usize::from(width.saturating_sub(2))),
                Style::default().fg(primary),
            )));
        }
    }

    let height = columns
        .iter()
        .map(|c| c.lines.len())
        .max()
        .unwrap_or(0)
        .min(usize::from(u16::MAX)) as u16;

    RenderedBand {
        height,
        background,
        columns,
    }
}

/// Append the TUI lines for one section.
#[allow(clippy::too_many_arguments)]
fn section_lines(
    section: &Section,
    wrap_width: usize,
    text: Color,
    muted: Color,
    heading: Color,
    primary: Color,
    secondary: Color,
    lines: &mut Vec<Line<'static>>,
) {
    match section {
        Section::Header(block) => {
            let alignment = if block.centered {
                Alignment::Center
            } else {
                Alignment::Left
            };
            lines.push(
                Line::from(Span::styled(
                    block.name.clone(),
                    Style::default().fg(text).add_modifier(Modifier::BOLD),
                ))
                .alignment(alignment),
            );
            if !block.title.is_empty() {
                lines.push(
                    Line::from(Span::styled(
                        block.title.clone(),
                        Style::default().fg(heading),
                    ))
                    .alignment(alignment),
                );
            }
            if !block.contact.is_empty() {
                lines.push(
                    Line::from(Span::styled(
                        block.contact.join("  |  "),
                        Style::default().fg(muted),
                    ))
                    .alignment(alignment),
                );
            }
        }
        Section::Summary(block) => {
            push_heading(lines, preview::HEADING_SUMMARY, heading);
            for chunk in wrap_text(&block.text, wrap_width) {
                lines.push(Line::from(Span::styled(chunk, Style::default().fg(text))));
            }
        }
        Section::Experience(section) => {
            push_heading(lines, preview::HEADING_EXPERIENCE, heading);
            for item in &section.items {
                lines.push(Line::from(Span::styled(
                    item.position.clone(),
                    Style::default().fg(text).add_modifier(Modifier::BOLD),
                )));
                lines.push(Line::from(Span::styled(
                    item.company.clone(),
                    Style::default().fg(text),
                )));
                lines.push(Line::from(Span::styled(
                    item.date_range.clone(),
                    Style::default().fg(muted),
                )));
                for chunk in wrap_text(&item.description, wrap_width) {
                    lines.push(Line::from(Span::styled(chunk, Style::default().fg(text))));
                }
                lines.push(Line::from(""));
            }
        }
        Section::Education(section) => {
            push_heading(lines, preview::HEADING_EDUCATION, heading);
            for item in &section.items {
                lines.push(Line::from(Span::styled(
                    item.qualification.clone(),
                    Style::default().fg(text).add_modifier(Modifier::BOLD),
                )));
                lines.push(Line::from(Span::styled(
                    item.institution.clone(),
                    Style::default().fg(text),
                )));
                lines.push(Line::from(Span::styled(
                    item.date_range.clone(),
                    Style::default().fg(muted),
                )));
                for chunk in wrap_text(&item.description, wrap_width) {
                    lines.push(Line::from(Span::styled(chunk, Style::default().fg(text))));
                }
                lines.push(Line::from(""));
            }
        }
        Section::Skills(section) => {
            push_heading(lines, preview::HEADING_SKILLS, heading);
            for (label, items, bar_color) in [
                ("Professional", &section.professional, primary),
                ("Languages", &section.languages, secondary),
            ] {
                if items.is_empty() {
                    continue;
                }
                lines.push(Line::from(Span::styled(
                    label.to_string(),
                    Style::default().fg(text).add_modifier(Modifier::BOLD),
                )));
                for item in items {
                    let bar_len = wrap_width.saturating_sub(2).min(12).max(5);
                    let filled = (item.fill_fraction() * bar_len as f64).round() as usize;
                    let bar = format!(
                        "{}{}",
                        "█".repeat(filled),
                        "░".repeat(bar_len.saturating_sub(filled))
                    );
                    lines.push(Line::from(Span::styled(
                        item.name.clone(),
                        Style::default().fg(text),
                    )));
                    lines.push(Line::from(Span::styled(bar, Style::default().fg(bar_color))));
                }
                lines.push(Line::from(""));
            }
        }
    }
}

fn push_heading(lines: &mut Vec<Line<'static>>, title: &str, color: Color) {
    lines.push(Line::from(Span::styled(
        title.to_string(),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )));
}

/// Draw the bands that intersect the scroll window.
fn draw_bands(f: &mut Frame, area: Rect, bands: &[RenderedBand], scroll: u16) {
    let view_top = scroll;
    let view_bottom = scroll + area.height;

    let mut cursor: u16 = 0;
    for band in bands {
        let band_top = cursor;
        let band_bottom = cursor + band.height;
        cursor = band_bottom;

        if band_bottom <= view_top {
            continue;
        }
        if band_top >= view_bottom {
            break;
        }

        let skip = view_top.saturating_sub(band_top);
        let y = area.y + band_top.saturating_sub(view_top);
        let visible = (band_bottom.min(view_bottom) - band_top.max(view_top)).min(area.height);
        let band_area = Rect {
            x: area.x,
            y,
            width: area.width,
            height: visible,
        };

        let constraints: Vec<Constraint> = band
            .columns
            .iter()
            .map(|c| {
                Constraint::Ratio(c.weight, band.columns.iter().map(|c| c.weight).sum::<u32>())
            })
            .collect();
        let column_areas = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(constraints)
            .split(band_area);

        for (column, column_area) in band.columns.iter().zip(column_areas.iter()) {
            let background = column.background.or(band.background);
            let mut widget = Paragraph::new(column.lines.clone()).scroll((skip, 0));
            if let Some(bg) = background {
                widget = widget.style(Style::default().bg(bg));
            }
            f.render_widget(widget, *column_area);
        }
    }
}

/// Greedy character wrap; empty input yields no lines.
fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }
    let mut out = Vec::new();
    let mut current = String::new();
    let mut count = 0;
    for c in text.chars() {
        if count == width {
            out.push(std::mem::take(&mut current));
            count = 0;
        }
        current.push(c);
        count += 1;
    }
    if !current.is_empty() {
        out.push(current);
    }
    out
}

/// Parse a `#RRGGBB` hex color.
fn hex_color(value: &str) -> Option<Color> {
    let hex = value.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CVSection, PersonalInfo};
    use crate::tui::test_state;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_hex_color_parses_template_accents() {
        assert_eq!(hex_color("#2563eb"), Some(Color::Rgb(0x25, 0x63, 0xeb)));
        assert_eq!(hex_color("#0d9488"), Some(Color::Rgb(0x0d, 0x94, 0x88)));
        assert_eq!(hex_color("not-a-color"), None);
        assert_eq!(hex_color("#123"), None);
    }

    #[test]
    fn test_rendered_bands_cover_whole_layout() {
        let state = test_state();
        let layout = preview::render(state.wizard.selected_template(), state.wizard.document());
        let bands = rendered_bands(&layout, 80);
        assert_eq!(bands.len(), layout.bands.len());
        assert!(bands.iter().all(|band| band.height > 0));
    }

    #[test]
    fn test_scroll_keys_clamp() {
        let mut state = test_state();
        state.wizard.select_step(WizardStep::Preview);

        handle_input(&mut state, key(KeyCode::Up));
        assert_eq!(state.preview_scroll, 0);

        handle_input(&mut state, key(KeyCode::Down));
        assert_eq!(state.preview_scroll, 1);

        for _ in 0..500 {
            handle_input(&mut state, key(KeyCode::Down));
        }
        let max = virtual_height(&state, NOMINAL_WIDTH);
        assert!(state.preview_scroll < max);

        handle_input(&mut state, key(KeyCode::Home));
        assert_eq!(state.preview_scroll, 0);
    }

    #[test]
    fn test_longer_document_grows_canvas() {
        let mut state = test_state();
        let before = virtual_height(&state, 80);

        let mut info = PersonalInfo::default();
        info.summary = "An experienced engineer. ".repeat(40);
        state
            .wizard
            .update_section(CVSection::Personal(info), &mut *state.storage);

        assert!(virtual_height(&state, 80) > before);
    }
}
