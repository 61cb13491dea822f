//! Paint pass for PDF export.
//!
//! Replays a [`PreviewLayout`] onto a fixed-width capture surface as flat
//! paint operations (rectangles and positioned text). The surface is 1000
//! logical pixels wide and painted at a 2x density, matching the capture
//! dimensions the document is laid out for; the PDF writer maps the result
//! onto a 210mm page.

use crate::constants::{EXPORT_SCALE, EXPORT_SURFACE_WIDTH_PX};
use crate::preview::{
    Band, BandStyle, Column, EducationSection, ExperienceSection, HeaderBlock, PreviewLayout,
    Section, SkillItem, SkillsSection, SummaryBlock, HEADING_EDUCATION, HEADING_EXPERIENCE,
    HEADING_SKILLS, HEADING_SUMMARY,
};

/// An opaque RGB color on the paint surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceColor {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl SurfaceColor {
    /// Page background.
    pub const WHITE: Self = Self::new(255, 255, 255);
    /// Body text.
    pub const TEXT: Self = Self::new(17, 24, 39);
    /// Secondary text (dates, contact details).
    pub const MUTED: Self = Self::new(107, 114, 128);
    /// Sidebar background tint.
    pub const TINT: Self = Self::new(243, 244, 246);
    /// Dark header band background.
    pub const DARK: Self = Self::new(17, 24, 39);
    /// Unfilled portion of a skill bar.
    pub const BAR_TRACK: Self = Self::new(229, 231, 235);

    /// Creates a color from RGB channels.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses a `#rrggbb` hex string; anything else yields body-text black.
    #[must_use]
    pub fn parse(hex: &str) -> Self {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 {
            return Self::TEXT;
        }
        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&digits[range], 16);
        match (channel(0..2), channel(2..4), channel(4..6)) {
            (Ok(r), Ok(g), Ok(b)) => Self::new(r, g, b),
            _ => Self::TEXT,
        }
    }
}

/// One drawing operation on the capture surface.
///
/// Coordinates are device pixels with the origin at the top-left corner.
#[derive(Debug, Clone, PartialEq)]
pub enum PaintOp {
    /// Filled rectangle.
    Rect {
        /// Left edge
        x: f64,
        /// Top edge
        y: f64,
        /// Width
        width: f64,
        /// Height
        height: f64,
        /// Fill color
        color: SurfaceColor,
    },
    /// A run of text. `y` is the baseline.
    Text {
        /// Left edge of the run
        x: f64,
        /// Baseline position
        y: f64,
        /// Font size in pixels
        size: f64,
        /// Text color
        color: SurfaceColor,
        /// Whether the run uses the bold face
        bold: bool,
        /// The text itself
        text: String,
    },
}

/// The painted capture surface: device dimensions plus ordered operations.
#[derive(Debug, Clone, PartialEq)]
pub struct PaintedSurface {
    /// Surface width in device pixels
    pub width_px: u32,
    /// Surface height in device pixels
    pub height_px: u32,
    /// Operations in paint order (back to front)
    pub ops: Vec<PaintOp>,
}

// Logical layout metrics; the whole surface is scaled by EXPORT_SCALE at
// the end of the paint pass.
const PAGE_PADDING: f64 = 40.0;
const COLUMN_GUTTER: f64 = 24.0;
const SECTION_SPACING: f64 = 24.0;
const ITEM_SPACING: f64 = 14.0;

const SIZE_NAME: f64 = 28.0;
const SIZE_TITLE: f64 = 16.0;
const SIZE_HEADING: f64 = 16.0;
const SIZE_BODY: f64 = 12.0;
const SIZE_SMALL: f64 = 10.0;

const LINE_GAP: f64 = 1.4;
const BAR_HEIGHT: f64 = 6.0;
const RULE_HEIGHT: f64 = 1.5;

/// Average glyph advance as a fraction of the font size. Good enough for
/// wrapping and alignment of the Helvetica-class faces the PDF embeds.
const GLYPH_ASPECT: f64 = 0.5;

/// Paints `layout` onto the capture surface.
#[must_use]
pub fn paint(layout: &PreviewLayout) -> PaintedSurface {
    let width = f64::from(EXPORT_SURFACE_WIDTH_PX);
    let primary = SurfaceColor::parse(&layout.primary_color);
    let secondary = SurfaceColor::parse(&layout.secondary_color);

    let mut painter = Painter {
        ops: Vec::new(),
        primary,
        secondary,
    };

    let mut cursor = 0.0_f64;
    for band in &layout.bands {
        cursor = painter.paint_band(band, cursor, width);
    }
    let height = cursor + PAGE_PADDING;

    // White page background behind everything painted so far
    painter.ops.insert(
        0,
        PaintOp::Rect {
            x: 0.0,
            y: 0.0,
            width,
            height,
            color: SurfaceColor::WHITE,
        },
    );

    scale_to_device(painter.ops, width, height)
}

/// Multiplies every logical coordinate by the density factor so the surface
/// matches the dimensions the capture is rasterized at.
fn scale_to_device(mut ops: Vec<PaintOp>, width: f64, height: f64) -> PaintedSurface {
    let scale = f64::from(EXPORT_SCALE);
    for op in &mut ops {
        match op {
            PaintOp::Rect {
                x,
                y,
                width,
                height,
                ..
            } => {
                *x *= scale;
                *y *= scale;
                *width *= scale;
                *height *= scale;
            }
            PaintOp::Text { x, y, size, .. } => {
                *x *= scale;
                *y *= scale;
                *size *= scale;
            }
        }
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    PaintedSurface {
        width_px: EXPORT_SURFACE_WIDTH_PX * EXPORT_SCALE,
        height_px: (height * scale).ceil() as u32,
        ops,
    }
}

/// Estimated width of a text run in pixels.
fn text_width(text: &str, size: f64) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let chars = text.chars().count() as f64;
    chars * size * GLYPH_ASPECT
}

/// Greedy word wrap against the glyph-width estimate. Words longer than the
/// limit are emitted on their own line rather than split.
fn wrap_text(text: &str, size: f64, max_width: f64) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };
        if text_width(&candidate, size) <= max_width || current.is_empty() {
            current = candidate;
        } else {
            lines.push(std::mem::take(&mut current));
            current = word.to_string();
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

struct Painter {
    ops: Vec<PaintOp>,
    primary: SurfaceColor,
    secondary: SurfaceColor,
}

/// Horizontal extent a column paints into.
#[derive(Debug, Clone, Copy)]
struct Frame {
    x: f64,
    width: f64,
}

impl Painter {
    /// Paints one band starting at `top`, returning the new cursor.
    fn paint_band(&mut self, band: &Band, top: f64, surface_width: f64) -> f64 {
        let background_slot = self.ops.len();

        let total_weight: u32 = band.columns.iter().map(|c| u32::from(c.weight)).sum();
        let gutters = (band.columns.len().saturating_sub(1)) as f64 * COLUMN_GUTTER;
        let content_width = surface_width - 2.0 * PAGE_PADDING - gutters;

        let on_band = matches!(band.style, BandStyle::Accent | BandStyle::Dark);
        let mut x = PAGE_PADDING;
        let mut bottom = top;
        for column in &band.columns {
            let width = content_width * f64::from(column.weight) / f64::from(total_weight.max(1));
            let frame = Frame { x, width };
            let column_bottom = self.paint_column(column, frame, top, on_band);
            bottom = bottom.max(column_bottom);
            x += width + COLUMN_GUTTER;
        }

        let band_height = bottom - top;
        match band.style {
            BandStyle::Accent => {
                // Gradient flattened to the primary accent
                self.ops.insert(
                    background_slot,
                    PaintOp::Rect {
                        x: 0.0,
                        y: top,
                        width: surface_width,
                        height: band_height,
                        color: self.primary,
                    },
                );
            }
            BandStyle::Dark => {
                self.ops.insert(
                    background_slot,
                    PaintOp::Rect {
                        x: 0.0,
                        y: top,
                        width: surface_width,
                        height: band_height,
                        color: SurfaceColor::DARK,
                    },
                );
            }
            BandStyle::Underlined => {
                self.ops.push(PaintOp::Rect {
                    x: PAGE_PADDING,
                    y: bottom - RULE_HEIGHT,
                    width: surface_width - 2.0 * PAGE_PADDING,
                    height: RULE_HEIGHT,
                    color: SurfaceColor::BAR_TRACK,
                });
            }
            BandStyle::Plain => {}
        }

        bottom
    }

    /// Paints one column's sections, returning the bottom edge.
    fn paint_column(&mut self, column: &Column, frame: Frame, top: f64, on_band: bool) -> f64 {
        let background_slot = self.ops.len();
        let mut cursor = top + PAGE_PADDING;

        for (i, section) in column.sections.iter().enumerate() {
            if i > 0 {
                cursor += SECTION_SPACING;
            }
            cursor = match section {
                Section::Header(header) => self.paint_header(header, frame, cursor, on_band),
                Section::Summary(summary) => self.paint_summary(summary, frame, cursor),
                Section::Experience(experience) => {
                    self.paint_experience(experience, frame, cursor)
                }
                Section::Education(education) => self.paint_education(education, frame, cursor),
                Section::Skills(skills) => self.paint_skills(skills, frame, cursor),
            };
        }

        let bottom = cursor + PAGE_PADDING;
        if column.tinted {
            self.ops.insert(
                background_slot,
                PaintOp::Rect {
                    x: frame.x - COLUMN_GUTTER / 2.0,
                    y: top,
                    width: frame.width + COLUMN_GUTTER,
                    height: bottom - top,
                    color: SurfaceColor::TINT,
                },
            );
        }
        bottom
    }

    fn text(&mut self, x: f64, baseline: f64, size: f64, color: SurfaceColor, bold: bool, text: &str) {
        if text.is_empty() {
            return;
        }
        self.ops.push(PaintOp::Text {
            x,
            y: baseline,
            size,
            color,
            bold,
            text: text.to_string(),
        });
    }

    /// Emits one line of text at the cursor, returning the next cursor.
    fn line(
        &mut self,
        frame: Frame,
        cursor: f64,
        size: f64,
        color: SurfaceColor,
        bold: bool,
        centered: bool,
        value: &str,
    ) -> f64 {
        if value.is_empty() {
            return cursor;
        }
        let x = if centered {
            frame.x + (frame.width - text_width(value, size)).max(0.0) / 2.0
        } else {
            frame.x
        };
        self.text(x, cursor + size, size, color, bold, value);
        cursor + size * LINE_GAP
    }

    /// Emits wrapped body text, returning the next cursor.
    fn paragraph(
        &mut self,
        frame: Frame,
        mut cursor: f64,
        size: f64,
        color: SurfaceColor,
        value: &str,
    ) -> f64 {
        for line in wrap_text(value, size, frame.width) {
            self.text(frame.x, cursor + size, size, color, false, &line);
            cursor += size * LINE_GAP;
        }
        cursor
    }

    fn heading(&mut self, frame: Frame, cursor: f64, label: &str) -> f64 {
        let primary = self.primary;
        self.line(frame, cursor, SIZE_HEADING, primary, true, false, label) + 4.0
    }

    fn paint_header(&mut self, header: &HeaderBlock, frame: Frame, cursor: f64, on_band: bool) -> f64 {
        let (name_color, muted) = if on_band {
            (SurfaceColor::WHITE, SurfaceColor::WHITE)
        } else {
            (SurfaceColor::TEXT, SurfaceColor::MUTED)
        };

        let mut cursor = self.line(
            frame,
            cursor,
            SIZE_NAME,
            name_color,
            true,
            header.centered,
            &header.name,
        );
        cursor = self.line(
            frame,
            cursor,
            SIZE_TITLE,
            muted,
            false,
            header.centered,
            &header.title,
        );
        let contact = header.contact.join("  •  ");
        cursor = self.line(
            frame,
            cursor,
            SIZE_SMALL,
            muted,
            false,
            header.centered,
            &contact,
        );
        cursor
    }

    fn paint_summary(&mut self, summary: &SummaryBlock, frame: Frame, cursor: f64) -> f64 {
        let cursor = self.heading(frame, cursor, HEADING_SUMMARY);
        self.paragraph(frame, cursor, SIZE_BODY, SurfaceColor::TEXT, &summary.text)
    }

    fn paint_experience(
        &mut self,
        experience: &ExperienceSection,
        frame: Frame,
        cursor: f64,
    ) -> f64 {
        let mut cursor = self.heading(frame, cursor, HEADING_EXPERIENCE);
        for (i, item) in experience.items.iter().enumerate() {
            if i > 0 {
                cursor += ITEM_SPACING;
            }
            cursor = self.title_and_date(frame, cursor, &item.position, &item.date_range);
            cursor = self.line(
                frame,
                cursor,
                SIZE_BODY,
                SurfaceColor::MUTED,
                false,
                false,
                &item.company,
            );
            cursor = self.paragraph(frame, cursor, SIZE_BODY, SurfaceColor::TEXT, &item.description);
        }
        cursor
    }

    fn paint_education(&mut self, education: &EducationSection, frame: Frame, cursor: f64) -> f64 {
        let mut cursor = self.heading(frame, cursor, HEADING_EDUCATION);
        for (i, item) in education.items.iter().enumerate() {
            if i > 0 {
                cursor += ITEM_SPACING;
            }
            cursor = self.title_and_date(frame, cursor, &item.qualification, &item.date_range);
            cursor = self.line(
                frame,
                cursor,
                SIZE_BODY,
                SurfaceColor::MUTED,
                false,
                false,
                &item.institution,
            );
            cursor = self.paragraph(frame, cursor, SIZE_BODY, SurfaceColor::TEXT, &item.description);
        }
        cursor
    }

    /// Bold left-aligned title with a right-aligned date on the same line.
    fn title_and_date(&mut self, frame: Frame, cursor: f64, title: &str, date: &str) -> f64 {
        let baseline = cursor + SIZE_BODY;
        self.text(frame.x, baseline, SIZE_BODY, SurfaceColor::TEXT, true, title);
        if !date.trim().is_empty() {
            let date_x = frame.x + frame.width - text_width(date, SIZE_SMALL);
            self.text(date_x, baseline, SIZE_SMALL, SurfaceColor::MUTED, false, date);
        }
        cursor + SIZE_BODY * LINE_GAP
    }

    fn paint_skills(&mut self, skills: &SkillsSection, frame: Frame, cursor: f64) -> f64 {
        let cursor = self.heading(frame, cursor, HEADING_SKILLS);

        // Professional skills and languages sit side by side
        let half = (frame.width - COLUMN_GUTTER) / 2.0;
        let left = Frame {
            x: frame.x,
            width: half,
        };
        let right = Frame {
            x: frame.x + half + COLUMN_GUTTER,
            width: half,
        };
        let primary = self.primary;
        let secondary = self.secondary;
        let left_bottom =
            self.paint_skill_list(left, cursor, "Professional Skills", &skills.professional, primary);
        let right_bottom =
            self.paint_skill_list(right, cursor, "Languages", &skills.languages, secondary);
        left_bottom.max(right_bottom)
    }

    fn paint_skill_list(
        &mut self,
        frame: Frame,
        cursor: f64,
        label: &str,
        items: &[SkillItem],
        fill: SurfaceColor,
    ) -> f64 {
        let mut cursor = self.line(
            frame,
            cursor,
            SIZE_BODY,
            SurfaceColor::TEXT,
            true,
            false,
            label,
        );
        for item in items {
            cursor = self.line(
                frame,
                cursor,
                SIZE_SMALL,
                SurfaceColor::TEXT,
                false,
                false,
                &item.name,
            );
            self.ops.push(PaintOp::Rect {
                x: frame.x,
                y: cursor,
                width: frame.width,
                height: BAR_HEIGHT,
                color: SurfaceColor::BAR_TRACK,
            });
            self.ops.push(PaintOp::Rect {
                x: frame.x,
                y: cursor,
                width: frame.width * item.fill_fraction(),
                height: BAR_HEIGHT,
                color: fill,
            });
            cursor += BAR_HEIGHT + 8.0;
        }
        cursor
    }
}
