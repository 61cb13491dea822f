//! PDF writer for the painted capture surface.
//!
//! Maps the surface onto a single A4 portrait page: the surface width
//! becomes the full 210mm page width and heights scale proportionally.
//! Content that runs past the bottom of the page is clipped rather than
//! flowed onto a second page.

use super::paint::{PaintOp, PaintedSurface, SurfaceColor};
use crate::constants::{EXPORT_PAGE_HEIGHT_MM, EXPORT_PAGE_WIDTH_MM};
use anyhow::{Context, Result};
use printpdf::path::PaintMode;
use printpdf::{BuiltinFont, Color, IndirectFontRef, Mm, PdfDocument, Rect, Rgb};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Height in millimeters the surface occupies when scaled to the page
/// width. A 1000x1294 px surface yields 1294 * 210 / 1000 = 271.74mm.
#[must_use]
pub fn page_height_mm(width_px: u32, height_px: u32) -> f64 {
    f64::from(height_px) * EXPORT_PAGE_WIDTH_MM / f64::from(width_px)
}

/// Writes the surface to `path` as a one-page A4 PDF.
pub fn write_pdf(surface: &PaintedSurface, path: &Path) -> Result<()> {
    let (doc, page, layer) = PdfDocument::new(
        "CV",
        mm(EXPORT_PAGE_WIDTH_MM),
        mm(EXPORT_PAGE_HEIGHT_MM),
        "Page 1",
    );
    let layer = doc.get_page(page).get_layer(layer);

    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .context("Failed to register built-in font")?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .context("Failed to register built-in bold font")?;

    let mm_per_px = EXPORT_PAGE_WIDTH_MM / f64::from(surface.width_px);
    for op in &surface.ops {
        draw_op(&layer, op, mm_per_px, &regular, &bold);
    }

    let file = File::create(path)
        .with_context(|| format!("Failed to create PDF file: {}", path.display()))?;
    doc.save(&mut BufWriter::new(file))
        .context("Failed to write PDF document")?;

    tracing::debug!(path = %path.display(), "wrote pdf export");
    Ok(())
}

fn draw_op(
    layer: &printpdf::PdfLayerReference,
    op: &PaintOp,
    mm_per_px: f64,
    regular: &IndirectFontRef,
    bold: &IndirectFontRef,
) {
    match op {
        PaintOp::Rect {
            x,
            y,
            width,
            height,
            color,
        } => {
            let top = y * mm_per_px;
            if top >= EXPORT_PAGE_HEIGHT_MM {
                return;
            }
            let left = x * mm_per_px;
            let right = left + width * mm_per_px;
            // Clamp rects that straddle the bottom edge
            let bottom = (top + height * mm_per_px).min(EXPORT_PAGE_HEIGHT_MM);

            layer.set_fill_color(pdf_color(*color));
            let rect = Rect::new(
                mm(left),
                mm(EXPORT_PAGE_HEIGHT_MM - bottom),
                mm(right),
                mm(EXPORT_PAGE_HEIGHT_MM - top),
            )
            .with_mode(PaintMode::Fill);
            layer.add_rect(rect);
        }
        PaintOp::Text {
            x,
            y,
            size,
            color,
            bold: is_bold,
            text,
        } => {
            let baseline = y * mm_per_px;
            if baseline > EXPORT_PAGE_HEIGHT_MM {
                return;
            }
            let font = if *is_bold { bold } else { regular };
            let size_pt = size * mm_per_px * 72.0 / 25.4;

            layer.set_fill_color(pdf_color(*color));
            #[allow(clippy::cast_possible_truncation)]
            layer.use_text(
                text.clone(),
                size_pt as f32,
                mm(x * mm_per_px),
                mm(EXPORT_PAGE_HEIGHT_MM - baseline),
                font,
            );
        }
    }
}

#[allow(clippy::cast_possible_truncation)]
fn mm(value: f64) -> Mm {
    Mm(value as f32)
}

fn pdf_color(color: SurfaceColor) -> Color {
    Color::Rgb(Rgb::new(
        f32::from(color.r) / 255.0,
        f32::from(color.g) / 255.0,
        f32::from(color.b) / 255.0,
        None,
    ))
}
