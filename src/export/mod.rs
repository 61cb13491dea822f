//! PDF export of the rendered CV.
//!
//! Export happens in two passes: the preview layout tree is painted onto a
//! fixed-width capture surface ([`paint`]), and the surface is then scaled
//! onto a single A4 page and written to disk ([`pdf`]).

pub mod paint;
pub mod pdf;

pub use paint::{paint as paint_surface, PaintOp, PaintedSurface, SurfaceColor};
pub use pdf::{page_height_mm, write_pdf};

use crate::models::CVDocument;
use crate::preview;
use crate::templates::Template;
use anyhow::Result;
use chrono::Utc;
use std::path::Path;

/// Renders, paints and writes `document` as a PDF at `path`.
pub fn export_to_pdf(template: &Template, document: &CVDocument, path: &Path) -> Result<()> {
    let layout = preview::render(template, document);
    let surface = paint::paint(&layout);
    pdf::write_pdf(&surface, path)
}

/// Default download name: `{first}-{last}-{timestamp}.pdf`, with "CV" and
/// "Document" standing in for missing names.
#[must_use]
pub fn default_file_name(document: &CVDocument) -> String {
    let first = fallback(&document.personal.first_name, "CV");
    let last = fallback(&document.personal.last_name, "Document");
    format!("{first}-{last}-{}.pdf", Utc::now().timestamp_millis())
}

fn fallback<'a>(value: &'a str, default: &'a str) -> &'a str {
    if value.is_empty() {
        default
    } else {
        value
    }
}
