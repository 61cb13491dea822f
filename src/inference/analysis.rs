//! CV analysis over the hosted models.
//!
//! Flattens the document into one text blob, then runs zero-shot
//! classification against the candidate labels and sentiment scoring over
//! it. Failures never propagate: each capability degrades to `None` and
//! the caller renders whatever came back.

use serde::Serialize;

use crate::models::CVDocument;

use super::client::{Classification, InferenceClient, LabelScore};

/// Analysis outcome. Either half is `None` when its call failed.
#[derive(Debug, Clone, Serialize)]
pub struct CvAnalysis {
    /// Ranking of the CV text against the candidate label set
    pub category: Option<Classification>,
    /// Sentiment of the CV text, label/score pairs in descending order
    pub sentiment: Option<Vec<LabelScore>>,
}

/// Flattens the free-text parts of the document worth classifying: the
/// professional title, summary, experience positions and descriptions,
/// and professional skill names. Blank fields are skipped.
#[must_use]
pub fn document_text(document: &CVDocument) -> String {
    let mut parts: Vec<&str> = Vec::new();

    let title = document.personal.title.trim();
    if !title.is_empty() {
        parts.push(title);
    }
    let summary = document.personal.summary.trim();
    if !summary.is_empty() {
        parts.push(summary);
    }
    for entry in &document.experience {
        let position = entry.position.trim();
        if !position.is_empty() {
            parts.push(position);
        }
        let description = entry.description.trim();
        if !description.is_empty() {
            parts.push(description);
        }
    }
    for skill in &document.skills.professional {
        let name = skill.name.trim();
        if !name.is_empty() {
            parts.push(name);
        }
    }

    parts.join(". ")
}

/// Runs both capabilities over the document text. A failed call is logged
/// and yields `None`; the other half still goes through.
#[must_use]
pub fn analyze(client: &InferenceClient, document: &CVDocument) -> CvAnalysis {
    let text = document_text(document);

    let category = match client.classify(&text) {
        Ok(result) => Some(result),
        Err(e) => {
            tracing::warn!("CV classification failed: {e}");
            None
        }
    };
    let sentiment = match client.sentiment(&text) {
        Ok(result) => Some(result),
        Err(e) => {
            tracing::warn!("CV sentiment scoring failed: {e}");
            None
        }
    };

    CvAnalysis {
        category,
        sentiment,
    }
}
