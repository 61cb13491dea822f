//! CV template catalog.
//!
//! The catalog is embedded in the binary at compile time and loaded on
//! first access. Each entry pairs a structural layout with color and font
//! tokens; two entries are premium-gated.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Structural arrangement a template renders with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateLayout {
    /// Two-column: header and skills in a tinted sidebar
    Sidebar,
    /// Full-width header band over a two-column grid
    Modern,
    /// Single column, muted styling
    Minimal,
    /// Single column with a heavyweight centered header
    Executive,
    /// Single column, traditional ordering
    Classic,
}

/// Immutable catalog entry: visual identity of a CV template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    /// Catalog id, selection key
    pub id: String,
    /// Display name
    pub name: String,
    /// Thumbnail image reference
    pub thumbnail: String,
    /// Whether selection requires a premium account
    pub is_premium: bool,
    /// Font family the rendered CV uses
    pub font_family: String,
    /// Accent color for headings and professional skill bars
    pub primary_color: String,
    /// Secondary accent, used for language skill bars
    pub secondary_color: String,
    /// Layout variant name (see [`TemplateLayout`])
    pub layout: String,
}

impl Template {
    /// Maps the layout name to its structural variant.
    ///
    /// Unrecognized names fall back to the classic single-column variant.
    #[must_use]
    pub fn layout_kind(&self) -> TemplateLayout {
        match self.layout.as_str() {
            "sidebar" => TemplateLayout::Sidebar,
            "modern" => TemplateLayout::Modern,
            "minimal" => TemplateLayout::Minimal,
            "executive" => TemplateLayout::Executive,
            _ => TemplateLayout::Classic,
        }
    }
}

/// The embedded template catalog with id lookup.
#[derive(Debug, Clone)]
pub struct TemplateCatalog {
    templates: Vec<Template>,
    lookup: HashMap<String, usize>,
}

impl TemplateCatalog {
    /// Loads the catalog from the embedded JSON file.
    pub fn load() -> Result<Self> {
        let json_data = include_str!("templates.json");
        let templates: Vec<Template> =
            serde_json::from_str(json_data).context("Failed to parse embedded templates.json")?;

        let lookup = templates
            .iter()
            .enumerate()
            .map(|(idx, t)| (t.id.clone(), idx))
            .collect();

        Ok(Self { templates, lookup })
    }

    /// All templates, in catalog order.
    #[must_use]
    pub fn all(&self) -> &[Template] {
        &self.templates
    }

    /// Looks up a template by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Template> {
        self.lookup.get(id).map(|&idx| &self.templates[idx])
    }

    /// The first catalog entry, used as the default selection.
    #[must_use]
    pub fn first(&self) -> &Template {
        &self.templates[0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_loads_five_templates() {
        let catalog = TemplateCatalog::load().unwrap();
        assert_eq!(catalog.all().len(), 5);
        assert_eq!(catalog.first().id, "modern");
    }

    #[test]
    fn test_premium_flags() {
        let catalog = TemplateCatalog::load().unwrap();
        let premium: Vec<&str> = catalog
            .all()
            .iter()
            .filter(|t| t.is_premium)
            .map(|t| t.id.as_str())
            .collect();
        assert_eq!(premium, vec!["creative", "executive"]);
    }

    #[test]
    fn test_lookup_by_id() {
        let catalog = TemplateCatalog::load().unwrap();
        let minimal = catalog.get("minimal").unwrap();
        assert_eq!(minimal.name, "Minimal");
        assert_eq!(minimal.primary_color, "#374151");
        assert!(catalog.get("nonexistent").is_none());
    }

    #[test]
    fn test_layout_kind_mapping() {
        let catalog = TemplateCatalog::load().unwrap();
        assert_eq!(
            catalog.get("modern").unwrap().layout_kind(),
            TemplateLayout::Sidebar
        );
        assert_eq!(
            catalog.get("creative").unwrap().layout_kind(),
            TemplateLayout::Modern
        );
        assert_eq!(
            catalog.get("professional").unwrap().layout_kind(),
            TemplateLayout::Classic
        );
    }

    #[test]
    fn test_unrecognized_layout_falls_back_to_classic() {
        let template = Template {
            id: "custom".to_string(),
            name: "Custom".to_string(),
            thumbnail: String::new(),
            is_premium: false,
            font_family: "Inter".to_string(),
            primary_color: "#000000".to_string(),
            secondary_color: "#444444".to_string(),
            layout: "zigzag".to_string(),
        };
        assert_eq!(template.layout_kind(), TemplateLayout::Classic);
    }
}
