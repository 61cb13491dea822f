//! CV builder wizard controller.
//!
//! Owns the authoritative [`CVDocument`] and the wizard position, persists
//! both the document and the template choice after every change, and
//! restores them on startup. Step forms never touch the document directly:
//! they hand replacement slices (or add/remove requests) to this
//! controller.

use crate::constants::{STORAGE_KEY_CV_DATA, STORAGE_KEY_SELECTED_TEMPLATE};
use crate::models::{CVDocument, CVSection, SkillKind};
use crate::storage::Storage;
use crate::templates::{Template, TemplateCatalog};

/// Wizard steps, in fixed linear order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    /// Choose a template
    Template,
    /// Personal details
    Personal,
    /// Work experience entries
    Experience,
    /// Education entries
    Education,
    /// Professional skills and languages
    Skills,
    /// Rendered preview and export
    Preview,
}

impl WizardStep {
    /// All steps in wizard order.
    pub const ALL: [Self; 6] = [
        Self::Template,
        Self::Personal,
        Self::Experience,
        Self::Education,
        Self::Skills,
        Self::Preview,
    ];

    /// Gets the next step, or None from the last step.
    #[must_use]
    pub const fn next(&self) -> Option<Self> {
        match self {
            Self::Template => Some(Self::Personal),
            Self::Personal => Some(Self::Experience),
            Self::Experience => Some(Self::Education),
            Self::Education => Some(Self::Skills),
            Self::Skills => Some(Self::Preview),
            Self::Preview => None,
        }
    }

    /// Gets the previous step, or None from the first step.
    #[must_use]
    pub const fn previous(&self) -> Option<Self> {
        match self {
            Self::Template => None,
            Self::Personal => Some(Self::Template),
            Self::Experience => Some(Self::Personal),
            Self::Education => Some(Self::Experience),
            Self::Skills => Some(Self::Education),
            Self::Preview => Some(Self::Skills),
        }
    }

    /// Gets the step title shown in the progress indicator.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::Template => "Select Template",
            Self::Personal => "Personal Info",
            Self::Experience => "Experience",
            Self::Education => "Education",
            Self::Skills => "Skills",
            Self::Preview => "Preview",
        }
    }

    /// Position of this step in wizard order.
    #[must_use]
    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|s| s == self).unwrap_or(0)
    }
}

/// Outcome of a template selection attempt.
///
/// The premium gate is a policy decision, not an error: a denied selection
/// changes nothing, and the caller decides whether to surface a hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateSelection {
    /// Selection applied and persisted
    Applied,
    /// Premium template, non-premium session: nothing changed
    DeniedPremium,
    /// No template with that id in the catalog: nothing changed
    UnknownTemplate,
}

/// The wizard controller: step position, document, template choice.
#[derive(Debug)]
pub struct CVWizard {
    step: WizardStep,
    document: CVDocument,
    selected_template_id: String,
    catalog: TemplateCatalog,
}

impl CVWizard {
    /// Creates a wizard at the first step with the default document and
    /// the first catalog template selected.
    #[must_use]
    pub fn new(catalog: TemplateCatalog) -> Self {
        let selected_template_id = catalog.first().id.clone();
        Self {
            step: WizardStep::Template,
            document: CVDocument::default(),
            selected_template_id,
            catalog,
        }
    }

    /// Creates a wizard restored from durable storage.
    ///
    /// Reads the persisted document and template id when present;
    /// a corrupt document blob is logged and treated as absent.
    #[must_use]
    pub fn restore(catalog: TemplateCatalog, storage: &dyn Storage) -> Self {
        let mut wizard = Self::new(catalog);

        if let Some(json) = storage.get(STORAGE_KEY_CV_DATA) {
            match serde_json::from_str(&json) {
                Ok(document) => wizard.document = document,
                Err(e) => tracing::warn!("Ignoring corrupt stored CV document: {e}"),
            }
        }

        if let Some(id) = storage.get(STORAGE_KEY_SELECTED_TEMPLATE) {
            let id = id.trim().to_string();
            if !id.is_empty() {
                wizard.selected_template_id = id;
            }
        }

        wizard
    }

    /// The current wizard step.
    #[must_use]
    pub fn step(&self) -> WizardStep {
        self.step
    }

    /// The authoritative document.
    #[must_use]
    pub fn document(&self) -> &CVDocument {
        &self.document
    }

    /// The selected template id as stored (may not resolve in the catalog).
    #[must_use]
    pub fn selected_template_id(&self) -> &str {
        &self.selected_template_id
    }

    /// The selected template, falling back to the first catalog entry when
    /// the stored id does not resolve.
    #[must_use]
    pub fn selected_template(&self) -> &Template {
        self.catalog
            .get(&self.selected_template_id)
            .unwrap_or_else(|| self.catalog.first())
    }

    /// The template catalog.
    #[must_use]
    pub fn catalog(&self) -> &TemplateCatalog {
        &self.catalog
    }

    /// Advances one step; a no-op on the last step.
    pub fn go_next(&mut self) {
        if let Some(next) = self.step.next() {
            self.step = next;
        }
    }

    /// Retreats one step; a no-op on the first step.
    pub fn go_previous(&mut self) {
        if let Some(previous) = self.step.previous() {
            self.step = previous;
        }
    }

    /// Jumps directly to a step. Always allowed; no completeness check.
    pub fn select_step(&mut self, step: WizardStep) {
        self.step = step;
    }

    /// Replaces one document slice wholesale and persists the document.
    pub fn update_section(&mut self, section: CVSection, storage: &mut dyn Storage) {
        self.document.set_section(section);
        self.persist_document(storage);
    }

    /// Appends an empty experience entry, persists, returns the new id.
    pub fn add_experience(&mut self, storage: &mut dyn Storage) -> String {
        let id = self.document.add_experience();
        self.persist_document(storage);
        id
    }

    /// Removes an experience entry unless it is the last one.
    pub fn remove_experience(&mut self, id: &str, storage: &mut dyn Storage) -> bool {
        let removed = self.document.remove_experience(id);
        if removed {
            self.persist_document(storage);
        }
        removed
    }

    /// Appends an empty education entry, persists, returns the new id.
    pub fn add_education(&mut self, storage: &mut dyn Storage) -> String {
        let id = self.document.add_education();
        self.persist_document(storage);
        id
    }

    /// Removes an education entry unless it is the last one.
    pub fn remove_education(&mut self, id: &str, storage: &mut dyn Storage) -> bool {
        let removed = self.document.remove_education(id);
        if removed {
            self.persist_document(storage);
        }
        removed
    }

    /// Appends an empty skill entry, persists, returns the new id.
    pub fn add_skill(&mut self, kind: SkillKind, storage: &mut dyn Storage) -> String {
        let id = self.document.add_skill(kind);
        self.persist_document(storage);
        id
    }

    /// Removes a skill entry unless it is the last one in its list.
    pub fn remove_skill(&mut self, kind: SkillKind, id: &str, storage: &mut dyn Storage) -> bool {
        let removed = self.document.remove_skill(kind, id);
        if removed {
            self.persist_document(storage);
        }
        removed
    }

    /// Attempts to select a template.
    ///
    /// Premium templates require a premium session (`is_premium`); denied
    /// and unknown selections change neither state nor storage.
    pub fn select_template(
        &mut self,
        template_id: &str,
        is_premium: bool,
        storage: &mut dyn Storage,
    ) -> TemplateSelection {
        let Some(template) = self.catalog.get(template_id) else {
            return TemplateSelection::UnknownTemplate;
        };
        if template.is_premium && !is_premium {
            return TemplateSelection::DeniedPremium;
        }

        self.selected_template_id = template_id.to_string();
        if let Err(e) = storage.set(STORAGE_KEY_SELECTED_TEMPLATE, template_id) {
            tracing::warn!("Failed to persist template selection: {e}");
        }
        TemplateSelection::Applied
    }

    fn persist_document(&self, storage: &mut dyn Storage) {
        match serde_json::to_string(&self.document) {
            Ok(json) => {
                if let Err(e) = storage.set(STORAGE_KEY_CV_DATA, &json) {
                    tracing::warn!("Failed to persist CV document: {e}");
                }
            }
            Err(e) => tracing::warn!("Failed to serialize CV document: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PersonalInfo;
    use crate::storage::MemoryStorage;

    fn wizard() -> CVWizard {
        CVWizard::new(TemplateCatalog::load().unwrap())
    }

    #[test]
    fn test_step_order() {
        assert_eq!(WizardStep::Template.next(), Some(WizardStep::Personal));
        assert_eq!(WizardStep::Preview.next(), None);
        assert_eq!(WizardStep::Template.previous(), None);
        assert_eq!(WizardStep::Preview.previous(), Some(WizardStep::Skills));
        assert_eq!(WizardStep::Template.index(), 0);
        assert_eq!(WizardStep::Preview.index(), 5);
    }

    #[test]
    fn test_navigation_clamps_at_ends() {
        let mut w = wizard();
        assert_eq!(w.step(), WizardStep::Template);

        // Retreat from the first step is a no-op
        w.go_previous();
        assert_eq!(w.step(), WizardStep::Template);

        // Walk to the end
        for _ in 0..WizardStep::ALL.len() {
            w.go_next();
        }
        assert_eq!(w.step(), WizardStep::Preview);

        // Advance from the last step is a no-op
        w.go_next();
        assert_eq!(w.step(), WizardStep::Preview);
    }

    #[test]
    fn test_select_step_jumps_anywhere() {
        let mut w = wizard();
        w.select_step(WizardStep::Skills);
        assert_eq!(w.step(), WizardStep::Skills);
        w.select_step(WizardStep::Template);
        assert_eq!(w.step(), WizardStep::Template);
    }

    #[test]
    fn test_update_section_persists_whole_document() {
        let mut storage = MemoryStorage::new();
        let mut w = wizard();

        let mut personal = PersonalInfo::default();
        personal.first_name = "Ada".to_string();
        w.update_section(CVSection::Personal(personal), &mut storage);

        let stored = storage.get(STORAGE_KEY_CV_DATA).unwrap();
        assert!(stored.contains("\"firstName\":\"Ada\""));
        // The whole document is serialized, not just the slice
        assert!(stored.contains("\"education\""));
    }

    #[test]
    fn test_premium_gate_denies_free_session() {
        let mut storage = MemoryStorage::new();
        let mut w = wizard();
        let before = w.selected_template_id().to_string();

        let result = w.select_template("creative", false, &mut storage);
        assert_eq!(result, TemplateSelection::DeniedPremium);
        assert_eq!(w.selected_template_id(), before);
        assert!(storage.get(STORAGE_KEY_SELECTED_TEMPLATE).is_none());
    }

    #[test]
    fn test_premium_gate_allows_premium_session() {
        let mut storage = MemoryStorage::new();
        let mut w = wizard();

        let result = w.select_template("creative", true, &mut storage);
        assert_eq!(result, TemplateSelection::Applied);
        assert_eq!(w.selected_template_id(), "creative");
        assert_eq!(
            storage.get(STORAGE_KEY_SELECTED_TEMPLATE).as_deref(),
            Some("creative")
        );
    }

    #[test]
    fn test_free_template_needs_no_session() {
        let mut storage = MemoryStorage::new();
        let mut w = wizard();
        assert_eq!(
            w.select_template("minimal", false, &mut storage),
            TemplateSelection::Applied
        );
        assert_eq!(w.selected_template().id, "minimal");
    }

    #[test]
    fn test_unknown_template_changes_nothing() {
        let mut storage = MemoryStorage::new();
        let mut w = wizard();
        let before = w.selected_template_id().to_string();
        assert_eq!(
            w.select_template("glitter", true, &mut storage),
            TemplateSelection::UnknownTemplate
        );
        assert_eq!(w.selected_template_id(), before);
    }

    #[test]
    fn test_persist_restore_round_trip() {
        let mut storage = MemoryStorage::new();
        let mut w = wizard();

        let mut personal = PersonalInfo::default();
        personal.first_name = "Ada".to_string();
        personal.last_name = "Lovelace".to_string();
        w.update_section(CVSection::Personal(personal), &mut storage);
        w.add_experience(&mut storage);
        w.select_template("professional", false, &mut storage);

        let restored = CVWizard::restore(TemplateCatalog::load().unwrap(), &storage);
        assert_eq!(restored.document(), w.document());
        assert_eq!(restored.selected_template_id(), "professional");
        // Restore always lands on the first step
        assert_eq!(restored.step(), WizardStep::Template);
    }

    #[test]
    fn test_restore_with_empty_storage_uses_defaults() {
        let storage = MemoryStorage::new();
        let w = CVWizard::restore(TemplateCatalog::load().unwrap(), &storage);
        assert_eq!(w.document(), &CVDocument::default());
        assert_eq!(w.selected_template_id(), "modern");
    }

    #[test]
    fn test_restore_ignores_corrupt_document() {
        let mut storage = MemoryStorage::new();
        storage.set(STORAGE_KEY_CV_DATA, "{broken").unwrap();
        storage.set(STORAGE_KEY_SELECTED_TEMPLATE, "minimal").unwrap();

        let w = CVWizard::restore(TemplateCatalog::load().unwrap(), &storage);
        assert_eq!(w.document(), &CVDocument::default());
        // The template id is stored as a raw string and survives
        assert_eq!(w.selected_template_id(), "minimal");
    }

    #[test]
    fn test_selected_template_falls_back_to_first() {
        let mut storage = MemoryStorage::new();
        storage
            .set(STORAGE_KEY_SELECTED_TEMPLATE, "discontinued")
            .unwrap();
        let w = CVWizard::restore(TemplateCatalog::load().unwrap(), &storage);
        assert_eq!(w.selected_template_id(), "discontinued");
        assert_eq!(w.selected_template().id, "modern");
    }

    #[test]
    fn test_entry_ops_persist() {
        let mut storage = MemoryStorage::new();
        let mut w = wizard();

        let id = w.add_education(&mut storage);
        assert!(storage.get(STORAGE_KEY_CV_DATA).unwrap().contains(&id));

        assert!(w.remove_education(&id, &mut storage));
        assert!(!storage.get(STORAGE_KEY_CV_DATA).unwrap().contains(&id));

        // Refusing the removal leaves storage as-is
        let last = w.document().education[0].id.clone();
        assert!(!w.remove_education(&last, &mut storage));
        assert_eq!(w.document().education.len(), 1);
    }
}
