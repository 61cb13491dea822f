//! Keybinding registry backing the status bar and the help overlay.
//!
//! All bindings live in one embedded TOML file, keyed by UI context. The
//! status bar and the overlay both read from here, so the hints a user sees
//! at the bottom of the screen can never drift from the full help text.

use serde::Deserialize;
use std::collections::HashMap;

const HELP_TOML: &str = include_str!("../data/help.toml");

/// One key (or key group) bound to an action within a context.
#[derive(Debug, Clone, Deserialize)]
pub struct KeyBinding {
    /// Primary key labels, e.g. `["Enter"]` or `["j", "3"]`
    pub keys: Vec<String>,
    /// Alternative key labels shown in parentheses in the overlay
    #[serde(default)]
    pub alt_keys: Vec<String>,
    /// Full description shown in the overlay
    pub action: String,
    /// Compact label for the status bar; falls back to `action`
    pub hint: Option<String>,
    /// Sort key, lower sorts first
    #[serde(default = "default_priority")]
    pub priority: u32,
}

const fn default_priority() -> u32 {
    50
}

/// A UI context (screen, popup, or editing mode) and its bindings.
#[derive(Debug, Clone, Deserialize)]
pub struct HelpContext {
    /// Display name, e.g. "Job Search"
    pub name: String,
    /// When this context is active
    pub description: String,
    /// Bindings in file order; query methods sort by priority
    pub bindings: Vec<KeyBinding>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HelpMeta {
    pub version: String,
    pub app_name: String,
}

#[derive(Debug, Clone, Deserialize)]
struct HelpFile {
    meta: HelpMeta,
    contexts: HashMap<String, HelpContext>,
}

/// Parsed view over the embedded help file.
#[derive(Debug, Clone)]
pub struct HelpRegistry {
    meta: HelpMeta,
    contexts: HashMap<String, HelpContext>,
}

impl HelpRegistry {
    /// Parses the embedded TOML. Fails only if the embedded file is broken.
    pub fn load() -> Result<Self, toml::de::Error> {
        let file: HelpFile = toml::from_str(HELP_TOML)?;
        Ok(Self {
            meta: file.meta,
            contexts: file.contexts,
        })
    }

    #[must_use]
    pub fn app_name(&self) -> &str {
        &self.meta.app_name
    }

    /// Looks up a context by its TOML key.
    #[must_use]
    pub fn context(&self, key: &str) -> Option<&HelpContext> {
        self.contexts.get(key)
    }

    /// All bindings for a context, most important first. Unknown contexts
    /// yield an empty list.
    #[must_use]
    pub fn bindings_by_priority(&self, key: &str) -> Vec<&KeyBinding> {
        let mut bindings: Vec<&KeyBinding> = self
            .contexts
            .get(key)
            .map(|ctx| ctx.bindings.iter().collect())
            .unwrap_or_default();
        bindings.sort_by_key(|b| b.priority);
        bindings
    }

    /// The subset of a context's bindings that carry a status-bar hint,
    /// most important first.
    #[must_use]
    pub fn status_hints(&self, key: &str) -> Vec<&KeyBinding> {
        let mut bindings: Vec<&KeyBinding> = self
            .contexts
            .get(key)
            .map(|ctx| ctx.bindings.iter().filter(|b| b.hint.is_some()).collect())
            .unwrap_or_default();
        bindings.sort_by_key(|b| b.priority);
        bindings
    }

    /// Up to `max` `(key, hint)` pairs for the status bar.
    #[must_use]
    pub fn hint_pairs(&self, key: &str, max: usize) -> Vec<(String, String)> {
        self.status_hints(key)
            .into_iter()
            .take(max)
            .map(|b| {
                let label = b.keys.first().map_or("", String::as_str);
                let hint = b.hint.as_deref().unwrap_or(&b.action);
                (label.to_string(), hint.to_string())
            })
            .collect()
    }

    /// Overlay key column for a binding: `"Enter"`, `"j/3"`, or
    /// `"Up (k)"` when alternates exist.
    #[must_use]
    pub fn key_label(binding: &KeyBinding) -> String {
        let primary = binding.keys.join("/");
        if binding.alt_keys.is_empty() {
            primary
        } else {
            format!("{primary} ({})", binding.alt_keys.join("/"))
        }
    }
}

impl Default for HelpRegistry {
    fn default() -> Self {
        Self::load().expect("Failed to load embedded help.toml")
    }
}

/// TOML context keys.
#[allow(clippy::missing_docs_in_private_items)]
pub mod contexts {
    /// Dashboard (signed-in landing view)
    pub const DASHBOARD: &str = "dashboard";
    /// Sign in / register screen
    pub const AUTH: &str = "auth";
    /// Builder: template gallery step
    pub const BUILDER_TEMPLATE: &str = "builder_template";
    /// Builder: personal/experience/education form steps
    pub const BUILDER_FORM: &str = "builder_form";
    /// Builder: a text field is being edited
    pub const BUILDER_EDITING: &str = "builder_editing";
    /// Builder: skills step
    pub const BUILDER_SKILLS: &str = "builder_skills";
    /// Builder: preview step
    pub const BUILDER_PREVIEW: &str = "builder_preview";
    /// Job browser
    pub const JOBS: &str = "jobs";
    /// Job browser with the search box focused
    pub const JOBS_SEARCH: &str = "jobs_search";
    /// Premium plans screen
    pub const PLANS: &str = "plans";
    /// Assistant chat popup
    pub const CHAT: &str = "chat";
    /// Help overlay
    pub const HELP: &str = "help";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_file_parses() {
        let registry = HelpRegistry::load().expect("Failed to load help registry");
        assert_eq!(registry.app_name(), "Thynk");
    }

    #[test]
    fn test_every_context_constant_is_defined() {
        let registry = HelpRegistry::load().unwrap();
        for key in [
            contexts::DASHBOARD,
            contexts::AUTH,
            contexts::BUILDER_TEMPLATE,
            contexts::BUILDER_FORM,
            contexts::BUILDER_EDITING,
            contexts::BUILDER_SKILLS,
            contexts::BUILDER_PREVIEW,
            contexts::JOBS,
            contexts::JOBS_SEARCH,
            contexts::PLANS,
            contexts::CHAT,
            contexts::HELP,
        ] {
            assert!(registry.context(key).is_some(), "missing context {key}");
        }
    }

    #[test]
    fn test_bindings_come_back_sorted() {
        let registry = HelpRegistry::load().unwrap();
        let bindings = registry.bindings_by_priority(contexts::JOBS);
        assert!(!bindings.is_empty());
        for window in bindings.windows(2) {
            assert!(window[0].priority <= window[1].priority);
        }
    }

    #[test]
    fn test_status_hints_all_carry_hints() {
        let registry = HelpRegistry::load().unwrap();
        for binding in registry.status_hints(contexts::DASHBOARD) {
            assert!(binding.hint.is_some());
        }
    }

    #[test]
    fn test_unknown_context_yields_nothing() {
        let registry = HelpRegistry::load().unwrap();
        assert!(registry.bindings_by_priority("nonexistent").is_empty());
        assert!(registry.hint_pairs("nonexistent", 5).is_empty());
    }

    #[test]
    fn test_hint_pairs_respects_limit() {
        let registry = HelpRegistry::load().unwrap();
        let pairs = registry.hint_pairs(contexts::DASHBOARD, 3);
        assert!(!pairs.is_empty());
        assert!(pairs.len() <= 3);
    }

    #[test]
    fn test_key_label_formats_alternates() {
        let binding = KeyBinding {
            keys: vec!["Up".into()],
            alt_keys: vec!["k".into()],
            action: "Move up".into(),
            hint: None,
            priority: 10,
        };
        assert_eq!(HelpRegistry::key_label(&binding), "Up (k)");
    }
}
