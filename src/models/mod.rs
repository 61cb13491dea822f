//! Data models for CV documents and user sessions.
//!
//! This module contains the core data structures edited by the wizard and
//! consumed by the preview renderer. Models are designed to be independent
//! of UI and business logic.

pub mod cv;
pub mod user;

// Re-export all model types
pub use cv::{
    CVDocument, CVSection, EducationEntry, ExperienceEntry, PersonalInfo, SkillEntry, SkillKind,
    Skills, SKILL_LEVEL_MAX, SKILL_LEVEL_MIN,
};
pub use user::{User, UserType};
