//! CV document data structures.
//!
//! The serialized form is camelCase JSON, matching the blob layout the
//! product has always written under the `cvData` storage key. Every
//! repeated-entry list carries at least one element at all times: the
//! default document seeds each list with a single all-empty placeholder
//! row, and removal refuses to empty a list.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Personal details section of a CV.
///
/// All fields are free-form strings. First/last name, email and title are
/// marked required in the form UI, but nothing here enforces that; the
/// markers are advisory.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfo {
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// Contact email
    pub email: String,
    /// Contact phone number
    pub phone: String,
    /// Postal address, single line
    pub address: String,
    /// Professional title (e.g., "Frontend Developer")
    pub title: String,
    /// Professional summary paragraph
    pub summary: String,
    /// LinkedIn profile URL
    pub linkedin: String,
    /// Personal website URL
    pub website: String,
}

/// One work experience entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceEntry {
    /// Stable opaque id, unique within the list
    pub id: String,
    /// Employer name
    pub company: String,
    /// Role held
    pub position: String,
    /// Start date, free-form (ISO `YYYY-MM` preferred)
    pub start_date: String,
    /// End date, free-form; ignored while `current` is set
    pub end_date: String,
    /// Whether this is the current position ("Present" in the preview)
    pub current: bool,
    /// Role description
    pub description: String,
}

impl ExperienceEntry {
    /// Creates an all-empty entry with a fresh unique id.
    #[must_use]
    pub fn new() -> Self {
        Self::with_id(Uuid::new_v4().to_string())
    }

    fn with_id(id: String) -> Self {
        Self {
            id,
            company: String::new(),
            position: String::new(),
            start_date: String::new(),
            end_date: String::new(),
            current: false,
            description: String::new(),
        }
    }
}

impl Default for ExperienceEntry {
    fn default() -> Self {
        Self::new()
    }
}

/// One education entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationEntry {
    /// Stable opaque id, unique within the list
    pub id: String,
    /// School or university name
    pub institution: String,
    /// Degree obtained (e.g., "BSc")
    pub degree: String,
    /// Field of study
    pub field: String,
    /// Start date, free-form
    pub start_date: String,
    /// End date, free-form
    pub end_date: String,
    /// Notes (honors, coursework, thesis)
    pub description: String,
}

impl EducationEntry {
    /// Creates an all-empty entry with a fresh unique id.
    #[must_use]
    pub fn new() -> Self {
        Self::with_id(Uuid::new_v4().to_string())
    }

    fn with_id(id: String) -> Self {
        Self {
            id,
            institution: String::new(),
            degree: String::new(),
            field: String::new(),
            start_date: String::new(),
            end_date: String::new(),
            description: String::new(),
        }
    }
}

impl Default for EducationEntry {
    fn default() -> Self {
        Self::new()
    }
}

/// Skill proficiency bounds.
pub const SKILL_LEVEL_MIN: u8 = 1;
/// Skill proficiency bounds.
pub const SKILL_LEVEL_MAX: u8 = 5;

/// One skill entry (professional skill or language).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillEntry {
    /// Stable opaque id, unique within the list
    pub id: String,
    /// Skill or language name
    pub name: String,
    /// Proficiency from 1 (basic) to 5 (expert)
    pub level: u8,
}

impl SkillEntry {
    /// Creates an empty-named entry with a fresh unique id at level 3.
    #[must_use]
    pub fn new() -> Self {
        Self::with_id(Uuid::new_v4().to_string())
    }

    fn with_id(id: String) -> Self {
        Self {
            id,
            name: String::new(),
            level: 3,
        }
    }

    /// Sets the level, clamped to the valid 1..=5 range.
    pub fn set_level(&mut self, level: u8) {
        self.level = level.clamp(SKILL_LEVEL_MIN, SKILL_LEVEL_MAX);
    }
}

impl Default for SkillEntry {
    fn default() -> Self {
        Self::new()
    }
}

/// Which of the two skill lists an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkillKind {
    /// Professional skills (rendered in the template's primary color)
    Professional,
    /// Languages (rendered in the template's secondary color)
    Languages,
}

/// The two skill lists of a CV.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skills {
    /// Professional skills
    pub professional: Vec<SkillEntry>,
    /// Spoken/written languages
    pub languages: Vec<SkillEntry>,
}

impl Default for Skills {
    fn default() -> Self {
        Self {
            professional: vec![SkillEntry::with_id("1".to_string())],
            languages: vec![SkillEntry::with_id("1".to_string())],
        }
    }
}

/// A full replacement value for one top-level document slice.
///
/// Step forms hand back their whole slice on every change; the wizard
/// controller swaps it in wholesale and persists the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CVSection {
    /// Replacement personal details
    Personal(PersonalInfo),
    /// Replacement experience list
    Experience(Vec<ExperienceEntry>),
    /// Replacement education list
    Education(Vec<EducationEntry>),
    /// Replacement skills (both lists)
    Skills(Skills),
}

/// The structured résumé data edited across the wizard steps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CVDocument {
    /// Personal details
    pub personal: PersonalInfo,
    /// Work experience, newest first by convention
    pub experience: Vec<ExperienceEntry>,
    /// Education history
    pub education: Vec<EducationEntry>,
    /// Skill lists
    pub skills: Skills,
}

impl Default for CVDocument {
    fn default() -> Self {
        Self {
            personal: PersonalInfo::default(),
            experience: vec![ExperienceEntry::with_id("1".to_string())],
            education: vec![EducationEntry::with_id("1".to_string())],
            skills: Skills::default(),
        }
    }
}

impl CVDocument {
    /// Creates the all-empty default document (one placeholder row per list).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces one top-level slice wholesale.
    pub fn set_section(&mut self, section: CVSection) {
        match section {
            CVSection::Personal(personal) => self.personal = personal,
            CVSection::Experience(experience) => self.experience = experience,
            CVSection::Education(education) => self.education = education,
            CVSection::Skills(skills) => self.skills = skills,
        }
    }

    /// Appends a fresh all-empty experience entry and returns its id.
    pub fn add_experience(&mut self) -> String {
        let entry = ExperienceEntry::new();
        let id = entry.id.clone();
        self.experience.push(entry);
        id
    }

    /// Removes the experience entry with `id`.
    ///
    /// Returns false (and changes nothing) when the list has exactly one
    /// element or the id is unknown.
    pub fn remove_experience(&mut self, id: &str) -> bool {
        remove_entry(&mut self.experience, |e| e.id == id)
    }

    /// Appends a fresh all-empty education entry and returns its id.
    pub fn add_education(&mut self) -> String {
        let entry = EducationEntry::new();
        let id = entry.id.clone();
        self.education.push(entry);
        id
    }

    /// Removes the education entry with `id`, refusing to empty the list.
    pub fn remove_education(&mut self, id: &str) -> bool {
        remove_entry(&mut self.education, |e| e.id == id)
    }

    /// Appends a fresh skill entry to the given list and returns its id.
    pub fn add_skill(&mut self, kind: SkillKind) -> String {
        let entry = SkillEntry::new();
        let id = entry.id.clone();
        self.skill_list_mut(kind).push(entry);
        id
    }

    /// Removes the skill entry with `id` from the given list, refusing to
    /// empty it.
    pub fn remove_skill(&mut self, kind: SkillKind, id: &str) -> bool {
        remove_entry(self.skill_list_mut(kind), |e| e.id == id)
    }

    fn skill_list_mut(&mut self, kind: SkillKind) -> &mut Vec<SkillEntry> {
        match kind {
            SkillKind::Professional => &mut self.skills.professional,
            SkillKind::Languages => &mut self.skills.languages,
        }
    }

    /// Validates structural invariants of the document.
    ///
    /// Checks:
    /// - every repeated-entry list has at least one element
    /// - entry ids are non-empty and unique within their list
    /// - skill levels are within 1..=5
    pub fn validate(&self) -> Result<()> {
        if self.experience.is_empty() {
            anyhow::bail!("Experience list must not be empty");
        }
        if self.education.is_empty() {
            anyhow::bail!("Education list must not be empty");
        }
        if self.skills.professional.is_empty() {
            anyhow::bail!("Professional skills list must not be empty");
        }
        if self.skills.languages.is_empty() {
            anyhow::bail!("Languages list must not be empty");
        }

        check_unique_ids("experience", self.experience.iter().map(|e| e.id.as_str()))?;
        check_unique_ids("education", self.education.iter().map(|e| e.id.as_str()))?;
        check_unique_ids(
            "professional skills",
            self.skills.professional.iter().map(|e| e.id.as_str()),
        )?;
        check_unique_ids(
            "languages",
            self.skills.languages.iter().map(|e| e.id.as_str()),
        )?;

        for skill in self.skills.professional.iter().chain(&self.skills.languages) {
            if !(SKILL_LEVEL_MIN..=SKILL_LEVEL_MAX).contains(&skill.level) {
                anyhow::bail!(
                    "Skill level must be between {SKILL_LEVEL_MIN} and {SKILL_LEVEL_MAX}, got {} for '{}'",
                    skill.level,
                    skill.name
                );
            }
        }

        Ok(())
    }

    /// Profile completeness as a rounded percentage.
    ///
    /// Counts six personal fields, four fields per experience entry
    /// (company, position, start date, description), four per education
    /// entry (institution, degree, field, start date) and the name of each
    /// professional skill.
    #[must_use]
    pub fn completeness_percent(&self) -> u8 {
        let mut total: u32 = 0;
        let mut completed: u32 = 0;

        let personal_fields = [
            &self.personal.first_name,
            &self.personal.last_name,
            &self.personal.email,
            &self.personal.phone,
            &self.personal.title,
            &self.personal.summary,
        ];
        for field in personal_fields {
            total += 1;
            if !field.is_empty() {
                completed += 1;
            }
        }

        for exp in &self.experience {
            for field in [&exp.company, &exp.position, &exp.start_date, &exp.description] {
                total += 1;
                if !field.is_empty() {
                    completed += 1;
                }
            }
        }

        for edu in &self.education {
            for field in [&edu.institution, &edu.degree, &edu.field, &edu.start_date] {
                total += 1;
                if !field.is_empty() {
                    completed += 1;
                }
            }
        }

        for skill in &self.skills.professional {
            total += 1;
            if !skill.name.is_empty() {
                completed += 1;
            }
        }

        if total == 0 {
            return 0;
        }
        ((f64::from(completed) / f64::from(total)) * 100.0).round() as u8
    }
}

/// Removes the first entry matching `matches`, refusing to empty the list.
fn remove_entry<T>(entries: &mut Vec<T>, matches: impl Fn(&T) -> bool) -> bool {
    if entries.len() <= 1 {
        return false;
    }
    let Some(index) = entries.iter().position(matches) else {
        return false;
    };
    entries.remove(index);
    true
}

fn check_unique_ids<'a>(list_name: &str, ids: impl Iterator<Item = &'a str>) -> Result<()> {
    let mut seen = std::collections::HashSet::new();
    for id in ids {
        if id.is_empty() {
            anyhow::bail!("Entry id in {list_name} must not be empty");
        }
        if !seen.insert(id) {
            anyhow::bail!("Duplicate entry id '{id}' in {list_name}");
        }
    }
    Ok(())
}
