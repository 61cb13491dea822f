//! CV preview rendering.
//!
//! Pure projection from (template, document) to a visual layout tree. The
//! tree is consumed by the terminal preview widget and replayed by the PDF
//! export paint pass; nothing here touches a terminal or a file.
//!
//! Section gating follows the product's long-standing rule: a section is
//! included only when its data "looks" non-empty, and the look only
//! inspects the first entry of a list (an experience list whose first
//! entry has no company renders nothing, populated later entries
//! notwithstanding).

use crate::models::CVDocument;
use crate::templates::{Template, TemplateLayout};
use chrono::NaiveDate;

/// Heading of the summary section.
pub const HEADING_SUMMARY: &str = "Professional Summary";
/// Heading of the experience section.
pub const HEADING_EXPERIENCE: &str = "Work Experience";
/// Heading of the education section.
pub const HEADING_EDUCATION: &str = "Education";
/// Heading of the skills section.
pub const HEADING_SKILLS: &str = "Skills";

/// Visual treatment of a band's background.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BandStyle {
    /// No background
    Plain,
    /// Primary-to-secondary accent band, light text (modern header)
    Accent,
    /// Dark band, light text (executive header)
    Dark,
    /// Plain with a rule under the band (minimal header)
    Underlined,
}

/// Name/title/contact block at the top of the CV.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderBlock {
    /// Full name line
    pub name: String,
    /// Professional title line
    pub title: String,
    /// Contact items (email, phone, address), empty ones omitted
    pub contact: Vec<String>,
    /// Whether the block is centered (modern and executive layouts)
    pub centered: bool,
}

/// Summary section content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryBlock {
    /// Summary paragraph
    pub text: String,
}

/// One rendered experience item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExperienceItem {
    /// Role held (bold line)
    pub position: String,
    /// Employer line
    pub company: String,
    /// Formatted "{start} - {end|Present}" range
    pub date_range: String,
    /// Description, empty when none
    pub description: String,
}

/// Experience section content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExperienceSection {
    /// All entries, in document order
    pub items: Vec<ExperienceItem>,
}

/// One rendered education item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EducationItem {
    /// "{degree} in {field}" line
    pub qualification: String,
    /// Institution line
    pub institution: String,
    /// Formatted date range
    pub date_range: String,
    /// Description, empty when none
    pub description: String,
}

/// Education section content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EducationSection {
    /// All entries, in document order
    pub items: Vec<EducationItem>,
}

/// One rendered skill with its proficiency bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillItem {
    /// Skill or language name
    pub name: String,
    /// Proficiency 1..=5
    pub level: u8,
}

impl SkillItem {
    /// Filled fraction of the proficiency bar (level/5).
    #[must_use]
    pub fn fill_fraction(&self) -> f64 {
        f64::from(self.level) / 5.0
    }
}

/// Skills section content: professional skills and languages side by side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillsSection {
    /// Professional skills (bars in the template's primary color)
    pub professional: Vec<SkillItem>,
    /// Languages (bars in the template's secondary color)
    pub languages: Vec<SkillItem>,
}

/// One content section of the rendered CV.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Section {
    /// Name/title/contact block
    Header(HeaderBlock),
    /// Professional summary
    Summary(SummaryBlock),
    /// Work experience
    Experience(ExperienceSection),
    /// Education
    Education(EducationSection),
    /// Skills and languages
    Skills(SkillsSection),
}

/// A vertical column of sections within a band.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// Relative width weight (sidebar column 1, main column 2)
    pub weight: u8,
    /// Whether the column background is tinted (sidebar)
    pub tinted: bool,
    /// Sections, top to bottom
    pub sections: Vec<Section>,
}

impl Column {
    fn new(weight: u8, sections: Vec<Section>) -> Self {
        Self {
            weight,
            tinted: false,
            sections,
        }
    }

    fn tinted(weight: u8, sections: Vec<Section>) -> Self {
        Self {
            weight,
            tinted: true,
            sections,
        }
    }
}

/// A full-width horizontal band of the rendered CV.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Band {
    /// Background treatment
    pub style: BandStyle,
    /// Side-by-side columns (one for single-column bands)
    pub columns: Vec<Column>,
}

/// The rendered CV: template identity plus stacked bands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewLayout {
    /// Id of the template that produced this layout
    pub template_id: String,
    /// Font family token
    pub font_family: String,
    /// Accent color for headings and professional skill bars
    pub primary_color: String,
    /// Secondary accent for language skill bars
    pub secondary_color: String,
    /// Bands, top to bottom
    pub bands: Vec<Band>,
}

/// Renders `document` with `template` into a layout tree.
#[must_use]
pub fn render(template: &Template, document: &CVDocument) -> PreviewLayout {
    let centered = matches!(
        template.layout_kind(),
        TemplateLayout::Modern | TemplateLayout::Executive
    );
    let header = Section::Header(build_header(document, centered));
    let summary = build_summary(document).map(Section::Summary);
    let experience = build_experience(document).map(Section::Experience);
    let education = build_education(document).map(Section::Education);
    let skills = build_skills(document).map(Section::Skills);

    let bands = match template.layout_kind() {
        TemplateLayout::Sidebar => {
            let mut side = vec![header];
            side.extend(skills);
            let main: Vec<Section> = [summary, experience, education]
                .into_iter()
                .flatten()
                .collect();
            vec![Band {
                style: BandStyle::Plain,
                columns: vec![Column::tinted(1, side), Column::new(2, main)],
            }]
        }
        TemplateLayout::Modern => {
            let left: Vec<Section> = [summary, experience].into_iter().flatten().collect();
            let right: Vec<Section> = [education, skills].into_iter().flatten().collect();
            vec![
                Band {
                    style: BandStyle::Accent,
                    columns: vec![Column::new(1, vec![header])],
                },
                Band {
                    style: BandStyle::Plain,
                    columns: vec![Column::new(1, left), Column::new(1, right)],
                },
            ]
        }
        TemplateLayout::Executive => {
            // Present sections flow row-major into a two-column grid
            let present: Vec<Section> = [summary, experience, education, skills]
                .into_iter()
                .flatten()
                .collect();
            let mut left = Vec::new();
            let mut right = Vec::new();
            for (i, section) in present.into_iter().enumerate() {
                if i % 2 == 0 {
                    left.push(section);
                } else {
                    right.push(section);
                }
            }
            vec![
                Band {
                    style: BandStyle::Dark,
                    columns: vec![Column::new(1, vec![header])],
                },
                Band {
                    style: BandStyle::Plain,
                    columns: vec![Column::new(1, left), Column::new(1, right)],
                },
            ]
        }
        TemplateLayout::Minimal | TemplateLayout::Classic => {
            let header_style = if template.layout_kind() == TemplateLayout::Minimal {
                BandStyle::Underlined
            } else {
                BandStyle::Plain
            };
            let main: Vec<Section> = [summary, experience, education, skills]
                .into_iter()
                .flatten()
                .collect();
            vec![
                Band {
                    style: header_style,
                    columns: vec![Column::new(1, vec![header])],
                },
                Band {
                    style: BandStyle::Plain,
                    columns: vec![Column::new(1, main)],
                },
            ]
        }
    };

    PreviewLayout {
        template_id: template.id.clone(),
        font_family: template.font_family.clone(),
        primary_color: template.primary_color.clone(),
        secondary_color: template.secondary_color.clone(),
        bands,
    }
}

fn build_header(document: &CVDocument, centered: bool) -> HeaderBlock {
    let personal = &document.personal;
    let name = format!("{} {}", personal.first_name, personal.last_name)
        .trim()
        .to_string();
    let contact = [&personal.email, &personal.phone, &personal.address]
        .into_iter()
        .filter(|v| !v.is_empty())
        .cloned()
        .collect();

    HeaderBlock {
        name,
        title: personal.title.clone(),
        contact,
        centered,
    }
}

fn build_summary(document: &CVDocument) -> Option<SummaryBlock> {
    if document.personal.summary.is_empty() {
        return None;
    }
    Some(SummaryBlock {
        text: document.personal.summary.clone(),
    })
}

fn build_experience(document: &CVDocument) -> Option<ExperienceSection> {
    // First-entry heuristic: only entry 0's company decides presence
    let first = document.experience.first()?;
    if first.company.is_empty() {
        return None;
    }

    let items = document
        .experience
        .iter()
        .map(|exp| {
            let end = if exp.current {
                "Present".to_string()
            } else {
                format_date(&exp.end_date)
            };
            ExperienceItem {
                position: exp.position.clone(),
                company: exp.company.clone(),
                date_range: format!("{} - {}", format_date(&exp.start_date), end),
                description: exp.description.clone(),
            }
        })
        .collect();

    Some(ExperienceSection { items })
}

fn build_education(document: &CVDocument) -> Option<EducationSection> {
    let first = document.education.first()?;
    if first.institution.is_empty() {
        return None;
    }

    let items = document
        .education
        .iter()
        .map(|edu| EducationItem {
            qualification: format!("{} in {}", edu.degree, edu.field),
            institution: edu.institution.clone(),
            date_range: format!(
                "{} - {}",
                format_date(&edu.start_date),
                format_date(&edu.end_date)
            ),
            description: edu.description.clone(),
        })
        .collect();

    Some(EducationSection { items })
}

fn build_skills(document: &CVDocument) -> Option<SkillsSection> {
    // Gating only consults the first professional skill's name
    let first = document.skills.professional.first()?;
    if first.name.is_empty() {
        return None;
    }

    let to_items = |entries: &[crate::models::SkillEntry]| {
        entries
            .iter()
            .map(|s| SkillItem {
                name: s.name.clone(),
                level: s.level,
            })
            .collect::<Vec<_>>()
    };

    Some(SkillsSection {
        professional: to_items(&document.skills.professional),
        languages: to_items(&document.skills.languages),
    })
}

/// Formats a stored date string as "{short month} {full year}" ("Jan 2023").
///
/// Accepts `YYYY-MM` and `YYYY-MM-DD`; anything else (including the empty
/// string) passes through verbatim.
#[must_use]
pub fn format_date(value: &str) -> String {
    if value.is_empty() {
        return String::new();
    }
    let parsed = NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(&format!("{value}-01"), "%Y-%m-%d"));
    match parsed {
        Ok(date) => date.format("%b %Y").to_string(),
        Err(_) => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CVDocument;
    use crate::templates::TemplateCatalog;

    fn template(id: &str) -> Template {
        TemplateCatalog::load().unwrap().get(id).unwrap().clone()
    }

    fn filled_document() -> CVDocument {
        let mut doc = CVDocument::default();
        doc.personal.first_name = "Ada".to_string();
        doc.personal.last_name = "Lovelace".to_string();
        doc.personal.title = "Analyst".to_string();
        doc.personal.email = "ada@example.com".to_string();
        doc.personal.summary = "Pioneer of computing.".to_string();
        doc.experience[0].company = "Analytical Engines Ltd".to_string();
        doc.experience[0].position = "Programmer".to_string();
        doc.experience[0].start_date = "1842-06".to_string();
        doc.experience[0].current = true;
        doc.education[0].institution = "Home Tutoring".to_string();
        doc.education[0].degree = "BSc".to_string();
        doc.education[0].field = "Mathematics".to_string();
        doc.skills.professional[0].name = "Mathematics".to_string();
        doc.skills.professional[0].level = 5;
        doc.skills.languages[0].name = "English".to_string();
        doc
    }

    fn sections_of(layout: &PreviewLayout) -> Vec<&Section> {
        layout
            .bands
            .iter()
            .flat_map(|b| &b.columns)
            .flat_map(|c| &c.sections)
            .collect()
    }

    fn has_heading(layout: &PreviewLayout, heading: &str) -> bool {
        sections_of(layout).iter().any(|s| match s {
            Section::Summary(_) => heading == HEADING_SUMMARY,
            Section::Experience(_) => heading == HEADING_EXPERIENCE,
            Section::Education(_) => heading == HEADING_EDUCATION,
            Section::Skills(_) => heading == HEADING_SKILLS,
            Section::Header(_) => false,
        })
    }

    #[test]
    fn test_sidebar_layout_structure() {
        let layout = render(&template("modern"), &filled_document());
        assert_eq!(layout.bands.len(), 1);
        let band = &layout.bands[0];
        assert_eq!(band.columns.len(), 2);
        assert!(band.columns[0].tinted);
        assert_eq!(band.columns[0].weight, 1);
        assert_eq!(band.columns[1].weight, 2);

        // Header and skills live in the sidebar
        assert!(matches!(band.columns[0].sections[0], Section::Header(_)));
        assert!(matches!(band.columns[0].sections[1], Section::Skills(_)));
        // Summary, experience, education in the main column
        assert_eq!(band.columns[1].sections.len(), 3);
    }

    #[test]
    fn test_modern_layout_has_accent_header_band() {
        let layout = render(&template("creative"), &filled_document());
        assert_eq!(layout.bands.len(), 2);
        assert_eq!(layout.bands[0].style, BandStyle::Accent);

        let Section::Header(header) = &layout.bands[0].columns[0].sections[0] else {
            panic!("expected header in first band");
        };
        assert!(header.centered);

        // Two equal columns: summary+experience left, education+skills right
        let body = &layout.bands[1];
        assert_eq!(body.columns.len(), 2);
        assert!(matches!(body.columns[0].sections[0], Section::Summary(_)));
        assert!(matches!(
            body.columns[0].sections[1],
            Section::Experience(_)
        ));
        assert!(matches!(body.columns[1].sections[0], Section::Education(_)));
        assert!(matches!(body.columns[1].sections[1], Section::Skills(_)));
    }

    #[test]
    fn test_executive_sections_flow_row_major() {
        let layout = render(&template("executive"), &filled_document());
        assert_eq!(layout.bands[0].style, BandStyle::Dark);

        let body = &layout.bands[1];
        // Row-major flow: summary/education left, experience/skills right
        assert!(matches!(body.columns[0].sections[0], Section::Summary(_)));
        assert!(matches!(body.columns[0].sections[1], Section::Education(_)));
        assert!(matches!(
            body.columns[1].sections[0],
            Section::Experience(_)
        ));
        assert!(matches!(body.columns[1].sections[1], Section::Skills(_)));
    }

    #[test]
    fn test_classic_is_single_column() {
        let layout = render(&template("professional"), &filled_document());
        assert_eq!(layout.bands.len(), 2);
        assert_eq!(layout.bands[0].style, BandStyle::Plain);
        assert_eq!(layout.bands[1].columns.len(), 1);
        assert_eq!(layout.bands[1].columns[0].sections.len(), 4);
    }

    #[test]
    fn test_minimal_header_band_is_underlined() {
        let layout = render(&template("minimal"), &filled_document());
        assert_eq!(layout.bands[0].style, BandStyle::Underlined);
    }

    #[test]
    fn test_empty_summary_omits_section() {
        let mut doc = filled_document();
        doc.personal.summary = String::new();
        let layout = render(&template("professional"), &doc);
        assert!(!has_heading(&layout, HEADING_SUMMARY));
        assert!(has_heading(&layout, HEADING_EXPERIENCE));
    }

    #[test]
    fn test_first_entry_heuristic_gates_experience() {
        let mut doc = filled_document();
        // Clear the first entry's company but add a fully populated second
        doc.experience[0].company = String::new();
        let mut populated = crate::models::ExperienceEntry::new();
        populated.company = "Babbage & Co".to_string();
        populated.position = "Engineer".to_string();
        doc.experience.push(populated);

        let layout = render(&template("professional"), &doc);
        assert!(!has_heading(&layout, HEADING_EXPERIENCE));
    }

    #[test]
    fn test_experience_renders_all_entries_when_gated_on() {
        let mut doc = filled_document();
        let mut second = crate::models::ExperienceEntry::new();
        second.company = "Babbage & Co".to_string();
        doc.experience.push(second);

        let layout = render(&template("professional"), &doc);
        let sections = sections_of(&layout);
        let exp = sections
            .iter()
            .find_map(|s| match s {
                Section::Experience(e) => Some(e),
                _ => None,
            })
            .unwrap();
        assert_eq!(exp.items.len(), 2);
        assert_eq!(exp.items[1].company, "Babbage & Co");
    }

    #[test]
    fn test_skills_gated_on_first_professional_name() {
        let mut doc = filled_document();
        doc.skills.professional[0].name = String::new();
        // A named language alone does not bring the section back
        doc.skills.languages[0].name = "French".to_string();
        let layout = render(&template("professional"), &doc);
        assert!(!has_heading(&layout, HEADING_SKILLS));
    }

    #[test]
    fn test_skill_bar_fraction_is_linear_in_level() {
        let item = SkillItem {
            name: "Rust".to_string(),
            level: 1,
        };
        assert!((item.fill_fraction() - 0.2).abs() < f64::EPSILON);

        let item = SkillItem {
            name: "Rust".to_string(),
            level: 5,
        };
        assert!((item.fill_fraction() - 1.0).abs() < f64::EPSILON);

        // Monotonic across the range
        let fractions: Vec<f64> = (1..=5)
            .map(|level| {
                SkillItem {
                    name: String::new(),
                    level,
                }
                .fill_fraction()
            })
            .collect();
        assert!(fractions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_current_position_renders_present() {
        let layout = render(&template("professional"), &filled_document());
        let sections = sections_of(&layout);
        let exp = sections
            .iter()
            .find_map(|s| match s {
                Section::Experience(e) => Some(e),
                _ => None,
            })
            .unwrap();
        assert_eq!(exp.items[0].date_range, "Jun 1842 - Present");
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2023-01"), "Jan 2023");
        assert_eq!(format_date("2023-12-15"), "Dec 2023");
        assert_eq!(format_date(""), "");
        // Unparseable values pass through
        assert_eq!(format_date("next spring"), "next spring");
    }

    #[test]
    fn test_header_contact_omits_empty_fields() {
        let mut doc = filled_document();
        doc.personal.phone = String::new();
        doc.personal.address = "12 St James's Square".to_string();
        let layout = render(&template("professional"), &doc);
        let Section::Header(header) = &layout.bands[0].columns[0].sections[0] else {
            panic!("expected header");
        };
        assert_eq!(header.name, "Ada Lovelace");
        assert_eq!(
            header.contact,
            vec!["ada@example.com".to_string(), "12 St James's Square".to_string()]
        );
        assert!(!header.centered);
    }

    #[test]
    fn test_education_qualification_line() {
        let layout = render(&template("professional"), &filled_document());
        let sections = sections_of(&layout);
        let edu = sections
            .iter()
            .find_map(|s| match s {
                Section::Education(e) => Some(e),
                _ => None,
            })
            .unwrap();
        assert_eq!(edu.items[0].qualification, "BSc in Mathematics");
    }
}
