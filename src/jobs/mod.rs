//! Job listing catalog, search and filtering.
//!
//! The listing catalog is embedded in the binary at compile time; there is
//! no server behind it. Search is a case-insensitive substring match over
//! title, company and description. No ranking of any kind is applied; the
//! catalog order is the display order.

use anyhow::{Context, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// One job listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobListing {
    /// Opaque listing id
    pub id: String,
    /// Role title
    pub title: String,
    /// Hiring company
    pub company: String,
    /// Location string as displayed (e.g., "Istanbul, Turkey", "Remote")
    pub location: String,
    /// Employment type (e.g., "Full-time")
    #[serde(rename = "type")]
    pub job_type: String,
    /// Salary as displayed (e.g., "$80,000 - $100,000")
    pub salary: String,
    /// Relative posting age as displayed (e.g., "2 days ago")
    pub posted: String,
    /// Listing description paragraph
    pub description: String,
    /// Requirement bullet points
    pub requirements: Vec<String>,
    /// Whether the listing is highlighted as featured
    pub featured: bool,
    /// Whether the current user has applied (session-local, not persisted)
    #[serde(default)]
    pub applied: bool,
}

impl JobListing {
    /// Extracts the first dollar amount from the salary string, with
    /// thousands separators stripped ("$80,000 - $100,000" → 80000).
    #[must_use]
    pub fn first_salary_amount(&self) -> Option<u32> {
        let amount_regex = Regex::new(r"\$\s*([0-9][0-9,]*)").unwrap();
        let captures = amount_regex.captures(&self.salary)?;
        captures[1].replace(',', "").parse().ok()
    }
}

/// Location filter options, in display order.
pub const LOCATIONS: [&str; 5] = [
    "All Locations",
    "Istanbul, Turkey",
    "Ankara, Turkey",
    "Izmir, Turkey",
    "Remote",
];

/// Employment type filter options, in display order.
pub const JOB_TYPES: [&str; 5] = [
    "All Types",
    "Full-time",
    "Part-time",
    "Contract",
    "Internship",
];

/// Salary range filter options, in display order.
pub const SALARY_RANGES: [&str; 5] = [
    "All Salaries",
    "Under $50,000",
    "$50,000 - $75,000",
    "$75,000 - $100,000",
    "Over $100,000",
];

/// Active search and filter selections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobFilters {
    /// Free-text search over title, company and description
    pub search: String,
    /// Selected location option (index 0 = no filter)
    pub location: String,
    /// Selected employment type option (index 0 = no filter)
    pub job_type: String,
    /// Selected salary range option (index 0 = no filter)
    pub salary: String,
}

impl Default for JobFilters {
    fn default() -> Self {
        Self {
            search: String::new(),
            location: LOCATIONS[0].to_string(),
            job_type: JOB_TYPES[0].to_string(),
            salary: SALARY_RANGES[0].to_string(),
        }
    }
}

impl JobFilters {
    /// Whether every filter is at its neutral setting.
    #[must_use]
    pub fn is_neutral(&self) -> bool {
        self.search.is_empty()
            && self.location == LOCATIONS[0]
            && self.job_type == JOB_TYPES[0]
            && self.salary == SALARY_RANGES[0]
    }

    /// Resets all filters to their neutral settings.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Whether `listing` passes every active filter.
    #[must_use]
    pub fn matches(&self, listing: &JobListing) -> bool {
        if !self.search.is_empty() {
            let needle = self.search.to_lowercase();
            let hit = listing.title.to_lowercase().contains(&needle)
                || listing.company.to_lowercase().contains(&needle)
                || listing.description.to_lowercase().contains(&needle);
            if !hit {
                return false;
            }
        }

        if self.location != LOCATIONS[0] && listing.location != self.location {
            return false;
        }

        if self.job_type != JOB_TYPES[0] && listing.job_type != self.job_type {
            return false;
        }

        if self.salary != SALARY_RANGES[0] {
            let Some(amount) = listing.first_salary_amount() else {
                return false;
            };
            let in_range = match self.salary.as_str() {
                "Under $50,000" => amount < 50_000,
                "$50,000 - $75,000" => (50_000..=75_000).contains(&amount),
                "$75,000 - $100,000" => (75_000..=100_000).contains(&amount),
                "Over $100,000" => amount > 100_000,
                _ => true,
            };
            if !in_range {
                return false;
            }
        }

        true
    }
}

/// The job browser's listing state: the embedded catalog plus
/// session-local application marks.
#[derive(Debug, Clone)]
pub struct JobBoard {
    /// All listings in catalog order
    pub listings: Vec<JobListing>,
}

impl JobBoard {
    /// Loads the embedded listing catalog.
    pub fn load() -> Result<Self> {
        let json_data = include_str!("listings.json");
        let listings: Vec<JobListing> =
            serde_json::from_str(json_data).context("Failed to parse embedded listings.json")?;
        Ok(Self { listings })
    }

    /// Indices of listings passing `filters`, in catalog order.
    #[must_use]
    pub fn matching_indices(&self, filters: &JobFilters) -> Vec<usize> {
        self.listings
            .iter()
            .enumerate()
            .filter(|(_, listing)| filters.matches(listing))
            .map(|(idx, _)| idx)
            .collect()
    }

    /// Marks the listing with `id` as applied.
    ///
    /// Returns true when the mark was newly set, false when the listing was
    /// already applied to or the id is unknown.
    pub fn apply(&mut self, id: &str) -> bool {
        match self.listings.iter_mut().find(|l| l.id == id) {
            Some(listing) if !listing.applied => {
                listing.applied = true;
                true
            }
            _ => false,
        }
    }

    /// Number of listings the user has applied to this session.
    #[must_use]
    pub fn applied_count(&self) -> usize {
        self.listings.iter().filter(|l| l.applied).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_loads_six_listings() {
        let board = JobBoard::load().unwrap();
        assert_eq!(board.listings.len(), 6);
        assert_eq!(board.listings[0].title, "Senior Frontend Developer");
        assert_eq!(board.listings[5].job_type, "Part-time");
        assert!(board.listings.iter().all(|l| !l.applied));
        assert_eq!(board.listings.iter().filter(|l| l.featured).count(), 2);
    }

    #[test]
    fn test_first_salary_amount_strips_commas() {
        let board = JobBoard::load().unwrap();
        assert_eq!(board.listings[0].first_salary_amount(), Some(80_000));
        // Hourly listing: first amount is the hourly rate
        assert_eq!(board.listings[5].first_salary_amount(), Some(30));
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let board = JobBoard::load().unwrap();
        let mut filters = JobFilters::default();

        filters.search = "FRONTEND".to_string();
        let hits = board.matching_indices(&filters);
        assert_eq!(hits, vec![0]);

        // Matches inside descriptions too
        filters.search = "cloud infrastructure".to_string();
        let hits = board.matching_indices(&filters);
        assert_eq!(hits, vec![2]);

        filters.search = "quantum".to_string();
        assert!(board.matching_indices(&filters).is_empty());
    }

    #[test]
    fn test_location_and_type_filters_are_exact() {
        let board = JobBoard::load().unwrap();
        let mut filters = JobFilters::default();

        filters.location = "Remote".to_string();
        assert_eq!(board.matching_indices(&filters), vec![2, 5]);

        filters.job_type = "Part-time".to_string();
        assert_eq!(board.matching_indices(&filters), vec![5]);

        // No Contract listings in the catalog
        filters = JobFilters::default();
        filters.job_type = "Contract".to_string();
        assert!(board.matching_indices(&filters).is_empty());
    }

    #[test]
    fn test_salary_filter_buckets_by_first_amount() {
        let board = JobBoard::load().unwrap();
        let mut filters = JobFilters::default();

        // The hourly listing's first amount (30) lands under $50,000
        filters.salary = "Under $50,000".to_string();
        assert_eq!(board.matching_indices(&filters), vec![5]);

        filters.salary = "$75,000 - $100,000".to_string();
        let hits = board.matching_indices(&filters);
        // First amounts 80,000 / 90,000 / 85,000 / 75,000
        assert_eq!(hits, vec![0, 2, 3, 4]);

        filters.salary = "Over $100,000".to_string();
        assert!(board.matching_indices(&filters).is_empty());
    }

    #[test]
    fn test_filters_combine() {
        let board = JobBoard::load().unwrap();
        let mut filters = JobFilters::default();
        filters.search = "developer".to_string();
        filters.location = "Istanbul, Turkey".to_string();
        assert_eq!(board.matching_indices(&filters), vec![0]);
    }

    #[test]
    fn test_apply_is_idempotent() {
        let mut board = JobBoard::load().unwrap();
        assert!(board.apply("3"));
        assert!(!board.apply("3"));
        assert!(!board.apply("no-such-listing"));
        assert_eq!(board.applied_count(), 1);
        assert!(board.listings[2].applied);
    }

    #[test]
    fn test_clear_filters() {
        let mut filters = JobFilters::default();
        assert!(filters.is_neutral());
        filters.search = "x".to_string();
        filters.location = "Remote".to_string();
        assert!(!filters.is_neutral());
        filters.clear();
        assert!(filters.is_neutral());
    }
}
