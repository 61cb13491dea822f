//! Job listing search command over the embedded catalog.

use crate::cli::common::{CliError, CliResult};
use crate::jobs::{JobBoard, JobFilters, JOB_TYPES, LOCATIONS, SALARY_RANGES};
use clap::Args;

/// Search and filter the job listings
#[derive(Debug, Clone, Args)]
pub struct JobsArgs {
    /// Free-text search over title, company and description
    #[arg(short, long, value_name = "TEXT")]
    pub search: Option<String>,

    /// Filter by location
    #[arg(short, long, value_name = "LOCATION")]
    pub location: Option<String>,

    /// Filter by employment type
    #[arg(long = "type", value_name = "TYPE")]
    pub job_type: Option<String>,

    /// Filter by salary range
    #[arg(long, value_name = "RANGE")]
    pub salary: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Rejects filter values that are not one of the known options.
fn checked_option(value: &str, options: &[&str], what: &str) -> CliResult<String> {
    if options.contains(&value) {
        return Ok(value.to_string());
    }
    Err(CliError::validation(format!(
        "Unknown {what} '{value}'. Options: {}",
        options.join(", ")
    )))
}

impl JobsArgs {
    /// Execute the jobs command
    pub fn execute(&self) -> CliResult<()> {
        let board = JobBoard::load()
            .map_err(|e| CliError::io(format!("Failed to load job listings: {e}")))?;

        let mut filters = JobFilters::default();
        if let Some(search) = &self.search {
            filters.search = search.clone();
        }
        if let Some(location) = &self.location {
            filters.location = checked_option(location, &LOCATIONS, "location")?;
        }
        if let Some(job_type) = &self.job_type {
            filters.job_type = checked_option(job_type, &JOB_TYPES, "job type")?;
        }
        if let Some(salary) = &self.salary {
            filters.salary = checked_option(salary, &SALARY_RANGES, "salary range")?;
        }

        let matches: Vec<_> = board
            .matching_indices(&filters)
            .into_iter()
            .map(|index| &board.listings[index])
            .collect();

        if self.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&matches)
                    .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?
            );
            return Ok(());
        }

        for listing in &matches {
            let featured = if listing.featured { "★ " } else { "  " };
            println!("{featured}{} — {}", listing.title, listing.company);
            println!(
                "    {} · {} · {}",
                listing.location, listing.job_type, listing.salary
            );
        }
        println!();
        println!("{} jobs found", matches.len());
        Ok(())
    }
}
