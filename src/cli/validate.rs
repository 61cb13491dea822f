//! Validation command for CV document files.

use crate::cli::common::{CliError, CliResult};
use crate::models::CVDocument;
use clap::Args;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;

/// Validate a CV document file for structural errors
#[derive(Debug, Clone, Args)]
pub struct ValidateArgs {
    /// Path to a CV document JSON file
    #[arg(short, long, value_name = "FILE")]
    pub input: PathBuf,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON-serializable validation result
#[derive(Serialize, Debug)]
struct ValidationResponse {
    valid: bool,
    completeness_percent: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl ValidateArgs {
    /// Execute the validate command
    pub fn execute(&self) -> CliResult<()> {
        let content = fs::read_to_string(&self.input)
            .map_err(|e| CliError::io(format!("Failed to read {}: {e}", self.input.display())))?;

        let document: CVDocument = serde_json::from_str(&content)
            .map_err(|e| CliError::validation(format!("Failed to parse CV document: {e}")))?;

        let error = document.validate().err().map(|e| e.to_string());
        let response = ValidationResponse {
            valid: error.is_none(),
            completeness_percent: document.completeness_percent(),
            error,
        };

        if self.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&response)
                    .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?
            );
        } else if let Some(error) = &response.error {
            println!("✗ Invalid: {error}");
        } else {
            println!(
                "✓ Valid ({}% complete)",
                response.completeness_percent
            );
        }

        if response.valid {
            Ok(())
        } else {
            Err(CliError::validation("CV document failed validation"))
        }
    }
}
