//! Scaffolding command for a fresh CV document file.

use crate::cli::common::{CliError, CliResult};
use crate::models::CVDocument;
use clap::Args;
use std::fs;
use std::path::PathBuf;

/// Create a new CV document file with default contents
#[derive(Debug, Clone, Args)]
pub struct NewArgs {
    /// Output path for the document
    #[arg(short, long, value_name = "FILE", default_value = "cv.json")]
    pub output: PathBuf,

    /// Overwrite the file if it already exists
    #[arg(long)]
    pub force: bool,
}

impl NewArgs {
    /// Execute the new command
    pub fn execute(&self) -> CliResult<()> {
        if self.output.exists() && !self.force {
            return Err(CliError::validation(format!(
                "File already exists: {} (pass --force to overwrite)",
                self.output.display()
            )));
        }

        let document = CVDocument::default();
        let json = serde_json::to_string_pretty(&document)
            .map_err(|e| CliError::io(format!("Failed to serialize document: {e}")))?;

        fs::write(&self.output, json)
            .map_err(|e| CliError::io(format!("Failed to write {}: {e}", self.output.display())))?;

        println!("Created {}", self.output.display());
        Ok(())
    }
}
