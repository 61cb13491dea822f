//! PDF export command.

use crate::cli::common::{open_storage, CliError, CliResult};
use crate::constants::{STORAGE_KEY_CV_DATA, STORAGE_KEY_SELECTED_TEMPLATE, STORAGE_KEY_USER};
use crate::export;
use crate::models::{CVDocument, User};
use crate::storage::{FileStorage, Storage};
use crate::templates::TemplateCatalog;
use clap::Args;
use std::fs;
use std::path::PathBuf;

/// Export a CV document to PDF
#[derive(Debug, Clone, Args)]
pub struct ExportArgs {
    /// Path to a CV document JSON file (defaults to the stored document)
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Template id (defaults to the stored selection)
    #[arg(short, long, value_name = "ID")]
    pub template: Option<String>,

    /// Output PDF path (defaults to [first]-[last]-[timestamp].pdf)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

impl ExportArgs {
    /// Execute the export command
    pub fn execute(&self) -> CliResult<()> {
        let catalog = TemplateCatalog::load()
            .map_err(|e| CliError::io(format!("Failed to load template catalog: {e}")))?;
        let storage = open_storage()?;

        let document = self.load_document(&storage)?;
        document
            .validate()
            .map_err(|e| CliError::validation(format!("CV document is invalid: {e}")))?;

        let template_id = self
            .template
            .clone()
            .or_else(|| storage.get(STORAGE_KEY_SELECTED_TEMPLATE))
            .unwrap_or_else(|| catalog.first().id.clone());
        let template = catalog.get(&template_id).ok_or_else(|| {
            CliError::validation(format!("Unknown template '{template_id}'"))
        })?;

        // The premium gate applies headless too: only a stored premium
        // account unlocks premium templates
        if template.is_premium && !stored_user_is_premium(&storage) {
            return Err(CliError::validation(format!(
                "Template '{template_id}' requires a Premium account"
            )));
        }

        let output = self
            .output
            .clone()
            .unwrap_or_else(|| PathBuf::from(export::default_file_name(&document)));

        export::export_to_pdf(template, &document, &output)
            .map_err(|e| CliError::io(format!("Failed to export PDF: {e}")))?;

        println!("✓ Exported CV to: {}", output.display());
        Ok(())
    }

    fn load_document(&self, storage: &FileStorage) -> CliResult<CVDocument> {
        let json = match &self.input {
            Some(path) => fs::read_to_string(path)
                .map_err(|e| CliError::io(format!("Failed to read {}: {e}", path.display())))?,
            None => storage.get(STORAGE_KEY_CV_DATA).ok_or_else(|| {
                CliError::validation(
                    "No stored CV document. Build one in the TUI or pass --input",
                )
            })?,
        };

        serde_json::from_str(&json)
            .map_err(|e| CliError::validation(format!("Failed to parse CV document: {e}")))
    }
}

fn stored_user_is_premium(storage: &FileStorage) -> bool {
    storage
        .get(STORAGE_KEY_USER)
        .and_then(|json| serde_json::from_str::<User>(&json).ok())
        .is_some_and(|user| user.is_premium)
}
