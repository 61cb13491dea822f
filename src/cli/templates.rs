//! Template catalog listing command.

use crate::cli::common::{CliError, CliResult};
use crate::templates::TemplateCatalog;
use clap::Args;

/// List the available CV templates
#[derive(Debug, Clone, Args)]
pub struct TemplatesArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl TemplatesArgs {
    /// Execute the templates command
    pub fn execute(&self) -> CliResult<()> {
        let catalog = TemplateCatalog::load()
            .map_err(|e| CliError::io(format!("Failed to load template catalog: {e}")))?;

        if self.json {
            println!(
                "{}",
                serde_json::to_string_pretty(catalog.all())
                    .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?
            );
            return Ok(());
        }

        for template in catalog.all() {
            let tier = if template.is_premium {
                "premium"
            } else {
                "free"
            };
            println!("{:<14} {:<16} {tier}", template.id, template.name);
        }
        println!();
        println!("{} templates available", catalog.all().len());
        Ok(())
    }
}
