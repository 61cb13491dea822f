//! AI analysis command.

use crate::cli::common::{open_storage, CliError, CliResult};
use crate::config::Config;
use crate::constants::STORAGE_KEY_CV_DATA;
use crate::inference::{self, advisory, InferenceClient};
use crate::models::CVDocument;
use crate::storage::Storage;
use clap::Args;
use std::fs;
use std::path::PathBuf;

/// Analyze a CV document with the hosted AI models
#[derive(Debug, Clone, Args)]
pub struct AnalyzeArgs {
    /// Path to a CV document JSON file (defaults to the stored document)
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Print the analysis as JSON
    #[arg(long)]
    pub json: bool,
}

impl AnalyzeArgs {
    /// Execute the analyze command
    pub fn execute(&self) -> CliResult<()> {
        let document = self.load_document()?;

        let config = Config::load().map_err(|e| CliError::config(format!("{e:#}")))?;
        let client = InferenceClient::from_config(&config.inference)
            .map_err(|e| CliError::config(advisory(&e)))?;

        let analysis = inference::analyze(&client, &document);

        if self.json {
            let json = serde_json::to_string_pretty(&analysis)
                .map_err(|e| CliError::io(format!("Failed to serialize analysis: {e}")))?;
            println!("{json}");
            return Ok(());
        }

        match &analysis.category {
            Some(classification) => {
                println!("CV focus (zero-shot):");
                for (label, score) in classification.labels.iter().zip(&classification.scores) {
                    println!("  {label:<20} {:.0}%", score * 100.0);
                }
            }
            None => println!("Classification unavailable"),
        }
        match analysis.sentiment.as_deref().and_then(<[_]>::first) {
            Some(top) => println!("Tone: {} ({:.0}%)", top.label, top.score * 100.0),
            None => println!("Sentiment unavailable"),
        }
        Ok(())
    }

    fn load_document(&self) -> CliResult<CVDocument> {
        let json = match &self.input {
            Some(path) => fs::read_to_string(path)
                .map_err(|e| CliError::io(format!("Failed to read {}: {e}", path.display())))?,
            None => {
                let storage = open_storage()?;
                storage.get(STORAGE_KEY_CV_DATA).ok_or_else(|| {
                    CliError::validation(
                        "No stored CV document. Build one in the TUI or pass --input",
                    )
                })?
            }
        };

        serde_json::from_str(&json)
            .map_err(|e| CliError::validation(format!("Failed to parse CV document: {e}")))
    }
}
