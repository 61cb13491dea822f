//! Configuration management CLI commands.

use crate::cli::common::{CliError, CliResult};
use crate::config::{Config, ThemeMode};
use clap::{Args, Subcommand};
use std::path::PathBuf;

/// Configuration management commands
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Display current configuration
    Show(ConfigShowArgs),
    /// Set configuration values
    Set(ConfigSetArgs),
    /// Print the config file path
    Path,
}

/// Display current configuration
#[derive(Args, Debug)]
pub struct ConfigShowArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Set configuration values
#[derive(Args, Debug)]
pub struct ConfigSetArgs {
    /// Inference API key
    #[arg(long, value_name = "KEY")]
    api_key: Option<String>,

    /// Theme mode (auto, light, or dark)
    #[arg(long, value_name = "MODE")]
    theme: Option<String>,

    /// Durable storage directory override
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Show the help overlay on startup (true or false)
    #[arg(long, value_name = "BOOL")]
    show_help_on_startup: Option<bool>,
}

impl ConfigArgs {
    /// Execute config subcommand
    pub fn execute(&self) -> CliResult<()> {
        match &self.command {
            ConfigCommand::Show(args) => args.execute(),
            ConfigCommand::Set(args) => args.execute(),
            ConfigCommand::Path => {
                let path = Config::config_file_path()
                    .map_err(|e| CliError::config(format!("{e:#}")))?;
                println!("{}", path.display());
                Ok(())
            }
        }
    }
}

impl ConfigShowArgs {
    /// Execute show command
    pub fn execute(&self) -> CliResult<()> {
        let config = Config::load()
            .map_err(|e| CliError::config(format!("Failed to load configuration: {e:#}")))?;

        if self.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&config)
                    .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?
            );
            return Ok(());
        }

        println!("Inference:");
        println!(
            "  api_key:              {}",
            match &config.inference.api_key {
                Some(_) => "(set)",
                None => "(not set)",
            }
        );
        println!("  base_url:             {}", config.inference.base_url);
        println!("  generation_model:     {}", config.inference.generation_model);
        println!(
            "  classification_model: {}",
            config.inference.classification_model
        );
        println!("  sentiment_model:      {}", config.inference.sentiment_model);
        println!("Storage:");
        println!(
            "  data_dir:             {}",
            config
                .storage
                .data_dir
                .as_ref()
                .map_or_else(|| "(platform default)".to_string(), |d| d.display().to_string())
        );
        println!("UI:");
        println!("  theme_mode:           {:?}", config.ui.theme_mode);
        println!(
            "  show_help_on_startup: {}",
            config.ui.show_help_on_startup
        );
        Ok(())
    }
}

impl ConfigSetArgs {
    /// Execute set command
    pub fn execute(&self) -> CliResult<()> {
        let mut config = Config::load()
            .map_err(|e| CliError::config(format!("Failed to load configuration: {e:#}")))?;

        let mut changed = false;

        if let Some(api_key) = &self.api_key {
            config.inference.api_key = Some(api_key.clone());
            changed = true;
        }
        if let Some(theme) = &self.theme {
            config.ui.theme_mode = parse_theme(theme)?;
            changed = true;
        }
        if let Some(data_dir) = &self.data_dir {
            config.storage.data_dir = Some(data_dir.clone());
            changed = true;
        }
        if let Some(show) = self.show_help_on_startup {
            config.ui.show_help_on_startup = show;
            changed = true;
        }

        if !changed {
            return Err(CliError::validation("No configuration values provided"));
        }

        config
            .validate()
            .map_err(|e| CliError::validation(format!("{e:#}")))?;
        config
            .save()
            .map_err(|e| CliError::io(format!("Failed to save configuration: {e:#}")))?;

        println!("Configuration updated");
        Ok(())
    }
}

fn parse_theme(value: &str) -> CliResult<ThemeMode> {
    match value.to_lowercase().as_str() {
        "auto" => Ok(ThemeMode::Auto),
        "dark" => Ok(ThemeMode::Dark),
        "light" => Ok(ThemeMode::Light),
        other => Err(CliError::validation(format!(
            "Unknown theme mode '{other}'. Options: auto, dark, light"
        ))),
    }
}
