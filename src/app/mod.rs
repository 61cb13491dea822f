//! Application orchestration layer
//!
//! Wires configuration, durable storage and the TUI together. The CLI
//! subcommands bypass this module and talk to the libraries directly.

use anyhow::Result;

use crate::config::Config;
use crate::storage::FileStorage;
use crate::tui;

/// Loads configuration and storage, then runs the TUI until the user quits.
///
/// A broken config file falls back to defaults rather than blocking startup;
/// the problem is logged and the file is left untouched.
pub fn run() -> Result<()> {
    let config = Config::load().unwrap_or_else(|e| {
        tracing::warn!("Falling back to default configuration: {e:#}");
        Config::default()
    });

    let storage_dir = match &config.storage.data_dir {
        Some(dir) => dir.clone(),
        None => FileStorage::default_dir()?,
    };
    let storage = FileStorage::open(storage_dir)?;

    let mut state = tui::AppState::new(config, Box::new(storage))?;
    if state.config.ui.show_help_on_startup {
        state.active_popup = Some(tui::PopupType::Help);
    }

    let mut terminal = tui::setup_terminal()?;
    let result = tui::run_tui(&mut state, &mut terminal);
    tui::restore_terminal(terminal)?;
    result
}
