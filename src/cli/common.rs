//! Shared types for CLI command handlers.

use std::fmt;

use crate::config::Config;
use crate::storage::FileStorage;

/// Process exit codes for CLI commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Command completed successfully
    Success = 0,
    /// Input or document validation failed
    ValidationError = 1,
    /// Filesystem or rendering failure
    IoError = 2,
    /// Configuration problem
    ConfigError = 3,
}

impl ExitCode {
    /// The numeric code passed to `std::process::exit`.
    #[must_use]
    pub const fn code(self) -> i32 {
        self as i32
    }
}

/// Error returned by CLI command handlers.
///
/// Classifies failures so the binary can exit with a distinct code per
/// class. The message is what the user sees on stderr.
#[derive(Debug)]
pub enum CliError {
    /// Filesystem or rendering failure
    Io(String),
    /// Input or document validation failure
    Validation(String),
    /// Configuration problem
    Config(String),
}

impl CliError {
    /// An I/O failure.
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io(message.into())
    }

    /// A validation failure.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// A configuration failure.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// The exit code this error maps to.
    #[must_use]
    pub const fn exit_code(&self) -> ExitCode {
        match self {
            Self::Io(_) => ExitCode::IoError,
            Self::Validation(_) => ExitCode::ValidationError,
            Self::Config(_) => ExitCode::ConfigError,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(message) | Self::Validation(message) | Self::Config(message) => {
                write!(f, "{message}")
            }
        }
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI command handlers.
pub type CliResult<T> = Result<T, CliError>;

/// Opens the durable store the TUI uses, honoring the configured data
/// directory. Commands that read stored state (`export`, `analyze`) share
/// this so they always see the same store as the interactive app.
pub(crate) fn open_storage() -> CliResult<FileStorage> {
    let config = Config::load().map_err(|e| CliError::config(format!("{e:#}")))?;
    let dir = match config.storage.data_dir {
        Some(dir) => dir,
        None => FileStorage::default_dir().map_err(|e| CliError::config(format!("{e:#}")))?,
    };
    FileStorage::open(dir).map_err(|e| CliError::io(format!("{e:#}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_are_distinct() {
        assert_eq!(ExitCode::Success.code(), 0);
        assert_eq!(ExitCode::ValidationError.code(), 1);
        assert_eq!(ExitCode::IoError.code(), 2);
        assert_eq!(ExitCode::ConfigError.code(), 3);
    }

    #[test]
    fn test_error_class_maps_to_exit_code() {
        assert_eq!(
            CliError::io("disk on fire").exit_code(),
            ExitCode::IoError
        );
        assert_eq!(
            CliError::validation("bad document").exit_code(),
            ExitCode::ValidationError
        );
        assert_eq!(
            CliError::config("bad url").exit_code(),
            ExitCode::ConfigError
        );
        assert_eq!(CliError::validation("bad document").to_string(), "bad document");
    }
}
