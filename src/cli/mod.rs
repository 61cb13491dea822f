//! CLI command handlers for Thynk.
//!
//! This module provides headless, scriptable access to Thynk's core
//! functionality for automation, testing, and CI/CD integration.

pub mod analyze;
pub mod common;
pub mod config;
pub mod export;
pub mod jobs;
pub mod new;
pub mod templates;
pub mod validate;

// Re-export types used by main.rs and tests
pub use analyze::AnalyzeArgs;
pub use common::ExitCode;
pub use config::ConfigArgs;
pub use export::ExportArgs;
pub use jobs::JobsArgs;
pub use new::NewArgs;
pub use templates::TemplatesArgs;
pub use validate::ValidateArgs;
