//! Thynk - Terminal job search platform and CV builder
//!
//! Without a subcommand the binary runs the interactive TUI. Subcommands
//! provide headless access for scripting: document scaffolding, validation,
//! template listing, job search, PDF export and AI analysis.

use clap::{Parser, Subcommand};
use thynk::cli::{self, ExitCode};
use thynk::{app, constants, storage};

/// Terminal job search platform and CV builder
#[derive(Parser, Debug)]
#[command(name = constants::APP_BINARY_NAME, author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create a new CV document file with default contents
    New(cli::NewArgs),
    /// Validate a CV document file
    Validate(cli::ValidateArgs),
    /// List the available CV templates
    Templates(cli::TemplatesArgs),
    /// Search and filter the job listings
    Jobs(cli::JobsArgs),
    /// Export a CV document to PDF
    Export(cli::ExportArgs),
    /// Analyze a CV document with the hosted AI models
    Analyze(cli::AnalyzeArgs),
    /// Manage configuration
    Config(cli::ConfigArgs),
}

fn main() {
    let cli = Cli::parse();

    if let Some(command) = cli.command {
        let result = match command {
            Commands::New(args) => args.execute(),
            Commands::Validate(args) => args.execute(),
            Commands::Templates(args) => args.execute(),
            Commands::Jobs(args) => args.execute(),
            Commands::Export(args) => args.execute(),
            Commands::Analyze(args) => args.execute(),
            Commands::Config(args) => args.execute(),
        };

        match result {
            Ok(()) => std::process::exit(ExitCode::Success.code()),
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(e.exit_code().code());
            }
        }
    }

    // TUI path: log to a file, the alternate screen must stay clean
    init_logging();

    if let Err(e) = app::run() {
        eprintln!("Error: {e:#}");
        std::process::exit(ExitCode::IoError.code());
    }
}

/// Routes `tracing` output to `thynk.log` in the app data root, the same
/// directory the storage layer uses (so the `THYNK_DATA_DIR` override
/// applies). Logging is best-effort: when the file cannot be opened the
/// app runs unlogged.
fn init_logging() {
    let Ok(dir) = storage::data_root() else {
        return;
    };
    if std::fs::create_dir_all(&dir).is_err() {
        return;
    }
    let Ok(file) = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join("thynk.log"))
    else {
        return;
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(file)
        .with_ansi(false)
        .init();
}
