//! Personal library catalog CLI.
//!
//! # Responsibility
//! - Resolve the data file and logging options from flags or environment.
//! - Wire the JSON file repository into the interactive menu.

mod input;
mod menu;

use anyhow::{Context, Result};
use clap::Parser;
use input::LineInput;
use library_core::{BookService, JsonBookRepository, OpContext};
use log::info;
use std::path::PathBuf;

const DEFAULT_DATA_FILE: &str = "data/books.json";
const DEFAULT_STDERR_LOG_LEVEL: &str = "warn";

/// Manage a personal book catalog stored as a JSON file.
#[derive(Debug, Parser)]
#[command(name = "library", version)]
struct Cli {
    /// Path of the JSON catalog file
    #[arg(long, env = "LIBRARY_DATA_FILE", default_value = DEFAULT_DATA_FILE, value_name = "FILE")]
    data_file: PathBuf,

    /// Log level (trace, debug, info, warn, error) [default: warn on stderr,
    /// build-dependent for log files]
    #[arg(long, env = "LIBRARY_LOG_LEVEL")]
    log_level: Option<String>,

    /// Absolute directory for rotated log files; logs go to stderr when unset
    #[arg(long, env = "LIBRARY_LOG_DIR", value_name = "DIR")]
    log_dir: Option<PathBuf>,
}

impl Cli {
    /// Explicit level, else a quiet default for stderr and the build default
    /// for log files.
    fn effective_log_level(&self) -> &str {
        match (&self.log_level, &self.log_dir) {
            (Some(level), _) => level.as_str(),
            (None, Some(_)) => library_core::default_log_level(),
            (None, None) => DEFAULT_STDERR_LOG_LEVEL,
        }
    }

    fn start_logging(&self) -> Result<()> {
        let level = self.effective_log_level();
        let started = match &self.log_dir {
            Some(log_dir) => {
                let log_dir = log_dir
                    .to_str()
                    .context("log directory must be valid UTF-8")?;
                library_core::init_logging(level, log_dir)
            }
            None => library_core::init_stderr_logging(level),
        };
        started
            .map_err(anyhow::Error::msg)
            .context("failed to initialize logging")
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    cli.start_logging()?;

    if let Some(parent) = cli.data_file.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create data directory `{}`", parent.display()))?;
    }

    info!(
        "event=cli_start module=cli status=ok version={} data_file={}",
        library_core::core_version(),
        cli.data_file.display()
    );

    let service = BookService::new(JsonBookRepository::new(&cli.data_file));
    let ctx = OpContext::background();
    let mut input = LineInput::stdio();
    menu::run_menu(&service, &ctx, &mut input).context("console I/O failed")?;

    info!("event=cli_exit module=cli status=ok");
    Ok(())
}
