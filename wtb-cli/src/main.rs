use std::io;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing::debug;

use wtb_cli::app::{self, RunStatus};
use wtb_cli::cli::Cli;
use wtb_cli::config::AppConfig;
use wtb_cli::links::PrintLinkOpener;
use wtb_cli::logging;

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> ExitCode {
    let cli = Cli::parse();

    match try_main(&cli) {
        Ok(status) => status.exit_code(),
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

/// Loads configuration, starts logging, then evaluates and reports.
///
/// `--log-level` wins over `[logging] level`; `RUST_LOG` wins over both.
fn try_main(cli: &Cli) -> Result<RunStatus> {
    let config = AppConfig::load_with_fallback(cli.config.as_deref())?;

    let level = cli.log_level.as_deref().unwrap_or(&config.logging.level);
    logging::init_logging(level, config.logging.file.as_deref())?;
    debug!(?config, "configuration loaded");

    let mut stdout = io::stdout();
    app::run(cli, &config, &PrintLinkOpener, &mut stdout)
}
