//! Spreadsheet-style editing of Gherkin data tables from the command line.

use std::io;

use clap::Parser;
use tracing::debug;

use gherkin_grid_cli::cli::Cli;
use gherkin_grid_cli::commands::run;
use gherkin_grid_cli::config::CliConfig;
use gherkin_grid_cli::error::CliError;
use gherkin_grid_cli::logging::init_logging;

fn main() {
    let cli = Cli::parse();

    let config = match build_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            let fallback = CliConfig::default();
            init_logging(&fallback);
            tracing::error!(error = %e, "invalid configuration");
            std::process::exit(2);
        }
    };
    init_logging(&config);
    debug!(version = env!("CARGO_PKG_VERSION"), command = ?cli.command, "starting gherkin-grid");

    let mut stdin = io::stdin().lock();
    let mut stdout = io::stdout().lock();
    if let Err(e) = run(&cli, &config, &mut stdin, &mut stdout) {
        let message = format!("{e:#}");
        tracing::error!(error = %message, "operation failed");
        std::process::exit(1);
    }
}

fn build_config(cli: &Cli) -> Result<CliConfig, CliError> {
    let config = CliConfig::from_env()?;
    Ok(config.apply_overrides(cli.log_level, cli.report))
}
