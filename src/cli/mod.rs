//! Command-line interface.

pub mod commands;
pub mod output;
pub mod types;

pub use types::{Cli, Commands};

use anyhow::Result;

use crate::infrastructure::config::ConfigLoader;
use crate::infrastructure::logging::LoggerImpl;

/// Load configuration, start logging and dispatch the subcommand.
pub async fn run(cli: Cli) -> Result<()> {
    let config = ConfigLoader::load(cli.config.as_deref(), &cli.config_overrides())?;
    let _logger = LoggerImpl::init(&config.logging)?;

    match cli.command {
        Commands::Measure(_) => commands::measure::execute(&config, cli.human).await,
        Commands::Trial(ref args) => {
            commands::trial::execute(&config, args.interval, cli.human).await
        }
        Commands::Config => commands::config::execute(&config, cli.human),
    }
}

/// Report an unrecovered error on stderr and exit non-zero.
pub fn handle_error(err: &anyhow::Error) -> ! {
    eprintln!("Error: {err:#}");
    std::process::exit(1)
}
