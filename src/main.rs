mod commands;

use anyhow::Result;
use clap::Parser;
use fitness_planner::config::PlannerConfig;
use tracing_subscriber::EnvFilter;

use crate::commands::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = PlannerConfig::load(cli.config_path())?;

    // Initialize logging
    let default_level = if cli.verbose() { "debug" } else { config.log_level.as_str() };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_level))
        )
        .with_writer(std::io::stderr)
        .init();

    cli.execute(config)
}
