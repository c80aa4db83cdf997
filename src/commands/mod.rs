mod metrics;
mod plan;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;

use fitness_planner::config::PlannerConfig;
use fitness_planner::services::{train_with_config, DataStore, ModelBundle};

pub use metrics::MetricsCommand;
pub use plan::PlanCommand;

#[derive(Parser)]
#[command(name = "fitness-planner")]
#[command(about = "Personalized calorie, workout and food recommendations", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Directory containing the reference CSV tables
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long, global = true, env = "FITNESS_PLANNER_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a personalized plan for one profile
    Plan(PlanCommand),

    /// Train the models and show calorie estimator evaluation
    Metrics(MetricsCommand),
}

impl Cli {
    pub fn verbose(&self) -> bool {
        self.verbose
    }

    pub fn config_path(&self) -> Option<&Path> {
        self.config.as_deref()
    }

    pub fn execute(self, mut config: PlannerConfig) -> Result<()> {
        if let Some(data_dir) = self.data_dir {
            config.data_dir = data_dir;
        }

        match self.command {
            Commands::Plan(cmd) => cmd.execute(&config),
            Commands::Metrics(cmd) => cmd.execute(&config),
        }
    }
}

/// Load the reference tables and train the model bundle
pub(crate) fn load_and_train(config: &PlannerConfig) -> Result<(DataStore, ModelBundle)> {
    let store = DataStore::load(&config.data_dir)
        .with_context(|| format!("Failed to load tables from {}", config.data_dir.display()))?;

    let bundle = train_with_config(store.users(), store.workouts(), &config.training_config())
        .context("Failed to train models")?;

    info!("Using model {}", bundle.model_version());
    Ok((store, bundle))
}
