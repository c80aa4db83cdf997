use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::PlannerError;
use crate::services::{TrainingConfig, DEFAULT_TOP_N};

/// Planner configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Directory holding user_profiles.csv, workout_plan.csv and food_dataset.csv
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Maximum number of recommended foods
    #[serde(default = "default_top_n")]
    pub top_n: usize,

    /// Fraction of user profiles held out to evaluate the calorie estimator
    #[serde(default = "default_validation_split")]
    pub validation_split: f64,

    #[serde(default = "default_random_seed")]
    pub random_seed: u64,

    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// Default value functions
fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_top_n() -> usize {
    DEFAULT_TOP_N
}

fn default_validation_split() -> f64 {
    TrainingConfig::default().validation_split
}

fn default_random_seed() -> u64 {
    TrainingConfig::default().random_seed
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            top_n: default_top_n(),
            validation_split: default_validation_split(),
            random_seed: default_random_seed(),
            log_level: default_log_level(),
        }
    }
}

impl PlannerConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let config = Self {
            data_dir: env::var("PLANNER_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            top_n: match env::var("PLANNER_TOP_N") {
                Ok(value) => value.parse().context("PLANNER_TOP_N must be a positive integer")?,
                Err(_) => defaults.top_n,
            },
            validation_split: match env::var("PLANNER_VALIDATION_SPLIT") {
                Ok(value) => value.parse().context("PLANNER_VALIDATION_SPLIT must be a number")?,
                Err(_) => defaults.validation_split,
            },
            random_seed: match env::var("PLANNER_RANDOM_SEED") {
                Ok(value) => value.parse().context("PLANNER_RANDOM_SEED must be an unsigned integer")?,
                Err(_) => defaults.random_seed,
            },
            log_level: env::var("LOG_LEVEL").unwrap_or(defaults.log_level),
        };

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file. Missing keys take their defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let config: PlannerConfig = toml::from_str(&contents).context("Failed to parse config file")?;

        config.validate()?;
        Ok(config)
    }

    /// Use the file when given, otherwise the environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                tracing::debug!("No config file given, reading environment");
                Self::from_env()
            }
        }
    }

    pub fn validate(&self) -> std::result::Result<(), PlannerError> {
        if self.top_n == 0 {
            return Err(PlannerError::Config("top_n must be at least 1".to_string()));
        }
        if !(0.0..1.0).contains(&self.validation_split) {
            return Err(PlannerError::Config(format!(
                "validation_split must be in [0, 1), got {}",
                self.validation_split
            )));
        }
        Ok(())
    }

    pub fn training_config(&self) -> TrainingConfig {
        TrainingConfig {
            validation_split: self.validation_split,
            random_seed: self.random_seed,
        }
    }
}
