use anyhow::Result;
use clap::Args;
use serde_json::json;

use fitness_planner::config::PlannerConfig;

use super::load_and_train;

#[derive(Args)]
pub struct MetricsCommand {
    /// Print the metrics as JSON
    #[arg(long)]
    json: bool,
}

impl MetricsCommand {
    pub fn execute(self, config: &PlannerConfig) -> Result<()> {
        let (_store, bundle) = load_and_train(config)?;
        let estimator = bundle.calorie_estimator();
        let coefficients = estimator.coefficients()?;
        let intercept = estimator.intercept()?;
        let classes = bundle.workout_classifier().labels()?;

        if self.json {
            let report = json!({
                "model_version": bundle.model_version(),
                "trained_at": bundle.trained_at(),
                "metrics": bundle.metrics(),
                "intercept": intercept,
                "coefficients": coefficients
                    .iter()
                    .map(|(name, value)| (name.to_string(), json!(value)))
                    .collect::<serde_json::Map<_, _>>(),
                "workout_classes": classes,
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
            return Ok(());
        }

        println!("Model version: {}", bundle.model_version());
        match bundle.metrics() {
            Some(metrics) => {
                println!("Held-out samples: {}", metrics.sample_count);
                println!("  MAE   {:>10.4} kcal", metrics.mae_kcal);
                println!("  RMSE  {:>10.4} kcal", metrics.rmse_kcal);
                println!("  R²    {:>10.6}", metrics.r_squared);
            }
            None => println!("No validation split configured; metrics unavailable"),
        }

        println!();
        println!("Calorie estimator coefficients:");
        for (name, value) in &coefficients {
            println!("  {:<18} {:>10.4}", name, value);
        }
        println!("  {:<18} {:>10.4}", "intercept", intercept);

        println!();
        println!("Workout classes: {:?}", classes);

        Ok(())
    }
}
