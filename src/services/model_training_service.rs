use chrono::{DateTime, Utc};
use ndarray::Array1;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::errors::{PlannerError, Result};
use crate::models::{TrainingSample, WorkoutEntry};
use crate::services::calorie_estimator_service::{prepare_training_data, CalorieEstimator, MIN_TRAINING_SAMPLES};
use crate::services::workout_classifier_service::WorkoutClassifier;

/// Configuration for model training
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainingConfig {
    /// Fraction of user rows held out for evaluation (0.0 to 1.0, exclusive)
    pub validation_split: f64,
    /// Seed for the train/validation shuffle
    pub random_seed: u64,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            validation_split: 0.2,
            random_seed: 42,
        }
    }
}

/// Hold-out evaluation of the calorie estimator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelMetrics {
    /// Mean Absolute Error in kcal
    pub mae_kcal: f64,
    /// Root Mean Square Error in kcal
    pub rmse_kcal: f64,
    /// R-squared coefficient
    pub r_squared: f64,
    /// Number of held-out samples
    pub sample_count: usize,
    pub evaluated_at: DateTime<Utc>,
}

/// Fitted models plus the workout catalog they resolve names against.
/// Immutable once trained; share it freely between readers.
#[derive(Debug, Clone)]
pub struct ModelBundle {
    calorie_estimator: CalorieEstimator,
    workout_classifier: WorkoutClassifier,
    workouts: Vec<WorkoutEntry>,
    metrics: Option<ModelMetrics>,
    model_version: String,
    trained_at: DateTime<Utc>,
}

impl ModelBundle {
    pub fn calorie_estimator(&self) -> &CalorieEstimator {
        &self.calorie_estimator
    }

    pub fn workout_classifier(&self) -> &WorkoutClassifier {
        &self.workout_classifier
    }

    pub fn workouts(&self) -> &[WorkoutEntry] {
        &self.workouts
    }

    pub fn metrics(&self) -> Option<&ModelMetrics> {
        self.metrics.as_ref()
    }

    pub fn model_version(&self) -> &str {
        &self.model_version
    }

    pub fn trained_at(&self) -> DateTime<Utc> {
        self.trained_at
    }
}

/// Train both models with the default configuration
pub fn train(user_rows: &[TrainingSample], workout_rows: &[WorkoutEntry]) -> Result<ModelBundle> {
    train_with_config(user_rows, workout_rows, &TrainingConfig::default())
}

pub fn train_with_config(
    user_rows: &[TrainingSample],
    workout_rows: &[WorkoutEntry],
    config: &TrainingConfig,
) -> Result<ModelBundle> {
    if !(0.0..1.0).contains(&config.validation_split) {
        return Err(PlannerError::Config(format!(
            "validation_split must be in [0, 1), got {}",
            config.validation_split
        )));
    }

    info!(
        "Training models on {} user profiles and {} workouts",
        user_rows.len(),
        workout_rows.len()
    );

    let held_out = validation_count(user_rows.len(), config);
    let fitting_rows = user_rows.len() - held_out;
    if fitting_rows < MIN_TRAINING_SAMPLES {
        return Err(PlannerError::Training(format!(
            "Insufficient training data: {} user profiles leave {} for fitting after holding out {} for validation, need at least {}",
            user_rows.len(),
            fitting_rows,
            held_out,
            MIN_TRAINING_SAMPLES
        )));
    }

    let (train_rows, validation_rows) = split_samples(user_rows, config);
    let calorie_estimator = CalorieEstimator::fitted(&train_rows)?;

    let metrics = if validation_rows.is_empty() {
        warn!("No validation rows held out; skipping calorie estimator evaluation");
        None
    } else {
        let metrics = evaluate_estimator(&calorie_estimator, &validation_rows)?;
        info!(
            "Calorie estimator trained. RMSE: {:.2}, MAE: {:.2}, R²: {:.3}",
            metrics.rmse_kcal, metrics.mae_kcal, metrics.r_squared
        );
        Some(metrics)
    };

    let workout_classifier = WorkoutClassifier::fitted(workout_rows)?;

    let trained_at = Utc::now();
    let model_version = format!("planner_v{}", trained_at.timestamp());
    info!("Model bundle {} ready", model_version);

    Ok(ModelBundle {
        calorie_estimator,
        workout_classifier,
        workouts: workout_rows.to_vec(),
        metrics,
        model_version,
        trained_at,
    })
}

/// Seeded shuffle, then hold out `ceil(n * validation_split)` rows
fn split_samples(
    samples: &[TrainingSample],
    config: &TrainingConfig,
) -> (Vec<TrainingSample>, Vec<TrainingSample>) {
    let held_out = validation_count(samples.len(), config);
    if held_out == 0 {
        return (samples.to_vec(), Vec::new());
    }

    let mut shuffled = samples.to_vec();
    let mut rng = StdRng::seed_from_u64(config.random_seed);
    shuffled.shuffle(&mut rng);

    let validation = shuffled.split_off(samples.len() - held_out);
    (shuffled, validation)
}

fn validation_count(total: usize, config: &TrainingConfig) -> usize {
    ((total as f64 * config.validation_split).ceil() as usize).min(total)
}

/// Evaluate a fitted estimator against labelled rows
pub fn evaluate_estimator(estimator: &CalorieEstimator, samples: &[TrainingSample]) -> Result<ModelMetrics> {
    let (features, targets) = prepare_training_data(samples);
    let predictions = estimator.predict_batch(&features)?;

    Ok(ModelMetrics {
        mae_kcal: calculate_mae(&predictions, &targets),
        rmse_kcal: calculate_rmse(&predictions, &targets),
        r_squared: calculate_r_squared(&predictions, &targets),
        sample_count: samples.len(),
        evaluated_at: Utc::now(),
    })
}

/// Calculate Mean Absolute Error
fn calculate_mae(predictions: &Array1<f64>, targets: &Array1<f64>) -> f64 {
    (predictions - targets).mapv(f64::abs).mean().unwrap_or(0.0)
}

/// Calculate Root Mean Square Error
fn calculate_rmse(predictions: &Array1<f64>, targets: &Array1<f64>) -> f64 {
    (predictions - targets).mapv(|x| x.powi(2)).mean().unwrap_or(0.0).sqrt()
}

/// Calculate R-squared. A constant target yields 1.0 for a perfect fit, 0.0 otherwise.
fn calculate_r_squared(predictions: &Array1<f64>, targets: &Array1<f64>) -> f64 {
    let target_mean = targets.mean().unwrap_or(0.0);
    let ss_tot = targets.mapv(|x| (x - target_mean).powi(2)).sum();
    let ss_res = (targets - predictions).mapv(|x| x.powi(2)).sum();

    if ss_tot == 0.0 {
        return if ss_res == 0.0 { 1.0 } else { 0.0 };
    }
    1.0 - (ss_res / ss_tot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DietType, Gender, Goal, UserProfile};
    use assert_matches::assert_matches;

    fn samples(n: i32) -> Vec<TrainingSample> {
        (0..n)
            .map(|i| {
                TrainingSample::labelled(UserProfile {
                    age: 18 + (i * 5) % 12,
                    gender: if i % 2 == 0 { Gender::Male } else { Gender::Female },
                    height_cm: 150 + (i * 7) % 40,
                    weight_kg: 45 + (i * 19) % 50,
                    activity_level: 1 + i % 5,
                    goal: Goal::try_from((i % 3) as i64).unwrap(),
                    diet_type: DietType::try_from(((i / 4) % 3) as i64).unwrap(),
                    budget_rs: 100 + (i * 29) % 300,
                    workout_time_min: 15 + (i * 23) % 75,
                })
            })
            .collect()
    }

    fn catalog() -> Vec<WorkoutEntry> {
        vec![
            WorkoutEntry::new("Cardio", Goal::FatLoss, 30, 2, 0),
            WorkoutEntry::new("Strength Training", Goal::MuscleGain, 45, 4, 1),
        ]
    }

    #[test]
    fn test_split_samples_sizes() {
        let rows = samples(50);
        let (train_rows, validation_rows) = split_samples(&rows, &TrainingConfig::default());

        assert_eq!(validation_rows.len(), 10);
        assert_eq!(train_rows.len(), 40);
    }

    #[test]
    fn test_split_is_deterministic_for_seed() {
        let rows = samples(30);
        let config = TrainingConfig::default();

        assert_eq!(split_samples(&rows, &config), split_samples(&rows, &config));
    }

    #[test]
    fn test_zero_split_keeps_all_rows() {
        let rows = samples(30);
        let config = TrainingConfig {
            validation_split: 0.0,
            ..TrainingConfig::default()
        };
        let bundle = train_with_config(&rows, &catalog(), &config).unwrap();

        assert!(bundle.metrics().is_none());
        assert!(bundle.calorie_estimator().is_fitted());
    }

    #[test]
    fn test_train_reports_metrics() {
        let bundle = train(&samples(60), &catalog()).unwrap();
        let metrics = bundle.metrics().unwrap();

        assert_eq!(metrics.sample_count, 12);
        assert!(metrics.rmse_kcal < 1.0);
        assert!(metrics.r_squared > 0.99);
        assert!(bundle.model_version().starts_with("planner_v"));
        assert_eq!(bundle.workouts().len(), 2);
    }

    #[test]
    fn test_invalid_validation_split() {
        let config = TrainingConfig {
            validation_split: 1.0,
            ..TrainingConfig::default()
        };

        assert_matches!(
            train_with_config(&samples(30), &catalog(), &config),
            Err(PlannerError::Config(_))
        );
    }

    #[test]
    fn test_small_table_reports_rows_before_hold_out() {
        let err = train(&samples(12), &catalog()).unwrap_err();
        let message = err.to_string();

        assert_matches!(err, PlannerError::Training(_));
        assert!(message.contains("12 user profiles leave 9 for fitting"), "{}", message);
        assert!(message.contains("holding out 3 for validation"), "{}", message);
    }

    #[test]
    fn test_smallest_trainable_table() {
        // ceil(13 * 0.2) = 3 held out, 10 left
        let bundle = train(&samples(13), &catalog()).unwrap();

        assert_eq!(bundle.metrics().unwrap().sample_count, 3);
    }

    #[test]
    fn test_calculate_metrics() {
        let predictions = Array1::from(vec![100.0, 150.0, 200.0]);
        let targets = Array1::from(vec![110.0, 140.0, 190.0]);

        assert!((calculate_mae(&predictions, &targets) - 10.0).abs() < 0.001);
        assert!((calculate_rmse(&predictions, &targets) - 10.0).abs() < 0.001);

        let r_squared = calculate_r_squared(&predictions, &targets);
        assert!(r_squared > 0.0 && r_squared <= 1.0);
    }
}
