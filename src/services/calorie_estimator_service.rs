use linfa::prelude::*;
use linfa_linear::{FittedLinearRegression, LinearRegression};
use ndarray::{Array1, Array2, Axis};
use tracing::debug;

use crate::errors::{PlannerError, Result};
use crate::models::{CalorieFeatures, TrainingSample, UserProfile};

/// Nine predictors plus the intercept
pub const MIN_TRAINING_SAMPLES: usize = CalorieFeatures::COUNT + 1;

/// Relative residual below which a column counts as a combination of earlier ones
const COLLINEARITY_TOLERANCE: f64 = 1e-8;

#[derive(Debug, Clone)]
struct FittedEstimator {
    /// None when no feature column varies in the training table
    regression: Option<FittedLinearRegression<f64>>,
    /// Feature columns the regression was fitted on, ascending
    active: Vec<usize>,
    /// Mean training target, the prediction when there is no regression
    baseline: f64,
}

/// Regression model for the daily calorie requirement
#[derive(Debug, Clone, Default)]
pub struct CalorieEstimator {
    model: Option<FittedEstimator>,
}

impl CalorieEstimator {
    /// Create an unfitted estimator
    pub fn new() -> Self {
        Self::default()
    }

    /// Fit a new estimator in one step
    pub fn fitted(samples: &[TrainingSample]) -> Result<Self> {
        let mut estimator = Self::new();
        estimator.fit(samples)?;
        Ok(estimator)
    }

    /// Train on labelled profiles. On failure the previous model, if any,
    /// stays in place.
    ///
    /// Columns that are constant, or a linear combination of earlier columns,
    /// in the training table carry no information for least squares. They are
    /// left out of the fit and get a zero coefficient.
    pub fn fit(&mut self, samples: &[TrainingSample]) -> Result<()> {
        if samples.len() < MIN_TRAINING_SAMPLES {
            return Err(PlannerError::Training(format!(
                "Insufficient training data: need at least {} samples, got {}",
                MIN_TRAINING_SAMPLES,
                samples.len()
            )));
        }

        let (features, targets) = prepare_training_data(samples);
        let active = independent_columns(&features);
        let baseline = targets.mean().unwrap_or(0.0);

        if active.len() < CalorieFeatures::COUNT {
            debug!(
                "Dropping degenerate feature columns {:?}",
                dropped_feature_names(&active)
            );
        }

        let regression = if active.is_empty() {
            None
        } else {
            let dataset = Dataset::new(features.select(Axis(1), &active), targets);
            let model = LinearRegression::default()
                .fit(&dataset)
                .map_err(|e| PlannerError::Training(e.to_string()))?;
            Some(model)
        };

        debug!(
            "Calorie estimator fitted on {} samples using {} of {} features",
            samples.len(),
            active.len(),
            CalorieFeatures::COUNT
        );

        self.model = Some(FittedEstimator {
            regression,
            active,
            baseline,
        });
        Ok(())
    }

    /// Predict the daily calorie requirement. The value is returned as-is,
    /// including negative or extreme outputs.
    pub fn predict(&self, profile: &UserProfile) -> Result<f64> {
        let features = CalorieFeatures::from_profile(profile).to_ndarray().insert_axis(Axis(0));
        let predictions = self.predict_batch(&features)?;
        Ok(predictions[0])
    }

    /// Predict for a matrix whose columns follow `CalorieFeatures::feature_names()`
    pub fn predict_batch(&self, features: &Array2<f64>) -> Result<Array1<f64>> {
        let model = self.model()?;
        match &model.regression {
            Some(regression) => Ok(regression.predict(&features.select(Axis(1), &model.active))),
            None => Ok(Array1::from_elem(features.nrows(), model.baseline)),
        }
    }

    /// Fitted coefficients keyed by feature name
    pub fn coefficients(&self) -> Result<Vec<(&'static str, f64)>> {
        let model = self.model()?;
        let mut coefficients = vec![0.0; CalorieFeatures::COUNT];
        if let Some(regression) = &model.regression {
            for (&column, &param) in model.active.iter().zip(regression.params().iter()) {
                coefficients[column] = param;
            }
        }

        Ok(CalorieFeatures::feature_names().into_iter().zip(coefficients).collect())
    }

    pub fn intercept(&self) -> Result<f64> {
        let model = self.model()?;
        Ok(model
            .regression
            .as_ref()
            .map(|regression| regression.intercept())
            .unwrap_or(model.baseline))
    }

    pub fn is_fitted(&self) -> bool {
        self.model.is_some()
    }

    fn model(&self) -> Result<&FittedEstimator> {
        self.model.as_ref().ok_or(PlannerError::NotFitted("calorie estimator"))
    }
}

/// Build the feature matrix and target vector for training
pub fn prepare_training_data(samples: &[TrainingSample]) -> (Array2<f64>, Array1<f64>) {
    let mut features = Array2::<f64>::zeros((samples.len(), CalorieFeatures::COUNT));
    let mut targets = Array1::<f64>::zeros(samples.len());

    for (i, sample) in samples.iter().enumerate() {
        features
            .row_mut(i)
            .assign(&CalorieFeatures::from_profile(&sample.profile).to_ndarray());
        targets[i] = sample.daily_calories;
    }

    (features, targets)
}

/// Indices of the centered columns that are linearly independent of the
/// columns before them (modified Gram-Schmidt)
fn independent_columns(features: &Array2<f64>) -> Vec<usize> {
    let means = features
        .mean_axis(Axis(0))
        .unwrap_or_else(|| Array1::<f64>::zeros(features.ncols()));
    let mut basis: Vec<Array1<f64>> = Vec::new();
    let mut active = Vec::new();

    for (j, column) in features.axis_iter(Axis(1)).enumerate() {
        let mut residual = column.mapv(|x| x - means[j]);
        let norm = residual.dot(&residual).sqrt();
        if norm == 0.0 {
            continue;
        }

        for direction in &basis {
            let projection = residual.dot(direction);
            residual.scaled_add(-projection, direction);
        }

        let remaining = residual.dot(&residual).sqrt();
        if remaining <= COLLINEARITY_TOLERANCE * norm {
            continue;
        }

        basis.push(residual / remaining);
        active.push(j);
    }

    active
}

fn dropped_feature_names(active: &[usize]) -> Vec<&'static str> {
    CalorieFeatures::feature_names()
        .into_iter()
        .enumerate()
        .filter(|(j, _)| !active.contains(j))
        .map(|(_, name)| name)
        .collect()
}
