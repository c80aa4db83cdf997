use tracing::{debug, info};

use crate::errors::Result;
use crate::models::{BudgetBreakdown, FoodEntry, MacroBreakdown, PlanRequest, PlanResult, WorkoutEntry};
use crate::services::calorie_estimator_service::CalorieEstimator;
use crate::services::food_selector_service::{select_foods, DEFAULT_TOP_N};
use crate::services::model_training_service::ModelBundle;
use crate::services::workout_classifier_service::{
    resolve_workout_name, WorkoutClassifier, DEFAULT_WORKOUT_DIFFICULTY,
};

/// Assembles a plan from the fitted models and reference tables
#[derive(Debug, Clone, Copy)]
pub struct PlanComposer {
    top_n: usize,
}

impl Default for PlanComposer {
    fn default() -> Self {
        Self { top_n: DEFAULT_TOP_N }
    }
}

impl PlanComposer {
    pub fn new(top_n: usize) -> Self {
        Self { top_n }
    }

    pub fn top_n(&self) -> usize {
        self.top_n
    }

    /// Build one plan. Deterministic for fixed models and tables.
    pub fn compose(
        &self,
        request: &PlanRequest,
        estimator: &CalorieEstimator,
        classifier: &WorkoutClassifier,
        workouts: &[WorkoutEntry],
        foods: &[FoodEntry],
    ) -> Result<PlanResult> {
        let daily_calories = estimator.predict(request)?;

        let workout_label = classifier.predict(
            request.goal,
            request.workout_time_min,
            DEFAULT_WORKOUT_DIFFICULTY,
        )?;
        let workout_name = resolve_workout_name(workout_label, workouts)?;

        let budget_rs = request.budget_rs as f64;
        let recommended_foods = select_foods(foods, request.diet_type, budget_rs, self.top_n);
        debug!(
            "Selected {} foods for diet ceiling {} and budget Rs {}",
            recommended_foods.len(),
            request.diet_type,
            request.budget_rs
        );

        let macro_breakdown = MacroBreakdown::compute(daily_calories, &recommended_foods);
        let budget_breakdown = BudgetBreakdown::compute(budget_rs, &recommended_foods);

        Ok(PlanResult {
            daily_calories,
            workout_name,
            workout_label,
            recommended_foods,
            macro_breakdown,
            budget_breakdown,
        })
    }

    /// Compose against a trained bundle
    pub fn infer(&self, bundle: &ModelBundle, foods: &[FoodEntry], request: &PlanRequest) -> Result<PlanResult> {
        let plan = self.compose(
            request,
            bundle.calorie_estimator(),
            bundle.workout_classifier(),
            bundle.workouts(),
            foods,
        )?;

        info!(
            "Generated plan: {} kcal/day, workout {}, {} foods",
            plan.display_calories(),
            plan.workout_name,
            plan.recommended_foods.len()
        );

        Ok(plan)
    }
}

/// Compose with the default top-3 food selection
pub fn infer(bundle: &ModelBundle, foods: &[FoodEntry], request: &PlanRequest) -> Result<PlanResult> {
    PlanComposer::default().infer(bundle, foods, request)
}
