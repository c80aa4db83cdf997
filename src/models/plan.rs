use serde::{Deserialize, Serialize};

use super::FoodEntry;

/// Energy per gram of protein (kcal)
pub const PROTEIN_KCAL_PER_GRAM: f64 = 4.0;

/// Share of the daily calorie target allotted to fat
pub const FAT_CALORIE_SHARE: f64 = 0.25;

/// Protein/carbohydrate/fat split of the daily calorie target, in kcal
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacroBreakdown {
    pub protein_kcal: f64,
    /// May be negative when protein and fat exceed the target
    pub carb_kcal: f64,
    pub fat_kcal: f64,
}

impl MacroBreakdown {
    pub fn compute(daily_calories: f64, foods: &[FoodEntry]) -> Self {
        // missing protein values count as zero
        let protein_kcal = foods
            .iter()
            .map(|f| f.protein)
            .filter(|protein| !protein.is_nan())
            .sum::<f64>()
            * PROTEIN_KCAL_PER_GRAM;
        let fat_kcal = daily_calories * FAT_CALORIE_SHARE;
        let carb_kcal = daily_calories - protein_kcal - fat_kcal;

        Self {
            protein_kcal,
            carb_kcal,
            fat_kcal,
        }
    }
}

/// Spend of the recommended foods against the requested budget
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BudgetBreakdown {
    pub used_rs: f64,
    /// May be negative: each food is checked against the budget on its own
    pub remaining_rs: f64,
}

impl BudgetBreakdown {
    pub fn compute(budget_rs: f64, foods: &[FoodEntry]) -> Self {
        let used_rs = foods.iter().map(|f| f.cost_rs).sum::<f64>();

        Self {
            used_rs,
            remaining_rs: budget_rs - used_rs,
        }
    }

    pub fn is_over_budget(&self) -> bool {
        self.remaining_rs < 0.0
    }
}

/// Informational conditions worth showing next to a plan. None of these
/// make the plan invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanNotice {
    OverBudget,
    NegativeCarbs,
    NoFoodsSelected,
}

/// Complete recommendation for a single request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanResult {
    /// Raw estimator output, unclamped
    pub daily_calories: f64,
    pub workout_name: String,
    pub workout_label: i64,
    /// Protein-descending, at most the composer's `top_n` entries
    pub recommended_foods: Vec<FoodEntry>,
    pub macro_breakdown: MacroBreakdown,
    pub budget_breakdown: BudgetBreakdown,
}

impl PlanResult {
    /// Calories as shown to the user: truncated toward zero, not rounded
    pub fn display_calories(&self) -> i64 {
        self.daily_calories.trunc() as i64
    }

    pub fn notices(&self) -> Vec<PlanNotice> {
        let mut notices = Vec::new();

        if self.budget_breakdown.is_over_budget() {
            notices.push(PlanNotice::OverBudget);
        }
        if self.macro_breakdown.carb_kcal < 0.0 {
            notices.push(PlanNotice::NegativeCarbs);
        }
        if self.recommended_foods.is_empty() {
            notices.push(PlanNotice::NoFoodsSelected);
        }

        notices
    }

    /// Short plain-text reading of the plan
    pub fn interpretation(&self) -> Vec<String> {
        let notices = self.notices();
        let mut lines = vec![
            format!(
                "Your body requires approximately {} kcal/day to meet your goal.",
                self.display_calories()
            ),
            format!(
                "The workout {} matches your available time and fitness goal.",
                self.workout_name
            ),
        ];

        if notices.contains(&PlanNotice::NoFoodsSelected) {
            lines.push("No food fits your diet type and budget; consider raising the budget.".to_string());
        } else {
            lines.push("The diet focuses on high-protein foods for muscle recovery and fat control.".to_string());
        }

        if notices.contains(&PlanNotice::OverBudget) {
            lines.push(format!(
                "The recommended foods exceed your daily budget by Rs {:.2}.",
                -self.budget_breakdown.remaining_rs
            ));
        } else {
            lines.push("Your daily food spending stays within your budget.".to_string());
        }

        if notices.contains(&PlanNotice::NegativeCarbs) {
            lines.push("Protein and fat already cover your calorie target, leaving no room for carbohydrates.".to_string());
        }

        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DietType;

    fn paneer_and_rice() -> Vec<FoodEntry> {
        vec![
            FoodEntry::new("Paneer", 265.0, 18.0, 35.0, DietType::Vegetarian),
            FoodEntry::new("Rice", 130.0, 2.7, 10.0, DietType::Vegetarian),
        ]
    }

    #[test]
    fn test_macro_breakdown() {
        let macros = MacroBreakdown::compute(2000.0, &paneer_and_rice());

        assert!((macros.protein_kcal - 82.8).abs() < 1e-9);
        assert_eq!(macros.fat_kcal, 500.0);
        assert!((macros.carb_kcal - 1417.2).abs() < 1e-9);
    }

    #[test]
    fn test_macro_breakdown_empty_selection() {
        let macros = MacroBreakdown::compute(1500.0, &[]);

        assert_eq!(macros.protein_kcal, 0.0);
        assert_eq!(macros.fat_kcal, 375.0);
        assert_eq!(macros.carb_kcal, 1125.0);
    }

    #[test]
    fn test_macro_breakdown_skips_missing_protein() {
        let mut foods = paneer_and_rice();
        foods.push(FoodEntry::new("Unlabelled", 150.0, f64::NAN, 20.0, DietType::Vegetarian));
        let macros = MacroBreakdown::compute(2000.0, &foods);

        assert!((macros.protein_kcal - 82.8).abs() < 1e-9);
        assert!((macros.carb_kcal - 1417.2).abs() < 1e-9);
    }

    #[test]
    fn test_negative_values_are_not_clamped() {
        let macros = MacroBreakdown::compute(50.0, &paneer_and_rice());
        assert!(macros.carb_kcal < 0.0);

        let budget = BudgetBreakdown::compute(40.0, &paneer_and_rice());
        assert_eq!(budget.used_rs, 45.0);
        assert_eq!(budget.remaining_rs, -5.0);
        assert!(budget.is_over_budget());
    }

    #[test]
    fn test_display_calories_truncates() {
        let mut plan = PlanResult {
            daily_calories: 1799.99,
            workout_name: "Yoga".to_string(),
            workout_label: 3,
            recommended_foods: paneer_and_rice(),
            macro_breakdown: MacroBreakdown::compute(1799.99, &paneer_and_rice()),
            budget_breakdown: BudgetBreakdown::compute(200.0, &paneer_and_rice()),
        };
        assert_eq!(plan.display_calories(), 1799);

        plan.daily_calories = -12.7;
        assert_eq!(plan.display_calories(), -12);
    }

    #[test]
    fn test_notices() {
        let plan = PlanResult {
            daily_calories: 50.0,
            workout_name: "Cardio".to_string(),
            workout_label: 0,
            recommended_foods: paneer_and_rice(),
            macro_breakdown: MacroBreakdown::compute(50.0, &paneer_and_rice()),
            budget_breakdown: BudgetBreakdown::compute(40.0, &paneer_and_rice()),
        };

        assert_eq!(plan.notices(), vec![PlanNotice::OverBudget, PlanNotice::NegativeCarbs]);
        assert!(plan.interpretation().iter().any(|line| line.contains("exceed your daily budget by Rs 5.00")));
    }
}
