use serde::{Deserialize, Serialize};

use super::DietType;

/// One row of the food catalog (`food_dataset.csv`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodEntry {
    pub food_name: String,
    /// Energy per serving (kcal)
    pub calories: f64,
    /// Protein per serving (g)
    pub protein: f64,
    /// Cost per serving in rupees
    pub cost_rs: f64,
    pub diet_type: DietType,
}

impl FoodEntry {
    pub const COLUMNS: [&'static str; 5] = ["food_name", "calories", "protein", "cost_rs", "diet_type"];

    pub fn new(
        food_name: impl Into<String>,
        calories: f64,
        protein: f64,
        cost_rs: f64,
        diet_type: DietType,
    ) -> Self {
        Self {
            food_name: food_name.into(),
            calories,
            protein,
            cost_rs,
            diet_type,
        }
    }
}
