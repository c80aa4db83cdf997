use crate::models::{DietType, FoodEntry};

pub const DEFAULT_TOP_N: usize = 3;

/// Pick up to `top_n` foods allowed by the diet ceiling whose individual cost
/// fits the budget, highest protein first.
///
/// The budget check is per item: the combined cost of the selection can exceed
/// `budget_ceiling`. Ties on protein keep catalog order.
pub fn select_foods(
    foods: &[FoodEntry],
    diet_ceiling: DietType,
    budget_ceiling: f64,
    top_n: usize,
) -> Vec<FoodEntry> {
    let mut selected: Vec<FoodEntry> = foods
        .iter()
        .filter(|food| food.diet_type <= diet_ceiling && food.cost_rs <= budget_ceiling)
        .cloned()
        .collect();

    // stable
    selected.sort_by(|a, b| protein_rank(b).total_cmp(&protein_rank(a)));
    selected.truncate(top_n);
    selected
}

/// Missing protein values sort after every real one
fn protein_rank(food: &FoodEntry) -> f64 {
    if food.protein.is_nan() {
        f64::NEG_INFINITY
    } else {
        food.protein
    }
}
