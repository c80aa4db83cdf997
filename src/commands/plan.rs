use anyhow::{Context, Result};
use clap::Args;

use fitness_planner::config::PlannerConfig;
use fitness_planner::models::{DietType, Gender, Goal, PlanRequest, PlanResult};
use fitness_planner::services::PlanComposer;

use super::load_and_train;

#[derive(Args)]
pub struct PlanCommand {
    /// Age in years
    #[arg(long, default_value_t = 22)]
    age: i32,

    /// female or male
    #[arg(long, default_value = "female")]
    gender: Gender,

    /// Height in centimetres
    #[arg(long, default_value_t = 170)]
    height: i32,

    /// Weight in kilograms
    #[arg(long, default_value_t = 65)]
    weight: i32,

    /// Activity level from 1 (low) to 5 (high)
    #[arg(long, default_value_t = 3)]
    activity: i32,

    /// fat-loss, muscle-gain or maintain
    #[arg(long, default_value = "fat-loss")]
    goal: Goal,

    /// vegetarian, eggitarian or non-vegetarian
    #[arg(long, default_value = "vegetarian")]
    diet: DietType,

    /// Daily food budget in rupees
    #[arg(long, default_value_t = 200)]
    budget: i32,

    /// Available workout time in minutes
    #[arg(long, default_value_t = 60)]
    time: i32,

    /// Number of foods to recommend (overrides configuration)
    #[arg(long)]
    top_n: Option<usize>,

    /// Print the plan as JSON
    #[arg(long)]
    json: bool,
}

impl PlanCommand {
    /// `--top-n` follows the same rule as the configured value
    fn top_n(&self, config: &PlannerConfig) -> Result<usize> {
        let top_n = self.top_n.unwrap_or(config.top_n);
        PlannerConfig {
            top_n,
            ..config.clone()
        }
        .validate()
        .context("Invalid --top-n")?;
        Ok(top_n)
    }

    pub fn execute(self, config: &PlannerConfig) -> Result<()> {
        let top_n = self.top_n(config)?;
        let (store, bundle) = load_and_train(config)?;

        let request = PlanRequest {
            age: self.age,
            gender: self.gender,
            height_cm: self.height,
            weight_kg: self.weight,
            activity_level: self.activity,
            goal: self.goal,
            diet_type: self.diet,
            budget_rs: self.budget,
            workout_time_min: self.time,
        };

        let composer = PlanComposer::new(top_n);
        let plan = composer
            .infer(&bundle, store.foods(), &request)
            .context("Cannot generate plan")?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&plan)?);
        } else {
            print_plan(&plan);
        }

        Ok(())
    }
}

fn print_plan(plan: &PlanResult) {
    println!("Daily calories required: {} kcal/day", plan.display_calories());
    println!("Recommended workout: {}", plan.workout_name);

    println!();
    println!("Recommended foods:");
    if plan.recommended_foods.is_empty() {
        println!("  (none within your diet type and budget)");
    }
    for (i, food) in plan.recommended_foods.iter().enumerate() {
        println!(
            "  {}. {:<18} protein {:>5.1} g  cost Rs {:>6.2}  {:>5.0} kcal",
            i + 1,
            food.food_name,
            food.protein,
            food.cost_rs,
            food.calories
        );
    }

    let macros = &plan.macro_breakdown;
    println!();
    println!("Calorie distribution:");
    println!("  Protein        {:>8.1} kcal", macros.protein_kcal);
    println!("  Carbohydrates  {:>8.1} kcal", macros.carb_kcal);
    println!("  Fats           {:>8.1} kcal", macros.fat_kcal);

    let budget = &plan.budget_breakdown;
    println!();
    println!("Budget utilization:");
    println!("  Used       Rs {:>8.2}", budget.used_rs);
    println!("  Remaining  Rs {:>8.2}", budget.remaining_rs);

    println!();
    println!("Interpretation:");
    for line in plan.interpretation() {
        println!("  • {}", line);
    }
}
