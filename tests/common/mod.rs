// Shared fixtures for integration tests
#![allow(dead_code)]

use fitness_planner::models::{DietType, FoodEntry, Gender, Goal, TrainingSample, UserProfile, WorkoutEntry};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Seeded synthetic profile table labelled with the reference formula
pub fn synthetic_users(count: usize, seed: u64) -> Vec<TrainingSample> {
    let mut rng = StdRng::seed_from_u64(seed);

    (0..count)
        .map(|_| {
            let profile = UserProfile {
                age: rng.gen_range(18..30),
                gender: if rng.gen_bool(0.5) { Gender::Male } else { Gender::Female },
                height_cm: rng.gen_range(150..190),
                weight_kg: rng.gen_range(45..95),
                activity_level: rng.gen_range(1..6),
                goal: Goal::try_from(rng.gen_range(0..3i64)).unwrap(),
                diet_type: DietType::try_from(rng.gen_range(0..3i64)).unwrap(),
                budget_rs: rng.gen_range(100..400),
                workout_time_min: rng.gen_range(15..90),
            };
            TrainingSample::labelled(profile)
        })
        .collect()
}

pub fn workout_catalog() -> Vec<WorkoutEntry> {
    vec![
        WorkoutEntry::new("Cardio", Goal::FatLoss, 30, 2, 0),
        WorkoutEntry::new("Strength Training", Goal::MuscleGain, 45, 4, 1),
        WorkoutEntry::new("HIIT", Goal::FatLoss, 25, 5, 2),
        WorkoutEntry::new("Yoga", Goal::Maintain, 40, 2, 3),
        WorkoutEntry::new("Bodyweight", Goal::MuscleGain, 20, 3, 4),
        WorkoutEntry::new("Stretching", Goal::Maintain, 15, 1, 5),
    ]
}

pub fn food_catalog() -> Vec<FoodEntry> {
    vec![
        FoodEntry::new("Rice", 130.0, 2.7, 10.0, DietType::Vegetarian),
        FoodEntry::new("Chapati", 120.0, 3.5, 8.0, DietType::Vegetarian),
        FoodEntry::new("Dal", 120.0, 9.0, 15.0, DietType::Vegetarian),
        FoodEntry::new("Curd", 98.0, 11.0, 12.0, DietType::Vegetarian),
        FoodEntry::new("Egg", 155.0, 13.0, 8.0, DietType::Eggitarian),
        FoodEntry::new("Paneer", 265.0, 18.0, 35.0, DietType::Vegetarian),
        FoodEntry::new("Chicken", 240.0, 27.0, 40.0, DietType::NonVegetarian),
        FoodEntry::new("Fish", 200.0, 22.0, 45.0, DietType::NonVegetarian),
        FoodEntry::new("Vegetable Curry", 90.0, 4.0, 10.0, DietType::Vegetarian),
        FoodEntry::new("Sprouts", 150.0, 12.0, 20.0, DietType::Vegetarian),
    ]
}

pub fn food_names(foods: &[FoodEntry]) -> Vec<&str> {
    foods.iter().map(|food| food.food_name.as_str()).collect()
}
