use ndarray::Array1;
use serde::{Deserialize, Serialize};

use super::{Goal, UserProfile, WorkoutEntry};

/// Calorie estimator input features.
/// Built from named profile fields so the column order is fixed in one place.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalorieFeatures {
    pub age: f64,
    pub gender: f64,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub activity_level: f64,
    pub goal: f64,
    pub diet_type: f64,
    pub budget_rs: f64,
    pub workout_time_min: f64,
}

impl CalorieFeatures {
    pub const COUNT: usize = 9;

    pub fn from_profile(profile: &UserProfile) -> Self {
        Self {
            age: profile.age as f64,
            gender: profile.gender.code() as f64,
            height_cm: profile.height_cm as f64,
            weight_kg: profile.weight_kg as f64,
            activity_level: profile.activity_level as f64,
            goal: profile.goal.code() as f64,
            diet_type: profile.diet_type.code() as f64,
            budget_rs: profile.budget_rs as f64,
            workout_time_min: profile.workout_time_min as f64,
        }
    }

    /// Column names in model order
    pub fn feature_names() -> [&'static str; Self::COUNT] {
        [
            "age",
            "gender",
            "height_cm",
            "weight_kg",
            "activity_level",
            "goal",
            "diet_type",
            "budget_rs",
            "workout_time_min",
        ]
    }

    /// Convert to a feature vector in `feature_names()` order
    pub fn to_ndarray(&self) -> Array1<f64> {
        Array1::from(vec![
            self.age,
            self.gender,
            self.height_cm,
            self.weight_kg,
            self.activity_level,
            self.goal,
            self.diet_type,
            self.budget_rs,
            self.workout_time_min,
        ])
    }
}

impl From<&UserProfile> for CalorieFeatures {
    fn from(profile: &UserProfile) -> Self {
        Self::from_profile(profile)
    }
}

/// Workout classifier input features
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorkoutFeatures {
    pub goal: f64,
    pub time_required: f64,
    pub difficulty: f64,
}

impl WorkoutFeatures {
    pub const COUNT: usize = 3;

    pub fn new(goal: Goal, time_required: i32, difficulty: i32) -> Self {
        Self {
            goal: goal.code() as f64,
            time_required: time_required as f64,
            difficulty: difficulty as f64,
        }
    }

    pub fn feature_names() -> [&'static str; Self::COUNT] {
        ["goal", "time_required", "difficulty"]
    }

    pub fn to_ndarray(&self) -> Array1<f64> {
        Array1::from(vec![self.goal, self.time_required, self.difficulty])
    }
}

impl From<&WorkoutEntry> for WorkoutFeatures {
    fn from(entry: &WorkoutEntry) -> Self {
        Self::new(entry.goal, entry.time_required, entry.difficulty)
    }
}
