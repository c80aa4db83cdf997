use serde::{Deserialize, Serialize};

use super::Goal;

/// One row of the workout catalog (`workout_plan.csv`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutEntry {
    /// Human-readable workout name, e.g. "Strength Training"
    pub workout_type: String,
    pub goal: Goal,
    /// Session length in minutes
    pub time_required: i32,
    /// Difficulty on a 1-5 scale
    pub difficulty: i32,
    /// Class label the workout classifier predicts
    pub workout_label: i64,
}

impl WorkoutEntry {
    pub const COLUMNS: [&'static str; 5] = [
        "workout_type",
        "goal",
        "time_required",
        "difficulty",
        "workout_label",
    ];

    pub fn new(
        workout_type: impl Into<String>,
        goal: Goal,
        time_required: i32,
        difficulty: i32,
        workout_label: i64,
    ) -> Self {
        Self {
            workout_type: workout_type.into(),
            goal,
            time_required,
            difficulty,
            workout_label,
        }
    }
}
