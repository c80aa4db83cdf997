use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

use crate::errors::{PlannerError, Result};
use crate::models::{FoodEntry, TrainingSample, UserProfileRecord, WorkoutEntry};

pub const USER_PROFILES_FILE: &str = "user_profiles.csv";
pub const WORKOUT_PLAN_FILE: &str = "workout_plan.csv";
pub const FOOD_DATASET_FILE: &str = "food_dataset.csv";

/// In-memory reference tables. Read-only once constructed.
#[derive(Debug, Clone)]
pub struct DataStore {
    users: Vec<TrainingSample>,
    workouts: Vec<WorkoutEntry>,
    foods: Vec<FoodEntry>,
}

impl DataStore {
    /// Load the three CSV tables from a data directory
    pub fn load(data_dir: impl AsRef<Path>) -> Result<Self> {
        let data_dir = data_dir.as_ref();
        info!("Loading reference tables from {}", data_dir.display());

        let users = File::open(data_dir.join(USER_PROFILES_FILE))?;
        let workouts = File::open(data_dir.join(WORKOUT_PLAN_FILE))?;
        let foods = File::open(data_dir.join(FOOD_DATASET_FILE))?;

        Self::from_readers(users, workouts, foods)
    }

    /// Parse the three tables from arbitrary CSV sources
    pub fn from_readers<U: Read, W: Read, F: Read>(users: U, workouts: W, foods: F) -> Result<Self> {
        let user_records: Vec<UserProfileRecord> =
            read_table(users, "user_profiles", &UserProfileRecord::COLUMNS)?;
        let workouts: Vec<WorkoutEntry> = read_table(workouts, "workout_plan", &WorkoutEntry::COLUMNS)?;
        let foods: Vec<FoodEntry> = read_table(foods, "food_dataset", &FoodEntry::COLUMNS)?;

        let store = Self::from_tables(
            user_records.into_iter().map(TrainingSample::from).collect(),
            workouts,
            foods,
        );

        info!(
            "Loaded {} user profiles, {} workouts, {} foods",
            store.users.len(),
            store.workouts.len(),
            store.foods.len()
        );

        Ok(store)
    }

    /// Wrap tables that are already typed
    pub fn from_tables(users: Vec<TrainingSample>, workouts: Vec<WorkoutEntry>, foods: Vec<FoodEntry>) -> Self {
        Self { users, workouts, foods }
    }

    pub fn users(&self) -> &[TrainingSample] {
        &self.users
    }

    pub fn workouts(&self) -> &[WorkoutEntry] {
        &self.workouts
    }

    pub fn foods(&self) -> &[FoodEntry] {
        &self.foods
    }
}

fn read_table<R: Read, T: DeserializeOwned>(source: R, table: &str, columns: &[&str]) -> Result<Vec<T>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(source);

    let headers = reader
        .headers()
        .map_err(|e| PlannerError::schema(table, e.to_string()))?
        .clone();

    let missing: Vec<&str> = columns
        .iter()
        .copied()
        .filter(|column| !headers.iter().any(|header| header == *column))
        .collect();

    if !missing.is_empty() {
        return Err(PlannerError::schema(
            table,
            format!("missing required columns: {}", missing.join(", ")),
        ));
    }

    let mut rows = Vec::new();
    for record in reader.deserialize::<T>() {
        let row = record.map_err(|e| PlannerError::schema(table, e.to_string()))?;
        rows.push(row);
    }

    debug!("Parsed {} rows from {}", rows.len(), table);
    Ok(rows)
}
