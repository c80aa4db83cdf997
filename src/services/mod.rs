// Planning pipeline services

pub mod data_store_service;
pub mod calorie_estimator_service;
pub mod workout_classifier_service;
pub mod food_selector_service;
pub mod model_training_service;
pub mod plan_composer_service;

pub use data_store_service::DataStore;
pub use calorie_estimator_service::CalorieEstimator;
pub use workout_classifier_service::{resolve_workout_name, WorkoutClassifier, DEFAULT_WORKOUT_DIFFICULTY};
pub use food_selector_service::{select_foods, DEFAULT_TOP_N};
pub use model_training_service::{train, train_with_config, ModelBundle, ModelMetrics, TrainingConfig};
pub use plan_composer_service::{infer, PlanComposer};
