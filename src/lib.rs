// Library exports for the fitness planner
// The binary and integration tests build on these modules

pub mod config;
pub mod errors;
pub mod models;
pub mod services;

pub use errors::{PlannerError, Result};
pub use services::{infer, train};
