use thiserror::Error;

/// Errors surfaced by the planning pipeline
#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("Schema error in {table}: {message}")]
    Schema { table: String, message: String },
    #[error("Model not fitted: {0}")]
    NotFitted(&'static str),
    #[error("Unknown workout label: {0}")]
    UnknownLabel(i64),
    #[error("Training failed: {0}")]
    Training(String),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PlannerError {
    pub fn schema(table: impl Into<String>, message: impl Into<String>) -> Self {
        PlannerError::Schema {
            table: table.into(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PlannerError>;
