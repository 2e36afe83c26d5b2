use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("Failed to load data: {0}")]
    LoadFailed(String),

    #[error("Save failed: {0}")]
    SaveFailed(String),

    #[error("Row {index} is out of range ({len} rows)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("I/O error: {0}")]
    Io(Box<std::io::Error>),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Reqwest error: {0}")]
    Reqwest(Box<reqwest::Error>),

    #[error("PlannerError: {0}")]
    Custom(String),
}

impl From<std::io::Error> for PlannerError {
    fn from(error: std::io::Error) -> Self {
        PlannerError::Io(Box::new(error))
    }
}

impl From<reqwest::Error> for PlannerError {
    fn from(error: reqwest::Error) -> Self {
        PlannerError::Reqwest(Box::new(error))
    }
}
