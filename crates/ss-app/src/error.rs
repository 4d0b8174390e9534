//! Error types for the ss-app service layer.

use std::path::PathBuf;

/// Application error wrapping the backend crates' errors for the frontends.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Project error: {0}")]
    Project(String),

    #[error("Failed to read declaration file: {path}")]
    DeclarationRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Batch failed: {0}")]
    Batch(String),

    #[error("Engine error: {0}")]
    Engine(String),

    #[error("Results error: {0}")]
    Results(String),

    #[error("Batch not found: {0}")]
    BatchNotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type AppResult<T> = Result<T, AppError>;

impl From<ss_project::ProjectError> for AppError {
    fn from(err: ss_project::ProjectError) -> Self {
        AppError::Project(err.to_string())
    }
}

impl From<ss_core::ConfigError> for AppError {
    fn from(err: ss_core::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<ss_batch::BatchError> for AppError {
    fn from(err: ss_batch::BatchError) -> Self {
        AppError::Batch(err.to_string())
    }
}

impl From<ss_engine::EngineError> for AppError {
    fn from(err: ss_engine::EngineError) -> Self {
        AppError::Engine(err.to_string())
    }
}

impl From<ss_results::ResultsError> for AppError {
    fn from(err: ss_results::ResultsError) -> Self {
        AppError::Results(err.to_string())
    }
}
