use ss_core::ConfigError;
use ss_engine::EngineError;
use ss_results::ResultsError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PostError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    #[error("Results error: {0}")]
    Results(#[from] ResultsError),

    #[error("Selector out of range on {object}: {reason}")]
    Selector { object: String, reason: String },
}

pub type PostResult<T> = Result<T, PostError>;
