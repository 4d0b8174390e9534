//! Error types for batch execution.

use ss_core::ConfigError;
use ss_engine::EngineError;
use ss_post::PostError;
use ss_results::ResultsError;
use thiserror::Error;

/// Failures that abort a batch. Nothing is retried: cases completed before
/// the failure keep whatever their sink already persisted.
#[derive(Error, Debug)]
pub enum BatchError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Engine error in case {case_id}: {source}")]
    Engine {
        case_id: String,
        #[source]
        source: EngineError,
    },

    #[error("Extraction failed in case {case_id}: {source}")]
    Extract {
        case_id: String,
        #[source]
        source: PostError,
    },

    #[error("Results error: {0}")]
    Results(#[from] ResultsError),

    #[error("Failed to save case {case_id}: {message}")]
    Save { case_id: String, message: String },
}

pub type BatchResult<T> = Result<T, BatchError>;

impl BatchError {
    pub(crate) fn engine(case_id: &str) -> impl FnOnce(EngineError) -> Self + '_ {
        move |source| BatchError::Engine {
            case_id: case_id.to_string(),
            source,
        }
    }

    pub(crate) fn extract(case_id: &str) -> impl FnOnce(PostError) -> Self + '_ {
        move |source| BatchError::Extract {
            case_id: case_id.to_string(),
            source,
        }
    }
}
