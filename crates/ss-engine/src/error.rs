//! Error types for engine operations.

use thiserror::Error;

/// Failures raised by the simulation engine while applying a directive,
/// running an analysis, or answering a result query.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Directive rejected: {target} ({reason})")]
    Rejected { target: String, reason: String },

    #[error("Analysis diverged: {what}")]
    Diverged { what: String },

    #[error("Unknown object: {object}")]
    UnknownObject { object: String },

    #[error("Unknown variable '{variable}' for {object}")]
    UnknownVariable { object: String, variable: String },

    #[error("Invalid evaluation point {point} for {object}")]
    InvalidPoint { object: String, point: String },

    #[error("Results requested before {what} was run")]
    NotRun { what: &'static str },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Backend error: {message}")]
    Backend { message: String },
}

pub type EngineResult<T> = Result<T, EngineError>;
