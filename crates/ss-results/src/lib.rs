//! ss-results: result tables, batch aggregation, export and case storage.

pub mod aggregate;
pub mod export;
pub mod hash;
pub mod store;
pub mod table;
pub mod types;

pub use aggregate::{BatchAggregate, finalize_batch};
pub use export::{ExportFormat, write_table};
pub use hash::compute_batch_id;
pub use store::BatchStore;
pub use table::{Column, Phase, ResultStore, Table};
pub use types::*;

pub type ResultsResult<T> = Result<T, ResultsError>;

#[derive(thiserror::Error, Debug)]
pub enum ResultsError {
    #[error("Duplicate column '{name}' in {table} table")]
    DuplicateColumn { table: String, name: String },

    #[error("Shape mismatch in {context}: expected {expected}, found {found}")]
    Shape {
        context: String,
        expected: usize,
        found: usize,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Case not found: {case_id}")]
    CaseNotFound { case_id: String },

    #[error("Batch not found: {batch_id}")]
    BatchNotFound { batch_id: String },

    #[error("Unsupported export format: {format}")]
    UnsupportedFormat { format: String },

    #[error("Invalid path: {message}")]
    InvalidPath { message: String },
}
