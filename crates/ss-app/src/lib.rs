//! Shared application service layer for seasweep.
//!
//! Frontends load and check declarations, run batches against an engine and
//! look up stored batches through this crate rather than wiring the plan,
//! extractor and store together themselves.

pub mod error;
pub mod project_service;
pub mod run_service;
pub mod sink;

pub use error::{AppError, AppResult};
pub use project_service::{
    CaseSummary, DeclarationSummary, list_planned_cases, load_declaration, save_declaration, summarize,
    validate_declaration,
};
pub use run_service::{
    BatchRequest, BatchResponse, RunOptions, list_batches, load_batch, run_batch, run_batch_with_progress,
};
pub use sink::DiskSink;
