//! Simulation engine capability consumed by the batch core.
//!
//! Provides:
//! - `SimulationEngine` trait (directives, run primitives, result queries)
//! - Object, period and evaluation-point addressing
//! - `DryRunEngine`, an in-memory engine returning zero-valued results

pub mod dry_run;
pub mod engine;
pub mod error;
pub mod types;

pub use dry_run::DryRunEngine;
pub use engine::SimulationEngine;
pub use error::{EngineError, EngineResult};
pub use types::*;
