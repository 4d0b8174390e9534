//! ss-batch: scenario plans and the batch driver.
//!
//! A declaration resolves into a [`Batch`]: the scenario plan (one of three
//! closed batch kinds), the analysis to run per case and the result extractor.
//! The [`BatchDriver`] walks the plan case by case against one engine and
//! folds each case's monitor row into the batch aggregate.

pub mod analysis;
pub mod batch;
pub mod case;
pub mod context;
pub mod driver;
pub mod error;
pub mod plan;
pub mod progress;
pub mod sink;

pub use analysis::Analysis;
pub use batch::Batch;
pub use case::Case;
pub use context::BatchRunContext;
pub use driver::BatchDriver;
pub use error::{BatchError, BatchResult};
pub use plan::{BatchKind, HarmonicSweep, ParameterSweep, PlanKind, ScenarioPlan, SeedRepetition};
pub use progress::{BatchProgressEvent, BatchStage};
pub use sink::{CaseRecord, CaseSink, NoSave};
