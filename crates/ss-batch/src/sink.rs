//! Per-case persistence seam.

use ss_engine::SimulationEngine;
use ss_results::{BatchAggregate, ResultStore};

use crate::case::Case;
use crate::error::BatchResult;

/// Everything a sink may persist for one finished case.
pub struct CaseRecord<'a> {
    pub case: &'a Case,
    pub results: &'a ResultStore,
    pub row: &'a [f64],
}

/// Receives each completed case (its commit point) and the final aggregate.
pub trait CaseSink {
    fn save_case(&mut self, record: &CaseRecord<'_>, engine: &dyn SimulationEngine) -> BatchResult<()>;

    fn finish_batch(&mut self, _aggregate: &BatchAggregate, _completed_cases: &[String]) -> BatchResult<()> {
        Ok(())
    }
}

/// Sink that keeps nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSave;

impl CaseSink for NoSave {
    fn save_case(&mut self, _record: &CaseRecord<'_>, _engine: &dyn SimulationEngine) -> BatchResult<()> {
        Ok(())
    }
}
