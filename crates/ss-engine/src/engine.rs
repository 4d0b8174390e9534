//! SimulationEngine trait for pluggable analysis backends.

use std::path::Path;

use crate::error::EngineResult;
use crate::types::{
    Directive, EvaluationPoint, LineGeometry, ModalRequest, ModeSet, ObjectRef, Period,
    RangeGraph, Statistics,
};

/// One mutable model state driven through a batch, one case at a time.
///
/// A SimulationEngine must implement:
/// - Directive application (configuration writes)
/// - Run primitives (statics, dynamics, modal)
/// - Result queries keyed by (object, variable, period, evaluation point)
/// - Persistence of its own data and simulation files
///
/// The batch core never inspects engine state beyond these calls.
pub trait SimulationEngine {
    /// Apply one configuration write to the model.
    fn set_directive(&mut self, directive: &Directive) -> EngineResult<()>;

    /// Solve the static equilibrium.
    fn run_statics(&mut self) -> EngineResult<()>;

    /// Run the full time-domain simulation (statics first if needed).
    fn run_dynamics(&mut self) -> EngineResult<()>;

    /// Modal analysis of one line about its current static position.
    fn modes(&mut self, line: ObjectRef, request: &ModalRequest) -> EngineResult<ModeSet>;

    /// Time history of `variable` over `period` at `point`.
    fn time_history(
        &self,
        object: ObjectRef,
        variable: &str,
        period: Period,
        point: EvaluationPoint,
    ) -> EngineResult<Vec<f64>>;

    /// Summary statistics of `variable` over `period` at `point`.
    fn statistic(
        &self,
        object: ObjectRef,
        variable: &str,
        period: Period,
        point: EvaluationPoint,
    ) -> EngineResult<Statistics>;

    /// Sample times of the logged simulation over `period`.
    fn sample_times(&self, period: Period) -> EngineResult<Vec<f64>>;

    /// Profile of `variable` along a line.
    fn range_graph(&self, line: ObjectRef, variable: &str, period: Period) -> EngineResult<RangeGraph>;

    /// Node count, section lengths and end connections of a line.
    fn line_geometry(&self, line: ObjectRef) -> EngineResult<LineGeometry>;

    /// Write the model data file.
    fn save_data(&self, path: &Path) -> EngineResult<()>;

    /// Write the simulation file (model plus logged results).
    fn save_simulation(&self, path: &Path) -> EngineResult<()>;
}
