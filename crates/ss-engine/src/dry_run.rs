//! In-memory engine for checking a declaration without the real backend.
//!
//! Directives are recorded and every query answers with zero-valued results
//! shaped like the real ones, so naming, column widths and collisions can be
//! exercised end to end.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::Path;

use crate::engine::SimulationEngine;
use crate::error::{EngineError, EngineResult};
use crate::types::{
    Directive, DirectiveValue, EvaluationPoint, LineGeometry, ModalRequest, ModeDetails, ModeSet,
    ObjectRef, Period, RangeGraph, Statistics,
};

#[derive(Debug, Clone)]
pub struct DryRunEngine {
    /// Number of logged samples returned by time-domain queries
    pub sample_count: usize,
    /// Spacing of logged samples (seconds)
    pub sample_interval_s: f64,
    /// Geometry used for lines without an explicit entry
    pub default_line: LineGeometry,
    lines: BTreeMap<u32, LineGeometry>,
    applied: Vec<Directive>,
    statics_runs: usize,
    dynamics_runs: usize,
    statics_done: bool,
    dynamics_done: bool,
}

impl Default for DryRunEngine {
    fn default() -> Self {
        Self {
            sample_count: 11,
            sample_interval_s: 0.1,
            default_line: LineGeometry::uniform(11, 10, 10.0, true),
            lines: BTreeMap::new(),
            applied: Vec::new(),
            statics_runs: 0,
            dynamics_runs: 0,
            statics_done: false,
            dynamics_done: false,
        }
    }
}

impl DryRunEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_line(mut self, id: u32, geometry: LineGeometry) -> Self {
        self.lines.insert(id, geometry);
        self
    }

    pub fn with_samples(mut self, sample_count: usize, sample_interval_s: f64) -> Self {
        self.sample_count = sample_count;
        self.sample_interval_s = sample_interval_s;
        self
    }

    /// Every directive applied so far, in order.
    pub fn applied(&self) -> &[Directive] {
        &self.applied
    }

    /// Most recent value written to `object.property`.
    pub fn current_value(&self, object: ObjectRef, property: &str) -> Option<&DirectiveValue> {
        self.applied
            .iter()
            .rev()
            .find(|d| d.object == object && d.property == property)
            .map(|d| &d.value)
    }

    pub fn statics_runs(&self) -> usize {
        self.statics_runs
    }

    pub fn dynamics_runs(&self) -> usize {
        self.dynamics_runs
    }

    fn geometry(&self, line: ObjectRef) -> EngineResult<&LineGeometry> {
        match line {
            ObjectRef::Line(id) => Ok(self.lines.get(&id).unwrap_or(&self.default_line)),
            other => Err(EngineError::UnknownObject {
                object: format!("{} is not a line", other),
            }),
        }
    }

    fn check_point(&self, object: ObjectRef, point: EvaluationPoint) -> EngineResult<()> {
        let invalid = || EngineError::InvalidPoint {
            object: object.to_string(),
            point: point.to_string(),
        };
        match object {
            ObjectRef::Line(_) => {
                let geometry = self.geometry(object)?;
                match point {
                    EvaluationPoint::Origin => Err(invalid()),
                    EvaluationPoint::EndB if geometry.end_b_anchored => Err(invalid()),
                    EvaluationPoint::Node(n) if n == 0 || n > geometry.node_count => Err(invalid()),
                    EvaluationPoint::ArcLength(s) if s < 0.0 || s > geometry.total_length() => {
                        Err(invalid())
                    }
                    _ => Ok(()),
                }
            }
            _ => match point {
                EvaluationPoint::Origin => Ok(()),
                _ => Err(invalid()),
            },
        }
    }

    fn logged_samples(&self, period: Period) -> EngineResult<usize> {
        match period {
            Period::StaticState if self.statics_done || self.dynamics_done => Ok(1),
            Period::StaticState => Err(EngineError::NotRun { what: "statics" }),
            _ if self.dynamics_done => Ok(self.sample_count),
            _ => Err(EngineError::NotRun { what: "dynamics" }),
        }
    }
}

impl SimulationEngine for DryRunEngine {
    fn set_directive(&mut self, directive: &Directive) -> EngineResult<()> {
        if let DirectiveValue::Number(v) = directive.value {
            if !v.is_finite() {
                return Err(EngineError::Rejected {
                    target: directive.target(),
                    reason: format!("non-finite value {}", v),
                });
            }
        }
        tracing::trace!(directive = %directive, "dry-run directive");
        self.applied.push(directive.clone());
        // Any configuration change invalidates previous results.
        self.statics_done = false;
        self.dynamics_done = false;
        Ok(())
    }

    fn run_statics(&mut self) -> EngineResult<()> {
        self.statics_runs += 1;
        self.statics_done = true;
        Ok(())
    }

    fn run_dynamics(&mut self) -> EngineResult<()> {
        self.dynamics_runs += 1;
        self.statics_done = true;
        self.dynamics_done = true;
        Ok(())
    }

    fn modes(&mut self, line: ObjectRef, request: &ModalRequest) -> EngineResult<ModeSet> {
        if !self.statics_done {
            return Err(EngineError::NotRun { what: "statics" });
        }
        if request.last_mode < request.first_mode {
            return Err(EngineError::Backend {
                message: format!(
                    "last mode {} precedes first mode {}",
                    request.last_mode, request.first_mode
                ),
            });
        }
        let node_count = self.geometry(line)?.node_count;
        let shape = if request.calculate_shapes {
            vec![[0.0; 3]; node_count]
        } else {
            Vec::new()
        };
        let modes = (request.first_mode..=request.last_mode)
            .map(|number| ModeDetails {
                number,
                shape_local: shape.clone(),
                shape_global: shape.clone(),
                ..ModeDetails::default()
            })
            .collect();
        Ok(ModeSet { node_count, modes })
    }

    fn time_history(
        &self,
        object: ObjectRef,
        _variable: &str,
        period: Period,
        point: EvaluationPoint,
    ) -> EngineResult<Vec<f64>> {
        self.check_point(object, point)?;
        Ok(vec![0.0; self.logged_samples(period)?])
    }

    fn statistic(
        &self,
        object: ObjectRef,
        _variable: &str,
        period: Period,
        point: EvaluationPoint,
    ) -> EngineResult<Statistics> {
        self.check_point(object, point)?;
        let samples = vec![0.0; self.logged_samples(period)?];
        Ok(Statistics::from_samples(&samples))
    }

    fn sample_times(&self, period: Period) -> EngineResult<Vec<f64>> {
        let n = self.logged_samples(period)?;
        let start = match period {
            Period::Specified { from_s, .. } => from_s,
            _ => 0.0,
        };
        Ok((0..n).map(|i| start + i as f64 * self.sample_interval_s).collect())
    }

    fn range_graph(&self, line: ObjectRef, _variable: &str, period: Period) -> EngineResult<RangeGraph> {
        self.logged_samples(period)?;
        let geometry = self.geometry(line)?;
        let mut x = Vec::with_capacity(geometry.number_of_sections() + 1);
        x.push(0.0);
        x.extend_from_slice(&geometry.cumulative_length);
        Ok(RangeGraph {
            mean: vec![0.0; x.len()],
            x,
        })
    }

    fn line_geometry(&self, line: ObjectRef) -> EngineResult<LineGeometry> {
        self.geometry(line).cloned()
    }

    fn save_data(&self, path: &Path) -> EngineResult<()> {
        let mut content = String::new();
        for directive in &self.applied {
            let _ = writeln!(content, "{}", directive);
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    fn save_simulation(&self, path: &Path) -> EngineResult<()> {
        let content = format!(
            "statics_runs: {}\ndynamics_runs: {}\nsamples: {}\n",
            self.statics_runs, self.dynamics_runs, self.sample_count
        );
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_directives_in_order() {
        let mut engine = DryRunEngine::new();
        engine
            .set_directive(&Directive::new(ObjectRef::Environment, "WindSpeed", 5.0))
            .unwrap();
        engine
            .set_directive(&Directive::new(ObjectRef::Environment, "WindSpeed", 10.0))
            .unwrap();
        assert_eq!(engine.applied().len(), 2);
        assert_eq!(
            engine.current_value(ObjectRef::Environment, "WindSpeed"),
            Some(&DirectiveValue::Number(10.0))
        );
    }

    #[test]
    fn rejects_non_finite_directive() {
        let mut engine = DryRunEngine::new();
        let err = engine
            .set_directive(&Directive::new(ObjectRef::Environment, "WindSpeed", f64::NAN))
            .unwrap_err();
        assert!(matches!(err, EngineError::Rejected { .. }));
    }

    #[test]
    fn queries_require_a_run() {
        let engine = DryRunEngine::new();
        let err = engine.sample_times(Period::WholeSimulation).unwrap_err();
        assert!(matches!(err, EngineError::NotRun { .. }));
    }

    #[test]
    fn anchored_line_has_no_end_b() {
        let mut engine = DryRunEngine::new().with_line(1, LineGeometry::uniform(3, 2, 10.0, true));
        engine.run_dynamics().unwrap();
        let err = engine
            .time_history(
                ObjectRef::Line(1),
                "Effective tension",
                Period::WholeSimulation,
                EvaluationPoint::EndB,
            )
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidPoint { .. }));

        let series = engine
            .time_history(
                ObjectRef::Line(1),
                "Effective tension",
                Period::WholeSimulation,
                EvaluationPoint::Node(3),
            )
            .unwrap();
        assert_eq!(series.len(), engine.sample_count);
    }
}
