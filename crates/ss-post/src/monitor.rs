//! Scalar monitors: one statistic per case, one aggregate column per monitor.

use ss_core::ConfigResult;
use ss_engine::{EvaluationPoint, ObjectRef, Period, SimulationEngine, StatisticKind};
use ss_project::schema::{MonitorDef, ObjectDef, PointDef, StatisticDef};

use crate::error::PostResult;

#[derive(Debug, Clone, PartialEq)]
pub struct Monitor {
    /// Aggregate column name
    pub name: String,
    pub object: ObjectRef,
    pub variable: String,
    pub point: EvaluationPoint,
    pub statistic: StatisticKind,
}

impl Monitor {
    pub fn mean_at_origin(name: impl Into<String>, object: ObjectRef, variable: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            object,
            variable: variable.into(),
            point: EvaluationPoint::Origin,
            statistic: StatisticKind::Mean,
        }
    }

    pub fn from_def(def: &MonitorDef) -> ConfigResult<Self> {
        let object = match def.object {
            ObjectDef::Environment => ObjectRef::Environment,
            ObjectDef::Line(id) => ObjectRef::Line(id),
            ObjectDef::Vessel(id) => ObjectRef::Vessel(id),
            ObjectDef::Turbine(id) => ObjectRef::Turbine(id),
        };
        let point = match def.point {
            PointDef::Origin => EvaluationPoint::Origin,
            PointDef::EndA => EvaluationPoint::EndA,
            PointDef::EndB => EvaluationPoint::EndB,
            PointDef::Node(n) => EvaluationPoint::Node(n),
            PointDef::ArcLength(s) => {
                EvaluationPoint::ArcLength(ss_core::ensure_finite(s, "monitor arc length")?)
            }
        };
        let statistic = match def.statistic {
            StatisticDef::Mean => StatisticKind::Mean,
            StatisticDef::Min => StatisticKind::Min,
            StatisticDef::Max => StatisticKind::Max,
            StatisticDef::StdDev => StatisticKind::StdDev,
        };
        Ok(Self {
            name: def.name.clone().unwrap_or_else(|| def.variable.clone()),
            object,
            variable: def.variable.clone(),
            point,
            statistic,
        })
    }

    pub fn evaluate<E: SimulationEngine + ?Sized>(&self, engine: &E, period: Period) -> PostResult<f64> {
        let stats = engine.statistic(self.object, &self.variable, period, self.point)?;
        Ok(stats.get(self.statistic))
    }
}

/// Evaluate every monitor against the engine's current state, in order.
pub fn monitor_row<E: SimulationEngine + ?Sized>(
    monitors: &[Monitor],
    engine: &E,
    period: Period,
) -> PostResult<Vec<f64>> {
    monitors.iter().map(|m| m.evaluate(engine, period)).collect()
}
