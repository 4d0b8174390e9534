//! Vessel (platform) position histories.

use ss_engine::{EvaluationPoint, ObjectRef, Period, SimulationEngine};
use ss_results::{Phase, ResultStore};

use crate::error::PostResult;
use crate::naming::strip_spaces;
use crate::spec::VesselMeasurement;

/// One `Vessel{id}_{dof}` column per requested DOF, read at the vessel origin.
pub fn extract_position<E: SimulationEngine + ?Sized>(
    engine: &E,
    results: &mut ResultStore,
    vessel: &VesselMeasurement,
    period: Period,
) -> PostResult<()> {
    let object = ObjectRef::Vessel(vessel.id);
    for variable in vessel.dofs.expand() {
        let name = format!("{}_{}", object, strip_spaces(&variable));
        let series = engine.time_history(object, &variable, period, EvaluationPoint::Origin)?;
        tracing::debug!(column = %name, samples = series.len(), "vessel time history");
        results.append_column(Phase::Dynamics, name, series)?;
    }
    Ok(())
}
