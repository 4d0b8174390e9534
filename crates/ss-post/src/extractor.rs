//! Result extractor: one measurement spec applied to every case of a batch.

use ss_engine::{Period, SimulationEngine};
use ss_results::{Phase, ResultStore};

use crate::error::PostResult;
use crate::spec::MeasurementSpec;
use crate::{line, modal, monitor, vessel};

#[derive(Debug, Clone)]
pub struct ResultExtractor {
    spec: MeasurementSpec,
}

impl ResultExtractor {
    pub fn new(spec: MeasurementSpec) -> Self {
        Self { spec }
    }

    pub fn spec(&self) -> &MeasurementSpec {
        &self.spec
    }

    /// Aggregate column names, one per monitor.
    pub fn row_columns(&self) -> Vec<String> {
        self.spec.monitor_names()
    }

    pub fn extract_statics<E: SimulationEngine + ?Sized>(
        &self,
        engine: &E,
        results: &mut ResultStore,
    ) -> PostResult<()> {
        for measurement in self.spec.lines.iter().filter(|l| l.static_profile) {
            line::extract_static_profile(engine, results, measurement)?;
        }
        Ok(())
    }

    pub fn extract_dynamics<E: SimulationEngine + ?Sized>(
        &self,
        engine: &E,
        results: &mut ResultStore,
    ) -> PostResult<()> {
        let period = self.spec.period;
        if self.spec.has_time_histories() {
            let times = engine.sample_times(period)?;
            results.append_column(Phase::Dynamics, "Time", times)?;
        }
        for measurement in &self.spec.lines {
            line::extract_time_histories(engine, results, measurement, period)?;
        }
        for measurement in &self.spec.vessels {
            vessel::extract_position(engine, results, measurement, period)?;
        }
        Ok(())
    }

    pub fn extract_modal<E: SimulationEngine + ?Sized>(
        &self,
        engine: &mut E,
        results: &mut ResultStore,
    ) -> PostResult<()> {
        for measurement in &self.spec.modal {
            modal::extract_modes(engine, results, measurement)?;
        }
        Ok(())
    }

    /// Monitor values of the current case. Statistics cover the declared
    /// period after a dynamic run and the static state otherwise.
    pub fn monitor_row<E: SimulationEngine + ?Sized>(&self, engine: &E, dynamics_ran: bool) -> PostResult<Vec<f64>> {
        let period = if dynamics_ran {
            self.spec.period
        } else {
            Period::StaticState
        };
        monitor::monitor_row(&self.spec.monitors, engine, period)
    }
}
