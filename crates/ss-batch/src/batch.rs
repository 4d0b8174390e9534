//! A declaration resolved into something runnable.

use ss_core::{ConfigError, ConfigResult};
use ss_post::{MeasurementSpec, ResultExtractor};
use ss_project::Declaration;

use crate::analysis::Analysis;
use crate::driver::BatchDriver;
use crate::plan::ScenarioPlan;

#[derive(Debug, Clone)]
pub struct Batch {
    pub name: String,
    pub plan: ScenarioPlan,
    pub extractor: ResultExtractor,
    pub analysis: Analysis,
}

impl Batch {
    /// Resolve every part of the declaration up front, so configuration
    /// errors surface before the first case touches the engine.
    pub fn from_declaration(decl: &Declaration) -> ConfigResult<Self> {
        let analysis = Analysis::from_def(&decl.analysis)?;
        let plan = ScenarioPlan::from_def(&decl.batch)?;
        let spec = MeasurementSpec::resolve(&decl.post, plan.monitors().to_vec())?;
        if let Some(monitor) = spec.monitors.iter().find(|m| m.name == plan.independent_name()) {
            return Err(ConfigError::DuplicateName {
                name: monitor.name.clone(),
                context: "aggregate columns".to_string(),
            });
        }

        Ok(Self {
            name: decl.name.clone(),
            plan,
            extractor: ResultExtractor::new(spec),
            analysis,
        })
    }

    pub fn driver(&self) -> BatchDriver<'_> {
        BatchDriver::new(&self.plan, &self.extractor).with_analysis(self.analysis)
    }

    pub fn case_count(&self) -> usize {
        self.plan.case_count()
    }
}
