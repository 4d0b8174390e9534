use ss_core::{ConfigError, ConfigResult};
use ss_project::schema::AnalysisDef;

/// Run primitives triggered for every case, in the order statics, modal, dynamics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Analysis {
    pub statics: bool,
    /// Dynamics includes its own statics
    pub dynamics: bool,
    /// Modal analysis of the declared lines about the static position;
    /// forces a statics run even when `statics` is off
    pub modal: bool,
}

impl Default for Analysis {
    fn default() -> Self {
        Self {
            statics: true,
            dynamics: false,
            modal: false,
        }
    }
}

impl Analysis {
    pub fn from_def(def: &AnalysisDef) -> ConfigResult<Self> {
        if !def.statics && !def.dynamics {
            return Err(ConfigError::invalid(
                "analysis",
                "statics: false, dynamics: false",
                "each case must run statics or dynamics",
            ));
        }
        Ok(Self {
            statics: def.statics,
            dynamics: def.dynamics,
            modal: def.modal,
        })
    }

    pub fn dynamics() -> Self {
        Self {
            statics: true,
            dynamics: true,
            modal: false,
        }
    }
}
