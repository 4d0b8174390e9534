//! Scenario plans.
//!
//! Batch kinds form a closed set. Each kind maps to its constructor through
//! [`BatchKind::ALL`]; nothing is looked up by name at run time.

mod harmonic;
mod seed;
mod sweep;

pub use harmonic::{DofGroup, HarmonicSweep};
pub use seed::SeedRepetition;
pub use sweep::ParameterSweep;

use std::collections::HashSet;
use std::fmt;

use ss_core::{ConfigError, ConfigResult};
use ss_post::Monitor;
use ss_project::schema::BatchDef;

use crate::case::Case;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchKind {
    ThrustCurve,
    VesselHarmonicMotion,
    WaveSeed,
}

pub type Constructor = fn(&BatchDef) -> ConfigResult<PlanKind>;

impl BatchKind {
    pub const ALL: [(BatchKind, &'static str, Constructor); 3] = [
        (BatchKind::ThrustCurve, "thrust curve", build_thrust_curve),
        (BatchKind::VesselHarmonicMotion, "vessel harmonic motion", build_harmonic),
        (BatchKind::WaveSeed, "wave seed", build_wave_seed),
    ];

    pub fn of(def: &BatchDef) -> Self {
        match def {
            BatchDef::ThrustCurve(_) => BatchKind::ThrustCurve,
            BatchDef::VesselHarmonicMotion(_) => BatchKind::VesselHarmonicMotion,
            BatchDef::WaveSeed(_) => BatchKind::WaveSeed,
        }
    }

    pub fn label(self) -> &'static str {
        Self::entry(self).1
    }

    fn constructor(self) -> Constructor {
        Self::entry(self).2
    }

    fn entry(self) -> (BatchKind, &'static str, Constructor) {
        Self::ALL[self as usize]
    }
}

impl fmt::Display for BatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

fn build_thrust_curve(def: &BatchDef) -> ConfigResult<PlanKind> {
    match def {
        BatchDef::ThrustCurve(t) => Ok(PlanKind::ParameterSweep(ParameterSweep::thrust_curve(t)?)),
        _ => Err(kind_mismatch(def, BatchKind::ThrustCurve)),
    }
}

fn build_harmonic(def: &BatchDef) -> ConfigResult<PlanKind> {
    match def {
        BatchDef::VesselHarmonicMotion(h) => Ok(PlanKind::Harmonic(HarmonicSweep::from_def(h)?)),
        _ => Err(kind_mismatch(def, BatchKind::VesselHarmonicMotion)),
    }
}

fn build_wave_seed(def: &BatchDef) -> ConfigResult<PlanKind> {
    match def {
        BatchDef::WaveSeed(w) => Ok(PlanKind::SeedRepetition(SeedRepetition::from_def(w)?)),
        _ => Err(kind_mismatch(def, BatchKind::WaveSeed)),
    }
}

fn kind_mismatch(def: &BatchDef, expected: BatchKind) -> ss_core::ConfigError {
    ss_core::ConfigError::invalid("batch", def.kind_label(), format!("expected '{}'", expected))
}

#[derive(Debug, Clone, PartialEq)]
pub enum PlanKind {
    ParameterSweep(ParameterSweep),
    Harmonic(HarmonicSweep),
    SeedRepetition(SeedRepetition),
}

/// Resolved batch: the cases to run and the monitors forming each case's row.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioPlan {
    kind: BatchKind,
    plan: PlanKind,
    monitors: Vec<Monitor>,
}

impl ScenarioPlan {
    pub fn from_def(def: &BatchDef) -> ConfigResult<Self> {
        let kind = BatchKind::of(def);
        let plan = (kind.constructor())(def)?;

        let mut monitors = match def {
            BatchDef::ThrustCurve(t) => ParameterSweep::curve_monitors(t),
            _ => Vec::new(),
        };
        for monitor in def.monitors() {
            monitors.push(Monitor::from_def(monitor)?);
        }

        let resolved = Self { kind, plan, monitors };
        resolved.check_unique_case_ids()?;
        tracing::debug!(kind = %kind, monitors = resolved.monitors.len(), "scenario plan resolved");
        Ok(resolved)
    }

    /// Case ids name the case directories, so repeated values such as
    /// `period: [10, 10]` are rejected instead of overwriting a case.
    fn check_unique_case_ids(&self) -> ConfigResult<()> {
        let mut seen = HashSet::new();
        for case in self.plan_cases() {
            if !seen.insert(case.id.clone()) {
                return Err(ConfigError::DuplicateName {
                    name: case.id,
                    context: format!("{} cases", self.kind),
                });
            }
        }
        Ok(())
    }

    pub fn kind(&self) -> BatchKind {
        self.kind
    }

    pub fn plan(&self) -> &PlanKind {
        &self.plan
    }

    /// Monitors in aggregate column order.
    pub fn monitors(&self) -> &[Monitor] {
        &self.monitors
    }

    /// Name of the aggregate's first column.
    pub fn independent_name(&self) -> &str {
        match &self.plan {
            PlanKind::ParameterSweep(s) => &s.independent,
            PlanKind::Harmonic(_) | PlanKind::SeedRepetition(_) => "Case",
        }
    }

    pub fn case_count(&self) -> usize {
        match &self.plan {
            PlanKind::ParameterSweep(s) => s.case_count(),
            PlanKind::Harmonic(h) => h.case_count(),
            PlanKind::SeedRepetition(r) => r.case_count(),
        }
    }

    /// Cases in execution order. Pure: every call returns the same cases.
    pub fn plan_cases(&self) -> Vec<Case> {
        match &self.plan {
            PlanKind::ParameterSweep(s) => s.plan_cases(),
            PlanKind::Harmonic(h) => h.plan_cases(),
            PlanKind::SeedRepetition(r) => r.plan_cases(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_table_is_indexed_by_kind() {
        for (i, (kind, label, _)) in BatchKind::ALL.iter().enumerate() {
            assert_eq!(*kind as usize, i);
            assert_eq!(kind.label(), *label);
        }
    }

    #[test]
    fn thrust_plan_from_yaml() {
        let def: BatchDef = ss_project::from_yaml_str(
            r#"
thrust curve:
  wind speed: [5.0, 10.0]
  curves: [thrust]
  monitors:
    - object: {vessel: 1}
      variable: Dynamic x
      statistic: max
"#,
        )
        .unwrap();
        let plan = ScenarioPlan::from_def(&def).unwrap();
        assert_eq!(plan.kind(), BatchKind::ThrustCurve);
        assert_eq!(plan.independent_name(), "Wind speed");
        assert_eq!(plan.case_count(), 2);
        let names: Vec<&str> = plan.monitors().iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Rotor aero Thrust", "Dynamic x"]);
    }

    #[test]
    fn repeated_values_are_rejected_as_duplicate_cases() {
        let def: BatchDef = ss_project::from_yaml_str(
            r#"
vessel harmonic motion:
  vessel: 1
  motion:
    surge: {period: [10.0, 10.0], amplitude: 1.5, phase: 0.0}
"#,
        )
        .unwrap();
        match ScenarioPlan::from_def(&def).unwrap_err() {
            ConfigError::DuplicateName { name, context } => {
                assert!(name.starts_with("surge_period10.0"));
                assert_eq!(context, "vessel harmonic motion cases");
            }
            other => panic!("unexpected error: {other}"),
        }

        let def: BatchDef =
            ss_project::from_yaml_str("thrust curve: {wind speed: [5.0, 7.5, 5.0], curves: [thrust]}").unwrap();
        assert!(matches!(
            ScenarioPlan::from_def(&def),
            Err(ConfigError::DuplicateName { .. })
        ));
    }

    #[test]
    fn two_kinds_fail_to_parse() {
        let parsed: Result<BatchDef, _> = ss_project::from_yaml_str(
            r#"
thrust curve: {wind speed: 5.0, curves: [thrust]}
wave seed: {cases: 3}
"#,
        );
        assert!(parsed.is_err());
    }
}
