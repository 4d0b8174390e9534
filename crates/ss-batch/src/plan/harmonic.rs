//! Superimposed harmonic motion of a vessel, one DOF at a time.

use ss_core::{Axis, Combinations, ConfigError, ConfigResult, Dof, format_value};
use ss_engine::{Directive, ObjectRef};
use ss_project::schema::{DofMotionDef, HarmonicMotionDef};

use crate::case::Case;

const SUB_AXES: [&str; 3] = ["period", "amplitude", "phase"];

/// Period/amplitude/phase combinations of one DOF.
#[derive(Debug, Clone, PartialEq)]
pub struct DofGroup {
    pub dof: Dof,
    pub combinations: Combinations<f64>,
    /// Only oscillating groups produce cases
    pub oscillate: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HarmonicSweep {
    pub vessel: u32,
    /// Always six groups, in [`Dof::ALL`] order
    pub groups: Vec<DofGroup>,
}

impl HarmonicSweep {
    pub fn from_def(def: &HarmonicMotionDef) -> ConfigResult<Self> {
        for name in def.motion.keys() {
            name.parse::<Dof>()?;
        }

        let groups = Dof::ALL
            .into_iter()
            .map(|dof| {
                let declared = def
                    .motion
                    .iter()
                    .find(|(name, _)| name.parse::<Dof>().ok() == Some(dof))
                    .map(|(_, motion)| motion);
                match declared {
                    Some(motion) => Ok(DofGroup {
                        dof,
                        combinations: dof_combinations(dof, motion)?,
                        oscillate: motion.oscillate,
                    }),
                    None => Ok(DofGroup {
                        dof,
                        combinations: Combinations::fixed(&SUB_AXES, &[0.0, 0.0, 0.0]),
                        oscillate: false,
                    }),
                }
            })
            .collect::<ConfigResult<Vec<_>>>()?;

        Ok(Self {
            vessel: def.vessel,
            groups,
        })
    }

    pub fn case_count(&self) -> usize {
        self.groups
            .iter()
            .filter(|g| g.oscillate)
            .map(|g| g.combinations.len())
            .sum()
    }

    pub fn plan_cases(&self) -> Vec<Case> {
        let vessel = ObjectRef::Vessel(self.vessel);
        let mut cases = Vec::with_capacity(self.case_count());

        for group in self.groups.iter().filter(|g| g.oscillate) {
            for values in &group.combinations {
                let (period, amplitude, phase) = (values[0], values[1], values[2]);
                let index = cases.len();
                cases.push(Case {
                    id: format!(
                        "{}_period{}_ampl{}_phase{}",
                        group.dof.name(),
                        format_value(period),
                        format_value(amplitude),
                        format_value(phase)
                    ),
                    index,
                    independent_value: (index + 1) as f64,
                    directives: motion_directives(vessel, group.dof, period, amplitude, phase),
                });
            }
        }
        cases
    }
}

fn dof_combinations(dof: Dof, motion: &DofMotionDef) -> ConfigResult<Combinations<f64>> {
    let defs = [&motion.period, &motion.amplitude, &motion.phase];
    let axes = SUB_AXES
        .iter()
        .zip(defs)
        .map(|(&axis, def)| {
            let context = format!("vessel harmonic motion {}", dof);
            let def = def.as_ref().ok_or_else(|| ConfigError::MissingKey {
                context: context.clone(),
                key: axis,
            })?;
            let values = def.resolve(&format!("{} {}", context, axis))?.expand();
            Ok(Axis::new(axis, values))
        })
        .collect::<ConfigResult<Vec<_>>>()?;
    Ok(Combinations::new(axes))
}

/// Every DOF is zeroed before the target DOF is set, so no amplitude or phase
/// from a previous case survives into this one.
fn motion_directives(vessel: ObjectRef, target: Dof, period: f64, amplitude: f64, phase: f64) -> Vec<Directive> {
    let mut directives = vec![Directive::new(
        vessel,
        "SuperimposedMotion",
        "Displacement RAOs + harmonic motion",
    )];
    for dof in Dof::ALL {
        directives.push(Directive::new(vessel, format!("HarmonicMotion{}Amplitude", dof.title()), 0.0));
        directives.push(Directive::new(vessel, format!("HarmonicMotion{}Phase", dof.title()), 0.0));
    }
    directives.push(Directive::new(vessel, "HarmonicMotionPeriod", period));
    directives.push(Directive::new(
        vessel,
        format!("HarmonicMotion{}Amplitude", target.title()),
        amplitude,
    ));
    directives.push(Directive::new(vessel, format!("HarmonicMotion{}Phase", target.title()), phase));
    directives
}

#[cfg(test)]
mod tests {
    use super::*;
    use ss_project::schema::RangeDef;
    use std::collections::BTreeMap;

    fn motion(period: Vec<f64>, amplitude: Vec<f64>, phase: f64, oscillate: bool) -> DofMotionDef {
        DofMotionDef {
            period: Some(RangeDef::List(period)),
            amplitude: Some(RangeDef::List(amplitude)),
            phase: Some(RangeDef::Scalar(phase)),
            oscillate,
        }
    }

    #[test]
    fn only_oscillating_dofs_produce_cases() {
        let mut dofs = BTreeMap::new();
        dofs.insert("surge".to_string(), motion(vec![10.0, 12.0], vec![1.0, 2.0], 0.0, true));
        dofs.insert("heave".to_string(), motion(vec![8.0], vec![0.5], 0.0, false));
        let sweep = HarmonicSweep::from_def(&HarmonicMotionDef {
            vessel: 1,
            motion: dofs,
            monitors: vec![],
        })
        .unwrap();

        assert_eq!(sweep.groups.len(), 6);
        assert_eq!(sweep.case_count(), 4);
        let cases = sweep.plan_cases();
        let ids: Vec<&str> = cases.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "surge_period10.0_ampl1.0_phase0.0",
                "surge_period10.0_ampl2.0_phase0.0",
                "surge_period12.0_ampl1.0_phase0.0",
                "surge_period12.0_ampl2.0_phase0.0",
            ]
        );
        assert_eq!(cases[3].independent_value, 4.0);
    }

    #[test]
    fn missing_amplitude_is_reported() {
        let mut dofs = BTreeMap::new();
        dofs.insert(
            "pitch".to_string(),
            DofMotionDef {
                period: Some(RangeDef::Scalar(10.0)),
                amplitude: None,
                phase: Some(RangeDef::Scalar(0.0)),
                oscillate: true,
            },
        );
        let err = HarmonicSweep::from_def(&HarmonicMotionDef {
            vessel: 1,
            motion: dofs,
            monitors: vec![],
        })
        .unwrap_err();
        assert!(matches!(err, ConfigError::MissingKey { key: "amplitude", .. }));
    }

    #[test]
    fn unknown_dof_rejected() {
        let mut dofs = BTreeMap::new();
        dofs.insert("twist".to_string(), motion(vec![1.0], vec![1.0], 0.0, true));
        assert!(
            HarmonicSweep::from_def(&HarmonicMotionDef {
                vessel: 1,
                motion: dofs,
                monitors: vec![],
            })
            .is_err()
        );
    }

    #[test]
    fn reset_precedes_target_directives() {
        let directives = motion_directives(ObjectRef::Vessel(1), Dof::Roll, 9.0, 3.0, 45.0);
        let lines: Vec<String> = directives.iter().map(ToString::to_string).collect();
        assert_eq!(lines.len(), 1 + 12 + 3);
        assert_eq!(lines[1], "Vessel1.HarmonicMotionSurgeAmplitude = 0.0");
        assert_eq!(lines[13], "Vessel1.HarmonicMotionPeriod = 9.0");
        assert_eq!(lines[14], "Vessel1.HarmonicMotionRollAmplitude = 3.0");
        assert_eq!(lines[15], "Vessel1.HarmonicMotionRollPhase = 45.0");
    }
}
