//! Single-axis parameter sweep (thrust curve over wind speed).

use ss_core::{ConfigResult, format_value};
use ss_engine::{Directive, DirectiveValue, ObjectRef};
use ss_post::Monitor;
use ss_project::schema::ThrustCurveDef;

use crate::case::Case;

/// One case per value of a single environmental variable.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSweep {
    /// Independent column of the aggregate
    pub independent: String,
    /// Case ids are `{prefix}_{value}`
    pub case_prefix: String,
    pub object: ObjectRef,
    pub property: String,
    pub values: Vec<f64>,
    /// Applied before the swept value in every case
    pub setup: Vec<Directive>,
}

impl ParameterSweep {
    /// Constant wind of each declared speed, blowing from `direction`.
    pub fn thrust_curve(def: &ThrustCurveDef) -> ConfigResult<Self> {
        let values = def.wind_speed.resolve("thrust curve wind speed")?.expand();
        let direction = ss_core::ensure_finite(def.direction, "thrust curve direction")?;
        Ok(Self {
            independent: "Wind speed".to_string(),
            case_prefix: "wind_speed".to_string(),
            object: ObjectRef::Environment,
            property: "WindSpeed".to_string(),
            values,
            setup: vec![
                Directive::new(ObjectRef::Environment, "WindType", "Constant"),
                Directive::new(ObjectRef::Environment, "WindDirection", direction),
            ],
        })
    }

    /// `Rotor aero {Curve}` monitors of the turbine, one per declared curve.
    pub fn curve_monitors(def: &ThrustCurveDef) -> Vec<Monitor> {
        def.curves
            .iter()
            .map(|curve| {
                let variable = format!("Rotor aero {}", title_case(curve));
                Monitor::mean_at_origin(variable.clone(), ObjectRef::Turbine(def.turbine), variable)
            })
            .collect()
    }

    pub fn case_count(&self) -> usize {
        self.values.len()
    }

    pub fn plan_cases(&self) -> Vec<Case> {
        self.values
            .iter()
            .enumerate()
            .map(|(index, &value)| {
                let mut directives = self.setup.clone();
                directives.push(Directive {
                    object: self.object,
                    property: self.property.clone(),
                    value: DirectiveValue::Number(value),
                });
                Case {
                    id: format!("{}_{}", self.case_prefix, format_value(value)),
                    index,
                    independent_value: value,
                    directives,
                }
            })
            .collect()
    }
}

/// `generator power` -> `Generator Power`
fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
