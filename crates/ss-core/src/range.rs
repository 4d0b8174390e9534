//! Declarative numeric ranges.
//!
//! A range is written in a declaration as a scalar, an explicit list, or a
//! `{from, to, step}` triple. Expansion of the triple is inclusive of `to`:
//! the last value is the first one reached at or beyond `to`.

use crate::error::{ConfigError, ConfigResult};
use crate::numeric::ensure_finite;
use std::fmt;

/// Slack (in units of `step`) absorbed when deciding whether a value already reached `to`.
const STEP_FRACTION_TOL: f64 = 1e-9;

/// Parsed range specification. Immutable once constructed.
#[derive(Debug, Clone, PartialEq)]
pub enum RangeSpec {
    /// Single value
    Scalar(f64),
    /// Explicit values, order preserved
    List(Vec<f64>),
    /// Arithmetic progression from `from` by `step`, inclusive of `to`
    Range { from: f64, to: f64, step: f64 },
}

impl RangeSpec {
    /// Build a validated `{from, to, step}` range.
    ///
    /// `context` names the axis in error messages (e.g. `"wind speed"`).
    pub fn range(context: &str, from: f64, to: f64, step: f64) -> ConfigResult<Self> {
        ensure_finite(from, &format!("{context}.from"))?;
        ensure_finite(to, &format!("{context}.to"))?;
        ensure_finite(step, &format!("{context}.step"))?;

        if step == 0.0 {
            return Err(ConfigError::ZeroStep {
                context: context.to_string(),
            });
        }

        if (to - from) / step < -STEP_FRACTION_TOL {
            return Err(ConfigError::EmptyRange {
                context: context.to_string(),
                from,
                to,
                step,
            });
        }

        Ok(RangeSpec::Range { from, to, step })
    }

    /// Build a range from possibly-absent keys, reporting exactly which key is missing.
    pub fn from_keys(
        context: &str,
        from: Option<f64>,
        to: Option<f64>,
        step: Option<f64>,
    ) -> ConfigResult<Self> {
        let missing = |key: &'static str| ConfigError::MissingKey {
            context: context.to_string(),
            key,
        };
        let from = from.ok_or_else(|| missing("from"))?;
        let to = to.ok_or_else(|| missing("to"))?;
        let step = step.ok_or_else(|| missing("step"))?;
        Self::range(context, from, to, step)
    }

    /// Number of values produced by [`expand`](Self::expand).
    pub fn len(&self) -> usize {
        match self {
            RangeSpec::Scalar(_) => 1,
            RangeSpec::List(values) => values.len(),
            RangeSpec::Range { from, to, step } => range_len(*from, *to, *step),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Expand into the ordered sequence of values.
    pub fn expand(&self) -> Vec<f64> {
        match self {
            RangeSpec::Scalar(v) => vec![*v],
            RangeSpec::List(values) => values.clone(),
            RangeSpec::Range { from, to, step } => {
                let n = range_len(*from, *to, *step);
                // Multiply rather than accumulate so long ranges do not drift.
                (0..n).map(|i| from + i as f64 * step).collect()
            }
        }
    }
}

fn range_len(from: f64, to: f64, step: f64) -> usize {
    let span = (to - from) / step;
    let whole_steps = (span - STEP_FRACTION_TOL).ceil().max(0.0);
    whole_steps as usize + 1
}

impl fmt::Display for RangeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(v) => write!(f, "{}", v),
            Self::List(values) => write!(f, "{:?}", values),
            Self::Range { from, to, step } => {
                write!(f, "{} to {} by {} ({} values)", from, to, step, self.len())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_expands_to_single_value() {
        assert_eq!(RangeSpec::Scalar(3.5).expand(), vec![3.5]);
    }

    #[test]
    fn list_preserves_order() {
        let spec = RangeSpec::List(vec![10.0, 2.0, 7.0]);
        assert_eq!(spec.expand(), vec![10.0, 2.0, 7.0]);
    }

    #[test]
    fn range_includes_end_value() {
        let spec = RangeSpec::range("wind speed", 5.0, 15.0, 5.0).unwrap();
        assert_eq!(spec.expand(), vec![5.0, 10.0, 15.0]);
    }

    #[test]
    fn range_overshoots_to_first_value_past_end() {
        let spec = RangeSpec::range("period", 0.0, 10.0, 3.0).unwrap();
        assert_eq!(spec.expand(), vec![0.0, 3.0, 6.0, 9.0, 12.0]);
    }

    #[test]
    fn fractional_step_does_not_add_spurious_point() {
        let spec = RangeSpec::range("amplitude", 0.0, 0.3, 0.1).unwrap();
        let values = spec.expand();
        assert_eq!(values.len(), 4);
        assert!((values[3] - 0.3).abs() < 1e-12);
    }

    #[test]
    fn descending_range() {
        let spec = RangeSpec::range("phase", 90.0, 0.0, -45.0).unwrap();
        assert_eq!(spec.expand(), vec![90.0, 45.0, 0.0]);
    }

    #[test]
    fn missing_key_is_reported_by_name() {
        let err = RangeSpec::from_keys("wind speed", Some(1.0), None, Some(1.0)).unwrap_err();
        assert_eq!(
            err,
            ConfigError::MissingKey {
                context: "wind speed".to_string(),
                key: "to"
            }
        );
        let err = RangeSpec::from_keys("wind speed", Some(1.0), Some(2.0), None).unwrap_err();
        assert!(err.to_string().contains("'step'"));
    }

    #[test]
    fn zero_step_rejected() {
        let err = RangeSpec::range("wind speed", 1.0, 2.0, 0.0).unwrap_err();
        assert!(matches!(err, ConfigError::ZeroStep { .. }));
    }

    #[test]
    fn step_pointing_away_from_end_rejected() {
        let err = RangeSpec::range("wind speed", 10.0, 0.0, 1.0).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyRange { .. }));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn expansion_properties(from in -100.0_f64..100.0, span in 0.0_f64..200.0, step in 0.01_f64..25.0) {
            let to = from + span;
            let spec = RangeSpec::range("axis", from, to, step).unwrap();
            let values = spec.expand();

            prop_assert_eq!(values.len(), spec.len());
            prop_assert_eq!(values[0], from);
            prop_assert!(values.windows(2).all(|w| w[0] <= w[1]));

            // Last value is the first one at or beyond `to`.
            let last = *values.last().unwrap();
            let slack = step * 1e-6;
            prop_assert!(last >= to - slack);
            prop_assert!(last - step < to + slack);
        }

        #[test]
        fn expansion_is_deterministic(from in -10.0_f64..10.0, span in 0.0_f64..50.0, step in 0.1_f64..5.0) {
            let spec = RangeSpec::range("axis", from, from + span, step).unwrap();
            prop_assert_eq!(spec.expand(), spec.expand());
        }
    }
}
