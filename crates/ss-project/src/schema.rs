//! Scenario declaration schema.
//!
//! Keys are lowercase and space separated as users write them:
//!
//! ```yaml
//! version: 1
//! name: Thrust curve
//! analysis: { statics: true, dynamics: true }
//! post processing:
//!   period: whole simulation
//!   lines:
//!     - id: 1
//!       tension: all nodes
//! batch:
//!   thrust curve:
//!     wind speed: { from: 5.0, to: 25.0, step: 1.0 }
//!     curves: [thrust, power]
//! ```

use serde::{Deserialize, Serialize};
use ss_core::{ConfigResult, RangeSpec};
use std::collections::BTreeMap;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Declaration {
    #[serde(default)]
    pub version: u32,
    pub name: String,
    #[serde(default)]
    pub analysis: AnalysisDef,
    #[serde(rename = "post processing", default)]
    pub post: PostProcessingDef,
    #[serde(default)]
    pub save: SaveDef,
    pub batch: BatchDef,
}

/// Which run primitives each case triggers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisDef {
    #[serde(default = "default_true")]
    pub statics: bool,
    #[serde(default)]
    pub dynamics: bool,
    #[serde(default)]
    pub modal: bool,
}

impl Default for AnalysisDef {
    fn default() -> Self {
        Self {
            statics: true,
            dynamics: false,
            modal: false,
        }
    }
}

fn default_true() -> bool {
    true
}

// ---------------------------------------------------------------------------
// Ranges
// ---------------------------------------------------------------------------

/// Numeric range as written: a scalar, a list, or `{from, to, step}`.
///
/// Keys of the triple are optional here so the resolver can name the one
/// that is missing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum RangeDef {
    Scalar(f64),
    List(Vec<f64>),
    Bounds(RangeBoundsDef),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct RangeBoundsDef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<f64>,
}

impl RangeDef {
    pub fn bounds(from: f64, to: f64, step: f64) -> Self {
        RangeDef::Bounds(RangeBoundsDef {
            from: Some(from),
            to: Some(to),
            step: Some(step),
        })
    }

    /// Resolve into a validated range; `context` names the axis in errors.
    pub fn resolve(&self, context: &str) -> ConfigResult<RangeSpec> {
        match self {
            RangeDef::Scalar(v) => Ok(RangeSpec::Scalar(ss_core::ensure_finite(*v, context)?)),
            RangeDef::List(values) => {
                for v in values {
                    ss_core::ensure_finite(*v, context)?;
                }
                Ok(RangeSpec::List(values.clone()))
            }
            RangeDef::Bounds(b) => RangeSpec::from_keys(context, b.from, b.to, b.step),
        }
    }
}

// ---------------------------------------------------------------------------
// Batch kinds
// ---------------------------------------------------------------------------

/// Exactly one batch kind per declaration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum BatchDef {
    #[serde(rename = "thrust curve")]
    ThrustCurve(ThrustCurveDef),
    #[serde(rename = "vessel harmonic motion")]
    VesselHarmonicMotion(HarmonicMotionDef),
    #[serde(rename = "wave seed")]
    WaveSeed(WaveSeedDef),
}

impl BatchDef {
    pub fn kind_label(&self) -> &'static str {
        match self {
            BatchDef::ThrustCurve(_) => "thrust curve",
            BatchDef::VesselHarmonicMotion(_) => "vessel harmonic motion",
            BatchDef::WaveSeed(_) => "wave seed",
        }
    }

    pub fn monitors(&self) -> &[MonitorDef] {
        match self {
            BatchDef::ThrustCurve(t) => &t.monitors,
            BatchDef::VesselHarmonicMotion(h) => &h.monitors,
            BatchDef::WaveSeed(w) => &w.monitors,
        }
    }
}

/// Rotor curves across a wind-speed sweep.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ThrustCurveDef {
    #[serde(rename = "wind speed")]
    pub wind_speed: RangeDef,
    /// Rotor aero quantities to tabulate, in column order (e.g. `thrust`, `power`)
    #[serde(default)]
    pub curves: Vec<String>,
    /// Wind direction in degrees
    #[serde(default)]
    pub direction: f64,
    #[serde(default = "default_object_id")]
    pub turbine: u32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub monitors: Vec<MonitorDef>,
}

/// Superimposed harmonic motion of one vessel, one DOF at a time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HarmonicMotionDef {
    #[serde(default = "default_object_id")]
    pub vessel: u32,
    /// Keyed by DOF name (`surge`, `sway`, `heave`, `roll`, `pitch`, `yaw`)
    pub motion: BTreeMap<String, DofMotionDef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub monitors: Vec<MonitorDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DofMotionDef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<RangeDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amplitude: Option<RangeDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase: Option<RangeDef>,
    /// Declared but excluded from the sweep when false
    #[serde(default = "default_true")]
    pub oscillate: bool,
}

/// Repetition of the same scenario with fresh wave seeds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WaveSeedDef {
    pub cases: usize,
    /// Seeds the generator of per-case seeds; system entropy when absent
    #[serde(rename = "generator seed", default, skip_serializing_if = "Option::is_none")]
    pub generator_seed: Option<u64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub monitors: Vec<MonitorDef>,
}

fn default_object_id() -> u32 {
    1
}

// ---------------------------------------------------------------------------
// Monitors (one aggregate column each)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonitorDef {
    /// Column name in the aggregate table; defaults to the variable name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub object: ObjectDef,
    pub variable: String,
    #[serde(default)]
    pub point: PointDef,
    #[serde(default)]
    pub statistic: StatisticDef,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum ObjectDef {
    Environment,
    Line(u32),
    Vessel(u32),
    Turbine(u32),
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub enum PointDef {
    #[default]
    #[serde(rename = "origin")]
    Origin,
    #[serde(rename = "end A")]
    EndA,
    #[serde(rename = "end B")]
    EndB,
    #[serde(rename = "node")]
    Node(usize),
    #[serde(rename = "arc length")]
    ArcLength(f64),
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum StatisticDef {
    #[default]
    #[serde(rename = "mean")]
    Mean,
    #[serde(rename = "min")]
    Min,
    #[serde(rename = "max")]
    Max,
    #[serde(rename = "std dev")]
    StdDev,
}

// ---------------------------------------------------------------------------
// Post processing (what to measure)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct PostProcessingDef {
    #[serde(default)]
    pub period: PeriodDef,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub lines: Vec<LineMeasurementDef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub vessels: Vec<VesselMeasurementDef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub modal: Vec<ModalDef>,
}

/// `whole simulation`, `{stage: n}` (1-based) or `{specified: [from, to]}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum PeriodDef {
    Keyword(String),
    Stage { stage: usize },
    Specified { specified: [f64; 2] },
}

impl Default for PeriodDef {
    fn default() -> Self {
        PeriodDef::Keyword("whole simulation".to_string())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineMeasurementDef {
    pub id: u32,
    /// Static effective tension profile
    #[serde(rename = "static", default)]
    pub static_profile: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tension: Option<TensionSelectorDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub motion: Option<ResponseSelectorDef>,
    #[serde(rename = "other results", default, skip_serializing_if = "Option::is_none")]
    pub other_results: Option<ResponseSelectorDef>,
}

/// `all nodes`, or any mix of fairleads, end segments and arc lengths.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum TensionSelectorDef {
    Keyword(String),
    Points(TensionPointsDef),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct TensionPointsDef {
    /// `A` and/or `B`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fairleads: Option<Vec<String>>,
    #[serde(rename = "end segments", default, skip_serializing_if = "Option::is_none")]
    pub end_segments: Option<SegmentsDef>,
    /// Arc lengths from end A, in metres
    #[serde(rename = "arc length", default, skip_serializing_if = "Option::is_none")]
    pub arc_length: Option<Vec<f64>>,
}

/// `all`, or `[first, last]` read as the half-open segment range `first..last`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum SegmentsDef {
    Keyword(String),
    Range([usize; 2]),
}

/// Selector for per-point result variables (motion, other results).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct ResponseSelectorDef {
    #[serde(rename = "all nodes", default, skip_serializing_if = "Option::is_none")]
    pub all_nodes: Option<DofsDef>,
    /// Keyed by end (`A`, `B`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fairleads: Option<BTreeMap<String, PointDofsDef>>,
    #[serde(rename = "end segments", default, skip_serializing_if = "Option::is_none")]
    pub end_segments: Option<EndSegmentsDef>,
    #[serde(rename = "arc length", default, skip_serializing_if = "Option::is_none")]
    pub arc_length: Option<Vec<ArcLengthDef>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PointDofsDef {
    pub dofs: DofsDef,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EndSegmentsDef {
    pub ids: SegmentsDef,
    pub dofs: DofsDef,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ArcLengthDef {
    pub at: f64,
    pub dofs: DofsDef,
}

/// Sentinel keyword (`all`, `all dofs`, `all dofs - dynamic`) or explicit names.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum DofsDef {
    Keyword(String),
    List(Vec<String>),
}

impl DofsDef {
    pub fn resolve(&self) -> ConfigResult<ss_core::DofSelection> {
        match self {
            DofsDef::Keyword(k) => ss_core::DofSelection::from_keyword(k),
            DofsDef::List(names) => ss_core::DofSelection::explicit(names.iter().cloned()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VesselMeasurementDef {
    pub id: u32,
    pub position: DofsDef,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModalDef {
    pub line: u32,
    /// First and last mode numbers, inclusive
    pub modes: [usize; 2],
    #[serde(default = "default_modal_outputs")]
    pub outputs: Vec<ModalOutputDef>,
    #[serde(rename = "include coupled", default)]
    pub include_coupled: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ModalOutputDef {
    #[serde(rename = "period")]
    Period,
    #[serde(rename = "mass")]
    Mass,
    #[serde(rename = "stiffness")]
    Stiffness,
    #[serde(rename = "local shape")]
    LocalShape,
    #[serde(rename = "global shape")]
    GlobalShape,
}

fn default_modal_outputs() -> Vec<ModalOutputDef> {
    vec![ModalOutputDef::Period]
}

// ---------------------------------------------------------------------------
// Persistence
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SaveDef {
    /// Engine data file per case
    #[serde(default = "default_true")]
    pub model: bool,
    /// Engine simulation file per case
    #[serde(default)]
    pub simulation: bool,
    /// Per-case statics/dynamics/modal tables
    #[serde(rename = "export results", default)]
    pub export_results: bool,
    #[serde(rename = "export formats", default = "default_export_formats")]
    pub export_formats: Vec<ExportFormatDef>,
    /// Output root; `<declaration dir>/.seasweep` when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,
}

impl Default for SaveDef {
    fn default() -> Self {
        Self {
            model: true,
            simulation: false,
            export_results: false,
            export_formats: default_export_formats(),
            directory: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormatDef {
    Csv,
    Json,
    /// Recognized so it can be rejected with a clear message
    Excel,
}

fn default_export_formats() -> Vec<ExportFormatDef> {
    vec![ExportFormatDef::Csv]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_def_forms() {
        let scalar: RangeDef = crate::from_yaml_str("12.0").unwrap();
        assert_eq!(scalar, RangeDef::Scalar(12.0));
        let list: RangeDef = crate::from_yaml_str("[1.0, 2.5]").unwrap();
        assert_eq!(list, RangeDef::List(vec![1.0, 2.5]));
        let bounds: RangeDef = crate::from_yaml_str("{from: 5, to: 15, step: 5}").unwrap();
        assert_eq!(bounds, RangeDef::bounds(5.0, 15.0, 5.0));
        assert_eq!(bounds.resolve("wind speed").unwrap().expand(), vec![5.0, 10.0, 15.0]);
    }

    #[test]
    fn missing_step_is_named() {
        let bounds: RangeDef = crate::from_yaml_str("{from: 5, to: 15}").unwrap();
        let err = bounds.resolve("wind speed").unwrap_err();
        assert!(err.to_string().contains("'step'"));
        assert!(err.to_string().contains("wind speed"));
    }

    #[test]
    fn batch_kind_is_exclusive() {
        let two_kinds = r#"
thrust curve:
  wind speed: 5.0
wave seed:
  cases: 3
"#;
        assert!(crate::from_yaml_str::<BatchDef>(two_kinds).is_err());
        let unknown = "random walk: {}";
        assert!(crate::from_yaml_str::<BatchDef>(unknown).is_err());
    }

    #[test]
    fn selectors_parse() {
        let yaml = r#"
id: 2
static: true
tension:
  fairleads: [A, B]
  end segments: all
motion:
  fairleads:
    A: { dofs: all }
  end segments: { ids: [0, 3], dofs: [X, Z] }
  arc length:
    - { at: 12.5, dofs: [Dynamic Rx] }
"#;
        let line: LineMeasurementDef = crate::from_yaml_str(yaml).unwrap();
        assert!(line.static_profile);
        assert!(matches!(line.tension, Some(TensionSelectorDef::Points(_))));
        let motion = line.motion.unwrap();
        assert_eq!(motion.end_segments.unwrap().ids, SegmentsDef::Range([0, 3]));
        assert_eq!(motion.arc_length.unwrap()[0].at, 12.5);

        let all: TensionSelectorDef = crate::from_yaml_str("all nodes").unwrap();
        assert_eq!(all, TensionSelectorDef::Keyword("all nodes".to_string()));
    }

    #[test]
    fn monitor_defaults() {
        let yaml = r#"
object: { line: 1 }
variable: Effective tension
point: end A
"#;
        let monitor: MonitorDef = crate::from_yaml_str(yaml).unwrap();
        assert_eq!(monitor.object, ObjectDef::Line(1));
        assert_eq!(monitor.point, PointDef::EndA);
        assert_eq!(monitor.statistic, StatisticDef::Mean);

        let node: PointDef = crate::from_yaml_str("{node: 4}").unwrap();
        assert_eq!(node, PointDef::Node(4));
    }

    #[test]
    fn period_forms() {
        let whole: PeriodDef = crate::from_yaml_str("whole simulation").unwrap();
        assert_eq!(whole, PeriodDef::default());
        let stage: PeriodDef = crate::from_yaml_str("{stage: 2}").unwrap();
        assert_eq!(stage, PeriodDef::Stage { stage: 2 });
        let specified: PeriodDef = crate::from_yaml_str("{specified: [10, 60]}").unwrap();
        assert_eq!(specified, PeriodDef::Specified { specified: [10.0, 60.0] });
    }
}
