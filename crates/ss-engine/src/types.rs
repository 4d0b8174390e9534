//! Addressing and value types exchanged with the engine.

use std::fmt;

/// Model object addressed by a directive or a result query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ObjectRef {
    /// Global analysis settings
    General,
    Environment,
    Line(u32),
    Vessel(u32),
    Turbine(u32),
}

impl fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::General => write!(f, "General"),
            Self::Environment => write!(f, "Environment"),
            Self::Line(id) => write!(f, "Line{}", id),
            Self::Vessel(id) => write!(f, "Vessel{}", id),
            Self::Turbine(id) => write!(f, "Turbine{}", id),
        }
    }
}

/// Value written by a directive.
#[derive(Debug, Clone, PartialEq)]
pub enum DirectiveValue {
    Number(f64),
    Integer(i64),
    Text(String),
    Flag(bool),
}

impl From<f64> for DirectiveValue {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<i64> for DirectiveValue {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<bool> for DirectiveValue {
    fn from(v: bool) -> Self {
        Self::Flag(v)
    }
}

impl From<&str> for DirectiveValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for DirectiveValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl fmt::Display for DirectiveValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(v) => write!(f, "{:?}", v),
            Self::Integer(v) => write!(f, "{}", v),
            Self::Text(v) => write!(f, "\"{}\"", v),
            Self::Flag(v) => write!(f, "{}", v),
        }
    }
}

/// A single configuration write applied before running a case.
#[derive(Debug, Clone, PartialEq)]
pub struct Directive {
    pub object: ObjectRef,
    pub property: String,
    pub value: DirectiveValue,
}

impl Directive {
    pub fn new(object: ObjectRef, property: impl Into<String>, value: impl Into<DirectiveValue>) -> Self {
        Self {
            object,
            property: property.into(),
            value: value.into(),
        }
    }

    /// `Object.Property` path of the write.
    pub fn target(&self) -> String {
        format!("{}.{}", self.object, self.property)
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{} = {}", self.object, self.property, self.value)
    }
}

/// Time window over which results are read.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Period {
    #[default]
    WholeSimulation,
    /// Result of the statics calculation
    StaticState,
    /// 0-based stage index
    Stage(usize),
    /// Explicit window in seconds
    Specified { from_s: f64, to_s: f64 },
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WholeSimulation => write!(f, "whole simulation"),
            Self::StaticState => write!(f, "static state"),
            Self::Stage(i) => write!(f, "stage {}", i + 1),
            Self::Specified { from_s, to_s } => write!(f, "{}s to {}s", from_s, to_s),
        }
    }
}

/// Where on an object a result is evaluated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EvaluationPoint {
    /// Object origin (vessels, turbines, global statistics)
    Origin,
    EndA,
    EndB,
    /// 1-based node number
    Node(usize),
    /// Distance along the line from end A, in metres
    ArcLength(f64),
}

impl fmt::Display for EvaluationPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Origin => write!(f, "origin"),
            Self::EndA => write!(f, "end A"),
            Self::EndB => write!(f, "end B"),
            Self::Node(n) => write!(f, "node {}", n),
            Self::ArcLength(s) => write!(f, "arc length {}", s),
        }
    }
}

/// Summary statistics of one variable over a period.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Statistics {
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    pub std_dev: f64,
}

/// Statistic picked out of [`Statistics`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatisticKind {
    #[default]
    Mean,
    Min,
    Max,
    StdDev,
}

impl Statistics {
    pub fn get(&self, kind: StatisticKind) -> f64 {
        match kind {
            StatisticKind::Mean => self.mean,
            StatisticKind::Min => self.min,
            StatisticKind::Max => self.max,
            StatisticKind::StdDev => self.std_dev,
        }
    }

    /// Statistics of a sampled series; all zero for an empty series.
    pub fn from_samples(samples: &[f64]) -> Self {
        if samples.is_empty() {
            return Self::default();
        }
        let n = samples.len() as f64;
        let mean = samples.iter().sum::<f64>() / n;
        let var = samples.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        Self {
            mean,
            min: samples.iter().copied().fold(f64::INFINITY, f64::min),
            max: samples.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            std_dev: var.sqrt(),
        }
    }
}

/// Discretization of a line as seen by result queries.
#[derive(Debug, Clone, PartialEq)]
pub struct LineGeometry {
    /// Number of structural nodes (end A is node 1, end B is node N)
    pub node_count: usize,
    /// Arc length at the end of each section, from end A
    pub cumulative_length: Vec<f64>,
    /// End B is anchored to the seabed, so only end A is a fairlead
    pub end_b_anchored: bool,
}

impl LineGeometry {
    /// Line split into `sections` equal sections of `section_length`.
    pub fn uniform(node_count: usize, sections: usize, section_length: f64, end_b_anchored: bool) -> Self {
        Self {
            node_count,
            cumulative_length: (1..=sections).map(|i| i as f64 * section_length).collect(),
            end_b_anchored,
        }
    }

    pub fn number_of_sections(&self) -> usize {
        self.cumulative_length.len()
    }

    pub fn total_length(&self) -> f64 {
        self.cumulative_length.last().copied().unwrap_or(0.0)
    }
}

/// Variable profile along a line.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RangeGraph {
    /// Arc length of each sample
    pub x: Vec<f64>,
    pub mean: Vec<f64>,
}

/// Mode range and options for a modal analysis of one line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModalRequest {
    pub first_mode: usize,
    pub last_mode: usize,
    pub calculate_shapes: bool,
    pub include_coupled: bool,
}

/// Results of one vibration mode.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ModeDetails {
    pub number: usize,
    pub period_s: f64,
    pub modal_mass: f64,
    pub modal_stiffness: f64,
    /// Shape per node in the line's local axes
    pub shape_local: Vec<[f64; 3]>,
    /// Shape per node in global axes
    pub shape_global: Vec<[f64; 3]>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ModeSet {
    pub node_count: usize,
    pub modes: Vec<ModeDetails>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directive_display_uses_object_path() {
        let d = Directive::new(ObjectRef::Vessel(1), "HarmonicMotionPeriod", 10.0);
        assert_eq!(d.to_string(), "Vessel1.HarmonicMotionPeriod = 10.0");
        assert_eq!(d.target(), "Vessel1.HarmonicMotionPeriod");
    }

    #[test]
    fn statistics_from_samples() {
        let s = Statistics::from_samples(&[1.0, 2.0, 3.0]);
        assert!((s.mean - 2.0).abs() < 1e-12);
        assert_eq!(s.min, 1.0);
        assert_eq!(s.max, 3.0);
        assert!((s.std_dev - (2.0_f64 / 3.0).sqrt()).abs() < 1e-12);
        assert_eq!(s.get(StatisticKind::Max), 3.0);
    }

    #[test]
    fn uniform_geometry() {
        let g = LineGeometry::uniform(11, 10, 5.0, true);
        assert_eq!(g.number_of_sections(), 10);
        assert_eq!(g.cumulative_length[0], 5.0);
        assert_eq!(g.total_length(), 50.0);
    }
}
