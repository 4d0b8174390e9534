//! Typed measurement spec.
//!
//! Resolved once from the `post processing` section before the batch starts;
//! keyword errors surface here instead of in the middle of a sweep.

use std::collections::HashSet;
use std::ops::Range;

use ss_core::{ConfigError, ConfigResult, DofSelection, ensure_finite};
use ss_engine::{ModalRequest, Period};
use ss_project::schema::{
    ModalDef, ModalOutputDef, PeriodDef, PostProcessingDef, ResponseSelectorDef, SegmentsDef,
    TensionSelectorDef,
};

use crate::monitor::Monitor;

#[derive(Debug, Clone, PartialEq)]
pub struct MeasurementSpec {
    /// Period of every time-domain query
    pub period: Period,
    pub lines: Vec<LineMeasurement>,
    pub vessels: Vec<VesselMeasurement>,
    pub modal: Vec<ModalMeasurement>,
    /// One aggregate column each, in declaration order
    pub monitors: Vec<Monitor>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineMeasurement {
    pub id: u32,
    pub static_profile: bool,
    pub tension: Option<TensionSelector>,
    pub motion: Option<ResponseSelector>,
    pub other_results: Option<ResponseSelector>,
}

impl LineMeasurement {
    pub fn is_dynamic(&self) -> bool {
        self.tension.is_some() || self.motion.is_some() || self.other_results.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEnd {
    A,
    B,
}

impl LineEnd {
    pub fn parse(s: &str) -> ConfigResult<Self> {
        match s.trim() {
            "A" => Ok(LineEnd::A),
            "B" => Ok(LineEnd::B),
            other => Err(ConfigError::invalid("fairleads", other, "line ends are 'A' or 'B'")),
        }
    }
}

/// Half-open range of 0-based segment indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentRange {
    /// `0..NumberOfSections-1`
    All,
    Span { first: usize, last: usize },
}

impl SegmentRange {
    fn from_def(def: &SegmentsDef) -> ConfigResult<Self> {
        match def {
            SegmentsDef::Keyword(k) if k.trim() == "all" => Ok(SegmentRange::All),
            SegmentsDef::Keyword(k) => Err(ConfigError::invalid(
                "end segments",
                k,
                "expected \"all\" or [first, last]",
            )),
            SegmentsDef::Range([first, last]) if last < first => Err(ConfigError::invalid(
                "end segments",
                format!("[{}, {}]", first, last),
                "last must not precede first",
            )),
            SegmentsDef::Range([first, last]) => Ok(SegmentRange::Span {
                first: *first,
                last: *last,
            }),
        }
    }

    /// Segment indices for a line with `sections` sections.
    pub fn indices(self, sections: usize) -> Range<usize> {
        match self {
            SegmentRange::All => 0..sections.saturating_sub(1),
            SegmentRange::Span { first, last } => first..last,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TensionSelector {
    AllNodes,
    Points {
        fairleads: Vec<LineEnd>,
        end_segments: Option<SegmentRange>,
        arc_length: Vec<f64>,
    },
}

/// Per-point variables of one line; families are additive.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResponseSelector {
    pub all_nodes: Option<DofSelection>,
    pub fairleads: Vec<(LineEnd, DofSelection)>,
    pub end_segments: Option<(SegmentRange, DofSelection)>,
    pub arc_length: Vec<(f64, DofSelection)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VesselMeasurement {
    pub id: u32,
    pub dofs: DofSelection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalOutput {
    Period,
    Mass,
    Stiffness,
    LocalShape,
    GlobalShape,
}

impl ModalOutput {
    pub fn is_shape(self) -> bool {
        matches!(self, ModalOutput::LocalShape | ModalOutput::GlobalShape)
    }

    pub fn column_stem(self) -> &'static str {
        match self {
            ModalOutput::Period => "Period",
            ModalOutput::Mass => "Mass",
            ModalOutput::Stiffness => "Stiffness",
            ModalOutput::LocalShape => "LocalShape",
            ModalOutput::GlobalShape => "GlobalShape",
        }
    }
}

impl From<ModalOutputDef> for ModalOutput {
    fn from(def: ModalOutputDef) -> Self {
        match def {
            ModalOutputDef::Period => ModalOutput::Period,
            ModalOutputDef::Mass => ModalOutput::Mass,
            ModalOutputDef::Stiffness => ModalOutput::Stiffness,
            ModalOutputDef::LocalShape => ModalOutput::LocalShape,
            ModalOutputDef::GlobalShape => ModalOutput::GlobalShape,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModalMeasurement {
    pub line: u32,
    pub first_mode: usize,
    pub last_mode: usize,
    pub outputs: Vec<ModalOutput>,
    pub include_coupled: bool,
}

impl ModalMeasurement {
    pub fn mode_count(&self) -> usize {
        self.last_mode + 1 - self.first_mode
    }

    pub fn request(&self) -> ModalRequest {
        ModalRequest {
            first_mode: self.first_mode,
            last_mode: self.last_mode,
            calculate_shapes: self.outputs.iter().any(|o| o.is_shape()),
            include_coupled: self.include_coupled,
        }
    }

    /// Columns of the modal table for a line with `node_count` nodes:
    /// the mode number, one per scalar family and one X/Y/Z triplet per node
    /// after the first for each shape family.
    pub fn column_count(&self, node_count: usize) -> usize {
        1 + self
            .outputs
            .iter()
            .map(|o| if o.is_shape() { 3 * node_count.saturating_sub(1) } else { 1 })
            .sum::<usize>()
    }
}

impl MeasurementSpec {
    /// Nothing measured, no monitors.
    pub fn empty() -> Self {
        Self {
            period: Period::WholeSimulation,
            lines: Vec::new(),
            vessels: Vec::new(),
            modal: Vec::new(),
            monitors: Vec::new(),
        }
    }

    pub fn resolve(post: &PostProcessingDef, monitors: Vec<Monitor>) -> ConfigResult<Self> {
        let mut names = HashSet::new();
        for monitor in &monitors {
            if !names.insert(monitor.name.as_str()) {
                return Err(ConfigError::DuplicateName {
                    name: monitor.name.clone(),
                    context: "monitors".to_string(),
                });
            }
        }

        let lines = post
            .lines
            .iter()
            .map(|line| {
                let context = format!("line {}", line.id);
                Ok(LineMeasurement {
                    id: line.id,
                    static_profile: line.static_profile,
                    tension: line.tension.as_ref().map(resolve_tension).transpose()?,
                    motion: line
                        .motion
                        .as_ref()
                        .map(|m| resolve_response(m, &context))
                        .transpose()?,
                    other_results: line
                        .other_results
                        .as_ref()
                        .map(|m| resolve_response(m, &context))
                        .transpose()?,
                })
            })
            .collect::<ConfigResult<Vec<_>>>()?;

        let vessels = post
            .vessels
            .iter()
            .map(|v| {
                Ok(VesselMeasurement {
                    id: v.id,
                    dofs: v.position.resolve()?,
                })
            })
            .collect::<ConfigResult<Vec<_>>>()?;

        let modal = post
            .modal
            .iter()
            .map(resolve_modal)
            .collect::<ConfigResult<Vec<_>>>()?;

        Ok(Self {
            period: resolve_period(&post.period)?,
            lines,
            vessels,
            modal,
            monitors,
        })
    }

    /// A `Time` column leads the dynamics table when anything is read in the time domain.
    pub fn has_time_histories(&self) -> bool {
        self.lines.iter().any(LineMeasurement::is_dynamic) || !self.vessels.is_empty()
    }

    pub fn monitor_names(&self) -> Vec<String> {
        self.monitors.iter().map(|m| m.name.clone()).collect()
    }
}

/// Stages are 1-based in declarations and 0-based for the engine.
pub fn resolve_period(def: &PeriodDef) -> ConfigResult<Period> {
    match def {
        PeriodDef::Keyword(k) => match k.trim() {
            "whole simulation" => Ok(Period::WholeSimulation),
            "static state" => Ok(Period::StaticState),
            other => Err(ConfigError::invalid(
                "period",
                other,
                "expected \"whole simulation\", \"static state\", {stage} or {specified}",
            )),
        },
        PeriodDef::Stage { stage: 0 } => Err(ConfigError::invalid("period stage", 0, "stages start at 1")),
        PeriodDef::Stage { stage } => Ok(Period::Stage(stage - 1)),
        PeriodDef::Specified { specified: [from, to] } => {
            let from_s = ensure_finite(*from, "period specified from")?;
            let to_s = ensure_finite(*to, "period specified to")?;
            if to_s <= from_s {
                return Err(ConfigError::invalid(
                    "period specified",
                    format!("[{}, {}]", from_s, to_s),
                    "end must follow start",
                ));
            }
            Ok(Period::Specified { from_s, to_s })
        }
    }
}

fn resolve_tension(def: &TensionSelectorDef) -> ConfigResult<TensionSelector> {
    match def {
        TensionSelectorDef::Keyword(k) if k.trim() == "all nodes" => Ok(TensionSelector::AllNodes),
        TensionSelectorDef::Keyword(k) => Err(ConfigError::invalid(
            "tension",
            k,
            "expected \"all nodes\" or a point selection",
        )),
        TensionSelectorDef::Points(points) => Ok(TensionSelector::Points {
            fairleads: points
                .fairleads
                .iter()
                .flatten()
                .map(|e| LineEnd::parse(e))
                .collect::<ConfigResult<_>>()?,
            end_segments: points.end_segments.as_ref().map(SegmentRange::from_def).transpose()?,
            arc_length: points
                .arc_length
                .iter()
                .flatten()
                .map(|s| ensure_finite(*s, "tension arc length"))
                .collect::<ConfigResult<_>>()?,
        }),
    }
}

fn resolve_response(def: &ResponseSelectorDef, context: &str) -> ConfigResult<ResponseSelector> {
    let mut selector = ResponseSelector {
        all_nodes: def.all_nodes.as_ref().map(|d| d.resolve()).transpose()?,
        ..ResponseSelector::default()
    };

    for (end, point) in def.fairleads.iter().flatten() {
        selector.fairleads.push((LineEnd::parse(end)?, point.dofs.resolve()?));
    }
    if let Some(segments) = &def.end_segments {
        selector.end_segments = Some((SegmentRange::from_def(&segments.ids)?, segments.dofs.resolve()?));
    }
    for station in def.arc_length.iter().flatten() {
        let at = ensure_finite(station.at, &format!("{} arc length", context))?;
        selector.arc_length.push((at, station.dofs.resolve()?));
    }

    Ok(selector)
}

fn resolve_modal(def: &ModalDef) -> ConfigResult<ModalMeasurement> {
    let [first_mode, last_mode] = def.modes;
    if first_mode == 0 || last_mode < first_mode {
        return Err(ConfigError::invalid(
            format!("modal line {} modes", def.line),
            format!("[{}, {}]", first_mode, last_mode),
            "expected 1 <= first <= last",
        ));
    }
    Ok(ModalMeasurement {
        line: def.line,
        first_mode,
        last_mode,
        outputs: def.outputs.iter().copied().map(ModalOutput::from).collect(),
        include_coupled: def.include_coupled,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ss_project::schema::{LineMeasurementDef, TensionPointsDef};

    #[test]
    fn stage_is_zero_based_for_engine() {
        assert_eq!(resolve_period(&PeriodDef::Stage { stage: 2 }).unwrap(), Period::Stage(1));
        assert!(resolve_period(&PeriodDef::Stage { stage: 0 }).is_err());
        assert_eq!(resolve_period(&PeriodDef::default()).unwrap(), Period::WholeSimulation);
        assert!(resolve_period(&PeriodDef::Specified { specified: [10.0, 5.0] }).is_err());
    }

    #[test]
    fn segment_all_excludes_last_section() {
        assert_eq!(SegmentRange::All.indices(5), 0..4);
        assert_eq!(SegmentRange::All.indices(0), 0..0);
        assert_eq!(SegmentRange::Span { first: 1, last: 3 }.indices(5), 1..3);
    }

    #[test]
    fn modal_column_count_includes_shape_triplets() {
        let modal = ModalMeasurement {
            line: 1,
            first_mode: 1,
            last_mode: 3,
            outputs: vec![ModalOutput::Period, ModalOutput::LocalShape],
            include_coupled: false,
        };
        assert_eq!(modal.mode_count(), 3);
        assert!(modal.request().calculate_shapes);
        // mode + period + 3 * (5 - 1)
        assert_eq!(modal.column_count(5), 14);
    }

    #[test]
    fn bad_fairlead_end_is_config_error() {
        let post = PostProcessingDef {
            lines: vec![LineMeasurementDef {
                id: 1,
                static_profile: false,
                tension: Some(TensionSelectorDef::Points(TensionPointsDef {
                    fairleads: Some(vec!["C".to_string()]),
                    ..TensionPointsDef::default()
                })),
                motion: None,
                other_results: None,
            }],
            ..PostProcessingDef::default()
        };
        assert!(MeasurementSpec::resolve(&post, vec![]).is_err());
    }

    #[test]
    fn duplicate_monitor_names_rejected() {
        let monitors = vec![Monitor::mean_at_origin("Thrust", ss_engine::ObjectRef::Turbine(1), "Rotor aero Thrust"); 2];
        let err = MeasurementSpec::resolve(&PostProcessingDef::default(), monitors).unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateName { .. }));
    }
}
