//! Line results: static tension profile, tension and per-point response histories.

use ss_engine::{EvaluationPoint, LineGeometry, ObjectRef, Period, SimulationEngine};
use ss_results::{Phase, ResultStore};

use crate::error::{PostError, PostResult};
use crate::naming::{arc_length_locator, column_name, end_locator, node_locator, segment_locator};
use crate::spec::{LineEnd, LineMeasurement, ResponseSelector, SegmentRange, TensionSelector};

const EFFECTIVE_TENSION: &str = "Effective tension";

/// Static effective tension along the line, as `Line{id}_ArcLen` / `Line{id}_EffectiveTension`.
pub fn extract_static_profile<E: SimulationEngine + ?Sized>(
    engine: &E,
    results: &mut ResultStore,
    line: &LineMeasurement,
) -> PostResult<()> {
    let object = ObjectRef::Line(line.id);
    let graph = engine.range_graph(object, EFFECTIVE_TENSION, Period::StaticState)?;
    results.append_column(Phase::Statics, format!("{}_ArcLen", object), graph.x)?;
    results.append_column(Phase::Statics, format!("{}_EffectiveTension", object), graph.mean)?;
    Ok(())
}

/// Tension, motion and other-result time histories of one line.
pub fn extract_time_histories<E: SimulationEngine + ?Sized>(
    engine: &E,
    results: &mut ResultStore,
    line: &LineMeasurement,
    period: Period,
) -> PostResult<()> {
    if !line.is_dynamic() {
        return Ok(());
    }

    let mut reader = LineReader {
        engine,
        results,
        object: ObjectRef::Line(line.id),
        geometry: engine.line_geometry(ObjectRef::Line(line.id))?,
        period,
    };

    if let Some(tension) = &line.tension {
        reader.tension(tension)?;
    }
    if let Some(motion) = &line.motion {
        reader.response(motion)?;
    }
    if let Some(other) = &line.other_results {
        reader.response(other)?;
    }
    Ok(())
}

struct LineReader<'a, E: SimulationEngine + ?Sized> {
    engine: &'a E,
    results: &'a mut ResultStore,
    object: ObjectRef,
    geometry: LineGeometry,
    period: Period,
}

impl<E: SimulationEngine + ?Sized> LineReader<'_, E> {
    fn write(&mut self, locator: &str, column_variable: &str, variable: &str, point: EvaluationPoint) -> PostResult<()> {
        let name = column_name(self.object, locator, column_variable);
        let series = self.engine.time_history(self.object, variable, self.period, point)?;
        tracing::debug!(column = %name, samples = series.len(), "line time history");
        self.results.append_column(Phase::Dynamics, name, series)?;
        Ok(())
    }

    /// Fairlead B does not exist on a line anchored at end B.
    fn has_end(&self, end: LineEnd) -> bool {
        match end {
            LineEnd::A => true,
            LineEnd::B => !self.geometry.end_b_anchored,
        }
    }

    fn segment_points(&self, range: SegmentRange) -> PostResult<Vec<(usize, f64)>> {
        let sections = self.geometry.number_of_sections();
        range
            .indices(sections)
            .map(|seg| {
                self.geometry
                    .cumulative_length
                    .get(seg)
                    .map(|&s| (seg, s))
                    .ok_or_else(|| PostError::Selector {
                        object: self.object.to_string(),
                        reason: format!("segment {} of {} sections", seg, sections),
                    })
            })
            .collect()
    }

    fn tension(&mut self, selector: &TensionSelector) -> PostResult<()> {
        match selector {
            TensionSelector::AllNodes => {
                let n = self.geometry.node_count;
                for node in 1..=n {
                    self.write(&node_locator(node, n), "Tension", EFFECTIVE_TENSION, EvaluationPoint::Node(node))?;
                }
            }
            TensionSelector::Points {
                fairleads,
                end_segments,
                arc_length,
            } => {
                for &end in fairleads {
                    if !self.has_end(end) {
                        tracing::debug!(line = %self.object, "end B anchored, no second fairlead");
                        continue;
                    }
                    self.write(end_locator(end), "Tension", EFFECTIVE_TENSION, end_point(end))?;
                }
                if let Some(range) = end_segments {
                    for (seg, s) in self.segment_points(*range)? {
                        self.write(&segment_locator(seg), "Tension", EFFECTIVE_TENSION, EvaluationPoint::ArcLength(s))?;
                    }
                }
                for &s in arc_length {
                    self.write(&arc_length_locator(s), "Tension", EFFECTIVE_TENSION, EvaluationPoint::ArcLength(s))?;
                }
            }
        }
        Ok(())
    }

    fn response(&mut self, selector: &ResponseSelector) -> PostResult<()> {
        if let Some(dofs) = &selector.all_nodes {
            let n = self.geometry.node_count;
            let variables = dofs.expand();
            for node in 1..=n {
                let locator = node_locator(node, n);
                for variable in &variables {
                    self.write(&locator, variable, variable, EvaluationPoint::Node(node))?;
                }
            }
        }

        for (end, dofs) in &selector.fairleads {
            if !self.has_end(*end) {
                tracing::debug!(line = %self.object, "end B anchored, no second fairlead");
                continue;
            }
            for variable in dofs.expand() {
                self.write(end_locator(*end), &variable, &variable, end_point(*end))?;
            }
        }

        if let Some((range, dofs)) = &selector.end_segments {
            let variables = dofs.expand();
            for (seg, s) in self.segment_points(*range)? {
                let locator = segment_locator(seg);
                for variable in &variables {
                    self.write(&locator, variable, variable, EvaluationPoint::ArcLength(s))?;
                }
            }
        }

        for (s, dofs) in &selector.arc_length {
            let locator = arc_length_locator(*s);
            for variable in dofs.expand() {
                self.write(&locator, &variable, &variable, EvaluationPoint::ArcLength(*s))?;
            }
        }
        Ok(())
    }
}

fn end_point(end: LineEnd) -> EvaluationPoint {
    match end {
        LineEnd::A => EvaluationPoint::EndA,
        LineEnd::B => EvaluationPoint::EndB,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ss_core::DofSelection;
    use ss_engine::DryRunEngine;

    fn line(tension: Option<TensionSelector>, motion: Option<ResponseSelector>) -> LineMeasurement {
        LineMeasurement {
            id: 1,
            static_profile: false,
            tension,
            motion,
            other_results: None,
        }
    }

    fn run(engine: &mut DryRunEngine, line: &LineMeasurement) -> PostResult<ResultStore> {
        engine.run_dynamics()?;
        let mut results = ResultStore::new();
        extract_time_histories(&*engine, &mut results, line, Period::WholeSimulation)?;
        Ok(results)
    }

    #[test]
    fn all_nodes_on_three_node_line() {
        let mut engine = DryRunEngine::new().with_line(1, LineGeometry::uniform(3, 2, 10.0, true));
        let results = run(&mut engine, &line(Some(TensionSelector::AllNodes), None)).unwrap();
        assert_eq!(
            results.table(Phase::Dynamics).column_names(),
            vec!["Line1_NodeA_Tension", "Line1_Node2_Tension", "Line1_NodeB_Tension"]
        );
    }

    #[test]
    fn fairlead_b_skipped_when_anchored() {
        let selector = TensionSelector::Points {
            fairleads: vec![LineEnd::A, LineEnd::B],
            end_segments: None,
            arc_length: vec![],
        };
        let mut anchored = DryRunEngine::new().with_line(1, LineGeometry::uniform(5, 4, 10.0, true));
        let results = run(&mut anchored, &line(Some(selector.clone()), None)).unwrap();
        assert_eq!(results.table(Phase::Dynamics).column_names(), vec!["Line1_NodeA_Tension"]);

        let mut shared = DryRunEngine::new().with_line(1, LineGeometry::uniform(5, 4, 10.0, false));
        let results = run(&mut shared, &line(Some(selector), None)).unwrap();
        assert_eq!(
            results.table(Phase::Dynamics).column_names(),
            vec!["Line1_NodeA_Tension", "Line1_NodeB_Tension"]
        );
    }

    #[test]
    fn end_segments_all_is_half_open() {
        let selector = TensionSelector::Points {
            fairleads: vec![],
            end_segments: Some(SegmentRange::All),
            arc_length: vec![25.0],
        };
        let mut engine = DryRunEngine::new().with_line(1, LineGeometry::uniform(5, 4, 10.0, true));
        let results = run(&mut engine, &line(Some(selector), None)).unwrap();
        assert_eq!(
            results.table(Phase::Dynamics).column_names(),
            vec![
                "Line1_EndSeg1_Tension",
                "Line1_EndSeg2_Tension",
                "Line1_EndSeg3_Tension",
                "Line1_ArcLen25.0_Tension",
            ]
        );
    }

    #[test]
    fn segment_beyond_line_is_selector_error() {
        let selector = TensionSelector::Points {
            fairleads: vec![],
            end_segments: Some(SegmentRange::Span { first: 2, last: 9 }),
            arc_length: vec![],
        };
        let mut engine = DryRunEngine::new().with_line(1, LineGeometry::uniform(5, 4, 10.0, true));
        let err = run(&mut engine, &line(Some(selector), None)).unwrap_err();
        assert!(matches!(err, PostError::Selector { .. }));
    }

    #[test]
    fn motion_dofs_expand_and_strip_spaces() {
        let motion = ResponseSelector {
            fairleads: vec![(LineEnd::A, DofSelection::All)],
            ..ResponseSelector::default()
        };
        let mut engine = DryRunEngine::new();
        let results = run(&mut engine, &line(None, Some(motion))).unwrap();
        assert_eq!(
            results.table(Phase::Dynamics).column_names(),
            vec![
                "Line1_NodeA_X",
                "Line1_NodeA_Y",
                "Line1_NodeA_Z",
                "Line1_NodeA_DynamicRx",
                "Line1_NodeA_DynamicRy",
                "Line1_NodeA_DynamicRz",
            ]
        );
    }

    #[test]
    fn overlapping_selectors_collide() {
        let motion = ResponseSelector {
            all_nodes: Some(DofSelection::Explicit(vec!["X".to_string()])),
            fairleads: vec![(LineEnd::A, DofSelection::Explicit(vec!["X".to_string()]))],
            ..ResponseSelector::default()
        };
        let mut engine = DryRunEngine::new();
        let err = run(&mut engine, &line(None, Some(motion))).unwrap_err();
        assert!(matches!(
            err,
            PostError::Results(ss_results::ResultsError::DuplicateColumn { .. })
        ));
    }

    #[test]
    fn static_profile_goes_to_statics_table() {
        let mut engine = DryRunEngine::new().with_line(2, LineGeometry::uniform(5, 4, 10.0, true));
        engine.run_statics().unwrap();
        let mut results = ResultStore::new();
        let measurement = LineMeasurement {
            id: 2,
            static_profile: true,
            tension: None,
            motion: None,
            other_results: None,
        };
        extract_static_profile(&engine, &mut results, &measurement).unwrap();
        let statics = results.table(Phase::Statics);
        assert_eq!(statics.column_names(), vec!["Line2_ArcLen", "Line2_EffectiveTension"]);
        assert_eq!(statics.column("Line2_ArcLen").unwrap().values, vec![0.0, 10.0, 20.0, 30.0, 40.0]);
    }
}
