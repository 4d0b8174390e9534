//! Modal results of a line.

use std::collections::HashSet;

use ss_engine::{ModeDetails, ObjectRef, SimulationEngine};
use ss_results::{Phase, ResultStore, ResultsError};

use crate::error::PostResult;
use crate::spec::{ModalMeasurement, ModalOutput};

const AXES: [&str; 3] = ["X", "Y", "Z"];

/// Run the modal analysis of one line and write one row per mode.
///
/// The table width is fixed before any column is written: shape families add
/// an X/Y/Z triplet per node after the first, so it depends on the line's
/// node count reported by the engine.
pub fn extract_modes<E: SimulationEngine + ?Sized>(
    engine: &mut E,
    results: &mut ResultStore,
    modal: &ModalMeasurement,
) -> PostResult<()> {
    let object = ObjectRef::Line(modal.line);
    let mode_set = engine.modes(object, &modal.request())?;

    if mode_set.modes.len() != modal.mode_count() {
        return Err(ResultsError::Shape {
            context: format!("{} modes", object),
            expected: modal.mode_count(),
            found: mode_set.modes.len(),
        }
        .into());
    }

    let node_count = mode_set.node_count;
    let mut columns: Vec<(String, Vec<f64>)> = Vec::with_capacity(modal.column_count(node_count));
    columns.push((
        format!("{}_Mode", object),
        mode_set.modes.iter().map(|m| m.number as f64).collect(),
    ));

    for &output in &modal.outputs {
        if output.is_shape() {
            for node in 2..=node_count {
                for (axis_index, axis) in AXES.iter().enumerate() {
                    let values = mode_set
                        .modes
                        .iter()
                        .map(|m| shape_component(m, output, node, axis_index, object))
                        .collect::<PostResult<Vec<f64>>>()?;
                    columns.push((
                        format!("{}_{}_Node{}_{}", object, output.column_stem(), node, axis),
                        values,
                    ));
                }
            }
        } else {
            let values = mode_set
                .modes
                .iter()
                .map(|m| match output {
                    ModalOutput::Period => m.period_s,
                    ModalOutput::Mass => m.modal_mass,
                    _ => m.modal_stiffness,
                })
                .collect();
            columns.push((format!("{}_{}", object, output.column_stem()), values));
        }
    }

    // All or nothing: a clash leaves the modal table as it was.
    let table = results.table(Phase::Modal);
    let mut names = HashSet::new();
    for (name, _) in &columns {
        if table.contains(name) || !names.insert(name.as_str()) {
            return Err(ResultsError::DuplicateColumn {
                table: table.name().to_string(),
                name: name.clone(),
            }
            .into());
        }
    }

    tracing::debug!(line = %object, modes = mode_set.modes.len(), columns = columns.len(), "modal table");
    for (name, values) in columns {
        results.append_column(Phase::Modal, name, values)?;
    }
    Ok(())
}

fn shape_component(
    mode: &ModeDetails,
    output: ModalOutput,
    node: usize,
    axis: usize,
    object: ObjectRef,
) -> PostResult<f64> {
    let shape = match output {
        ModalOutput::LocalShape => &mode.shape_local,
        _ => &mode.shape_global,
    };
    shape.get(node - 1).map(|v| v[axis]).ok_or_else(|| {
        ResultsError::Shape {
            context: format!("{} mode {} shape", object, mode.number),
            expected: node,
            found: shape.len(),
        }
        .into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ss_engine::{DryRunEngine, LineGeometry};

    #[test]
    fn shape_columns_skip_first_node() {
        let mut engine = DryRunEngine::new().with_line(3, LineGeometry::uniform(3, 2, 5.0, true));
        engine.run_statics().unwrap();
        let mut results = ResultStore::new();
        let modal = ModalMeasurement {
            line: 3,
            first_mode: 1,
            last_mode: 4,
            outputs: vec![ModalOutput::Period, ModalOutput::GlobalShape],
            include_coupled: false,
        };
        extract_modes(&mut engine, &mut results, &modal).unwrap();

        let table = results.table(Phase::Modal);
        assert_eq!(table.width(), modal.column_count(3));
        assert_eq!(
            table.column_names(),
            vec![
                "Line3_Mode",
                "Line3_Period",
                "Line3_GlobalShape_Node2_X",
                "Line3_GlobalShape_Node2_Y",
                "Line3_GlobalShape_Node2_Z",
                "Line3_GlobalShape_Node3_X",
                "Line3_GlobalShape_Node3_Y",
                "Line3_GlobalShape_Node3_Z",
            ]
        );
        assert_eq!(table.column("Line3_Mode").unwrap().values, vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn clashing_names_leave_the_table_untouched() {
        let mut engine = DryRunEngine::new();
        engine.run_statics().unwrap();
        let mut results = ResultStore::new();
        results.append_column(Phase::Modal, "Line1_Period", vec![9.0]).unwrap();

        let modal = ModalMeasurement {
            line: 1,
            first_mode: 1,
            last_mode: 2,
            outputs: vec![ModalOutput::Mass, ModalOutput::Period],
            include_coupled: false,
        };
        let err = extract_modes(&mut engine, &mut results, &modal).unwrap_err();
        assert!(err.to_string().contains("Line1_Period"));
        assert_eq!(results.table(Phase::Modal).column_names(), vec!["Line1_Period"]);

        let mut results = ResultStore::new();
        let repeated = ModalMeasurement {
            outputs: vec![ModalOutput::Mass, ModalOutput::Period, ModalOutput::Mass],
            ..modal
        };
        assert!(extract_modes(&mut engine, &mut results, &repeated).is_err());
        assert!(results.table(Phase::Modal).is_empty());
    }

    #[test]
    fn modal_requires_statics() {
        let mut engine = DryRunEngine::new();
        let mut results = ResultStore::new();
        let modal = ModalMeasurement {
            line: 1,
            first_mode: 1,
            last_mode: 1,
            outputs: vec![ModalOutput::Period],
            include_coupled: false,
        };
        assert!(extract_modes(&mut engine, &mut results, &modal).is_err());
        assert!(results.table(Phase::Modal).is_empty());
    }
}
