//! Declaration validation logic.
//!
//! Structural checks only; ranges and selectors are resolved (and their own
//! errors reported) when the batch plan is built.

use crate::schema::{
    BatchDef, Declaration, ExportFormatDef, LineMeasurementDef, SegmentsDef, TensionSelectorDef,
};
use ss_core::Dof;
use std::collections::HashSet;

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Duplicate ID: {id} in {context}")]
    DuplicateId { id: String, context: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported feature: {feature} - {reason}")]
    Unsupported { feature: String, reason: String },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

pub fn validate_declaration(declaration: &Declaration) -> Result<(), ValidationError> {
    if declaration.version > crate::migrate::LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: declaration.version,
        });
    }

    let analysis = &declaration.analysis;
    if !analysis.statics && !analysis.dynamics {
        return Err(ValidationError::InvalidValue {
            field: "analysis".to_string(),
            value: "statics: false, dynamics: false".to_string(),
            reason: "each case must run statics or dynamics".to_string(),
        });
    }

    let post = &declaration.post;
    let mut line_ids = HashSet::new();
    for line in &post.lines {
        if !line_ids.insert(line.id) {
            return Err(ValidationError::DuplicateId {
                id: line.id.to_string(),
                context: "post processing lines".to_string(),
            });
        }
        validate_line(line)?;
        let dynamic = line.tension.is_some() || line.motion.is_some() || line.other_results.is_some();
        if dynamic && !analysis.dynamics {
            return Err(ValidationError::InvalidValue {
                field: format!("post processing lines[{}]", line.id),
                value: "time history".to_string(),
                reason: "time histories need 'analysis: dynamics: true'".to_string(),
            });
        }
    }

    let mut vessel_ids = HashSet::new();
    for vessel in &post.vessels {
        if !vessel_ids.insert(vessel.id) {
            return Err(ValidationError::DuplicateId {
                id: vessel.id.to_string(),
                context: "post processing vessels".to_string(),
            });
        }
    }
    if !post.vessels.is_empty() && !analysis.dynamics {
        return Err(ValidationError::InvalidValue {
            field: "post processing vessels".to_string(),
            value: "position".to_string(),
            reason: "time histories need 'analysis: dynamics: true'".to_string(),
        });
    }

    let mut modal_lines = HashSet::new();
    for modal in &post.modal {
        if !modal_lines.insert(modal.line) {
            return Err(ValidationError::DuplicateId {
                id: modal.line.to_string(),
                context: "post processing modal".to_string(),
            });
        }
        let [first, last] = modal.modes;
        if first == 0 || last < first {
            return Err(ValidationError::InvalidValue {
                field: format!("modal line {} modes", modal.line),
                value: format!("[{}, {}]", first, last),
                reason: "expected 1 <= first <= last".to_string(),
            });
        }
    }
    if !post.modal.is_empty() && !analysis.modal {
        return Err(ValidationError::InvalidValue {
            field: "post processing modal".to_string(),
            value: format!("{} line(s)", post.modal.len()),
            reason: "modal results need 'analysis: modal: true'".to_string(),
        });
    }

    if declaration.save.export_formats.contains(&ExportFormatDef::Excel) {
        return Err(ValidationError::Unsupported {
            feature: "export format 'excel'".to_string(),
            reason: "use csv or json".to_string(),
        });
    }

    validate_batch(&declaration.batch)
}

fn validate_line(line: &LineMeasurementDef) -> Result<(), ValidationError> {
    let field = |what: &str| format!("line {} {}", line.id, what);

    if let Some(TensionSelectorDef::Keyword(k)) = &line.tension {
        if k != "all nodes" {
            return Err(ValidationError::InvalidValue {
                field: field("tension"),
                value: k.clone(),
                reason: "expected \"all nodes\" or a point selection".to_string(),
            });
        }
    }
    if let Some(TensionSelectorDef::Points(points)) = &line.tension {
        for end in points.fairleads.iter().flatten() {
            validate_end(end, &field("tension fairleads"))?;
        }
        if let Some(segments) = &points.end_segments {
            validate_segments(segments, &field("tension end segments"))?;
        }
    }

    for (what, selector) in [("motion", &line.motion), ("other results", &line.other_results)] {
        let Some(selector) = selector else { continue };
        for end in selector.fairleads.iter().flat_map(|f| f.keys()) {
            validate_end(end, &field(what))?;
        }
        if let Some(segments) = &selector.end_segments {
            validate_segments(&segments.ids, &field(what))?;
        }
    }

    Ok(())
}

fn validate_end(end: &str, field: &str) -> Result<(), ValidationError> {
    if end == "A" || end == "B" {
        Ok(())
    } else {
        Err(ValidationError::InvalidValue {
            field: field.to_string(),
            value: end.to_string(),
            reason: "line ends are 'A' or 'B'".to_string(),
        })
    }
}

fn validate_segments(segments: &SegmentsDef, field: &str) -> Result<(), ValidationError> {
    match segments {
        SegmentsDef::Keyword(k) if k == "all" => Ok(()),
        SegmentsDef::Keyword(k) => Err(ValidationError::InvalidValue {
            field: field.to_string(),
            value: k.clone(),
            reason: "expected \"all\" or [first, last]".to_string(),
        }),
        SegmentsDef::Range([first, last]) if last < first => Err(ValidationError::InvalidValue {
            field: field.to_string(),
            value: format!("[{}, {}]", first, last),
            reason: "last must not precede first".to_string(),
        }),
        SegmentsDef::Range(_) => Ok(()),
    }
}

fn validate_batch(batch: &BatchDef) -> Result<(), ValidationError> {
    match batch {
        BatchDef::ThrustCurve(thrust) => {
            let mut seen = HashSet::new();
            for curve in &thrust.curves {
                if !seen.insert(curve.to_ascii_lowercase()) {
                    return Err(ValidationError::DuplicateId {
                        id: curve.clone(),
                        context: "thrust curve curves".to_string(),
                    });
                }
            }
            if thrust.curves.is_empty() && thrust.monitors.is_empty() {
                return Err(ValidationError::InvalidValue {
                    field: "thrust curve curves".to_string(),
                    value: "[]".to_string(),
                    reason: "at least one curve or monitor is required".to_string(),
                });
            }
        }
        BatchDef::VesselHarmonicMotion(harmonic) => {
            if harmonic.motion.is_empty() {
                return Err(ValidationError::InvalidValue {
                    field: "vessel harmonic motion motion".to_string(),
                    value: "{}".to_string(),
                    reason: "at least one DOF is required".to_string(),
                });
            }
            for name in harmonic.motion.keys() {
                name.parse::<Dof>().map_err(|_| ValidationError::InvalidValue {
                    field: "vessel harmonic motion motion".to_string(),
                    value: name.clone(),
                    reason: "expected surge, sway, heave, roll, pitch or yaw".to_string(),
                })?;
            }
        }
        BatchDef::WaveSeed(seed) => {
            if seed.cases == 0 {
                return Err(ValidationError::InvalidValue {
                    field: "wave seed cases".to_string(),
                    value: "0".to_string(),
                    reason: "must be positive".to_string(),
                });
            }
        }
    }
    Ok(())
}
