//! Manifest types written next to persisted cases.

use serde::{Deserialize, Serialize};

pub type BatchId = String;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BatchManifest {
    pub batch_id: BatchId,
    pub name: String,
    /// `thrust curve`, `vessel harmonic motion` or `wave seed`
    pub kind: String,
    pub timestamp: String,
    pub engine_version: String,
    pub case_count: usize,
    /// Case ids that reached their commit point, in execution order
    pub completed_cases: Vec<String>,
    /// Aggregate files written after the batch, relative to the batch directory
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aggregate_files: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CaseManifest {
    pub case_id: String,
    /// 0-based position in the plan
    pub index: usize,
    pub timestamp: String,
    /// Directives applied to the engine, rendered as `Object.Property = value`
    pub directives: Vec<String>,
    /// Independent value of this case in the aggregate
    pub independent_value: f64,
    /// Monitor row of this case
    #[serde(default)]
    pub row: Vec<f64>,
    /// Artifacts written for this case, relative to the case directory
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<String>,
}

impl CaseManifest {
    pub fn new(case_id: impl Into<String>, index: usize) -> Self {
        Self {
            case_id: case_id.into(),
            index,
            timestamp: chrono::Utc::now().to_rfc3339(),
            directives: Vec::new(),
            independent_value: 0.0,
            row: Vec::new(),
            files: Vec::new(),
        }
    }
}
