//! Declaration loading, validation, and introspection.

use std::path::Path;

use ss_batch::{Batch, Case};
use ss_project::Declaration;

use crate::error::{AppError, AppResult};

/// What a declaration will do when run.
#[derive(Debug, Clone)]
pub struct DeclarationSummary {
    pub name: String,
    pub kind: String,
    pub case_count: usize,
    pub independent: String,
    /// Aggregate columns after the independent one
    pub monitors: Vec<String>,
    pub statics: bool,
    pub dynamics: bool,
    pub modal: bool,
}

/// One planned case for listing.
#[derive(Debug, Clone)]
pub struct CaseSummary {
    pub index: usize,
    pub id: String,
    pub independent_value: f64,
    pub directives: Vec<String>,
}

impl From<&Case> for CaseSummary {
    fn from(case: &Case) -> Self {
        Self {
            index: case.index,
            id: case.id.clone(),
            independent_value: case.independent_value,
            directives: case.directive_lines(),
        }
    }
}

/// Load a declaration from YAML or JSON (by extension), migrated and validated.
pub fn load_declaration(path: &Path) -> AppResult<Declaration> {
    if !path.exists() {
        return Err(AppError::DeclarationRead {
            path: path.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        });
    }
    Ok(ss_project::load(path)?)
}

pub fn save_declaration(path: &Path, declaration: &Declaration) -> AppResult<()> {
    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));
    if is_json {
        ss_project::save_json(path, declaration)?;
    } else {
        ss_project::save_yaml(path, declaration)?;
    }
    Ok(())
}

/// Structural validation plus full resolution of plan and measurements.
pub fn validate_declaration(declaration: &Declaration) -> AppResult<Batch> {
    ss_project::validate_declaration(declaration).map_err(ss_project::ProjectError::from)?;
    Ok(Batch::from_declaration(declaration)?)
}

pub fn summarize(declaration: &Declaration) -> AppResult<DeclarationSummary> {
    let batch = validate_declaration(declaration)?;
    Ok(DeclarationSummary {
        name: batch.name.clone(),
        kind: batch.plan.kind().label().to_string(),
        case_count: batch.case_count(),
        independent: batch.plan.independent_name().to_string(),
        monitors: batch.extractor.row_columns(),
        statics: batch.analysis.statics,
        dynamics: batch.analysis.dynamics,
        modal: batch.analysis.modal,
    })
}

pub fn list_planned_cases(declaration: &Declaration) -> AppResult<Vec<CaseSummary>> {
    let batch = validate_declaration(declaration)?;
    Ok(batch.plan.plan_cases().iter().map(CaseSummary::from).collect())
}
