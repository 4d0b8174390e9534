//! Batch execution and stored-batch lookup.

use std::path::{Path, PathBuf};
use std::time::Instant;

use ss_batch::{BatchProgressEvent, CaseSink, NoSave};
use ss_engine::SimulationEngine;
use ss_results::{BatchAggregate, BatchManifest, BatchStore, CaseManifest, compute_batch_id};

use crate::error::{AppError, AppResult};
use crate::project_service;
use crate::sink::DiskSink;

/// Options for running a batch.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Persist cases and the aggregate according to the declaration's `save` section
    pub save: bool,
    /// Overrides the declaration's output directory
    pub output_dir: Option<PathBuf>,
    /// Identifies the engine build in the batch id
    pub engine_version: String,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            save: true,
            output_dir: None,
            engine_version: "0.1.0".to_string(),
        }
    }
}

/// Request to execute a batch.
pub struct BatchRequest<'a> {
    pub declaration_path: &'a Path,
    pub options: RunOptions,
}

#[derive(Debug, Clone)]
pub struct BatchResponse {
    pub batch_id: String,
    pub aggregate: BatchAggregate,
    /// Batch directory when results were saved
    pub batch_dir: Option<PathBuf>,
    pub case_count: usize,
    pub total_time_s: f64,
}

pub fn run_batch<E: SimulationEngine>(request: &BatchRequest<'_>, engine: &mut E) -> AppResult<BatchResponse> {
    run_batch_with_progress(request, engine, None)
}

/// Load, resolve and run the declared batch against `engine`, streaming progress events.
pub fn run_batch_with_progress<E: SimulationEngine>(
    request: &BatchRequest<'_>,
    engine: &mut E,
    progress_cb: Option<&mut dyn FnMut(BatchProgressEvent)>,
) -> AppResult<BatchResponse> {
    let started = Instant::now();
    let declaration = project_service::load_declaration(request.declaration_path)?;
    let batch = project_service::validate_declaration(&declaration)?;
    let batch_id = compute_batch_id(&declaration, &request.options.engine_version);

    tracing::info!(
        name = %batch.name,
        kind = %batch.plan.kind(),
        cases = batch.case_count(),
        batch_id = %batch_id,
        "running batch"
    );

    let mut disk_sink = if request.options.save {
        let directory = match &request.options.output_dir {
            Some(dir) => Some(dir.clone()),
            None => declaration
                .save
                .directory
                .as_deref()
                .map(|dir| relative_to_declaration(request.declaration_path, dir)),
        };
        let store = BatchStore::for_declaration(request.declaration_path, directory.as_deref(), &batch_id)?;
        let manifest = BatchManifest {
            batch_id: batch_id.clone(),
            name: batch.name.clone(),
            kind: batch.plan.kind().label().to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            engine_version: request.options.engine_version.clone(),
            case_count: batch.case_count(),
            completed_cases: Vec::new(),
            aggregate_files: Vec::new(),
        };
        Some(DiskSink::new(store, &declaration.save, manifest)?)
    } else {
        None
    };

    let mut no_save = NoSave;
    let sink: &mut dyn CaseSink = match disk_sink.as_mut() {
        Some(s) => s,
        None => &mut no_save,
    };

    let aggregate = batch.driver().run_with_progress(engine, sink, progress_cb)?;

    let total_time_s = started.elapsed().as_secs_f64();
    tracing::info!(batch_id = %batch_id, rows = aggregate.row_count(), total_time_s, "batch finished");

    Ok(BatchResponse {
        batch_id,
        case_count: aggregate.row_count(),
        aggregate,
        batch_dir: disk_sink.map(|s| s.batch_dir().to_path_buf()),
        total_time_s,
    })
}

/// Ids of the batches stored under `output_dir`, or next to the declaration.
pub fn list_batches(declaration_path: &Path, output_dir: Option<&Path>) -> AppResult<Vec<String>> {
    let root = output_root(declaration_path, output_dir)?;
    let batches_dir = root.join("batches");
    let mut ids = Vec::new();
    if !batches_dir.exists() {
        return Ok(ids);
    }
    for entry in std::fs::read_dir(&batches_dir)? {
        let entry = entry?;
        if entry.path().join("manifest.json").exists() {
            ids.push(entry.file_name().to_string_lossy().to_string());
        }
    }
    ids.sort();
    Ok(ids)
}

/// Manifest and completed cases of a stored batch.
pub fn load_batch(
    declaration_path: &Path,
    output_dir: Option<&Path>,
    batch_id: &str,
) -> AppResult<(BatchManifest, Vec<CaseManifest>)> {
    let root = output_root(declaration_path, output_dir)?;
    if !root.join("batches").join(batch_id).exists() {
        return Err(AppError::BatchNotFound(batch_id.to_string()));
    }
    let store = BatchStore::new(&root, batch_id)?;
    let manifest = store.load_manifest()?;
    let cases = store.list_cases()?;
    Ok((manifest, cases))
}

/// Relative output directories are taken from the declaration's directory.
fn relative_to_declaration(declaration_path: &Path, dir: &Path) -> PathBuf {
    match declaration_path.parent() {
        Some(parent) if dir.is_relative() => parent.join(dir),
        _ => dir.to_path_buf(),
    }
}

fn output_root(declaration_path: &Path, output_dir: Option<&Path>) -> AppResult<PathBuf> {
    match output_dir {
        Some(dir) => Ok(dir.to_path_buf()),
        None => declaration_path
            .parent()
            .map(|p| p.join(".seasweep"))
            .ok_or_else(|| AppError::InvalidInput("declaration path has no parent directory".to_string())),
    }
}
