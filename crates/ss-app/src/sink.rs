//! Disk persistence of cases and the batch aggregate.

use std::path::Path;

use ss_batch::{BatchError, BatchResult, CaseRecord, CaseSink};
use ss_engine::SimulationEngine;
use ss_project::schema::SaveDef;
use ss_results::{BatchAggregate, BatchManifest, BatchStore, CaseManifest, ExportFormat};

/// Writes each finished case under its own directory of a [`BatchStore`].
///
/// The case manifest goes last, after the engine files and tables, so a case
/// directory without one is an interrupted case.
pub struct DiskSink {
    store: BatchStore,
    save_model: bool,
    save_simulation: bool,
    export_results: bool,
    formats: Vec<ExportFormat>,
    manifest: BatchManifest,
}

impl DiskSink {
    /// Takes over the store for a fresh run, clearing any earlier run's files.
    pub fn new(store: BatchStore, save: &SaveDef, manifest: BatchManifest) -> BatchResult<Self> {
        let formats = save
            .export_formats
            .iter()
            .map(|f| ExportFormat::try_from(*f))
            .collect::<Result<Vec<_>, _>>()?;
        store.clear()?;
        tracing::debug!(batch_dir = %store.batch_dir().display(), "cleared previous run");
        Ok(Self {
            store,
            save_model: save.model,
            save_simulation: save.simulation,
            export_results: save.export_results,
            formats,
            manifest,
        })
    }

    pub fn store(&self) -> &BatchStore {
        &self.store
    }

    pub fn batch_dir(&self) -> &Path {
        self.store.batch_dir()
    }

    fn engine_file(
        case_id: &str,
        path: &Path,
        write: impl FnOnce(&Path) -> ss_engine::EngineResult<()>,
    ) -> BatchResult<String> {
        write(path).map_err(|e| BatchError::Save {
            case_id: case_id.to_string(),
            message: e.to_string(),
        })?;
        Ok(path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default())
    }
}

impl CaseSink for DiskSink {
    fn save_case(&mut self, record: &CaseRecord<'_>, engine: &dyn SimulationEngine) -> BatchResult<()> {
        let case = record.case;
        let mut files = Vec::new();

        if self.save_model {
            let path = self.store.model_path(&case.id)?;
            files.push(Self::engine_file(&case.id, &path, |p| engine.save_data(p))?);
        }
        if self.save_simulation {
            let path = self.store.simulation_path(&case.id)?;
            files.push(Self::engine_file(&case.id, &path, |p| engine.save_simulation(p))?);
        }
        if self.export_results {
            files.extend(self.store.save_tables(&case.id, record.results, &self.formats)?);
        }

        let mut manifest = CaseManifest::new(case.id.clone(), case.index);
        manifest.directives = case.directive_lines();
        manifest.independent_value = case.independent_value;
        manifest.row = record.row.to_vec();
        manifest.files = files;
        self.store.save_case_manifest(&manifest)?;

        tracing::debug!(case = %case.id, dir = %self.store.case_dir(&case.id).display(), "case saved");
        Ok(())
    }

    fn finish_batch(&mut self, aggregate: &BatchAggregate, completed_cases: &[String]) -> BatchResult<()> {
        let formats = if self.formats.is_empty() {
            vec![ExportFormat::Csv]
        } else {
            self.formats.clone()
        };
        self.manifest.aggregate_files = self.store.save_aggregate(aggregate, &formats)?;
        self.manifest.completed_cases = completed_cases.to_vec();
        self.manifest.timestamp = chrono::Utc::now().to_rfc3339();
        self.store.save_manifest(&self.manifest)?;
        Ok(())
    }
}
