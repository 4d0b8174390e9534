//! Batch storage API.
//!
//! Layout under the output root:
//!
//! ```text
//! batches/<batch id>/manifest.json
//! batches/<batch id>/aggregate.{csv,json}
//! batches/<batch id>/cases/<case id>/manifest.json
//! batches/<batch id>/cases/<case id>/{model.dat,simulation.sim,<phase>.{csv,json}}
//! ```
//!
//! A case manifest is written last, so its presence marks the case complete.

use crate::aggregate::BatchAggregate;
use crate::export::{ExportFormat, write_table};
use crate::table::ResultStore;
use crate::types::{BatchManifest, CaseManifest};
use crate::{ResultsError, ResultsResult};
use std::fs;
use std::path::{Path, PathBuf};

const MANIFEST: &str = "manifest.json";

#[derive(Debug, Clone)]
pub struct BatchStore {
    batch_dir: PathBuf,
}

impl BatchStore {
    pub fn new(root_dir: &Path, batch_id: &str) -> ResultsResult<Self> {
        let batch_dir = root_dir.join("batches").join(batch_id);
        if !batch_dir.exists() {
            fs::create_dir_all(&batch_dir)?;
        }
        Ok(Self { batch_dir })
    }

    /// Store rooted at `directory` or, when absent, at `.seasweep` next to the declaration.
    pub fn for_declaration(
        declaration_path: &Path,
        directory: Option<&Path>,
        batch_id: &str,
    ) -> ResultsResult<Self> {
        let root = match directory {
            Some(dir) => dir.to_path_buf(),
            None => declaration_path
                .parent()
                .ok_or_else(|| ResultsError::InvalidPath {
                    message: "declaration path has no parent directory".to_string(),
                })?
                .join(".seasweep"),
        };
        Self::new(&root, batch_id)
    }

    /// Remove what an earlier run under the same id left behind: case
    /// directories, aggregate exports and the batch manifest.
    pub fn clear(&self) -> ResultsResult<()> {
        let cases = self.batch_dir.join("cases");
        if cases.exists() {
            fs::remove_dir_all(&cases)?;
        }
        for entry in fs::read_dir(&self.batch_dir)? {
            let path = entry?.path();
            let stale = match path.file_name().and_then(|n| n.to_str()) {
                Some(MANIFEST) => true,
                Some(name) => name.starts_with("aggregate."),
                None => false,
            };
            if stale && path.is_file() {
                fs::remove_file(&path)?;
            }
        }
        Ok(())
    }

    pub fn batch_dir(&self) -> &Path {
        &self.batch_dir
    }

    pub fn case_dir(&self, case_id: &str) -> PathBuf {
        self.batch_dir.join("cases").join(case_id)
    }

    pub fn has_case(&self, case_id: &str) -> bool {
        self.case_dir(case_id).join(MANIFEST).exists()
    }

    /// Path of the engine data file for a case, creating the case directory.
    pub fn model_path(&self, case_id: &str) -> ResultsResult<PathBuf> {
        Ok(self.ensure_case_dir(case_id)?.join("model.dat"))
    }

    /// Path of the engine simulation file for a case, creating the case directory.
    pub fn simulation_path(&self, case_id: &str) -> ResultsResult<PathBuf> {
        Ok(self.ensure_case_dir(case_id)?.join("simulation.sim"))
    }

    fn ensure_case_dir(&self, case_id: &str) -> ResultsResult<PathBuf> {
        let dir = self.case_dir(case_id);
        fs::create_dir_all(&dir)?;
        Ok(dir)
    }

    /// Export every populated phase table of a case. Returns the written file names.
    pub fn save_tables(
        &self,
        case_id: &str,
        results: &ResultStore,
        formats: &[ExportFormat],
    ) -> ResultsResult<Vec<String>> {
        let dir = self.ensure_case_dir(case_id)?;
        let mut written = Vec::new();
        for (phase, table) in results.populated() {
            for format in formats {
                let file_name = format!("{}.{}", phase, format.extension());
                write_table(table, &dir.join(&file_name), *format)?;
                written.push(file_name);
            }
        }
        Ok(written)
    }

    pub fn save_case_manifest(&self, manifest: &CaseManifest) -> ResultsResult<()> {
        let dir = self.ensure_case_dir(&manifest.case_id)?;
        let manifest_json = serde_json::to_string_pretty(manifest)?;
        fs::write(dir.join(MANIFEST), manifest_json)?;
        Ok(())
    }

    pub fn load_case_manifest(&self, case_id: &str) -> ResultsResult<CaseManifest> {
        let manifest_path = self.case_dir(case_id).join(MANIFEST);

        if !manifest_path.exists() {
            return Err(ResultsError::CaseNotFound {
                case_id: case_id.to_string(),
            });
        }

        let content = fs::read_to_string(manifest_path)?;
        let manifest = serde_json::from_str(&content)?;
        Ok(manifest)
    }

    /// Completed cases, in plan order.
    pub fn list_cases(&self) -> ResultsResult<Vec<CaseManifest>> {
        let mut cases = Vec::new();
        let cases_dir = self.batch_dir.join("cases");

        if !cases_dir.exists() {
            return Ok(cases);
        }

        for entry in fs::read_dir(&cases_dir)? {
            let entry = entry?;
            if entry.path().is_dir() {
                let case_id = entry.file_name().to_string_lossy().to_string();
                if let Ok(manifest) = self.load_case_manifest(&case_id) {
                    cases.push(manifest);
                }
            }
        }

        cases.sort_by_key(|c| c.index);
        Ok(cases)
    }

    /// Export the aggregate as `aggregate.<ext>`. Returns the written file names.
    pub fn save_aggregate(
        &self,
        aggregate: &BatchAggregate,
        formats: &[ExportFormat],
    ) -> ResultsResult<Vec<String>> {
        let mut written = Vec::new();
        for format in formats {
            let file_name = format!("aggregate.{}", format.extension());
            write_table(aggregate.table(), &self.batch_dir.join(&file_name), *format)?;
            written.push(file_name);
        }
        Ok(written)
    }

    pub fn save_manifest(&self, manifest: &BatchManifest) -> ResultsResult<()> {
        let manifest_json = serde_json::to_string_pretty(manifest)?;
        fs::write(self.batch_dir.join(MANIFEST), manifest_json)?;
        Ok(())
    }

    pub fn load_manifest(&self) -> ResultsResult<BatchManifest> {
        let manifest_path = self.batch_dir.join(MANIFEST);

        if !manifest_path.exists() {
            return Err(ResultsError::BatchNotFound {
                batch_id: self
                    .batch_dir
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_default(),
            });
        }

        let content = fs::read_to_string(manifest_path)?;
        let manifest = serde_json::from_str(&content)?;
        Ok(manifest)
    }
}
