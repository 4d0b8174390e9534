//! Tabular export.
//!
//! CSV files are semicolon separated with a header row. Ragged tables are
//! padded with empty cells up to the longest column.

use std::fs;
use std::path::Path;

use ss_project::schema::ExportFormatDef;

use crate::table::Table;
use crate::{ResultsError, ResultsResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

impl TryFrom<ExportFormatDef> for ExportFormat {
    type Error = ResultsError;

    fn try_from(def: ExportFormatDef) -> ResultsResult<Self> {
        match def {
            ExportFormatDef::Csv => Ok(ExportFormat::Csv),
            ExportFormatDef::Json => Ok(ExportFormat::Json),
            ExportFormatDef::Excel => Err(ResultsError::UnsupportedFormat {
                format: "excel".to_string(),
            }),
        }
    }
}

/// Write `table` to `path` in `format`. Parent directories must exist.
pub fn write_table(table: &Table, path: &Path, format: ExportFormat) -> ResultsResult<()> {
    match format {
        ExportFormat::Csv => write_csv(table, path),
        ExportFormat::Json => {
            fs::write(path, serde_json::to_string_pretty(table)?)?;
            Ok(())
        }
    }
}

fn write_csv(table: &Table, path: &Path) -> ResultsResult<()> {
    let mut writer = csv::WriterBuilder::new().delimiter(b';').from_path(path)?;
    writer.write_record(table.column_names())?;
    for i in 0..table.height() {
        let record: Vec<String> = table
            .row(i)
            .into_iter()
            .map(|v| v.map(ss_core::format_value).unwrap_or_default())
            .collect();
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn excel_is_not_exportable() {
        let err = ExportFormat::try_from(ExportFormatDef::Excel).unwrap_err();
        assert!(matches!(err, ResultsError::UnsupportedFormat { .. }));
        assert_eq!(ExportFormat::try_from(ExportFormatDef::Json).unwrap(), ExportFormat::Json);
    }

    #[test]
    fn csv_pads_ragged_columns() {
        let dir = std::env::temp_dir().join("ss_results_export_csv");
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();

        let mut table = Table::new("dynamics");
        table.append_column("Time", vec![0.0, 0.5]).unwrap();
        table.append_column("Line1_ArcLen", vec![12.5]).unwrap();

        let path = dir.join("dynamics.csv");
        write_table(&table, &path, ExportFormat::Csv).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "Time;Line1_ArcLen\n0.0;12.5\n0.5;\n");

        let _ = fs::remove_dir_all(&dir);
    }
}
