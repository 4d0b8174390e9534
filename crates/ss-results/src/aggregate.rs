//! One-row-per-case batch table.

use crate::table::{Column, Table};
use crate::{ResultsError, ResultsResult};

/// Wide table built once after every case of a batch completed.
///
/// The first column is the independent variable (or case index); the rest are
/// the per-case measurements in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchAggregate {
    table: Table,
}

impl BatchAggregate {
    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn independent(&self) -> &Column {
        &self.table.columns()[0]
    }

    pub fn measurements(&self) -> &[Column] {
        &self.table.columns()[1..]
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.table.column(name)
    }

    pub fn row_count(&self) -> usize {
        self.independent().values.len()
    }

    /// Measurement row of case `i` (without the independent value).
    pub fn row(&self, i: usize) -> Vec<f64> {
        self.measurements().iter().map(|c| c.values[i]).collect()
    }
}

/// Stack per-case rows into the aggregate table and prepend the independent column.
///
/// Every row must be as wide as `column_names`, and there must be one row per
/// independent value; a mismatch means a case extracted a different width than
/// its siblings.
pub fn finalize_batch(
    independent_name: &str,
    independent_values: &[f64],
    column_names: &[String],
    rows: &[Vec<f64>],
) -> ResultsResult<BatchAggregate> {
    if rows.len() != independent_values.len() {
        return Err(ResultsError::Shape {
            context: "batch rows vs independent values".to_string(),
            expected: independent_values.len(),
            found: rows.len(),
        });
    }

    for (i, row) in rows.iter().enumerate() {
        if row.len() != column_names.len() {
            return Err(ResultsError::Shape {
                context: format!("batch row {}", i),
                expected: column_names.len(),
                found: row.len(),
            });
        }
    }

    let mut table = Table::new("batch");
    table.append_column(independent_name, independent_values.to_vec())?;
    for (j, name) in column_names.iter().enumerate() {
        table.append_column(name.clone(), rows.iter().map(|r| r[j]).collect())?;
    }

    Ok(BatchAggregate { table })
}
