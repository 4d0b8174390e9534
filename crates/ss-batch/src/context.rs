//! Per-batch accumulation state.

use ss_results::{BatchAggregate, ResultStore, ResultsError, ResultsResult, finalize_batch};

use crate::case::Case;

/// State owned by one batch run and passed explicitly through the driver.
///
/// Holds the pending aggregate rows and the phase tables of the case in
/// flight. The phase tables start empty for every case so per-case column
/// names never collide with the previous case's.
#[derive(Debug, Clone)]
pub struct BatchRunContext {
    independent_name: String,
    column_names: Vec<String>,
    independent_values: Vec<f64>,
    case_ids: Vec<String>,
    rows: Vec<Vec<f64>>,
    results: ResultStore,
}

impl BatchRunContext {
    pub fn new(independent_name: impl Into<String>, column_names: Vec<String>) -> Self {
        Self {
            independent_name: independent_name.into(),
            column_names,
            independent_values: Vec::new(),
            case_ids: Vec::new(),
            rows: Vec::new(),
            results: ResultStore::new(),
        }
    }

    pub fn begin_case(&mut self) {
        self.results = ResultStore::new();
    }

    pub fn results(&self) -> &ResultStore {
        &self.results
    }

    pub fn results_mut(&mut self) -> &mut ResultStore {
        &mut self.results
    }

    /// A row must carry exactly one value per monitor column.
    pub fn check_row(&self, case: &Case, row: &[f64]) -> ResultsResult<()> {
        if row.len() != self.column_names.len() {
            return Err(ResultsError::Shape {
                context: format!("row of case '{}'", case.id),
                expected: self.column_names.len(),
                found: row.len(),
            });
        }
        Ok(())
    }

    /// Record the finished case's row.
    pub fn push_row(&mut self, case: &Case, row: Vec<f64>) -> ResultsResult<()> {
        self.check_row(case, &row)?;
        self.independent_values.push(case.independent_value);
        self.case_ids.push(case.id.clone());
        self.rows.push(row);
        Ok(())
    }

    pub fn completed_cases(&self) -> &[String] {
        &self.case_ids
    }

    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    /// Stack the pending rows into the aggregate, in plan order.
    pub fn finalize(&self) -> ResultsResult<BatchAggregate> {
        finalize_batch(
            &self.independent_name,
            &self.independent_values,
            &self.column_names,
            &self.rows,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ss_results::{Phase, ResultsError};

    fn case(id: &str, value: f64) -> Case {
        Case {
            id: id.to_string(),
            index: 0,
            independent_value: value,
            directives: vec![],
        }
    }

    #[test]
    fn rows_keep_plan_order() {
        let mut ctx = BatchRunContext::new("Wind speed", vec!["T".to_string()]);
        ctx.push_row(&case("a", 5.0), vec![1.0]).unwrap();
        ctx.push_row(&case("b", 10.0), vec![2.0]).unwrap();
        let agg = ctx.finalize().unwrap();
        assert_eq!(agg.independent().values, vec![5.0, 10.0]);
        assert_eq!(ctx.completed_cases(), ["a", "b"]);
    }

    #[test]
    fn wide_row_is_rejected_when_pushed() {
        let mut ctx = BatchRunContext::new("Case", vec!["T".to_string()]);
        ctx.push_row(&case("a", 1.0), vec![1.0]).unwrap();
        let err = ctx.push_row(&case("b", 2.0), vec![1.0, 2.0]).unwrap_err();
        match err {
            ResultsError::Shape { context, expected, found } => {
                assert!(context.contains("'b'"));
                assert_eq!((expected, found), (1, 2));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(ctx.completed_cases(), ["a"]);
    }

    #[test]
    fn begin_case_clears_phase_tables() {
        let mut ctx = BatchRunContext::new("Case", vec![]);
        ctx.results_mut().append_column(Phase::Dynamics, "Time", vec![0.0]).unwrap();
        ctx.begin_case();
        assert!(ctx.results().is_empty());
    }
}
