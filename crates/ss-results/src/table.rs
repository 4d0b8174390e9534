//! Column-oriented result tables.
//!
//! Columns are appended one at a time and keep their own length: a table never
//! realigns or pads values, padding happens only when rows are exported.

use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

use crate::{ResultsError, ResultsResult};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    pub name: String,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Table {
    name: String,
    columns: Vec<Column>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl Table {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Append a column. An existing name is an error and leaves the table untouched.
    pub fn append_column(&mut self, name: impl Into<String>, values: Vec<f64>) -> ResultsResult<()> {
        let name = name.into();
        if self.index.contains_key(&name) {
            return Err(ResultsError::DuplicateColumn {
                table: self.name.clone(),
                name,
            });
        }
        self.index.insert(name.clone(), self.columns.len());
        self.columns.push(Column { name, values });
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.index.get(name).map(|&i| &self.columns[i])
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Length of the longest column.
    pub fn height(&self) -> usize {
        self.columns.iter().map(|c| c.values.len()).max().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Row `i` across all columns; `None` where a column is shorter.
    pub fn row(&self, i: usize) -> Vec<Option<f64>> {
        self.columns.iter().map(|c| c.values.get(i).copied()).collect()
    }
}

impl PartialEq for Table {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.columns == other.columns
    }
}

/// Analysis phase a table collects results for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Statics,
    Dynamics,
    Modal,
}

impl Phase {
    pub const ALL: [Phase; 3] = [Phase::Statics, Phase::Dynamics, Phase::Modal];

    pub fn name(self) -> &'static str {
        match self {
            Phase::Statics => "statics",
            Phase::Dynamics => "dynamics",
            Phase::Modal => "modal",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One independent table per analysis phase.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultStore {
    statics: Table,
    dynamics: Table,
    modal: Table,
}

impl Default for ResultStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultStore {
    pub fn new() -> Self {
        Self {
            statics: Table::new(Phase::Statics.name()),
            dynamics: Table::new(Phase::Dynamics.name()),
            modal: Table::new(Phase::Modal.name()),
        }
    }

    pub fn append_column(&mut self, phase: Phase, name: impl Into<String>, values: Vec<f64>) -> ResultsResult<()> {
        self.table_mut(phase).append_column(name, values)
    }

    pub fn table(&self, phase: Phase) -> &Table {
        match phase {
            Phase::Statics => &self.statics,
            Phase::Dynamics => &self.dynamics,
            Phase::Modal => &self.modal,
        }
    }

    fn table_mut(&mut self, phase: Phase) -> &mut Table {
        match phase {
            Phase::Statics => &mut self.statics,
            Phase::Dynamics => &mut self.dynamics,
            Phase::Modal => &mut self.modal,
        }
    }

    /// Non-empty tables, in phase order.
    pub fn populated(&self) -> impl Iterator<Item = (Phase, &Table)> {
        Phase::ALL
            .into_iter()
            .map(|p| (p, self.table(p)))
            .filter(|(_, t)| !t.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.populated().next().is_none()
    }
}
