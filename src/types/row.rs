//! Row context that predicates are evaluated against

use crate::types::Value;

/// One named column slot in a row
#[derive(Debug, Clone, PartialEq)]
struct RowColumn {
    table: Option<String>,
    name: String,
    value: Value,
}

/// A single row of named values, possibly spanning several table filters
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    columns: Vec<RowColumn>,
}

impl Row {
    /// Start building a row
    pub fn new() -> Self {
        Self {
            columns: Vec::new(),
        }
    }

    /// Row with no columns, used when folding constants at plan time
    pub fn empty() -> Self {
        Self::new()
    }

    /// Add a column value, keeping insertion order for bare-name lookup
    pub fn with_value(mut self, table: Option<&str>, name: &str, value: Value) -> Self {
        self.columns.push(RowColumn {
            table: table.map(|t| t.to_string()),
            name: name.to_string(),
            value,
        });
        self
    }

    /// Look up a column value
    /// A qualified name must match the table; a bare name takes the first match
    pub fn get(&self, table: Option<&str>, name: &str) -> Option<&Value> {
        self.columns
            .iter()
            .find(|col| {
                let table_matches = match table {
                    Some(t) => col.table.as_deref() == Some(t),
                    None => true,
                };
                table_matches && col.name == name
            })
            .map(|col| &col.value)
    }

    /// Number of columns in this row
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Check if this row has no columns
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
