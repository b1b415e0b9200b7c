//! Table filters and the conditions pushed into them

use crate::expression::{BoxedExpression, ComparisonOp, ConjunctionExpression, Expression};
use crate::types::Value;
use tracing::debug;

/// A single-column condition an index scan can use as a bound
#[derive(Debug, Clone, PartialEq)]
pub struct IndexCondition {
    column: String,
    column_index: Option<usize>,
    op: ComparisonOp,
    value: Value,
}

impl IndexCondition {
    pub fn new(column: &str, column_index: Option<usize>, op: ComparisonOp, value: Value) -> Self {
        Self {
            column: column.to_string(),
            column_index,
            op,
            value,
        }
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn column_index(&self) -> Option<usize> {
        self.column_index
    }

    pub fn op(&self) -> ComparisonOp {
        self.op
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Exact-match bound for a point lookup
    pub fn is_equality(&self) -> bool {
        self.op == ComparisonOp::Equal
    }

    /// Lower bound of a range scan
    pub fn is_start(&self) -> bool {
        matches!(
            self.op,
            ComparisonOp::GreaterThan | ComparisonOp::GreaterThanOrEqual
        )
    }

    /// Upper bound of a range scan
    pub fn is_end(&self) -> bool {
        matches!(self.op, ComparisonOp::LessThan | ComparisonOp::LessThanOrEqual)
    }
}

/// One table occurrence in a query plan
///
/// Collects whatever the WHERE condition contributes for this table: index
/// conditions that bound the scan, plus filter and join conditions evaluated
/// against each fetched row.
#[derive(Debug, Clone)]
pub struct TableFilter {
    alias: String,
    columns: Vec<String>,
    index_conditions: Vec<IndexCondition>,
    filter_condition: Option<BoxedExpression>,
    join_condition: Option<BoxedExpression>,
}

impl TableFilter {
    pub fn new(alias: &str, columns: &[&str]) -> Self {
        Self {
            alias: alias.to_string(),
            columns: columns.iter().map(|c| c.to_string()).collect(),
            index_conditions: Vec::new(),
            filter_condition: None,
            join_condition: None,
        }
    }

    pub fn alias(&self) -> &str {
        &self.alias
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Record an index bound derived from the WHERE condition
    pub fn add_index_condition(&mut self, condition: IndexCondition) {
        debug!(
            filter = %self.alias,
            column = %condition.column(),
            op = %condition.op(),
            "adding index condition"
        );
        self.index_conditions.push(condition);
    }

    pub fn index_conditions(&self) -> &[IndexCondition] {
        &self.index_conditions
    }

    /// AND a condition into the scan filter, or into the join condition
    pub fn add_filter_condition(&mut self, condition: BoxedExpression, join: bool) {
        debug!(
            filter = %self.alias,
            join,
            condition = %condition.to_sql(),
            "adding filter condition"
        );
        let slot = if join {
            &mut self.join_condition
        } else {
            &mut self.filter_condition
        };
        *slot = match slot.take() {
            Some(existing) => Some(Box::new(ConjunctionExpression::and(existing, condition))),
            None => Some(condition),
        };
    }

    pub fn filter_condition(&self) -> Option<&dyn Expression> {
        self.filter_condition.as_deref()
    }

    pub fn join_condition(&self) -> Option<&dyn Expression> {
        self.join_condition.as_deref()
    }
}
