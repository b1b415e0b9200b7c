//! Column-against-literal comparison expression

use crate::common::constants::{COLUMN_COST, COMPARISON_COST, CONSTANT_COST};
use crate::common::error::{SieveError, SieveResult};
use crate::expression::constant::ConstantExpression;
use crate::expression::expression::{BoxedExpression, Expression};
use crate::expression::visitor::ExpressionVisitor;
use crate::planner::{IndexCondition, PlanContext, TableFilter};
use crate::types::{Row, TruthValue, Value};
use crate::{bind_err, internal_err};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use tracing::debug;

/// Comparison operator enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComparisonOp {
    Equal,
    NotEqual,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
    IsNull,
    IsNotNull,
}

impl ComparisonOp {
    /// Whether an ordering between column and literal satisfies this operator
    fn matches(self, ordering: Ordering) -> bool {
        match self {
            ComparisonOp::Equal => ordering == Ordering::Equal,
            ComparisonOp::NotEqual => ordering != Ordering::Equal,
            ComparisonOp::LessThan => ordering == Ordering::Less,
            ComparisonOp::LessThanOrEqual => ordering != Ordering::Greater,
            ComparisonOp::GreaterThan => ordering == Ordering::Greater,
            ComparisonOp::GreaterThanOrEqual => ordering != Ordering::Less,
            // null tests are answered before any ordering is computed
            ComparisonOp::IsNull | ComparisonOp::IsNotNull => false,
        }
    }

    /// The operator with its meaning inverted, used to push NOT inward
    pub fn negated(self) -> ComparisonOp {
        match self {
            ComparisonOp::Equal => ComparisonOp::NotEqual,
            ComparisonOp::NotEqual => ComparisonOp::Equal,
            ComparisonOp::LessThan => ComparisonOp::GreaterThanOrEqual,
            ComparisonOp::LessThanOrEqual => ComparisonOp::GreaterThan,
            ComparisonOp::GreaterThan => ComparisonOp::LessThanOrEqual,
            ComparisonOp::GreaterThanOrEqual => ComparisonOp::LessThan,
            ComparisonOp::IsNull => ComparisonOp::IsNotNull,
            ComparisonOp::IsNotNull => ComparisonOp::IsNull,
        }
    }

    /// Whether this operator can bound an index scan
    pub fn supports_index_lookup(self) -> bool {
        matches!(
            self,
            ComparisonOp::Equal
                | ComparisonOp::LessThan
                | ComparisonOp::LessThanOrEqual
                | ComparisonOp::GreaterThan
                | ComparisonOp::GreaterThanOrEqual
        )
    }
}

impl fmt::Display for ComparisonOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComparisonOp::Equal => write!(f, "="),
            ComparisonOp::NotEqual => write!(f, "<>"),
            ComparisonOp::LessThan => write!(f, "<"),
            ComparisonOp::LessThanOrEqual => write!(f, "<="),
            ComparisonOp::GreaterThan => write!(f, ">"),
            ComparisonOp::GreaterThanOrEqual => write!(f, ">="),
            ComparisonOp::IsNull => write!(f, "IS NULL"),
            ComparisonOp::IsNotNull => write!(f, "IS NOT NULL"),
        }
    }
}

/// Comparison of a named column against a literal value
///
/// Binding state starts empty; `map_columns` fills it in once a filter
/// resolves the column. Columns default to evaluatable so a bare tree can
/// be evaluated without going through a planner.
#[derive(Debug, Clone)]
pub struct ComparisonExpression {
    table: Option<String>,
    column: String,
    column_index: Option<usize>,
    bound_to: Option<String>,
    op: ComparisonOp,
    value: Value,
    evaluatable: bool,
    added_to_filter: bool,
}

impl ComparisonExpression {
    pub fn new(table: Option<&str>, column: &str, op: ComparisonOp, value: Value) -> Self {
        Self {
            table: table.map(|t| t.to_string()),
            column: column.to_string(),
            column_index: None,
            bound_to: None,
            op,
            value,
            evaluatable: true,
            added_to_filter: false,
        }
    }

    /// Create an IS NULL test on a column
    pub fn is_null(table: Option<&str>, column: &str) -> Self {
        Self::new(table, column, ComparisonOp::IsNull, Value::Null)
    }

    /// Create an IS NOT NULL test on a column
    pub fn is_not_null(table: Option<&str>, column: &str) -> Self {
        Self::new(table, column, ComparisonOp::IsNotNull, Value::Null)
    }

    pub fn op(&self) -> ComparisonOp {
        self.op
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn column_index(&self) -> Option<usize> {
        self.column_index
    }

    /// The comparison with its operator inverted, binding state kept
    pub fn negated(mut self) -> Self {
        self.op = self.op.negated();
        self
    }

    /// Column name with its table qualifier, as written
    fn qualified_name(&self) -> String {
        match &self.table {
            Some(table) => format!("{}.{}", table, self.column),
            None => self.column.clone(),
        }
    }

    /// Which filter this column reads from
    ///
    /// A bound column follows its binding; an unbound one falls back to the
    /// table qualifier, or to whichever filter carries the column name.
    fn belongs_to(&self, filter: &TableFilter) -> bool {
        match self.bound_to.as_deref().or(self.table.as_deref()) {
            Some(alias) => alias == filter.alias(),
            None => filter.has_column(&self.column),
        }
    }
}

impl Expression for ComparisonExpression {
    fn evaluate(&self, row: &Row) -> SieveResult<TruthValue> {
        if !self.evaluatable {
            return Err(internal_err!(
                "Column {} is not evaluatable at this point in the plan",
                self.qualified_name()
            ));
        }
        let resolver = self.bound_to.as_deref().or(self.table.as_deref());
        let column_value = row.get(resolver, &self.column).ok_or_else(|| {
            SieveError::Execution(format!("Column {} not found in row", self.qualified_name()))
        })?;
        let truth = match self.op {
            ComparisonOp::IsNull => TruthValue::from(column_value.is_null()),
            ComparisonOp::IsNotNull => TruthValue::from(!column_value.is_null()),
            op => {
                if column_value.is_null() || self.value.is_null() {
                    TruthValue::Unknown
                } else {
                    TruthValue::from(op.matches(column_value.compare(&self.value)?))
                }
            }
        };
        Ok(truth)
    }

    fn optimize(self: Box<Self>, ctx: &PlanContext) -> SieveResult<BoxedExpression> {
        match self.op {
            ComparisonOp::IsNull | ComparisonOp::IsNotNull => Ok(self),
            _ if ctx.settings().fold_constants && self.value.is_null() => {
                // comparing against a NULL literal can never hold
                debug!(column = %self.qualified_name(), "folding comparison with NULL literal");
                Ok(Box::new(ConstantExpression::new(TruthValue::Unknown)))
            }
            _ => Ok(self),
        }
    }

    fn cost(&self) -> u32 {
        COLUMN_COST + CONSTANT_COST + COMPARISON_COST
    }

    fn to_sql(&self) -> String {
        match self.op {
            ComparisonOp::IsNull | ComparisonOp::IsNotNull => {
                format!("({} {})", self.qualified_name(), self.op)
            }
            _ => format!(
                "({} {} {})",
                self.qualified_name(),
                self.op,
                self.value.to_sql_literal()
            ),
        }
    }

    fn map_columns(&mut self, filter: &TableFilter) -> SieveResult<()> {
        if self.bound_to.is_some() {
            return Ok(());
        }
        match &self.table {
            Some(table) => {
                if table != filter.alias() {
                    return Ok(());
                }
                match filter.column_index(&self.column) {
                    Some(index) => {
                        self.column_index = Some(index);
                        self.bound_to = Some(filter.alias().to_string());
                    }
                    None => {
                        return Err(bind_err!(
                            "Column {} not found in {}",
                            self.column,
                            filter.alias()
                        ))
                    }
                }
            }
            None => {
                if let Some(index) = filter.column_index(&self.column) {
                    self.column_index = Some(index);
                    self.bound_to = Some(filter.alias().to_string());
                }
            }
        }
        Ok(())
    }

    fn set_evaluatable(&mut self, filter: &TableFilter, evaluatable: bool) {
        if self.belongs_to(filter) {
            self.evaluatable = evaluatable;
        }
    }

    fn update_aggregates(&self, _row: &Row) -> SieveResult<()> {
        Ok(())
    }

    fn is_everything(&self, visitor: ExpressionVisitor) -> bool {
        match visitor {
            ExpressionVisitor::Independent => false,
            ExpressionVisitor::Deterministic => true,
            ExpressionVisitor::Evaluatable => self.evaluatable,
        }
    }

    fn create_index_conditions(
        self: Box<Self>,
        filter: &mut TableFilter,
    ) -> SieveResult<BoxedExpression> {
        if self.belongs_to(filter) && !self.value.is_null() && self.op.supports_index_lookup() {
            filter.add_index_condition(IndexCondition::new(
                &self.column,
                self.column_index,
                self.op,
                self.value.clone(),
            ));
        }
        Ok(self)
    }

    fn add_filter_conditions(&mut self, filter: &mut TableFilter, outer_join: bool) {
        if !self.added_to_filter
            && !outer_join
            && self.is_everything(ExpressionVisitor::Evaluatable)
        {
            filter.add_filter_condition(self.boxed_clone(), false);
            self.added_to_filter = true;
        }
    }

    fn boxed_clone(&self) -> BoxedExpression {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_row() -> Row {
        Row::new()
            .with_value(Some("users"), "id", Value::integer(7))
            .with_value(Some("users"), "name", Value::varchar("ada"))
            .with_value(Some("users"), "email", Value::Null)
    }

    #[test]
    fn test_comparison_evaluation() -> SieveResult<()> {
        let row = sample_row();
        let eq = ComparisonExpression::new(None, "id", ComparisonOp::Equal, Value::integer(7));
        assert_eq!(eq.evaluate(&row)?, TruthValue::True);

        let lt = ComparisonExpression::new(None, "id", ComparisonOp::LessThan, Value::integer(5));
        assert_eq!(lt.evaluate(&row)?, TruthValue::False);

        let ge =
            ComparisonExpression::new(None, "name", ComparisonOp::GreaterThanOrEqual, Value::varchar("ada"));
        assert_eq!(ge.evaluate(&row)?, TruthValue::True);
        Ok(())
    }

    #[test]
    fn test_null_column_is_unknown() -> SieveResult<()> {
        let row = sample_row();
        let eq = ComparisonExpression::new(
            None,
            "email",
            ComparisonOp::Equal,
            Value::varchar("a@b.c"),
        );
        assert_eq!(eq.evaluate(&row)?, TruthValue::Unknown);
        Ok(())
    }

    #[test]
    fn test_null_tests() -> SieveResult<()> {
        let row = sample_row();
        assert_eq!(
            ComparisonExpression::is_null(None, "email").evaluate(&row)?,
            TruthValue::True
        );
        assert_eq!(
            ComparisonExpression::is_not_null(None, "email").evaluate(&row)?,
            TruthValue::False
        );
        assert_eq!(
            ComparisonExpression::is_null(None, "id").evaluate(&row)?,
            TruthValue::False
        );
        Ok(())
    }

    #[test]
    fn test_missing_column_is_error() {
        let row = sample_row();
        let cmp = ComparisonExpression::new(None, "age", ComparisonOp::Equal, Value::integer(1));
        assert!(matches!(
            cmp.evaluate(&row),
            Err(SieveError::Execution(_))
        ));
    }

    #[test]
    fn test_null_literal_folds_to_unknown() -> SieveResult<()> {
        let ctx = PlanContext::new();
        let cmp: BoxedExpression =
            Box::new(ComparisonExpression::new(None, "id", ComparisonOp::Equal, Value::Null));
        let optimized = cmp.optimize(&ctx)?;
        assert!(optimized.is_constant());
        assert_eq!(optimized.evaluate(&Row::empty())?, TruthValue::Unknown);
        Ok(())
    }

    #[test]
    fn test_negated_operator() {
        assert_eq!(ComparisonOp::Equal.negated(), ComparisonOp::NotEqual);
        assert_eq!(ComparisonOp::LessThan.negated(), ComparisonOp::GreaterThanOrEqual);
        assert_eq!(ComparisonOp::IsNull.negated(), ComparisonOp::IsNotNull);
    }

    #[test]
    fn test_comparison_sql() {
        let cmp = ComparisonExpression::new(
            Some("users"),
            "name",
            ComparisonOp::NotEqual,
            Value::varchar("ada"),
        );
        assert_eq!(cmp.to_sql(), "(users.name <> 'ada')");
        assert_eq!(
            ComparisonExpression::is_null(None, "email").to_sql(),
            "(email IS NULL)"
        );
    }

    #[test]
    fn test_structural_queries() {
        let cmp = ComparisonExpression::new(None, "id", ComparisonOp::Equal, Value::integer(1));
        // a column reference is deterministic but never independent
        assert!(cmp.is_everything(ExpressionVisitor::Deterministic));
        assert!(!cmp.is_everything(ExpressionVisitor::Independent));
        assert!(cmp.is_everything(ExpressionVisitor::Evaluatable));
    }
}
