//! Boolean constant expression

use crate::common::constants::CONSTANT_COST;
use crate::common::error::SieveResult;
use crate::expression::expression::{BoxedExpression, Expression};
use crate::expression::visitor::ExpressionVisitor;
use crate::planner::{PlanContext, TableFilter};
use crate::types::{Row, TruthValue};

/// A constant TRUE, FALSE, or UNKNOWN predicate
#[derive(Debug, Clone)]
pub struct ConstantExpression {
    value: TruthValue,
    added_to_filter: bool,
}

impl ConstantExpression {
    pub fn new(value: TruthValue) -> Self {
        Self {
            value,
            added_to_filter: false,
        }
    }

    pub fn value(&self) -> TruthValue {
        self.value
    }
}

impl Expression for ConstantExpression {
    fn evaluate(&self, _row: &Row) -> SieveResult<TruthValue> {
        Ok(self.value)
    }

    fn optimize(self: Box<Self>, _ctx: &PlanContext) -> SieveResult<BoxedExpression> {
        Ok(self)
    }

    fn cost(&self) -> u32 {
        CONSTANT_COST
    }

    fn is_constant(&self) -> bool {
        true
    }

    fn to_sql(&self) -> String {
        match self.value {
            TruthValue::True => "TRUE".to_string(),
            TruthValue::False => "FALSE".to_string(),
            // UNKNOWN has no literal of its own
            TruthValue::Unknown => "NULL".to_string(),
        }
    }

    fn map_columns(&mut self, _filter: &TableFilter) -> SieveResult<()> {
        Ok(())
    }

    fn set_evaluatable(&mut self, _filter: &TableFilter, _evaluatable: bool) {}

    fn update_aggregates(&self, _row: &Row) -> SieveResult<()> {
        Ok(())
    }

    fn is_everything(&self, _visitor: ExpressionVisitor) -> bool {
        true
    }

    fn create_index_conditions(
        self: Box<Self>,
        _filter: &mut TableFilter,
    ) -> SieveResult<BoxedExpression> {
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

    #[test]
    fn test_constant_evaluation() -> SieveResult<()> {
        let row = Row::empty();
        assert_eq!(
            ConstantExpression::new(TruthValue::True).evaluate(&row)?,
            TruthValue::True
        );
        assert_eq!(
            ConstantExpression::new(TruthValue::Unknown).evaluate(&row)?,
            TruthValue::Unknown
        );
        Ok(())
    }

    #[test]
    fn test_constant_properties() {
        let expr = ConstantExpression::new(TruthValue::False);
        assert!(expr.is_constant());
        assert_eq!(expr.cost(), CONSTANT_COST);
        assert!(expr.is_everything(ExpressionVisitor::Independent));
        assert!(expr.is_everything(ExpressionVisitor::Deterministic));
        assert!(expr.is_everything(ExpressionVisitor::Evaluatable));
    }

    #[test]
    fn test_constant_sql() {
        assert_eq!(ConstantExpression::new(TruthValue::True).to_sql(), "TRUE");
        assert_eq!(ConstantExpression::new(TruthValue::False).to_sql(), "FALSE");
        assert_eq!(ConstantExpression::new(TruthValue::Unknown).to_sql(), "NULL");
    }
}
