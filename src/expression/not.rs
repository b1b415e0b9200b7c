//! Logical negation expression

use crate::common::constants::NOT_COST;
use crate::common::error::SieveResult;
use crate::expression::comparison::ComparisonExpression;
use crate::expression::constant::ConstantExpression;
use crate::expression::expression::{BoxedExpression, Expression};
use crate::expression::visitor::ExpressionVisitor;
use crate::planner::{PlanContext, TableFilter};
use crate::types::{Row, TruthValue};

/// NOT over a boolean child; UNKNOWN stays UNKNOWN
#[derive(Debug, Clone)]
pub struct NotExpression {
    child: BoxedExpression,
    added_to_filter: bool,
}

impl NotExpression {
    pub fn new(child: BoxedExpression) -> Self {
        Self {
            child,
            added_to_filter: false,
        }
    }

    pub fn child(&self) -> &dyn Expression {
        self.child.as_ref()
    }
}

impl Expression for NotExpression {
    fn evaluate(&self, row: &Row) -> SieveResult<TruthValue> {
        Ok(self.child.evaluate(row)?.not())
    }

    fn optimize(self: Box<Self>, ctx: &PlanContext) -> SieveResult<BoxedExpression> {
        let Self {
            child,
            added_to_filter,
        } = *self;
        // NOT over a comparison is better expressed as the inverse comparison
        if let Some(comparison) = child.as_any().downcast_ref::<ComparisonExpression>() {
            let negated: BoxedExpression = Box::new(comparison.clone().negated());
            return negated.optimize(ctx);
        }
        let child = child.optimize(ctx)?;
        if ctx.settings().fold_constants && child.is_constant() {
            let value = child.evaluate(&Row::empty())?;
            return Ok(Box::new(ConstantExpression::new(value.not())));
        }
        Ok(Box::new(Self {
            child,
            added_to_filter,
        }))
    }

    fn cost(&self) -> u32 {
        self.child.cost() + NOT_COST
    }

    fn to_sql(&self) -> String {
        format!("(NOT {})", self.child.to_sql())
    }

    fn map_columns(&mut self, filter: &TableFilter) -> SieveResult<()> {
        self.child.map_columns(filter)
    }

    fn set_evaluatable(&mut self, filter: &TableFilter, evaluatable: bool) {
        self.child.set_evaluatable(filter, evaluatable);
    }

    fn update_aggregates(&self, row: &Row) -> SieveResult<()> {
        self.child.update_aggregates(row)
    }

    fn is_everything(&self, visitor: ExpressionVisitor) -> bool {
        self.child.is_everything(visitor)
    }

    fn create_index_conditions(
        self: Box<Self>,
        _filter: &mut TableFilter,
    ) -> SieveResult<BoxedExpression> {
        // a negation never bounds an index scan
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
