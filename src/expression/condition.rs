//! AND/OR conjunction over boolean operands

use crate::common::error::SieveResult;
use crate::expression::constant::ConstantExpression;
use crate::expression::expression::{BoxedExpression, Expression};
use crate::expression::visitor::ExpressionVisitor;
use crate::planner::{PlanContext, TableFilter};
use crate::types::{Row, TruthValue};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Which conjunction a node performs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConjunctionType {
    And,
    Or,
}

impl fmt::Display for ConjunctionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConjunctionType::And => write!(f, "AND"),
            ConjunctionType::Or => write!(f, "OR"),
        }
    }
}

/// What a single constant operand does to the whole conjunction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Simplification {
    /// The constant decides the result by itself
    Absorb,
    /// The constant drops out and the other operand decides
    Identity,
}

/// Binary AND/OR node of a predicate tree
///
/// Owns its operands. Evaluation short-circuits, optimization may reorder
/// the operands by cost and fold constants away.
#[derive(Debug, Clone)]
pub struct ConjunctionExpression {
    conjunction_type: ConjunctionType,
    left: BoxedExpression,
    right: BoxedExpression,
    added_to_filter: bool,
}

impl ConjunctionExpression {
    pub fn new(
        conjunction_type: ConjunctionType,
        left: BoxedExpression,
        right: BoxedExpression,
    ) -> Self {
        Self {
            conjunction_type,
            left,
            right,
            added_to_filter: false,
        }
    }

    /// Conjunction of two predicates
    pub fn and(left: BoxedExpression, right: BoxedExpression) -> Self {
        Self::new(ConjunctionType::And, left, right)
    }

    /// Disjunction of two predicates
    pub fn or(left: BoxedExpression, right: BoxedExpression) -> Self {
        Self::new(ConjunctionType::Or, left, right)
    }

    pub fn conjunction_type(&self) -> ConjunctionType {
        self.conjunction_type
    }

    pub fn left(&self) -> &dyn Expression {
        self.left.as_ref()
    }

    pub fn right(&self) -> &dyn Expression {
        self.right.as_ref()
    }

    /// Absorbing and identity rules for one constant operand, applicable to
    /// either side
    ///
    /// UNKNOWN never simplifies: it still interacts with FALSE under AND and
    /// with TRUE under OR.
    fn simplification(
        conjunction_type: ConjunctionType,
        constant: TruthValue,
    ) -> Option<Simplification> {
        match (conjunction_type, constant) {
            (ConjunctionType::And, TruthValue::False) => Some(Simplification::Absorb),
            (ConjunctionType::And, TruthValue::True) => Some(Simplification::Identity),
            (ConjunctionType::Or, TruthValue::True) => Some(Simplification::Absorb),
            (ConjunctionType::Or, TruthValue::False) => Some(Simplification::Identity),
            (_, TruthValue::Unknown) => None,
        }
    }
}

impl Expression for ConjunctionExpression {
    fn evaluate(&self, row: &Row) -> SieveResult<TruthValue> {
        let l = self.left.evaluate(row)?;
        match self.conjunction_type {
            ConjunctionType::And => {
                if l.is_false() {
                    return Ok(l);
                }
                // FALSE beats UNKNOWN, so the right side is consulted before
                // either UNKNOWN is reported
                let r = self.right.evaluate(row)?;
                if r.is_false() {
                    return Ok(r);
                }
                if l.is_unknown() {
                    return Ok(l);
                }
                if r.is_unknown() {
                    return Ok(r);
                }
                Ok(TruthValue::True)
            }
            ConjunctionType::Or => {
                if l.is_true() {
                    return Ok(l);
                }
                let r = self.right.evaluate(row)?;
                if r.is_true() {
                    return Ok(r);
                }
                if l.is_unknown() {
                    return Ok(l);
                }
                if r.is_unknown() {
                    return Ok(r);
                }
                Ok(TruthValue::False)
            }
        }
    }

    fn optimize(self: Box<Self>, ctx: &PlanContext) -> SieveResult<BoxedExpression> {
        let Self {
            conjunction_type,
            left,
            right,
            added_to_filter,
        } = *self;
        let mut left = left.optimize(ctx)?;
        let mut right = right.optimize(ctx)?;
        let settings = ctx.settings();

        let left_cost = left.cost();
        let right_cost = right.cost();
        if settings.reorder_conjuncts && right_cost < left_cost {
            debug!(left_cost, right_cost, "swapping operands, right side is cheaper");
            std::mem::swap(&mut left, &mut right);
        }

        if settings.fold_constants {
            match (left.is_constant(), right.is_constant()) {
                (true, true) => {
                    let l = left.evaluate(&Row::empty())?;
                    let r = right.evaluate(&Row::empty())?;
                    let value = match conjunction_type {
                        ConjunctionType::And => l.and(r),
                        ConjunctionType::Or => l.or(r),
                    };
                    debug!(%value, "folding fully constant conjunction");
                    return Ok(Box::new(ConstantExpression::new(value)));
                }
                (true, false) => {
                    let constant = left.evaluate(&Row::empty())?;
                    if let Some(rule) = Self::simplification(conjunction_type, constant) {
                        debug!(%constant, ?rule, "simplifying conjunction with constant operand");
                        return Ok(match rule {
                            Simplification::Absorb => left,
                            Simplification::Identity => right,
                        });
                    }
                }
                (false, true) => {
                    let constant = right.evaluate(&Row::empty())?;
                    if let Some(rule) = Self::simplification(conjunction_type, constant) {
                        debug!(%constant, ?rule, "simplifying conjunction with constant operand");
                        return Ok(match rule {
                            Simplification::Absorb => right,
                            Simplification::Identity => left,
                        });
                    }
                }
                (false, false) => {}
            }
        }

        Ok(Box::new(Self {
            conjunction_type,
            left,
            right,
            added_to_filter,
        }))
    }

    fn cost(&self) -> u32 {
        self.left.cost() + self.right.cost()
    }

    fn to_sql(&self) -> String {
        format!(
            "({} {} {})",
            self.left.to_sql(),
            self.conjunction_type,
            self.right.to_sql()
        )
    }

    fn map_columns(&mut self, filter: &TableFilter) -> SieveResult<()> {
        self.left.map_columns(filter)?;
        self.right.map_columns(filter)
    }

    fn set_evaluatable(&mut self, filter: &TableFilter, evaluatable: bool) {
        self.left.set_evaluatable(filter, evaluatable);
        self.right.set_evaluatable(filter, evaluatable);
    }

    fn update_aggregates(&self, row: &Row) -> SieveResult<()> {
        // both sides, always: aggregates must see every row even where
        // evaluation would short-circuit
        self.left.update_aggregates(row)?;
        self.right.update_aggregates(row)
    }

    fn is_everything(&self, visitor: ExpressionVisitor) -> bool {
        self.left.is_everything(visitor) && self.right.is_everything(visitor)
    }

    fn create_index_conditions(
        self: Box<Self>,
        filter: &mut TableFilter,
    ) -> SieveResult<BoxedExpression> {
        if self.conjunction_type == ConjunctionType::Or {
            // an OR branch alone does not imply the whole condition
            return Ok(self);
        }
        let Self {
            conjunction_type,
            left,
            right,
            added_to_filter,
        } = *self;
        let left = left.create_index_conditions(filter)?;
        let right = right.create_index_conditions(filter)?;
        Ok(Box::new(Self {
            conjunction_type,
            left,
            right,
            added_to_filter,
        }))
    }

    fn add_filter_conditions(&mut self, filter: &mut TableFilter, outer_join: bool) {
        match self.conjunction_type {
            ConjunctionType::And => {
                self.left.add_filter_conditions(filter, outer_join);
                self.right.add_filter_conditions(filter, outer_join);
            }
            ConjunctionType::Or => {
                if !self.added_to_filter
                    && !outer_join
                    && self.is_everything(ExpressionVisitor::Evaluatable)
                {
                    filter.add_filter_condition(self.boxed_clone(), false);
                    self.added_to_filter = true;
                }
            }
        }
    }

    fn boxed_clone(&self) -> BoxedExpression {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}
