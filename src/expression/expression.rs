//! Core expression contract for the predicate layer

use crate::common::error::SieveResult;
use crate::expression::visitor::ExpressionVisitor;
use crate::planner::{PlanContext, TableFilter};
use crate::types::{Row, TruthValue};

/// Owned expression tree node
pub type BoxedExpression = Box<dyn Expression>;

/// Expression trait that all predicate nodes must implement
///
/// Planning methods take `&mut self` or consume the node; evaluation methods
/// take `&self` so a prepared tree can be shared across scan threads.
pub trait Expression: std::fmt::Debug + Send + Sync {
    /// Evaluate this expression against a row
    fn evaluate(&self, row: &Row) -> SieveResult<TruthValue>;

    /// Optimize this subtree, returning the node that replaces it
    fn optimize(self: Box<Self>, ctx: &PlanContext) -> SieveResult<BoxedExpression>;

    /// Relative cost of evaluating this subtree once
    fn cost(&self) -> u32;

    /// Check if this expression always evaluates to the same value
    fn is_constant(&self) -> bool {
        false
    }

    /// Render this expression as SQL that parses back to an equivalent tree
    fn to_sql(&self) -> String;

    /// Resolve column references this filter can satisfy
    fn map_columns(&mut self, filter: &TableFilter) -> SieveResult<()>;

    /// Mark columns belonging to the given filter as available or not
    fn set_evaluatable(&mut self, filter: &TableFilter, evaluatable: bool);

    /// Push the current row into every aggregate in this subtree
    fn update_aggregates(&self, row: &Row) -> SieveResult<()>;

    /// Check if the whole subtree satisfies a structural property
    fn is_everything(&self, visitor: ExpressionVisitor) -> bool;

    /// Derive index conditions for a filter, returning the node that
    /// replaces this one in the tree
    fn create_index_conditions(
        self: Box<Self>,
        filter: &mut TableFilter,
    ) -> SieveResult<BoxedExpression>;

    /// Offer this predicate to a filter for early evaluation during scans
    fn add_filter_conditions(&mut self, filter: &mut TableFilter, outer_join: bool);

    /// Clone this node into a fresh boxed tree
    fn boxed_clone(&self) -> BoxedExpression;

    /// Downcast to Any for type checking
    fn as_any(&self) -> &dyn std::any::Any;
}

impl Clone for BoxedExpression {
    fn clone(&self) -> Self {
        self.boxed_clone()
    }
}
