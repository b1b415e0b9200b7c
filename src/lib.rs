//! SieveDB - Boolean Predicate Engine
//!
//! SieveDB is the predicate subsystem of a relational query engine: expression
//! trees over SQL three-valued logic, with planning passes that bind columns,
//! fold constants, reorder conjuncts by cost, and push conditions down to
//! table scans.
//!
pub mod common;
pub mod expression;
pub mod parser;
pub mod planner;
pub mod types;

// Re-export common types for convenience
pub use common::{SieveError, SieveResult};

// Re-export type system for convenience
pub use types::{Row, TruthValue, Value};

// Re-export expression system for convenience
pub use expression::{
    BoxedExpression, ComparisonExpression, ComparisonOp, ConjunctionExpression, ConjunctionType,
    ConstantExpression, Expression, ExpressionVisitor, NotExpression,
};

// Re-export parser for convenience
pub use parser::{parse_condition, ConditionParser};

// Re-export planner system for convenience
pub use planner::{IndexCondition, PlanContext, PlannerSettings, TableFilter};
