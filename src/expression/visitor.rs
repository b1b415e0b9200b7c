//! Structural queries over expression trees

use std::fmt;

/// A structural property checked across an entire expression tree
///
/// Composite nodes answer with the conjunction of their children's answers,
/// so a tree satisfies a property only if every node does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExpressionVisitor {
    /// The expression does not depend on any column
    Independent,
    /// The expression yields the same result for the same inputs
    Deterministic,
    /// Every column the expression reads is currently available
    Evaluatable,
}

impl fmt::Display for ExpressionVisitor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpressionVisitor::Independent => write!(f, "INDEPENDENT"),
            ExpressionVisitor::Deterministic => write!(f, "DETERMINISTIC"),
            ExpressionVisitor::Evaluatable => write!(f, "EVALUATABLE"),
        }
    }
}
