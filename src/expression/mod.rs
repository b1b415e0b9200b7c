//! Expression system for SieveDB
//!
//! This module provides the predicate expression framework: the `Expression`
//! contract every node implements, the AND/OR conjunction node, and the leaf
//! nodes it composes (comparisons, constants, negation).

pub mod comparison;
pub mod condition;
pub mod constant;
pub mod expression;
pub mod not;
pub mod visitor;

pub use comparison::*;
pub use condition::*;
pub use constant::*;
pub use expression::*;
pub use not::*;
pub use visitor::*;
