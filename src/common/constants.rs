//! Constants used throughout SieveDB

/// Cost of reading a column value during evaluation
pub const COLUMN_COST: u32 = 2;

/// Cost of producing a constant value during evaluation
pub const CONSTANT_COST: u32 = 0;

/// Cost added by a comparison on top of its operands
pub const COMPARISON_COST: u32 = 1;

/// Cost added by a NOT on top of its operand
pub const NOT_COST: u32 = 1;
