//! Condition planning for SieveDB
//!
//! This module hosts the planning side of the predicate layer:
//!
//! 1. **Binding**: `map_columns` resolves column references against filters
//! 2. **Optimization**: cost-based operand ordering and constant folding
//! 3. **Pushdown**: filters pull index conditions and scan filters out of
//!    the optimized condition

pub mod context;
pub mod table_filter;

pub use context::*;
pub use table_filter::*;
