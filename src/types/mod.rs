//! Type system module for SieveDB
//!
//! This module contains the data types the predicate layer works with:
//! - TruthValue: Three-valued SQL boolean results
//! - Value: Single value containers
//! - Row: Named row contexts that predicates are evaluated against

pub mod row;
pub mod truth;
pub mod value;

// Re-export main types for convenience
pub use row::Row;
pub use truth::TruthValue;
pub use value::Value;
