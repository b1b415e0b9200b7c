//! Three-valued boolean logic for SQL predicates

use serde::{Deserialize, Serialize};
use std::fmt;

/// SQL boolean result: TRUE, FALSE, or UNKNOWN (the NULL of predicates)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TruthValue {
    True,
    False,
    Unknown,
}

impl TruthValue {
    /// Three-valued AND: FALSE dominates, then UNKNOWN
    pub fn and(self, other: TruthValue) -> TruthValue {
        match (self, other) {
            (TruthValue::False, _) | (_, TruthValue::False) => TruthValue::False,
            (TruthValue::Unknown, _) | (_, TruthValue::Unknown) => TruthValue::Unknown,
            _ => TruthValue::True,
        }
    }

    /// Three-valued OR: TRUE dominates, then UNKNOWN
    pub fn or(self, other: TruthValue) -> TruthValue {
        match (self, other) {
            (TruthValue::True, _) | (_, TruthValue::True) => TruthValue::True,
            (TruthValue::Unknown, _) | (_, TruthValue::Unknown) => TruthValue::Unknown,
            _ => TruthValue::False,
        }
    }

    /// Three-valued NOT: UNKNOWN stays UNKNOWN
    pub fn not(self) -> TruthValue {
        match self {
            TruthValue::True => TruthValue::False,
            TruthValue::False => TruthValue::True,
            TruthValue::Unknown => TruthValue::Unknown,
        }
    }

    /// Check if this is TRUE
    pub fn is_true(self) -> bool {
        self == TruthValue::True
    }

    /// Check if this is FALSE
    pub fn is_false(self) -> bool {
        self == TruthValue::False
    }

    /// Check if this is UNKNOWN
    pub fn is_unknown(self) -> bool {
        self == TruthValue::Unknown
    }

    /// Collapse to a two-valued boolean; UNKNOWN becomes None
    pub fn as_bool(self) -> Option<bool> {
        match self {
            TruthValue::True => Some(true),
            TruthValue::False => Some(false),
            TruthValue::Unknown => None,
        }
    }
}

impl From<bool> for TruthValue {
    fn from(value: bool) -> Self {
        if value {
            TruthValue::True
        } else {
            TruthValue::False
        }
    }
}

impl From<Option<bool>> for TruthValue {
    fn from(value: Option<bool>) -> Self {
        match value {
            Some(b) => TruthValue::from(b),
            None => TruthValue::Unknown,
        }
    }
}

impl fmt::Display for TruthValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TruthValue::True => write!(f, "TRUE"),
            TruthValue::False => write!(f, "FALSE"),
            TruthValue::Unknown => write!(f, "UNKNOWN"),
        }
    }
}
