//! SQL values as seen by the predicate layer

use crate::common::error::{SieveError, SieveResult};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// A single SQL value
/// Predicates only ever compare and render these, so the domain is small
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// Null value
    Null,
    /// Boolean value
    Boolean(bool),
    /// 64-bit signed integer
    Integer(i64),
    /// String value
    Varchar(String),
}

impl Value {
    /// Check if this value is null
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Name of this value's type, for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "NULL",
            Value::Boolean(_) => "BOOLEAN",
            Value::Integer(_) => "INTEGER",
            Value::Varchar(_) => "VARCHAR",
        }
    }

    /// Try to extract a boolean value
    pub fn try_as_boolean(&self) -> SieveResult<bool> {
        match self {
            Value::Boolean(value) => Ok(*value),
            _ => Err(SieveError::Type(format!(
                "Cannot extract boolean from {}",
                self.type_name()
            ))),
        }
    }

    /// Try to extract an i64 value
    pub fn try_as_i64(&self) -> SieveResult<i64> {
        match self {
            Value::Integer(value) => Ok(*value),
            _ => Err(SieveError::Type(format!(
                "Cannot extract i64 from {}",
                self.type_name()
            ))),
        }
    }

    /// Create a boolean value
    pub fn boolean(value: bool) -> Self {
        Value::Boolean(value)
    }

    /// Create an integer value
    pub fn integer(value: i64) -> Self {
        Value::Integer(value)
    }

    /// Create a string value
    pub fn varchar(value: impl Into<String>) -> Self {
        Value::Varchar(value.into())
    }

    /// Compare two values for ordering
    pub fn compare(&self, other: &Value) -> SieveResult<Ordering> {
        match (self, other) {
            // NULL ordering is only meaningful for sorting; predicate code
            // checks is_null() before comparing
            (Value::Null, Value::Null) => Ok(Ordering::Equal),
            (Value::Null, _) => Ok(Ordering::Less),
            (_, Value::Null) => Ok(Ordering::Greater),
            (Value::Boolean(a), Value::Boolean(b)) => Ok(a.cmp(b)),
            (Value::Integer(a), Value::Integer(b)) => Ok(a.cmp(b)),
            (Value::Varchar(a), Value::Varchar(b)) => Ok(a.cmp(b)),
            _ => Err(SieveError::Type(format!(
                "Cannot compare {} with {}",
                self.type_name(),
                other.type_name()
            ))),
        }
    }

    /// Render this value as a SQL literal
    pub fn to_sql_literal(&self) -> String {
        match self {
            Value::Null => "NULL".to_string(),
            Value::Boolean(true) => "TRUE".to_string(),
            Value::Boolean(false) => "FALSE".to_string(),
            Value::Integer(value) => value.to_string(),
            Value::Varchar(value) => format!("'{}'", value.replace('\'', "''")),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "NULL"),
            Value::Boolean(value) => write!(f, "{}", value),
            Value::Integer(value) => write!(f, "{}", value),
            Value::Varchar(value) => write!(f, "{}", value),
        }
    }
}
