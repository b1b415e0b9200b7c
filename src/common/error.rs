//! Error handling for SieveDB

use thiserror::Error;

/// Main error type for SieveDB operations
#[derive(Error, Debug)]
pub enum SieveError {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Bind error: {0}")]
    Bind(String),

    #[error("Type error: {0}")]
    Type(String),

    #[error("Execution error: {0}")]
    Execution(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for SieveDB operations
pub type SieveResult<T> = std::result::Result<T, SieveError>;

/// Macro for creating internal errors
#[macro_export]
macro_rules! internal_err {
    ($msg:expr) => {
        $crate::common::error::SieveError::Internal($msg.to_string())
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::common::error::SieveError::Internal(format!($fmt, $($arg)*))
    };
}

/// Macro for creating bind errors
#[macro_export]
macro_rules! bind_err {
    ($msg:expr) => {
        $crate::common::error::SieveError::Bind($msg.to_string())
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::common::error::SieveError::Bind(format!($fmt, $($arg)*))
    };
}
