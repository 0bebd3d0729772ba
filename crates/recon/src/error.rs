use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileError {
    /// Required input empty or missing (e.g. blank identity key).
    Validation(String),
    /// Key or position does not resolve to a record.
    NotFound(String),
    /// Bulk input has no recognized columns.
    Schema(String),
}

impl fmt::Display for ReconcileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation(msg) => write!(f, "validation error: {msg}"),
            Self::NotFound(msg) => write!(f, "not found: {msg}"),
            Self::Schema(msg) => write!(f, "schema error: {msg}"),
        }
    }
}

impl std::error::Error for ReconcileError {}
