//! Error types for the doid crate.

use thiserror::Error;

/// Errors that can occur when building or evaluating queries.
#[derive(Debug, Error)]
pub enum QueryError {
    /// Clause name is malformed (empty, empty segment, or leading/trailing `__`).
    #[error("invalid clause '{clause}': {reason}")]
    InvalidClause { clause: String, reason: &'static str },

    /// Operand has the wrong shape for the clause operator.
    #[error("invalid operand for '{clause}': expected {expected}")]
    InvalidOperand {
        clause: String,
        expected: &'static str,
    },

    /// Invalid regular expression pattern.
    #[error("invalid regex pattern: {0}")]
    InvalidRegex(#[from] regex::Error),

    /// An attribute along the path does not exist on the current value.
    #[error("attribute lookup failed for '{path}': no attribute '{segment}'")]
    Lookup { path: String, segment: String },

    /// Operator cannot be applied to the given value types.
    #[error("'{op}' not supported between {left} and {right} values")]
    TypeMismatch {
        op: &'static str,
        left: &'static str,
        right: &'static str,
    },

    /// Numeric negation applied to a boolean-valued predicate.
    #[error("numeric negation is not supported on boolean predicates")]
    UnsupportedNegation,

    /// Slice step of zero.
    #[error("slice step cannot be zero")]
    InvalidSlice,
}

impl QueryError {
    pub(crate) fn invalid_clause(clause: &str, reason: &'static str) -> Self {
        QueryError::InvalidClause {
            clause: clause.to_string(),
            reason,
        }
    }

    pub(crate) fn invalid_operand(clause: &str, expected: &'static str) -> Self {
        QueryError::InvalidOperand {
            clause: clause.to_string(),
            expected,
        }
    }

    /// Returns `true` for errors raised while building a predicate or key,
    /// as opposed to evaluating one.
    pub fn is_construction_error(&self) -> bool {
        matches!(
            self,
            QueryError::InvalidClause { .. }
                | QueryError::InvalidOperand { .. }
                | QueryError::InvalidRegex(_)
        )
    }
}

/// Result type for doid operations.
pub type Result<T> = std::result::Result<T, QueryError>;
