//! Formula error types

use thiserror::Error;

/// Result type for formula operations
pub type FormulaResult<T> = std::result::Result<T, FormulaError>;

/// Errors that can occur during formula parsing or evaluation
///
/// Arithmetic domain problems (division by zero, `sqrt` of a negative number, ...) are
/// not errors; they produce infinities or NaN.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormulaError {
    /// A variable has no value in the bindings table
    #[error("Unbound variable: {0}")]
    UnboundVariable(String),

    /// Operand/operator arity mismatch in an RPN formula
    #[error("Incomplete RPN expression: {reason} (stack depth {depth})")]
    IncompleteRpn {
        reason: &'static str,
        depth: usize,
    },

    /// Function name not present in the registry
    #[error("Undefined function: {0}")]
    UndefinedFunction(String),
}
