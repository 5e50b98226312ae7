//! Evaluation error types
//!
//! [`EvalError`] covers every expected, input-driven failure: syntax errors
//! caught during infix→postfix conversion or RPN evaluation, resolution
//! failures for variable-candidate tokens, and the arithmetic faults of the
//! built-in operators. None of these are fatal to the process; they end the
//! current `evaluate` call and leave a readable line in the evaluator's error
//! log.
//!
//! Programming-contract violations (e.g. fetching an operator record without
//! checking `is_operator` first) are not represented here - they panic,
//! because they indicate a bug in the embedding code rather than malformed
//! input.

use std::fmt;

/// Errors produced while converting or evaluating an expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    /// Unbalanced `(`/`)` discovered during conversion.
    MismatchedParentheses,

    /// A token that is neither a number, a variable candidate, nor a
    /// registered symbol.
    UnrecognizedToken {
        token: String,
        line: usize,
        column: usize,
    },

    /// An operator/function needed more values than the stack holds.
    NotEnoughValues {
        symbol: String,
        needed: usize,
        available: usize,
    },

    /// More than one value remained after the postfix sequence was consumed.
    ValuesLeftOnStack { count: usize },

    /// The postfix sequence produced no value at all.
    NoResult,

    /// A variable-candidate token that no resolver could supply a value for.
    UnresolvedVariable { name: String },

    /// An argument that is neither a numeric literal nor a variable candidate
    /// (or a literal whose value does not fit an `i64`).
    UnresolvedArgument { text: String },

    /// Division (or `0 ^ negative`) by zero.
    DivisionByZero,

    /// A built-in arithmetic operation overflowed `i64`.
    IntegerOverflow { operation: String },

    /// A built-in function was applied outside its domain.
    MathDomain { function: &'static str, value: i64 },
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalError::MismatchedParentheses => {
                write!(f, "Mismatched parentheses in expression")
            }
            EvalError::UnrecognizedToken {
                token,
                line,
                column,
            } => {
                write!(
                    f,
                    "Unrecognized token '{}' at line {}, column {}",
                    token, line, column
                )
            }
            EvalError::NotEnoughValues {
                symbol,
                needed,
                available,
            } => {
                write!(
                    f,
                    "Not enough values on the stack for '{}' (needed {}, found {}) - syntax error",
                    symbol, needed, available
                )
            }
            EvalError::ValuesLeftOnStack { count } => {
                write!(
                    f,
                    "{} values left on the stack after evaluation - syntax error",
                    count
                )
            }
            EvalError::NoResult => {
                write!(f, "No result found on the stack - syntax error")
            }
            EvalError::UnresolvedVariable { name } => {
                write!(f, "Variable '{}' cannot be resolved", name)
            }
            EvalError::UnresolvedArgument { text } => {
                write!(f, "Cannot resolve argument '{}'", text)
            }
            EvalError::DivisionByZero => {
                write!(f, "Division by zero")
            }
            EvalError::IntegerOverflow { operation } => {
                write!(f, "Integer overflow in operation: {}", operation)
            }
            EvalError::MathDomain { function, value } => {
                write!(f, "{} is undefined for {}", function, value)
            }
        }
    }
}

impl std::error::Error for EvalError {}
