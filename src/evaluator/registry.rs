//! Caller-populated symbol tables
//!
//! The registry maps operator characters and function names to their arity,
//! precedence/associativity (operators only), and compute callback. Tables
//! are append-only and ordered: duplicate registrations are permitted and
//! lookup returns the first match in registration order. A deliberately
//! plain `Vec` rather than a map - ordered first-match semantics are part of
//! the contract, and the tables are small.

use super::engine::{Evaluator, StackValue};
use super::errors::EvalError;

/// Tie-break rule for operators of equal precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Associativity {
    Left,
    Right,
}

/// Compute callback invoked by the RPN stack machine.
///
/// Receives the owning [`Evaluator`] (so the callback can resolve its
/// arguments through [`Evaluator::resolve_argument`]) and exactly `arity`
/// arguments in left-to-right order.
pub type ComputeFn = Box<dyn Fn(&Evaluator, &[StackValue]) -> Result<i64, EvalError>>;

/// A registered single-character operator.
pub struct OperatorRecord {
    pub symbol: char,
    pub precedence: i32,
    pub associativity: Associativity,
    pub arity: usize,
    pub compute: ComputeFn,
}

/// A registered named function.
pub struct FunctionRecord {
    pub name: String,
    pub arity: usize,
    pub compute: ComputeFn,
}

/// Ordered, append-only operator and function tables.
#[derive(Default)]
pub struct SymbolRegistry {
    operators: Vec<OperatorRecord>,
    functions: Vec<FunctionRecord>,
}

impl SymbolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_operator(
        &mut self,
        symbol: char,
        precedence: i32,
        associativity: Associativity,
        arity: usize,
        compute: impl Fn(&Evaluator, &[StackValue]) -> Result<i64, EvalError> + 'static,
    ) {
        self.operators.push(OperatorRecord {
            symbol,
            precedence,
            associativity,
            arity,
            compute: Box::new(compute),
        });
    }

    pub fn register_function(
        &mut self,
        name: impl Into<String>,
        arity: usize,
        compute: impl Fn(&Evaluator, &[StackValue]) -> Result<i64, EvalError> + 'static,
    ) {
        self.functions.push(FunctionRecord {
            name: name.into(),
            arity,
            compute: Box::new(compute),
        });
    }

    /// True when `text` is exactly one character matching a registered
    /// operator.
    pub fn is_operator(&self, text: &str) -> bool {
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => self.is_operator_char(c),
            _ => false,
        }
    }

    pub fn is_operator_char(&self, c: char) -> bool {
        self.operators.iter().any(|record| record.symbol == c)
    }

    /// True when `text` exactly matches a registered function name.
    pub fn is_function(&self, text: &str) -> bool {
        self.functions.iter().any(|record| record.name == text)
    }

    /// True when `text` is identifier-shaped (leading letter or underscore,
    /// alphanumerics/underscores thereafter) and not a registered operator or
    /// function. Numeric literals are checked separately at every call site
    /// and take precedence.
    pub fn can_be_variable(&self, text: &str) -> bool {
        if self.is_operator(text) || self.is_function(text) {
            return false;
        }

        let mut chars = text.chars();
        let first = match chars.next() {
            Some(c) => c,
            None => return false,
        };

        (first.is_ascii_alphabetic() || first == '_')
            && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
    }

    /// Record for a registered operator. Contract: only call after
    /// [`SymbolRegistry::is_operator`] returned true.
    pub fn operator_record(&self, text: &str) -> &OperatorRecord {
        let mut chars = text.chars();
        let symbol = match (chars.next(), chars.next()) {
            (Some(c), None) => c,
            _ => panic!("operator symbol must be exactly one character: '{}'", text),
        };

        self.operators
            .iter()
            .find(|record| record.symbol == symbol)
            .expect("operator not registered; confirm with is_operator() first")
    }

    /// Record for a registered function. Contract: only call after
    /// [`SymbolRegistry::is_function`] returned true.
    pub fn function_record(&self, name: &str) -> &FunctionRecord {
        self.functions
            .iter()
            .find(|record| record.name == name)
            .expect("function not registered; confirm with is_function() first")
    }
}
