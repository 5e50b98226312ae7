//! The evaluator instance and its RPN stack machine
//!
//! [`Evaluator`] owns the symbol registry, an append-only error log, and an
//! optional variable resolver. It is created once, configured, and then used
//! for any number of [`Evaluator::evaluate`] calls; token streams, postfix
//! sequences, and value stacks are transient per call.
//!
//! Evaluation is single-threaded and synchronous: tokenize → split symbols →
//! convert to postfix → reduce on a value stack. Values enter the stack
//! unclassified ([`StackValue::Text`]) and are only resolved to numbers when
//! actually consumed, so a variable that appears in an expression but is
//! never used by any callback does not need to resolve.

use super::errors::EvalError;
use super::postfix::{split_symbols, to_postfix};
use super::registry::{Associativity, SymbolRegistry};
use crate::numeric;
use crate::tokenizer::stream::Tokenizer;
use crate::tokenizer::token::Token;
use log::debug;

/// A value on the evaluation stack.
///
/// Opaque to embedders: compute callbacks receive these and turn them into
/// numbers through [`Evaluator::resolve_argument`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StackValue {
    /// Result of an earlier callback invocation.
    Number(i64),
    /// Literal-or-variable token text awaiting classification.
    Text(String),
}

/// Variable resolver supplied by the embedder. Returns `None` to decline.
pub type VariableResolver = Box<dyn Fn(&str) -> Option<i64>>;

/// An embeddable integer expression evaluator.
pub struct Evaluator {
    registry: SymbolRegistry,
    error_log: Vec<String>,
    variable_resolver: Option<VariableResolver>,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl Evaluator {
    /// Create an evaluator with empty symbol tables and no resolver.
    pub fn new() -> Self {
        Self {
            registry: SymbolRegistry::new(),
            error_log: Vec::new(),
            variable_resolver: None,
        }
    }

    /// Register a single-character operator. Registrations are append-only;
    /// a duplicate symbol never replaces the earlier one.
    pub fn register_operator(
        &mut self,
        symbol: char,
        precedence: i32,
        associativity: Associativity,
        arity: usize,
        compute: impl Fn(&Evaluator, &[StackValue]) -> Result<i64, EvalError> + 'static,
    ) {
        self.registry
            .register_operator(symbol, precedence, associativity, arity, compute);
    }

    /// Register a named function.
    pub fn register_function(
        &mut self,
        name: impl Into<String>,
        arity: usize,
        compute: impl Fn(&Evaluator, &[StackValue]) -> Result<i64, EvalError> + 'static,
    ) {
        self.registry.register_function(name, arity, compute);
    }

    /// Install the callback consulted for variable-candidate tokens. Storage
    /// of variables stays with the embedder; the evaluator only resolves
    /// names through this callback.
    pub fn set_variable_resolver(&mut self, resolver: impl Fn(&str) -> Option<i64> + 'static) {
        self.variable_resolver = Some(Box::new(resolver));
    }

    /// Read access to the symbol tables.
    pub fn registry(&self) -> &SymbolRegistry {
        &self.registry
    }

    /// Evaluate an infix expression to a single `i64`.
    ///
    /// On failure the returned error's message, plus a summary line naming
    /// the failed phase, is appended to the error log. The log accumulates
    /// across calls until [`Evaluator::clear_errors`].
    pub fn evaluate(&mut self, expression: &str) -> Result<i64, EvalError> {
        let tokens = Tokenizer::new().tokenize(expression);
        let tokens = split_symbols(tokens, &self.registry);
        debug!("expression '{}' produced {} token(s)", expression, tokens.len());

        let postfix = match to_postfix(&tokens, &self.registry) {
            Ok(sequence) => sequence,
            Err(err) => {
                self.error_log.push(err.to_string());
                self.error_log.push(format!(
                    "Failed to convert expression '{}' to postfix notation",
                    expression
                ));
                return Err(err);
            }
        };

        match self.solve(&postfix) {
            Ok(value) => Ok(value),
            Err(err) => {
                self.error_log.push(err.to_string());
                self.error_log
                    .push(format!("Failed to solve expression '{}'", expression));
                Err(err)
            }
        }
    }

    /// Resolve one callback argument to its numeric value: literal text is
    /// parsed, variable candidates go through the resolver. Asking for a
    /// position beyond the argument list is an arity mismatch in the
    /// registration and panics.
    pub fn resolve_argument(&self, args: &[StackValue], position: usize) -> Result<i64, EvalError> {
        let value = args
            .get(position)
            .expect("argument position exceeds declared arity");
        self.resolve_value(value)
    }

    /// Diagnostic lines accumulated by failed `evaluate` calls.
    pub fn error_log(&self) -> &[String] {
        &self.error_log
    }

    /// The accumulated diagnostics as one newline-joined string.
    pub fn error_text(&self) -> String {
        self.error_log.join("\n")
    }

    /// Discard all accumulated diagnostics.
    pub fn clear_errors(&mut self) {
        self.error_log.clear();
    }

    /// Reduce a postfix token sequence on the value stack.
    fn solve(&self, postfix: &[Token]) -> Result<i64, EvalError> {
        let mut stack: Vec<StackValue> = Vec::new();

        for token in postfix {
            let text = token.text.as_str();

            if numeric::is_number(text) || self.registry.can_be_variable(text) {
                // Classification is deferred until the value is consumed.
                stack.push(StackValue::Text(text.to_string()));
            } else if self.registry.is_operator(text) || self.registry.is_function(text) {
                let (arity, compute) = if self.registry.is_operator(text) {
                    let record = self.registry.operator_record(text);
                    (record.arity, &record.compute)
                } else {
                    let record = self.registry.function_record(text);
                    (record.arity, &record.compute)
                };

                if arity > stack.len() {
                    return Err(EvalError::NotEnoughValues {
                        symbol: text.to_string(),
                        needed: arity,
                        available: stack.len(),
                    });
                }

                // Splitting off the top `arity` entries keeps the arguments
                // in left-to-right order.
                let args = stack.split_off(stack.len() - arity);
                debug!("invoking '{}' with {} argument(s)", text, args.len());
                let value = compute(self, &args)?;
                stack.push(StackValue::Number(value));
            } else {
                return Err(EvalError::UnrecognizedToken {
                    token: text.to_string(),
                    line: token.line,
                    column: token.column,
                });
            }
        }

        match stack.len() {
            0 => Err(EvalError::NoResult),
            1 => self.resolve_value(&stack[0]),
            count => Err(EvalError::ValuesLeftOnStack { count }),
        }
    }

    fn resolve_value(&self, value: &StackValue) -> Result<i64, EvalError> {
        match value {
            StackValue::Number(number) => Ok(*number),
            StackValue::Text(text) => {
                if numeric::is_number(text) {
                    // parse_number only declines a recognized literal when
                    // its value does not fit an i64
                    return numeric::parse_number(text).ok_or_else(|| {
                        EvalError::UnresolvedArgument { text: text.clone() }
                    });
                }

                if self.registry.can_be_variable(text) {
                    if let Some(resolver) = &self.variable_resolver {
                        if let Some(resolved) = resolver(text) {
                            return Ok(resolved);
                        }
                    }
                    return Err(EvalError::UnresolvedVariable { name: text.clone() });
                }

                Err(EvalError::UnresolvedArgument { text: text.clone() })
            }
        }
    }
}
