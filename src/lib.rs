//! # Introduction
//!
//! `inteval` is a small, embeddable integer expression evaluator: given an
//! infix expression and a caller-supplied set of operators, functions, and
//! variables, it produces a single `i64` result or a descriptive failure.
//! The evaluator ships no syntax of its own beyond tokenization; embedders
//! register every operator character and function name together with a
//! compute callback, and may install a resolver callback for variable names.
//!
//! ## Evaluation pipeline
//!
//! ```text
//! Source → Tokenizer → Symbol split → Shunting-yard → RPN stack machine → i64
//! ```
//!
//! 1. [`tokenizer`] — turns raw text into position-tagged tokens, with
//!    pluggable comment/separator detection.
//! 2. [`numeric`] — classifies and parses numeric literals (hex, decimal,
//!    octal, binary).
//! 3. [`evaluator`] — resolves symbols against the registered tables,
//!    reorders infix to postfix, and reduces the postfix sequence on a value
//!    stack, invoking the registered callbacks.
//!
//! ## Example
//!
//! ```
//! use inteval::evaluator::engine::Evaluator;
//!
//! let mut evaluator = Evaluator::new();
//! evaluator.load_basic_math();
//! evaluator.set_variable_resolver(|name| (name == "x").then_some(5));
//!
//! assert_eq!(evaluator.evaluate("1 + 2 * 3").unwrap(), 7);
//! assert_eq!(evaluator.evaluate("x + 3").unwrap(), 8);
//! assert!(evaluator.evaluate("(1 + 2").is_err());
//! ```

pub mod evaluator;
pub mod numeric;
pub mod tokenizer;
