//! Expression evaluation engine
//!
//! This module reduces an infix expression to a single `i64`:
//! - [`registry`]: caller-populated operator/function tables
//! - [`postfix`]: shunting-yard conversion from infix to postfix (RPN)
//! - [`engine`]: the [`engine::Evaluator`] and its RPN stack machine
//! - [`builtins`]: the basic math loadout (`+ - * / ^ log10 log2`)
//! - [`errors`]: the failure taxonomy
//!
//! # Evaluation Model
//!
//! The evaluator itself ships no operators. Embedders register operator
//! characters and function names, each with an arity and a compute callback,
//! and optionally a variable resolver. `evaluate` then runs the pipeline
//! tokenize → convert → solve; every expected failure comes back as a
//! [`errors::EvalError`] and is also appended, as readable text, to the
//! instance's error log.

pub mod builtins;
pub mod engine;
pub mod errors;
pub mod postfix;
pub mod registry;
