//! Configurable token stream builder
//!
//! This module turns raw text into an ordered sequence of [`token::Token`]s:
//! - [`token`]: the `Token` type with source-position metadata
//! - [`stream`]: the [`stream::Tokenizer`] state machine
//!
//! # Tokenization Model
//!
//! The tokenizer consumes input one character at a time. Tokens end on
//! implicit boundaries: separators (space and newline by default) flush the
//! pending text, bracket characters `()[]{}` always become one-character
//! tokens of their own, and quoted literals are kept whole. Comment and
//! separator detection is pluggable through predicate functions receiving the
//! full lexer state, so embedders can teach the stream builder a different
//! comment syntax without touching the core loop.
//!
//! The tokenizer knows nothing about operators, functions, or numbers; those
//! classifications happen later, in [`crate::evaluator`].

pub mod stream;
pub mod token;
