//! Lexical token with source-position metadata

use std::fmt;
use std::rc::Rc;

/// A single lexical unit produced by the token stream builder.
///
/// `line` and `column` are 1-based and always point at the token's first
/// character. `source` is the file name the token came from, or the empty
/// string for in-memory input; it is shared between tokens of the same input
/// rather than copied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub line: usize,
    pub column: usize,
    pub source: Rc<str>,
}

impl Token {
    pub fn new(text: impl Into<String>, line: usize, column: usize, source: Rc<str>) -> Self {
        Self {
            text: text.into(),
            line,
            column,
            source,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.source.is_empty() {
            write!(f, "'{}' at line {}, column {}", self.text, self.line, self.column)
        } else {
            write!(
                f,
                "'{}' at {}:{}:{}",
                self.text, self.source, self.line, self.column
            )
        }
    }
}
