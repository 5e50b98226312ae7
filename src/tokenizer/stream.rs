//! The token stream builder state machine
//!
//! [`Tokenizer`] is a single-use, character-driven state machine. Input is fed
//! in one or more pieces ([`Tokenizer::feed`], [`Tokenizer::feed_file`]) and
//! the finished token sequence is taken with [`Tokenizer::finish`], which
//! flushes any pending text as a final token.
//!
//! Comment and separator recognition go through [`LexPredicate`] hooks so the
//! same loop can serve different surface syntaxes. The defaults recognize
//! `//` line comments (plus `/* ... */` after
//! [`Tokenizer::enable_c_like_comments`]) and split on space and newline.

use super::token::Token;
use log::trace;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use std::rc::Rc;

/// File input is consumed in fixed-size chunks of this many bytes.
const FILE_CHUNK_SIZE: usize = 1024;

/// Lexer state visible to comment/separator predicates.
///
/// Predicates receive the whole state so that two-character markers can be
/// detected from `current`/`previous` and so that stateful comment syntaxes
/// (like `/* ... */`) can record where they are.
pub struct LexState {
    /// Character currently being examined (tabs already mapped to spaces).
    pub current: char,
    /// Previously examined character, `'\0'` before the first one.
    pub previous: char,
    /// True while characters are being discarded inside a comment.
    pub in_comment: bool,
    /// True while inside a quoted (`"` or `'`) literal.
    pub in_string: bool,
    /// Set by a comment-start predicate when the marker's first character has
    /// already been appended to the pending token and must be removed.
    pub marker_char_buffered: bool,
    /// Whether `/* ... */` comments are recognized by the default predicates.
    pub c_like_comments: bool,
    /// True between `/*` and the first `*/`.
    pub multiline_comment_active: bool,
    line: usize,
    column: usize,
    source: Rc<str>,
}

/// Predicate over the lexer state, used for comment and separator detection.
pub type LexPredicate = fn(&mut LexState) -> bool;

/// Default separator predicate: space and newline.
pub fn default_is_separator(state: &mut LexState) -> bool {
    matches!(state.current, ' ' | '\n')
}

/// Default comment-start predicate: `//`, plus `/*` when C-like comments are
/// enabled. Both markers are two characters, so the first one is already in
/// the pending token buffer and is flagged for removal.
pub fn default_is_comment_start(state: &mut LexState) -> bool {
    if state.c_like_comments && state.current == '*' && state.previous == '/' {
        state.marker_char_buffered = true;
        state.multiline_comment_active = true;
        return true;
    }

    if state.current == '/' && state.previous == '/' {
        state.marker_char_buffered = true;
        return true;
    }

    false
}

/// Default comment-end predicate: the first `*/` closes a multiline comment
/// (nesting is not supported), a newline closes a line comment.
pub fn default_is_comment_end(state: &mut LexState) -> bool {
    if state.multiline_comment_active {
        if state.current == '/' && state.previous == '*' {
            state.multiline_comment_active = false;
            return true;
        }
        return false;
    }

    state.current == '\n'
}

fn is_bracket(c: char) -> bool {
    matches!(c, '(' | ')' | '[' | ']' | '{' | '}')
}

/// An unescaped `"` or `'` toggles quoted-literal mode.
fn is_string_mark(state: &LexState) -> bool {
    (state.current == '"' || state.current == '\'') && state.previous != '\\'
}

/// Single-use token stream builder.
pub struct Tokenizer {
    state: LexState,
    buffer: String,
    token_line: usize,
    token_column: usize,
    output: Vec<Token>,
    is_comment_start: LexPredicate,
    is_comment_end: LexPredicate,
    is_separator: LexPredicate,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tokenizer {
    pub fn new() -> Self {
        Self {
            state: LexState {
                current: '\0',
                previous: '\0',
                in_comment: false,
                in_string: false,
                marker_char_buffered: false,
                c_like_comments: false,
                multiline_comment_active: false,
                line: 1,
                column: 1,
                source: Rc::from(""),
            },
            buffer: String::new(),
            token_line: 1,
            token_column: 1,
            output: Vec::new(),
            is_comment_start: default_is_comment_start,
            is_comment_end: default_is_comment_end,
            is_separator: default_is_separator,
        }
    }

    /// Replace the comment-start/comment-end predicates.
    pub fn set_comment_predicates(&mut self, start: LexPredicate, end: LexPredicate) {
        self.is_comment_start = start;
        self.is_comment_end = end;
    }

    /// Replace the separator predicate.
    pub fn set_separator_predicate(&mut self, separator: LexPredicate) {
        self.is_separator = separator;
    }

    /// Make the default comment predicates also recognize `/* ... */`.
    pub fn enable_c_like_comments(&mut self) {
        self.state.c_like_comments = true;
    }

    /// Feed a piece of input. May be called repeatedly; token boundaries are
    /// not implied by the ends of the pieces.
    pub fn feed(&mut self, input: &str) {
        for ch in input.chars() {
            self.step(ch);
        }
    }

    /// Feed the contents of a file, read in fixed-size chunks. Tokens produced
    /// from it carry the file name as their source.
    pub fn feed_file(&mut self, path: &Path) -> io::Result<()> {
        let mut file = File::open(path)?;
        self.state.source = Rc::from(path.to_string_lossy().as_ref());

        let mut chunk = [0u8; FILE_CHUNK_SIZE];
        let mut pending: Vec<u8> = Vec::new();

        loop {
            let read = file.read(&mut chunk)?;
            if read == 0 {
                break;
            }

            pending.extend_from_slice(&chunk[..read]);

            // A chunk boundary may split a multi-byte character; feed the
            // valid prefix and carry the rest into the next chunk.
            let valid_len = match std::str::from_utf8(&pending) {
                Ok(text) => {
                    self.feed(text);
                    pending.len()
                }
                Err(err) => {
                    let valid = err.valid_up_to();
                    let text = std::str::from_utf8(&pending[..valid])
                        .expect("prefix up to valid_up_to() is valid UTF-8");
                    self.feed(text);
                    valid
                }
            };
            pending.drain(..valid_len);
        }

        if !pending.is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("{}: trailing bytes are not valid UTF-8", path.display()),
            ));
        }

        self.state.source = Rc::from("");
        Ok(())
    }

    /// Flush the pending buffer and return the finished token sequence.
    pub fn finish(mut self) -> Vec<Token> {
        self.flush();
        trace!("tokenizer produced {} token(s)", self.output.len());
        self.output
    }

    /// Convenience: feed a single string and finish.
    pub fn tokenize(mut self, input: &str) -> Vec<Token> {
        self.feed(input);
        self.finish()
    }

    fn step(&mut self, ch: char) {
        // Carriage returns vanish without advancing the column.
        if ch == '\r' {
            return;
        }

        self.state.current = if ch == '\t' { ' ' } else { ch };

        if self.state.in_comment {
            if (self.is_comment_end)(&mut self.state) {
                self.state.in_comment = false;
            }
        } else if self.state.in_string {
            // Separators, brackets and comment markers are ordinary text
            // inside a quoted literal.
            self.append_current();
            if is_string_mark(&self.state) {
                self.state.in_string = false;
                self.flush();
            }
        } else if (self.is_comment_start)(&mut self.state) {
            self.state.in_comment = true;
            self.drop_buffered_marker();
        } else if is_string_mark(&self.state) {
            self.append_current();
            self.state.in_string = true;
        } else if is_bracket(self.state.current) {
            self.flush();
            self.token_line = self.state.line;
            self.token_column = self.state.column;
            self.buffer.push(self.state.current);
            self.flush();
        } else if (self.is_separator)(&mut self.state) {
            self.flush();
        } else {
            self.append_current();
        }

        if self.state.current == '\n' {
            self.state.line += 1;
            self.state.column = 1;
        } else {
            self.state.column += 1;
        }
        self.state.previous = self.state.current;
    }

    fn append_current(&mut self) {
        if self.buffer.is_empty() {
            self.token_line = self.state.line;
            self.token_column = self.state.column;
        }
        self.buffer.push(self.state.current);
    }

    fn flush(&mut self) {
        if self.buffer.is_empty() {
            return;
        }

        let text = std::mem::take(&mut self.buffer);
        self.output.push(Token::new(
            text,
            self.token_line,
            self.token_column,
            self.state.source.clone(),
        ));
    }

    /// A two-character comment marker is only recognized on its second
    /// character; the first one was already appended as ordinary text and has
    /// to be taken back out of the pending token.
    fn drop_buffered_marker(&mut self) {
        if self.state.marker_char_buffered {
            self.buffer.pop();
            self.state.marker_char_buffered = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(tokens: &[Token]) -> Vec<&str> {
        tokens.iter().map(|t| t.text.as_str()).collect()
    }

    #[test]
    fn test_separators_split_tokens() {
        let tokens = Tokenizer::new().tokenize("1 + 2\nfoo bar");
        assert_eq!(texts(&tokens), vec!["1", "+", "2", "foo", "bar"]);
    }

    #[test]
    fn test_final_token_flushed_at_end_of_input() {
        let tokens = Tokenizer::new().tokenize("alpha");
        assert_eq!(texts(&tokens), vec!["alpha"]);
    }

    #[test]
    fn test_brackets_are_single_tokens() {
        let tokens = Tokenizer::new().tokenize("f(x)[0]{y}");
        assert_eq!(
            texts(&tokens),
            vec!["f", "(", "x", ")", "[", "0", "]", "{", "y", "}"]
        );
    }

    #[test]
    fn test_tab_acts_as_separator() {
        let tokens = Tokenizer::new().tokenize("a\tb");
        assert_eq!(texts(&tokens), vec!["a", "b"]);
    }

    #[test]
    fn test_carriage_return_dropped() {
        let tokens = Tokenizer::new().tokenize("a\r\nb");
        assert_eq!(texts(&tokens), vec!["a", "b"]);
        // \r does not advance the column, so 'a' and 'b' both start at 1
        assert_eq!(tokens[0].column, 1);
        assert_eq!(tokens[1].column, 1);
        assert_eq!(tokens[1].line, 2);
    }

    #[test]
    fn test_line_comment_discards_to_end_of_line() {
        let tokens = Tokenizer::new().tokenize("keep // dropped words\nnext");
        assert_eq!(texts(&tokens), vec!["keep", "next"]);
    }

    #[test]
    fn test_comment_marker_removed_from_pending_token() {
        // The first '/' of the marker lands in the buffer before the second
        // one reveals a comment; it must be taken back out.
        let tokens = Tokenizer::new().tokenize("x// trailing");
        assert_eq!(texts(&tokens), vec!["x"]);
    }

    #[test]
    fn test_c_like_comments_disabled_by_default() {
        let tokens = Tokenizer::new().tokenize("a /* b */ c");
        assert_eq!(texts(&tokens), vec!["a", "/*", "b", "*/", "c"]);
    }

    #[test]
    fn test_c_like_comments_enabled() {
        let mut tokenizer = Tokenizer::new();
        tokenizer.enable_c_like_comments();
        tokenizer.feed("a /* b\nc */ d");
        assert_eq!(texts(&tokenizer.finish()), vec!["a", "d"]);
    }

    #[test]
    fn test_c_like_comment_ends_at_first_marker() {
        let mut tokenizer = Tokenizer::new();
        tokenizer.enable_c_like_comments();
        tokenizer.feed("/* outer /* inner */ rest");
        assert_eq!(texts(&tokenizer.finish()), vec!["rest"]);
    }

    #[test]
    fn test_quoted_literal_kept_whole() {
        let tokens = Tokenizer::new().tokenize(r#"say "hello (world) // x" end"#);
        assert_eq!(texts(&tokens), vec!["say", "\"hello (world) // x\"", "end"]);
    }

    #[test]
    fn test_escaped_quote_does_not_close_literal() {
        let tokens = Tokenizer::new().tokenize(r#""a \" b""#);
        assert_eq!(texts(&tokens), vec![r#""a \" b""#]);
    }

    #[test]
    fn test_single_quote_literal() {
        let tokens = Tokenizer::new().tokenize("'x y' z");
        assert_eq!(texts(&tokens), vec!["'x y'", "z"]);
    }

    #[test]
    fn test_token_positions_point_at_first_character() {
        let tokens = Tokenizer::new().tokenize("ab (cd\nef");
        assert_eq!(tokens[0].line, 1);
        assert_eq!(tokens[0].column, 1);
        assert_eq!(tokens[1].column, 4); // '('
        assert_eq!(tokens[2].column, 5); // "cd"
        assert_eq!(tokens[3].line, 2);
        assert_eq!(tokens[3].column, 1); // "ef"
    }

    #[test]
    fn test_feed_in_pieces_does_not_split_tokens() {
        let mut tokenizer = Tokenizer::new();
        tokenizer.feed("hel");
        tokenizer.feed("lo wor");
        tokenizer.feed("ld");
        assert_eq!(texts(&tokenizer.finish()), vec!["hello", "world"]);
    }

    #[test]
    fn test_custom_separator_predicate() {
        fn comma_or_space(state: &mut LexState) -> bool {
            matches!(state.current, ',' | ' ' | '\n')
        }

        let mut tokenizer = Tokenizer::new();
        tokenizer.set_separator_predicate(comma_or_space);
        tokenizer.feed("a,b, c");
        assert_eq!(texts(&tokenizer.finish()), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_in_memory_input_has_empty_source() {
        let tokens = Tokenizer::new().tokenize("x");
        assert_eq!(&*tokens[0].source, "");
    }
}
