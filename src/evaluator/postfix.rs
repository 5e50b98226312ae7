//! Infix → postfix conversion (shunting-yard)
//!
//! Two passes over the token sequence:
//!
//! 1. [`split_symbols`] - registered operator characters embedded in a larger
//!    token (`1+2`) are split out into tokens of their own, so expressions do
//!    not need whitespace around every operator. The tokenizer itself stays
//!    registry-unaware; this is the first registry-aware step.
//! 2. [`to_postfix`] - the classic shunting-yard reordering with an explicit
//!    operator stack. Functions outrank everything and are only emitted when
//!    their closing parenthesis is reached; right-associative operators use a
//!    strict `<` tie-break so `2^3^2` groups as `2^(3^2)`.

use super::errors::EvalError;
use super::registry::{Associativity, SymbolRegistry};
use crate::numeric;
use crate::tokenizer::token::Token;
use log::trace;

/// Split registered operator characters out of composite tokens.
///
/// Numeric literals, registered function names, identifier-shaped tokens, and
/// quoted literals are never split; everything else is cut around operator
/// characters, each becoming its own one-character token. Fragment positions
/// point at each fragment's first character.
pub fn split_symbols(tokens: Vec<Token>, registry: &SymbolRegistry) -> Vec<Token> {
    let mut output = Vec::with_capacity(tokens.len());

    for token in tokens {
        if numeric::is_number(&token.text)
            || registry.is_function(&token.text)
            || registry.can_be_variable(&token.text)
            || token.text.starts_with('"')
            || token.text.starts_with('\'')
            || !token.text.chars().any(|c| registry.is_operator_char(c))
        {
            output.push(token);
            continue;
        }

        let mut fragment = String::new();
        let mut fragment_column = token.column;
        let mut column = token.column;

        for c in token.text.chars() {
            if registry.is_operator_char(c) {
                if !fragment.is_empty() {
                    output.push(Token::new(
                        std::mem::take(&mut fragment),
                        token.line,
                        fragment_column,
                        token.source.clone(),
                    ));
                }
                output.push(Token::new(
                    c.to_string(),
                    token.line,
                    column,
                    token.source.clone(),
                ));
            } else {
                if fragment.is_empty() {
                    fragment_column = column;
                }
                fragment.push(c);
            }
            column += 1;
        }

        if !fragment.is_empty() {
            output.push(Token::new(
                fragment,
                token.line,
                fragment_column,
                token.source.clone(),
            ));
        }
    }

    output
}

/// Reorder an infix token sequence into postfix (RPN).
pub fn to_postfix(tokens: &[Token], registry: &SymbolRegistry) -> Result<Vec<Token>, EvalError> {
    let mut output: Vec<Token> = Vec::with_capacity(tokens.len());
    let mut stack: Vec<Token> = Vec::new();

    for token in tokens {
        let text = token.text.as_str();

        if numeric::is_number(text) {
            output.push(token.clone());
        } else if registry.is_function(text) {
            stack.push(token.clone());
        } else if registry.can_be_variable(text) {
            output.push(token.clone());
        } else if registry.is_operator(text) {
            let record = registry.operator_record(text);

            while let Some(top) = stack.last() {
                // Parentheses and pending function names stay put.
                if !registry.is_operator(&top.text) {
                    break;
                }

                let top_record = registry.operator_record(&top.text);
                let pops = match record.associativity {
                    Associativity::Left => record.precedence <= top_record.precedence,
                    Associativity::Right => record.precedence < top_record.precedence,
                };
                if !pops {
                    break;
                }

                output.push(stack.pop().expect("stack top was just inspected"));
            }

            stack.push(token.clone());
        } else if text == "(" {
            stack.push(token.clone());
        } else if text == ")" {
            loop {
                match stack.pop() {
                    None => return Err(EvalError::MismatchedParentheses),
                    Some(top) if top.text == "(" => break,
                    Some(top) => output.push(top),
                }
            }

            // A function name directly below the '(' is the call being
            // closed; emit it now.
            if let Some(top) = stack.last() {
                if registry.is_function(&top.text) {
                    output.push(stack.pop().expect("stack top was just inspected"));
                }
            }
        } else {
            return Err(EvalError::UnrecognizedToken {
                token: text.to_string(),
                line: token.line,
                column: token.column,
            });
        }
    }

    while let Some(top) = stack.pop() {
        if top.text == "(" || top.text == ")" {
            return Err(EvalError::MismatchedParentheses);
        }
        output.push(top);
    }

    trace!(
        "postfix sequence: {:?}",
        output.iter().map(|t| t.text.as_str()).collect::<Vec<_>>()
    );

    Ok(output)
}
