//! Basic math loadout
//!
//! [`Evaluator::load_basic_math`] registers the standard arithmetic set:
//! binary `+ - * /` and right-associative `^`, plus the single-argument
//! functions `log10` and `log2`. All operations are checked: overflow,
//! division by zero, and out-of-domain logarithms fail the evaluation instead
//! of wrapping or trapping.
//!
//! The registrations also demonstrate the callback contract embedders follow
//! for their own symbols: resolve each argument through
//! [`Evaluator::resolve_argument`], then compute.

use super::engine::{Evaluator, StackValue};
use super::errors::EvalError;
use super::registry::Associativity;

fn binary_args(evaluator: &Evaluator, args: &[StackValue]) -> Result<(i64, i64), EvalError> {
    let a = evaluator.resolve_argument(args, 0)?;
    let b = evaluator.resolve_argument(args, 1)?;
    Ok((a, b))
}

/// Integer power with truncation toward zero for negative exponents, the way
/// `pow()` would round: `2 ^ -1` is 0, while bases 1 and -1 stay exact.
fn integer_pow(base: i64, exponent: i64) -> Result<i64, EvalError> {
    if exponent < 0 {
        return match base {
            0 => Err(EvalError::DivisionByZero),
            1 => Ok(1),
            -1 => Ok(if exponent % 2 == 0 { 1 } else { -1 }),
            _ => Ok(0),
        };
    }

    // Bases that cannot overflow, regardless of exponent size.
    match base {
        0 => return Ok(if exponent == 0 { 1 } else { 0 }),
        1 => return Ok(1),
        -1 => return Ok(if exponent % 2 == 0 { 1 } else { -1 }),
        _ => {}
    }

    let exponent = u32::try_from(exponent).map_err(|_| EvalError::IntegerOverflow {
        operation: format!("{} ^ {}", base, exponent),
    })?;

    base.checked_pow(exponent)
        .ok_or_else(|| EvalError::IntegerOverflow {
            operation: format!("{} ^ {}", base, exponent),
        })
}

impl Evaluator {
    /// Register the built-in arithmetic operators and functions.
    pub fn load_basic_math(&mut self) {
        self.register_operator('+', 10, Associativity::Left, 2, |ev, args| {
            let (a, b) = binary_args(ev, args)?;
            a.checked_add(b).ok_or_else(|| EvalError::IntegerOverflow {
                operation: format!("{} + {}", a, b),
            })
        });

        self.register_operator('-', 10, Associativity::Left, 2, |ev, args| {
            let (a, b) = binary_args(ev, args)?;
            a.checked_sub(b).ok_or_else(|| EvalError::IntegerOverflow {
                operation: format!("{} - {}", a, b),
            })
        });

        self.register_operator('*', 20, Associativity::Left, 2, |ev, args| {
            let (a, b) = binary_args(ev, args)?;
            a.checked_mul(b).ok_or_else(|| EvalError::IntegerOverflow {
                operation: format!("{} * {}", a, b),
            })
        });

        self.register_operator('/', 20, Associativity::Left, 2, |ev, args| {
            let (a, b) = binary_args(ev, args)?;
            if b == 0 {
                return Err(EvalError::DivisionByZero);
            }
            // i64 division truncates toward zero; MIN / -1 is the one
            // remaining overflow case
            a.checked_div(b).ok_or_else(|| EvalError::IntegerOverflow {
                operation: format!("{} / {}", a, b),
            })
        });

        self.register_operator('^', 30, Associativity::Right, 2, |ev, args| {
            let (a, b) = binary_args(ev, args)?;
            integer_pow(a, b)
        });

        self.register_function("log10", 1, |ev, args| {
            let a = ev.resolve_argument(args, 0)?;
            if a <= 0 {
                return Err(EvalError::MathDomain {
                    function: "log10",
                    value: a,
                });
            }
            Ok(i64::from(a.ilog10()))
        });

        self.register_function("log2", 1, |ev, args| {
            let a = ev.resolve_argument(args, 0)?;
            if a <= 0 {
                return Err(EvalError::MathDomain {
                    function: "log2",
                    value: a,
                });
            }
            Ok(i64::from(a.ilog2()))
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_pow() {
        assert_eq!(integer_pow(2, 10), Ok(1024));
        assert_eq!(integer_pow(-2, 3), Ok(-8));
        assert_eq!(integer_pow(5, 0), Ok(1));
        assert_eq!(integer_pow(0, 0), Ok(1));
        assert_eq!(integer_pow(0, 5), Ok(0));
    }

    #[test]
    fn test_integer_pow_negative_exponent_truncates() {
        assert_eq!(integer_pow(2, -1), Ok(0));
        assert_eq!(integer_pow(1, -7), Ok(1));
        assert_eq!(integer_pow(-1, -3), Ok(-1));
        assert_eq!(integer_pow(-1, -4), Ok(1));
        assert_eq!(integer_pow(0, -1), Err(EvalError::DivisionByZero));
    }

    #[test]
    fn test_integer_pow_overflow() {
        assert!(matches!(
            integer_pow(2, 64),
            Err(EvalError::IntegerOverflow { .. })
        ));
        // exponents beyond u32 with a safe base still work
        assert_eq!(integer_pow(1, i64::MAX), Ok(1));
    }
}
