//! Numeric-literal classification and parsing
//!
//! The evaluator consumes this surface as a primitive: "is this token a
//! numeric literal, and if so what is its 64-bit signed value". Four literal
//! forms are recognized:
//!
//! - hexadecimal: `0x` prefix, case-insensitive hex digits
//! - decimal: optional leading `-`, no leading zero
//! - octal: leading `0`, digits `0`–`7` (a bare `"0"` is octal)
//! - binary: `0b` prefix, digits `0`/`1`
//!
//! Values that do not fit an `i64` parse to `None` rather than silently
//! truncating.

/// True when `text` is one of the four recognized literal forms.
pub fn is_number(text: &str) -> bool {
    is_hex_number(text) || is_dec_number(text) || is_oct_number(text) || is_bin_number(text)
}

pub fn is_hex_number(text: &str) -> bool {
    match text.strip_prefix("0x") {
        Some(digits) => !digits.is_empty() && digits.chars().all(|c| c.is_ascii_hexdigit()),
        None => false,
    }
}

pub fn is_dec_number(text: &str) -> bool {
    if text.is_empty() || text.starts_with('0') {
        return false;
    }

    let digits = match text.strip_prefix('-') {
        Some(rest) => rest,
        None => text,
    };

    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
}

pub fn is_oct_number(text: &str) -> bool {
    match text.strip_prefix('0') {
        Some(digits) => digits.chars().all(|c| ('0'..='7').contains(&c)),
        None => false,
    }
}

pub fn is_bin_number(text: &str) -> bool {
    match text.strip_prefix("0b") {
        Some(digits) => !digits.is_empty() && digits.chars().all(|c| c == '0' || c == '1'),
        None => false,
    }
}

/// Parse a recognized literal to its `i64` value.
///
/// Returns `None` when `text` is not a numeric literal or its value does not
/// fit an `i64`.
pub fn parse_number(text: &str) -> Option<i64> {
    if is_hex_number(text) {
        i64::from_str_radix(&text[2..], 16).ok()
    } else if is_dec_number(text) {
        text.parse().ok()
    } else if is_oct_number(text) {
        // A leading zero is harmless to radix-8 parsing, so the whole text
        // can be handed over (this also covers the bare "0" case).
        i64::from_str_radix(text, 8).ok()
    } else if is_bin_number(text) {
        i64::from_str_radix(&text[2..], 2).ok()
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_literals() {
        assert!(is_hex_number("0x1F"));
        assert!(is_hex_number("0xdeadBEEF"));
        assert!(!is_hex_number("0x"));
        assert!(!is_hex_number("0xg1"));
        assert!(!is_hex_number("1F"));
        assert_eq!(parse_number("0xff"), Some(255));
    }

    #[test]
    fn test_dec_literals() {
        assert!(is_dec_number("42"));
        assert!(is_dec_number("-42"));
        assert!(!is_dec_number("042"));
        assert!(!is_dec_number("-"));
        assert!(!is_dec_number("4x2"));
        assert_eq!(parse_number("-17"), Some(-17));
    }

    #[test]
    fn test_oct_literals() {
        assert!(is_oct_number("017"));
        assert!(is_oct_number("0"));
        assert!(!is_oct_number("08"));
        assert!(!is_oct_number("17"));
        assert_eq!(parse_number("017"), Some(15));
        assert_eq!(parse_number("0"), Some(0));
    }

    #[test]
    fn test_bin_literals() {
        assert!(is_bin_number("0b1010"));
        assert!(!is_bin_number("0b"));
        assert!(!is_bin_number("0b12"));
        assert_eq!(parse_number("0b1010"), Some(10));
    }

    #[test]
    fn test_bare_zero_is_octal_not_decimal() {
        assert!(!is_dec_number("0"));
        assert!(is_oct_number("0"));
        assert!(is_number("0"));
    }

    #[test]
    fn test_non_numbers() {
        assert!(!is_number(""));
        assert!(!is_number("x"));
        assert!(!is_number("1.5"));
        assert!(!is_number("1-2"));
        assert_eq!(parse_number("x"), None);
    }

    #[test]
    fn test_overflow_parses_to_none() {
        // i64::MAX is 9223372036854775807
        assert!(is_dec_number("9223372036854775808"));
        assert_eq!(parse_number("9223372036854775808"), None);
        assert_eq!(parse_number("9223372036854775807"), Some(i64::MAX));
    }
}
