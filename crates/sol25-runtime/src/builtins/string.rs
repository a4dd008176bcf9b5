//! `String`: UTF-8 text plus the two stdio methods
//!
//! `concatenateWith:`, `asInteger`, and `startsWith:endsBefore:` follow the
//! nil-on-bad-argument convention: a mismatched argument is a normal `nil`
//! return, never an error.

use crate::classes::{Class, Method};
use crate::error::RuntimeError;
use std::io::{BufRead, Write};

pub(super) fn class() -> Class {
    let mut class = Class::new("String", Some("Object"));

    // Writes the payload verbatim, no trailing newline, and answers the
    // receiver so prints chain.
    class.define("print", Method::Native(|interp, receiver, _args| {
        let text = receiver.as_str().unwrap_or("").to_string();
        let mut out = interp.output().lock().unwrap();
        out.write_all(text.as_bytes())
            .and_then(|_| out.flush())
            .map_err(|e| RuntimeError::value_error(format!("write to stdout failed: {}", e)))?;
        drop(out);
        Ok(receiver)
    }));

    // One line from stdin, without its line terminator; empty on EOF.
    class.define("read", Method::Native(|interp, _receiver, _args| {
        let mut line = String::new();
        interp
            .input()
            .lock()
            .unwrap()
            .read_line(&mut line)
            .map_err(|e| RuntimeError::value_error(format!("read from stdin failed: {}", e)))?;
        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        Ok(interp.make_string(line))
    }));

    class.define("asString", Method::Native(|_interp, receiver, _args| {
        Ok(receiver)
    }));

    class.define("concatenateWith:", Method::Native(|interp, receiver, args| {
        let other = &args[0];
        if !interp.registry().is_subclass(other.class(), "String") {
            return Ok(interp.nil_value());
        }
        match (receiver.as_str(), other.as_str()) {
            (Some(a), Some(b)) => Ok(interp.make_string(format!("{}{}", a, b))),
            _ => Ok(interp.nil_value()),
        }
    }));

    class.define("asInteger", Method::Native(|interp, receiver, _args| {
        let parsed = receiver.as_str().and_then(parse_integer);
        match parsed {
            Some(n) => Ok(interp.make_integer(n)),
            None => Ok(interp.nil_value()),
        }
    }));

    class.define(
        "startsWith:endsBefore:",
        Method::Native(|interp, receiver, args| {
            let Some(text) = receiver.as_str() else {
                return Ok(interp.nil_value());
            };
            let registry = interp.registry();
            if !registry.is_subclass(args[0].class(), "Integer")
                || !registry.is_subclass(args[1].class(), "Integer")
            {
                return Ok(interp.nil_value());
            }
            let (Some(start), Some(end)) = (args[0].as_integer(), args[1].as_integer()) else {
                return Ok(interp.nil_value());
            };
            match slice_between(text, start, end) {
                Some(result) => Ok(interp.make_string(result)),
                None => Ok(interp.nil_value()),
            }
        },
    ));

    class.define("isString", Method::Native(|interp, _receiver, _args| {
        Ok(interp.true_value())
    }));

    class
}

/// Strict decimal parse: an optional `-` followed by ASCII digits only
fn parse_integer(text: &str) -> Option<i64> {
    let digits = text.strip_prefix('-').unwrap_or(text);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse::<i64>().ok()
}

/// 1-based half-open character slice
///
/// `None` for indices outside the rules (non-positive or past the end);
/// an empty string whenever the range is empty.
fn slice_between(text: &str, start: i64, end: i64) -> Option<String> {
    if start < 1 || end < 1 {
        return None;
    }
    if end - start <= 0 {
        return Some(String::new());
    }
    let chars: Vec<char> = text.chars().collect();
    let last = (end - 1) as usize;
    if last > chars.len() {
        return None;
    }
    Some(chars[(start - 1) as usize..last].iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_integer_accepts_plain_and_negative() {
        assert_eq!(parse_integer("0"), Some(0));
        assert_eq!(parse_integer("42"), Some(42));
        assert_eq!(parse_integer("-42"), Some(-42));
        assert_eq!(parse_integer("007"), Some(7));
    }

    #[test]
    fn test_parse_integer_rejects_loose_forms() {
        assert_eq!(parse_integer(""), None);
        assert_eq!(parse_integer("-"), None);
        assert_eq!(parse_integer("+42"), None);
        assert_eq!(parse_integer("4 2"), None);
        assert_eq!(parse_integer("42x"), None);
        assert_eq!(parse_integer("4.2"), None);
        // Out of i64 range parses lexically but not numerically.
        assert_eq!(parse_integer("99999999999999999999"), None);
    }

    #[test]
    fn test_slice_between_basic() {
        assert_eq!(slice_between("hello", 1, 3), Some("he".to_string()));
        assert_eq!(slice_between("hello", 2, 6), Some("ello".to_string()));
        assert_eq!(slice_between("hello", 1, 6), Some("hello".to_string()));
    }

    #[test]
    fn test_slice_between_empty_range() {
        assert_eq!(slice_between("hello", 3, 3), Some(String::new()));
        assert_eq!(slice_between("hello", 4, 2), Some(String::new()));
    }

    #[test]
    fn test_slice_between_rejects_non_positive() {
        assert_eq!(slice_between("hello", 0, 3), None);
        assert_eq!(slice_between("hello", 1, 0), None);
        assert_eq!(slice_between("hello", -1, 3), None);
    }

    #[test]
    fn test_slice_between_rejects_past_end() {
        assert_eq!(slice_between("hello", 1, 7), None);
        assert_eq!(slice_between("", 1, 2), None);
    }

    #[test]
    fn test_slice_between_counts_characters() {
        assert_eq!(slice_between("žluť", 2, 4), Some("lu".to_string()));
    }
}
