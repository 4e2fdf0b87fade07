//! Compact JSON output.
//!
//! No insignificant whitespace is emitted and object members keep their
//! insertion order. Output is built in the serializer's [`Scratch`] buffer
//! and copied out once complete.
use bstr::BString;
use log::trace;

use crate::{scratch::Scratch, value::Value};

const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// A reusable JSON serializer.
///
/// # Examples
///
/// ```rust
/// use jsontree::{Serializer, Value};
///
/// let mut serializer = Serializer::new();
/// let v = jsontree::parse(r#"{ "b" : 1, "a" : [ "x\ty" ] }"#).unwrap();
/// assert_eq!(serializer.stringify(&v), r#"{"b":1,"a":["x\ty"]}"#);
/// assert_eq!(serializer.stringify(&Value::Null), "null");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Serializer {
    scratch: Scratch,
}

impl Serializer {
    /// Creates a serializer with an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a serializer whose buffer can hold `capacity` bytes of output
    /// before growing.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            scratch: Scratch::with_capacity(capacity),
        }
    }

    /// Renders `value` as compact JSON.
    #[must_use]
    pub fn stringify(&mut self, value: &Value) -> BString {
        self.scratch.clear();
        write_value(&mut self.scratch, value);
        self.scratch.take()
    }
}

/// Renders `value` as compact JSON with a fresh [`Serializer`].
///
/// Strings are written byte for byte, so the output is valid UTF-8 whenever
/// every string in the tree is.
///
/// # Examples
///
/// ```rust
/// let v = jsontree::parse(r#"{"b":1,"a":2}"#).unwrap();
/// assert_eq!(jsontree::stringify(&v), r#"{"b":1,"a":2}"#);
/// ```
#[must_use]
pub fn stringify(value: &Value) -> BString {
    Serializer::new().stringify(value)
}

fn write_value(out: &mut Scratch, value: &Value) {
    match value {
        Value::Null => out.push_bytes(b"null"),
        Value::Boolean(true) => out.push_bytes(b"true"),
        Value::Boolean(false) => out.push_bytes(b"false"),
        Value::Number(n) => write_number(out, *n),
        Value::String(s) => write_string(out, s),
        Value::Array(items) => {
            out.push_byte(b'[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_byte(b',');
                }
                write_value(out, item);
            }
            out.push_byte(b']');
        }
        Value::Object(members) => {
            out.push_byte(b'{');
            for (i, (key, item)) in members.iter().enumerate() {
                if i > 0 {
                    out.push_byte(b',');
                }
                write_string(out, key);
                out.push_byte(b':');
                write_value(out, item);
            }
            out.push_byte(b'}');
        }
    }
}

/// Shortest decimal that parses back to the same `f64`. Very large and very
/// small magnitudes use exponent notation to keep the output short.
fn write_number(out: &mut Scratch, n: f64) {
    if !n.is_finite() {
        trace!("non-finite number {n} serialized as null");
        out.push_bytes(b"null");
        return;
    }
    let magnitude = n.abs();
    if magnitude == 0.0 || (1e-6..1e21).contains(&magnitude) {
        out.push_fmt(format_args!("{n}"));
    } else {
        out.push_fmt(format_args!("{n:e}"));
    }
}

fn write_string(out: &mut Scratch, s: &[u8]) {
    out.push_byte(b'"');
    let mut unicode = *b"\\u0000";
    let mut start = 0;
    for (i, &b) in s.iter().enumerate() {
        let escape: &[u8] = match b {
            b'"' => b"\\\"",
            b'\\' => b"\\\\",
            0x08 => b"\\b",
            0x0C => b"\\f",
            b'\n' => b"\\n",
            b'\r' => b"\\r",
            b'\t' => b"\\t",
            0x00..=0x1F => {
                unicode[4] = HEX_DIGITS[usize::from(b >> 4)];
                unicode[5] = HEX_DIGITS[usize::from(b & 0xF)];
                &unicode
            }
            _ => continue,
        };
        out.push_bytes(&s[start..i]);
        out.push_bytes(escape);
        start = i + 1;
    }
    out.push_bytes(&s[start..]);
    out.push_byte(b'"');
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(0.0, "0")]
    #[case(-0.0, "-0")]
    #[case(1.0, "1")]
    #[case(-1.5, "-1.5")]
    #[case(0.1, "0.1")]
    #[case(3.1416, "3.1416")]
    #[case(1e20, "100000000000000000000")]
    #[case(1e21, "1e21")]
    #[case(1.5e-7, "1.5e-7")]
    #[case(1e-6, "0.000001")]
    #[case(f64::MAX, "1.7976931348623157e308")]
    #[case(f64::MIN_POSITIVE, "2.2250738585072014e-308")]
    #[case(5e-324, "5e-324")]
    fn numbers_use_shortest_form(#[case] n: f64, #[case] expected: &str) {
        assert_eq!(stringify(&Value::Number(n)), expected);
    }

    #[test]
    fn numbers_inside_containers_keep_surrounding_bytes() {
        let v = Value::Array(vec![Value::Number(1e-7), Value::Number(12.5), Value::Number(1e21)]);
        assert_eq!(stringify(&v), "[1e-7,12.5,1e21]");
    }

    #[test]
    fn non_finite_numbers_become_null() {
        assert_eq!(stringify(&Value::Number(f64::NAN)), "null");
        assert_eq!(stringify(&Value::Number(f64::INFINITY)), "null");
    }

    #[rstest]
    #[case(&b"plain"[..], r#""plain""#)]
    #[case(&b"q\"b\\s/"[..], r#""q\"b\\s/""#)]
    #[case(&b"\x08\x0c\n\r\t"[..], r#""\b\f\n\r\t""#)]
    #[case(&b"\x00\x01\x1f"[..], r#""\u0000\u0001\u001F""#)]
    #[case("é𝄞".as_bytes(), "\"é𝄞\"")]
    fn strings_escape_quotes_and_controls(#[case] bytes: &[u8], #[case] expected: &str) {
        assert_eq!(stringify(&Value::from(bytes)), expected);
    }

    #[test]
    fn non_utf8_bytes_are_written_verbatim() {
        let out = stringify(&Value::from(&b"\x7f\xff"[..]));
        assert_eq!(out.as_slice(), b"\"\x7f\xff\"");
    }

    #[test]
    fn containers_are_compact() {
        let v: Value = [
            ("empty_a", Value::Array(vec![])),
            ("empty_o", Value::Object(vec![])),
            (
                "nested",
                Value::Array(vec![Value::Null, Value::Boolean(false), Value::from("s")]),
            ),
        ]
        .into_iter()
        .collect();
        assert_eq!(
            stringify(&v),
            r#"{"empty_a":[],"empty_o":{},"nested":[null,false,"s"]}"#
        );
    }

    #[test]
    fn serializer_reuses_buffer() {
        let mut s = Serializer::with_capacity(8);
        assert_eq!(s.stringify(&Value::from("first")), r#""first""#);
        assert_eq!(s.stringify(&Value::Boolean(true)), "true");
    }
}
