//! Recursive-descent JSON parser.
//!
//! ```text
//! JSON    := ws value ws
//! value   := null | true | false | number | string | array | object
//! array   := '[' ws [ value (ws ',' ws value)* ] ws ']'
//! object  := '{' ws [ member (ws ',' ws member)* ] ws '}'
//! member  := string ws ':' ws value
//! ```
//!
//! The parser dispatches on a single byte of lookahead and builds the value
//! tree bottom-up: array elements and object members are appended to their
//! container once they are complete. Decoded string bytes go through the
//! parser's [`Scratch`] buffer; every string is taken out of the buffer
//! before the parser moves on to a sibling, so the buffer is empty between
//! tokens. On error the partially built tree is dropped as the error unwinds
//! and only the [`ParseError`] reaches the caller.
use bstr::BString;
use log::debug;

use crate::{
    cursor::Cursor,
    error::{ErrorKind, ParseError},
    escape,
    literal::Literal,
    options::ParserOptions,
    scratch::Scratch,
    value::{Array, Object, Value},
};

/// A reusable JSON parser.
///
/// The parser owns the scratch buffer used for string decoding, so parsing
/// many documents with one `Parser` reuses the buffer's capacity.
///
/// # Examples
///
/// ```rust
/// use jsontree::{Parser, ParserOptions, Value};
///
/// let mut parser = Parser::new(ParserOptions::default());
/// assert_eq!(parser.parse("[true]").unwrap(), Value::Array(vec![Value::Boolean(true)]));
/// assert_eq!(parser.parse(" null ").unwrap(), Value::Null);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Parser {
    options: ParserOptions,
    scratch: Scratch,
}

impl Parser {
    /// Creates a parser with the given options.
    #[must_use]
    pub fn new(options: ParserOptions) -> Self {
        Self {
            options,
            scratch: Scratch::new(),
        }
    }

    /// The options this parser was created with.
    #[must_use]
    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    /// Parses exactly one JSON value surrounded by optional whitespace.
    ///
    /// # Errors
    ///
    /// Returns the first syntax error found, with the line and column at
    /// which it was detected. See [`ErrorKind`] for the possible reasons.
    pub fn parse(&mut self, input: impl AsRef<[u8]>) -> Result<Value, ParseError> {
        self.scratch.clear();
        let mut ctx = Context {
            cursor: Cursor::new(input.as_ref()),
            scratch: &mut self.scratch,
            depth: 0,
            max_depth: self.options.max_depth,
        };
        match ctx.parse_document() {
            Ok(value) => Ok(value),
            Err(kind) => {
                let (line, column) = ctx.cursor.location();
                debug!("json parse failed: {kind} at {line}:{column}");
                Err(ParseError { kind, line, column })
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn scratch(&self) -> &Scratch {
        &self.scratch
    }
}

/// Parses `input` with a fresh [`Parser`] using default options.
///
/// # Errors
///
/// See [`Parser::parse`].
///
/// # Examples
///
/// ```rust
/// use jsontree::{ErrorKind, Value};
///
/// assert_eq!(jsontree::parse("  true  ").unwrap(), Value::Boolean(true));
/// assert_eq!(jsontree::parse("true x").unwrap_err().kind(), ErrorKind::RootNotSingular);
/// ```
pub fn parse(input: impl AsRef<[u8]>) -> Result<Value, ParseError> {
    Parser::default().parse(input)
}

struct Context<'src, 'buf> {
    cursor: Cursor<'src>,
    scratch: &'buf mut Scratch,
    depth: usize,
    max_depth: usize,
}

impl Context<'_, '_> {
    fn parse_document(&mut self) -> Result<Value, ErrorKind> {
        self.cursor.skip_whitespace();
        let value = self.parse_value()?;
        self.cursor.skip_whitespace();
        if !self.cursor.is_at_end() {
            return Err(ErrorKind::RootNotSingular);
        }
        Ok(value)
    }

    fn parse_value(&mut self) -> Result<Value, ErrorKind> {
        match self.cursor.peek() {
            None => Err(ErrorKind::ExpectValue),
            Some(b'"') => self.parse_string().map(Value::String),
            Some(b'[') => self.parse_array(),
            Some(b'{') => self.parse_object(),
            Some(b'-' | b'0'..=b'9') => self.parse_number(),
            Some(b) => match Literal::from_first_byte(b) {
                Some(literal) => literal.parse(&mut self.cursor),
                None => Err(ErrorKind::InvalidValue),
            },
        }
    }

    // ---------------------------------------------------------------------
    // Numbers
    // ---------------------------------------------------------------------

    fn skip_digits(&mut self) {
        self.cursor.take_while(|b| b.is_ascii_digit());
    }

    fn expect_digits(&mut self) -> Result<(), ErrorKind> {
        if self.cursor.take_while(|b| b.is_ascii_digit()).is_empty() {
            return Err(ErrorKind::InvalidValue);
        }
        Ok(())
    }

    /// Validates `-? (0 | [1-9][0-9]*) (. [0-9]+)? ([eE] [+-]? [0-9]+)?` and
    /// converts the token to the nearest `f64`.
    fn parse_number(&mut self) -> Result<Value, ErrorKind> {
        let start = self.cursor.offset();
        self.cursor.eat(b'-');
        if !self.cursor.eat(b'0') {
            if !matches!(self.cursor.peek(), Some(b'1'..=b'9')) {
                return Err(ErrorKind::InvalidValue);
            }
            self.skip_digits();
        }
        if self.cursor.eat(b'.') {
            self.expect_digits()?;
        }
        if self.cursor.eat(b'e') || self.cursor.eat(b'E') {
            if !self.cursor.eat(b'+') {
                self.cursor.eat(b'-');
            }
            self.expect_digits()?;
        }

        let token = self.cursor.slice_from(start);
        let n: f64 = core::str::from_utf8(token)
            .ok()
            .and_then(|text| text.parse().ok())
            .ok_or(ErrorKind::InvalidValue)?;
        if n.is_infinite() {
            return Err(ErrorKind::NumberTooBig);
        }
        Ok(Value::Number(n))
    }

    // ---------------------------------------------------------------------
    // Strings
    // ---------------------------------------------------------------------

    /// Decodes a string starting at its opening quote. The decoded bytes are
    /// built above a scratch checkpoint and taken out as the result; on
    /// failure the scratch is restored to the checkpoint.
    fn parse_string(&mut self) -> Result<BString, ErrorKind> {
        let mark = self.scratch.len();
        match self.decode_string() {
            Ok(()) => Ok(self.scratch.take_from(mark)),
            Err(kind) => {
                self.scratch.truncate(mark);
                Err(kind)
            }
        }
    }

    fn decode_string(&mut self) -> Result<(), ErrorKind> {
        let opened = self.cursor.eat(b'"');
        debug_assert!(opened, "string must start at a quote");
        loop {
            let run = self
                .cursor
                .take_while(|b| b >= 0x20 && b != b'"' && b != b'\\');
            self.scratch.push_bytes(run);
            match self.cursor.next_byte() {
                None => return Err(ErrorKind::MissStringQuote),
                Some(b'"') => return Ok(()),
                Some(b'\\') => self.decode_escape()?,
                Some(_) => return Err(ErrorKind::InvalidStringChar),
            }
        }
    }

    fn decode_escape(&mut self) -> Result<(), ErrorKind> {
        let decoded = match self.cursor.next_byte() {
            Some(b'"') => b'"',
            Some(b'\\') => b'\\',
            Some(b'/') => b'/',
            Some(b'b') => 0x08,
            Some(b'f') => 0x0C,
            Some(b'n') => b'\n',
            Some(b'r') => b'\r',
            Some(b't') => b'\t',
            Some(b'u') => {
                let c = escape::read_code_point(&mut self.cursor)?;
                escape::push_utf8(self.scratch, c);
                return Ok(());
            }
            _ => return Err(ErrorKind::InvalidStringEscape),
        };
        self.scratch.push_byte(decoded);
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Containers
    // ---------------------------------------------------------------------

    fn enter(&mut self) -> Result<(), ErrorKind> {
        if self.depth >= self.max_depth {
            debug!("nesting depth limit of {} reached", self.max_depth);
            return Err(ErrorKind::MaxDepthExceeded);
        }
        self.depth += 1;
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    fn parse_array(&mut self) -> Result<Value, ErrorKind> {
        self.enter()?;
        self.cursor.advance();
        self.cursor.skip_whitespace();

        let mut items = Array::new();
        if !self.cursor.eat(b']') {
            loop {
                items.push(self.parse_value()?);
                self.cursor.skip_whitespace();
                if self.cursor.eat(b',') {
                    self.cursor.skip_whitespace();
                } else if self.cursor.eat(b']') {
                    break;
                } else {
                    return Err(ErrorKind::MissCommaOrSquareBracket);
                }
            }
        }

        self.leave();
        Ok(Value::Array(items))
    }

    fn parse_object(&mut self) -> Result<Value, ErrorKind> {
        self.enter()?;
        self.cursor.advance();
        self.cursor.skip_whitespace();

        let mut members = Object::new();
        if !self.cursor.eat(b'}') {
            loop {
                if self.cursor.peek() != Some(b'"') {
                    return Err(ErrorKind::MissKey);
                }
                // The key leaves the scratch buffer before the value is parsed.
                let key = self.parse_string()?;
                self.cursor.skip_whitespace();
                if !self.cursor.eat(b':') {
                    return Err(ErrorKind::MissColon);
                }
                self.cursor.skip_whitespace();
                let value = self.parse_value()?;
                members.push((key, value));

                self.cursor.skip_whitespace();
                if self.cursor.eat(b',') {
                    self.cursor.skip_whitespace();
                } else if self.cursor.eat(b'}') {
                    break;
                } else {
                    return Err(ErrorKind::MissCommaOrCurlyBracket);
                }
            }
        }

        self.leave();
        Ok(Value::Object(members))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scratch_is_empty_after_success_and_failure() {
        let mut parser = Parser::default();
        parser.parse(r#"{"key":["a\n","b"]}"#).unwrap();
        assert!(parser.scratch().is_empty());

        let err = parser.parse(r#"{"key":["a\n","b\x"]}"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidStringEscape);
        assert!(parser.scratch().is_empty());
    }

    #[test]
    fn scratch_capacity_is_reused() {
        let mut parser = Parser::default();
        parser.parse(r#""a string long enough to grow the buffer a bit""#).unwrap();
        let cap = parser.scratch().capacity();
        assert!(cap > 0);
        parser.parse(r#""short""#).unwrap();
        assert_eq!(parser.scratch().capacity(), cap);
    }

    #[test]
    fn error_location_points_at_failure() {
        let err = parse("[1,\n  2,\n  x]").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
        assert_eq!((err.line, err.column), (3, 3));
    }

    #[test]
    fn options_are_kept() {
        let parser = Parser::new(ParserOptions { max_depth: 7 });
        assert_eq!(parser.options().max_depth, 7);
    }
}
