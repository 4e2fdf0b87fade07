use thiserror::Error;

use crate::value::ValueType;

/// The reason a document was rejected by the parser.
///
/// Exactly one kind is reported per failed parse: the first error
/// encountered wins and no partial result is returned.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The input ended (or contained only whitespace) where a value was
    /// required.
    #[error("expected a value")]
    ExpectValue,
    /// The bytes at the current position do not start a valid value.
    #[error("invalid value")]
    InvalidValue,
    /// A complete value was followed by more non-whitespace input.
    #[error("root value is followed by trailing content")]
    RootNotSingular,
    /// A number is too large in magnitude to be represented as an `f64`.
    #[error("number too big")]
    NumberTooBig,
    /// The input ended inside a string.
    #[error("missing closing quotation mark")]
    MissStringQuote,
    /// A backslash was followed by a character that is not a JSON escape.
    #[error("invalid string escape")]
    InvalidStringEscape,
    /// A control character (below U+0020) appeared unescaped in a string.
    #[error("invalid character in string")]
    InvalidStringChar,
    /// A `\u` escape was not followed by four hex digits, or encoded a lone
    /// low surrogate.
    #[error("invalid unicode hex escape")]
    InvalidUnicodeHex,
    /// A high surrogate was not followed by an escaped low surrogate.
    #[error("invalid unicode surrogate pair")]
    InvalidUnicodeSurrogate,
    /// An array element was not followed by `,` or `]`.
    #[error("expected ',' or ']'")]
    MissCommaOrSquareBracket,
    /// An object member did not start with a string key.
    #[error("expected an object key")]
    MissKey,
    /// An object key was not followed by `:`.
    #[error("expected ':'")]
    MissColon,
    /// An object member was not followed by `,` or `}`.
    #[error("expected ',' or '}}'")]
    MissCommaOrCurlyBracket,
    /// Arrays and objects are nested deeper than the configured limit.
    #[error("maximum nesting depth exceeded")]
    MaxDepthExceeded,
}

/// A parse failure together with the position at which it was detected.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("{kind} at {line}:{column}")]
pub struct ParseError {
    pub(crate) kind: ErrorKind,
    /// 1-based line of the failure offset.
    pub line: usize,
    /// 1-based column (in bytes) of the failure offset.
    pub column: usize,
}

impl ParseError {
    /// The reason the document was rejected.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }
}

impl PartialEq<ErrorKind> for ParseError {
    fn eq(&self, other: &ErrorKind) -> bool {
        self.kind == *other
    }
}

/// Accessor called outside its contract: wrong variant or index out of range.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessError {
    /// The value holds a different variant than the accessor reads.
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        /// Variant the accessor requires.
        expected: ValueType,
        /// Variant the value actually holds.
        found: ValueType,
    },
    /// An array element or object member index past the end.
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of elements or members.
        len: usize,
    },
}
