/// Default limit on array/object nesting.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Configuration options for the JSON parser.
///
/// # Examples
///
/// ```rust
/// use jsontree::{ErrorKind, Parser, ParserOptions};
///
/// let mut parser = Parser::new(ParserOptions { max_depth: 2 });
/// assert!(parser.parse("[[1]]").is_ok());
/// assert_eq!(
///     parser.parse("[[[1]]]").unwrap_err().kind(),
///     ErrorKind::MaxDepthExceeded
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserOptions {
    /// Maximum nesting of arrays and objects.
    ///
    /// The parser recurses once per nesting level, so this bounds its stack
    /// usage. A document nested deeper fails with
    /// [`ErrorKind::MaxDepthExceeded`](crate::ErrorKind::MaxDepthExceeded).
    /// Scalars at the root have depth 0; `[]` has depth 1.
    ///
    /// # Default
    ///
    /// `128`
    pub max_depth: usize,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}
